use super::{Amount, MenuItem};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How a diner wants an order served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServeOption {
    Plate,
    Takeout,
}

/// A priced line in a cart or an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub name: String,
    pub price: Amount,
    pub quantity: u32,
    #[serde(default)]
    pub image: String,
}

impl CartItem {
    pub fn from_menu(item: &MenuItem, quantity: u32) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price,
            quantity,
            image: item.image.clone(),
        }
    }

    pub fn subtotal(&self) -> Amount {
        self.price.saturating_mul(Amount::from(self.quantity))
    }
}

/// The diner's working selection. One line per dish name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Self::default();
        for item in items {
            cart.merge(item);
        }
        cart
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds `quantity` of a dish, merging with an existing line of the same name.
    pub fn add(&mut self, item: &MenuItem, quantity: u32) {
        self.merge(CartItem::from_menu(item, quantity));
    }

    fn merge(&mut self, line: CartItem) {
        match self.items.iter_mut().find(|existing| existing.name == line.name) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(line.quantity);
            }
            None => self.items.push(line),
        }
    }

    /// Sets the quantity of a line; zero removes it. Returns false if the dish is not in the cart.
    pub fn set_quantity(&mut self, name: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(name);
        }
        match self.items.iter_mut().find(|line| line.name == name) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|line| line.name != name);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total(&self) -> Amount {
        self.items
            .iter()
            .fold(0, |sum: Amount, line| sum.saturating_add(line.subtotal()))
    }

    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }
}

/// Serde adapter for a serve option persisted as `"plate"`, `"takeout"` or `""` when unset.
pub mod serve_option_field {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<ServeOption>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(option) => option.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<ServeOption>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw.as_deref() {
            Some("plate") => Some(ServeOption::Plate),
            Some("takeout") => Some(ServeOption::Takeout),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Menu;

    fn menu_item(name: &str) -> MenuItem {
        Menu::food_court().find(name).cloned().unwrap()
    }

    #[test]
    fn adding_the_same_dish_merges_lines() {
        let mut cart = Cart::default();
        cart.add(&menu_item("Jollof Rice"), 1);
        cart.add(&menu_item("Beef"), 2);
        cart.add(&menu_item("Jollof Rice"), 2);

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.total(), 3 * 500 + 2 * 400);
    }

    #[test]
    fn zero_quantity_removes_the_line() {
        let mut cart = Cart::default();
        cart.add(&menu_item("Porridge"), 2);

        assert!(cart.set_quantity("Porridge", 5));
        assert_eq!(cart.total(), 2000);
        assert!(cart.set_quantity("Porridge", 0));
        assert!(cart.is_empty());
        assert!(!cart.set_quantity("Porridge", 1));
    }

    #[test]
    fn serve_option_accepts_empty_string_as_unset() {
        #[derive(Deserialize, Serialize)]
        struct Wrapper {
            #[serde(with = "serve_option_field")]
            serve: Option<ServeOption>,
        }

        let unset: Wrapper = serde_json::from_str(r#"{"serve":""}"#).unwrap();
        assert_eq!(unset.serve, None);
        let takeout: Wrapper = serde_json::from_str(r#"{"serve":"takeout"}"#).unwrap();
        assert_eq!(takeout.serve, Some(ServeOption::Takeout));
        assert_eq!(serde_json::to_string(&unset).unwrap(), r#"{"serve":""}"#);
    }
}
