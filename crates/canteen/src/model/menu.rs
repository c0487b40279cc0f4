use super::Amount;
use serde::{Deserialize, Serialize};

/// Whether the kitchen is serving an item today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Unavailable,
}

/// One dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub price: Amount,
    pub status: Availability,
    pub image: String,
}

impl MenuItem {
    pub fn new(
        name: impl Into<String>,
        price: Amount,
        status: Availability,
        image: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price,
            status,
            image: image.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == Availability::Available
    }
}

/// The read-only catalog the cart is filled from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// The food court's standing menu.
    pub fn food_court() -> Self {
        use Availability::{Available, Unavailable};
        Self::new(vec![
            MenuItem::new("Jollof Rice", 500, Available, "/jollof.jpeg"),
            MenuItem::new("Amala & Ewedu", 400, Unavailable, "/amala.jpeg"),
            MenuItem::new("Grilled Fish", 300, Available, "/fish.jpeg"),
            MenuItem::new("Porridge", 400, Available, "/porridge.jpeg"),
            MenuItem::new("Rice and Beans", 600, Available, "/rice-and-beans.jpeg"),
            MenuItem::new("Spaghetti", 500, Unavailable, "/spaghetti.jpeg"),
            MenuItem::new("Yam & Egg", 600, Available, "/yam-and-egg.jpeg"),
            MenuItem::new("Beef", 400, Available, "/beef.jpeg"),
        ])
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn available(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.iter().filter(|item| item.is_available())
    }

    pub fn find(&self, name: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.name == name)
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::food_court()
    }
}
