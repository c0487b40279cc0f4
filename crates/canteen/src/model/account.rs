//! The per-diner account: cart, allowance and order history.
//!
//! # Actor Framework
//! [`Account`] implements [`ActorEntity`](canteen_actor::ActorEntity); see
//! [`crate::account_actor`] for the actions it handles. It is keyed by email and hydrated from
//! the user's persisted record when the actor creates it.

use super::{Allowance, Amount, Cart, Order, ServeOption, TopUp};
use crate::store::UserRecord;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub email: String,
    pub cart: Cart,
    /// Quantity picked on each menu card before it is added to the cart.
    pub quantities: BTreeMap<String, u32>,
    pub serve_option: Option<ServeOption>,
    pub allowance: Allowance,
    pub history: Vec<Order>,
    pub top_ups: Vec<TopUp>,
}

impl Account {
    pub fn new(email: impl Into<String>, allowance: Amount) -> Self {
        Self {
            email: email.into(),
            cart: Cart::default(),
            quantities: BTreeMap::new(),
            serve_option: None,
            allowance: Allowance::new(allowance),
            history: Vec::new(),
            top_ups: Vec::new(),
        }
    }

    /// Rebuilds an account from its stored record.
    ///
    /// Missing allowance fields take `default_allowance`; a stored zero stays zero.
    pub fn from_record(
        email: impl Into<String>,
        record: UserRecord,
        default_allowance: Amount,
    ) -> Self {
        let total = record.total_allowance.unwrap_or(default_allowance);
        Self {
            email: email.into(),
            cart: Cart::from_items(record.cart),
            quantities: record.quantities,
            serve_option: record.serve_option,
            allowance: Allowance {
                total,
                remaining: record.remaining_allowance.unwrap_or(total),
            },
            history: record.last_ordered,
            top_ups: record.top_up_history,
        }
    }

    /// Writes this account's fields into `record`, leaving fields it does not own alone.
    pub fn write_into(&self, record: &mut UserRecord) {
        record.cart = self.cart.items().to_vec();
        record.quantities = self.quantities.clone();
        record.serve_option = self.serve_option;
        record.total_allowance = Some(self.allowance.total);
        record.remaining_allowance = Some(self.allowance.remaining);
        record.last_ordered = self.history.clone();
        record.top_up_history = self.top_ups.clone();
    }

    /// Quantity selected on a menu card; 1 until the diner picks another.
    pub fn selected_quantity(&self, name: &str) -> u32 {
        self.quantities.get(name).copied().unwrap_or(1)
    }
}

/// DTO for loading an account into the actor.
#[derive(Debug, Clone)]
pub struct AccountCreate {
    pub email: String,
}

/// DTO for plain field updates.
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    pub serve_option: Option<ServeOption>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_allowance_takes_default_but_zero_stays_zero() {
        let fresh = Account::from_record("a@b.c", UserRecord::default(), 2500);
        assert_eq!(fresh.allowance, Allowance::new(2500));

        let spent = UserRecord {
            total_allowance: Some(2500),
            remaining_allowance: Some(0),
            ..UserRecord::default()
        };
        let account = Account::from_record("a@b.c", spent, 2500);
        assert_eq!(account.allowance.remaining, 0);
    }

    #[test]
    fn selected_quantity_defaults_to_one() {
        let mut account = Account::new("a@b.c", 2500);
        assert_eq!(account.selected_quantity("Beef"), 1);
        account.quantities.insert("Beef".into(), 3);
        assert_eq!(account.selected_quantity("Beef"), 3);
    }
}
