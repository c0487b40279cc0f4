//! Custom actions for the Account actor.
//!
//! Every action that changes the account is persisted to the user's record before the actor
//! replies.

use crate::model::{Amount, Cart, CartItem, MenuItem, Order, OrderId, OrderStatus, ServeOption};

#[derive(Debug, Clone)]
pub enum AccountAction {
    /// Adds a menu item to the cart, merging with an existing line.
    ///
    /// # Errors
    /// Fails for unavailable items and a zero quantity.
    AddToCart { item: MenuItem, quantity: u32 },
    /// Sets a cart line's quantity; zero removes the line.
    SetCartQuantity { name: String, quantity: u32 },
    RemoveFromCart { name: String },
    /// Replaces the cart wholesale, as a reorder does.
    ReplaceCart {
        items: Vec<CartItem>,
        serve_option: Option<ServeOption>,
    },
    /// Remembers the quantity picked on a menu card.
    SelectQuantity { name: String, quantity: u32 },
    /// Empties the cart and forgets the serve option and picked quantities.
    ResetCart,
    /// Takes an order total off the remaining allowance.
    ///
    /// # Errors
    /// Fails without changing anything when the total exceeds the remaining allowance.
    Deduct(Amount),
    TopUp(Amount),
    /// Appends a placed order to the history.
    RecordOrder(Order),
    SetOrderStatus {
        order_id: OrderId,
        status: OrderStatus,
    },
}

/// Results from AccountActions - variants match 1:1 with AccountAction
#[derive(Debug, Clone)]
pub enum AccountActionResult {
    AddToCart(Cart),
    SetCartQuantity(Cart),
    RemoveFromCart(Cart),
    ReplaceCart(Cart),
    /// The quantity now selected.
    SelectQuantity(u32),
    ResetCart(()),
    /// Remaining allowance after the deduction.
    Deduct(Amount),
    /// Remaining allowance after the top-up.
    TopUp(Amount),
    RecordOrder(Order),
    /// The order with its new status.
    SetOrderStatus(Order),
}
