//! Pure data structures: the menu, carts, orders, allowances, notifications and the account
//! entity that the account actor manages.

pub mod account;
pub mod allowance;
pub mod cart;
pub mod menu;
pub mod notification;
pub mod order;

pub use account::*;
pub use allowance::*;
pub use cart::*;
pub use menu::*;
pub use notification::*;
pub use order::*;

/// Money in whole naira. Unsigned, so no balance or price can go negative.
pub type Amount = u64;
