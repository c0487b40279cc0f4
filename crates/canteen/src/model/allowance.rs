use super::Amount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Daily allowance every account starts with.
pub const DEFAULT_ALLOWANCE: Amount = 2500;

/// A diner's spending allowance.
///
/// `remaining` only moves through [`Allowance::deduct`] and [`Allowance::top_up`], so it can never
/// drop below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allowance {
    pub total: Amount,
    pub remaining: Amount,
}

/// Returned when a deduction exceeds what is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Insufficient balance: requested {requested}, available {available}")]
pub struct InsufficientBalance {
    pub requested: Amount,
    pub available: Amount,
}

impl Allowance {
    pub fn new(amount: Amount) -> Self {
        Self {
            total: amount,
            remaining: amount,
        }
    }

    /// Removes `amount` from the balance, leaving it untouched on failure.
    pub fn deduct(&mut self, amount: Amount) -> Result<Amount, InsufficientBalance> {
        self.remaining = self
            .remaining
            .checked_sub(amount)
            .ok_or(InsufficientBalance {
                requested: amount,
                available: self.remaining,
            })?;
        Ok(self.remaining)
    }

    /// Adds `amount` to the balance. The total is the day's grant and does not move.
    pub fn top_up(&mut self, amount: Amount) -> Amount {
        self.remaining = self.remaining.saturating_add(amount);
        self.remaining
    }

    pub fn spent(&self) -> Amount {
        self.total.saturating_sub(self.remaining)
    }
}

impl Default for Allowance {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWANCE)
    }
}

/// One recorded top-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopUp {
    pub amount: Amount,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_then_top_up() {
        let mut allowance = Allowance::default();
        assert_eq!(allowance.deduct(800), Ok(1700));
        assert_eq!(allowance.top_up(500), 2200);
        assert_eq!(allowance.total, 2500);
        assert_eq!(allowance.spent(), 300);
    }

    #[test]
    fn failed_deduction_leaves_balance_alone() {
        let mut allowance = Allowance::new(300);
        let err = allowance.deduct(400).unwrap_err();
        assert_eq!(
            err,
            InsufficientBalance {
                requested: 400,
                available: 300
            }
        );
        assert_eq!(allowance.remaining, 300);
        assert_eq!(allowance.deduct(300), Ok(0));
    }

    #[test]
    fn top_up_saturates() {
        let mut allowance = Allowance::new(Amount::MAX - 1);
        assert_eq!(allowance.top_up(10), Amount::MAX);
    }
}
