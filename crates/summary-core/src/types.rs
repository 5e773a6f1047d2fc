//! Core data types for purchase summaries.
//!
//! This module defines the fundamental data structures:
//!
//! - [`PurchaseRecord`] - One customer visit as reported by the remote source
//! - [`Summary`] - Aggregate statistics over one or more days of records

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single customer visit reported by the record source.
///
/// `amount` and `payment_method` only carry meaning when `purchased` is true.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    /// Whether the customer completed a purchase.
    pub purchased: bool,
    /// Purchase amount.
    pub amount: f64,
    /// Free-form payment method label (e.g. "visa gold").
    pub payment_method: String,
}

impl PurchaseRecord {
    /// Creates a record for a customer who bought `amount` with `payment_method`.
    #[must_use]
    pub fn purchase(amount: f64, payment_method: impl Into<String>) -> Self {
        Self {
            purchased: true,
            amount,
            payment_method: payment_method.into(),
        }
    }

    /// Creates a record for a customer who left without buying.
    #[must_use]
    pub fn no_purchase() -> Self {
        Self::default()
    }
}

/// Aggregate statistics over a set of purchase records.
///
/// `Summary::default()` is the all-zero identity for [`Summary::merge`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Sum of amounts over purchasing customers.
    pub total: f64,
    /// Purchasing customers per payment method. Keys are only present with a count of at least one.
    pub purchases_by_method: BTreeMap<String, u64>,
    /// Customers that did not purchase.
    pub non_purchasers: u64,
    /// Largest single purchase, or zero if nobody purchased.
    pub highest_purchase: f64,
}

impl Summary {
    /// Number of purchasing customers counted in this summary.
    #[must_use]
    pub fn purchasers(&self) -> u64 {
        self.purchases_by_method.values().sum()
    }

    /// Total customers seen, purchasing or not.
    #[must_use]
    pub fn customers(&self) -> u64 {
        self.purchasers() + self.non_purchasers
    }

    /// Returns true if no customers are counted at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.non_purchasers == 0 && self.purchases_by_method.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        let summary = Summary::default();
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.highest_purchase, 0.0);
        assert_eq!(summary.non_purchasers, 0);
        assert!(summary.purchases_by_method.is_empty());
        assert!(summary.is_empty());
    }

    #[test]
    fn test_customer_counts() {
        let summary = Summary {
            total: 30.0,
            purchases_by_method: BTreeMap::from([("visa".to_string(), 2), ("amex".to_string(), 1)]),
            non_purchasers: 4,
            highest_purchase: 15.0,
        };
        assert_eq!(summary.purchasers(), 3);
        assert_eq!(summary.customers(), 7);
        assert!(!summary.is_empty());
    }

    #[test]
    fn test_record_constructors() {
        let bought = PurchaseRecord::purchase(12.5, "maestro");
        assert!(bought.purchased);
        assert_eq!(bought.payment_method, "maestro");

        let left = PurchaseRecord::no_purchase();
        assert!(!left.purchased);
        assert_eq!(left.amount, 0.0);
    }

    #[test]
    fn test_summary_serde_shape() {
        let summary = Summary {
            total: 10.0,
            purchases_by_method: BTreeMap::from([("visa".to_string(), 1)]),
            non_purchasers: 0,
            highest_purchase: 10.0,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["purchases_by_method"]["visa"], 1);
        assert_eq!(json["highest_purchase"], 10.0);
    }
}
