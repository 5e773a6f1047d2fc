//! Reduction of one day's purchase records into a [`Summary`].

use crate::error::{Result, SummaryError};
use crate::types::{PurchaseRecord, Summary};

/// Reduces a day's records into a [`Summary`] in a single pass.
///
/// The result does not depend on record order. An empty slice yields
/// `Summary::default()`.
///
/// # Errors
///
/// Returns [`SummaryError::Validation`] if a purchasing record carries a
/// negative or non-finite amount. Amounts of non-purchasing records are not
/// inspected.
pub fn reduce(records: &[PurchaseRecord]) -> Result<Summary> {
    let mut summary = Summary::default();

    for (index, record) in records.iter().enumerate() {
        if !record.purchased {
            summary.non_purchasers += 1;
            continue;
        }

        if !record.amount.is_finite() || record.amount < 0.0 {
            return Err(SummaryError::Validation(format!(
                "record {index} has invalid purchase amount {}",
                record.amount
            )));
        }

        summary.total += record.amount;
        summary.highest_purchase = summary.highest_purchase.max(record.amount);
        *summary
            .purchases_by_method
            .entry(record.payment_method.clone())
            .or_insert(0) += 1;
    }

    Ok(summary)
}
