//! Combination of partial summaries into one multi-day [`Summary`].

use crate::types::Summary;

impl Summary {
    /// Folds `other` into `self`.
    ///
    /// Totals and non-purchaser counts add, the highest purchase is the larger
    /// of the two, and method counts add key by key.
    pub fn merge(&mut self, other: &Self) {
        self.total += other.total;
        self.non_purchasers += other.non_purchasers;
        self.highest_purchase = self.highest_purchase.max(other.highest_purchase);
        for (method, count) in &other.purchases_by_method {
            *self.purchases_by_method.entry(method.clone()).or_insert(0) += count;
        }
    }
}

/// Combines any number of summaries. An empty input yields `Summary::default()`.
pub fn combine<'a, I>(summaries: I) -> Summary
where
    I: IntoIterator<Item = &'a Summary>,
{
    summaries
        .into_iter()
        .fold(Summary::default(), |mut acc, summary| {
            acc.merge(summary);
            acc
        })
}

impl<'a> FromIterator<&'a Summary> for Summary {
    fn from_iter<T: IntoIterator<Item = &'a Summary>>(iter: T) -> Self {
        combine(iter)
    }
}

impl FromIterator<Summary> for Summary {
    fn from_iter<T: IntoIterator<Item = Summary>>(iter: T) -> Self {
        iter.into_iter().fold(Self::default(), |mut acc, summary| {
            acc.merge(&summary);
            acc
        })
    }
}
