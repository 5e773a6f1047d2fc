//! Calendar date keys and range expansion.
//!
//! [`DateKey`] is the single canonical identity of a day: cache entries are
//! keyed by it and the record source is queried with its ISO form.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SummaryError};

/// A calendar day, rendered canonically as `YYYY-MM-DD`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Creates a key from its calendar components.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::InvalidArgument`] if the components do not name a
    /// real Gregorian date (e.g. month 13 or February 30).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| SummaryError::invalid_argument("date", format!("{year}-{month}-{day}")))
    }

    /// Returns the underlying date.
    #[must_use]
    pub const fn as_date(&self) -> NaiveDate {
        self.0
    }

    /// Calendar year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Calendar month, 1-based.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of month, 1-based.
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the key `days` calendar days after this one.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::InvalidArgument`] if the result falls outside the
    /// representable date range.
    pub fn plus_days(&self, days: u32) -> Result<Self> {
        self.0
            .checked_add_days(Days::new(u64::from(days)))
            .map(Self)
            .ok_or_else(|| SummaryError::invalid_argument("days", days))
    }

    /// Expands `days` consecutive keys starting at (and including) this one.
    ///
    /// Month and year boundaries follow the Gregorian calendar.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::InvalidArgument`] if any day in the range is not
    /// representable.
    pub fn range(&self, days: u32) -> Result<Vec<Self>> {
        (0..days).map(|offset| self.plus_days(offset)).collect()
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Parses `YYYY-M-D` with a four digit year and one or two digit month and day.
impl FromStr for DateKey {
    type Err = SummaryError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SummaryError::invalid_argument("date", s);

        let mut parts = s.split('-');
        let (Some(year), Some(month), Some(day), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let digits = |part: &str, min: usize, max: usize| {
            (min..=max).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
        };
        if !digits(year, 4, 4) || !digits(month, 1, 2) || !digits(day, 1, 2) {
            return Err(invalid());
        }

        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        let day = day.parse().map_err(|_| invalid())?;
        Self::from_ymd(year, month, day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_zero_padded_iso() {
        let key = DateKey::from_ymd(2019, 12, 1).unwrap();
        assert_eq!(key.to_string(), "2019-12-01");
    }

    #[test]
    fn test_impossible_dates_rejected() {
        assert!(DateKey::from_ymd(2019, 13, 1).unwrap_err().is_invalid_argument());
        assert!(DateKey::from_ymd(2019, 2, 30).is_err());
        assert!(DateKey::from_ymd(2020, 2, 29).is_ok());
    }

    #[test]
    fn test_parse_accepts_short_components() {
        let key: DateKey = "2019-12-1".parse().unwrap();
        assert_eq!(key, DateKey::from_ymd(2019, 12, 1).unwrap());
        let key: DateKey = "2019-01-09".parse().unwrap();
        assert_eq!(key.to_string(), "2019-01-09");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["2019-", "2019-12", "19-12-01", "2019-123-01", "2019-12-01-01", "abcd-12-01", ""] {
            assert!(input.parse::<DateKey>().is_err(), "{input} should not parse");
        }
    }

    #[test]
    fn test_range_crosses_month_and_year() {
        let start = DateKey::from_ymd(2019, 12, 30).unwrap();
        let keys: Vec<String> = start.range(4).unwrap().iter().map(ToString::to_string).collect();
        assert_eq!(keys, ["2019-12-30", "2019-12-31", "2020-01-01", "2020-01-02"]);
    }

    #[test]
    fn test_range_leap_day() {
        let start = DateKey::from_ymd(2020, 2, 28).unwrap();
        let keys = start.range(2).unwrap();
        assert_eq!(keys[1], DateKey::from_ymd(2020, 2, 29).unwrap());
    }

    #[test]
    fn test_range_zero_is_empty() {
        let start = DateKey::from_ymd(2019, 12, 1).unwrap();
        assert!(start.range(0).unwrap().is_empty());
    }

    #[test]
    fn test_components() {
        let key = DateKey::from_ymd(2019, 3, 7).unwrap();
        assert_eq!((key.year(), key.month(), key.day()), (2019, 3, 7));
    }
}
