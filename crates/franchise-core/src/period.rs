//! # Period Windows
//!
//! Explicit date windows for "today vs yesterday" and "this week vs last
//! week" comparisons. The anchor date is always passed in; nothing here
//! reads a clock.
//!
//! ```text
//!            last_week(anchor)             this_week(anchor)
//!   ┌───────────────────────────┐ ┌───────────────────────────┐
//!   Mon                       Sun Mon        anchor           Sun
//! ```
//! Weeks start on Monday (ISO 8601). Both ends of a range are inclusive.

use chrono::{Datelike, Duration, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::SaleRecord;

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DateRange {
    #[ts(as = "String")]
    pub start: NaiveDate,
    #[ts(as = "String")]
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::InvertedRange {
                field: "date range".to_string(),
            });
        }
        Ok(DateRange { start, end })
    }

    pub fn single_day(day: NaiveDate) -> Self {
        DateRange {
            start: day,
            end: day,
        }
    }

    pub fn today(anchor: NaiveDate) -> Self {
        Self::single_day(anchor)
    }

    pub fn yesterday(anchor: NaiveDate) -> Self {
        Self::single_day(anchor - Duration::days(1))
    }

    /// Monday through Sunday of the anchor's week.
    pub fn this_week(anchor: NaiveDate) -> Self {
        let monday = anchor - Duration::days(anchor.weekday().num_days_from_monday() as i64);
        DateRange {
            start: monday,
            end: monday + Duration::days(6),
        }
    }

    pub fn last_week(anchor: NaiveDate) -> Self {
        Self::this_week(anchor - Duration::days(7))
    }

    /// Number of days covered.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Same-length range ending the day before this one starts.
    pub fn previous(&self) -> Self {
        let end = self.start - Duration::days(1);
        DateRange {
            start: end - Duration::days(self.days() - 1),
            end,
        }
    }

    #[inline]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

/// Sales whose local calendar day (at `offset`) falls inside `range`.
pub fn sales_in_range(
    sales: &[SaleRecord],
    range: &DateRange,
    offset: FixedOffset,
) -> Vec<SaleRecord> {
    sales
        .iter()
        .filter(|sale| {
            let day = sale.created_at.with_timezone(&offset).date_naive();
            range.contains(day)
        })
        .cloned()
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use chrono::{TimeZone, Utc};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn test_new_rejects_inverted_range() {
        assert!(DateRange::new(day(5), day(4)).is_err());
        assert_eq!(DateRange::new(day(4), day(4)).unwrap().days(), 1);
    }

    #[test]
    fn test_today_and_yesterday() {
        assert_eq!(DateRange::today(day(1)), DateRange::single_day(day(1)));
        assert_eq!(
            DateRange::yesterday(day(1)),
            DateRange::single_day(NaiveDate::from_ymd_opt(2026, 2, 28).unwrap())
        );
    }

    #[test]
    fn test_weeks_start_monday() {
        // 2026-03-04 is a Wednesday.
        let week = DateRange::this_week(day(4));
        assert_eq!(week.start, day(2));
        assert_eq!(week.end, day(8));
        assert_eq!(week.days(), 7);

        let last = DateRange::last_week(day(4));
        assert_eq!(last.start, NaiveDate::from_ymd_opt(2026, 2, 23).unwrap());
        assert_eq!(last.end, day(1));
        assert_eq!(week.previous(), last);

        // A Monday anchor is the first day of its own week.
        assert_eq!(DateRange::this_week(day(2)).start, day(2));
    }

    #[test]
    fn test_previous_same_length() {
        let range = DateRange::new(day(10), day(12)).unwrap();
        assert_eq!(range.previous(), DateRange::new(day(7), day(9)).unwrap());
    }

    #[test]
    fn test_sales_in_range_uses_local_day() {
        let sale = SaleRecord {
            id: "s1".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 20, 0, 0).unwrap(),
            franchise_id: "f1".to_string(),
            grand_total: Money::from_minor(100),
            total_profit: Money::zero(),
            items: vec![],
        };
        let sales = vec![sale];
        let utc = FixedOffset::east_opt(0).unwrap();
        let ist = FixedOffset::east_opt(19_800).unwrap();

        let first = DateRange::today(day(1));
        let second = DateRange::today(day(2));
        assert_eq!(sales_in_range(&sales, &first, utc).len(), 1);
        assert!(sales_in_range(&sales, &first, ist).is_empty());
        assert_eq!(sales_in_range(&sales, &second, ist).len(), 1);
    }
}
