//! Sandwich-leave detection: an unworked holiday bridged by approved leave
//! on both immediately adjacent calendar days counts as an effective leave
//! day for reporting.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SandwichDetail {
    #[schema(example = "2025-08-13", format = "date", value_type = String)]
    pub holiday: NaiveDate,
    /// Approved leave day immediately before the holiday.
    #[schema(example = "2025-08-12", format = "date", value_type = String)]
    pub leave_before: NaiveDate,
    /// Approved leave day immediately after the holiday.
    #[schema(example = "2025-08-14", format = "date", value_type = String)]
    pub leave_after: NaiveDate,
}

/// Holiday dates bridged by leave on both sides, ascending. Only the single
/// day before and after the holiday matter, not the wider request range.
pub fn sandwich_dates(
    holidays: &BTreeSet<NaiveDate>,
    leave_dates: &BTreeSet<NaiveDate>,
) -> Vec<NaiveDate> {
    holidays
        .iter()
        .copied()
        .filter(|h| {
            leave_dates.contains(&(*h - Duration::days(1)))
                && leave_dates.contains(&(*h + Duration::days(1)))
        })
        .collect()
}

pub fn sandwich_count(holidays: &BTreeSet<NaiveDate>, leave_dates: &BTreeSet<NaiveDate>) -> usize {
    sandwich_dates(holidays, leave_dates).len()
}

pub fn sandwich_details(
    holidays: &BTreeSet<NaiveDate>,
    leave_dates: &BTreeSet<NaiveDate>,
) -> Vec<SandwichDetail> {
    sandwich_dates(holidays, leave_dates)
        .into_iter()
        .map(|holiday| SandwichDetail {
            holiday,
            leave_before: holiday - Duration::days(1),
            leave_after: holiday + Duration::days(1),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn set(dates: &[&str]) -> BTreeSet<NaiveDate> {
        dates.iter().map(|s| date(s)).collect()
    }

    #[test]
    fn holiday_bridged_on_both_sides_is_a_sandwich() {
        let holidays = set(&["2025-08-13"]);
        let leave = set(&["2025-08-12", "2025-08-14"]);
        assert_eq!(sandwich_dates(&holidays, &leave), vec![date("2025-08-13")]);
        assert_eq!(sandwich_count(&holidays, &leave), 1);
    }

    #[test]
    fn one_sided_leave_is_not_a_sandwich() {
        let holidays = set(&["2025-08-13"]);
        assert!(sandwich_dates(&holidays, &set(&["2025-08-12"])).is_empty());
        assert!(sandwich_dates(&holidays, &set(&["2025-08-14"])).is_empty());
        assert!(sandwich_dates(&holidays, &set(&[])).is_empty());
    }

    #[test]
    fn details_carry_the_bounding_dates() {
        let holidays = set(&["2025-08-13", "2025-12-25"]);
        let leave = set(&["2025-08-12", "2025-08-14", "2025-12-24", "2025-12-26"]);
        let details = sandwich_details(&holidays, &leave);
        assert_eq!(
            details,
            vec![
                SandwichDetail {
                    holiday: date("2025-08-13"),
                    leave_before: date("2025-08-12"),
                    leave_after: date("2025-08-14"),
                },
                SandwichDetail {
                    holiday: date("2025-12-25"),
                    leave_before: date("2025-12-24"),
                    leave_after: date("2025-12-26"),
                },
            ]
        );
    }

    #[test]
    fn adjacent_holidays_only_count_when_each_is_bridged() {
        // Two back-to-back holidays: neither has leave on both immediate
        // neighbours, so neither is a sandwich.
        let holidays = set(&["2025-08-13", "2025-08-14"]);
        let leave = set(&["2025-08-12", "2025-08-15"]);
        assert!(sandwich_dates(&holidays, &leave).is_empty());
    }
}
