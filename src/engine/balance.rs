//! Month-by-month leave balance: one day of entitlement accrues per month
//! and unused days carry over; usage beyond the running entitlement is
//! counted as paid overflow. Recomputed from scratch on every evaluation.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MONTHLY_ENTITLEMENT: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LeaveBalance {
    /// Unused entitlement carried into the current month.
    #[schema(example = 4)]
    pub leave_remaining: u32,
    /// Cumulative approved leave days taken beyond the entitlement.
    #[schema(example = 0)]
    pub paid_leaves: u32,
}

/// Folds January through the current month of `today`'s year. Duplicate
/// dates from overlapping approved requests are collapsed before counting.
pub fn leave_balance(approved_dates: &[NaiveDate], today: NaiveDate) -> LeaveBalance {
    let distinct: BTreeSet<NaiveDate> = approved_dates.iter().copied().collect();

    let mut carry_over = 0u32;
    let mut paid_leaves = 0u32;
    for month in 1..=today.month() {
        let available = MONTHLY_ENTITLEMENT + carry_over;
        let used = distinct
            .iter()
            .filter(|d| d.year() == today.year() && d.month() == month)
            .count() as u32;

        if used > available {
            paid_leaves += used - available;
            carry_over = 0;
        } else {
            carry_over = available - used;
        }
    }

    LeaveBalance {
        leave_remaining: carry_over,
        paid_leaves,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn unused_entitlement_compounds_month_over_month() {
        let balance = leave_balance(&[], date("2026-06-30"));
        assert_eq!(
            balance,
            LeaveBalance {
                leave_remaining: 6,
                paid_leaves: 0
            }
        );
    }

    #[test]
    fn usage_within_the_running_entitlement_reduces_carry_over() {
        // June leaves 6 days carried; July accrues 1 more (available = 7),
        // 3 days used leaves 4.
        let used: Vec<NaiveDate> = ["2026-07-06", "2026-07-07", "2026-07-08"]
            .iter()
            .map(|s| date(s))
            .collect();
        let balance = leave_balance(&used, date("2026-07-31"));
        assert_eq!(
            balance,
            LeaveBalance {
                leave_remaining: 4,
                paid_leaves: 0
            }
        );
    }

    #[test]
    fn overflow_becomes_paid_leave_and_resets_carry_over() {
        // 10 days in July against available = 7.
        let used: Vec<NaiveDate> = date("2026-07-06")
            .iter_days()
            .take(10)
            .collect();
        let balance = leave_balance(&used, date("2026-07-31"));
        assert_eq!(
            balance,
            LeaveBalance {
                leave_remaining: 0,
                paid_leaves: 3
            }
        );
    }

    #[test]
    fn overlapping_requests_do_not_double_count() {
        let used = vec![date("2026-02-10"), date("2026-02-10"), date("2026-02-11")];
        let balance = leave_balance(&used, date("2026-02-28"));
        // Feb: available = 2 (1 + Jan carry), 2 distinct days used.
        assert_eq!(
            balance,
            LeaveBalance {
                leave_remaining: 0,
                paid_leaves: 0
            }
        );
    }

    #[test]
    fn other_years_are_ignored() {
        let used = vec![date("2025-03-10"), date("2025-03-11")];
        let balance = leave_balance(&used, date("2026-03-31"));
        assert_eq!(
            balance,
            LeaveBalance {
                leave_remaining: 3,
                paid_leaves: 0
            }
        );
    }
}
