pub mod holiday_calendar;
pub mod leave_ledger;
pub mod punch_log;
pub mod roster;
