//! The attendance derivation engine: materializes one record per active
//! employee per calendar day in a rolling three-month window from the
//! roster, holiday calendar, and leave ledger.
//!
//! The ledger is a pure derivation. It is rebuilt whenever any input's
//! revision changes (or the calendar day rolls over), and manual overrides
//! do not survive a rebuild unless re-applied.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::Rejection;
use crate::model::attendance::{AttendanceRecord, AttendanceRow, DayDetail, DayStatus};
use crate::store::holiday_calendar::HolidayCalendar;
use crate::store::leave_ledger::LeaveLedger;
use crate::store::roster::Roster;

use super::sandwich::{self, SandwichDetail};
use super::source::{AttendanceSource, nominal_punch_in};

pub const WORK_HOURS: f64 = 9.0;
pub const WORKED_HOURS_FULL: f64 = 8.5;
pub const WORKED_HOURS_HALF: f64 = 4.5;
pub const IDLE_TIME: f64 = 0.5;
/// Arriving this many minutes late (or more) marks the day half-day.
pub const HALF_DAY_LATENESS_MINUTES: i64 = 300;

/// Derivation covers the current month plus this many preceding months.
const WINDOW_PRECEDING_MONTHS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InputStamp {
    roster: u64,
    holidays: u64,
    leaves: u64,
    source: u64,
    today: NaiveDate,
}

/// Per-employee per-month aggregate over the derived ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlySummary {
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    #[schema(example = "2026-03")]
    pub month: String,
    pub present_days: u32,
    pub absent_days: u32,
    pub leave_days: u32,
    pub holiday_days: u32,
    pub half_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeSandwichSummary {
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    #[schema(example = "John Doe")]
    pub name: String,
    pub count: usize,
    pub details: Vec<SandwichDetail>,
}

/// Caller-supplied payload for a manual upsert.
#[derive(Debug, Clone)]
pub struct ManualAttendance {
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: DayStatus,
    pub punch_in: Option<NaiveTime>,
    pub punch_out: Option<NaiveTime>,
    pub half_day: Option<bool>,
}

/// Partial edit of an existing record, keyed by composite id.
#[derive(Debug, Default, Clone)]
pub struct ManualUpdate {
    pub status: Option<DayStatus>,
    pub punch_in: Option<NaiveTime>,
    pub punch_out: Option<NaiveTime>,
    pub half_day: Option<bool>,
}

pub struct AttendanceEngine {
    records: BTreeMap<(String, NaiveDate), AttendanceRecord>,
    stamp: Option<InputStamp>,
    /// Bumped on every rebuild and manual mutation; part of the summary
    /// cache key so stale aggregates can never be served.
    generation: u64,
    summary_cache: Cache<String, MonthlySummary>,
}

impl Default for AttendanceEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AttendanceEngine {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            stamp: None,
            generation: 0,
            summary_cache: Cache::builder().max_capacity(4_096).build(),
        }
    }

    /// First day of the derivation window for `today`.
    pub fn window_start(today: NaiveDate) -> NaiveDate {
        let mut year = today.year();
        let mut month = today.month() as i32 - WINDOW_PRECEDING_MONTHS as i32;
        if month < 1 {
            month += 12;
            year -= 1;
        }
        NaiveDate::from_ymd_opt(year, month as u32, 1).expect("valid first of month")
    }

    /// Rebuilds the ledger if any input changed since the last derivation.
    /// Cheap when nothing changed: a revision-stamp comparison only.
    pub fn ensure_fresh(
        &mut self,
        roster: &Roster,
        calendar: &HolidayCalendar,
        leaves: &LeaveLedger,
        source: &dyn AttendanceSource,
        source_revision: u64,
        today: NaiveDate,
    ) {
        let stamp = InputStamp {
            roster: roster.revision(),
            holidays: calendar.revision(),
            leaves: leaves.revision(),
            source: source_revision,
            today,
        };
        if self.stamp == Some(stamp) {
            return;
        }
        self.rebuild(roster, calendar, leaves, source, today);
        self.stamp = Some(stamp);
    }

    fn rebuild(
        &mut self,
        roster: &Roster,
        calendar: &HolidayCalendar,
        leaves: &LeaveLedger,
        source: &dyn AttendanceSource,
        today: NaiveDate,
    ) {
        self.records.clear();
        let start = Self::window_start(today);

        for employee in roster.active() {
            let approved: BTreeSet<NaiveDate> =
                leaves.approved_leave_dates(&employee.id).into_iter().collect();
            // Rolling count of earlier late arrivals in the window.
            let mut late_count: u32 = 0;

            // The window never extends past today, so future records are
            // never materialized in the first place.
            for date in start.iter_days().take_while(|d| *d <= today) {
                let detail = if date.weekday() == Weekday::Sun || calendar.is_holiday(date) {
                    DayDetail::Holiday
                } else if approved.contains(&date) {
                    DayDetail::Leave
                } else {
                    match source.punches(&employee.id, date, today) {
                        Some((punch_in, punch_out)) => {
                            let lateness =
                                (punch_in - nominal_punch_in()).num_minutes().max(0);
                            let half_day = lateness >= HALF_DAY_LATENESS_MINUTES
                                || (late_count > 0 && late_count % 3 == 0);
                            if lateness > 0 {
                                late_count += 1;
                            }
                            DayDetail::Present {
                                punch_in,
                                punch_out,
                                work_hours: WORK_HOURS,
                                worked_hours: if half_day {
                                    WORKED_HOURS_HALF
                                } else {
                                    WORKED_HOURS_FULL
                                },
                                idle_time: IDLE_TIME,
                                half_day,
                            }
                        }
                        None => DayDetail::Absent,
                    }
                };

                self.records.insert(
                    (employee.id.clone(), date),
                    AttendanceRecord {
                        employee_id: employee.id.clone(),
                        date,
                        detail,
                    },
                );
            }
        }

        self.generation += 1;
        self.summary_cache.invalidate_all();
        tracing::debug!(
            records = self.records.len(),
            window_start = %start,
            %today,
            "attendance ledger rebuilt"
        );
    }

    pub fn records(&self) -> impl Iterator<Item = &AttendanceRecord> {
        self.records.values()
    }

    pub fn get(&self, id: &str) -> Option<&AttendanceRecord> {
        let (employee_id, date) = parse_record_id(id)?;
        self.records.get(&(employee_id, date))
    }

    /// Ledger joined with roster names, optionally filtered by employee
    /// and/or month.
    pub fn rows(
        &self,
        roster: &Roster,
        employee_id: Option<&str>,
        month: Option<(i32, u32)>,
    ) -> Vec<AttendanceRow> {
        self.records
            .values()
            .filter(|r| employee_id.is_none_or(|e| r.employee_id == e))
            .filter(|r| {
                month.is_none_or(|(y, m)| r.date.year() == y && r.date.month() == m)
            })
            .map(|r| {
                AttendanceRow::from_record(r, roster.name_of(&r.employee_id).unwrap_or("Unknown"))
            })
            .collect()
    }

    /// Manual upsert keyed on (employee, date). The Sunday/holiday priority
    /// is re-applied: a Leave request for such a date is a structured
    /// failure, any other status is coerced to Holiday with blanked hours.
    pub fn upsert_manual(
        &mut self,
        input: ManualAttendance,
        calendar: &HolidayCalendar,
        today: NaiveDate,
    ) -> Result<AttendanceRecord, Rejection> {
        if input.date > today {
            return Err(Rejection::FutureAttendance(input.date));
        }
        let detail = classify_manual(
            input.date,
            input.status,
            input.punch_in,
            input.punch_out,
            input.half_day,
            calendar,
        )?;
        let record = AttendanceRecord {
            employee_id: input.employee_id.clone(),
            date: input.date,
            detail,
        };
        self.records
            .insert((input.employee_id, input.date), record.clone());
        self.generation += 1;
        self.summary_cache.invalidate_all();
        Ok(record)
    }

    pub fn edit_manual(
        &mut self,
        id: &str,
        update: ManualUpdate,
        calendar: &HolidayCalendar,
    ) -> Result<AttendanceRecord, Rejection> {
        let existing = self
            .get(id)
            .ok_or(Rejection::NotFound("Attendance record"))?
            .clone();

        let (punch_in, punch_out, half_day) = match existing.detail {
            DayDetail::Present {
                punch_in,
                punch_out,
                half_day,
                ..
            } => (Some(punch_in), Some(punch_out), Some(half_day)),
            _ => (None, None, None),
        };
        let detail = classify_manual(
            existing.date,
            update.status.unwrap_or(existing.detail.status()),
            update.punch_in.or(punch_in),
            update.punch_out.or(punch_out),
            update.half_day.or(half_day),
            calendar,
        )?;

        let record = AttendanceRecord {
            employee_id: existing.employee_id.clone(),
            date: existing.date,
            detail,
        };
        self.records
            .insert((existing.employee_id, existing.date), record.clone());
        self.generation += 1;
        self.summary_cache.invalidate_all();
        Ok(record)
    }

    pub fn delete(&mut self, id: &str) -> Result<AttendanceRecord, Rejection> {
        let (employee_id, date) =
            parse_record_id(id).ok_or(Rejection::NotFound("Attendance record"))?;
        let removed = self
            .records
            .remove(&(employee_id, date))
            .ok_or(Rejection::NotFound("Attendance record"))?;
        self.generation += 1;
        self.summary_cache.invalidate_all();
        Ok(removed)
    }

    pub fn monthly_summary(&self, employee_id: &str, year: i32, month: u32) -> MonthlySummary {
        let key = format!("{}:{:04}-{:02}:{}", employee_id, year, month, self.generation);
        if let Some(hit) = self.summary_cache.get(&key) {
            return hit;
        }

        let mut summary = MonthlySummary {
            employee_id: employee_id.to_string(),
            month: format!("{:04}-{:02}", year, month),
            present_days: 0,
            absent_days: 0,
            leave_days: 0,
            holiday_days: 0,
            half_days: 0,
        };
        for record in self.records.values().filter(|r| {
            r.employee_id == employee_id && r.date.year() == year && r.date.month() == month
        }) {
            match record.detail.status() {
                DayStatus::Present => summary.present_days += 1,
                DayStatus::Absent => summary.absent_days += 1,
                DayStatus::Leave => summary.leave_days += 1,
                DayStatus::Holiday => summary.holiday_days += 1,
            }
            if record.detail.half_day() {
                summary.half_days += 1;
            }
        }
        self.summary_cache.insert(key, summary.clone());
        summary
    }

    pub fn summaries_for_month(
        &self,
        roster: &Roster,
        year: i32,
        month: u32,
    ) -> Vec<MonthlySummary> {
        roster
            .active()
            .map(|e| self.monthly_summary(&e.id, year, month))
            .collect()
    }
}

fn classify_manual(
    date: NaiveDate,
    status: DayStatus,
    punch_in: Option<NaiveTime>,
    punch_out: Option<NaiveTime>,
    half_day: Option<bool>,
    calendar: &HolidayCalendar,
) -> Result<DayDetail, Rejection> {
    if date.weekday() == Weekday::Sun || calendar.is_holiday(date) {
        if status == DayStatus::Leave {
            return Err(Rejection::LeaveOnHoliday(date));
        }
        return Ok(DayDetail::Holiday);
    }
    let detail = match status {
        DayStatus::Present => {
            let half_day = half_day.unwrap_or(false);
            DayDetail::Present {
                punch_in: punch_in.unwrap_or_else(default_punch_in),
                punch_out: punch_out.unwrap_or_else(default_punch_out),
                work_hours: WORK_HOURS,
                worked_hours: if half_day {
                    WORKED_HOURS_HALF
                } else {
                    WORKED_HOURS_FULL
                },
                idle_time: IDLE_TIME,
                half_day,
            }
        }
        DayStatus::Absent => DayDetail::Absent,
        DayStatus::Leave => DayDetail::Leave,
        DayStatus::Holiday => DayDetail::Holiday,
    };
    Ok(detail)
}

/// Defaults for manually entered Present records.
fn default_punch_in() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).expect("valid time")
}

fn default_punch_out() -> NaiveTime {
    NaiveTime::from_hms_opt(18, 0, 0).expect("valid time")
}

fn parse_record_id(id: &str) -> Option<(String, NaiveDate)> {
    let (employee_id, date) = id.rsplit_once('_')?;
    Some((employee_id.to_string(), date.parse().ok()?))
}

/// Sandwich-leave details for one employee, optionally restricted to
/// holidays within a single month.
pub fn employee_sandwich_details(
    calendar: &HolidayCalendar,
    leaves: &LeaveLedger,
    employee_id: &str,
    month: Option<(i32, u32)>,
) -> Vec<SandwichDetail> {
    let holidays: BTreeSet<NaiveDate> = calendar.holiday_dates().into_iter().collect();
    let leave_dates: BTreeSet<NaiveDate> =
        leaves.approved_leave_dates(employee_id).into_iter().collect();
    sandwich::sandwich_details(&holidays, &leave_dates)
        .into_iter()
        .filter(|d| {
            month.is_none_or(|(y, m)| d.holiday.year() == y && d.holiday.month() == m)
        })
        .collect()
}

/// Maps every active roster employee to their sandwich-leave details.
pub fn sandwich_summary(
    roster: &Roster,
    calendar: &HolidayCalendar,
    leaves: &LeaveLedger,
    month: Option<(i32, u32)>,
) -> Vec<EmployeeSandwichSummary> {
    roster
        .active()
        .map(|employee| {
            let details = employee_sandwich_details(calendar, leaves, &employee.id, month);
            EmployeeSandwichSummary {
                employee_id: employee.id.clone(),
                name: employee.name.clone(),
                count: details.len(),
                details,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::source::{PunchLogSource, SeededDemoSource, nominal_punch_out};
    use crate::model::employee::Employee;
    use crate::store::punch_log::PunchLog;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        s.parse().unwrap()
    }

    fn one_person_roster() -> Roster {
        let mut roster = Roster::new();
        roster.add(Employee {
            id: "EMP-001".to_string(),
            name: "John Doe".to_string(),
            department: "Engineering".to_string(),
            is_active: true,
        });
        roster
    }

    fn fresh_engine(
        roster: &Roster,
        calendar: &HolidayCalendar,
        leaves: &LeaveLedger,
        today: NaiveDate,
    ) -> AttendanceEngine {
        let mut engine = AttendanceEngine::new();
        let source = SeededDemoSource::new(42);
        engine.ensure_fresh(roster, calendar, leaves, &source, 0, today);
        engine
    }

    #[test]
    fn window_start_handles_year_boundary() {
        assert_eq!(
            AttendanceEngine::window_start(date("2026-03-15")),
            date("2026-01-01")
        );
        assert_eq!(
            AttendanceEngine::window_start(date("2026-01-20")),
            date("2025-11-01")
        );
        assert_eq!(
            AttendanceEngine::window_start(date("2026-02-05")),
            date("2025-12-01")
        );
    }

    #[test]
    fn holiday_priority_beats_approved_leave() {
        let today = date("2026-03-20");
        let roster = one_person_roster();
        let mut calendar = HolidayCalendar::new();
        calendar
            .add_holiday(date("2026-03-17"), "Festival", "", date("2026-01-01"))
            .unwrap();

        let mut leaves = LeaveLedger::new();
        // Approved leave spanning a Sunday (2026-03-15) and the holiday.
        let r = leaves
            .apply_leave(
                "EMP-001",
                date("2026-03-14"),
                date("2026-03-18"),
                "trip",
                "casual",
                None,
                date("2026-03-01"),
            )
            .unwrap();
        leaves.approve(&r.id, "admin", date("2026-03-02")).unwrap();

        let engine = fresh_engine(&roster, &calendar, &leaves, today);

        let status_on = |d: &str| {
            engine
                .get(&format!("EMP-001_{}", d))
                .unwrap()
                .detail
                .status()
        };
        assert_eq!(status_on("2026-03-15"), DayStatus::Holiday); // Sunday
        assert_eq!(status_on("2026-03-17"), DayStatus::Holiday); // public holiday
        assert_eq!(status_on("2026-03-14"), DayStatus::Leave);
        assert_eq!(status_on("2026-03-16"), DayStatus::Leave);
        assert_eq!(status_on("2026-03-18"), DayStatus::Leave);
    }

    #[test]
    fn ledger_never_contains_future_dates() {
        let today = date("2026-03-20");
        let roster = one_person_roster();
        let calendar = HolidayCalendar::new();
        let leaves = LeaveLedger::new();
        let engine = fresh_engine(&roster, &calendar, &leaves, today);

        assert!(engine.records().count() > 0);
        assert!(engine.records().all(|r| r.date <= today));
        assert!(engine.records().any(|r| r.date == today));
    }

    #[test]
    fn non_present_rows_have_zeroed_hours() {
        let today = date("2026-03-20");
        let roster = one_person_roster();
        let calendar = HolidayCalendar::with_sundays(2026);
        let leaves = LeaveLedger::new();
        let engine = fresh_engine(&roster, &calendar, &leaves, today);

        for row in engine.rows(&roster, None, None) {
            if row.status != DayStatus::Present {
                assert_eq!(row.punch_in, None);
                assert_eq!(row.punch_out, None);
                assert_eq!(row.work_hours, 0.0);
                assert_eq!(row.worked_hours, 0.0);
                assert_eq!(row.idle_time, 0.0);
                assert!(!row.half_day);
            }
        }
    }

    #[test]
    fn manual_upsert_is_idempotent() {
        let today = date("2026-03-20");
        let roster = one_person_roster();
        let calendar = HolidayCalendar::new();
        let leaves = LeaveLedger::new();
        let mut engine = fresh_engine(&roster, &calendar, &leaves, today);

        let input = ManualAttendance {
            employee_id: "EMP-001".to_string(),
            date: date("2026-03-19"),
            status: DayStatus::Present,
            punch_in: None,
            punch_out: None,
            half_day: None,
        };
        let first = engine.upsert_manual(input.clone(), &calendar, today).unwrap();
        let second = engine.upsert_manual(input, &calendar, today).unwrap();
        assert_eq!(first, second);

        let matching: Vec<_> = engine
            .records()
            .filter(|r| r.employee_id == "EMP-001" && r.date == date("2026-03-19"))
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(
            matching[0].detail,
            DayDetail::Present {
                punch_in: time("09:00:00"),
                punch_out: time("18:00:00"),
                work_hours: 9.0,
                worked_hours: 8.5,
                idle_time: 0.5,
                half_day: false,
            }
        );
    }

    #[test]
    fn manual_leave_on_sunday_is_rejected_and_others_coerced() {
        let today = date("2026-03-20");
        let roster = one_person_roster();
        let calendar = HolidayCalendar::new();
        let leaves = LeaveLedger::new();
        let mut engine = fresh_engine(&roster, &calendar, &leaves, today);

        let sunday = date("2026-03-15");
        let leave_on_sunday = ManualAttendance {
            employee_id: "EMP-001".to_string(),
            date: sunday,
            status: DayStatus::Leave,
            punch_in: None,
            punch_out: None,
            half_day: None,
        };
        assert_eq!(
            engine.upsert_manual(leave_on_sunday, &calendar, today),
            Err(Rejection::LeaveOnHoliday(sunday))
        );

        let present_on_sunday = ManualAttendance {
            employee_id: "EMP-001".to_string(),
            date: sunday,
            status: DayStatus::Present,
            punch_in: Some(time("09:00:00")),
            punch_out: Some(time("18:00:00")),
            half_day: None,
        };
        let record = engine.upsert_manual(present_on_sunday, &calendar, today).unwrap();
        assert_eq!(record.detail, DayDetail::Holiday);
    }

    #[test]
    fn manual_add_of_future_date_is_rejected() {
        let today = date("2026-03-20");
        let roster = one_person_roster();
        let calendar = HolidayCalendar::new();
        let leaves = LeaveLedger::new();
        let mut engine = fresh_engine(&roster, &calendar, &leaves, today);

        let input = ManualAttendance {
            employee_id: "EMP-001".to_string(),
            date: date("2026-03-21"),
            status: DayStatus::Absent,
            punch_in: None,
            punch_out: None,
            half_day: None,
        };
        assert_eq!(
            engine.upsert_manual(input, &calendar, today),
            Err(Rejection::FutureAttendance(date("2026-03-21")))
        );
    }

    #[test]
    fn edit_and_delete_by_composite_id() {
        let today = date("2026-03-20");
        let roster = one_person_roster();
        let calendar = HolidayCalendar::new();
        let leaves = LeaveLedger::new();
        let mut engine = fresh_engine(&roster, &calendar, &leaves, today);

        let id = "EMP-001_2026-03-19";
        let update = ManualUpdate {
            status: Some(DayStatus::Absent),
            ..Default::default()
        };
        let edited = engine.edit_manual(id, update, &calendar).unwrap();
        assert_eq!(edited.detail, DayDetail::Absent);

        engine.delete(id).unwrap();
        assert!(engine.get(id).is_none());
        assert_eq!(engine.delete(id), Err(Rejection::NotFound("Attendance record")));
    }

    #[test]
    fn rebuild_discards_unapplied_overrides_only_when_inputs_change() {
        let today = date("2026-03-20");
        let roster = one_person_roster();
        let calendar = HolidayCalendar::new();
        let mut leaves = LeaveLedger::new();
        let source = SeededDemoSource::new(42);

        let mut engine = AttendanceEngine::new();
        engine.ensure_fresh(&roster, &calendar, &leaves, &source, 0, today);

        // A weekday can only derive Present or Absent, so a Holiday
        // override is unambiguously manual.
        let id = "EMP-001_2026-03-19";
        let update = ManualUpdate {
            status: Some(DayStatus::Holiday),
            ..Default::default()
        };
        engine.edit_manual(id, update, &calendar).unwrap();

        // Nothing changed upstream: the override survives.
        engine.ensure_fresh(&roster, &calendar, &leaves, &source, 0, today);
        assert_eq!(engine.get(id).unwrap().detail, DayDetail::Holiday);

        // A ledger mutation forces a rebuild and the override is gone
        // unless re-applied.
        leaves
            .apply_leave(
                "EMP-001",
                date("2026-04-01"),
                date("2026-04-01"),
                "r",
                "casual",
                None,
                today,
            )
            .unwrap();
        engine.ensure_fresh(&roster, &calendar, &leaves, &source, 0, today);
        assert_ne!(engine.get(id).unwrap().detail.status(), DayStatus::Holiday);
    }

    #[test]
    fn heavy_lateness_marks_the_day_half() {
        let today = date("2026-03-20");
        let roster = one_person_roster();
        let calendar = HolidayCalendar::new();
        let leaves = LeaveLedger::new();

        let mut log = PunchLog::new();
        // 301 minutes after the 09:30 nominal start.
        log.punch_in("EMP-001", date("2026-03-19"), time("14:31:00")).unwrap();

        let mut engine = AttendanceEngine::new();
        let source = PunchLogSource::new(&log);
        engine.ensure_fresh(&roster, &calendar, &leaves, &source, log.revision(), today);

        let record = engine.get("EMP-001_2026-03-19").unwrap();
        assert_eq!(
            record.detail,
            DayDetail::Present {
                punch_in: time("14:31:00"),
                punch_out: nominal_punch_out(),
                work_hours: 9.0,
                worked_hours: 4.5,
                idle_time: 0.5,
                half_day: true,
            }
        );
    }

    #[test]
    fn every_third_late_arrival_triggers_a_half_day() {
        let today = date("2026-03-20");
        let roster = one_person_roster();
        let calendar = HolidayCalendar::new();
        let leaves = LeaveLedger::new();

        // Three mildly late weekdays, then an on-time day. The on-time day
        // is evaluated with a rolling late count of 3 and goes half-day.
        let mut log = PunchLog::new();
        for d in ["2026-03-16", "2026-03-17", "2026-03-18"] {
            log.punch_in("EMP-001", date(d), time("09:40:00")).unwrap();
        }
        log.punch_in("EMP-001", date("2026-03-19"), time("09:30:00")).unwrap();

        let mut engine = AttendanceEngine::new();
        let source = PunchLogSource::new(&log);
        engine.ensure_fresh(&roster, &calendar, &leaves, &source, log.revision(), today);

        for d in ["2026-03-16", "2026-03-17", "2026-03-18"] {
            assert!(
                !engine.get(&format!("EMP-001_{}", d)).unwrap().detail.half_day(),
                "day {} should be a full day",
                d
            );
        }
        assert!(
            engine
                .get("EMP-001_2026-03-19")
                .unwrap()
                .detail
                .half_day()
        );
    }

    #[test]
    fn monthly_summary_counts_match_the_ledger() {
        let today = date("2026-03-20");
        let roster = one_person_roster();
        let calendar = HolidayCalendar::with_sundays(2026);
        let mut leaves = LeaveLedger::new();
        let r = leaves
            .apply_leave(
                "EMP-001",
                date("2026-03-10"),
                date("2026-03-11"),
                "r",
                "casual",
                None,
                date("2026-03-01"),
            )
            .unwrap();
        leaves.approve(&r.id, "admin", date("2026-03-02")).unwrap();

        let engine = fresh_engine(&roster, &calendar, &leaves, today);
        let summary = engine.monthly_summary("EMP-001", 2026, 3);

        let rows = engine.rows(&roster, Some("EMP-001"), Some((2026, 3)));
        let count = |s: DayStatus| rows.iter().filter(|r| r.status == s).count() as u32;
        assert_eq!(summary.present_days, count(DayStatus::Present));
        assert_eq!(summary.absent_days, count(DayStatus::Absent));
        assert_eq!(summary.leave_days, count(DayStatus::Leave));
        assert_eq!(summary.holiday_days, count(DayStatus::Holiday));
        assert_eq!(summary.leave_days, 2);
        assert_eq!(
            summary.present_days
                + summary.absent_days
                + summary.leave_days
                + summary.holiday_days,
            20
        );

        // Cached result is identical.
        assert_eq!(engine.monthly_summary("EMP-001", 2026, 3), summary);
    }

    #[test]
    fn sandwich_summary_maps_every_active_employee() {
        let mut roster = one_person_roster();
        roster.add(Employee {
            id: "EMP-002".to_string(),
            name: "Jane Smith".to_string(),
            department: "Engineering".to_string(),
            is_active: true,
        });

        let mut calendar = HolidayCalendar::new();
        calendar
            .add_holiday(date("2026-03-17"), "Festival", "", date("2026-01-01"))
            .unwrap();

        let mut leaves = LeaveLedger::new();
        let r = leaves
            .apply_leave(
                "EMP-001",
                date("2026-03-16"),
                date("2026-03-18"),
                "r",
                "casual",
                None,
                date("2026-03-01"),
            )
            .unwrap();
        leaves.approve(&r.id, "admin", date("2026-03-02")).unwrap();

        let summary = sandwich_summary(&roster, &calendar, &leaves, None);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].employee_id, "EMP-001");
        assert_eq!(summary[0].count, 1);
        assert_eq!(summary[0].details[0].holiday, date("2026-03-17"));
        assert_eq!(summary[1].employee_id, "EMP-002");
        assert_eq!(summary[1].count, 0);

        // Month filter excludes holidays outside the requested month.
        let filtered = sandwich_summary(&roster, &calendar, &leaves, Some((2026, 4)));
        assert_eq!(filtered[0].count, 0);
    }
}
