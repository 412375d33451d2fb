use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{Datelike, NaiveDate};

use crate::config::{Config, SourceMode};
use crate::engine::derive::AttendanceEngine;
use crate::engine::source::{PunchLogSource, SeededDemoSource};
use crate::store::holiday_calendar::HolidayCalendar;
use crate::store::leave_ledger::LeaveLedger;
use crate::store::punch_log::PunchLog;
use crate::store::roster::Roster;

/// All mutable application state, constructed once in `main` and injected
/// into handlers. Each store is owned exclusively here; the derivation
/// engine only ever reads the others.
///
/// Lock order: roster, calendar, leaves, punches, engine.
pub struct AppState {
    pub roster: RwLock<Roster>,
    pub calendar: RwLock<HolidayCalendar>,
    pub leaves: RwLock<LeaveLedger>,
    pub punches: RwLock<PunchLog>,
    pub engine: RwLock<AttendanceEngine>,
}

impl AppState {
    pub fn bootstrap(today: NaiveDate) -> Self {
        Self {
            roster: RwLock::new(Roster::seeded()),
            calendar: RwLock::new(HolidayCalendar::with_sundays(today.year())),
            leaves: RwLock::new(LeaveLedger::new()),
            punches: RwLock::new(PunchLog::new()),
            engine: RwLock::new(AttendanceEngine::new()),
        }
    }

    /// Re-derives the attendance ledger if any store changed. Cheap when
    /// nothing did; call before reading the engine.
    pub fn refresh(&self, config: &Config, today: NaiveDate) {
        let roster = self.read_roster();
        let calendar = self.read_calendar();
        let leaves = self.read_leaves();
        let punches = self.read_punches();
        let mut engine = self.write_engine();

        match config.attendance_source {
            SourceMode::Demo => {
                let source = SeededDemoSource::new(config.demo_seed);
                engine.ensure_fresh(&roster, &calendar, &leaves, &source, 0, today);
            }
            SourceMode::Punch => {
                let source = PunchLogSource::new(&punches);
                engine.ensure_fresh(
                    &roster,
                    &calendar,
                    &leaves,
                    &source,
                    punches.revision(),
                    today,
                );
            }
        }
    }

    // A poisoned lock means a handler panicked mid-write; there is no
    // sane recovery, so propagate the panic.
    pub fn read_roster(&self) -> RwLockReadGuard<'_, Roster> {
        self.roster.read().expect("roster lock poisoned")
    }

    pub fn write_roster(&self) -> RwLockWriteGuard<'_, Roster> {
        self.roster.write().expect("roster lock poisoned")
    }

    pub fn read_calendar(&self) -> RwLockReadGuard<'_, HolidayCalendar> {
        self.calendar.read().expect("calendar lock poisoned")
    }

    pub fn write_calendar(&self) -> RwLockWriteGuard<'_, HolidayCalendar> {
        self.calendar.write().expect("calendar lock poisoned")
    }

    pub fn read_leaves(&self) -> RwLockReadGuard<'_, LeaveLedger> {
        self.leaves.read().expect("leave ledger lock poisoned")
    }

    pub fn write_leaves(&self) -> RwLockWriteGuard<'_, LeaveLedger> {
        self.leaves.write().expect("leave ledger lock poisoned")
    }

    pub fn read_punches(&self) -> RwLockReadGuard<'_, PunchLog> {
        self.punches.read().expect("punch log lock poisoned")
    }

    pub fn write_punches(&self) -> RwLockWriteGuard<'_, PunchLog> {
        self.punches.write().expect("punch log lock poisoned")
    }

    pub fn read_engine(&self) -> RwLockReadGuard<'_, AttendanceEngine> {
        self.engine.read().expect("engine lock poisoned")
    }

    pub fn write_engine(&self) -> RwLockWriteGuard<'_, AttendanceEngine> {
        self.engine.write().expect("engine lock poisoned")
    }
}
