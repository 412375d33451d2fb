use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::store::punch_log::PunchLog;

/// Scheduled punch window for a working day.
pub fn nominal_punch_in() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 30, 0).expect("valid time")
}

pub fn nominal_punch_out() -> NaiveTime {
    NaiveTime::from_hms_opt(18, 30, 0).expect("valid time")
}

/// Where the engine gets punch data for a working day. `None` means the
/// employee never showed up. The derivation engine owns everything else
/// (lateness, half-day, hour fields).
pub trait AttendanceSource {
    fn punches(
        &self,
        employee_id: &str,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Option<(NaiveTime, NaiveTime)>;
}

/// Deterministic demo generator: the outcome for a given (seed, employee,
/// date) never changes between rebuilds, so derived ledgers are stable and
/// testable. Saturdays are present with p=0.7; Monday-Friday absent with
/// p=0.05. Days strictly before today may get a 0-359 minute late arrival.
pub struct SeededDemoSource {
    seed: u64,
}

impl SeededDemoSource {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn rng_for(&self, employee_id: &str, date: NaiveDate) -> StdRng {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        employee_id.hash(&mut hasher);
        date.hash(&mut hasher);
        StdRng::seed_from_u64(hasher.finish())
    }
}

impl AttendanceSource for SeededDemoSource {
    fn punches(
        &self,
        employee_id: &str,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Option<(NaiveTime, NaiveTime)> {
        let mut rng = self.rng_for(employee_id, date);
        let present = match date.weekday() {
            Weekday::Sun => false,
            Weekday::Sat => rng.gen_bool(0.7),
            _ => !rng.gen_bool(0.05),
        };
        if !present {
            return None;
        }

        let punch_in = if date < today {
            let lateness_minutes = rng.gen_range(0..360);
            nominal_punch_in() + chrono::Duration::minutes(lateness_minutes)
        } else {
            nominal_punch_in()
        };
        Some((punch_in, nominal_punch_out()))
    }
}

/// Real event-backed source: a recorded punch-in makes the day Present; a
/// missing punch-out falls back to the nominal end of day.
pub struct PunchLogSource<'a> {
    log: &'a PunchLog,
}

impl<'a> PunchLogSource<'a> {
    pub fn new(log: &'a PunchLog) -> Self {
        Self { log }
    }
}

impl AttendanceSource for PunchLogSource<'_> {
    fn punches(
        &self,
        employee_id: &str,
        date: NaiveDate,
        _today: NaiveDate,
    ) -> Option<(NaiveTime, NaiveTime)> {
        self.log
            .get(employee_id, date)
            .map(|entry| (entry.punch_in, entry.punch_out.unwrap_or_else(nominal_punch_out)))
    }
}
