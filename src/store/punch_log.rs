use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};

use crate::error::Rejection;

/// Raw punch events for one (employee, day).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PunchEntry {
    pub punch_in: NaiveTime,
    pub punch_out: Option<NaiveTime>,
}

/// Punch events recorded through the API, consumed by the punch-backed
/// attendance source.
#[derive(Debug, Default)]
pub struct PunchLog {
    entries: HashMap<(String, NaiveDate), PunchEntry>,
    revision: u64,
}

impl PunchLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// First punch-in of the day wins; a second attempt is rejected.
    pub fn punch_in(
        &mut self,
        employee_id: &str,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<PunchEntry, Rejection> {
        let key = (employee_id.to_string(), date);
        if self.entries.contains_key(&key) {
            return Err(Rejection::AlreadyPunchedIn(date));
        }
        let entry = PunchEntry {
            punch_in: time,
            punch_out: None,
        };
        self.entries.insert(key, entry);
        self.revision += 1;
        Ok(entry)
    }

    pub fn punch_out(
        &mut self,
        employee_id: &str,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<PunchEntry, Rejection> {
        let key = (employee_id.to_string(), date);
        match self.entries.get_mut(&key) {
            Some(entry) if entry.punch_out.is_none() => {
                entry.punch_out = Some(time);
                let updated = *entry;
                self.revision += 1;
                Ok(updated)
            }
            _ => Err(Rejection::NoOpenPunch(date)),
        }
    }

    pub fn get(&self, employee_id: &str, date: NaiveDate) -> Option<PunchEntry> {
        self.entries.get(&(employee_id.to_string(), date)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        s.parse().unwrap()
    }

    #[test]
    fn double_punch_in_is_rejected() {
        let mut log = PunchLog::new();
        log.punch_in("E", date("2026-03-02"), time("09:05:00")).unwrap();
        assert_eq!(
            log.punch_in("E", date("2026-03-02"), time("09:10:00")),
            Err(Rejection::AlreadyPunchedIn(date("2026-03-02")))
        );
        // Original punch-in survives.
        assert_eq!(
            log.get("E", date("2026-03-02")).unwrap().punch_in,
            time("09:05:00")
        );
    }

    #[test]
    fn punch_out_needs_an_open_punch_in() {
        let mut log = PunchLog::new();
        assert_eq!(
            log.punch_out("E", date("2026-03-02"), time("18:00:00")),
            Err(Rejection::NoOpenPunch(date("2026-03-02")))
        );

        log.punch_in("E", date("2026-03-02"), time("09:05:00")).unwrap();
        let entry = log.punch_out("E", date("2026-03-02"), time("18:00:00")).unwrap();
        assert_eq!(entry.punch_out, Some(time("18:00:00")));

        assert_eq!(
            log.punch_out("E", date("2026-03-02"), time("18:30:00")),
            Err(Rejection::NoOpenPunch(date("2026-03-02")))
        );
    }
}
