use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use uuid::Uuid;

use crate::error::Rejection;
use crate::model::holiday::Holiday;

/// Field updates accepted by [`HolidayCalendar::edit_holiday`]. `None`
/// leaves the field untouched.
#[derive(Debug, Default, Clone)]
pub struct HolidayUpdate {
    pub date: Option<NaiveDate>,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Named holidays for a year, keyed by date so the one-holiday-per-date
/// invariant holds by construction.
#[derive(Debug, Default)]
pub struct HolidayCalendar {
    by_date: BTreeMap<NaiveDate, Holiday>,
    revision: u64,
}

impl HolidayCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calendar pre-populated with every Sunday of `year` as a standing
    /// weekly holiday.
    pub fn with_sundays(year: i32) -> Self {
        let mut calendar = Self::new();
        let jan_first = NaiveDate::from_ymd_opt(year, 1, 1).expect("valid January 1st");
        for date in jan_first.iter_days().take_while(|d| d.year() == year) {
            if date.weekday() == Weekday::Sun {
                calendar.by_date.insert(
                    date,
                    Holiday {
                        id: Uuid::new_v4().to_string(),
                        date,
                        name: "Sunday".to_string(),
                        description: "Weekly holiday".to_string(),
                        is_sunday: true,
                    },
                );
            }
        }
        calendar
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn add_holiday(
        &mut self,
        date: NaiveDate,
        name: &str,
        description: &str,
        today: NaiveDate,
    ) -> Result<Holiday, Rejection> {
        if date <= today {
            return Err(Rejection::HolidayNotFuture);
        }
        if self.by_date.contains_key(&date) {
            return Err(Rejection::DuplicateHolidayDate(date));
        }
        let holiday = Holiday {
            id: Uuid::new_v4().to_string(),
            date,
            name: name.to_string(),
            description: description.to_string(),
            is_sunday: false,
        };
        self.by_date.insert(date, holiday.clone());
        self.revision += 1;
        Ok(holiday)
    }

    /// Past-dated holidays are immutable; a new date must also be in the
    /// future and must not collide with a different holiday.
    pub fn edit_holiday(
        &mut self,
        id: &str,
        update: HolidayUpdate,
        today: NaiveDate,
    ) -> Result<Holiday, Rejection> {
        let Some(current_date) = self.date_of(id) else {
            return Err(Rejection::NotFound("Holiday"));
        };
        if current_date <= today {
            return Err(Rejection::HolidayNotFuture);
        }
        let new_date = update.date.unwrap_or(current_date);
        if new_date <= today {
            return Err(Rejection::HolidayNotFuture);
        }
        if new_date != current_date && self.by_date.contains_key(&new_date) {
            return Err(Rejection::DuplicateHolidayDate(new_date));
        }

        let mut holiday = self
            .by_date
            .remove(&current_date)
            .expect("holiday present at its own date");
        holiday.date = new_date;
        if let Some(name) = update.name {
            holiday.name = name;
        }
        if let Some(description) = update.description {
            holiday.description = description;
        }
        self.by_date.insert(new_date, holiday.clone());
        self.revision += 1;
        Ok(holiday)
    }

    pub fn delete_holiday(&mut self, id: &str, today: NaiveDate) -> Result<Holiday, Rejection> {
        let Some(date) = self.date_of(id) else {
            return Err(Rejection::NotFound("Holiday"));
        };
        if date <= today {
            return Err(Rejection::HolidayNotFuture);
        }
        let holiday = self
            .by_date
            .remove(&date)
            .expect("holiday present at its own date");
        self.revision += 1;
        Ok(holiday)
    }

    pub fn all(&self) -> impl Iterator<Item = &Holiday> {
        self.by_date.values()
    }

    pub fn holiday_dates(&self) -> Vec<NaiveDate> {
        self.by_date.keys().copied().collect()
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.by_date.contains_key(&date)
    }

    pub fn holiday_by_date(&self, date: NaiveDate) -> Option<&Holiday> {
        self.by_date.get(&date)
    }

    pub fn holiday_by_id(&self, id: &str) -> Option<&Holiday> {
        self.by_date.values().find(|h| h.id == id)
    }

    pub fn holidays_for_month(&self, year: i32, month: u32) -> Vec<&Holiday> {
        self.by_date
            .values()
            .filter(|h| h.date.year() == year && h.date.month() == month)
            .collect()
    }

    pub fn holidays_for_year(&self, year: i32) -> Vec<&Holiday> {
        self.by_date
            .values()
            .filter(|h| h.date.year() == year)
            .collect()
    }

    /// Holidays falling within the next 30 days, inclusive of today.
    pub fn upcoming_holidays(&self, today: NaiveDate) -> Vec<&Holiday> {
        let horizon = today + Duration::days(30);
        self.by_date
            .range(today..=horizon)
            .map(|(_, h)| h)
            .collect()
    }

    fn date_of(&self, id: &str) -> Option<NaiveDate> {
        self.holiday_by_id(id).map(|h| h.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn add_rejects_past_and_duplicate_dates() {
        let today = date("2026-03-15");
        let mut cal = HolidayCalendar::new();

        assert_eq!(
            cal.add_holiday(date("2026-03-15"), "Today", "", today),
            Err(Rejection::HolidayNotFuture)
        );
        assert_eq!(
            cal.add_holiday(date("2026-03-01"), "Past", "", today),
            Err(Rejection::HolidayNotFuture)
        );

        cal.add_holiday(date("2026-04-01"), "Spring", "", today).unwrap();
        assert_eq!(
            cal.add_holiday(date("2026-04-01"), "Again", "", today),
            Err(Rejection::DuplicateHolidayDate(date("2026-04-01")))
        );
        assert_eq!(cal.holiday_dates(), vec![date("2026-04-01")]);
    }

    #[test]
    fn past_holidays_cannot_be_edited_or_deleted() {
        let mut cal = HolidayCalendar::new();
        let h = cal
            .add_holiday(date("2026-04-01"), "Spring", "", date("2026-03-01"))
            .unwrap();

        // Time moves past the holiday; it is now frozen.
        let later = date("2026-04-02");
        assert_eq!(
            cal.edit_holiday(&h.id, HolidayUpdate::default(), later),
            Err(Rejection::HolidayNotFuture)
        );
        assert_eq!(
            cal.delete_holiday(&h.id, later),
            Err(Rejection::HolidayNotFuture)
        );
        assert_eq!(cal.holiday_dates(), vec![date("2026-04-01")]);
    }

    #[test]
    fn edit_rejects_collision_with_other_holiday() {
        let today = date("2026-03-01");
        let mut cal = HolidayCalendar::new();
        cal.add_holiday(date("2026-04-01"), "A", "", today).unwrap();
        let b = cal.add_holiday(date("2026-04-02"), "B", "", today).unwrap();

        let update = HolidayUpdate {
            date: Some(date("2026-04-01")),
            ..Default::default()
        };
        assert_eq!(
            cal.edit_holiday(&b.id, update, today),
            Err(Rejection::DuplicateHolidayDate(date("2026-04-01")))
        );
    }

    #[test]
    fn sundays_are_generated_for_the_whole_year() {
        let cal = HolidayCalendar::with_sundays(2026);
        let dates = cal.holiday_dates();
        assert!(dates.iter().all(|d| d.weekday() == Weekday::Sun));
        assert!(dates.contains(&date("2026-01-04")));
        assert!(dates.contains(&date("2026-12-27")));
        // 2026 has 52 Sundays.
        assert_eq!(dates.len(), 52);
    }

    #[test]
    fn upcoming_window_is_inclusive_of_today() {
        let mut cal = HolidayCalendar::new();
        let seeded = date("2026-01-01");
        cal.add_holiday(date("2026-03-15"), "On the day", "", seeded).unwrap();
        cal.add_holiday(date("2026-04-14"), "Edge", "", seeded).unwrap();
        cal.add_holiday(date("2026-04-15"), "Beyond", "", seeded).unwrap();

        let upcoming: Vec<_> = cal
            .upcoming_holidays(date("2026-03-15"))
            .into_iter()
            .map(|h| h.date)
            .collect();
        assert_eq!(upcoming, vec![date("2026-03-15"), date("2026-04-14")]);
    }
}
