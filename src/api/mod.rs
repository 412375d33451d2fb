pub mod attendance;
pub mod employee;
pub mod holiday;
pub mod leave_request;

use actix_web::error::ErrorBadRequest;
use chrono::{Local, NaiveDate};

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a `yyyy-mm` query value into (year, month).
pub(crate) fn parse_month(value: &str) -> actix_web::Result<(i32, u32)> {
    let (year, month) = value
        .split_once('-')
        .ok_or_else(|| ErrorBadRequest("month must be formatted yyyy-mm"))?;
    let year: i32 = year
        .parse()
        .map_err(|_| ErrorBadRequest("month must be formatted yyyy-mm"))?;
    let month: u32 = month
        .parse()
        .map_err(|_| ErrorBadRequest("month must be formatted yyyy-mm"))?;
    if !(1..=12).contains(&month) {
        return Err(ErrorBadRequest("month must be between 01 and 12"));
    }
    Ok((year, month))
}
