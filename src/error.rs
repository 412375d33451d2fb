use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::NaiveDate;
use derive_more::Display;

/// Expected, user-correctable rejections raised by the stores and the
/// derivation engine. Rendered as a 400 JSON body, never as a panic.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum Rejection {
    #[display(fmt = "Holiday date must be in the future")]
    HolidayNotFuture,

    #[display(fmt = "A holiday already exists on {}", _0)]
    DuplicateHolidayDate(NaiveDate),

    #[display(fmt = "from_date cannot be after to_date")]
    InvertedDateRange,

    #[display(fmt = "Cannot mark {} as Leave: the day is a Sunday or public holiday", _0)]
    LeaveOnHoliday(NaiveDate),

    #[display(fmt = "Leave request is not pending")]
    NotPending,

    #[display(fmt = "Unknown employee {}", _0)]
    UnknownEmployee(String),

    #[display(fmt = "Attendance cannot be recorded for a future date ({})", _0)]
    FutureAttendance(NaiveDate),

    #[display(fmt = "Already punched in on {}", _0)]
    AlreadyPunchedIn(NaiveDate),

    #[display(fmt = "No open punch-in found for {}", _0)]
    NoOpenPunch(NaiveDate),

    #[display(fmt = "{} not found", _0)]
    NotFound(&'static str),
}

impl ResponseError for Rejection {
    fn status_code(&self) -> StatusCode {
        match self {
            Rejection::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "message": self.to_string()
        }))
    }
}
