use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::{parse_month, today};
use crate::model::holiday::Holiday;
use crate::state::AppState;
use crate::store::holiday_calendar::HolidayUpdate;

#[derive(Deserialize, ToSchema)]
pub struct CreateHoliday {
    #[schema(example = "2026-12-25", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "Christmas Day")]
    pub name: String,
    #[schema(example = "Office closed", default = "")]
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateHoliday {
    #[schema(example = "2026-12-26", format = "date", value_type = String, nullable = true)]
    pub date: Option<NaiveDate>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct HolidayQuery {
    /// Filter to one month, formatted yyyy-mm
    #[schema(example = "2026-03")]
    pub month: Option<String>,
    /// Filter to one year
    #[schema(example = 2026)]
    pub year: Option<i32>,
}

#[derive(Serialize, ToSchema)]
pub struct HolidayListResponse {
    pub data: Vec<Holiday>,
    #[schema(example = 12)]
    pub total: usize,
}

/// Create a holiday (future dates only)
#[utoipa::path(
    post,
    path = "/api/holiday",
    request_body = CreateHoliday,
    responses(
        (status = 200, description = "Holiday created", body = Holiday),
        (status = 400, description = "Date not in the future, or already taken", body = Object, example = json!({
            "message": "A holiday already exists on 2026-12-25"
        }))
    ),
    tag = "Holiday"
)]
pub async fn create_holiday(
    state: web::Data<AppState>,
    payload: web::Json<CreateHoliday>,
) -> actix_web::Result<impl Responder> {
    let holiday = state.write_calendar().add_holiday(
        payload.date,
        &payload.name,
        &payload.description,
        today(),
    )?;
    Ok(HttpResponse::Ok().json(holiday))
}

/// List holidays, optionally for one month or year
#[utoipa::path(
    get,
    path = "/api/holiday",
    params(HolidayQuery),
    responses(
        (status = 200, description = "Holiday list", body = HolidayListResponse)
    ),
    tag = "Holiday"
)]
pub async fn list_holidays(
    state: web::Data<AppState>,
    query: web::Query<HolidayQuery>,
) -> actix_web::Result<impl Responder> {
    let calendar = state.read_calendar();
    let data: Vec<Holiday> = if let Some(month) = query.month.as_deref() {
        let (y, m) = parse_month(month)?;
        calendar.holidays_for_month(y, m).into_iter().cloned().collect()
    } else if let Some(year) = query.year {
        calendar.holidays_for_year(year).into_iter().cloned().collect()
    } else {
        calendar.all().cloned().collect()
    };
    let total = data.len();
    Ok(HttpResponse::Ok().json(HolidayListResponse { data, total }))
}

/// Sorted list of every holiday date
#[utoipa::path(
    get,
    path = "/api/holiday/dates",
    responses(
        (status = 200, description = "Ascending holiday dates", body = Vec<String>, example = json!([
            "2026-01-04", "2026-12-25"
        ]))
    ),
    tag = "Holiday"
)]
pub async fn holiday_dates(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    let dates = state.read_calendar().holiday_dates();
    Ok(HttpResponse::Ok().json(dates))
}

/// Holidays within the next 30 days, inclusive of today
#[utoipa::path(
    get,
    path = "/api/holiday/upcoming",
    responses(
        (status = 200, description = "Upcoming holidays", body = Vec<Holiday>)
    ),
    tag = "Holiday"
)]
pub async fn upcoming_holidays(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    let upcoming: Vec<Holiday> = state
        .read_calendar()
        .upcoming_holidays(today())
        .into_iter()
        .cloned()
        .collect();
    Ok(HttpResponse::Ok().json(upcoming))
}

/// Edit a future holiday
#[utoipa::path(
    put,
    path = "/api/holiday/{holiday_id}",
    params(("holiday_id" = String, Path, description = "Holiday ID")),
    request_body = UpdateHoliday,
    responses(
        (status = 200, description = "Holiday updated", body = Holiday),
        (status = 400, description = "Holiday is in the past or the new date collides"),
        (status = 404, description = "Holiday not found")
    ),
    tag = "Holiday"
)]
pub async fn update_holiday(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<UpdateHoliday>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let update = HolidayUpdate {
        date: payload.date,
        name: payload.name,
        description: payload.description,
    };
    let holiday = state
        .write_calendar()
        .edit_holiday(&path.into_inner(), update, today())?;
    Ok(HttpResponse::Ok().json(holiday))
}

/// Delete a future holiday
#[utoipa::path(
    delete,
    path = "/api/holiday/{holiday_id}",
    params(("holiday_id" = String, Path, description = "Holiday ID")),
    responses(
        (status = 200, description = "Holiday deleted", body = Object, example = json!({
            "message": "Holiday deleted"
        })),
        (status = 400, description = "Holiday is in the past"),
        (status = 404, description = "Holiday not found")
    ),
    tag = "Holiday"
)]
pub async fn delete_holiday(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    state.write_calendar().delete_holiday(&path.into_inner(), today())?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Holiday deleted"
    })))
}
