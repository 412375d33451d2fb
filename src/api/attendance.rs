use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::{Datelike, Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::{parse_month, today};
use crate::config::Config;
use crate::engine::derive::{
    self, EmployeeSandwichSummary, ManualAttendance, ManualUpdate, MonthlySummary,
};
use crate::engine::sandwich::SandwichDetail;
use crate::error::Rejection;
use crate::model::attendance::{AttendanceRow, DayStatus};
use crate::state::AppState;
use crate::utils::export;
use crate::utils::upstream;

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct AttendanceQuery {
    #[schema(example = "EMP-001")]
    /// Filter by employee ID
    pub employee_id: Option<String>,
    #[schema(example = "2026-03")]
    /// Filter by month (yyyy-mm)
    pub month: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct ManualAttendanceDto {
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    #[schema(example = "2026-03-02", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub status: DayStatus,
    #[schema(example = "09:00:00", value_type = String, nullable = true)]
    pub punch_in: Option<NaiveTime>,
    #[schema(example = "18:00:00", value_type = String, nullable = true)]
    pub punch_out: Option<NaiveTime>,
    #[schema(example = false, nullable = true)]
    pub half_day: Option<bool>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateAttendanceDto {
    pub status: Option<DayStatus>,
    #[schema(example = "09:00:00", value_type = String, nullable = true)]
    pub punch_in: Option<NaiveTime>,
    #[schema(example = "18:00:00", value_type = String, nullable = true)]
    pub punch_out: Option<NaiveTime>,
    pub half_day: Option<bool>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct SummaryQuery {
    #[schema(example = "2026-03")]
    /// Month to aggregate (yyyy-mm); defaults to the current month
    pub month: Option<String>,
    #[schema(example = "EMP-001")]
    /// Restrict to one employee
    pub employee_id: Option<String>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct SandwichQuery {
    #[schema(example = "2026-03")]
    /// Restrict to holidays within one month (yyyy-mm)
    pub month: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct SandwichResponse {
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    /// Sandwiched holiday dates, ascending
    #[schema(value_type = Vec<String>, example = json!(["2025-08-13"]))]
    pub dates: Vec<NaiveDate>,
    #[schema(example = 1)]
    pub count: usize,
    pub details: Vec<SandwichDetail>,
}

#[derive(Clone, Deserialize, Serialize, ToSchema)]
pub struct PunchPayload {
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    /// Defaults to the current wall-clock time
    #[schema(example = "09:27:00", value_type = String, nullable = true)]
    pub time: Option<NaiveTime>,
}

fn month_or_current(month: Option<&str>) -> actix_web::Result<(i32, u32)> {
    match month {
        Some(m) => parse_month(m),
        None => {
            let now = today();
            Ok((now.year(), now.month()))
        }
    }
}

/// Derived daily attendance ledger
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Derived attendance rows", body = Vec<AttendanceRow>)
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    state: web::Data<AppState>,
    config: web::Data<Config>,
    query: web::Query<AttendanceQuery>,
) -> actix_web::Result<impl Responder> {
    let month = query.month.as_deref().map(parse_month).transpose()?;
    state.refresh(&config, today());

    let roster = state.read_roster();
    let rows = state
        .read_engine()
        .rows(&roster, query.employee_id.as_deref(), month);
    Ok(HttpResponse::Ok().json(rows))
}

/// Manual attendance upsert, keyed on (employee, date)
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = ManualAttendanceDto,
    responses(
        (status = 200, description = "Record upserted", body = AttendanceRow),
        (status = 400, description = "Classification conflict", body = Object, example = json!({
            "message": "Cannot mark 2026-03-15 as Leave: the day is a Sunday or public holiday"
        }))
    ),
    tag = "Attendance"
)]
pub async fn add_attendance(
    state: web::Data<AppState>,
    config: web::Data<Config>,
    payload: web::Json<ManualAttendanceDto>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    if state.read_roster().get(&payload.employee_id).is_none() {
        return Err(Rejection::UnknownEmployee(payload.employee_id).into());
    }

    let now = today();
    state.refresh(&config, now);

    let input = ManualAttendance {
        employee_id: payload.employee_id,
        date: payload.date,
        status: payload.status,
        punch_in: payload.punch_in,
        punch_out: payload.punch_out,
        half_day: payload.half_day,
    };
    let calendar = state.read_calendar();
    let record = state.write_engine().upsert_manual(input, &calendar, now)?;
    drop(calendar);

    let roster = state.read_roster();
    let name = roster.name_of(&record.employee_id).unwrap_or("Unknown");
    Ok(HttpResponse::Ok().json(AttendanceRow::from_record(&record, name)))
}

/// Edit one derived record by composite id
#[utoipa::path(
    put,
    path = "/api/attendance/{record_id}",
    params(("record_id" = String, Path, description = "Composite id, e.g. EMP-001_2026-03-02")),
    request_body = UpdateAttendanceDto,
    responses(
        (status = 200, description = "Record updated", body = AttendanceRow),
        (status = 400, description = "Classification conflict"),
        (status = 404, description = "Record not found")
    ),
    tag = "Attendance"
)]
pub async fn edit_attendance(
    state: web::Data<AppState>,
    config: web::Data<Config>,
    path: web::Path<String>,
    payload: web::Json<UpdateAttendanceDto>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    state.refresh(&config, today());

    let update = ManualUpdate {
        status: payload.status,
        punch_in: payload.punch_in,
        punch_out: payload.punch_out,
        half_day: payload.half_day,
    };
    let calendar = state.read_calendar();
    let record = state
        .write_engine()
        .edit_manual(&path.into_inner(), update, &calendar)?;
    drop(calendar);

    let roster = state.read_roster();
    let name = roster.name_of(&record.employee_id).unwrap_or("Unknown");
    Ok(HttpResponse::Ok().json(AttendanceRow::from_record(&record, name)))
}

/// Delete one derived record by composite id
#[utoipa::path(
    delete,
    path = "/api/attendance/{record_id}",
    params(("record_id" = String, Path, description = "Composite id, e.g. EMP-001_2026-03-02")),
    responses(
        (status = 200, description = "Record deleted", body = Object, example = json!({
            "message": "Attendance record deleted"
        })),
        (status = 404, description = "Record not found")
    ),
    tag = "Attendance"
)]
pub async fn delete_attendance(
    state: web::Data<AppState>,
    config: web::Data<Config>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    state.refresh(&config, today());
    state.write_engine().delete(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Attendance record deleted"
    })))
}

/// Per-employee monthly aggregates
#[utoipa::path(
    get,
    path = "/api/attendance/summary",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Monthly day-count aggregates", body = Vec<MonthlySummary>)
    ),
    tag = "Attendance"
)]
pub async fn attendance_summary(
    state: web::Data<AppState>,
    config: web::Data<Config>,
    query: web::Query<SummaryQuery>,
) -> actix_web::Result<impl Responder> {
    let (year, month) = month_or_current(query.month.as_deref())?;
    state.refresh(&config, today());

    let roster = state.read_roster();
    let engine = state.read_engine();
    let summaries: Vec<MonthlySummary> = match query.employee_id.as_deref() {
        Some(employee_id) => vec![engine.monthly_summary(employee_id, year, month)],
        None => engine.summaries_for_month(&roster, year, month),
    };
    Ok(HttpResponse::Ok().json(summaries))
}

/// Sandwich-leave summary for every active employee
#[utoipa::path(
    get,
    path = "/api/attendance/sandwich",
    params(SandwichQuery),
    responses(
        (status = 200, description = "Per-employee sandwich-leave details", body = Vec<EmployeeSandwichSummary>)
    ),
    tag = "Attendance"
)]
pub async fn sandwich_summary(
    state: web::Data<AppState>,
    query: web::Query<SandwichQuery>,
) -> actix_web::Result<impl Responder> {
    let month = query.month.as_deref().map(parse_month).transpose()?;
    let roster = state.read_roster();
    let calendar = state.read_calendar();
    let leaves = state.read_leaves();
    let summary = derive::sandwich_summary(&roster, &calendar, &leaves, month);
    Ok(HttpResponse::Ok().json(summary))
}

/// Sandwich-leave dates for one employee
#[utoipa::path(
    get,
    path = "/api/attendance/sandwich/{employee_id}",
    params(
        ("employee_id" = String, Path, description = "Employee ID"),
        SandwichQuery
    ),
    responses(
        (status = 200, description = "Sandwiched holidays with bounding leave days", body = SandwichResponse),
        (status = 400, description = "Unknown employee")
    ),
    tag = "Attendance"
)]
pub async fn sandwich_for_employee(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<SandwichQuery>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();
    if state.read_roster().get(&employee_id).is_none() {
        return Err(Rejection::UnknownEmployee(employee_id).into());
    }
    let month = query.month.as_deref().map(parse_month).transpose()?;

    let calendar = state.read_calendar();
    let leaves = state.read_leaves();
    let details = derive::employee_sandwich_details(&calendar, &leaves, &employee_id, month);
    let dates: Vec<NaiveDate> = details.iter().map(|d| d.holiday).collect();
    Ok(HttpResponse::Ok().json(SandwichResponse {
        employee_id,
        count: dates.len(),
        dates,
        details,
    }))
}

/// CSV export of the (filtered) ledger
#[utoipa::path(
    get,
    path = "/api/attendance/export",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "CSV with columns ID, Employee ID, Name, Date, Status, Details",
         content_type = "text/csv")
    ),
    tag = "Attendance"
)]
pub async fn export_attendance(
    state: web::Data<AppState>,
    config: web::Data<Config>,
    query: web::Query<AttendanceQuery>,
) -> actix_web::Result<impl Responder> {
    let month = query.month.as_deref().map(parse_month).transpose()?;
    state.refresh(&config, today());

    let roster = state.read_roster();
    let rows = state
        .read_engine()
        .rows(&roster, query.employee_id.as_deref(), month);
    let csv = export::attendance_csv(&rows).map_err(|e| {
        tracing::error!(error = %e, "CSV export failed");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"attendance.csv\"",
        ))
        .body(csv))
}

/// Punch-in for today
#[utoipa::path(
    post,
    path = "/api/attendance/punch-in",
    request_body = PunchPayload,
    responses(
        (status = 200, description = "Punched in", body = Object, example = json!({
            "message": "Punched in successfully"
        })),
        (status = 400, description = "Already punched in today", body = Object, example = json!({
            "message": "Already punched in on 2026-03-02"
        }))
    ),
    tag = "Attendance"
)]
pub async fn punch_in(
    state: web::Data<AppState>,
    config: web::Data<Config>,
    payload: web::Json<PunchPayload>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    if state.read_roster().get(&payload.employee_id).is_none() {
        return Err(Rejection::UnknownEmployee(payload.employee_id).into());
    }

    let time = payload.time.unwrap_or_else(|| Local::now().time());
    state
        .write_punches()
        .punch_in(&payload.employee_id, today(), time)?;

    upstream::forward(&config, "/api/attendance/punch-in", payload);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Punched in successfully"
    })))
}

/// Punch-out for today
#[utoipa::path(
    post,
    path = "/api/attendance/punch-out",
    request_body = PunchPayload,
    responses(
        (status = 200, description = "Punched out", body = Object, example = json!({
            "message": "Punched out successfully"
        })),
        (status = 400, description = "No open punch-in for today", body = Object, example = json!({
            "message": "No open punch-in found for 2026-03-02"
        }))
    ),
    tag = "Attendance"
)]
pub async fn punch_out(
    state: web::Data<AppState>,
    config: web::Data<Config>,
    payload: web::Json<PunchPayload>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let time = payload.time.unwrap_or_else(|| Local::now().time());
    state
        .write_punches()
        .punch_out(&payload.employee_id, today(), time)?;

    upstream::forward(&config, "/api/attendance/punch-out", payload);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Punched out successfully"
    })))
}
