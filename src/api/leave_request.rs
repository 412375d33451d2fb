use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::today;
use crate::config::Config;
use crate::engine::balance::{self, LeaveBalance};
use crate::error::Rejection;
use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use crate::state::AppState;
use crate::store::leave_ledger::{LeaveFilter as LedgerFilter, LeaveUpdate};
use crate::utils::upstream;

#[derive(Clone, Deserialize, Serialize, ToSchema)]
pub struct ApplyLeave {
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    #[schema(example = "2026-03-10", format = "date", value_type = String)]
    pub from_date: NaiveDate,
    #[schema(example = "2026-03-12", format = "date", value_type = String)]
    pub to_date: NaiveDate,
    #[schema(example = "Family event")]
    pub reason: String,
    #[schema(example = "casual")]
    pub leave_type: String,
    /// "morning" or "afternoon"; only meaningful for single-day requests
    #[schema(example = "morning", nullable = true)]
    pub half_day_session: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateLeave {
    #[schema(example = "2026-03-10", format = "date", value_type = String, nullable = true)]
    pub from_date: Option<NaiveDate>,
    #[schema(example = "2026-03-12", format = "date", value_type = String, nullable = true)]
    pub to_date: Option<NaiveDate>,
    pub reason: Option<String>,
    pub leave_type: Option<String>,
    pub status: Option<LeaveStatus>,
}

#[derive(Deserialize, ToSchema)]
pub struct Decision {
    /// Actor recorded on the decided request
    #[schema(example = "admin", nullable = true)]
    pub decided_by: Option<String>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct LeaveQuery {
    #[schema(example = "EMP-001")]
    /// Filter by employee ID
    pub employee_id: Option<String>,
    #[schema(example = "2026-03")]
    /// Filter by the month the leave starts in (yyyy-mm)
    pub month: Option<String>,
    #[schema(example = "pending")]
    /// Filter by leave status
    pub status: Option<LeaveStatus>,
    #[schema(example = "casual")]
    /// Filter by leave type
    pub leave_type: Option<String>,
    #[schema(example = 1)]
    /// Pagination page number (start with 1)
    pub page: Option<usize>,
    #[schema(example = 10)]
    /// Pagination per page number
    pub per_page: Option<usize>,
}

#[derive(Serialize, ToSchema)]
pub struct LeaveListResponse {
    pub data: Vec<LeaveRequest>,
    #[schema(example = 1)]
    pub page: usize,
    #[schema(example = 10)]
    pub per_page: usize,
    #[schema(example = 1)]
    pub total: usize,
}

/* =========================
Submit leave request
========================= */
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body(
        content = ApplyLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave request submitted", body = LeaveRequest),
        (status = 400, description = "Invalid range or unknown employee", body = Object, example = json!({
            "message": "from_date cannot be after to_date"
        }))
    ),
    tag = "Leave"
)]
pub async fn apply_leave(
    state: web::Data<AppState>,
    config: web::Data<Config>,
    payload: web::Json<ApplyLeave>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    if state.read_roster().get(&payload.employee_id).is_none() {
        return Err(Rejection::UnknownEmployee(payload.employee_id).into());
    }

    let request = state.write_leaves().apply_leave(
        &payload.employee_id,
        payload.from_date,
        payload.to_date,
        &payload.reason,
        &payload.leave_type,
        payload.half_day_session.as_deref(),
        today(),
    )?;

    // Local entry is authoritative; the upstream copy is best-effort.
    upstream::forward(
        &config,
        &format!("/api/leaves/{}", request.employee_id),
        payload,
    );

    Ok(HttpResponse::Ok().json(request))
}

/* =========================
List / filter leave requests
========================= */
#[utoipa::path(
    get,
    path = "/api/leave",
    params(LeaveQuery),
    responses(
        (status = 200, description = "Paginated leave list", body = LeaveListResponse)
    ),
    tag = "Leave"
)]
pub async fn leave_list(
    state: web::Data<AppState>,
    query: web::Query<LeaveQuery>,
) -> actix_web::Result<impl Responder> {
    let per_page = query.per_page.unwrap_or(10).min(100);
    let page = query.page.unwrap_or(1).max(1);

    let filter = LedgerFilter {
        employee_id: query.employee_id.clone(),
        month: query.month.clone(),
        status: query.status,
        leave_type: query.leave_type.clone(),
    };

    let leaves = state.read_leaves();
    let hits = leaves.filtered(&filter);
    let total = hits.len();
    let data: Vec<LeaveRequest> = hits
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .cloned()
        .collect();

    Ok(HttpResponse::Ok().json(LeaveListResponse {
        data,
        page,
        per_page,
        total,
    }))
}

#[utoipa::path(
    get,
    path = "/api/leave/{leave_id}",
    params(("leave_id" = String, Path, description = "ID of the leave request to fetch")),
    responses(
        (status = 200, description = "Leave request found", body = LeaveRequest),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "message": "Leave request not found"
        }))
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    match state.read_leaves().get(&id) {
        Some(request) => Ok(HttpResponse::Ok().json(request.clone())),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Leave request not found"
        }))),
    }
}

/* =========================
Approve / reject (admin)
========================= */
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/approve",
    params(("leave_id" = String, Path, description = "ID of the leave request to approve")),
    request_body = Decision,
    responses(
        (status = 200, description = "Leave approved", body = LeaveRequest),
        (status = 400, description = "Leave request already processed", body = Object, example = json!({
            "message": "Leave request is not pending"
        })),
        (status = 404, description = "Leave request not found")
    ),
    tag = "Leave"
)]
pub async fn approve_leave(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: Option<web::Json<Decision>>,
) -> actix_web::Result<impl Responder> {
    let actor = payload
        .as_ref()
        .and_then(|p| p.decided_by.as_deref())
        .unwrap_or("admin");
    let request = state
        .write_leaves()
        .approve(&path.into_inner(), actor, today())?;
    Ok(HttpResponse::Ok().json(request))
}

#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/reject",
    params(("leave_id" = String, Path, description = "ID of the leave request to reject")),
    request_body = Decision,
    responses(
        (status = 200, description = "Leave rejected", body = LeaveRequest),
        (status = 400, description = "Leave request already processed"),
        (status = 404, description = "Leave request not found")
    ),
    tag = "Leave"
)]
pub async fn reject_leave(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: Option<web::Json<Decision>>,
) -> actix_web::Result<impl Responder> {
    let actor = payload
        .as_ref()
        .and_then(|p| p.decided_by.as_deref())
        .unwrap_or("admin");
    let request = state
        .write_leaves()
        .reject(&path.into_inner(), actor, today())?;
    Ok(HttpResponse::Ok().json(request))
}

/* =========================
Administrative edit / delete
========================= */
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}",
    params(("leave_id" = String, Path, description = "ID of the leave request to edit")),
    request_body = UpdateLeave,
    responses(
        (status = 200, description = "Leave request updated", body = LeaveRequest),
        (status = 400, description = "Invalid date range"),
        (status = 404, description = "Leave request not found")
    ),
    tag = "Leave"
)]
pub async fn update_leave(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<UpdateLeave>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let update = LeaveUpdate {
        from_date: payload.from_date,
        to_date: payload.to_date,
        reason: payload.reason,
        leave_type: payload.leave_type,
        status: payload.status,
    };
    let request = state.write_leaves().update_leave(&path.into_inner(), update)?;
    Ok(HttpResponse::Ok().json(request))
}

#[utoipa::path(
    delete,
    path = "/api/leave/{leave_id}",
    params(("leave_id" = String, Path, description = "ID of the leave request to delete")),
    responses(
        (status = 200, description = "Leave request deleted", body = Object, example = json!({
            "message": "Leave request deleted"
        })),
        (status = 404, description = "Leave request not found")
    ),
    tag = "Leave"
)]
pub async fn delete_leave(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    state.write_leaves().delete_leave(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave request deleted"
    })))
}

/* =========================
Leave balance
========================= */
#[utoipa::path(
    get,
    path = "/api/leave/balance/{employee_id}",
    params(("employee_id" = String, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Carry-over balance for the current year", body = LeaveBalance),
        (status = 400, description = "Unknown employee")
    ),
    tag = "Leave"
)]
pub async fn leave_balance(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();
    if state.read_roster().get(&employee_id).is_none() {
        return Err(Rejection::UnknownEmployee(employee_id).into());
    }
    let approved = state.read_leaves().approved_leave_dates(&employee_id);
    let balance = balance::leave_balance(&approved, today());
    Ok(HttpResponse::Ok().json(balance))
}
