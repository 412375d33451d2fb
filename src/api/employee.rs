use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::employee::Employee;
use crate::state::AppState;

#[derive(Deserialize, ToSchema)]
pub struct CreateEmployee {
    /// Stable id; generated when omitted
    #[schema(example = "EMP-006", nullable = true)]
    pub id: Option<String>,
    #[schema(example = "New Hire")]
    pub name: String,
    #[schema(example = "Engineering")]
    pub department: String,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    #[schema(example = 5)]
    pub total: usize,
}

/// List the roster
#[utoipa::path(
    get,
    path = "/api/employee",
    responses(
        (status = 200, description = "Employee list", body = EmployeeListResponse)
    ),
    tag = "Employee"
)]
pub async fn list_employees(state: web::Data<AppState>) -> actix_web::Result<impl Responder> {
    let roster = state.read_roster();
    let data = roster.all().to_vec();
    let total = data.len();
    Ok(HttpResponse::Ok().json(EmployeeListResponse { data, total }))
}

/// Fetch one employee
#[utoipa::path(
    get,
    path = "/api/employee/{employee_id}",
    params(("employee_id" = String, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    match state.read_roster().get(&path.into_inner()) {
        Some(employee) => Ok(HttpResponse::Ok().json(employee.clone())),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Employee not found"
        }))),
    }
}

/// Add an employee to the roster
#[utoipa::path(
    post,
    path = "/api/employee",
    request_body = CreateEmployee,
    responses(
        (status = 200, description = "Employee created", body = Employee),
        (status = 400, description = "Duplicate employee id", body = Object, example = json!({
            "message": "Employee id already exists"
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    state: web::Data<AppState>,
    payload: web::Json<CreateEmployee>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let id = payload
        .id
        .unwrap_or_else(|| format!("EMP-{}", Uuid::new_v4()));

    let mut roster = state.write_roster();
    if roster.get(&id).is_some() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Employee id already exists"
        })));
    }
    let employee = Employee {
        id,
        name: payload.name,
        department: payload.department,
        is_active: true,
    };
    roster.add(employee.clone());
    Ok(HttpResponse::Ok().json(employee))
}
