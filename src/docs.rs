use crate::api::attendance::{
    AttendanceQuery, ManualAttendanceDto, PunchPayload, SandwichQuery, SandwichResponse,
    SummaryQuery, UpdateAttendanceDto,
};
use crate::api::employee::{CreateEmployee, EmployeeListResponse};
use crate::api::holiday::{CreateHoliday, HolidayListResponse, HolidayQuery, UpdateHoliday};
use crate::api::leave_request::{
    ApplyLeave, Decision, LeaveListResponse, LeaveQuery, UpdateLeave,
};
use crate::engine::balance::LeaveBalance;
use crate::engine::derive::{EmployeeSandwichSummary, MonthlySummary};
use crate::engine::sandwich::SandwichDetail;
use crate::model::attendance::{AttendanceRow, DayStatus, StatusReason};
use crate::model::employee::Employee;
use crate::model::holiday::Holiday;
use crate::model::leave_request::{LeaveCategory, LeaveDayType, LeaveRequest, LeaveStatus};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance & Leave Derivation API",
        version = "1.0.0",
        description = r#"
## Attendance & Leave Derivation Service

This API derives a **daily attendance ledger** for every employee from three
in-memory sources of truth: the roster, the holiday calendar, and the leave
request ledger.

### 🔹 Key Features
- **Holiday Calendar**
  - Future-only add/edit/delete, auto-generated Sunday holidays, date queries
- **Leave Management**
  - Apply for leave, approve/reject requests, paid/unpaid categorization,
    carry-over balance reporting
- **Attendance Derivation**
  - Deterministic day classification (Sunday/holiday → Leave → working day),
    half-day detection, manual overrides, sandwich-leave detection
- **Exports**
  - CSV export with a fixed column contract for downstream tooling

### 📦 Response Format
- JSON-based RESTful responses
- Pagination supported for list endpoints
- Validation failures are `{"message": ...}` with status 400

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::holiday::create_holiday,
        crate::api::holiday::list_holidays,
        crate::api::holiday::holiday_dates,
        crate::api::holiday::upcoming_holidays,
        crate::api::holiday::update_holiday,
        crate::api::holiday::delete_holiday,

        crate::api::leave_request::apply_leave,
        crate::api::leave_request::leave_list,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave,
        crate::api::leave_request::update_leave,
        crate::api::leave_request::delete_leave,
        crate::api::leave_request::leave_balance,

        crate::api::attendance::list_attendance,
        crate::api::attendance::add_attendance,
        crate::api::attendance::edit_attendance,
        crate::api::attendance::delete_attendance,
        crate::api::attendance::attendance_summary,
        crate::api::attendance::sandwich_summary,
        crate::api::attendance::sandwich_for_employee,
        crate::api::attendance::export_attendance,
        crate::api::attendance::punch_in,
        crate::api::attendance::punch_out,

        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::create_employee
    ),
    components(
        schemas(
            Holiday,
            CreateHoliday,
            UpdateHoliday,
            HolidayQuery,
            HolidayListResponse,
            LeaveRequest,
            LeaveStatus,
            LeaveCategory,
            LeaveDayType,
            ApplyLeave,
            UpdateLeave,
            Decision,
            LeaveQuery,
            LeaveListResponse,
            LeaveBalance,
            AttendanceRow,
            DayStatus,
            StatusReason,
            AttendanceQuery,
            ManualAttendanceDto,
            UpdateAttendanceDto,
            SummaryQuery,
            SandwichQuery,
            SandwichResponse,
            SandwichDetail,
            MonthlySummary,
            EmployeeSandwichSummary,
            PunchPayload,
            Employee,
            CreateEmployee,
            EmployeeListResponse
        )
    ),
    tags(
        (name = "Holiday", description = "Holiday calendar APIs"),
        (name = "Leave", description = "Leave management APIs"),
        (name = "Attendance", description = "Attendance derivation APIs"),
        (name = "Employee", description = "Employee roster APIs"),
    )
)]
pub struct ApiDoc;
