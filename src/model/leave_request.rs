use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

/// Decided once at submission time; never mutated by the requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LeaveCategory {
    Paid,
    Unpaid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
pub enum LeaveDayType {
    #[strum(serialize = "Full Day")]
    #[serde(rename = "Full Day")]
    FullDay,
    #[strum(serialize = "Half Day")]
    #[serde(rename = "Half Day")]
    HalfDay,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "3f2b8c1d-4e5f-6a7b-8c9d-0e1f2a3b4c5d",
        "employee_id": "EMP-001",
        "from_date": "2026-03-10",
        "to_date": "2026-03-12",
        "reason": "Family event",
        "leave_type": "casual",
        "status": "pending",
        "leave_category": "paid",
        "leave_day_type": "Full Day",
        "applied_on": "2026-03-01",
        "decided_on": null,
        "decided_by": null
    })
)]
pub struct LeaveRequest {
    pub id: String,

    #[schema(example = "EMP-001")]
    pub employee_id: String,

    /// Inclusive range; `from_date <= to_date` always holds.
    #[schema(example = "2026-03-10", format = "date", value_type = String)]
    pub from_date: NaiveDate,

    #[schema(example = "2026-03-12", format = "date", value_type = String)]
    pub to_date: NaiveDate,

    #[schema(example = "Family event")]
    pub reason: String,

    /// Free text, e.g. "casual", "sick".
    #[schema(example = "casual")]
    pub leave_type: String,

    pub status: LeaveStatus,

    pub leave_category: LeaveCategory,

    pub leave_day_type: LeaveDayType,

    #[schema(example = "2026-03-01", format = "date", value_type = String)]
    pub applied_on: NaiveDate,

    #[schema(example = "2026-03-02", format = "date", value_type = String, nullable = true)]
    pub decided_on: Option<NaiveDate>,

    /// Actor who approved or rejected the request.
    #[schema(example = "admin", nullable = true)]
    pub decided_by: Option<String>,
}

impl LeaveRequest {
    /// Expands the inclusive [from, to] range into individual dates.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.from_date
            .iter_days()
            .take_while(|d| *d <= self.to_date)
            .collect()
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.from_date <= date && date <= self.to_date
    }
}
