use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
pub enum DayStatus {
    Present,
    Absent,
    Leave,
    Holiday,
}

/// Secondary tag recording why the day was classified the way it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StatusReason {
    WorkingDay,
    Holiday,
    ApprovedLeave,
    Absent,
}

/// Punch and hour fields exist only on Present days; the other variants
/// carry nothing, so a Leave day can never hold stale worked hours.
#[derive(Debug, Clone, PartialEq)]
pub enum DayDetail {
    Present {
        punch_in: NaiveTime,
        punch_out: NaiveTime,
        work_hours: f64,
        worked_hours: f64,
        idle_time: f64,
        half_day: bool,
    },
    Absent,
    Leave,
    Holiday,
}

impl DayDetail {
    pub fn status(&self) -> DayStatus {
        match self {
            DayDetail::Present { .. } => DayStatus::Present,
            DayDetail::Absent => DayStatus::Absent,
            DayDetail::Leave => DayStatus::Leave,
            DayDetail::Holiday => DayStatus::Holiday,
        }
    }

    pub fn reason(&self) -> StatusReason {
        match self {
            DayDetail::Present { .. } => StatusReason::WorkingDay,
            DayDetail::Absent => StatusReason::Absent,
            DayDetail::Leave => StatusReason::ApprovedLeave,
            DayDetail::Holiday => StatusReason::Holiday,
        }
    }

    pub fn half_day(&self) -> bool {
        matches!(self, DayDetail::Present { half_day: true, .. })
    }
}

/// One derived attendance entry; exactly one exists per (employee, date).
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    pub employee_id: String,
    pub date: NaiveDate,
    pub detail: DayDetail,
}

impl AttendanceRecord {
    /// Composite id, stable across rebuilds: `<employee_id>_<yyyy-mm-dd>`.
    pub fn id(&self) -> String {
        record_id(&self.employee_id, self.date)
    }
}

pub fn record_id(employee_id: &str, date: NaiveDate) -> String {
    format!("{}_{}", employee_id, date)
}

/// Flat wire/export shape of an [`AttendanceRecord`], joined with the
/// employee's display name.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "EMP-001_2026-03-02",
        "employee_id": "EMP-001",
        "name": "John Doe",
        "date": "2026-03-02",
        "status": "Present",
        "reason": "working_day",
        "punch_in": "09:30:00",
        "punch_out": "18:30:00",
        "work_hours": 9.0,
        "worked_hours": 8.5,
        "idle_time": 0.5,
        "half_day": false
    })
)]
pub struct AttendanceRow {
    pub id: String,
    pub employee_id: String,
    pub name: String,
    #[schema(example = "2026-03-02", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub status: DayStatus,
    pub reason: StatusReason,
    #[schema(value_type = String, nullable = true)]
    pub punch_in: Option<NaiveTime>,
    #[schema(value_type = String, nullable = true)]
    pub punch_out: Option<NaiveTime>,
    pub work_hours: f64,
    pub worked_hours: f64,
    pub idle_time: f64,
    pub half_day: bool,
}

impl AttendanceRow {
    pub fn from_record(record: &AttendanceRecord, name: &str) -> Self {
        let (punch_in, punch_out, work_hours, worked_hours, idle_time, half_day) =
            match record.detail {
                DayDetail::Present {
                    punch_in,
                    punch_out,
                    work_hours,
                    worked_hours,
                    idle_time,
                    half_day,
                } => (
                    Some(punch_in),
                    Some(punch_out),
                    work_hours,
                    worked_hours,
                    idle_time,
                    half_day,
                ),
                _ => (None, None, 0.0, 0.0, 0.0, false),
            };

        AttendanceRow {
            id: record.id(),
            employee_id: record.employee_id.clone(),
            name: name.to_string(),
            date: record.date,
            status: record.detail.status(),
            reason: record.detail.reason(),
            punch_in,
            punch_out,
            work_hours,
            worked_hours,
            idle_time,
            half_day,
        }
    }
}
