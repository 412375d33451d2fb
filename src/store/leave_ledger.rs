use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::error::Rejection;
use crate::model::leave_request::{
    LeaveCategory, LeaveDayType, LeaveRequest, LeaveStatus,
};

/// Field updates accepted by [`LeaveLedger::update_leave`] (admin edit).
#[derive(Debug, Default, Clone)]
pub struct LeaveUpdate {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub reason: Option<String>,
    pub leave_type: Option<String>,
    pub status: Option<LeaveStatus>,
}

/// Conjunctive filter over the ledger; `month` matches on the `from_date`
/// prefix, e.g. "2026-03".
#[derive(Debug, Default, Clone)]
pub struct LeaveFilter {
    pub employee_id: Option<String>,
    pub month: Option<String>,
    pub status: Option<LeaveStatus>,
    pub leave_type: Option<String>,
}

/// In-memory per-employee leave requests, one source of truth for the
/// derivation engine.
#[derive(Debug, Default)]
pub struct LeaveLedger {
    requests: Vec<LeaveRequest>,
    revision: u64,
}

impl LeaveLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Submits a new request. The paid/unpaid category is decided here, once:
    /// the first paid request in a calendar month stays paid, anything later
    /// in the same month is unpaid. Status starts Pending.
    pub fn apply_leave(
        &mut self,
        employee_id: &str,
        from_date: NaiveDate,
        to_date: NaiveDate,
        reason: &str,
        leave_type: &str,
        half_day_session: Option<&str>,
        today: NaiveDate,
    ) -> Result<LeaveRequest, Rejection> {
        if from_date > to_date {
            return Err(Rejection::InvertedDateRange);
        }

        let leave_day_type = if from_date == to_date && half_day_session.is_some() {
            LeaveDayType::HalfDay
        } else {
            LeaveDayType::FullDay
        };

        let already_paid_this_month = self.requests.iter().any(|r| {
            r.employee_id == employee_id
                && r.leave_category == LeaveCategory::Paid
                && r.from_date.year() == from_date.year()
                && r.from_date.month() == from_date.month()
        });
        let leave_category = if already_paid_this_month {
            LeaveCategory::Unpaid
        } else {
            LeaveCategory::Paid
        };

        let request = LeaveRequest {
            id: Uuid::new_v4().to_string(),
            employee_id: employee_id.to_string(),
            from_date,
            to_date,
            reason: reason.to_string(),
            leave_type: leave_type.to_string(),
            status: LeaveStatus::Pending,
            leave_category,
            leave_day_type,
            applied_on: today,
            decided_on: None,
            decided_by: None,
        };
        self.requests.push(request.clone());
        self.revision += 1;
        Ok(request)
    }

    pub fn approve(
        &mut self,
        id: &str,
        actor: &str,
        today: NaiveDate,
    ) -> Result<LeaveRequest, Rejection> {
        self.decide(id, LeaveStatus::Approved, actor, today)
    }

    pub fn reject(
        &mut self,
        id: &str,
        actor: &str,
        today: NaiveDate,
    ) -> Result<LeaveRequest, Rejection> {
        self.decide(id, LeaveStatus::Rejected, actor, today)
    }

    fn decide(
        &mut self,
        id: &str,
        status: LeaveStatus,
        actor: &str,
        today: NaiveDate,
    ) -> Result<LeaveRequest, Rejection> {
        let request = self
            .requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(Rejection::NotFound("Leave request"))?;
        if request.status != LeaveStatus::Pending {
            return Err(Rejection::NotPending);
        }
        request.status = status;
        request.decided_on = Some(today);
        request.decided_by = Some(actor.to_string());
        let decided = request.clone();
        self.revision += 1;
        Ok(decided)
    }

    pub fn update_leave(&mut self, id: &str, update: LeaveUpdate) -> Result<LeaveRequest, Rejection> {
        let request = self
            .requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(Rejection::NotFound("Leave request"))?;

        let from_date = update.from_date.unwrap_or(request.from_date);
        let to_date = update.to_date.unwrap_or(request.to_date);
        if from_date > to_date {
            return Err(Rejection::InvertedDateRange);
        }
        request.from_date = from_date;
        request.to_date = to_date;
        if let Some(reason) = update.reason {
            request.reason = reason;
        }
        if let Some(leave_type) = update.leave_type {
            request.leave_type = leave_type;
        }
        if let Some(status) = update.status {
            request.status = status;
        }
        let updated = request.clone();
        self.revision += 1;
        Ok(updated)
    }

    pub fn delete_leave(&mut self, id: &str) -> Result<LeaveRequest, Rejection> {
        let idx = self
            .requests
            .iter()
            .position(|r| r.id == id)
            .ok_or(Rejection::NotFound("Leave request"))?;
        let removed = self.requests.remove(idx);
        self.revision += 1;
        Ok(removed)
    }

    pub fn get(&self, id: &str) -> Option<&LeaveRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    pub fn all(&self) -> &[LeaveRequest] {
        &self.requests
    }

    /// Every Approved request for the employee, expanded day by day. Flat and
    /// possibly containing duplicates where requests overlap; callers that
    /// need a set must dedupe.
    pub fn approved_leave_dates(&self, employee_id: &str) -> Vec<NaiveDate> {
        self.requests
            .iter()
            .filter(|r| r.employee_id == employee_id && r.status == LeaveStatus::Approved)
            .flat_map(|r| r.dates())
            .collect()
    }

    pub fn filtered(&self, filter: &LeaveFilter) -> Vec<&LeaveRequest> {
        self.requests
            .iter()
            .filter(|r| {
                filter
                    .employee_id
                    .as_deref()
                    .is_none_or(|e| r.employee_id == e)
                    && filter
                        .month
                        .as_deref()
                        .is_none_or(|m| r.from_date.to_string().starts_with(m))
                    && filter.status.is_none_or(|s| r.status == s)
                    && filter
                        .leave_type
                        .as_deref()
                        .is_none_or(|t| r.leave_type == t)
            })
            .collect()
    }
}
