use anyhow::Result;

use crate::model::attendance::AttendanceRow;

/// Downstream tooling depends on this exact column order.
pub const CSV_HEADER: [&str; 6] = ["ID", "Employee ID", "Name", "Date", "Status", "Details"];

/// Renders the (filtered) attendance ledger as CSV.
pub fn attendance_csv(rows: &[AttendanceRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.write_record([
            row.id.as_str(),
            row.employee_id.as_str(),
            row.name.as_str(),
            &row.date.to_string(),
            &row.status.to_string(),
            &row.half_day.to_string(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("finalizing CSV writer: {}", e))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    use crate::model::attendance::{DayStatus, StatusReason};

    fn row(employee_id: &str, date: &str, status: DayStatus) -> AttendanceRow {
        let date: NaiveDate = date.parse().unwrap();
        let present = status == DayStatus::Present;
        AttendanceRow {
            id: format!("{}_{}", employee_id, date),
            employee_id: employee_id.to_string(),
            name: "John Doe".to_string(),
            date,
            status,
            reason: match status {
                DayStatus::Present => StatusReason::WorkingDay,
                DayStatus::Absent => StatusReason::Absent,
                DayStatus::Leave => StatusReason::ApprovedLeave,
                DayStatus::Holiday => StatusReason::Holiday,
            },
            punch_in: present.then(|| NaiveTime::from_hms_opt(9, 30, 0).unwrap()),
            punch_out: present.then(|| NaiveTime::from_hms_opt(18, 30, 0).unwrap()),
            work_hours: if present { 9.0 } else { 0.0 },
            worked_hours: if present { 8.5 } else { 0.0 },
            idle_time: if present { 0.5 } else { 0.0 },
            half_day: false,
        }
    }

    #[test]
    fn header_matches_downstream_contract() {
        let csv = attendance_csv(&[]).unwrap();
        assert_eq!(csv.trim_end(), "ID,Employee ID,Name,Date,Status,Details");
    }

    #[test]
    fn export_round_trips_employee_date_status() {
        let rows = vec![
            row("EMP-001", "2026-03-02", DayStatus::Present),
            row("EMP-001", "2026-03-03", DayStatus::Leave),
            row("EMP-002", "2026-03-02", DayStatus::Holiday),
        ];
        let csv = attendance_csv(&rows).unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        assert_eq!(
            reader.headers().unwrap(),
            &csv::StringRecord::from(CSV_HEADER.to_vec())
        );

        let parsed: Vec<(String, String, String)> = reader
            .records()
            .map(|r| {
                let r = r.unwrap();
                (r[1].to_string(), r[3].to_string(), r[4].to_string())
            })
            .collect();
        let expected: Vec<(String, String, String)> = rows
            .iter()
            .map(|r| {
                (
                    r.employee_id.clone(),
                    r.date.to_string(),
                    r.status.to_string(),
                )
            })
            .collect();
        assert_eq!(parsed, expected);
    }
}
