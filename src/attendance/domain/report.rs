//! CSV exports of attendance.

use super::{AttendanceRecord, AttendanceSummary};

const SUMMARY_HEADERS: [&str; 7] = [
    "User Name",
    "Total Days",
    "Present",
    "Absent",
    "Leave",
    "WFH",
    "Attendance %",
];
const PERSONAL_HEADERS: [&str; 3] = ["Date", "Status", "Remarks"];

/// Renders the team summary, one row per member in the given order.
#[must_use]
pub fn summary_report_csv(summaries: &[AttendanceSummary]) -> String {
    let rows = summaries.iter().map(|summary| {
        vec![
            summary.user_name.clone(),
            summary.total_days.to_string(),
            summary.present_days.to_string(),
            summary.absent_days.to_string(),
            summary.leave_days.to_string(),
            summary.wfh_days.to_string(),
            summary.attendance_percentage.to_string(),
        ]
    });
    render(&SUMMARY_HEADERS, rows)
}

/// Renders one member's days in the given order.
#[must_use]
pub fn personal_report_csv(records: &[AttendanceRecord]) -> String {
    let rows = records.iter().map(|record| {
        vec![
            record.date().to_string(),
            record.status().to_string(),
            record.remarks().unwrap_or_default().to_owned(),
        ]
    });
    render(&PERSONAL_HEADERS, rows)
}

fn render(headers: &[&str], rows: impl Iterator<Item = Vec<String>>) -> String {
    let mut lines = vec![headers.join(",")];
    lines.extend(rows.map(|row| {
        row.iter()
            .map(|field| escape(field))
            .collect::<Vec<_>>()
            .join(",")
    }));
    lines.join("\n")
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}
