//! Time tracking: attendance filtering, sorting, totals and per-employee
//! rollups, plus merging of independently fetched months.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::Serialize;

use super::query::{SearchTerm, SortDirection, compare_missing_last, compare_optional_text};
use crate::models::{AttendanceRecord, Id};
use crate::status::AttendanceStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AttendanceSortField {
    #[default]
    Date,
    Employee,
    MinutesLate,
    Overtime,
}

impl FromStr for AttendanceSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "employee" | "name" => Ok(Self::Employee),
            "late" | "minutes_late" => Ok(Self::MinutesLate),
            "overtime" | "overtime_minutes" => Ok(Self::Overtime),
            _ => Err(format!("Invalid attendance sort field: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    pub search: SearchTerm,
    pub status: Option<AttendanceStatus>,
    pub sort: AttendanceSortField,
    pub direction: SortDirection,
}

fn compare(a: &AttendanceRecord, b: &AttendanceRecord, field: AttendanceSortField) -> Ordering {
    match field {
        AttendanceSortField::Date => compare_missing_last(a.date, b.date),
        AttendanceSortField::Employee => {
            compare_optional_text(a.employee_name.as_deref(), b.employee_name.as_deref())
                .then(a.employee_id.cmp(&b.employee_id))
        }
        AttendanceSortField::MinutesLate => a.minutes_late.cmp(&b.minutes_late),
        AttendanceSortField::Overtime => a.overtime_minutes.cmp(&b.overtime_minutes),
    }
}

pub fn filter_and_sort(records: &[AttendanceRecord], filter: &AttendanceFilter) -> Vec<AttendanceRecord> {
    let mut visible: Vec<AttendanceRecord> = records
        .iter()
        .filter(|r| filter.search.matches([r.employee_name.as_deref()]))
        .filter(|r| filter.status.is_none_or(|s| r.status_key() == s))
        .cloned()
        .collect();
    visible.sort_by(|a, b| filter.direction.apply(compare(a, b, filter.sort)));
    visible
}

/// Concatenate per-month result sets. No de-duplication: the backend
/// already returns disjoint months.
pub fn merge_months(months: Vec<Vec<AttendanceRecord>>) -> Vec<AttendanceRecord> {
    months.into_iter().flatten().collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceSummary {
    pub total: usize,
    pub on_time: usize,
    pub late: usize,
    pub absent: usize,
    pub unknown: usize,
    pub total_minutes_late: u64,
    pub total_overtime_minutes: u64,
}

impl AttendanceSummary {
    fn add(&mut self, record: &AttendanceRecord) {
        self.total += 1;
        match record.status_key() {
            AttendanceStatus::OnTime => self.on_time += 1,
            AttendanceStatus::Late => self.late += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::Unknown => self.unknown += 1,
        }
        self.total_minutes_late += u64::from(record.minutes_late);
        self.total_overtime_minutes += u64::from(record.overtime_minutes);
    }

    /// Share of records that were on time, as a percentage.
    pub fn punctuality(&self) -> Option<f64> {
        let counted = self.on_time + self.late;
        (counted > 0).then(|| self.on_time as f64 * 100.0 / counted as f64)
    }
}

pub fn summarize(records: &[AttendanceRecord]) -> AttendanceSummary {
    let mut summary = AttendanceSummary::default();
    for record in records {
        summary.add(record);
    }
    summary
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeAttendance {
    pub employee_id: Id,
    pub employee_name: String,
    pub summary: AttendanceSummary,
}

/// Per-employee totals in order of first appearance.
pub fn by_employee(records: &[AttendanceRecord]) -> Vec<EmployeeAttendance> {
    let mut rows: Vec<EmployeeAttendance> = Vec::new();
    for record in records {
        let row = match rows.iter().position(|r| r.employee_id == record.employee_id) {
            Some(idx) => &mut rows[idx],
            None => {
                rows.push(EmployeeAttendance {
                    employee_id: record.employee_id,
                    employee_name: record
                        .employee_name
                        .clone()
                        .unwrap_or_else(|| format!("Employee {}", record.employee_id)),
                    summary: AttendanceSummary::default(),
                });
                let last = rows.len() - 1;
                &mut rows[last]
            }
        };
        row.summary.add(record);
    }
    rows
}
