//! Records exchanged with the backend and the payloads sent to it.
//!
//! The backend owns every entity here; the client only holds transient
//! copies. Field names follow the backend's snake_case JSON except where the
//! backend itself uses camelCase (pagination).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::status::{
    AttendanceStatus, TaskStatusKey, normalize_attendance_status, normalize_task_status,
};

pub type Id = i64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub id: Id,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub employee_code: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    /// Employment status ("Active", "On Leave", ...).
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, with = "lenient_date")]
    pub date_of_birth: Option<NaiveDate>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        match self.last_name.as_deref().map(str::trim) {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name.trim(), last),
            _ => self.first_name.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workspace {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Board {
    pub id: Id,
    pub workspace_id: Id,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub member_count: u32,
    #[serde(default)]
    pub created_by: Option<Id>,
    #[serde(default)]
    pub creator_name: Option<String>,
    #[serde(default, with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardMember {
    pub user_id: Id,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusGroup {
    pub id: Id,
    pub board_id: Id,
    pub name: String,
    #[serde(default)]
    pub position: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: Id,
    pub board_id: Id,
    /// Present on cross-board listings (`/tasks/overview`).
    #[serde(default)]
    pub board_name: Option<String>,
    #[serde(default)]
    pub status_group_id: Option<Id>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub assignee_ids: Vec<Id>,
    #[serde(default, with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "lenient_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub task_group: Option<String>,
    #[serde(default, with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn status_key(&self) -> TaskStatusKey {
        self.status
            .as_deref()
            .map(normalize_task_status)
            .unwrap_or(TaskStatusKey::Unknown)
    }

    /// Planned end date, or the start date for single-day tasks.
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.end_date.or(self.start_date)
    }

    /// Inclusive planned span, normalized so that start <= end.
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.start_date.or(self.end_date)?;
        let end = self.end_date.unwrap_or(start);
        Some((start.min(end), start.max(end)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceRecord {
    pub employee_id: Id,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default, with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub minutes_late: u32,
    #[serde(default)]
    pub overtime_minutes: u32,
}

impl AttendanceRecord {
    pub fn status_key(&self) -> AttendanceStatus {
        normalize_attendance_status(&self.status)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default, with = "lenient_timestamp")]
    pub uploaded_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    #[serde(default)]
    pub total_employees: u64,
    #[serde(default)]
    pub present_today: u64,
    #[serde(default)]
    pub late_today: u64,
    #[serde(default)]
    pub absent_today: u64,
    #[serde(default)]
    pub open_tasks: u64,
    #[serde(default)]
    pub documents: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
    #[serde(default)]
    pub has_next: bool,
}

// ── Request payloads ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewTask {
    pub board_id: Id,
    pub status_group_id: Id,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub assignee_ids: Vec<Id>,
    #[serde(skip_serializing_if = "Option::is_none", with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", with = "lenient_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_group: Option<String>,
}

/// Partial update; only the fields that are `Some` are sent.
///
/// Clearable fields are doubly optional: `Some(None)` is sent as `null`
/// so the backend drops the stored value.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_group_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_ids: Option<Vec<Id>>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "clearable_date::serialize")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "clearable_date::serialize")]
    pub end_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_group: Option<Option<String>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewBoard {
    pub workspace_id: Id,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct BoardPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewWorkspace {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewStatusGroup {
    pub name: String,
    pub position: i32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MemberRequest {
    pub user_id: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewDocument {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub file_url: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DocumentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewEmployee {
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
}

// ── Query strings ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "pageSize")]
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct AttendanceQuery {
    /// `YYYY-MM`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<Id>,
}

// ── Lenient date handling ─────────────────────────────────────────────

/// Parse `YYYY-MM-DD` or an RFC 3339 timestamp (date part kept).
/// Blank input is "no date".
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    parse_date(raw)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub(crate) mod lenient_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(super::parse_date))
    }

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_some(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }
}

/// Serializer for clearable patch dates; `Some(None)` becomes `null`.
pub(crate) mod clearable_date {
    use chrono::NaiveDate;
    use serde::Serializer;

    pub fn serialize<S>(value: &Option<Option<NaiveDate>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        super::lenient_date::serialize(&value.flatten(), serializer)
    }
}

pub(crate) mod lenient_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(super::parse_timestamp))
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_some(&ts.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }
}
