//! Free-text status normalization.
//!
//! The backend stores task and attendance statuses as whatever text the user
//! typed. Views bucket them into a small closed set by case-insensitive
//! keyword matching. The original string stays on the record and is what
//! gets sent back on edits.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskStatusKey {
    #[serde(rename = "working")]
    Working,
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "onHold")]
    OnHold,
    #[serde(rename = "stuck")]
    Stuck,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "unknown")]
    Unknown,
}

/// Checked in this order; the first list with a hit wins.
const TASK_KEYWORDS: &[(TaskStatusKey, &[&str])] = &[
    (TaskStatusKey::Completed, &["done", "complete", "finished", "closed"]),
    (TaskStatusKey::Stuck, &["stuck", "blocked"]),
    (TaskStatusKey::OnHold, &["hold", "paused"]),
    (
        TaskStatusKey::Pending,
        &["pending", "todo", "to do", "not started", "waiting"],
    ),
    (TaskStatusKey::Working, &["working", "progress", "doing", "active"]),
];

impl TaskStatusKey {
    /// Display order for status buckets and board legends.
    pub const ALL: [TaskStatusKey; 6] = [
        TaskStatusKey::Working,
        TaskStatusKey::Pending,
        TaskStatusKey::OnHold,
        TaskStatusKey::Stuck,
        TaskStatusKey::Completed,
        TaskStatusKey::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Working => "working",
            Self::Pending => "pending",
            Self::OnHold => "onHold",
            Self::Stuck => "stuck",
            Self::Completed => "completed",
            Self::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Working => "Working on it",
            Self::Pending => "Pending",
            Self::OnHold => "On hold",
            Self::Stuck => "Stuck",
            Self::Completed => "Done",
            Self::Unknown => "Unassigned",
        }
    }
}

impl FromStr for TaskStatusKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "working" => Ok(Self::Working),
            "pending" => Ok(Self::Pending),
            "onhold" | "on-hold" | "on_hold" => Ok(Self::OnHold),
            "stuck" => Ok(Self::Stuck),
            "completed" | "done" => Ok(Self::Completed),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("Invalid task status: {}", s)),
        }
    }
}

/// Map backend status text onto a [`TaskStatusKey`].
pub fn normalize_task_status(raw: &str) -> TaskStatusKey {
    let lowered = raw.trim().to_lowercase();
    if lowered.is_empty() {
        return TaskStatusKey::Unknown;
    }
    TASK_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| lowered.contains(w)))
        .map(|(key, _)| *key)
        .unwrap_or(TaskStatusKey::Unknown)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttendanceStatus {
    OnTime,
    Late,
    Absent,
    Unknown,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 4] = [
        AttendanceStatus::OnTime,
        AttendanceStatus::Late,
        AttendanceStatus::Absent,
        AttendanceStatus::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTime => "onTime",
            Self::Late => "late",
            Self::Absent => "absent",
            Self::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OnTime => "On Time",
            Self::Late => "Late",
            Self::Absent => "Absent",
            Self::Unknown => "Unknown",
        }
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_attendance_status(s) {
            AttendanceStatus::Unknown => Err(format!("Invalid attendance status: {}", s)),
            status => Ok(status),
        }
    }
}

pub fn normalize_attendance_status(raw: &str) -> AttendanceStatus {
    let lowered = raw.trim().to_lowercase();
    if lowered.contains("absent") {
        AttendanceStatus::Absent
    } else if lowered.contains("late") {
        AttendanceStatus::Late
    } else if lowered.contains("on time")
        || lowered.contains("ontime")
        || lowered.contains("on_time")
        || lowered.contains("present")
    {
        AttendanceStatus::OnTime
    } else {
        AttendanceStatus::Unknown
    }
}
