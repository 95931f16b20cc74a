//! Shared UI icons.
//!
//! Each icon has a plain-text fallback for terminals without emoji support.

use console::Emoji;

use crate::status::{AttendanceStatus, TaskStatusKey};

// Outcome
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR]");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!]");

// Entities
pub static PERSON: Emoji<'_, '_> = Emoji("👤 ", "");
pub static BOARD: Emoji<'_, '_> = Emoji("📋 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📁 ", "");
pub static DOCUMENT: Emoji<'_, '_> = Emoji("📄 ", "");
pub static CALENDAR: Emoji<'_, '_> = Emoji("📅 ", "");
pub static CLOCK: Emoji<'_, '_> = Emoji("⏱️  ", "[T]");
pub static SEARCH: Emoji<'_, '_> = Emoji("🔎 ", "?");

pub fn task_status(key: TaskStatusKey) -> Emoji<'static, 'static> {
    match key {
        TaskStatusKey::Working => Emoji("🟠 ", "[~]"),
        TaskStatusKey::Pending => Emoji("🟡 ", "[.]"),
        TaskStatusKey::OnHold => Emoji("🟣 ", "[=]"),
        TaskStatusKey::Stuck => Emoji("🔴 ", "[!]"),
        TaskStatusKey::Completed => Emoji("🟢 ", "[x]"),
        TaskStatusKey::Unknown => Emoji("⚪ ", "[ ]"),
    }
}

pub fn attendance_status(status: AttendanceStatus) -> Emoji<'static, 'static> {
    match status {
        AttendanceStatus::OnTime => Emoji("🟢 ", "[ok]"),
        AttendanceStatus::Late => Emoji("🟠 ", "[late]"),
        AttendanceStatus::Absent => Emoji("🔴 ", "[abs]"),
        AttendanceStatus::Unknown => Emoji("⚪ ", "[?]"),
    }
}
