//! Plain-text renderers for the CLI.
//!
//! Every function returns a `String` so commands decide where it goes and
//! tests can assert on it after stripping ANSI codes.

use std::fmt::Write as _;

use chrono::Datelike;
use console::style;

use crate::models::{
    AttendanceRecord, Board, DashboardSummary, Document, Employee, Pagination, Task, User, Workspace,
};
use crate::ui::icons::{self, BOARD, CALENDAR, DOCUMENT, FOLDER, PERSON};
use crate::views::Group;
use crate::views::attendance::{AttendanceSummary, EmployeeAttendance};
use crate::views::board::BoardColumn;
use crate::views::calendar::{CalendarCell, CalendarRecord, MonthGrid};

const WEEKDAY_HEADER: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Cut to `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

fn group_heading<T>(out: &mut String, group: &Group<T>, show: bool) {
    if show {
        let _ = writeln!(
            out,
            "{} {}",
            style(&group.label).bold().underlined(),
            style(format!("({})", group.items.len())).dim()
        );
    }
}

fn show_headings<T>(groups: &[Group<T>]) -> bool {
    !(groups.len() == 1 && groups[0].key == crate::views::query::ALL_KEY)
}

fn task_line(task: &Task) -> String {
    let key = task.status_key();
    let due = task
        .due_date()
        .map(|d| d.to_string())
        .unwrap_or_else(|| "no date".to_string());
    let mut line = format!(
        "{}#{:<5} {}  {}",
        icons::task_status(key),
        task.id,
        truncate(&task.title, 48),
        style(format!("[{}] due {}", key.label(), due)).dim()
    );
    if let Some(board) = &task.board_name {
        let _ = write!(line, " {}", style(format!("@{}", board)).cyan());
    }
    line
}

pub fn task_groups(groups: &[Group<Task>]) -> String {
    let mut out = String::new();
    let headings = show_headings(groups);
    for group in groups {
        group_heading(&mut out, group, headings);
        for task in &group.items {
            let _ = writeln!(out, "  {}", task_line(task));
        }
        if headings {
            out.push('\n');
        }
    }
    if groups.iter().all(|g| g.items.is_empty()) {
        let _ = writeln!(out, "{}", style("No tasks match.").dim());
    }
    out
}

pub fn board_columns(board_name: &str, columns: &[BoardColumn]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}{}", BOARD, style(board_name).bold());
    for column in columns {
        let id = column
            .id
            .map(|id| format!("#{}", id))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "\n{} {} {}",
            style(&column.name).bold().underlined(),
            style(id).dim(),
            style(format!("({})", column.tasks.len())).dim()
        );
        if column.tasks.is_empty() {
            let _ = writeln!(out, "  {}", style("empty").dim());
        }
        for task in &column.tasks {
            let _ = writeln!(out, "  {}", task_line(task));
        }
    }
    out
}

pub fn employee_groups(groups: &[Group<Employee>]) -> String {
    let mut out = String::new();
    let headings = show_headings(groups);
    for group in groups {
        group_heading(&mut out, group, headings);
        for e in &group.items {
            let _ = writeln!(
                out,
                "  {}{:<28} {:<10} {:<24} {}",
                PERSON,
                truncate(&e.full_name(), 28),
                e.employee_code.as_deref().unwrap_or("-"),
                truncate(e.position.as_deref().unwrap_or("-"), 24),
                style(e.status.as_deref().unwrap_or("")).dim()
            );
        }
        if headings {
            out.push('\n');
        }
    }
    if groups.iter().all(|g| g.items.is_empty()) {
        let _ = writeln!(out, "{}", style("No employees match.").dim());
    }
    out
}

pub fn employee_detail(employee: &Employee) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}{}", PERSON, style(employee.full_name()).bold());
    let rows = [
        ("Code", employee.employee_code.clone()),
        ("Position", employee.position.clone()),
        ("Status", employee.status.clone()),
        ("Email", employee.email.clone()),
        ("Phone", employee.phone.clone()),
        ("Start date", employee.start_date.map(|d| d.to_string())),
    ];
    for (label, value) in rows {
        if let Some(value) = value {
            let _ = writeln!(out, "  {:<11} {}", style(label).dim(), value);
        }
    }
    out
}

pub fn document_groups(groups: &[Group<Document>]) -> String {
    let mut out = String::new();
    let headings = show_headings(groups);
    for group in groups {
        group_heading(&mut out, group, headings);
        for doc in &group.items {
            let uploaded = doc
                .uploaded_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "  {}#{:<5} {:<40} {:<14} {}",
                DOCUMENT,
                doc.id,
                truncate(&doc.title, 40),
                doc.category.as_deref().unwrap_or("-"),
                style(uploaded).dim()
            );
        }
        if headings {
            out.push('\n');
        }
    }
    if groups.iter().all(|g| g.items.is_empty()) {
        let _ = writeln!(out, "{}", style("No documents match.").dim());
    }
    out
}

pub fn workspaces(workspaces: &[Workspace], boards: &[Board]) -> String {
    let mut out = String::new();
    for ws in workspaces {
        let _ = writeln!(out, "{}{} {}", FOLDER, style(&ws.name).bold(), style(format!("#{}", ws.id)).dim());
        let mut any = false;
        for board in boards.iter().filter(|b| b.workspace_id == ws.id) {
            any = true;
            let _ = writeln!(
                out,
                "  {}#{:<5} {} {}",
                BOARD,
                board.id,
                board.name,
                style(format!("{} members", board.member_count)).dim()
            );
        }
        if !any {
            let _ = writeln!(out, "  {}", style("no boards").dim());
        }
    }
    if workspaces.is_empty() {
        let _ = writeln!(out, "{}", style("No workspaces yet.").dim());
    }
    out
}

/// Monday-first month grid; each cell shows the day and its record count.
pub fn month_grid<T: CalendarRecord>(grid: &MonthGrid<'_, T>, title: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}{}", CALENDAR, style(title).bold());
    let header: Vec<String> = WEEKDAY_HEADER.iter().map(|d| format!("{:<8}", d)).collect();
    let _ = writeln!(out, "{}", style(header.concat()).dim());
    for week in grid.weeks() {
        let mut line = String::new();
        for cell in week {
            let count = cell.records.len();
            let text = if count > 0 {
                format!("{:02}·{:<4}", cell.date.day(), count)
            } else {
                format!("{:02}     ", cell.date.day())
            };
            let text = format!("{:<8}", text);
            let styled = if cell.is_today {
                style(text).reverse().to_string()
            } else if !cell.is_current_month {
                style(text).dim().to_string()
            } else if count > 0 {
                style(text).cyan().to_string()
            } else {
                text
            };
            line.push_str(&styled);
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

/// One line per day of a week strip with per-status counts.
pub fn week_strip<T: CalendarRecord>(cells: &[CalendarCell<'_, T>]) -> String {
    let mut out = String::new();
    if let (Some(first), Some(last)) = (cells.first(), cells.last()) {
        let _ = writeln!(
            out,
            "{}{}",
            CALENDAR,
            style(format!("Week of {} to {}", first.date.format("%Y-%m-%d"), last.date.format("%Y-%m-%d"))).bold()
        );
    }
    for cell in cells {
        let day = format!("{} {:02}", cell.date.format("%a"), cell.date.day());
        let day = if cell.is_today {
            style(day).reverse().to_string()
        } else {
            day
        };
        if cell.records.is_empty() {
            let _ = writeln!(out, "  {}  {}", day, style("-").dim());
            continue;
        }
        let counts: Vec<String> = cell
            .status_counts
            .iter()
            .map(|(status, n)| format!("{} {}", status, n))
            .collect();
        let _ = writeln!(out, "  {}  {} ({})", day, cell.records.len(), counts.join(", "));
    }
    out
}

pub fn attendance_summary(summary: &AttendanceSummary) -> String {
    let punctuality = summary
        .punctuality()
        .map(|p| format!("{:.1}%", p))
        .unwrap_or_else(|| "n/a".to_string());
    format!(
        "{} records: {} on time, {} late, {} absent{}  punctuality {}  late {} min  overtime {} min\n",
        summary.total,
        style(summary.on_time).green(),
        style(summary.late).yellow(),
        style(summary.absent).red(),
        if summary.unknown > 0 {
            format!(", {} unknown", summary.unknown)
        } else {
            String::new()
        },
        punctuality,
        summary.total_minutes_late,
        summary.total_overtime_minutes
    )
}

pub fn attendance_records(records: &[AttendanceRecord]) -> String {
    let mut out = String::new();
    for r in records {
        let status = r.status_key();
        let _ = writeln!(
            out,
            "  {}{:<10} {:<24} {:<8} {}",
            icons::attendance_status(status),
            r.date.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
            truncate(r.employee_name.as_deref().unwrap_or("Unknown"), 24),
            status.label(),
            style(format!("late {}m  ot {}m", r.minutes_late, r.overtime_minutes)).dim()
        );
    }
    if records.is_empty() {
        let _ = writeln!(out, "{}", style("No attendance records.").dim());
    }
    out
}

pub fn attendance_by_employee(rows: &[EmployeeAttendance]) -> String {
    let mut out = String::new();
    for row in rows {
        let _ = write!(out, "  {}{:<24} ", PERSON, truncate(&row.employee_name, 24));
        out.push_str(&attendance_summary(&row.summary));
    }
    out
}

pub fn dashboard(summary: &DashboardSummary) -> String {
    let mut out = String::new();
    let rows = [
        ("Employees", summary.total_employees),
        ("Present today", summary.present_today),
        ("Late today", summary.late_today),
        ("Absent today", summary.absent_today),
        ("Open tasks", summary.open_tasks),
        ("Documents", summary.documents),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "  {:<14} {}", style(label).dim(), style(value).bold());
    }
    out
}

pub fn user(user: &User) -> String {
    let mut out = format!("{}{}", PERSON, style(&user.name).bold());
    if let Some(email) = &user.email {
        let _ = write!(out, " <{}>", email);
    }
    if let Some(role) = &user.role {
        let _ = write!(out, " {}", style(format!("({})", role)).dim());
    }
    out
}

pub fn pagination(p: &Pagination) -> String {
    format!(
        "{}",
        style(format!("page {}/{} · {} total", p.page, p.total_pages.max(1), p.total)).dim()
    )
}
