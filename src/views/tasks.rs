//! "All Tasks" list: search, status filter, sort and grouping over a
//! cross-board task listing.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};

use super::query::{
    BucketSpec, Group, SearchTerm, SortDirection, compare_missing_last, compare_optional_text,
    compare_text, partition,
};
use crate::models::{Id, Task};
use crate::status::TaskStatusKey;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskSortField {
    #[default]
    DueDate,
    Title,
    Board,
    Status,
    Updated,
}

impl FromStr for TaskSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "due" | "due_date" | "date" => Ok(Self::DueDate),
            "title" | "name" => Ok(Self::Title),
            "board" => Ok(Self::Board),
            "status" => Ok(Self::Status),
            "updated" | "updated_at" => Ok(Self::Updated),
            _ => Err(format!("Invalid task sort field: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskGroupMode {
    #[default]
    None,
    Status,
    Board,
    DueDate,
}

impl FromStr for TaskGroupMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "status" => Ok(Self::Status),
            "board" => Ok(Self::Board),
            "due" | "due_date" | "date" => Ok(Self::DueDate),
            _ => Err(format!("Invalid task grouping: {}", s)),
        }
    }
}

/// Due-date buckets, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueBucket {
    Overdue,
    Today,
    ThisWeek,
    Later,
    NoDate,
}

impl DueBucket {
    pub const ALL: [DueBucket; 5] = [
        DueBucket::Overdue,
        DueBucket::Today,
        DueBucket::ThisWeek,
        DueBucket::Later,
        DueBucket::NoDate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::Today => "today",
            Self::ThisWeek => "this_week",
            Self::Later => "later",
            Self::NoDate => "no_date",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Overdue => "Overdue",
            Self::Today => "Today",
            Self::ThisWeek => "This week",
            Self::Later => "Later",
            Self::NoDate => "No date",
        }
    }

    /// The current week ends on Sunday.
    pub fn classify(due: Option<NaiveDate>, today: NaiveDate) -> Self {
        let Some(due) = due else {
            return Self::NoDate;
        };
        let week_end = today + Duration::days(6 - i64::from(today.weekday().num_days_from_monday()));
        if due < today {
            Self::Overdue
        } else if due == today {
            Self::Today
        } else if due <= week_end {
            Self::ThisWeek
        } else {
            Self::Later
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub search: SearchTerm,
    pub status: Option<TaskStatusKey>,
    pub board_id: Option<Id>,
    pub sort: TaskSortField,
    pub direction: SortDirection,
    pub group: TaskGroupMode,
}

/// Searched fields: title, board name, task group.
pub fn matches_search(task: &Task, search: &SearchTerm) -> bool {
    search.matches([
        Some(task.title.as_str()),
        task.board_name.as_deref(),
        task.task_group.as_deref(),
    ])
}

fn compare_tasks(a: &Task, b: &Task, field: TaskSortField, direction: SortDirection) -> Ordering {
    match field {
        // Undated tasks stay at the bottom when ascending.
        TaskSortField::DueDate => direction.apply(compare_missing_last(a.due_date(), b.due_date())),
        TaskSortField::Title => direction.apply(compare_text(&a.title, &b.title)),
        TaskSortField::Board => direction.apply(compare_optional_text(
            a.board_name.as_deref(),
            b.board_name.as_deref(),
        )),
        TaskSortField::Status => direction.apply(a.status_key().cmp(&b.status_key())),
        TaskSortField::Updated => direction.apply(compare_missing_last(a.updated_at, b.updated_at)),
    }
}

/// Filter and sort without grouping.
pub fn filter_and_sort(tasks: &[Task], filter: &TaskFilter) -> Vec<Task> {
    let mut visible: Vec<Task> = tasks
        .iter()
        .filter(|t| matches_search(t, &filter.search))
        .filter(|t| filter.status.is_none_or(|s| t.status_key() == s))
        .filter(|t| filter.board_id.is_none_or(|b| t.board_id == b))
        .cloned()
        .collect();
    // sort_by is stable, so equal keys keep backend order
    visible.sort_by(|a, b| compare_tasks(a, b, filter.sort, filter.direction));
    visible
}

/// Full projection for the All Tasks view.
pub fn derive_task_list(tasks: &[Task], filter: &TaskFilter, today: NaiveDate) -> Vec<Group<Task>> {
    let visible = filter_and_sort(tasks, filter);
    match filter.group {
        TaskGroupMode::None => vec![Group::all(visible)],
        TaskGroupMode::Status => group_by_status(visible),
        TaskGroupMode::Board => group_by_board(visible),
        TaskGroupMode::DueDate => group_by_due_date(visible, today),
    }
}

pub fn group_by_status(tasks: Vec<Task>) -> Vec<Group<Task>> {
    let order: Vec<BucketSpec> = TaskStatusKey::ALL
        .iter()
        .map(|k| (k.as_str().to_string(), k.label().to_string()))
        .collect();
    partition(tasks, &order, |t| t.status_key().as_str().to_string())
}

pub fn group_by_due_date(tasks: Vec<Task>, today: NaiveDate) -> Vec<Group<Task>> {
    let order: Vec<BucketSpec> = DueBucket::ALL
        .iter()
        .map(|b| (b.as_str().to_string(), b.label().to_string()))
        .collect();
    partition(tasks, &order, |t| {
        DueBucket::classify(t.due_date(), today).as_str().to_string()
    })
}

/// Boards ordered by name; the label falls back to the board id.
pub fn group_by_board(tasks: Vec<Task>) -> Vec<Group<Task>> {
    let mut boards: Vec<(Id, String)> = Vec::new();
    for task in &tasks {
        if !boards.iter().any(|(id, _)| *id == task.board_id) {
            boards.push((task.board_id, board_label(task)));
        }
    }
    boards.sort_by(|a, b| compare_text(&a.1, &b.1).then(a.0.cmp(&b.0)));
    let order: Vec<BucketSpec> = boards
        .into_iter()
        .map(|(id, label)| (id.to_string(), label))
        .collect();
    partition(tasks, &order, |t| t.board_id.to_string())
}

fn board_label(task: &Task) -> String {
    match task.board_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("Board {}", task.board_id),
    }
}
