//! Calendar aggregation: month grids and week strips of dated records.
//!
//! Weeks start on Monday. A month grid is always 6×7 cells; days spilling
//! in from the neighbouring months are flagged `is_current_month = false`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::Serialize;

use crate::models::{AttendanceRecord, Task};

pub const GRID_CELLS: usize = 42;

/// Years a `YearMonth` may name; four digits on the wire.
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

/// A calendar month, `YYYY-MM` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !YEAR_RANGE.contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first_day()
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The `count` months ending with `self`, oldest first.
    pub fn trailing(&self, count: usize) -> Vec<YearMonth> {
        let mut months = Vec::with_capacity(count);
        let mut cursor = *self;
        for _ in 0..count {
            months.push(cursor);
            cursor = cursor.prev();
        }
        months.reverse();
        months
    }

    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("Invalid month '{}': expected YYYY-MM", s))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("Invalid year in '{}'", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("Invalid month in '{}'", s))?;
        YearMonth::new(year, month).ok_or_else(|| {
            format!(
                "Invalid month '{}': year must be {}..={}",
                s,
                YEAR_RANGE.start(),
                YEAR_RANGE.end()
            )
        })
    }
}

/// Anything that can be placed on a calendar.
pub trait CalendarRecord {
    /// Inclusive date span, or `None` for undated records.
    fn span(&self) -> Option<(NaiveDate, NaiveDate)>;
    fn status_key(&self) -> &'static str;
}

impl CalendarRecord for Task {
    fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        Task::span(self)
    }

    fn status_key(&self) -> &'static str {
        Task::status_key(self).as_str()
    }
}

impl CalendarRecord for AttendanceRecord {
    fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.date.map(|d| (d, d))
    }

    fn status_key(&self) -> &'static str {
        AttendanceRecord::status_key(self).as_str()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarCell<'a, T> {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
    pub records: Vec<&'a T>,
    pub status_counts: BTreeMap<&'static str, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthGrid<'a, T> {
    pub month: String,
    pub cells: Vec<CalendarCell<'a, T>>,
}

impl<'a, T> MonthGrid<'a, T> {
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell<'a, T>]> {
        self.cells.chunks(7)
    }
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.checked_sub_signed(Duration::days(i64::from(date.weekday().num_days_from_monday())))
        .unwrap_or(NaiveDate::MIN)
}

/// `count` consecutive days from `start`, stopping at the end of the
/// representable calendar.
fn days_from(start: NaiveDate, count: i64) -> impl Iterator<Item = NaiveDate> {
    (0..count).map_while(move |offset| start.checked_add_signed(Duration::days(offset)))
}

fn build_cell<'a, T: CalendarRecord>(
    records: &'a [T],
    date: NaiveDate,
    month: Option<YearMonth>,
    today: NaiveDate,
) -> CalendarCell<'a, T> {
    let matching: Vec<&T> = records
        .iter()
        .filter(|r| r.span().is_some_and(|(start, end)| start <= date && date <= end))
        .collect();
    let mut status_counts = BTreeMap::new();
    for record in &matching {
        *status_counts.entry(record.status_key()).or_insert(0) += 1;
    }
    CalendarCell {
        date,
        is_current_month: month.is_none_or(|m| m.contains(date)),
        is_today: date == today,
        records: matching,
        status_counts,
    }
}

/// Build the 42-cell Monday-first grid for `month`.
pub fn month_grid<'a, T: CalendarRecord>(
    records: &'a [T],
    month: YearMonth,
    today: NaiveDate,
) -> MonthGrid<'a, T> {
    let start = week_start(month.first_day());
    let cells = days_from(start, GRID_CELLS as i64)
        .map(|date| build_cell(records, date, Some(month), today))
        .collect();
    MonthGrid {
        month: month.to_string(),
        cells,
    }
}

/// The Monday..Sunday strip containing `anchor`.
pub fn week_days<'a, T: CalendarRecord>(
    records: &'a [T],
    anchor: NaiveDate,
    today: NaiveDate,
) -> Vec<CalendarCell<'a, T>> {
    let start = week_start(anchor);
    days_from(start, 7)
        .map(|date| build_cell(records, date, None, today))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn day(s: &str) -> NaiveDate {
        crate::models::parse_date(s).unwrap()
    }

    fn attendance(date: &str, status: &str) -> AttendanceRecord {
        AttendanceRecord {
            employee_id: 1,
            employee_name: Some("Ada".into()),
            date: Some(day(date)),
            status: status.into(),
            minutes_late: 0,
            overtime_minutes: 0,
        }
    }

    #[test]
    fn every_month_grid_is_42_cells_monday_first() {
        let mut month = YearMonth::new(2023, 1).unwrap();
        for _ in 0..30 {
            let grid = month_grid::<AttendanceRecord>(&[], month, day("2024-01-01"));
            assert_eq!(grid.cells.len(), GRID_CELLS);
            assert_eq!(grid.cells[0].date.weekday(), Weekday::Mon);

            let in_month: Vec<NaiveDate> = grid
                .cells
                .iter()
                .filter(|c| c.is_current_month)
                .map(|c| c.date)
                .collect();
            let days_in_month = month.last_day().day() as usize;
            assert_eq!(in_month.len(), days_in_month);
            assert_eq!(in_month.first(), Some(&month.first_day()));
            assert_eq!(in_month.last(), Some(&month.last_day()));
            month = month.next();
        }
    }

    #[test]
    fn leading_days_come_from_previous_month() {
        // 2024-05-01 is a Wednesday
        let grid = month_grid::<AttendanceRecord>(&[], YearMonth::new(2024, 5).unwrap(), day("2024-05-20"));
        assert_eq!(grid.cells[0].date, day("2024-04-29"));
        assert!(!grid.cells[0].is_current_month);
        assert!(grid.cells[2].is_current_month);
        let today: Vec<&CalendarCell<'_, AttendanceRecord>> =
            grid.cells.iter().filter(|c| c.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, day("2024-05-20"));
    }

    #[test]
    fn cells_count_statuses() {
        let records = vec![
            attendance("2024-05-02", "On Time"),
            attendance("2024-05-02", "Late"),
            attendance("2024-05-02", "Late"),
            attendance("2024-05-03", "Absent"),
        ];
        let grid = month_grid(&records, YearMonth::new(2024, 5).unwrap(), day("2024-05-20"));
        let cell = grid.cells.iter().find(|c| c.date == day("2024-05-02")).unwrap();
        assert_eq!(cell.records.len(), 3);
        assert_eq!(cell.status_counts.get("late"), Some(&2));
        assert_eq!(cell.status_counts.get("onTime"), Some(&1));
        assert_eq!(cell.status_counts.get("absent"), None);
    }

    #[test]
    fn multi_day_task_covers_each_day() {
        let task: Task = serde_json::from_value(serde_json::json!({
            "id": 1, "board_id": 1, "title": "Audit",
            "start_date": "2024-05-06", "end_date": "2024-05-08", "status": "Stuck"
        }))
        .unwrap();
        let tasks = vec![task];
        let week = week_days(&tasks, day("2024-05-09"), day("2024-05-09"));
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, day("2024-05-06"));
        let covered: Vec<usize> = week.iter().map(|c| c.records.len()).collect();
        assert_eq!(covered, vec![1, 1, 1, 0, 0, 0, 0]);
        assert_eq!(week[1].status_counts.get("stuck"), Some(&1));
        assert!(week[3].is_today);
    }

    #[test]
    fn year_month_parses_and_steps() {
        let m: YearMonth = "2024-12".parse().unwrap();
        assert_eq!(m.next().to_string(), "2025-01");
        assert_eq!(m.prev().to_string(), "2024-11");
        assert_eq!(m.last_day(), day("2024-12-31"));
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("202412".parse::<YearMonth>().is_err());
    }

    #[test]
    fn year_month_rejects_years_outside_four_digits() {
        let err = "262142-12".parse::<YearMonth>().unwrap_err();
        assert!(err.contains("1..=9999"), "{}", err);
        assert!(YearMonth::new(0, 1).is_none());
        assert!(YearMonth::new(10000, 1).is_none());

        let last = YearMonth::new(9999, 12).unwrap();
        assert_eq!(last.last_day(), day("9999-12-31"));
        let grid = month_grid::<AttendanceRecord>(&[], last, day("2024-01-01"));
        assert_eq!(grid.cells.len(), GRID_CELLS);
    }

    #[test]
    fn grids_at_the_edge_of_the_calendar_do_not_overflow() {
        let edge = YearMonth::of(NaiveDate::MAX);
        assert_eq!(edge.last_day(), NaiveDate::MAX);
        let grid = month_grid::<AttendanceRecord>(&[], edge, day("2024-01-01"));
        assert!(grid.cells.len() < GRID_CELLS);
        assert_eq!(grid.cells.last().map(|c| c.date), Some(NaiveDate::MAX));

        let week = week_days::<AttendanceRecord>(&[], NaiveDate::MAX, day("2024-01-01"));
        assert!(!week.is_empty() && week.len() <= 7);
        let week = week_days::<AttendanceRecord>(&[], NaiveDate::MIN, day("2024-01-01"));
        assert!(!week.is_empty());
    }

    #[test]
    fn trailing_months_are_oldest_first() {
        let m = YearMonth::new(2024, 2).unwrap();
        let months: Vec<String> = m.trailing(3).iter().map(ToString::to_string).collect();
        assert_eq!(months, vec!["2023-12", "2024-01", "2024-02"]);
    }
}
