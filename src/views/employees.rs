//! Employee directory: search, employment-status filter and sorting.

use std::cmp::Ordering;
use std::str::FromStr;

use super::query::{
    BucketSpec, Group, SearchTerm, SortDirection, compare_missing_last, compare_optional_text,
    compare_text, fold_case, partition, same_text,
};
use crate::models::Employee;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmployeeSortField {
    #[default]
    Name,
    Code,
    Position,
    StartDate,
}

impl FromStr for EmployeeSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "code" | "employee_code" => Ok(Self::Code),
            "position" => Ok(Self::Position),
            "start" | "start_date" => Ok(Self::StartDate),
            _ => Err(format!("Invalid employee sort field: {}", s)),
        }
    }
}

impl EmployeeSortField {
    /// Name of the sort key in the backend's query string.
    pub fn query_name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Code => "employee_code",
            Self::Position => "position",
            Self::StartDate => "start_date",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    pub search: SearchTerm,
    /// Employment status, compared case-insensitively.
    pub status: Option<String>,
    pub sort: EmployeeSortField,
    pub direction: SortDirection,
    pub group_by_status: bool,
}

pub fn matches_search(employee: &Employee, search: &SearchTerm) -> bool {
    let full_name = employee.full_name();
    search.matches([
        Some(full_name.as_str()),
        employee.employee_code.as_deref(),
        employee.position.as_deref(),
        employee.email.as_deref(),
    ])
}

fn compare(a: &Employee, b: &Employee, field: EmployeeSortField) -> Ordering {
    match field {
        EmployeeSortField::Name => compare_text(&a.full_name(), &b.full_name()),
        EmployeeSortField::Code => {
            compare_optional_text(a.employee_code.as_deref(), b.employee_code.as_deref())
        }
        EmployeeSortField::Position => {
            compare_optional_text(a.position.as_deref(), b.position.as_deref())
        }
        EmployeeSortField::StartDate => compare_missing_last(a.start_date, b.start_date),
    }
}

pub fn filter_and_sort(employees: &[Employee], filter: &EmployeeFilter) -> Vec<Employee> {
    let wanted_status = filter
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(fold_case);
    let mut visible: Vec<Employee> = employees
        .iter()
        .filter(|e| matches_search(e, &filter.search))
        .filter(|e| match &wanted_status {
            Some(wanted) => e
                .status
                .as_deref()
                .is_some_and(|s| fold_case(s.trim()) == *wanted),
            None => true,
        })
        .cloned()
        .collect();
    visible.sort_by(|a, b| filter.direction.apply(compare(a, b, filter.sort)));
    visible
}

pub fn derive_employee_list(employees: &[Employee], filter: &EmployeeFilter) -> Vec<Group<Employee>> {
    let visible = filter_and_sort(employees, filter);
    if !filter.group_by_status {
        return vec![Group::all(visible)];
    }
    let order: Vec<BucketSpec> = distinct_statuses(&visible)
        .into_iter()
        .map(|s| (fold_case(&s), s))
        .collect();
    partition(visible, &order, |e| status_key(e))
}

fn status_key(employee: &Employee) -> String {
    match employee.status.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => fold_case(s),
        _ => "unspecified".to_string(),
    }
}

/// Distinct employment statuses for the filter picker, sorted, blanks
/// excluded. The first spelling seen wins.
pub fn distinct_statuses(employees: &[Employee]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for status in employees.iter().filter_map(|e| e.status.as_deref()) {
        let status = status.trim();
        if !status.is_empty() && !seen.iter().any(|s| same_text(s, status)) {
            seen.push(status.to_string());
        }
    }
    seen.sort_by(|a, b| compare_text(a, b));
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: i64, first: &str, last: &str, status: &str) -> Employee {
        Employee {
            id,
            first_name: first.into(),
            last_name: Some(last.into()),
            employee_code: Some(format!("EMP-{:03}", id)),
            position: Some("Analyst".into()),
            status: Some(status.into()),
            email: Some(format!("{}@example.com", first.to_lowercase())),
            phone: None,
            start_date: None,
            gender: None,
            date_of_birth: None,
        }
    }

    #[test]
    fn search_matches_full_name_and_code() {
        let list = vec![
            employee(1, "Ada", "Lovelace", "Active"),
            employee(2, "Alan", "Turing", "Active"),
        ];
        let by_name = EmployeeFilter {
            search: SearchTerm::new("ada love"),
            ..Default::default()
        };
        assert_eq!(filter_and_sort(&list, &by_name).len(), 1);
        let by_code = EmployeeFilter {
            search: SearchTerm::new("emp-002"),
            ..Default::default()
        };
        assert_eq!(filter_and_sort(&list, &by_code)[0].id, 2);
    }

    #[test]
    fn status_filter_is_case_insensitive() {
        let list = vec![
            employee(1, "Ada", "Lovelace", "Active"),
            employee(2, "Alan", "Turing", "On Leave"),
        ];
        let filter = EmployeeFilter {
            status: Some("on leave".into()),
            ..Default::default()
        };
        let visible = filter_and_sort(&list, &filter);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 2);
    }

    #[test]
    fn sorts_by_name_descending() {
        let list = vec![
            employee(1, "Ada", "Lovelace", "Active"),
            employee(2, "grace", "Hopper", "Active"),
            employee(3, "Alan", "Turing", "Active"),
        ];
        let filter = EmployeeFilter {
            direction: SortDirection::Desc,
            ..Default::default()
        };
        let ids: Vec<i64> = filter_and_sort(&list, &filter).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn groups_by_status() {
        let list = vec![
            employee(1, "Ada", "Lovelace", "Active"),
            employee(2, "Alan", "Turing", "On Leave"),
            employee(3, "Grace", "Hopper", "active"),
        ];
        let filter = EmployeeFilter {
            group_by_status: true,
            ..Default::default()
        };
        let groups = derive_employee_list(&list, &filter);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "Active");
        assert_eq!(groups[0].items.len(), 2);
    }

    #[test]
    fn distinct_statuses_skip_blank() {
        let list = vec![
            employee(1, "Ada", "Lovelace", "Active"),
            employee(2, "Alan", "Turing", " "),
            employee(3, "Grace", "Hopper", "ACTIVE"),
        ];
        assert_eq!(distinct_statuses(&list), vec!["Active".to_string()]);
    }
}
