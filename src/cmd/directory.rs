//! HR commands: dashboard, employees, attendance and documents.

use anyhow::Result;
use serde::Serialize;

use hrdesk::models::{AttendanceRecord, Id, ListQuery};
use hrdesk::status::AttendanceStatus;
use hrdesk::ui::{render, with_spinner};
use hrdesk::views::attendance::{
    AttendanceFilter, AttendanceSortField, AttendanceSummary, EmployeeAttendance, by_employee,
    filter_and_sort, summarize,
};
use hrdesk::views::calendar::YearMonth;
use hrdesk::views::documents::{DocumentFilter, DocumentSortField, derive_document_list};
use hrdesk::views::employees::{EmployeeFilter, EmployeeSortField, derive_employee_list};
use hrdesk::views::{SearchTerm, SortDirection};

use super::{Context, Describe, load_list, today};

fn direction(desc: bool) -> SortDirection {
    if desc { SortDirection::Desc } else { SortDirection::Asc }
}

pub async fn cmd_dashboard(ctx: &Context) -> Result<()> {
    let summary = with_spinner("Loading dashboard...", ctx.api.dashboard_summary())
        .await
        .describe("Failed to load dashboard")?;
    if ctx.json {
        return ctx.print_json(&summary);
    }
    print!("{}", render::dashboard(&summary));
    Ok(())
}

pub async fn cmd_employees(
    ctx: &Context,
    search: Option<&str>,
    status: Option<String>,
    sort: EmployeeSortField,
    desc: bool,
    group: bool,
) -> Result<()> {
    let filter = EmployeeFilter {
        search: SearchTerm::new(search.unwrap_or_default()),
        status,
        sort,
        direction: direction(desc),
        group_by_status: group,
    };
    let query = ListQuery {
        search: filter.search.as_str().map(str::to_string),
        status: filter.status.clone(),
        sort: Some(sort.query_name().to_string()),
        order: Some(filter.direction.as_str().to_string()),
        ..Default::default()
    };

    let result = with_spinner("Loading employees...", ctx.api.list_employees(&query)).await;
    let (employees, pagination) = load_list(result, "Failed to load employees")?;
    let groups = derive_employee_list(&employees, &filter);

    if ctx.json {
        return ctx.print_json(&groups);
    }
    print!("{}", render::employee_groups(&groups));
    if let Some(p) = pagination {
        println!("{}", render::pagination(&p));
    }
    Ok(())
}

pub async fn cmd_employee(ctx: &Context, id: Id, month: Option<YearMonth>) -> Result<()> {
    let month = month.unwrap_or_else(|| YearMonth::of(today()));
    let (employee, records) = with_spinner("Loading employee...", ctx.api.employee_attendance(id, month))
        .await
        .describe(&format!("Failed to load employee {}", id))?;
    let summary = summarize(&records);

    if ctx.json {
        return ctx.print_json(&serde_json::json!({
            "employee": employee,
            "month": month.to_string(),
            "summary": summary,
            "attendance": records,
        }));
    }
    print!("{}", render::employee_detail(&employee));
    println!("\n{}", month.label());
    print!("{}", render::attendance_summary(&summary));
    print!("{}", render::attendance_records(&records));
    Ok(())
}

pub struct AttendanceArgs {
    pub months: Vec<YearMonth>,
    pub last: Option<usize>,
    pub employee: Option<Id>,
    pub status: Option<AttendanceStatus>,
    pub search: Option<String>,
    pub sort: AttendanceSortField,
    pub desc: bool,
    pub by_employee: bool,
}

impl AttendanceArgs {
    /// `--last` wins over `--months`; neither means the current month.
    pub fn resolve_months(&self, current: YearMonth) -> Vec<YearMonth> {
        match self.last {
            Some(n) if n > 0 => current.trailing(n),
            _ if !self.months.is_empty() => {
                let mut months = self.months.clone();
                months.sort();
                months.dedup();
                months
            }
            _ => vec![current],
        }
    }
}

#[derive(Serialize)]
struct AttendanceReport<'a> {
    months: Vec<String>,
    summary: AttendanceSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    employees: Option<Vec<EmployeeAttendance>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<&'a [AttendanceRecord]>,
}

pub async fn cmd_attendance(ctx: &Context, args: AttendanceArgs) -> Result<()> {
    let months = args.resolve_months(YearMonth::of(today()));
    let records = with_spinner(
        &format!("Loading attendance for {} month(s)...", months.len()),
        ctx.api.list_attendance_months(&months, args.employee),
    )
    .await
    .describe("Failed to load attendance")?;

    let filter = AttendanceFilter {
        search: SearchTerm::new(args.search.as_deref().unwrap_or_default()),
        status: args.status,
        sort: args.sort,
        direction: direction(args.desc),
    };
    let visible = filter_and_sort(&records, &filter);
    let summary = summarize(&visible);
    let employees = args.by_employee.then(|| by_employee(&visible));

    if ctx.json {
        let report = AttendanceReport {
            months: months.iter().map(ToString::to_string).collect(),
            summary,
            records: if args.by_employee { None } else { Some(&visible) },
            employees,
        };
        return ctx.print_json(&report);
    }

    let labels: Vec<String> = months.iter().map(YearMonth::label).collect();
    println!("{}", labels.join(", "));
    print!("{}", render::attendance_summary(&summary));
    match employees {
        Some(rows) => print!("{}", render::attendance_by_employee(&rows)),
        None => print!("{}", render::attendance_records(&visible)),
    }
    Ok(())
}

pub async fn cmd_documents(
    ctx: &Context,
    search: Option<&str>,
    category: Option<String>,
    sort: DocumentSortField,
    order: SortDirection,
    group: bool,
) -> Result<()> {
    let filter = DocumentFilter {
        search: SearchTerm::new(search.unwrap_or_default()),
        category,
        sort,
        direction: order,
        group_by_category: group,
    };
    let query = ListQuery {
        search: filter.search.as_str().map(str::to_string),
        category: filter.category.clone().filter(|c| c != "all"),
        sort: Some(sort.query_name().to_string()),
        order: Some(order.as_str().to_string()),
        ..Default::default()
    };

    let result = with_spinner("Loading documents...", ctx.api.list_documents(&query)).await;
    let (documents, pagination) = load_list(result, "Failed to load documents")?;
    let groups = derive_document_list(&documents, &filter);

    if ctx.json {
        return ctx.print_json(&groups);
    }
    print!("{}", render::document_groups(&groups));
    if let Some(p) = pagination {
        println!("{}", render::pagination(&p));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(months: Vec<YearMonth>, last: Option<usize>) -> AttendanceArgs {
        AttendanceArgs {
            months,
            last,
            employee: None,
            status: None,
            search: None,
            sort: AttendanceSortField::Date,
            desc: false,
            by_employee: false,
        }
    }

    #[test]
    fn test_resolve_months() {
        let current = YearMonth::new(2024, 3).unwrap();
        assert_eq!(args(vec![], None).resolve_months(current), vec![current]);

        let jan = YearMonth::new(2024, 1).unwrap();
        let feb = YearMonth::new(2024, 2).unwrap();
        assert_eq!(args(vec![feb, jan, feb], None).resolve_months(current), vec![jan, feb]);

        assert_eq!(args(vec![jan], Some(2)).resolve_months(current), vec![feb, current]);
    }
}
