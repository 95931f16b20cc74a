//! HR endpoints: employees, attendance, documents and the dashboard.

use futures::future::try_join_all;

use super::client::ApiClient;
use super::envelope::{Page, parse_entity, parse_list};
use crate::errors::ClientError;
use crate::models::{
    AttendanceQuery, AttendanceRecord, DashboardSummary, Document, DocumentPatch, Employee, Id,
    ListQuery, NewDocument, NewEmployee,
};
use crate::views::attendance::merge_months;
use crate::views::calendar::YearMonth;

impl ApiClient {
    pub async fn list_employees(&self, query: &ListQuery) -> Result<Page<Employee>, ClientError> {
        let value = self.get_with_query("/employees", query).await?;
        parse_list(value, "employees")
    }

    pub async fn get_employee(&self, id: Id) -> Result<Employee, ClientError> {
        let value = self.get(&format!("/employees/{}", id)).await?;
        parse_entity(value, "employee")
    }

    pub async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee, ClientError> {
        let value = self.post("/employees", employee).await?;
        parse_entity(value, "employee")
    }

    pub async fn list_attendance(&self, query: &AttendanceQuery) -> Result<Page<AttendanceRecord>, ClientError> {
        let value = self.get_with_query("/attendance", query).await?;
        parse_list(value, "attendance")
    }

    /// Fetch several months concurrently and merge them into one dataset.
    pub async fn list_attendance_months(
        &self,
        months: &[YearMonth],
        employee_id: Option<Id>,
    ) -> Result<Vec<AttendanceRecord>, ClientError> {
        let queries: Vec<AttendanceQuery> = months
            .iter()
            .map(|m| AttendanceQuery {
                month: Some(m.to_string()),
                employee_id,
            })
            .collect();
        let pages = try_join_all(queries.iter().map(|q| self.list_attendance(q))).await?;
        tracing::debug!(months = months.len(), "attendance months fetched");
        Ok(merge_months(pages.into_iter().map(|p| p.items).collect()))
    }

    pub async fn list_documents(&self, query: &ListQuery) -> Result<Page<Document>, ClientError> {
        let value = self.get_with_query("/documents", query).await?;
        parse_list(value, "documents")
    }

    pub async fn create_document(&self, document: &NewDocument) -> Result<Document, ClientError> {
        let value = self.post("/documents", document).await?;
        parse_entity(value, "document")
    }

    pub async fn update_document(&self, id: Id, patch: &DocumentPatch) -> Result<Document, ClientError> {
        let value = self.patch(&format!("/documents/{}", id), patch).await?;
        parse_entity(value, "document")
    }

    pub async fn delete_document(&self, id: Id) -> Result<(), ClientError> {
        self.delete(&format!("/documents/{}", id), None).await
    }

    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, ClientError> {
        let value = self.get("/dashboard/summary").await?;
        parse_entity(value, "summary")
    }

    /// Convenience used by the CLI's `employee` command to show a name
    /// alongside attendance when only an id is known.
    pub async fn employee_attendance(
        &self,
        id: Id,
        month: YearMonth,
    ) -> Result<(Employee, Vec<AttendanceRecord>), ClientError> {
        let query = AttendanceQuery {
            month: Some(month.to_string()),
            employee_id: Some(id),
        };
        let (employee, page) = futures::try_join!(self.get_employee(id), self.list_attendance(&query))?;
        Ok((employee, page.items))
    }
}
