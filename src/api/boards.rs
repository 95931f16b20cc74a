//! Task-board endpoints: workspaces, boards, status groups, members, tasks.

use async_trait::async_trait;
use serde_json::json;

use super::client::ApiClient;
use super::envelope::{Page, parse_entity, parse_list};
use crate::errors::ClientError;
use crate::models::{
    Board, BoardMember, BoardPatch, Id, ListQuery, MemberRequest, NewBoard, NewStatusGroup,
    NewTask, NewWorkspace, StatusGroup, Task, TaskPatch, Workspace,
};
use crate::views::board::{BoardView, TaskMover};

impl ApiClient {
    // ── Workspaces ────────────────────────────────────────────────────

    pub async fn list_workspaces(&self) -> Result<Vec<Workspace>, ClientError> {
        let value = self.get("/workspaces").await?;
        Ok(parse_list(value, "workspaces")?.items)
    }

    pub async fn create_workspace(&self, workspace: &NewWorkspace) -> Result<Workspace, ClientError> {
        let value = self.post("/workspaces", workspace).await?;
        parse_entity(value, "workspace")
    }

    // ── Boards ────────────────────────────────────────────────────────

    pub async fn list_boards(&self, workspace_id: Option<Id>) -> Result<Vec<Board>, ClientError> {
        let value = match workspace_id {
            Some(id) => self.get_with_query("/boards", &[("workspace_id", id)]).await?,
            None => self.get("/boards").await?,
        };
        Ok(parse_list(value, "boards")?.items)
    }

    pub async fn get_board(&self, id: Id) -> Result<Board, ClientError> {
        let value = self.get(&format!("/boards/{}", id)).await?;
        parse_entity(value, "board")
    }

    pub async fn create_board(&self, board: &NewBoard) -> Result<Board, ClientError> {
        let value = self.post("/boards", board).await?;
        parse_entity(value, "board")
    }

    pub async fn update_board(&self, id: Id, patch: &BoardPatch) -> Result<Board, ClientError> {
        let value = self.patch(&format!("/boards/{}", id), patch).await?;
        parse_entity(value, "board")
    }

    pub async fn delete_board(&self, id: Id) -> Result<(), ClientError> {
        self.delete(&format!("/boards/{}", id), None).await
    }

    pub async fn list_status_groups(&self, board_id: Id) -> Result<Vec<StatusGroup>, ClientError> {
        let value = self.get(&format!("/boards/{}/status-groups", board_id)).await?;
        Ok(parse_list(value, "status_groups")?.items)
    }

    pub async fn create_status_group(
        &self,
        board_id: Id,
        group: &NewStatusGroup,
    ) -> Result<StatusGroup, ClientError> {
        let value = self
            .post(&format!("/boards/{}/status-groups", board_id), group)
            .await?;
        parse_entity(value, "status_group")
    }

    pub async fn list_members(&self, board_id: Id) -> Result<Vec<BoardMember>, ClientError> {
        let value = self.get(&format!("/boards/{}/members", board_id)).await?;
        Ok(parse_list(value, "members")?.items)
    }

    pub async fn add_member(&self, board_id: Id, member: &MemberRequest) -> Result<BoardMember, ClientError> {
        let value = self.post(&format!("/boards/{}/members", board_id), member).await?;
        parse_entity(value, "member")
    }

    pub async fn remove_member(&self, board_id: Id, user_id: Id) -> Result<(), ClientError> {
        let body = json!({ "user_id": user_id });
        self.delete(&format!("/boards/{}/members", board_id), Some(&body))
            .await
    }

    /// Status groups and tasks for one board, fetched concurrently.
    pub async fn load_board_view(&self, board_id: Id) -> Result<BoardView, ClientError> {
        let query = ListQuery {
            board_id: Some(board_id),
            ..Default::default()
        };
        let (groups, tasks) =
            futures::try_join!(self.list_status_groups(board_id), self.list_tasks(&query))?;
        Ok(BoardView::new(groups, tasks.items))
    }

    // ── Tasks ─────────────────────────────────────────────────────────

    pub async fn list_tasks(&self, query: &ListQuery) -> Result<Page<Task>, ClientError> {
        let value = self.get_with_query("/tasks", query).await?;
        parse_list(value, "tasks")
    }

    /// Cross-board listing used by the All Tasks view.
    pub async fn tasks_overview(&self, query: &ListQuery) -> Result<Page<Task>, ClientError> {
        let value = self.get_with_query("/tasks/overview", query).await?;
        parse_list(value, "tasks")
    }

    pub async fn create_task(&self, task: &NewTask) -> Result<Task, ClientError> {
        let value = self.post("/tasks", task).await?;
        parse_entity(value, "task")
    }

    pub async fn update_task(&self, id: Id, patch: &TaskPatch) -> Result<Task, ClientError> {
        let value = self.patch(&format!("/tasks/{}", id), patch).await?;
        parse_entity(value, "task")
    }

    pub async fn delete_task(&self, id: Id) -> Result<(), ClientError> {
        self.delete(&format!("/tasks/{}", id), None).await
    }
}

#[async_trait]
impl TaskMover for ApiClient {
    async fn move_task(&self, task_id: Id, status_group_id: Id) -> Result<Task, ClientError> {
        let patch = TaskPatch {
            status_group_id: Some(status_group_id),
            ..Default::default()
        };
        self.update_task(task_id, &patch).await
    }
}
