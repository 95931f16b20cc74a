//! Create/edit form controllers.
//!
//! A form holds raw user input as strings. `validate` turns it into the
//! request payload or reports every missing field at once; `submit` only
//! reaches the network after validation passes.

use chrono::NaiveDate;

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::{
    Board, BoardPatch, Document, DocumentPatch, Id, NewBoard, NewDocument, NewTask, NewWorkspace,
    Task, TaskPatch, Workspace, parse_date,
};

/// A validated form: either a new entity or a patch for an existing one.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<N, P> {
    Create(N),
    Update(Id, P),
}

fn trimmed(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn require_text(missing: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        missing.push(field.to_string());
    }
}

fn require_id(missing: &mut Vec<String>, field: &str, value: Option<Id>) {
    if value.is_none() {
        missing.push(field.to_string());
    }
}

fn check_missing(missing: Vec<String>) -> Result<(), ClientError> {
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ClientError::Validation { fields: missing })
    }
}

fn date_field(field: &str, raw: &str) -> Result<Option<NaiveDate>, ClientError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_date(raw)
        .map(Some)
        .ok_or_else(|| ClientError::InvalidInput(format!("{} '{}' is not a date (YYYY-MM-DD)", field, raw.trim())))
}

// ── Task ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskForm {
    pub editing: Option<Id>,
    pub board_id: Option<Id>,
    pub status_group_id: Option<Id>,
    pub title: String,
    pub description: String,
    pub status: String,
    pub assignee_ids: Vec<Id>,
    pub start_date: String,
    pub end_date: String,
    pub task_group: String,
}

impl TaskForm {
    pub fn for_board(board_id: Id, status_group_id: Option<Id>) -> Self {
        Self {
            board_id: Some(board_id),
            status_group_id,
            ..Default::default()
        }
    }

    /// Prefill from an existing task.
    pub fn edit(task: &Task) -> Self {
        Self {
            editing: Some(task.id),
            board_id: Some(task.board_id),
            status_group_id: task.status_group_id,
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            status: task.status.clone().unwrap_or_default(),
            assignee_ids: task.assignee_ids.clone(),
            start_date: task.start_date.map(|d| d.to_string()).unwrap_or_default(),
            end_date: task.end_date.map(|d| d.to_string()).unwrap_or_default(),
            task_group: task.task_group.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<Submission<NewTask, TaskPatch>, ClientError> {
        let mut missing = Vec::new();
        require_text(&mut missing, "title", &self.title);
        require_id(&mut missing, "board", self.board_id);
        require_id(&mut missing, "status group", self.status_group_id);
        check_missing(missing)?;

        let start_date = date_field("start date", &self.start_date)?;
        let end_date = date_field("end date", &self.end_date)?;
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                return Err(ClientError::InvalidInput(format!(
                    "end date {} is before start date {}",
                    end, start
                )));
            }
        }

        let (Some(board_id), Some(status_group_id)) = (self.board_id, self.status_group_id) else {
            return Err(ClientError::Validation {
                fields: vec!["board".into(), "status group".into()],
            });
        };

        Ok(match self.editing {
            Some(id) => Submission::Update(
                id,
                TaskPatch {
                    title: trimmed(&self.title),
                    description: Some(trimmed(&self.description)),
                    status: Some(trimmed(&self.status)),
                    status_group_id: Some(status_group_id),
                    assignee_ids: Some(self.assignee_ids.clone()),
                    start_date: Some(start_date),
                    end_date: Some(end_date),
                    task_group: Some(trimmed(&self.task_group)),
                },
            ),
            None => Submission::Create(NewTask {
                board_id,
                status_group_id,
                title: self.title.trim().to_string(),
                description: trimmed(&self.description),
                status: trimmed(&self.status),
                assignee_ids: self.assignee_ids.clone(),
                start_date,
                end_date,
                task_group: trimmed(&self.task_group),
            }),
        })
    }

    pub async fn submit(&self, api: &ApiClient) -> Result<Task, ClientError> {
        match self.validate()? {
            Submission::Create(task) => api.create_task(&task).await,
            Submission::Update(id, patch) => api.update_task(id, &patch).await,
        }
    }
}

// ── Board ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardForm {
    pub editing: Option<Id>,
    pub workspace_id: Option<Id>,
    pub name: String,
    pub description: String,
}

impl BoardForm {
    pub fn edit(board: &Board) -> Self {
        Self {
            editing: Some(board.id),
            workspace_id: Some(board.workspace_id),
            name: board.name.clone(),
            description: board.description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<Submission<NewBoard, BoardPatch>, ClientError> {
        let mut missing = Vec::new();
        require_text(&mut missing, "name", &self.name);
        if self.editing.is_none() {
            require_id(&mut missing, "workspace", self.workspace_id);
        }
        check_missing(missing)?;

        match (self.editing, self.workspace_id) {
            (Some(id), _) => Ok(Submission::Update(
                id,
                BoardPatch {
                    name: trimmed(&self.name),
                    description: Some(trimmed(&self.description)),
                },
            )),
            (None, Some(workspace_id)) => Ok(Submission::Create(NewBoard {
                workspace_id,
                name: self.name.trim().to_string(),
                description: trimmed(&self.description),
            })),
            (None, None) => Err(ClientError::Validation {
                fields: vec!["workspace".into()],
            }),
        }
    }

    pub async fn submit(&self, api: &ApiClient) -> Result<Board, ClientError> {
        match self.validate()? {
            Submission::Create(board) => api.create_board(&board).await,
            Submission::Update(id, patch) => api.update_board(id, &patch).await,
        }
    }
}

// ── Workspace ─────────────────────────────────────────────────────────

/// Workspaces are create-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkspaceForm {
    pub name: String,
    pub description: String,
}

impl WorkspaceForm {
    pub fn validate(&self) -> Result<NewWorkspace, ClientError> {
        let mut missing = Vec::new();
        require_text(&mut missing, "name", &self.name);
        check_missing(missing)?;
        Ok(NewWorkspace {
            name: self.name.trim().to_string(),
            description: trimmed(&self.description),
        })
    }

    pub async fn submit(&self, api: &ApiClient) -> Result<Workspace, ClientError> {
        let workspace = self.validate()?;
        api.create_workspace(&workspace).await
    }
}

// ── Document ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentForm {
    pub editing: Option<Id>,
    pub title: String,
    pub description: String,
    pub category: String,
    /// URL or storage key of the already-uploaded file.
    pub file_url: String,
}

impl DocumentForm {
    pub fn edit(document: &Document) -> Self {
        Self {
            editing: Some(document.id),
            title: document.title.clone(),
            description: document.description.clone().unwrap_or_default(),
            category: document.category.clone().unwrap_or_default(),
            file_url: document.file_url.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<Submission<NewDocument, DocumentPatch>, ClientError> {
        let mut missing = Vec::new();
        require_text(&mut missing, "title", &self.title);
        require_text(&mut missing, "file", &self.file_url);
        check_missing(missing)?;

        Ok(match self.editing {
            Some(id) => Submission::Update(
                id,
                DocumentPatch {
                    title: trimmed(&self.title),
                    description: Some(trimmed(&self.description)),
                    category: Some(trimmed(&self.category)),
                    file_url: trimmed(&self.file_url),
                },
            ),
            None => Submission::Create(NewDocument {
                title: self.title.trim().to_string(),
                description: trimmed(&self.description),
                category: trimmed(&self.category),
                file_url: self.file_url.trim().to_string(),
            }),
        })
    }

    pub async fn submit(&self, api: &ApiClient) -> Result<Document, ClientError> {
        match self.validate()? {
            Submission::Create(document) => api.create_document(&document).await,
            Submission::Update(id, patch) => api.update_document(id, &patch).await,
        }
    }
}
