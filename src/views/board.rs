//! Kanban board view-model.
//!
//! Tasks are laid out in one column per status group, ordered by the group's
//! `position`. Tasks pointing at a group the board does not know about land
//! in a trailing "Other" column. Moves are applied optimistically and rolled
//! back when the backend rejects them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde::Serialize;

use crate::errors::ClientError;
use crate::models::{Id, StatusGroup, Task};

pub const OTHER_COLUMN_NAME: &str = "Other";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardColumn {
    /// `None` for the synthetic "Other" column.
    pub id: Option<Id>,
    pub name: String,
    pub tasks: Vec<Task>,
}

/// Record of an optimistic move, needed to confirm or undo it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTicket {
    pub task_id: Id,
    pub from: Option<Id>,
    pub to: Id,
}

#[derive(Debug, Clone, Default)]
pub struct BoardView {
    groups: Vec<StatusGroup>,
    tasks: Vec<Task>,
}

impl BoardView {
    pub fn new(mut groups: Vec<StatusGroup>, tasks: Vec<Task>) -> Self {
        groups.sort_by(|a, b| a.position.cmp(&b.position).then(a.id.cmp(&b.id)));
        Self { groups, tasks }
    }

    pub fn groups(&self) -> &[StatusGroup] {
        &self.groups
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: Id) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn task_mut(&mut self, id: Id) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    fn has_group(&self, id: Id) -> bool {
        self.groups.iter().any(|g| g.id == id)
    }

    /// Swap in a freshly fetched task list (the backend is authoritative).
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn columns(&self) -> Vec<BoardColumn> {
        let mut columns: Vec<BoardColumn> = self
            .groups
            .iter()
            .map(|g| BoardColumn {
                id: Some(g.id),
                name: g.name.clone(),
                tasks: Vec::new(),
            })
            .collect();
        let mut other = Vec::new();

        for task in &self.tasks {
            let slot = match task.status_group_id {
                Some(gid) => columns.iter_mut().find(|c| c.id == Some(gid)),
                None => None,
            };
            match slot {
                Some(column) => column.tasks.push(task.clone()),
                None => other.push(task.clone()),
            }
        }

        if !other.is_empty() {
            columns.push(BoardColumn {
                id: None,
                name: OTHER_COLUMN_NAME.to_string(),
                tasks: other,
            });
        }
        columns
    }

    /// Optimistically move `task_id` into `target`.
    ///
    /// Returns `Ok(None)` when the task is already there.
    pub fn begin_move(&mut self, task_id: Id, target: Id) -> Result<Option<MoveTicket>, ClientError> {
        if !self.has_group(target) {
            return Err(ClientError::UnknownStatusGroup { id: target });
        }
        let task = self
            .task_mut(task_id)
            .ok_or(ClientError::UnknownTask { id: task_id })?;
        if task.status_group_id == Some(target) {
            return Ok(None);
        }
        let ticket = MoveTicket {
            task_id,
            from: task.status_group_id,
            to: target,
        };
        task.status_group_id = Some(target);
        Ok(Some(ticket))
    }

    /// Apply the backend's copy of a moved task. Last response wins.
    ///
    /// Unlike `rollback_move`, a confirmation is not guarded: it overwrites
    /// a newer optimistic move on the same task, which is then settled by
    /// that move's own response.
    pub fn confirm_move(&mut self, ticket: &MoveTicket, mut confirmed: Task) {
        let Some(task) = self.task_mut(ticket.task_id) else {
            return;
        };
        if confirmed.status_group_id.is_none() {
            confirmed.status_group_id = Some(ticket.to);
        }
        if confirmed.board_name.is_none() {
            confirmed.board_name = task.board_name.take();
        }
        *task = confirmed;
    }

    /// Undo a failed move. A later move that already rewrote the column is
    /// left alone; returns whether anything was restored.
    pub fn rollback_move(&mut self, ticket: &MoveTicket) -> bool {
        match self.task_mut(ticket.task_id) {
            Some(task) if task.status_group_id == Some(ticket.to) => {
                task.status_group_id = ticket.from;
                true
            }
            _ => false,
        }
    }
}

/// Persists a column change. Real implementation: `ApiClient`.
#[async_trait]
pub trait TaskMover: Send + Sync {
    async fn move_task(&self, task_id: Id, status_group_id: Id) -> Result<Task, ClientError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    Unchanged,
    Moved(Task),
}

/// Drives drag-and-drop moves against a shared [`BoardView`].
///
/// The view lock is never held across the network call, so several moves
/// may be in flight at once.
pub struct BoardController<M> {
    view: Arc<Mutex<BoardView>>,
    mover: M,
    last_error: Mutex<Option<String>>,
}

impl<M: TaskMover> BoardController<M> {
    pub fn new(view: BoardView, mover: M) -> Self {
        Self {
            view: Arc::new(Mutex::new(view)),
            mover,
            last_error: Mutex::new(None),
        }
    }

    fn view(&self) -> MutexGuard<'_, BoardView> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> BoardView {
        self.view().clone()
    }

    pub fn columns(&self) -> Vec<BoardColumn> {
        self.view().columns()
    }

    /// The message from the most recent failed move, cleared by a success.
    pub fn last_error(&self) -> Option<String> {
        self.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_error(&self, message: Option<String>) {
        *self.last_error.lock().unwrap_or_else(PoisonError::into_inner) = message;
    }

    pub async fn move_task(&self, task_id: Id, target: Id) -> Result<MoveOutcome, ClientError> {
        let ticket = match self.view().begin_move(task_id, target)? {
            Some(ticket) => ticket,
            None => return Ok(MoveOutcome::Unchanged),
        };
        tracing::debug!(task_id, from = ?ticket.from, to = target, "optimistic move applied");

        match self.mover.move_task(task_id, target).await {
            Ok(task) => {
                self.view().confirm_move(&ticket, task.clone());
                self.set_error(None);
                tracing::info!(task_id, to = target, "task moved");
                Ok(MoveOutcome::Moved(task))
            }
            Err(err) => {
                let restored = self.view().rollback_move(&ticket);
                if err.is_cancelled() {
                    tracing::debug!(task_id, restored, "move cancelled");
                } else {
                    tracing::warn!(task_id, restored, error = %err, "move rejected, rolled back");
                    self.set_error(Some(err.user_message()));
                }
                Err(err)
            }
        }
    }
}
