//! View-models: display-ready projections derived from fetched records.
//!
//! | Module       | View                                               |
//! |--------------|----------------------------------------------------|
//! | `query`      | Search terms, comparators, bucket partitioning     |
//! | `tasks`      | All Tasks list (group by status/board/due date)    |
//! | `employees`  | Employee directory                                 |
//! | `documents`  | Document library                                   |
//! | `attendance` | Time tracking totals and rollups                   |
//! | `board`      | Kanban columns and optimistic drag-and-drop moves  |
//! | `calendar`   | Month grids and week strips                        |
//! | `list_state` | Loading/error/items state for a fetched list       |

pub mod attendance;
pub mod board;
pub mod calendar;
pub mod documents;
pub mod employees;
pub mod list_state;
pub mod query;
pub mod tasks;

pub use query::{Group, SearchTerm, SortDirection};
