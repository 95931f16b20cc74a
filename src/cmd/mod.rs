//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module      | Commands handled                                        |
//! |-------------|---------------------------------------------------------|
//! | `session`   | `Login`, `Logout`, `Whoami`                             |
//! | `directory` | `Dashboard`, `Employees`, `Employee`, `Attendance`, `Documents` |
//! | `boards`    | `Tasks`, `Board`, `Move`, `Calendar`, `Workspaces`      |
//! | `create`    | `CreateTask`, `CreateBoard`, `CreateWorkspace`, `CreateDocument` |
//! | `config`    | `Config`                                                |

pub mod boards;
pub mod config;
pub mod create;
pub mod directory;
pub mod session;

pub use boards::{cmd_board, cmd_calendar, cmd_move, cmd_tasks, cmd_tasks_interactive, cmd_workspaces, task_filter};
pub use config::cmd_config;
pub use create::{cmd_create_board, cmd_create_document, cmd_create_task, cmd_create_workspace};
pub use directory::{AttendanceArgs, cmd_attendance, cmd_dashboard, cmd_documents, cmd_employee, cmd_employees};
pub use session::{cmd_login, cmd_logout, cmd_whoami};

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use hrdesk::api::{ApiClient, Page};
use hrdesk::config::Config;
use hrdesk::errors::ClientError;
use hrdesk::models::Pagination;
use hrdesk::session::{FileSessionCache, SessionCache, SessionStore};
use hrdesk::views::list_state::ListState;

/// Everything a command needs: resolved config and a client whose cookie
/// jar already carries the saved session.
pub struct Context {
    pub config: Config,
    pub api: ApiClient,
    pub json: bool,
}

impl Context {
    pub fn new(cli: &super::Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref(), cli.api_url.as_deref())?;
        let api = ApiClient::new(&config.api)?;
        tracing::debug!(base_url = api.base_url(), "client ready");

        let cache = FileSessionCache::new(&config.session_file);
        if let Some(cookie) = cache.load().and_then(|s| s.cookie) {
            api.restore_session_cookie(&cookie);
        }

        Ok(Self {
            config,
            api,
            json: cli.json,
        })
    }

    pub fn session(&self) -> SessionStore<ApiClient, FileSessionCache> {
        SessionStore::new(
            self.api.clone(),
            FileSessionCache::new(&self.config.session_file),
        )
    }

    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Attach a short description, plus a sign-in hint for 401s.
pub trait Describe<T> {
    fn describe(self, what: &str) -> Result<T>;
}

impl<T> Describe<T> for std::result::Result<T, ClientError> {
    fn describe(self, what: &str) -> Result<T> {
        self.map_err(|err| {
            let context = match &err {
                ClientError::Http { status: 401, .. } => {
                    format!("{} (not signed in? run `hrdesk login`)", what)
                }
                _ => what.to_string(),
            };
            anyhow::Error::new(err).context(context)
        })
    }
}

/// Run a list fetch through [`ListState`], turning its error message into a
/// command failure.
pub fn load_list<T>(result: std::result::Result<Page<T>, ClientError>, what: &str) -> Result<(Vec<T>, Option<Pagination>)> {
    let mut state = ListState::default();
    state.start_loading();
    state.apply(result);
    match state.error {
        Some(message) => anyhow::bail!("{}: {}", what, message),
        None => Ok((state.items, state.pagination)),
    }
}
