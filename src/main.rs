use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use hrdesk::models::Id;
use hrdesk::status::{AttendanceStatus, TaskStatusKey};
use hrdesk::views::SortDirection;
use hrdesk::views::attendance::AttendanceSortField;
use hrdesk::views::calendar::YearMonth;
use hrdesk::views::documents::DocumentSortField;
use hrdesk::views::employees::EmployeeSortField;
use hrdesk::views::tasks::{TaskGroupMode, TaskSortField};

mod cmd;

#[derive(Parser)]
#[command(name = "hrdesk")]
#[command(version, about = "Employee directory, time tracking, documents and task boards from the terminal")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs to stderr as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Backend base URL. Overrides HRDESK_API_URL and hrdesk.toml.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Path to hrdesk.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and remember the session
    Login {
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Sign out and forget the cached session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Headline numbers for today
    Dashboard,
    /// List employees
    Employees {
        #[arg(short, long)]
        search: Option<String>,
        /// Employment status, e.g. "Active"
        #[arg(long)]
        status: Option<String>,
        #[arg(long, default_value = "name")]
        sort: EmployeeSortField,
        #[arg(long)]
        desc: bool,
        /// Group the list by employment status
        #[arg(long)]
        group: bool,
    },
    /// Show one employee with this month's attendance
    Employee {
        id: Id,
        #[arg(long)]
        month: Option<YearMonth>,
    },
    /// All tasks across boards
    Tasks {
        #[arg(short, long)]
        search: Option<String>,
        /// working, pending, onHold, stuck, completed or unknown
        #[arg(long)]
        status: Option<TaskStatusKey>,
        /// none, status, board or due
        #[arg(long, default_value = "none")]
        group: TaskGroupMode,
        #[arg(long, default_value = "due")]
        sort: TaskSortField,
        #[arg(long)]
        desc: bool,
        #[arg(long)]
        board: Option<Id>,
        /// Read search terms from stdin, refreshing as you type
        #[arg(short, long)]
        interactive: bool,
    },
    /// Show a board as columns
    Board { id: Id },
    /// Move a task into another status group
    Move {
        task: Id,
        group: Id,
        /// Board the task is on (looked up when omitted)
        #[arg(long)]
        board: Option<Id>,
    },
    /// Month or week calendar of tasks, or attendance with --attendance
    Calendar {
        /// YYYY-MM, defaults to the current month
        #[arg(long)]
        month: Option<YearMonth>,
        /// Show the Monday..Sunday week containing this YYYY-MM-DD date
        #[arg(long, conflicts_with = "month")]
        week: Option<NaiveDate>,
        #[arg(long)]
        board: Option<Id>,
        #[arg(long)]
        attendance: bool,
    },
    /// Attendance across one or more months
    Attendance {
        /// Comma-separated YYYY-MM list
        #[arg(long, value_delimiter = ',')]
        months: Vec<YearMonth>,
        /// Use the last N months instead of --months
        #[arg(long)]
        last: Option<usize>,
        #[arg(long)]
        employee: Option<Id>,
        /// onTime, late or absent
        #[arg(long)]
        status: Option<AttendanceStatus>,
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long, default_value = "date")]
        sort: AttendanceSortField,
        #[arg(long)]
        desc: bool,
        /// Show per-employee totals instead of individual records
        #[arg(long)]
        by_employee: bool,
    },
    /// List documents
    Documents {
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value = "uploaded")]
        sort: DocumentSortField,
        /// asc or desc
        #[arg(long, default_value = "desc")]
        order: SortDirection,
        #[arg(long)]
        group: bool,
    },
    /// Workspaces and their boards
    Workspaces,
    /// Create a task in a board's status group
    CreateTask {
        #[arg(long)]
        board: Option<Id>,
        /// Status group the task starts in
        #[arg(long)]
        group: Option<Id>,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// YYYY-MM-DD
        #[arg(long, default_value = "")]
        start: String,
        /// YYYY-MM-DD
        #[arg(long, default_value = "")]
        end: String,
        #[arg(long, value_delimiter = ',')]
        assignees: Vec<Id>,
    },
    /// Create a board in a workspace
    CreateBoard {
        #[arg(long)]
        workspace: Option<Id>,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Create a workspace
    CreateWorkspace {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Register an uploaded document
    CreateDocument {
        #[arg(long, default_value = "")]
        title: String,
        /// URL or storage key of the uploaded file
        #[arg(long, default_value = "")]
        file: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// View or initialize configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a default hrdesk.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    hrdesk::logging::init(cli.verbose, cli.log_json);

    if let Commands::Config { command } = &cli.command {
        return cmd::cmd_config(&cli, command.clone());
    }

    let ctx = cmd::Context::new(&cli)?;

    match &cli.command {
        Commands::Login { email } => cmd::cmd_login(&ctx, email.as_deref()).await?,
        Commands::Logout => cmd::cmd_logout(&ctx).await?,
        Commands::Whoami => cmd::cmd_whoami(&ctx).await?,
        Commands::Dashboard => cmd::cmd_dashboard(&ctx).await?,
        Commands::Employees {
            search,
            status,
            sort,
            desc,
            group,
        } => {
            cmd::cmd_employees(&ctx, search.as_deref(), status.clone(), *sort, *desc, *group).await?
        }
        Commands::Employee { id, month } => cmd::cmd_employee(&ctx, *id, *month).await?,
        Commands::Tasks {
            search,
            status,
            group,
            sort,
            desc,
            board,
            interactive,
        } => {
            let filter = cmd::task_filter(search.as_deref(), *status, *group, *sort, *desc, *board);
            if *interactive {
                cmd::cmd_tasks_interactive(&ctx, filter).await?
            } else {
                cmd::cmd_tasks(&ctx, filter).await?
            }
        }
        Commands::Board { id } => cmd::cmd_board(&ctx, *id).await?,
        Commands::Move { task, group, board } => cmd::cmd_move(&ctx, *task, *group, *board).await?,
        Commands::Calendar {
            month,
            week,
            board,
            attendance,
        } => cmd::cmd_calendar(&ctx, *month, *week, *board, *attendance).await?,
        Commands::Attendance {
            months,
            last,
            employee,
            status,
            search,
            sort,
            desc,
            by_employee,
        } => {
            let args = cmd::AttendanceArgs {
                months: months.clone(),
                last: *last,
                employee: *employee,
                status: *status,
                search: search.clone(),
                sort: *sort,
                desc: *desc,
                by_employee: *by_employee,
            };
            cmd::cmd_attendance(&ctx, args).await?
        }
        Commands::Documents {
            search,
            category,
            sort,
            order,
            group,
        } => cmd::cmd_documents(&ctx, search.as_deref(), category.clone(), *sort, *order, *group).await?,
        Commands::Workspaces => cmd::cmd_workspaces(&ctx).await?,
        Commands::CreateTask {
            board,
            group,
            title,
            description,
            start,
            end,
            assignees,
        } => {
            let form = hrdesk::forms::TaskForm {
                editing: None,
                board_id: *board,
                status_group_id: *group,
                title: title.clone(),
                description: description.clone(),
                status: String::new(),
                assignee_ids: assignees.clone(),
                start_date: start.clone(),
                end_date: end.clone(),
                task_group: String::new(),
            };
            cmd::cmd_create_task(&ctx, form).await?
        }
        Commands::CreateBoard {
            workspace,
            name,
            description,
        } => {
            let form = hrdesk::forms::BoardForm {
                editing: None,
                workspace_id: *workspace,
                name: name.clone(),
                description: description.clone(),
            };
            cmd::cmd_create_board(&ctx, form).await?
        }
        Commands::CreateWorkspace { name, description } => {
            let form = hrdesk::forms::WorkspaceForm {
                name: name.clone(),
                description: description.clone(),
            };
            cmd::cmd_create_workspace(&ctx, form).await?
        }
        Commands::CreateDocument {
            title,
            file,
            category,
            description,
        } => {
            let form = hrdesk::forms::DocumentForm {
                editing: None,
                title: title.clone(),
                description: description.clone(),
                category: category.clone(),
                file_url: file.clone(),
            };
            cmd::cmd_create_document(&ctx, form).await?
        }
        Commands::Config { .. } => {}
    }

    Ok(())
}
