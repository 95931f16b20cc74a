//! Task-board commands: task list, board columns, moves, calendar, workspaces.

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use console::style;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use hrdesk::api::Page;
use hrdesk::fetch::LatestRequest;
use hrdesk::models::{Id, ListQuery, Task};
use hrdesk::status::TaskStatusKey;
use hrdesk::ui::icons::{CHECK, CROSS, SEARCH};
use hrdesk::ui::{render, with_spinner};
use hrdesk::views::board::{BoardController, MoveOutcome};
use hrdesk::views::calendar::{CalendarRecord, YearMonth, month_grid, week_days};
use hrdesk::views::list_state::ListState;
use hrdesk::views::tasks::{TaskFilter, TaskGroupMode, TaskSortField, derive_task_list};
use hrdesk::views::{SearchTerm, SortDirection};

use super::{Context, Describe, load_list, today};

pub fn task_filter(
    search: Option<&str>,
    status: Option<TaskStatusKey>,
    group: TaskGroupMode,
    sort: TaskSortField,
    desc: bool,
    board: Option<Id>,
) -> TaskFilter {
    TaskFilter {
        search: SearchTerm::new(search.unwrap_or_default()),
        status,
        board_id: board,
        sort,
        direction: if desc { SortDirection::Desc } else { SortDirection::Asc },
        group,
    }
}

fn overview_query(filter: &TaskFilter) -> ListQuery {
    ListQuery {
        search: filter.search.as_str().map(str::to_string),
        board_id: filter.board_id,
        ..Default::default()
    }
}

pub async fn cmd_tasks(ctx: &Context, filter: TaskFilter) -> Result<()> {
    let query = overview_query(&filter);
    let result = with_spinner("Loading tasks...", ctx.api.tasks_overview(&query)).await;
    let (tasks, _) = load_list(result, "Failed to load tasks")?;
    let groups = derive_task_list(&tasks, &filter, today());

    if ctx.json {
        return ctx.print_json(&groups);
    }
    print!("{}", render::task_groups(&groups));
    Ok(())
}

/// Live search: each stdin line replaces the search term. Fetches are
/// debounced and a newer term aborts the fetch for an older one.
pub async fn cmd_tasks_interactive(ctx: &Context, mut filter: TaskFilter) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut request: LatestRequest<Page<Task>> = LatestRequest::new(ctx.config.search_debounce);
    let mut state: ListState<Task> = ListState::default();

    let submit = |request: &mut LatestRequest<Page<Task>>, filter: &TaskFilter, debounced: bool| {
        let api = ctx.api.clone();
        let query = overview_query(filter);
        request.submit(debounced, async move { api.tasks_overview(&query).await })
    };

    eprintln!(
        "{}Type to search, empty line clears, Ctrl-D quits.",
        SEARCH
    );
    state.start_loading();
    submit(&mut request, &filter, false);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                filter.search = SearchTerm::new(&line);
                state.start_loading();
                let generation = submit(&mut request, &filter, true);
                tracing::debug!(generation, term = ?filter.search.as_str(), "search submitted");
            }
            Some(result) = request.settle(), if request.is_pending() => {
                state.apply(result);
                match &state.error {
                    Some(message) => eprintln!("{}{}", CROSS, style(message).red()),
                    None => {
                        let groups = derive_task_list(&state.items, &filter, today());
                        print!("{}", render::task_groups(&groups));
                        println!("{}", style(format!("── {} task(s)", state.items.len())).dim());
                    }
                }
            }
        }
    }
    request.cancel();
    Ok(())
}

pub async fn cmd_board(ctx: &Context, id: Id) -> Result<()> {
    let (board, view) = with_spinner("Loading board...", async {
        futures::try_join!(ctx.api.get_board(id), ctx.api.load_board_view(id))
    })
    .await
    .describe(&format!("Failed to load board {}", id))?;
    let columns = view.columns();

    if ctx.json {
        return ctx.print_json(&columns);
    }
    print!("{}", render::board_columns(&board.name, &columns));
    Ok(())
}

/// Find the board a task lives on from the cross-board listing.
async fn board_of(ctx: &Context, task_id: Id) -> Result<Id> {
    let result = ctx.api.tasks_overview(&ListQuery::default()).await;
    let (tasks, _) = load_list(result, "Failed to look up task")?;
    tasks
        .iter()
        .find(|t| t.id == task_id)
        .map(|t| t.board_id)
        .ok_or_else(|| anyhow!("Task {} not found; pass --board", task_id))
}

pub async fn cmd_move(ctx: &Context, task_id: Id, group_id: Id, board: Option<Id>) -> Result<()> {
    let board_id = match board {
        Some(id) => id,
        None => board_of(ctx, task_id).await?,
    };
    let view = ctx
        .api
        .load_board_view(board_id)
        .await
        .describe(&format!("Failed to load board {}", board_id))?;
    let controller = BoardController::new(view, ctx.api.clone());

    let outcome = with_spinner("Moving task...", controller.move_task(task_id, group_id)).await;
    match outcome {
        Ok(MoveOutcome::Unchanged) => {
            println!("Task {} is already in that column", task_id);
        }
        Ok(MoveOutcome::Moved(task)) => {
            if ctx.json {
                return ctx.print_json(&task);
            }
            let column = controller
                .columns()
                .into_iter()
                .find(|c| c.id == Some(group_id))
                .map(|c| c.name)
                .unwrap_or_else(|| group_id.to_string());
            println!("{}Moved #{} {} → {}", CHECK, task.id, task.title, style(column).bold());
        }
        Err(err) => {
            return Err(anyhow::Error::new(err).context(format!(
                "Move of task {} failed; board left unchanged",
                task_id
            )));
        }
    }
    Ok(())
}

pub async fn cmd_calendar(
    ctx: &Context,
    month: Option<YearMonth>,
    week: Option<NaiveDate>,
    board: Option<Id>,
    attendance: bool,
) -> Result<()> {
    let month = match (month, week) {
        (Some(month), _) => month,
        (None, Some(anchor)) => YearMonth::of(anchor),
        (None, None) => YearMonth::of(today()),
    };

    if attendance {
        let records = with_spinner("Loading attendance...", ctx.api.list_attendance_months(&[month], None))
            .await
            .describe("Failed to load attendance")?;
        return show_calendar(ctx, &records, month, week);
    }

    let query = ListQuery {
        board_id: board,
        ..Default::default()
    };
    let result = with_spinner("Loading tasks...", ctx.api.tasks_overview(&query)).await;
    let (tasks, _) = load_list(result, "Failed to load tasks")?;
    show_calendar(ctx, &tasks, month, week)
}

fn show_calendar<T>(ctx: &Context, records: &[T], month: YearMonth, week: Option<NaiveDate>) -> Result<()>
where
    T: CalendarRecord + Serialize,
{
    if let Some(anchor) = week {
        let cells = week_days(records, anchor, today());
        if ctx.json {
            return ctx.print_json(&cells);
        }
        print!("{}", render::week_strip(&cells));
        return Ok(());
    }

    let grid = month_grid(records, month, today());
    if ctx.json {
        return ctx.print_json(&grid);
    }
    print!("{}", render::month_grid(&grid, &month.label()));
    Ok(())
}

pub async fn cmd_workspaces(ctx: &Context) -> Result<()> {
    let (workspaces, boards) = with_spinner("Loading workspaces...", async {
        futures::try_join!(ctx.api.list_workspaces(), ctx.api.list_boards(None))
    })
    .await
    .describe("Failed to load workspaces")?;

    if ctx.json {
        return ctx.print_json(&serde_json::json!({
            "workspaces": workspaces,
            "boards": boards,
        }));
    }
    print!("{}", render::workspaces(&workspaces, &boards));
    Ok(())
}
