//! Create commands backed by the form controllers.

use anyhow::Result;
use console::style;

use hrdesk::forms::{BoardForm, DocumentForm, TaskForm, WorkspaceForm};
use hrdesk::ui::icons::{BOARD, CHECK, DOCUMENT, FOLDER};
use hrdesk::ui::with_spinner;

use super::{Context, Describe};

pub async fn cmd_create_task(ctx: &Context, form: TaskForm) -> Result<()> {
    // Fail on a bad form before the spinner starts.
    form.validate().describe("Task not created")?;
    let task = with_spinner("Creating task...", form.submit(&ctx.api))
        .await
        .describe("Task not created")?;
    if ctx.json {
        return ctx.print_json(&task);
    }
    println!("{}Created task #{} {}", CHECK, task.id, style(&task.title).bold());
    Ok(())
}

pub async fn cmd_create_board(ctx: &Context, form: BoardForm) -> Result<()> {
    form.validate().describe("Board not created")?;
    let board = with_spinner("Creating board...", form.submit(&ctx.api))
        .await
        .describe("Board not created")?;
    if ctx.json {
        return ctx.print_json(&board);
    }
    println!("{}{}Created board #{} {}", CHECK, BOARD, board.id, style(&board.name).bold());
    Ok(())
}

pub async fn cmd_create_workspace(ctx: &Context, form: WorkspaceForm) -> Result<()> {
    form.validate().describe("Workspace not created")?;
    let workspace = with_spinner("Creating workspace...", form.submit(&ctx.api))
        .await
        .describe("Workspace not created")?;
    if ctx.json {
        return ctx.print_json(&workspace);
    }
    println!(
        "{}{}Created workspace #{} {}",
        CHECK,
        FOLDER,
        workspace.id,
        style(&workspace.name).bold()
    );
    Ok(())
}

pub async fn cmd_create_document(ctx: &Context, form: DocumentForm) -> Result<()> {
    form.validate().describe("Document not created")?;
    let document = with_spinner("Uploading document...", form.submit(&ctx.api))
        .await
        .describe("Document not created")?;
    if ctx.json {
        return ctx.print_json(&document);
    }
    println!(
        "{}{}Created document #{} {}",
        CHECK,
        DOCUMENT,
        document.id,
        style(&document.title).bold()
    );
    Ok(())
}
