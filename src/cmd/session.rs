//! Sign-in commands: `hrdesk login`, `logout`, `whoami`.

use anyhow::{Context as _, Result, bail};
use dialoguer::{Input, Password};

use hrdesk::session::SessionState;
use hrdesk::ui::icons::CHECK;
use hrdesk::ui::{render, with_spinner};

use super::{Context, Describe};

pub async fn cmd_login(ctx: &Context, email: Option<&str>) -> Result<()> {
    let email = match email {
        Some(email) => email.to_string(),
        None => Input::<String>::new()
            .with_prompt("Email")
            .interact_text()
            .context("Failed to read email")?,
    };
    let password = Password::new()
        .with_prompt("Password")
        .interact()
        .context("Failed to read password")?;

    let mut store = ctx.session();
    let user = with_spinner("Signing in...", store.login(&email, &password))
        .await
        .describe("Login failed")?;

    if ctx.json {
        return ctx.print_json(&user);
    }
    println!("{}Signed in as {}", CHECK, render::user(&user));
    Ok(())
}

pub async fn cmd_logout(ctx: &Context) -> Result<()> {
    let mut store = ctx.session();
    with_spinner("Signing out...", store.logout()).await;
    println!("{}Signed out", CHECK);
    Ok(())
}

pub async fn cmd_whoami(ctx: &Context) -> Result<()> {
    let mut store = ctx.session();
    let state = with_spinner("Checking session...", store.bootstrap())
        .await
        .clone();
    match state {
        SessionState::Authenticated(user) => {
            if ctx.json {
                ctx.print_json(&user)
            } else {
                println!("{}", render::user(&user));
                Ok(())
            }
        }
        _ => bail!("Not signed in. Run `hrdesk login`."),
    }
}
