//! Configuration view and setup commands: `hrdesk config`.

use anyhow::{Result, anyhow, bail};

use hrdesk::config::{API_URL_ENV, Config, HrdeskToml, default_config_path};
use hrdesk::ui::icons::CHECK;

use super::super::{Cli, ConfigCommands};

pub fn cmd_config(cli: &Cli, command: Option<ConfigCommands>) -> Result<()> {
    match command {
        None | Some(ConfigCommands::Show) => {
            let config = Config::load(cli.config.as_deref(), cli.api_url.as_deref())?;

            println!();
            println!("hrdesk configuration");
            println!("====================");
            println!();
            match &config.source {
                Some(path) if path.exists() => println!("Config file: {}", path.display()),
                Some(path) => println!("Config file: {} (not found, using defaults)", path.display()),
                None => println!("Config file: none"),
            }
            if std::env::var(API_URL_ENV).is_ok() {
                println!("{} is set", API_URL_ENV);
            }
            println!();
            println!("[api]");
            println!("  base_url = \"{}\"", config.api.base_url);
            println!("  timeout_secs = {}", config.api.timeout.as_secs());
            println!();
            println!("[search]");
            println!("  debounce_ms = {}", config.search_debounce.as_millis());
            println!();
            println!("[session]");
            println!("  cache_file = \"{}\"", config.session_file.display());
            println!();
        }
        Some(ConfigCommands::Init { force }) => {
            let path = cli
                .config
                .clone()
                .or_else(default_config_path)
                .ok_or_else(|| anyhow!("No config directory on this platform; pass --config"))?;
            if path.exists() && !force {
                bail!(
                    "{} already exists. Use --force to overwrite.",
                    path.display()
                );
            }
            HrdeskToml::template().save(&path)?;
            println!("{}Wrote {}", CHECK, path.display());
        }
    }
    Ok(())
}
