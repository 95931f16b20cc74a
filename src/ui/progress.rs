//! Loading spinner shown while a request is in flight.

use std::future::Future;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::ui::icons::{CHECK, CROSS};

/// Spinner on stderr. Hidden automatically when stderr is not a terminal.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn start(message: impl Into<String>) -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    pub fn set_message(&self, message: impl Into<String>) {
        self.bar.set_message(message.into());
    }

    pub fn success(&self, message: &str) {
        self.bar
            .finish_with_message(format!("{}{}", CHECK, style(message).green()));
    }

    pub fn fail(&self, message: &str) {
        self.bar
            .finish_with_message(format!("{}{}", CROSS, style(message).red()));
    }

    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

/// Run `fut` behind a spinner that disappears when it resolves.
pub async fn with_spinner<F, T>(message: &str, fut: F) -> T
where
    F: Future<Output = T>,
{
    let spinner = Spinner::start(message);
    let output = fut.await;
    spinner.clear();
    output
}
