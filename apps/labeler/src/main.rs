use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{HttpLabelingApi, ReviewController};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod session;
mod terminal;

use config::{load_settings, Overrides};
use session::Session;
use terminal::TerminalView;

/// Review dataset rows and submit success labels from the terminal.
#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the labeling API.
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    annotator: Option<String>,
    /// Settings file; defaults to ./labeler.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Hide already-labeled rows; `--skip-labeled=false` turns a configured value off.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    skip_labeled: Option<bool>,
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    show_labeled: Option<bool>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            server_url: self.server_url.clone(),
            annotator: self.annotator.clone(),
            skip_labeled: self.skip_labeled,
            show_labeled: self.show_labeled,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings(args.config.as_deref(), &args.overrides())?;
    info!(
        server_url = %settings.server_url,
        annotator = %settings.annotator,
        "starting labeling session"
    );

    let api = HttpLabelingApi::new(&settings.server_url).context("failed to build API client")?;
    let view = TerminalView::new(io::stdin().lock(), io::stdout());
    let mut session = Session::new(ReviewController::new(api, view), &settings);
    session.run().await
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
