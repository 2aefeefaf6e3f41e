// ABOUTME: Main application entry point.
// ABOUTME: Loads config, sets up logging, and drives the layout store from stdin commands.

mod command;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use spad_core::Config;
use spad_layout::LayoutStore;
use tracing_subscriber::EnvFilter;

use command::Command;

fn parse_args() -> Result<Option<PathBuf>> {
    let mut args = std::env::args().skip(1);
    let mut config_path = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().context("--config needs a path")?;
                config_path = Some(PathBuf::from(path));
            }
            other => bail!("Unexpected argument: {}", other),
        }
    }
    Ok(config_path)
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load(&path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(Config::load_or_default()),
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    // stdout carries layout JSON, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let config = load_config(parse_args()?)?;
    init_tracing(&config.logging.filter);

    tracing::info!("Starting splitpad");
    if let Some(max) = config.layout.max_panes {
        tracing::info!("Pane limit: {}", max);
    }

    let mut store = LayoutStore::with_settings(config.layout.clone());
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!("{}", e);
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        command::execute(&mut store, command, &config.layout, &mut out)?;
        out.flush()?;
    }

    tracing::info!("Exiting with {} panes", store.pane_count());
    Ok(())
}
