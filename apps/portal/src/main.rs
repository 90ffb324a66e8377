use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
    time::Duration,
};

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::bounded;
use portal_core::{backend_from_settings, load_settings};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::ui::PortalApp;

#[derive(Parser, Debug)]
#[command(name = "charter-portal", about = "Charter compliance portal")]
struct Args {
    /// Settings file; defaults to ./portal.toml, then the user config dir.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides RUST_LOG and the configured filter.
    #[arg(long)]
    log_filter: Option<String>,
    /// Reads commands from a file instead of stdin.
    #[arg(long)]
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load_settings(args.config.as_deref())?;

    let filter = match &args.log_filter {
        Some(filter) => EnvFilter::try_new(filter)?,
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&settings.log_filter))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let backend = backend_from_settings(&settings)?;
    let (cmd_tx, cmd_rx) = bounded(16);
    let (ui_tx, ui_rx) = bounded(16);
    let worker = backend_bridge::runtime::launch(cmd_rx, ui_tx, backend);

    // Sign-up then insert, each bounded by the client timeout.
    let wait = Duration::from_secs(settings.request_timeout_seconds * 2 + 5);
    let mut app = PortalApp::new(cmd_tx, ui_rx, wait);
    info!("charter portal started");

    let stdout = io::stdout();
    match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            app.run(BufReader::new(file), stdout.lock())?;
        }
        None => app.run(io::stdin().lock(), stdout.lock())?,
    }

    drop(app);
    if worker.join().is_err() {
        tracing::error!("backend worker panicked");
    }
    Ok(())
}
