use std::{
    fs::OpenOptions,
    io::{self, IsTerminal},
    sync::{Arc, Mutex},
};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use price_dashboard::{
    api::http::HttpRecorderApi, cli::Cli, config::DashboardConfig, controller::Controller,
    tui::{App, terminal},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = DashboardConfig::load(cli.config.as_deref(), &cli.overrides())
        .context("failed to load configuration")?;

    // stdout belongs to the terminal UI, so logs go to a file.
    let log_path = config.log_file_path();
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("price-dashboard needs an interactive terminal (TTY). Run it in a normal shell.");
        return Ok(());
    }

    let api = HttpRecorderApi::new(&config.base_url, config.request_timeout())
        .context("failed to create backend client")?;
    info!(base_url = api.base_url(), "starting dashboard");
    let controller = Controller::new(Arc::new(api), &config);
    let mut app = App::new(controller, &config);

    let mut tui = terminal::init()?;
    let result = app.run(&mut tui).await;
    terminal::restore()?;

    result?;
    info!("dashboard closed");
    Ok(())
}
