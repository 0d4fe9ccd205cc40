use std::path::PathBuf;

use clap::Parser;

use crate::config::ConfigOverrides;

/// Terminal dashboard for an MT5 price recorder backend.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to a TOML config file (price_dashboard.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Backend root URL, e.g. "http://127.0.0.1:5000"
    #[arg(long)]
    pub base_url: Option<String>,

    /// Seconds between status polls
    #[arg(long)]
    pub poll_secs: Option<u64>,

    /// Initial MT5 terminal path shown in the path input
    #[arg(long)]
    pub terminal_path: Option<String>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            poll_secs: self.poll_secs,
            terminal_path: self.terminal_path.clone(),
        }
    }
}
