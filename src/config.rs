//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};
use clap::Parser;

pub const TITLES_FILE: &str = "speedrun_titles.json";
pub const RUN_DATA_FILE: &str = "speedrun_data.json";
pub const KEYBINDS_FILE: &str = "keybinds.json";
pub const LOG_FILE: &str = "splitwatch.log";

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "splitwatch")]
#[command(about = "A terminal speedrun stopwatch with segments, personal bests and rebindable hotkeys")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Directory holding the title, run data and keybind stores
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Directory run exports are written to (defaults to the data directory)
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Open this title directly, adding it if it is new
    #[arg(short, long)]
    pub title: Option<String>,

    /// Milliseconds between display refreshes while running
    #[arg(long, default_value = "16", value_parser = clap::value_parser!(u64).range(1..=1000))]
    pub tick_ms: u64,

    /// Log file (defaults to splitwatch.log in the data directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    pub fn titles_path(&self) -> PathBuf {
        self.data_dir.join(TITLES_FILE)
    }

    pub fn run_data_path(&self) -> PathBuf {
        self.data_dir.join(RUN_DATA_FILE)
    }

    pub fn keybinds_path(&self) -> PathBuf {
        self.data_dir.join(KEYBINDS_FILE)
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| self.data_dir.clone())
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join(LOG_FILE))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
