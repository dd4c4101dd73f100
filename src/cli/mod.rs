//! Command-line parsing for the FRED economic dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the data pipeline.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::TimeWindow;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "econ", version, about = "U.S. economic indicator dashboard (FRED-based)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard.
    Tui(TuiArgs),
    /// Print one indicator's windowed series, change domain, and optional plot.
    Show(ShowArgs),
    /// Print the latest period-over-period change for every indicator.
    Summary(SourceArgs),
    /// List the available indicators.
    List,
}

/// Options shared by every command that talks to FRED.
#[derive(Debug, Args, Clone, Default)]
pub struct SourceArgs {
    /// FRED API key (overrides FRED_API_KEY).
    #[arg(long, env = "FRED_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Number of most recent observations to request.
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    /// Indicator id to open first (GDP, UNEMPLOYMENT, INFLATION, FED_RATE, SP500).
    #[arg(short = 'i', long, default_value = "GDP")]
    pub indicator: String,

    /// Initial time window.
    #[arg(short = 'w', long, value_enum, default_value_t = TimeWindow::OneYear)]
    pub window: TimeWindow,

    /// Log file (overrides ECON_DASH_LOG).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Indicator id (GDP, UNEMPLOYMENT, INFLATION, FED_RATE, SP500).
    #[arg(short = 'i', long)]
    pub indicator: String,

    /// Time window.
    #[arg(short = 'w', long, value_enum, default_value_t = TimeWindow::OneYear)]
    pub window: TimeWindow,

    /// Render an ASCII chart below the table.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    #[command(flatten)]
    pub source: SourceArgs,
}
