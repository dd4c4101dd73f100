//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads configuration and sets up logging
//! - fetches FRED data through the shared pipeline
//! - prints reports/plots or hands off to the TUI

use clap::Parser;

use crate::cli::{Command, ShowArgs, SourceArgs, TuiArgs};
use crate::config::DashConfig;
use crate::data::FredClient;
use crate::domain::{INDICATORS, IndicatorDefinition};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `econ` binary.
pub fn run() -> Result<(), AppError> {
    // We want `econ` and `econ -i SP500` to behave like `econ tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Show(args) => handle_show(args),
        Command::Summary(args) => handle_summary(args),
        Command::List => {
            println!("{}", crate::report::format_registry());
            Ok(())
        }
    }
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    let mut config = config_from_args(&args.source)?;
    if let Some(path) = &args.log_file {
        config.log_file = path.clone();
    }
    crate::logging::init_file(&config.log_file)?;

    let indicator = resolve_indicator(&args.indicator)?;
    tracing::info!(indicator = indicator.id, window = args.window.label(), "starting dashboard");
    crate::tui::run(&config, indicator, args.window)
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    crate::logging::init_stderr();
    let config = config_from_args(&args.source)?;
    let indicator = resolve_indicator(&args.indicator)?;

    let client = FredClient::new(&config)?;
    let data = pipeline::load_chart(&client, indicator, config.limit)?;
    let view = pipeline::chart_view(&data, args.window);

    println!("{}", crate::report::format_view(&view, &data.anomalies));

    if args.plot {
        println!(
            "{}",
            crate::plot::render_ascii_chart(&view, args.width, args.height)
        );
    }
    Ok(())
}

fn handle_summary(args: SourceArgs) -> Result<(), AppError> {
    crate::logging::init_stderr();
    let config = config_from_args(&args)?;
    let client = FredClient::new(&config)?;
    let rows = pipeline::load_summary(&client)?;
    println!("{}", crate::report::format_summary(&rows));
    Ok(())
}

/// Environment config with CLI overrides applied.
pub fn config_from_args(args: &SourceArgs) -> Result<DashConfig, AppError> {
    let mut config = DashConfig::from_env()?;
    if let Some(key) = args.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
        config.api_key = Some(key.to_string());
    }
    if let Some(limit) = args.limit {
        if limit == 0 {
            return Err(AppError::config("--limit must be a positive integer."));
        }
        config.limit = limit;
    }
    Ok(config)
}

pub fn resolve_indicator(id: &str) -> Result<&'static IndicatorDefinition, AppError> {
    INDICATORS.get(id.trim()).ok_or_else(|| {
        AppError::config(format!(
            "Unknown indicator '{id}'. Available: {}.",
            INDICATORS.ids().join(", ")
        ))
    })
}

/// First tokens clap handles itself.
const PASSTHROUGH: [&str; 9] = [
    "tui", "show", "summary", "list", "help", "-h", "--help", "-V", "--version",
];

/// Insert the implicit `tui` subcommand.
///
/// `econ` and `econ -i SP500 -w 5y` open the dashboard. Explicit subcommands,
/// help, version, and unknown bare words are left for clap to handle.
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let implicit_tui = match argv.get(1).map(String::as_str) {
        None => true,
        Some(first) => !PASSTHROUGH.contains(&first) && first.starts_with('-'),
    };
    if implicit_tui {
        let at = argv.len().min(1);
        argv.insert(at, "tui".to_string());
    }
    argv
}
