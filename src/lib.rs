//! `econ-dash` library crate.
//!
//! The binary (`econ`) is a thin wrapper around this library so that:
//!
//! - the series math and window logic are testable without a terminal
//! - the fetch layer can be swapped for a fake source in tests
//! - the CLI and the TUI share one pipeline

pub mod app;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod domain;
pub mod error;
pub mod logging;
pub mod plot;
pub mod report;
pub mod series;
pub mod tui;
