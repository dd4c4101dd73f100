//! Reporting utilities: formatted terminal output for the CLI commands.
//!
//! We keep formatting code in one place so:
//! - the pipeline code stays clean and testable
//! - output changes are localized (important for snapshot tests)

pub mod format;

pub use format::*;
