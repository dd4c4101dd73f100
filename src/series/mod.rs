//! Pure series transforms.
//!
//! - `change`: period-over-period percent change over the full series
//! - `window`: trailing time-window slicing with one look-back point
//! - `axis`: symmetric display domain for the change bars
//! - `summary`: latest-period change per indicator
//!
//! Everything here is deterministic and free of I/O; inputs are assumed to be
//! in ascending date order and are never re-sorted.

pub mod axis;
pub mod change;
pub mod summary;
pub mod window;

pub use axis::mom_domain;
pub use change::{annotate, anomalies, percent_change, round2};
pub use summary::{LatestChange, latest_change};
pub use window::{cutoff, filter};
