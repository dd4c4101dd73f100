//! Upstream data access.
//!
//! `ObservationSource` is the seam between the pipeline and the network:
//! `FredClient` implements it over HTTP, tests implement it in memory.

pub mod fred;

pub use fred::{FredClient, ObservationSource, parse_observations};
