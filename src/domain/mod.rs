//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - indicator metadata (`IndicatorDefinition`) and the built-in registry
//! - raw and annotated observations (`Observation`, `AnnotatedObservation`)
//! - view selectors and outputs (`TimeWindow`, `AxisDomain`, `DataAnomaly`)

pub mod registry;
pub mod types;

pub use registry::*;
pub use types::*;
