//! Terminal plotting for `econ show --plot`.

pub mod ascii;

pub use ascii::render_ascii_chart;
