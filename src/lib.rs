//! Scatter and violin plots of benchmark latency data, written as PDF.
//!
//! The two command-line tools (`scatter-plot`, `violin-plot`) are thin
//! wrappers around [`data::loader`] and [`render`]: load the input, draw one
//! chart, save it to a fixed file name.

pub mod cli;
pub mod color;
pub mod data;
pub mod error;
pub mod render;

pub use data::loader::{load_latency_columns, load_scatter_csv};
pub use data::model::{LatencySample, LatencySeries, LatencyTable};
pub use error::{PlotError, Result};
pub use render::{write_scatter_pdf, write_violin_pdf, SCATTER_OUTPUT, VIOLIN_OUTPUT};
