//! Rendering layer: chart drawing on top of plotters, output as PDF.
//!
//! ```text
//!   LatencyTable ──► scatter ──┐
//!                              ├──► DrawingArea<PdfBackend> ──► present ──► .pdf
//!   LatencySeries ─► violin ───┘
//! ```

use std::ops::Range;
use std::path::Path;

use log::info;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, DrawingAreaErrorKind, IntoDrawingArea};
use plotters_backend::DrawingErrorKind;

use crate::data::model::{LatencySeries, LatencyTable};
use crate::error::{PlotError, Result};

pub mod pdf;
pub mod scatter;
pub mod violin;

pub use pdf::PdfBackend;

/// Page size in points.
pub const CANVAS_SIZE: (u32, u32) = (640, 480);

/// Fixed output file of `scatter-plot`.
pub const SCATTER_OUTPUT: &str = "foo-scatter.pdf";
/// Fixed output file of `violin-plot`.
pub const VIOLIN_OUTPUT: &str = "foo.pdf";

/// Relative padding added around autoscaled axes.
const AXIS_MARGIN: f64 = 0.05;

/// Largest magnitude an axis end may take.  Keeps `end - start` finite for
/// any axis, which plotters needs to place ticks.
pub const AXIS_LIMIT: f64 = f64::MAX / 2.0;

/// Clamp an axis end into `-AXIS_LIMIT..=AXIS_LIMIT`.
pub fn clamp_axis(v: f64) -> f64 {
    v.clamp(-AXIS_LIMIT, AXIS_LIMIT)
}

/// Widen `range` by [`AXIS_MARGIN`] on both ends.  Both ends are clamped
/// with [`clamp_axis`]; a range that is empty after clamping is widened
/// around its start by the margin, or by 0.5 for small values.
pub fn padded_range(range: Range<f64>) -> Range<f64> {
    // Halves first so the span cannot overflow.
    let half_span = range.end / 2.0 - range.start / 2.0;
    let padded = if half_span > 0.0 {
        let pad = half_span * (2.0 * AXIS_MARGIN);
        clamp_axis(range.start - pad)..clamp_axis(range.end + pad)
    } else {
        clamp_axis(range.start)..clamp_axis(range.end)
    };
    if padded.end > padded.start {
        return padded;
    }
    let centre = clamp_axis(range.start);
    let pad = (centre.abs() * AXIS_MARGIN).max(0.5);
    clamp_axis(centre - pad)..clamp_axis(centre + pad)
}

pub(crate) fn render_error<E: std::error::Error + Send + Sync>(
    err: DrawingAreaErrorKind<E>,
) -> PlotError {
    PlotError::Render(err.to_string())
}

/// Write the finished page of `root` to `path`.
pub fn present(root: &DrawingArea<PdfBackend, Shift>, path: &Path) -> Result<()> {
    root.present().map_err(|err| match err {
        DrawingAreaErrorKind::BackendError(DrawingErrorKind::DrawingError(source)) => {
            PlotError::OutputWrite {
                path: path.to_path_buf(),
                source,
            }
        }
        other => render_error(other),
    })?;
    info!("wrote {}", path.display());
    Ok(())
}

/// Draw the scatter plot of `table` and save it as a PDF at `path`.
pub fn write_scatter_pdf(table: &LatencyTable, path: &Path) -> Result<()> {
    let root = PdfBackend::new(path, CANVAS_SIZE).into_drawing_area();
    scatter::draw_scatter(table, &root)?;
    present(&root, path)
}

/// Draw the violin plot of `series` and save it as a PDF at `path`.
pub fn write_violin_pdf(series: &LatencySeries, path: &Path) -> Result<()> {
    let root = PdfBackend::new(path, CANVAS_SIZE).into_drawing_area();
    violin::draw_violin(series, &root)?;
    present(&root, path)
}
