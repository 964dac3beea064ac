use log::debug;
use plotters::coord::Shift;
use plotters::element::Pixel;
use plotters::prelude::*;

use super::{padded_range, render_error};
use crate::color::series_color;
use crate::data::loader::{LATENCY_COLUMN, START_COLUMN};
use crate::data::model::LatencyTable;
use crate::error::Result;

const FONT_SIZE: u32 = 10;

/// Draw one marker per drawable row of `table` at `(start, latency)`.
/// Markers are single pixels, which the PDF backend renders as 1 pt wide
/// dots (a marker area of 1 pt²).
/// Axes are labelled with the column names; there is no title.
pub fn draw_scatter<DB: DrawingBackend>(
    table: &LatencyTable,
    root: &DrawingArea<DB, Shift>,
) -> Result<()> {
    let x_range = table.x_range().map(padded_range).unwrap_or(0.0..1.0);
    let y_range = table.y_range().map(padded_range).unwrap_or(0.0..1.0);
    debug!("scatter axes x={x_range:?} y={y_range:?}");

    root.fill(&WHITE).map_err(render_error)?;

    let mut chart = ChartBuilder::on(root)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(START_COLUMN)
        .y_desc(LATENCY_COLUMN)
        .label_style(("sans-serif", FONT_SIZE).into_font())
        .axis_desc_style(("sans-serif", FONT_SIZE).into_font())
        .draw()
        .map_err(render_error)?;

    let color = series_color();
    chart
        .draw_series(
            table
                .finite_samples()
                .map(|s| Pixel::new((s.start, s.latency), color)),
        )
        .map_err(render_error)?;

    Ok(())
}
