use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::render_error;
use crate::color::{grid_color, series_color, VIOLIN_ALPHA};
use crate::data::density::ViolinStats;
use crate::data::model::LatencySeries;
use crate::error::{PlotError, Result};

pub const Y_LABEL: &str = "Latency (seconds)";

/// Centre of the single violin on the x axis.
const POSITION: f64 = 1.0;
/// Full width of the violin at peak density.
const WIDTH: f64 = 0.5;
/// Half length of the median and extrema bars.
const BAR_HALF_LENGTH: f64 = WIDTH / 4.0;
const FONT_SIZE: u32 = 13;
const Y_HEADROOM: f64 = 1.05;

/// Outline of the violin body: right side bottom → top, then left side
/// top → bottom.
pub fn body_outline(stats: &ViolinStats) -> Vec<(f64, f64)> {
    let peak = stats.peak_density();
    let half_width = |d: f64| {
        if peak > 0.0 {
            d / peak * WIDTH / 2.0
        } else {
            0.0
        }
    };
    let right = stats
        .coords
        .iter()
        .zip(&stats.density)
        .map(|(&y, &d)| (POSITION + half_width(d), y));
    let left = stats
        .coords
        .iter()
        .zip(&stats.density)
        .rev()
        .map(|(&y, &d)| (POSITION - half_width(d), y));
    right.chain(left).collect()
}

/// Upper end of the y axis: headroom above `max`, saturating at
/// `f64::MAX`, or `1.0` when nothing lies above zero.
pub fn y_axis_max(max: f64) -> f64 {
    if max > 0.0 {
        (max * Y_HEADROOM).min(f64::MAX)
    } else {
        1.0
    }
}

fn hbar(y: f64) -> Vec<(f64, f64)> {
    vec![(POSITION - BAR_HALF_LENGTH, y), (POSITION + BAR_HALF_LENGTH, y)]
}

/// Draw one violin summarising `series`, with median and extrema markers.
/// The y axis starts at zero and carries horizontal grid lines.
pub fn draw_violin<DB: DrawingBackend>(
    series: &LatencySeries,
    root: &DrawingArea<DB, Shift>,
) -> Result<()> {
    let stats = ViolinStats::from_values(&series.values)
        .ok_or_else(|| PlotError::Render("no finite latency values to draw".into()))?;

    let y_max = y_axis_max(stats.max);
    debug!(
        "violin min={} median={} max={} y_max={y_max}",
        stats.min, stats.median, stats.max
    );

    root.fill(&WHITE).map_err(render_error)?;

    let mut chart = ChartBuilder::on(root)
        .margin(15)
        .x_label_area_size(25)
        .y_label_area_size(70)
        .build_cartesian_2d((POSITION - 0.5)..(POSITION + 0.5), 0.0..y_max)
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(grid_color())
        .light_line_style(TRANSPARENT)
        .x_labels(1)
        .x_label_formatter(&|_| String::new())
        .y_desc(Y_LABEL)
        .label_style(("sans-serif", FONT_SIZE).into_font())
        .axis_desc_style(("sans-serif", FONT_SIZE).into_font())
        .draw()
        .map_err(render_error)?;

    let color = series_color();
    let outline = body_outline(&stats);
    chart
        .draw_series(std::iter::once(Polygon::new(
            outline.clone(),
            color.mix(VIOLIN_ALPHA).filled(),
        )))
        .map_err(render_error)?;
    chart
        .draw_series(std::iter::once(PathElement::new(
            outline,
            color.mix(VIOLIN_ALPHA),
        )))
        .map_err(render_error)?;

    // Extrema bars, the vertical bar between them, then the median.
    let markers = vec![
        hbar(stats.min),
        hbar(stats.max),
        vec![(POSITION, stats.min), (POSITION, stats.max)],
        hbar(stats.median),
    ];
    chart
        .draw_series(markers.into_iter().map(|line| PathElement::new(line, color)))
        .map_err(render_error)?;

    Ok(())
}
