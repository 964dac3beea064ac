use std::ops::Range;

use serde::Serialize;

// ---------------------------------------------------------------------------
// LatencySample – one row of a scatter input file
// ---------------------------------------------------------------------------

/// A single request: when it started and how long it took.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatencySample {
    /// Start time of the request (x).
    pub start: f64,
    /// Latency of the request in seconds (y).
    pub latency: f64,
}

impl LatencySample {
    /// Whether both coordinates can be placed on a chart.
    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.latency.is_finite()
    }
}

// ---------------------------------------------------------------------------
// LatencyTable – the scatter dataset
// ---------------------------------------------------------------------------

/// All rows of a scatter input, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatencyTable {
    pub samples: Vec<LatencySample>,
}

impl LatencyTable {
    pub fn new(samples: Vec<LatencySample>) -> Self {
        LatencyTable { samples }
    }

    /// Number of rows, including rows with missing values.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Rows that can actually be drawn.
    pub fn finite_samples(&self) -> impl Iterator<Item = &LatencySample> {
        self.samples.iter().filter(|s| s.is_finite())
    }

    /// Span of the finite `start` values.
    pub fn x_range(&self) -> Option<Range<f64>> {
        finite_span(self.finite_samples().map(|s| s.start))
    }

    /// Span of the finite `latency` values.
    pub fn y_range(&self) -> Option<Range<f64>> {
        finite_span(self.finite_samples().map(|s| s.latency))
    }
}

// ---------------------------------------------------------------------------
// LatencySeries – the violin dataset
// ---------------------------------------------------------------------------

/// A flat sequence of latency values, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatencySeries {
    pub values: Vec<f64>,
}

impl LatencySeries {
    pub fn new(values: Vec<f64>) -> Self {
        LatencySeries { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// `min..max` over the finite values of `values`, `None` if there are none.
fn finite_span(values: impl Iterator<Item = f64>) -> Option<Range<f64>> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<Range<f64>>, v| match acc {
            None => Some(v..v),
            Some(r) => Some(r.start.min(v)..r.end.max(v)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_skip_missing_values() {
        let table = LatencyTable::new(vec![
            LatencySample { start: 0.0, latency: 0.5 },
            LatencySample { start: f64::NAN, latency: 9.0 },
            LatencySample { start: 3.0, latency: 0.1 },
        ]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.finite_samples().count(), 2);
        assert_eq!(table.x_range(), Some(0.0..3.0));
        assert_eq!(table.y_range(), Some(0.1..0.5));
    }

    #[test]
    fn empty_series() {
        let series = LatencySeries::default();
        assert!(series.is_empty());
        assert_eq!(series.len(), 0);
    }
}
