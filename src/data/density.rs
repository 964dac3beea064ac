use std::f64::consts::PI;

/// Number of points at which the density is evaluated.
pub const DENSITY_POINTS: usize = 100;

// ---------------------------------------------------------------------------
// ViolinStats – everything needed to draw one violin
// ---------------------------------------------------------------------------

/// Summary of one sample set: density curve plus the markers a violin can
/// show.
#[derive(Debug, Clone, PartialEq)]
pub struct ViolinStats {
    /// Evaluation points, evenly spaced from `min` to `max`.
    pub coords: Vec<f64>,
    /// Estimated density at each of `coords`.
    pub density: Vec<f64>,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

impl ViolinStats {
    /// Compute the statistics over the finite values of `values`.
    /// Returns `None` if there are none.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return None;
        }
        finite.sort_by(f64::total_cmp);

        let min = finite[0];
        let max = finite[finite.len() - 1];
        let n = finite.len() as f64;
        let mean = finite.iter().map(|v| v / n).sum::<f64>();
        let coords = linspace(min, max, DENSITY_POINTS);

        let density = match scott_bandwidth(&finite) {
            Some(bw) => {
                log::debug!("kde bandwidth {bw:.6} over {} samples", finite.len());
                coords.iter().map(|&x| gaussian_kde(&finite, bw, x)).collect()
            }
            // Every sample is identical: collapse to a flat spike.
            None => vec![1.0; coords.len()],
        };

        Some(ViolinStats {
            coords,
            density,
            mean,
            median: median_sorted(&finite),
            min,
            max,
        })
    }

    /// Largest density value, used to scale the violin width.
    pub fn peak_density(&self) -> f64 {
        self.density.iter().copied().fold(0.0, f64::max)
    }
}

/// Median of sorted values; the mean of the two middle values for even
/// lengths.
fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        sorted[n / 2 - 1] / 2.0 + sorted[n / 2] / 2.0
    }
}

/// `n` evenly spaced points from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Kernel standard deviation by Scott's rule: `n^(-1/5) * std(ddof = 1)`.
/// `None` when the spread is zero (or there is a single sample) or too wide
/// to represent.
fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = values.iter().map(|v| v / n as f64).sum::<f64>();
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let bw = (n as f64).powf(-0.2) * var.sqrt();
    (bw.is_finite() && bw > 0.0).then_some(bw)
}

fn gaussian_kde(values: &[f64], bw: f64, x: f64) -> f64 {
    let norm = 1.0 / (values.len() as f64 * bw * (2.0 * PI).sqrt());
    values
        .iter()
        .map(|&v| (-0.5 * ((x - v) / bw).powi(2)).exp())
        .sum::<f64>()
        * norm
}
