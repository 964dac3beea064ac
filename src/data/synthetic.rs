use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, LogNormal, NormalError};

use super::model::LatencySample;

/// Median latency of generated requests, in seconds.
const MEDIAN_LATENCY: f64 = 0.01;
/// Shape of the log-normal latency distribution.
const LATENCY_SIGMA: f64 = 0.5;

/// A closed-loop run of `rows` requests: each request starts when the
/// previous one finished.  The same seed always yields the same run.
pub fn closed_loop_run(rows: usize, seed: u64) -> Result<Vec<LatencySample>, NormalError> {
    let dist = LogNormal::new(MEDIAN_LATENCY.ln(), LATENCY_SIGMA)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut clock = 0.0;
    Ok((0..rows)
        .map(|_| {
            let latency = dist.sample(&mut rng);
            let sample = LatencySample {
                start: clock,
                latency,
            };
            clock += latency;
            sample
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_are_reproducible() {
        assert_eq!(closed_loop_run(50, 7).unwrap(), closed_loop_run(50, 7).unwrap());
        assert_ne!(closed_loop_run(50, 7).unwrap(), closed_loop_run(50, 8).unwrap());
    }

    #[test]
    fn requests_follow_each_other() {
        let run = closed_loop_run(20, 1).unwrap();
        assert_eq!(run.len(), 20);
        assert_eq!(run[0].start, 0.0);
        for pair in run.windows(2) {
            assert!(pair[0].latency > 0.0);
            assert!((pair[1].start - (pair[0].start + pair[0].latency)).abs() < 1e-12);
        }
    }
}
