use std::path::PathBuf;

use clap::Args;

/// The single positional argument both plotting tools take.
#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// File with the benchmark latencies to plot
    pub input: PathBuf,
}

/// Install the `env_logger` backend.  Warnings and errors are shown by
/// default; `RUST_LOG` overrides the filter.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}
