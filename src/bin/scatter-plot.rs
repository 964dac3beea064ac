use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use latency_plots::cli::{init_logging, InputArgs};
use latency_plots::{load_scatter_csv, write_scatter_pdf, SCATTER_OUTPUT};

/// Scatter plot of request latency against start time.
#[derive(Debug, Parser)]
#[command(name = "scatter-plot", version)]
struct Cli {
    #[command(flatten)]
    args: InputArgs,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let table = load_scatter_csv(&cli.args.input)
        .with_context(|| format!("loading {}", cli.args.input.display()))?;
    write_scatter_pdf(&table, Path::new(SCATTER_OUTPUT)).context("writing scatter plot")?;
    Ok(())
}
