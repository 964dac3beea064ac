use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use latency_plots::cli::{init_logging, InputArgs};
use latency_plots::{load_latency_columns, write_violin_pdf, VIOLIN_OUTPUT};

/// Violin plot of the latency distribution in a whitespace-delimited file.
#[derive(Debug, Parser)]
#[command(name = "violin-plot", version)]
struct Cli {
    #[command(flatten)]
    args: InputArgs,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let series = load_latency_columns(&cli.args.input)
        .with_context(|| format!("loading {}", cli.args.input.display()))?;
    write_violin_pdf(&series, Path::new(VIOLIN_OUTPUT)).context("writing violin plot")?;
    Ok(())
}
