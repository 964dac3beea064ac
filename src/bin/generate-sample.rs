use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use latency_plots::cli::init_logging;
use latency_plots::data::synthetic::closed_loop_run;
use log::info;

const SCATTER_SAMPLE: &str = "sample-scatter.csv";
const VIOLIN_SAMPLE: &str = "sample-latencies.txt";

/// Write synthetic latency files for trying out scatter-plot and violin-plot.
#[derive(Debug, Parser)]
#[command(name = "generate-sample", version)]
struct Cli {
    /// Number of requests to generate
    #[arg(long, default_value_t = 1000)]
    rows: usize,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let run = closed_loop_run(cli.rows, cli.seed).context("building latency distribution")?;

    let mut csv = csv::Writer::from_path(SCATTER_SAMPLE)
        .with_context(|| format!("creating {SCATTER_SAMPLE}"))?;
    for sample in &run {
        csv.serialize(sample)
            .with_context(|| format!("writing {SCATTER_SAMPLE}"))?;
    }
    csv.flush().with_context(|| format!("writing {SCATTER_SAMPLE}"))?;

    let file = File::create(VIOLIN_SAMPLE).with_context(|| format!("creating {VIOLIN_SAMPLE}"))?;
    let mut out = BufWriter::new(file);
    for sample in &run {
        writeln!(out, "{}", sample.latency).with_context(|| format!("writing {VIOLIN_SAMPLE}"))?;
    }
    out.flush().with_context(|| format!("writing {VIOLIN_SAMPLE}"))?;

    info!("wrote {} requests", run.len());
    println!("Wrote {} requests to {SCATTER_SAMPLE} and {VIOLIN_SAMPLE}", run.len());
    Ok(())
}
