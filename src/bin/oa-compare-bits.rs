//! oa-compare-bits -- Hamming distance between two 0/1 result files.
//!
//! Usage: oa-compare-bits --pred output/result --truth ground-truth/result

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use oa_simcheck::bits::load_lenient;
use oa_simcheck::compare::Comparison;
use oa_simcheck::report;

#[derive(Parser)]
#[command(name = "oa-compare-bits")]
#[command(about = "Compare bitstring result files with Hamming distance")]
struct Cli {
    /// Predicted result file (0/1 bitstring)
    #[arg(long)]
    pred: PathBuf,

    /// Ground truth result file (0/1 bitstring)
    #[arg(long)]
    truth: PathBuf,

    /// Show up to this many mismatch samples
    #[arg(long, default_value_t = 20)]
    max_show: usize,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let pred = load_lenient(&cli.pred)?;
    let truth = load_lenient(&cli.truth)?;
    let cmp = Comparison::new(&truth, &pred);

    report::write_hamming(&mut std::io::stdout().lock(), &cmp, cli.max_show)?;

    Ok(if cmp.hamming() == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
