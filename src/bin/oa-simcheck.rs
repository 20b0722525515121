//! oa-simcheck -- validate a fuzzy word-search index against the brute-force oracle.
//!
//! Usage:
//!   oa-simcheck --builder ./prep --searcher ./search --db db.txt --query q.txt
//!   oa-simcheck --searcher ./search --db db.txt --query q.txt --index out/index.bin

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use oa_simcheck::validate::{DEFAULT_MAX_EXAMPLES, DEFAULT_MAXDIST, SampleSize};
use oa_simcheck::{SystemExecutor, ValidateConfig, Validator, report};

#[derive(Parser)]
#[command(name = "oa-simcheck")]
#[command(about = "Check a fuzzy word-search index against a brute-force edit-distance oracle")]
struct Cli {
    /// Index builder executable (skipped when --index is given)
    #[arg(long, env = "SIMCHECK_BUILDER")]
    builder: Option<PathBuf>,

    /// Searcher executable
    #[arg(long, env = "SIMCHECK_SEARCHER")]
    searcher: PathBuf,

    /// Database word list, one word per line
    #[arg(long)]
    db: PathBuf,

    /// Query word list, one word per line
    #[arg(long)]
    query: PathBuf,

    /// Pre-built index to search instead of building one
    #[arg(long)]
    index: Option<PathBuf>,

    /// Edit-distance threshold
    #[arg(long, default_value_t = DEFAULT_MAXDIST)]
    maxdist: usize,

    /// Only use the first N database words (requires --limit-query)
    #[arg(long)]
    limit_db: Option<usize>,

    /// Only use the first N queries (requires --limit-db)
    #[arg(long)]
    limit_query: Option<usize>,

    /// Maximum number of example mismatches to show
    #[arg(long, default_value_t = DEFAULT_MAX_EXAMPLES)]
    max_show: usize,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Save the oracle's expected bits to this file
    #[arg(long)]
    write_expected: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> oa_simcheck::SimcheckResult<ValidateConfig> {
        let sample = SampleSize::from_flags(self.limit_db, self.limit_query)?;
        let mut config = ValidateConfig::new(self.searcher, self.db, self.query);
        config.builder = self.builder;
        config.index = self.index;
        config.maxdist = self.maxdist;
        config.sample = sample;
        config.max_examples = self.max_show;
        config.expected_out = self.write_expected;
        config.check()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr; stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;
    let config = cli.into_config()?;

    let executor = SystemExecutor;
    let result = Validator::new(config, &executor)
        .run()
        .context("validation aborted")?;

    let mut stdout = std::io::stdout().lock();
    if json {
        report::write_validation_json(&mut stdout, &result)?;
    } else {
        report::write_validation(&mut stdout, &result).context("failed to write report")?;
    }

    Ok(if result.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
