//! End-to-end validation protocol.
//!
//! ```text
//! LOAD_INPUTS → [BUILD_INDEX] → SEARCH → PARSE_OUTPUT → COMPUTE_ORACLE
//!             → COMPARE → CLEANUP
//! ```
//!
//! REPORT is not a stage of [`Validator::run`]: `run` returns the
//! [`ValidationResult`] once cleanup is done, and the caller renders it with
//! [`crate::report`].
//!
//! Every transient file the validator creates (sampled DB/query sources, the
//! temporary index) is held as a [`TempPath`], so it is removed on every exit
//! path: explicitly at the end of a run, or on drop when a stage fails early.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::TempPath;
use tracing::{info, warn};

use crate::bits::{self, BitVector};
use crate::compare::{Comparison, Mismatch};
use crate::error::{SimcheckError, SimcheckResult};
use crate::oracle;
use crate::process::{IndexRunner, ProcessExecutor};
use crate::util::atomic::atomic_write;
use crate::words;

/// Default edit-distance threshold.
pub const DEFAULT_MAXDIST: usize = 3;

/// Default number of example mismatches kept in a result.
pub const DEFAULT_MAX_EXAMPLES: usize = 10;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LoadInputs,
    BuildIndex,
    Search,
    ParseOutput,
    ComputeOracle,
    Compare,
    Cleanup,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LoadInputs => "load",
            Self::BuildIndex => "prep",
            Self::Search => "search",
            Self::ParseOutput => "parse",
            Self::ComputeOracle => "oracle",
            Self::Compare => "compare",
            Self::Cleanup => "cleanup",
        })
    }
}

/// Requested sample sizes; DB and query always come as a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSize {
    pub db: usize,
    pub query: usize,
}

impl SampleSize {
    /// Pair up two optional limits.
    ///
    /// # Errors
    ///
    /// [`SimcheckError::Config`] when exactly one of the two is given.
    pub fn from_flags(db: Option<usize>, query: Option<usize>) -> SimcheckResult<Option<Self>> {
        match (db, query) {
            (Some(db), Some(query)) => Ok(Some(Self { db, query })),
            (None, None) => Ok(None),
            _ => Err(SimcheckError::Config(
                "sampling needs both a DB limit and a query limit".to_owned(),
            )),
        }
    }
}

/// Options for one validation run.
#[derive(Debug, Clone)]
pub struct ValidateConfig {
    /// Index builder executable; required unless `index` is given.
    pub builder: Option<PathBuf>,
    /// Searcher executable.
    pub searcher: PathBuf,
    /// Database word list.
    pub db: PathBuf,
    /// Query word list.
    pub query: PathBuf,
    /// Pre-built index; skips the build stage and is never deleted.
    pub index: Option<PathBuf>,
    /// Edit-distance threshold.
    pub maxdist: usize,
    pub sample: Option<SampleSize>,
    /// Cap on example mismatches kept in the result.
    pub max_examples: usize,
    /// Where to save the oracle's bits as 0/1 text.
    pub expected_out: Option<PathBuf>,
}

impl ValidateConfig {
    pub fn new(searcher: PathBuf, db: PathBuf, query: PathBuf) -> Self {
        Self {
            builder: None,
            searcher,
            db,
            query,
            index: None,
            maxdist: DEFAULT_MAXDIST,
            sample: None,
            max_examples: DEFAULT_MAX_EXAMPLES,
            expected_out: None,
        }
    }

    /// Reject option combinations that cannot produce a meaningful run.
    ///
    /// Touches no files.
    ///
    /// # Errors
    ///
    /// [`SimcheckError::Config`] describing the first problem found.
    pub fn check(&self) -> SimcheckResult<()> {
        if self.index.is_some() && self.sample.is_some() {
            return Err(SimcheckError::Config(
                "a pre-built index cannot be combined with sampling: \
                 the index would not match the sampled DB"
                    .to_owned(),
            ));
        }
        if self.index.is_none() && self.builder.is_none() {
            return Err(SimcheckError::Config(
                "either a pre-built index or an index builder is required".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Verdict of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pass => "OK",
            Self::Fail => "NG",
        }
    }
}

/// Outcome of a completed comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub status: Status,
    pub maxdist: usize,
    /// Whether the inputs were truncated samples.
    pub sampled: bool,
    pub db_words: usize,
    pub queries: usize,
    /// Oracle bit count; always equals `queries`.
    pub expected_len: usize,
    /// Bits parsed from the searcher.
    pub actual_len: usize,
    /// Total positional disagreements.
    pub mismatch_count: usize,
    /// First disagreements by ascending position, at most `max_examples`.
    pub examples: Vec<Mismatch>,
    pub max_examples: usize,
}

impl ValidationResult {
    pub fn passed(&self) -> bool {
        self.status == Status::Pass
    }

    pub fn length_mismatch(&self) -> bool {
        self.expected_len != self.actual_len
    }
}

/// A file the run reads from: either caller-owned or created by the run.
#[derive(Debug)]
enum Source {
    Given(PathBuf),
    Transient(TempPath),
}

impl Source {
    fn path(&self) -> &Path {
        match self {
            Self::Given(p) => p.as_path(),
            Self::Transient(t) => &**t,
        }
    }

    /// Delete the file if this run created it.
    fn release(self) {
        if let Self::Transient(t) = self {
            let path = t.to_path_buf();
            if let Err(e) = t.close() {
                warn!(path = %path.display(), error = %e, "failed to remove transient file");
            }
        }
    }
}

struct Inputs {
    db_words: Vec<String>,
    queries: Vec<String>,
    db_source: Source,
    query_source: Source,
}

/// Runs the validation protocol against one system under test.
pub struct Validator<'a, E: ProcessExecutor + ?Sized> {
    config: ValidateConfig,
    executor: &'a E,
}

impl<'a, E: ProcessExecutor + ?Sized> Validator<'a, E> {
    pub fn new(config: ValidateConfig, executor: &'a E) -> Self {
        Self { config, executor }
    }

    /// Run the protocol end to end.
    ///
    /// A disagreement between oracle and searcher is reported through
    /// [`ValidationResult::status`]; only configuration, I/O, process and
    /// parse problems come back as errors.
    ///
    /// # Errors
    ///
    /// Any [`SimcheckError`]; configuration errors are raised before any file
    /// is read or process launched.
    pub fn run(&self) -> SimcheckResult<ValidationResult> {
        self.config.check()?;

        let inputs = self.load_inputs()?;
        let runner = IndexRunner::new(
            self.executor,
            self.config.builder.clone(),
            self.config.searcher.clone(),
        );

        let index = match &self.config.index {
            Some(path) => {
                info!(stage = %Stage::BuildIndex, index = %path.display(), "using pre-built index");
                Source::Given(path.clone())
            }
            None => Source::Transient(runner.build(inputs.db_source.path())?),
        };

        let raw = runner.search(inputs.query_source.path(), index.path())?;
        info!(stage = %Stage::Search, bytes = raw.len(), "search finished");

        let actual = bits::parse_strict(&raw)?;
        info!(stage = %Stage::ParseOutput, bits = actual.len(), "parsed search output");

        let expected =
            oracle::expected_bits(&inputs.queries, &inputs.db_words, self.config.maxdist);
        info!(
            stage = %Stage::ComputeOracle,
            bits = expected.len(),
            hits = expected.count_ones(),
            "computed expected bits"
        );

        if let Some(out) = &self.config.expected_out {
            atomic_write(out, &format!("{expected}\n"))?;
            info!(path = %out.display(), "saved expected bits");
        }

        let result = self.compare(&inputs, &expected, &actual);

        info!(stage = %Stage::Cleanup, "removing transient files");
        index.release();
        inputs.db_source.release();
        inputs.query_source.release();

        Ok(result)
    }

    fn load_inputs(&self) -> SimcheckResult<Inputs> {
        let Some(sample) = self.config.sample else {
            let db_words = words::read_words(&self.config.db, None)?;
            let queries = words::read_words(&self.config.query, None)?;
            info!(
                stage = %Stage::LoadInputs,
                db = db_words.len(),
                queries = queries.len(),
                "loaded full inputs"
            );
            return Ok(Inputs {
                db_words,
                queries,
                db_source: Source::Given(self.config.db.clone()),
                query_source: Source::Given(self.config.query.clone()),
            });
        };

        let db_words = words::read_words(&self.config.db, Some(sample.db))?;
        let queries = words::read_words(&self.config.query, Some(sample.query))?;
        info!(
            stage = %Stage::LoadInputs,
            db = db_words.len(),
            queries = queries.len(),
            "loaded sample"
        );

        let db_source = Source::Transient(words::materialize(&db_words, "db_sample_")?);
        let query_source = Source::Transient(words::materialize(&queries, "query_sample_")?);

        Ok(Inputs {
            db_words,
            queries,
            db_source,
            query_source,
        })
    }

    fn compare(
        &self,
        inputs: &Inputs,
        expected: &BitVector,
        actual: &BitVector,
    ) -> ValidationResult {
        let comparison = Comparison::new(expected, actual);
        let status = if comparison.passed() {
            Status::Pass
        } else {
            Status::Fail
        };

        info!(
            stage = %Stage::Compare,
            expect = comparison.expected_len,
            got = comparison.actual_len,
            mismatches = comparison.mismatches.len(),
            status = status.label(),
            "compared"
        );

        let mismatch_count = comparison.mismatches.len();
        let mut examples = comparison.mismatches;
        examples.truncate(self.config.max_examples);

        ValidationResult {
            status,
            maxdist: self.config.maxdist,
            sampled: self.config.sample.is_some(),
            db_words: inputs.db_words.len(),
            queries: inputs.queries.len(),
            expected_len: comparison.expected_len,
            actual_len: comparison.actual_len,
            mismatch_count,
            examples,
            max_examples: self.config.max_examples,
        }
    }
}
