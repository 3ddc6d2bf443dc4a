//! Snippet execution simulator.
//!
//! Produces a plausible console transcript for a snippet without compiling or
//! running it:
//!
//! 1. strip comments;
//! 2. bind literal declarations ([`extract`](super::extract));
//! 3. bind call-site arguments of user-defined functions ([`calls`](super::calls));
//! 4. render every output call, in source order, against the merged bindings.
//!
//! Every call works on its own [`Bindings`]; nothing is shared between
//! simulations, so concurrent callers need no locking.  Failures never
//! escape as errors: they come back as an [`ExecutionResult`] with
//! `success == false`.

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, trace};

use crate::bindings::Bindings;
use crate::lang::Language;
use crate::pattern::PatternError;

use super::calls::{bind_call_arguments, output_calls};
use super::dialect::{dialect, Dialect};
use super::extract::extract_into;
use super::source::strip_comments;

// ── Result types ──────────────────────────────────────────────────────────────

/// The outcome of one simulation.
///
/// Serialises with the field names `success`, `output`, `errorMessage`,
/// `executionTimeMs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub success: bool,
    pub output: String,
    pub error_message: Option<String>,
    pub execution_time_ms: u64,
}

impl ExecutionResult {
    fn finish(outcome: Result<String, SimulateError>, elapsed: Duration) -> Self {
        let execution_time_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        match outcome {
            Ok(output) => ExecutionResult {
                success: true,
                output,
                error_message: None,
                execution_time_ms,
            },
            Err(err) => ExecutionResult {
                success: false,
                output: String::new(),
                error_message: Some(err.to_string()),
                execution_time_ms,
            },
        }
    }
}

/// Why a simulation produced no transcript.
#[derive(Debug, Clone)]
pub enum SimulateError {
    /// The language tag names no supported language.
    UnsupportedLanguage(String),
    /// The snippet contains no recognisable output statement.
    NoOutput(Language),
    /// A syntax table failed to compile.
    Pattern(PatternError),
}

impl fmt::Display for SimulateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulateError::UnsupportedLanguage(tag) => {
                write!(f, "Language '{tag}' is not supported")
            }
            SimulateError::NoOutput(lang) => write!(
                f,
                "No output statement found: add a {} call to see output",
                output_hint(*lang)
            ),
            SimulateError::Pattern(e) => write!(f, "internal error: {e}"),
        }
    }
}

impl std::error::Error for SimulateError {}

impl From<PatternError> for SimulateError {
    fn from(e: PatternError) -> Self {
        SimulateError::Pattern(e)
    }
}

fn output_hint(lang: Language) -> &'static str {
    match lang {
        Language::Kotlin => "println(...)",
        Language::Java => "System.out.println(...)",
        Language::Python | Language::Swift => "print(...)",
        Language::JavaScript => "console.log(...)",
    }
}

// ── Entry points ──────────────────────────────────────────────────────────────

/// Simulate running `source` as a `lang` program.
pub fn simulate(source: &str, lang: Language) -> ExecutionResult {
    let started = Instant::now();
    let outcome = transcript(source, lang);
    ExecutionResult::finish(outcome, started.elapsed())
}

/// Like [`simulate`], with the language given as text (`"KOTLIN"`, `"py"`, …).
///
/// An unrecognised tag yields `success == false`.
pub fn simulate_named(source: &str, tag: &str) -> ExecutionResult {
    let started = Instant::now();
    let outcome = match tag.parse::<Language>() {
        Ok(lang) => transcript(source, lang),
        Err(e) => Err(SimulateError::UnsupportedLanguage(e.0)),
    };
    ExecutionResult::finish(outcome, started.elapsed())
}

/// The bindings a simulation of `source` would render with: literal
/// declarations merged with call-site arguments.
pub fn resolve_bindings(source: &str, lang: Language) -> Result<Bindings, SimulateError> {
    let d = dialect(lang)?;
    Ok(bind(&strip_comments(source, lang), d))
}

fn bind(text: &str, d: &Dialect) -> Bindings {
    let mut bindings = Bindings::new();
    extract_into(text, d, &mut bindings);
    bind_call_arguments(text, d, &mut bindings);
    bindings
}

fn transcript(source: &str, lang: Language) -> Result<String, SimulateError> {
    let d = dialect(lang)?;
    let text = strip_comments(source, lang);

    let bindings = bind(&text, d);
    debug!(language = %lang, bindings = bindings.len(), "bindings resolved");
    for (name, value) in bindings.sorted() {
        trace!(name, value, "binding");
    }

    let calls = output_calls(&text, d);
    if calls.is_empty() {
        debug!(language = %lang, "no output calls");
        return Err(SimulateError::NoOutput(lang));
    }
    debug!(language = %lang, calls = calls.len(), "output calls found");

    let mut output = String::new();
    for call in &calls {
        let rendered = call.render(d, &bindings);
        trace!(call = call.name, line = %rendered.trim_end_matches('\n'), "rendered");
        output.push_str(&rendered);
    }
    if output.ends_with('\n') {
        output.pop();
    }
    Ok(output)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
