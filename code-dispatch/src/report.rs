//! Mapping of raw process outcomes onto the user-facing report.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::{
    error::Error,
    types::{Language, ProcessOutcome, Stage},
};

/// Reported when a program exits cleanly without printing anything
pub const NO_OUTPUT_SENTINEL: &str = "Code executed successfully (no output)";

/// Appended when a captured stream hit the capture limit
pub const TRUNCATION_NOTE: &str = "[output truncated]";

/// Final result of one execution request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionReport {
    Success(String),
    CompileError(String),
    RuntimeError(String),
    Timeout(Duration),
    ToolchainMissing { tool: String, hint: String },
    UnsupportedLanguage(String),
    /// The request violated a precondition before anything ran
    Usage(String),
    InternalError(String),
}

/// Discriminant of [`ExecutionReport`], for logging and transports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Success,
    CompileError,
    RuntimeError,
    Timeout,
    ToolchainMissing,
    UnsupportedLanguage,
    Usage,
    InternalError,
}

impl ExecutionReport {
    pub fn kind(&self) -> ReportKind {
        match self {
            ExecutionReport::Success(_) => ReportKind::Success,
            ExecutionReport::CompileError(_) => ReportKind::CompileError,
            ExecutionReport::RuntimeError(_) => ReportKind::RuntimeError,
            ExecutionReport::Timeout(_) => ReportKind::Timeout,
            ExecutionReport::ToolchainMissing { .. } => ReportKind::ToolchainMissing,
            ExecutionReport::UnsupportedLanguage(_) => ReportKind::UnsupportedLanguage,
            ExecutionReport::Usage(_) => ReportKind::Usage,
            ExecutionReport::InternalError(_) => ReportKind::InternalError,
        }
    }

    /// True when the request could not be run at all because of a host fault
    pub fn is_internal_error(&self) -> bool {
        matches!(self, ExecutionReport::InternalError(_))
    }

    /// Collapse an error raised anywhere in the pipeline into a report
    pub fn from_error(error: &Error) -> Self {
        match error {
            Error::UnsupportedLanguage(name) => ExecutionReport::UnsupportedLanguage(name.clone()),
            Error::MissingPublicClass => ExecutionReport::Usage(error.to_string()),
            _ => ExecutionReport::InternalError(error.to_string()),
        }
    }
}

impl fmt::Display for ExecutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionReport::Success(output) => f.write_str(output),
            ExecutionReport::CompileError(stderr) => write!(f, "Compilation Error:\n{}", stderr),
            ExecutionReport::RuntimeError(stderr) => write!(f, "Runtime Error:\n{}", stderr),
            ExecutionReport::Timeout(limit) => write!(
                f,
                "Error: Code execution timed out ({} seconds limit)",
                limit.as_secs()
            ),
            ExecutionReport::ToolchainMissing { tool, hint } => {
                write!(f, "Error: {} (missing: {})", hint, tool)
            }
            ExecutionReport::UnsupportedLanguage(name) => {
                let supported = Language::ALL
                    .iter()
                    .map(|l| l.display_name())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(
                    f,
                    "Language '{}' is not supported for server-side execution.\nSupported languages: {}",
                    name, supported
                )
            }
            ExecutionReport::Usage(message) => write!(f, "Error: {}", message),
            ExecutionReport::InternalError(message) => {
                write!(f, "Error executing code: {}", message)
            }
        }
    }
}

/// What the pipeline does after a stage finishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Compile stage succeeded; go on to the run stage
    Proceed,
    Done(ExecutionReport),
}

/// Classify one stage outcome.
///
/// `tool` is the program of the stage as configured, `hint` how to install it;
/// `limit` is the deadline the stage ran under.
pub fn classify(
    stage: Stage,
    outcome: &ProcessOutcome,
    tool: &str,
    hint: String,
    limit: Duration,
) -> Verdict {
    if outcome.tool_missing {
        return Verdict::Done(ExecutionReport::ToolchainMissing {
            tool: tool.to_string(),
            hint,
        });
    }
    if outcome.timed_out {
        return Verdict::Done(ExecutionReport::Timeout(limit));
    }

    if !outcome.success() {
        let message = with_truncation_note(failure_message(outcome), outcome);
        return Verdict::Done(match stage {
            Stage::Compile => ExecutionReport::CompileError(message),
            Stage::Run => ExecutionReport::RuntimeError(message),
        });
    }

    match stage {
        Stage::Compile => Verdict::Proceed,
        Stage::Run if outcome.stdout.is_empty() => {
            Verdict::Done(ExecutionReport::Success(NO_OUTPUT_SENTINEL.to_string()))
        }
        Stage::Run => Verdict::Done(ExecutionReport::Success(with_truncation_note(
            outcome.stdout.clone(),
            outcome,
        ))),
    }
}

fn failure_message(outcome: &ProcessOutcome) -> String {
    match (outcome.exit_code, outcome.signal) {
        (None, Some(signal)) if outcome.stderr.is_empty() => {
            format!("Process terminated by signal {}", signal)
        }
        _ => outcome.stderr.clone(),
    }
}

fn with_truncation_note(mut text: String, outcome: &ProcessOutcome) -> String {
    if outcome.truncated {
        if !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(TRUNCATION_NOTE);
    }
    text
}
