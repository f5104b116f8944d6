//! # Code Dispatch
//!
//! Runs source snippets in Python, JavaScript, Java or C++ on the host
//! toolchains. Each request gets its own temporary workspace and a wall-clock
//! deadline per stage, and always ends in a single human-readable report.
//!
//! This is not a security sandbox: programs run with the privileges of the
//! calling process.

mod config;
mod error;
mod executor;
mod languages;
mod report;
mod runner;
mod service;
mod types;
mod workspace;


pub use config::{ExecutorConfig, ToolchainConfig, DEFAULT_MAX_OUTPUT_BYTES, DEFAULT_TIMEOUT};
pub use error::Error;
pub use executor::{CodeExecutor, LanguageExecutor};
pub use languages::{
    public_class_name, CppExecutor, JavaExecutor, JavaScriptExecutor, PythonExecutor,
};
pub use report::{classify, ExecutionReport, ReportKind, Verdict, NO_OUTPUT_SENTINEL, TRUNCATION_NOTE};
pub use runner::{ProcessRunner, SystemRunner};
pub use service::{CodeExecutionService, ToolchainStatus};
pub use types::{Command, ExecutionRequest, Language, ProcessOutcome, Stage};
pub use workspace::{Workspace, WORKSPACE_PREFIX};

/// Result type for code execution operations
pub type Result<T> = std::result::Result<T, Error>;
