//! End-to-end runs against the host toolchains. Each test skips itself when
//! the toolchain it needs is not installed.

use std::time::Instant;
use tempfile::tempdir;
use tokio::time::Duration;

use super::fixtures::{code_samples::*, failures::*};
use super::utils::defaults::*;
use crate::{
    languages::skip_if_not_available, CodeExecutionService, ExecutionReport, ExecutionRequest,
    ReportKind, Result,
};

pub mod cpp;
pub mod java;
pub mod python;

/// Run one request on a fresh service and check nothing is left behind
pub(crate) async fn run_isolated(language: &str, code: &str) -> Result<ExecutionReport> {
    run_with_timeout(language, code, default_timeout()).await
}

pub(crate) async fn run_with_timeout(
    language: &str,
    code: &str,
    timeout: Duration,
) -> Result<ExecutionReport> {
    let root = tempdir()?;
    let service = CodeExecutionService::new(test_config(root.path(), timeout))?;
    let report = service
        .execute(ExecutionRequest::new(language, code))
        .await;
    assert_eq!(leftover_entries(root.path()), 0);
    Ok(report)
}

pub(crate) async fn test_language_timeout(language: &str, code: &str) -> Result<()> {
    let started = Instant::now();
    let report = run_with_timeout(language, code, short_timeout()).await?;
    let elapsed = started.elapsed();

    assert_eq!(report, ExecutionReport::Timeout(short_timeout()));
    // Compile stages get their own deadline, so allow for one of each
    assert!(
        elapsed < short_timeout() * 2 + Duration::from_secs(2),
        "took {:?}",
        elapsed
    );
    Ok(())
}

#[tokio::test]
async fn test_concurrent_mixed_execution() -> Result<()> {
    let candidates = [
        ("python", &["python3"][..], PYTHON_HELLO, "Hello from Python!\n"),
        ("javascript", &["node"][..], JS_HELLO, "Hello from JavaScript!\n"),
        ("java", &["javac", "java"][..], JAVA_HELLO, "Hello from Java!\n"),
        ("cpp", &["g++"][..], CPP_HELLO, "Hello from C++!\n"),
    ];
    let available: Vec<_> = candidates
        .iter()
        .filter(|(_, tools, _, _)| !skip_if_not_available(tools))
        .collect();
    if available.is_empty() {
        return Ok(());
    }

    let root = tempdir()?;
    let service = CodeExecutionService::new(test_config(root.path(), default_timeout()))?;

    let mut handles = vec![];
    for (language, _, code, expected) in available.iter().cycle().take(6) {
        let service = service.clone();
        let request = ExecutionRequest::new(*language, *code);
        let expected = expected.to_string();
        handles.push(tokio::spawn(async move {
            (service.execute(request).await, expected)
        }));
    }

    for handle in handles {
        let (report, expected) = handle.await.unwrap();
        assert_eq!(report, ExecutionReport::Success(expected));
    }
    assert_eq!(leftover_entries(root.path()), 0);
    Ok(())
}

#[tokio::test]
async fn test_classification_is_repeatable() -> Result<()> {
    if skip_if_not_available(&["python3"]) {
        return Ok(());
    }
    let first = run_isolated("python", PYTHON_RUNTIME_ERROR).await?;
    let second = run_isolated("python", PYTHON_RUNTIME_ERROR).await?;
    assert_eq!(first.kind(), ReportKind::RuntimeError);
    assert_eq!(first.kind(), second.kind());
    Ok(())
}
