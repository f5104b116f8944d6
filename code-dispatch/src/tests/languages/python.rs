use super::*;
use crate::tests::fixtures::test_scenarios::{
    PYTHON_DETACHED_SLEEPER, PYTHON_MULTILINE, PYTHON_SILENT, PYTHON_SLEEP,
};
use crate::NO_OUTPUT_SENTINEL;

#[tokio::test]
async fn test_python_basic() -> Result<()> {
    if skip_if_not_available(&["python3"]) {
        return Ok(());
    }
    let report = run_isolated("python", PYTHON_HELLO).await?;
    assert_eq!(report, ExecutionReport::Success("Hello from Python!\n".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_python_multiline() -> Result<()> {
    if skip_if_not_available(&["python3"]) {
        return Ok(());
    }
    let report = run_isolated("python", PYTHON_MULTILINE).await?;
    assert_eq!(report.to_string(), "Factorial of 5 is 120\n");
    Ok(())
}

#[tokio::test]
async fn test_python_no_output() -> Result<()> {
    if skip_if_not_available(&["python3"]) {
        return Ok(());
    }
    let report = run_isolated("python", PYTHON_SILENT).await?;
    assert_eq!(report.to_string(), NO_OUTPUT_SENTINEL);
    Ok(())
}

#[tokio::test]
async fn test_python_runtime_error() -> Result<()> {
    if skip_if_not_available(&["python3"]) {
        return Ok(());
    }
    let report = run_isolated("python", PYTHON_RUNTIME_ERROR).await?;
    assert_eq!(report.kind(), ReportKind::RuntimeError);
    let text = report.to_string();
    assert!(text.starts_with("Runtime Error:\n"));
    assert!(text.contains("ZeroDivisionError"));
    Ok(())
}

#[tokio::test]
async fn test_python_timeout() -> Result<()> {
    if skip_if_not_available(&["python3"]) {
        return Ok(());
    }
    test_language_timeout("python", PYTHON_SLEEP).await
}

#[tokio::test]
async fn test_python_detached_child_cannot_outlast_deadline() -> Result<()> {
    if skip_if_not_available(&["python3"]) {
        return Ok(());
    }
    let started = Instant::now();
    let report = run_with_timeout("python", PYTHON_DETACHED_SLEEPER, short_timeout()).await?;
    let elapsed = started.elapsed();

    assert_eq!(report, ExecutionReport::Timeout(short_timeout()));
    assert!(elapsed < short_timeout() + Duration::from_secs(2), "took {:?}", elapsed);
    Ok(())
}
