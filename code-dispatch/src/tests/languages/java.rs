use super::*;

#[tokio::test]
async fn test_java_basic() -> Result<()> {
    if skip_if_not_available(&["javac", "java"]) {
        return Ok(());
    }
    let report = run_isolated("java", JAVA_HELLO).await?;
    assert_eq!(report, ExecutionReport::Success("Hello from Java!\n".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_java_compile_error() -> Result<()> {
    if skip_if_not_available(&["javac", "java"]) {
        return Ok(());
    }
    let report = run_isolated("java", JAVA_SYNTAX_ERROR).await?;
    let ExecutionReport::CompileError(diagnostics) = &report else {
        panic!("expected a compile error, got {:?}", report);
    };
    assert!(diagnostics.contains("Broken.java"));
    assert!(report.to_string().starts_with("Compilation Error:\n"));
    Ok(())
}

#[tokio::test]
async fn test_java_runtime_error() -> Result<()> {
    if skip_if_not_available(&["javac", "java"]) {
        return Ok(());
    }
    let report = run_isolated("java", JAVA_RUNTIME_ERROR).await?;
    assert_eq!(report.kind(), ReportKind::RuntimeError);
    assert!(report.to_string().contains("IllegalStateException"));
    Ok(())
}

#[tokio::test]
async fn test_java_missing_public_class() -> Result<()> {
    // Rejected before any toolchain is needed
    let report = run_isolated("java", JAVA_NO_PUBLIC_CLASS).await?;
    assert_eq!(report.kind(), ReportKind::Usage);
    Ok(())
}
