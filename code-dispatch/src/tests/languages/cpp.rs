use super::*;
use crate::tests::fixtures::test_scenarios::CPP_INFINITE_LOOP;

#[tokio::test]
async fn test_cpp_basic() -> Result<()> {
    if skip_if_not_available(&["g++"]) {
        return Ok(());
    }
    let report = run_isolated("cpp", CPP_HELLO).await?;
    assert_eq!(report, ExecutionReport::Success("Hello from C++!\n".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_cpp_compile_error() -> Result<()> {
    if skip_if_not_available(&["g++"]) {
        return Ok(());
    }
    let report = run_isolated("cpp", CPP_SYNTAX_ERROR).await?;
    let ExecutionReport::CompileError(diagnostics) = &report else {
        panic!("expected a compile error, got {:?}", report);
    };
    assert!(diagnostics.contains("error"));
    Ok(())
}

#[tokio::test]
async fn test_cpp_runtime_error() -> Result<()> {
    if skip_if_not_available(&["g++"]) {
        return Ok(());
    }
    let report = run_isolated("cpp", CPP_RUNTIME_ERROR).await?;
    assert_eq!(report, ExecutionReport::RuntimeError("bad input\n".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_cpp_timeout() -> Result<()> {
    if skip_if_not_available(&["g++"]) {
        return Ok(());
    }
    test_language_timeout("cpp", CPP_INFINITE_LOOP).await
}
