//! Language-specific executor implementations

mod cpp;
mod java;
mod javascript;
mod python;

pub use cpp::CppExecutor;
pub use java::{public_class_name, JavaExecutor};
pub use javascript::JavaScriptExecutor;
pub use python::PythonExecutor;

use which::which;

pub(crate) fn check_command(cmd: &str) -> bool {
    which(cmd).is_ok()
}

#[cfg(test)]
pub(crate) fn skip_if_not_available(tools: &[&str]) -> bool {
    let missing: Vec<_> = tools
        .iter()
        .filter(|tool| !check_command(tool))
        .map(|s| (*s).to_string())
        .collect();

    if !missing.is_empty() {
        eprintln!("Skipping test: {} not available", missing.join(", "));
        return true;
    }
    false
}
