use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use crate::{
    error::Error,
    executor::LanguageExecutor,
    types::{Command, Language},
};

/// Accepted declaration: the literal `public class`, one space, then an identifier.
/// The first match wins.
static PUBLIC_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"public class (\w+)").expect("public class pattern is valid")
});

/// Name of the first `public class` declared in `code`
pub fn public_class_name(code: &str) -> Result<&str, Error> {
    PUBLIC_CLASS
        .captures(code)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or(Error::MissingPublicClass)
}

pub struct JavaExecutor {
    compiler: String,
    runtime: String,
}

impl JavaExecutor {
    pub fn new(compiler: Option<String>, runtime: Option<String>) -> Self {
        Self {
            compiler: compiler.unwrap_or_else(|| "javac".to_string()),
            runtime: runtime.unwrap_or_else(|| "java".to_string()),
        }
    }
}

impl LanguageExecutor for JavaExecutor {
    fn language(&self) -> Language {
        Language::Java
    }

    /// javac requires the file to be named after its public class
    fn source_file_name(&self, code: &str) -> Result<String, Error> {
        Ok(format!("{}.java", public_class_name(code)?))
    }

    fn compile_command(&self, source: &Path, workspace: &Path, timeout: Duration) -> Option<Command> {
        let file_name = source.strip_prefix(workspace).unwrap_or(source);
        Some(Command::new(&self.compiler, workspace, timeout).arg(file_name.to_string_lossy()))
    }

    fn run_command(&self, source: &Path, workspace: &Path, timeout: Duration) -> Command {
        let class_name = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Command::new(&self.runtime, workspace, timeout)
            .arg("-cp")
            .arg(".")
            .arg(class_name)
    }

    fn required_tools(&self) -> Vec<&str> {
        vec![self.compiler.as_str(), self.runtime.as_str()]
    }

    fn missing_tool_hint(&self, tool: &str) -> String {
        if Path::new(&self.runtime).ends_with(tool) {
            "Java runtime not found. Please install Java JDK.".to_string()
        } else {
            "Java compiler not found. Please install Java JDK.".to_string()
        }
    }
}
