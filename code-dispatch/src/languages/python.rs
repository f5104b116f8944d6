use std::path::Path;
use std::time::Duration;

use crate::{
    error::Error,
    executor::LanguageExecutor,
    types::{Command, Language},
};

pub struct PythonExecutor {
    interpreter: String,
}

impl PythonExecutor {
    pub fn new(interpreter: Option<String>) -> Self {
        Self {
            interpreter: interpreter.unwrap_or_else(|| "python3".to_string()),
        }
    }
}

impl LanguageExecutor for PythonExecutor {
    fn language(&self) -> Language {
        Language::Python
    }

    fn source_file_name(&self, _code: &str) -> Result<String, Error> {
        Ok("main.py".to_string())
    }

    fn run_command(&self, source: &Path, workspace: &Path, timeout: Duration) -> Command {
        Command::new(&self.interpreter, workspace, timeout).arg(source.to_string_lossy())
    }

    fn required_tools(&self) -> Vec<&str> {
        vec![self.interpreter.as_str()]
    }

    fn missing_tool_hint(&self, _tool: &str) -> String {
        "Python interpreter not found. Please install Python 3 to execute Python code.".to_string()
    }
}
