use std::path::Path;
use std::time::Duration;

use crate::{
    error::Error,
    executor::LanguageExecutor,
    types::{Command, Language},
};

pub struct JavaScriptExecutor {
    runtime: String,
}

impl JavaScriptExecutor {
    pub fn new(runtime: Option<String>) -> Self {
        Self {
            runtime: runtime.unwrap_or_else(|| "node".to_string()),
        }
    }
}

impl LanguageExecutor for JavaScriptExecutor {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn source_file_name(&self, _code: &str) -> Result<String, Error> {
        Ok("main.js".to_string())
    }

    fn run_command(&self, source: &Path, workspace: &Path, timeout: Duration) -> Command {
        Command::new(&self.runtime, workspace, timeout).arg(source.to_string_lossy())
    }

    fn required_tools(&self) -> Vec<&str> {
        vec![self.runtime.as_str()]
    }

    fn missing_tool_hint(&self, _tool: &str) -> String {
        "Node.js not found. Please install Node.js to execute JavaScript code.".to_string()
    }
}
