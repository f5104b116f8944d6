use std::path::Path;
use std::time::Duration;

use crate::{
    error::Error,
    executor::LanguageExecutor,
    types::{Command, Language},
};

const SOURCE_FILE: &str = "program.cpp";
const BINARY_FILE: &str = "program";

pub struct CppExecutor {
    compiler: String,
}

impl CppExecutor {
    pub fn new(compiler: Option<String>) -> Self {
        Self {
            compiler: compiler.unwrap_or_else(|| "g++".to_string()),
        }
    }
}

impl LanguageExecutor for CppExecutor {
    fn language(&self) -> Language {
        Language::Cpp
    }

    fn source_file_name(&self, _code: &str) -> Result<String, Error> {
        Ok(SOURCE_FILE.to_string())
    }

    fn compile_command(&self, source: &Path, workspace: &Path, timeout: Duration) -> Option<Command> {
        Some(
            Command::new(&self.compiler, workspace, timeout)
                .arg("-o")
                .arg(workspace.join(BINARY_FILE).to_string_lossy())
                .arg(source.to_string_lossy()),
        )
    }

    fn run_command(&self, _source: &Path, workspace: &Path, timeout: Duration) -> Command {
        Command::new(workspace.join(BINARY_FILE).to_string_lossy(), workspace, timeout)
    }

    fn required_tools(&self) -> Vec<&str> {
        vec![self.compiler.as_str()]
    }

    fn missing_tool_hint(&self, tool: &str) -> String {
        if tool == BINARY_FILE {
            "Compiled program is missing from the workspace.".to_string()
        } else {
            format!("C++ compiler not found. Please install {}.", self.compiler)
        }
    }
}
