use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::{
    config::ExecutorConfig,
    error::Error,
    languages::{CppExecutor, JavaExecutor, JavaScriptExecutor, PythonExecutor},
    report::{classify, ExecutionReport, Verdict},
    runner::ProcessRunner,
    types::{Command, Language, Stage},
    workspace::Workspace,
};

/// Trait for language-specific toolchain adapters
pub trait LanguageExecutor: Send + Sync {
    fn language(&self) -> Language;

    /// Name the source is written under inside the workspace.
    ///
    /// Runs before the workspace exists, so precondition failures never touch
    /// the filesystem or spawn a process.
    fn source_file_name(&self, code: &str) -> Result<String, Error>;

    /// Build step, if the language has one
    fn compile_command(&self, _source: &Path, _workspace: &Path, _timeout: Duration) -> Option<Command> {
        None
    }

    /// Command that executes the program
    fn run_command(&self, source: &Path, workspace: &Path, timeout: Duration) -> Command;

    /// Host programs the adapter invokes
    fn required_tools(&self) -> Vec<&str>;

    /// Install guidance shown when `tool` cannot be found
    fn missing_tool_hint(&self, tool: &str) -> String;
}

/// Drives one request through its adapter's stages
pub struct CodeExecutor {
    runner: Arc<dyn ProcessRunner>,
    config: ExecutorConfig,
}

impl CodeExecutor {
    pub fn new(runner: Arc<dyn ProcessRunner>, config: ExecutorConfig) -> Self {
        Self { runner, config }
    }

    /// Execute `code` inside a fresh workspace that is removed on return
    pub async fn execute(&self, language: Language, code: &str) -> Result<ExecutionReport, Error> {
        let executor = self.create_executor(language);
        let file_name = executor.source_file_name(code)?;

        let workspace = Workspace::acquire(&self.config.temp_root).await?;
        let source = workspace.write_file(&file_name, code).await?;
        let timeout = self.config.timeout;

        if let Some(compile) = executor.compile_command(&source, workspace.path(), timeout) {
            if let Verdict::Done(report) = self
                .run_stage(executor.as_ref(), Stage::Compile, &compile)
                .await?
            {
                return Ok(report);
            }
        }

        let run = executor.run_command(&source, workspace.path(), timeout);
        match self.run_stage(executor.as_ref(), Stage::Run, &run).await? {
            Verdict::Done(report) => Ok(report),
            Verdict::Proceed => Err(Error::Process(
                "run stage finished without a result".to_string(),
            )),
        }
    }

    async fn run_stage(
        &self,
        executor: &dyn LanguageExecutor,
        stage: Stage,
        command: &Command,
    ) -> Result<Verdict, Error> {
        debug!(
            "{} {:?} stage: {} {:?}",
            executor.language(),
            stage,
            command.program,
            command.args
        );
        let outcome = self.runner.execute(command).await?;
        Ok(classify(
            stage,
            &outcome,
            &command.program,
            executor.missing_tool_hint(command.tool_name()),
            command.timeout,
        ))
    }

    pub(crate) fn create_executor(&self, language: Language) -> Box<dyn LanguageExecutor> {
        let tools = &self.config.toolchains;
        match language {
            Language::Python => Box::new(PythonExecutor::new(Some(tools.python.clone()))),
            Language::JavaScript => Box::new(JavaScriptExecutor::new(Some(tools.node.clone()))),
            Language::Java => Box::new(JavaExecutor::new(
                Some(tools.javac.clone()),
                Some(tools.java.clone()),
            )),
            Language::Cpp => Box::new(CppExecutor::new(Some(tools.cxx.clone()))),
        }
    }
}
