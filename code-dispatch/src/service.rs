use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

use crate::{
    config::ExecutorConfig,
    error::Error,
    executor::CodeExecutor,
    languages::check_command,
    report::ExecutionReport,
    runner::{ProcessRunner, SystemRunner},
    types::{ExecutionRequest, Language},
};

/// Availability of one host toolchain program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainStatus {
    pub language: Language,
    pub tool: String,
    pub available: bool,
}

#[derive(Clone)]
pub struct CodeExecutionService {
    executor: Arc<CodeExecutor>,
    semaphore: Arc<Semaphore>,
    config: ExecutorConfig,
}

impl CodeExecutionService {
    /// Service backed by real child processes
    pub fn new(config: ExecutorConfig) -> Result<Self, Error> {
        let runner = Arc::new(SystemRunner::new(config.max_output_bytes));
        Self::with_runner(config, runner)
    }

    /// Service backed by a caller-provided [`ProcessRunner`]
    pub fn with_runner(
        config: ExecutorConfig,
        runner: Arc<dyn ProcessRunner>,
    ) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            executor: Arc::new(CodeExecutor::new(runner, config.clone())),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent_executions)),
            config,
        })
    }

    /// Run a request to completion. Every outcome, including internal faults,
    /// comes back as a report.
    pub async fn execute(&self, request: ExecutionRequest) -> ExecutionReport {
        let language: Language = match request.language.parse() {
            Ok(language) => language,
            Err(e) => {
                info!("Rejected execution request: {}", e);
                return ExecutionReport::from_error(&e);
            }
        };

        // Acquire execution permit
        let _permit = match self.semaphore.acquire().await {
            Ok(permit) => permit,
            Err(e) => {
                let e = Error::Process(format!("Failed to acquire execution permit: {}", e));
                error!("Code execution failed: {}", e);
                return ExecutionReport::from_error(&e);
            }
        };

        debug!("Starting code execution for language: {}", language);

        let report = match self.executor.execute(language, &request.code).await {
            Ok(report) => report,
            Err(e) if e.is_usage() => ExecutionReport::from_error(&e),
            Err(e) => {
                error!("Code execution failed: {}", e);
                ExecutionReport::from_error(&e)
            }
        };

        info!(
            language = %language,
            outcome = ?report.kind(),
            "Code execution completed"
        );
        report
    }

    pub fn get_available_slots(&self) -> usize {
        self.semaphore.available_permits()
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Which configured toolchain programs resolve on this host
    pub fn toolchain_status(&self) -> Vec<ToolchainStatus> {
        Language::ALL
            .iter()
            .flat_map(|&language| {
                self.executor
                    .create_executor(language)
                    .required_tools()
                    .into_iter()
                    .map(|tool| ToolchainStatus {
                        language,
                        tool: tool.to_string(),
                        available: check_command(tool),
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
