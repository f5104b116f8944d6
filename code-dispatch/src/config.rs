use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{error::Error, types::duration_serde};

/// Per-stage deadline applied when nothing else is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Cap on each captured stream (1 MiB)
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 1024 * 1024;

/// Runtime configuration for the dispatcher
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Deadline for each compile or run stage
    #[serde(with = "duration_serde")]
    pub timeout: Duration,
    /// Maximum bytes kept from stdout and from stderr
    pub max_output_bytes: usize,
    /// Directory under which per-request workspaces are created
    pub temp_root: PathBuf,
    /// Upper bound on executions in flight
    pub max_concurrent_executions: usize,
    pub toolchains: ToolchainConfig,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
            temp_root: std::env::temp_dir(),
            max_concurrent_executions: 10,
            toolchains: ToolchainConfig::default(),
        }
    }
}

/// Program names (or absolute paths) of the host toolchains
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    pub python: String,
    pub node: String,
    pub javac: String,
    pub java: String,
    pub cxx: String,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            python: "python3".to_string(),
            node: "node".to_string(),
            javac: "javac".to_string(),
            java: "java".to_string(),
            cxx: "g++".to_string(),
        }
    }
}

impl ExecutorConfig {
    /// Parse a TOML document; missing keys fall back to defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, Error> {
        let config: Self =
            toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be positive".to_string()));
        }
        if self.max_output_bytes == 0 {
            return Err(Error::Config("max_output_bytes must be positive".to_string()));
        }
        if self.max_concurrent_executions == 0 {
            return Err(Error::Config(
                "max_concurrent_executions must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
