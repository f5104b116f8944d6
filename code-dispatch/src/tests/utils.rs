pub mod defaults {
    use crate::ExecutorConfig;
    use std::path::Path;
    use tokio::time::Duration;

    pub fn default_timeout() -> Duration {
        Duration::from_secs(10)
    }

    pub fn short_timeout() -> Duration {
        Duration::from_secs(1)
    }

    /// Config whose workspaces live under `temp_root`
    pub fn test_config(temp_root: &Path, timeout: Duration) -> ExecutorConfig {
        ExecutorConfig {
            timeout,
            temp_root: temp_root.to_path_buf(),
            ..ExecutorConfig::default()
        }
    }

    /// Entries left directly under `temp_root`
    pub fn leftover_entries(temp_root: &Path) -> usize {
        std::fs::read_dir(temp_root)
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

pub mod spy {
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use crate::{Command, Error, ProcessOutcome, ProcessRunner};

    /// Records every command and replays scripted outcomes in order.
    /// Once the script runs out it answers with a clean, silent exit.
    #[derive(Default)]
    pub struct RecordingRunner {
        script: Mutex<VecDeque<Result<ProcessOutcome, String>>>,
        commands: Mutex<Vec<Command>>,
    }

    impl RecordingRunner {
        pub fn scripted(outcomes: Vec<ProcessOutcome>) -> Self {
            Self {
                script: Mutex::new(outcomes.into_iter().map(Ok).collect()),
                commands: Mutex::default(),
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                script: Mutex::new(VecDeque::from([Err(message.to_string())])),
                commands: Mutex::default(),
            }
        }

        pub fn commands(&self) -> Vec<Command> {
            self.commands.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProcessRunner for RecordingRunner {
        async fn execute(&self, command: &Command) -> Result<ProcessOutcome, Error> {
            // The workspace must exist while a stage runs
            assert!(command.working_dir.is_dir());
            self.commands.lock().unwrap().push(command.clone());
            match self.script.lock().unwrap().pop_front() {
                Some(Ok(outcome)) => Ok(outcome),
                Some(Err(message)) => Err(Error::Process(message)),
                None => Ok(ProcessOutcome::exited(0, "", "")),
            }
        }
    }
}
