use async_trait::async_trait;
use nix::sys::signal::{killpg, Signal};
use nix::unistd::Pid;
use std::{io::ErrorKind, os::unix::process::ExitStatusExt, process::Stdio, time::Instant};
use tokio::{
    io::{AsyncRead, AsyncReadExt},
    process::Command as ProcessCommand,
    task::JoinHandle,
    time,
};
use tracing::{debug, warn};

use crate::{
    config::DEFAULT_MAX_OUTPUT_BYTES,
    error::Error,
    types::{Command, ProcessOutcome},
};

/// Executes a single command to completion, timeout, or launch failure
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn execute(&self, command: &Command) -> Result<ProcessOutcome, Error>;
}

/// Runs commands as child processes of the current host
#[derive(Debug, Clone)]
pub struct SystemRunner {
    max_output_bytes: usize,
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_OUTPUT_BYTES)
    }
}

#[derive(Debug, Default)]
struct CapturedStream {
    bytes: Vec<u8>,
    truncated: bool,
}

impl SystemRunner {
    pub fn new(max_output_bytes: usize) -> Self {
        Self { max_output_bytes }
    }

    fn spawn_reader<R>(&self, stream: Option<R>) -> JoinHandle<std::io::Result<CapturedStream>>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let limit = self.max_output_bytes;
        tokio::spawn(async move { read_capped(stream, limit).await })
    }
}

/// Read up to `limit` bytes, then drain the rest so the child never blocks on a full pipe
async fn read_capped<R>(stream: Option<R>, limit: usize) -> std::io::Result<CapturedStream>
where
    R: AsyncRead + Unpin,
{
    let Some(mut stream) = stream else {
        return Ok(CapturedStream::default());
    };

    let mut bytes = Vec::new();
    (&mut stream).take(limit as u64).read_to_end(&mut bytes).await?;
    let discarded = tokio::io::copy(&mut stream, &mut tokio::io::sink()).await?;

    Ok(CapturedStream {
        bytes,
        truncated: discarded > 0,
    })
}

/// SIGKILL everything left in the child's process group
fn kill_process_group(pid: Option<u32>) {
    if let Some(pid) = pid {
        // ESRCH just means the group is already gone
        let _ = killpg(Pid::from_raw(pid as i32), Signal::SIGKILL);
    }
}

async fn join_reader(
    handle: &mut JoinHandle<std::io::Result<CapturedStream>>,
) -> Result<CapturedStream, Error> {
    handle
        .await
        .map_err(|e| Error::Process(format!("Output reader failed: {}", e)))?
        .map_err(|e| Error::Process(format!("Failed to read process output: {}", e)))
}

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn execute(&self, command: &Command) -> Result<ProcessOutcome, Error> {
        debug!("Runner execute - Command: {}", command.program);
        debug!("Runner execute - Args: {:?}", command.args);
        debug!("Runner execute - Working dir: {:?}", command.working_dir);

        let program = match which::which(&command.program) {
            Ok(path) => path,
            Err(_) => {
                warn!("Command not found: {}", command.program);
                return Ok(ProcessOutcome::tool_missing());
            }
        };

        let mut process = ProcessCommand::new(&program);
        process
            .args(&command.args)
            .current_dir(&command.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .process_group(0)
            .kill_on_drop(true);

        let start_time = Instant::now();
        let mut child = match process.spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Failed to launch {}: {}", command.program, e);
                return Ok(ProcessOutcome::tool_missing());
            }
            Err(e) => {
                return Err(Error::Process(format!(
                    "Failed to spawn {}: {}",
                    command.program, e
                )))
            }
        };

        let child_id = child.id();
        let mut stdout_task = self.spawn_reader(child.stdout.take());
        let mut stderr_task = self.spawn_reader(child.stderr.take());

        // One deadline covers the wait and the drain of both pipes
        let deadline = time::Instant::now() + command.timeout;

        let status = match time::timeout_at(deadline, child.wait()).await {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => {
                kill_process_group(child_id);
                stdout_task.abort();
                stderr_task.abort();
                return Err(Error::Process(format!("Process error: {}", e)));
            }
            Err(_) => {
                kill_process_group(child_id);
                // Reap the child so nothing lingers as a zombie
                let _ = child.kill().await;
                stdout_task.abort();
                stderr_task.abort();
                warn!(
                    "{} timed out after {} seconds",
                    command.program,
                    command.timeout.as_secs()
                );
                return Ok(ProcessOutcome::timed_out(start_time.elapsed()));
            }
        };

        // Background processes left behind by the program would hold the pipes open
        kill_process_group(child_id);

        let captured = time::timeout_at(deadline, async {
            let stdout = join_reader(&mut stdout_task).await?;
            let stderr = join_reader(&mut stderr_task).await?;
            Ok::<_, Error>((stdout, stderr))
        })
        .await;

        let (stdout, stderr) = match captured {
            Ok(streams) => streams?,
            Err(_) => {
                // A process outside the group (e.g. after setsid) still holds a pipe
                stdout_task.abort();
                stderr_task.abort();
                warn!(
                    "{} output still open after {} seconds",
                    command.program,
                    command.timeout.as_secs()
                );
                return Ok(ProcessOutcome::timed_out(start_time.elapsed()));
            }
        };

        Ok(ProcessOutcome {
            exit_code: status.code(),
            signal: status.signal(),
            stdout: String::from_utf8_lossy(&stdout.bytes).into_owned(),
            stderr: String::from_utf8_lossy(&stderr.bytes).into_owned(),
            timed_out: false,
            tool_missing: false,
            truncated: stdout.truncated || stderr.truncated,
            elapsed: start_time.elapsed(),
        })
    }
}
