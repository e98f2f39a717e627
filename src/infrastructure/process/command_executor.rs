use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tracing::debug;

/// Command executor errors
#[derive(Debug, Error)]
pub enum CommandExecutorError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Process spawn failed: {0}")]
    SpawnFailed(String),

    #[error("Writing to process stdin failed: {0}")]
    StdinFailed(String),

    #[error("Process termination failed: {0}")]
    TerminationFailed(String),
}

/// Configuration for command execution
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Working directory for command execution
    pub working_directory: Option<PathBuf>,

    /// Text written to the process stdin, which is then closed
    pub stdin_input: Option<String>,

    /// Whether to capture stdout (otherwise inherited)
    pub capture_stdout: bool,

    /// Whether to capture stderr (otherwise inherited)
    pub capture_stderr: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            working_directory: None,
            stdin_input: None,
            capture_stdout: true,
            capture_stderr: true,
        }
    }
}

impl ExecutionConfig {
    /// Create a new execution config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set working directory
    pub fn with_working_directory<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.working_directory = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Pipe text into the process
    pub fn with_stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin_input = Some(input.into());
        self
    }

    /// Set output capture flags
    pub fn with_output_capture(mut self, capture_stdout: bool, capture_stderr: bool) -> Self {
        self.capture_stdout = capture_stdout;
        self.capture_stderr = capture_stderr;
        self
    }
}

/// Result of command execution
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Exit code of the process (-1 when terminated by a signal)
    pub exit_code: i32,

    /// Standard output (empty when not captured)
    pub stdout: String,

    /// Standard error output (empty when not captured)
    pub stderr: String,

    /// Execution time in milliseconds
    pub execution_time_ms: u64,

    /// Whether the command was successful (exit code 0)
    pub success: bool,
}

impl ExecutionResult {
    /// Create a new execution result
    pub fn new(exit_code: i32, stdout: String, stderr: String, execution_time_ms: u64) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            execution_time_ms,
            success: exit_code == 0,
        }
    }
}

/// Command executor for running external processes
pub struct CommandExecutor;

impl CommandExecutor {
    /// Execute a program with arguments and wait for it to exit.
    ///
    /// A nonzero exit is reported through [`ExecutionResult::success`], not
    /// as an error; callers decide whether it is fatal.
    pub async fn execute(
        program: &str,
        args: &[String],
        config: &ExecutionConfig,
    ) -> Result<ExecutionResult, CommandExecutorError> {
        if program.trim().is_empty() {
            return Err(CommandExecutorError::InvalidCommand(
                "Command is empty".to_string(),
            ));
        }

        let start_time = Instant::now();

        let mut cmd = TokioCommand::new(program);
        cmd.args(args);

        if let Some(working_dir) = &config.working_directory {
            cmd.current_dir(working_dir);
        }

        cmd.stdout(if config.capture_stdout {
            Stdio::piped()
        } else {
            Stdio::inherit()
        });
        cmd.stderr(if config.capture_stderr {
            Stdio::piped()
        } else {
            Stdio::inherit()
        });
        cmd.stdin(if config.stdin_input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });

        debug!("Spawning {} with {} argument(s)", program, args.len());

        let mut child = cmd.spawn().map_err(|e| {
            CommandExecutorError::SpawnFailed(format!("Failed to spawn '{}': {}", program, e))
        })?;

        if let Some(input) = &config.stdin_input {
            if let Some(mut stdin) = child.stdin.take() {
                match stdin.write_all(input.as_bytes()).await {
                    Ok(()) => {}
                    // the child exited without reading its input
                    Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                        debug!("{} closed stdin before reading it", program);
                    }
                    Err(e) => return Err(CommandExecutorError::StdinFailed(e.to_string())),
                }
                // dropping the handle closes the pipe so the child sees EOF
                drop(stdin);
            }
        }

        let output = child.wait_with_output().await.map_err(|e| {
            CommandExecutorError::TerminationFailed(format!("Failed to wait for process: {}", e))
        })?;

        let execution_time = start_time.elapsed().as_millis() as u64;
        let exit_code = output.status.code().unwrap_or(-1);

        debug!(
            "{} exited with code {} in {}ms",
            program, exit_code, execution_time
        );

        Ok(ExecutionResult::new(
            exit_code,
            String::from_utf8_lossy(&output.stdout).to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
            execution_time,
        ))
    }
}
