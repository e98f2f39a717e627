use crate::infrastructure::process::{CommandExecutor, CommandExecutorError, ExecutionConfig};
use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// SQL client errors
#[derive(Debug, Error)]
pub enum SqlClientError {
    #[error("SQL client executable not found: {executable}")]
    ExecutableNotFound { executable: String },

    #[error("SQL client exited with code {exit_code}")]
    ClientFailed { exit_code: i32 },

    #[error("SQL client execution failed: {0}")]
    ExecutionFailed(String),
}

impl SqlClientError {
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::ClientFailed { exit_code } => Some(*exit_code),
            _ => None,
        }
    }
}

/// Runs a script through the SQL client
#[async_trait]
pub trait SqlClient: Send + Sync {
    /// Shell-style rendering of the invocation, shown to the user before it runs
    fn display_command(&self, script: &str, connect_string: &str) -> String;

    /// Pipe `script` into the client connected with `connect_string`.
    /// A nonzero client exit is an error.
    async fn run_script(&self, script: &str, connect_string: &str) -> Result<(), SqlClientError>;
}

/// SQLcl (`sql`) invoked as an external process
pub struct SqlclClient {
    executable: String,
}

impl Default for SqlclClient {
    fn default() -> Self {
        Self {
            executable: "sql".to_string(),
        }
    }
}

impl SqlclClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_executable(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }
}

#[async_trait]
impl SqlClient for SqlclClient {
    fn display_command(&self, script: &str, connect_string: &str) -> String {
        format!("echo {} | {} {}", script, self.executable, connect_string)
    }

    async fn run_script(&self, script: &str, connect_string: &str) -> Result<(), SqlClientError> {
        // runs in the caller's directory, output goes straight to the terminal
        let config = ExecutionConfig::new()
            .with_stdin(format!("{}\n", script))
            .with_output_capture(false, false);

        let args = vec![connect_string.to_string()];
        let result = CommandExecutor::execute(&self.executable, &args, &config)
            .await
            .map_err(|e| match e {
                CommandExecutorError::SpawnFailed(_) => SqlClientError::ExecutableNotFound {
                    executable: self.executable.clone(),
                },
                other => SqlClientError::ExecutionFailed(other.to_string()),
            })?;

        debug!(
            "{} finished in {}ms with code {}",
            self.executable, result.execution_time_ms, result.exit_code
        );

        if !result.success {
            return Err(SqlClientError::ClientFailed {
                exit_code: result.exit_code,
            });
        }
        Ok(())
    }
}
