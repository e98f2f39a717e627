use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Version-control queries the wrapper depends on
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Root directory of the project enclosing the current directory
    async fn resolve_project_root(&self) -> Result<PathBuf, ScmError>;

    /// Raw porcelain status lines (new and modified, untracked included)
    /// restricted to `subtree`, a path relative to `root`
    async fn list_changed_files(&self, root: &Path, subtree: &str)
        -> Result<Vec<String>, ScmError>;
}

/// Errors that can occur during SCM operations
#[derive(Debug, thiserror::Error)]
pub enum ScmError {
    #[error("Not inside a git project: {message}")]
    NotARepository { message: String, exit_code: i32 },

    #[error("SCM executable not found: {executable}")]
    ExecutableNotFound { executable: String },

    #[error("Command execution failed: {command}, exit code: {exit_code}, stderr: {stderr}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ScmError {
    /// Create an executable not found error
    pub fn executable_not_found(executable: impl Into<String>) -> Self {
        Self::ExecutableNotFound {
            executable: executable.into(),
        }
    }

    /// Create a command failed error
    pub fn command_failed(
        command: impl Into<String>,
        exit_code: i32,
        stderr: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            command: command.into(),
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Exit code reported by the failed command, if any
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::NotARepository { exit_code, .. } | Self::CommandFailed { exit_code, .. } => {
                Some(*exit_code)
            }
            _ => None,
        }
    }
}
