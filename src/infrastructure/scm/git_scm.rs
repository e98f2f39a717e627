use super::scm_interface::{ScmError, VersionControl};
use crate::infrastructure::process::{CommandExecutor, CommandExecutorError, ExecutionConfig};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Git implementation of the version-control queries
pub struct GitScm {
    git_executable: String,
    working_dir: Option<PathBuf>,
}

impl Default for GitScm {
    fn default() -> Self {
        Self {
            git_executable: "git".to_string(),
            working_dir: None,
        }
    }
}

impl GitScm {
    /// Create a new Git SCM instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Run root discovery from `dir` instead of the process working directory
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Execute a git command and check for success
    async fn execute_git_command_checked(&self, args: &[String]) -> Result<String, ScmError> {
        let mut config = ExecutionConfig::new();
        if let Some(dir) = &self.working_dir {
            config = config.with_working_directory(dir);
        }

        let result = CommandExecutor::execute(&self.git_executable, args, &config)
            .await
            .map_err(|e| match e {
                CommandExecutorError::SpawnFailed(_) => {
                    ScmError::executable_not_found(&self.git_executable)
                }
                other => ScmError::Internal {
                    message: other.to_string(),
                },
            })?;

        if !result.success {
            let command = format!("{} {}", self.git_executable, args.join(" "));
            return Err(ScmError::command_failed(
                command,
                result.exit_code,
                result.stderr.trim(),
            ));
        }

        Ok(result.stdout)
    }
}

#[async_trait]
impl VersionControl for GitScm {
    async fn resolve_project_root(&self) -> Result<PathBuf, ScmError> {
        let args = vec!["rev-parse".to_string(), "--show-toplevel".to_string()];
        let stdout = self
            .execute_git_command_checked(&args)
            .await
            .map_err(|e| match e {
                ScmError::CommandFailed {
                    exit_code, stderr, ..
                } => ScmError::NotARepository {
                    message: stderr,
                    exit_code,
                },
                other => other,
            })?;

        let root = PathBuf::from(stdout.trim());
        debug!("Resolved project root: {}", root.display());
        Ok(root)
    }

    async fn list_changed_files(
        &self,
        root: &Path,
        subtree: &str,
    ) -> Result<Vec<String>, ScmError> {
        let args = vec![
            "-C".to_string(),
            root.display().to_string(),
            "status".to_string(),
            "-u".to_string(),
            "--porcelain".to_string(),
            root.join(subtree).display().to_string(),
        ];
        let stdout = self.execute_git_command_checked(&args).await?;

        // keep blank lines out, the caller strips the status prefix itself
        Ok(stdout
            .split('\n')
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}
