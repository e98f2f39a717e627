use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WrapperError {
    #[error("{message}")]
    UsageError { message: String },

    #[error("File {} not found in git project root", path.display())]
    ConfigMissing { path: PathBuf },

    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Credential cache error: {message}")]
    CredentialError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Git operation failed: {message}")]
    GitError {
        message: String,
        exit_code: Option<i32>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Command execution failed: {message}")]
    CommandError {
        message: String,
        command: String,
        exit_code: Option<i32>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("File system operation failed: {message}")]
    FileSystemError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl WrapperError {
    pub fn usage_error(message: impl Into<String>) -> Self {
        Self::UsageError {
            message: message.into(),
        }
    }

    pub fn config_missing(path: impl Into<PathBuf>) -> Self {
        Self::ConfigMissing { path: path.into() }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: None,
        }
    }

    pub fn config_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn credential_error(message: impl Into<String>) -> Self {
        Self::CredentialError {
            message: message.into(),
            source: None,
        }
    }

    pub fn credential_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::CredentialError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn git_error(message: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self::GitError {
            message: message.into(),
            exit_code,
            source: None,
        }
    }

    pub fn git_error_with_source(
        message: impl Into<String>,
        exit_code: Option<i32>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::GitError {
            message: message.into(),
            exit_code,
            source: Some(Box::new(source)),
        }
    }

    pub fn command_error(
        message: impl Into<String>,
        command: impl Into<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::CommandError {
            message: message.into(),
            command: command.into(),
            exit_code,
            source: None,
        }
    }

    pub fn command_error_with_source(
        message: impl Into<String>,
        command: impl Into<String>,
        exit_code: Option<i32>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::CommandError {
            message: message.into(),
            command: command.into(),
            exit_code,
            source: Some(Box::new(source)),
        }
    }

    pub fn filesystem_error(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn filesystem_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
            source: None,
        }
    }

    /// Process exit code reported for this error.
    ///
    /// External command failures pass their own positive exit code through;
    /// signals and every other failure exit with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::GitError {
                exit_code: Some(code),
                ..
            }
            | Self::CommandError {
                exit_code: Some(code),
                ..
            } if *code > 0 => *code,
            _ => 1,
        }
    }
}

impl From<std::io::Error> for WrapperError {
    fn from(error: std::io::Error) -> Self {
        Self::filesystem_error_with_source("File system operation failed", None, error)
    }
}
