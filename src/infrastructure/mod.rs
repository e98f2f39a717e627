/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - File system stores (project configuration, password cache)
/// - Version control queries (git)
/// - The SQL client (SQLcl)
/// - Process execution and terminal prompts
pub mod filesystem;
pub mod process;
pub mod scm;
pub mod sql;
pub mod terminal;

// Re-export commonly used types
pub use filesystem::{ConfigStore, CredentialStore, JsonFileCredentialStore};
pub use process::CommandExecutor;
pub use scm::{GitScm, ScmError, VersionControl};
pub use sql::{SqlClient, SqlclClient};
pub use terminal::{Prompter, TerminalPrompter};
