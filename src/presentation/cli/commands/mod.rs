pub mod config;
pub mod project;

pub use config::*;
pub use project::*;

use std::path::PathBuf;

use crate::common::error::WrapperError;
use crate::common::result::WrapperResult;
use crate::infrastructure::scm::VersionControl;

/// Git root of the current directory; every command works relative to it
pub(crate) async fn resolve_project_root(vcs: &dyn VersionControl) -> WrapperResult<PathBuf> {
    vcs.resolve_project_root().await.map_err(|e| {
        let exit_code = e.exit_code();
        WrapperError::git_error_with_source(e.to_string(), exit_code, e)
    })
}
