/// Version-control infrastructure
///
/// Root discovery and change-list enumeration, delegated to the `git` binary.

pub mod git_scm;
pub mod scm_interface;

pub use git_scm::GitScm;
pub use scm_interface::{ScmError, VersionControl};
