//! # sqlcl-wrapper
//!
//! `sqlcl-wrapper` runs Oracle SQLcl `project` commands against a database
//! connection described by a small YAML file kept at the root of the git
//! project, and tidies up the DDL that `project export` writes.
//!
//! ## Commands
//!
//! ```bash
//! sqlcl-wrapper config generate          # interactively create .sqlcl-wrapper.config
//! sqlcl-wrapper config show              # print it
//! sqlcl-wrapper config edit schema FEND  # change one key
//! sqlcl-wrapper project export -o DEMO   # run SQLcl, then reorganize the export
//! ```
//!
//! The schema password is asked once and cached for 15 minutes.
//!
//! After a `project export`, files that SQLcl wrote under a developer
//! staging directory (`src/database/fenddev<c>/`) have their `FENDDEV<c>`
//! schema references rewritten to `FEND`, are moved into
//! `src/database/fend/`, and the staging directories are removed.
//!
//! ## Architecture
//!
//! - [`domain`]: configuration document, cached credential, path rules
//! - [`application`]: configuration and credential services, the project
//!   command and export reorganizer use cases
//! - [`infrastructure`]: git, the SQL client process, file stores, prompts
//! - [`presentation`]: command-line interface
//! - [`common`]: error type, result helpers, embedded templates
//!
//! ## Error Handling
//!
//! - [`common::error::WrapperError`]: main error type, carries the exit code
//! - [`common::result::WrapperResult`]: alias for `Result<T, WrapperError>`

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::WrapperError;
pub use crate::common::result::WrapperResult as Result;
