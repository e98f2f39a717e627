pub mod config_service;
pub mod credential_service;

pub use config_service::{ConfigService, EditRequest};
pub use credential_service::{Clock, CredentialService, SystemClock};
