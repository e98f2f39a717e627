/// File-backed stores: the project configuration file and the password cache
pub mod config_store;
pub mod credential_store;

pub use config_store::{ConfigStore, ConfigStoreError};
pub use credential_store::{CredentialStore, CredentialStoreError, JsonFileCredentialStore};
