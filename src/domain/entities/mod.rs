pub mod cached_credential;
pub mod connection_config;
