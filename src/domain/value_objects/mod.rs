pub mod changed_file;
pub mod config_key;
pub mod staging_path;
