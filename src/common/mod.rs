//! Shared error handling and embedded templates

pub mod error;
pub mod result;
pub mod templates;
