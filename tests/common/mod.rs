//! Common test utilities and helpers
//!
//! Fakes for the traits the application layer depends on, and builders for
//! scratch project trees.

#![allow(dead_code)]

pub mod mock_services;
pub mod test_helpers;
