//! Domain model: connection configuration, cached credential and the
//! staging-directory rules of the export tree

pub mod entities;
pub mod value_objects;
