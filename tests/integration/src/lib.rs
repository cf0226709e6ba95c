//! Integration test utilities for hearth
//!
//! This crate provides an in-memory entitlement store plus helpers for
//! driving the services directly and the REST API end to end.

pub mod fixtures;

pub use fixtures::*;
pub use helpers::*;
pub use memory::MemoryStore;
