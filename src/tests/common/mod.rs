//! Common Test Utilities
//!
//! Shared fixtures used across unit and property tests:
//! - An in-memory mini catalog (`fixtures::mini_catalog`)
//! - The same catalog written to disk as JSON (`fixtures::write_data_dir`)

pub mod fixtures;
