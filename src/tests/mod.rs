//! Crate-internal test tree.

pub mod common;
mod property;
