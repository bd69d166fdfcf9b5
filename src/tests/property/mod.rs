//! Property-based tests for Themedex
//!
//! This module contains property-based tests using the proptest framework.
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! Run all property tests:
//! ```sh
//! cargo test property --release
//! ```
//!
//! Run a specific property test module:
//! ```sh
//! cargo test property::selection_props --release
//! ```
//!
//! ## Test Modules
//!
//! - `interpreter_props`: Tests for keyword interpretation
//!   - Deterministic for identical input
//!   - No stopword ever survives into raw tokens
//!   - Raw token count never exceeds 30
//!   - Every raw token roots its own group
//!
//! - `selection_props`: Tests for filtering and team selection
//!   - Team size never exceeds the clamped request
//!   - Keys are distinct unless duplicate forms are allowed
//!   - Species are distinct unless same-species picks are allowed
//!   - A mega/gmax pick is never followed by its base species
//!   - Legendaries and megas stay out when disallowed
//!
//! ## Configuration
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable:
//!
//! ```sh
//! PROPTEST_CASES=1000 cargo test property --release
//! ```

mod interpreter_props;
mod selection_props;
