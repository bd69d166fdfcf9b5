//! Theme Team Generation
//!
//! Turns free-text themes into small, diverse teams:
//!
//! ```text
//! theme text ──► interpreter ──► InterpretedKeywords ─┐
//!                                                     ▼
//! catalog ─────► filter ──► candidates ──► scorer ──► selector ──► team
//! ```
//!
//! Everything here is synchronous, in-memory computation over an immutable
//! catalog. Randomness enters only through the selector's `Rng` parameter.

pub mod filter;
pub mod generator;
pub mod interpreter;
pub mod query;
pub mod scorer;
pub mod selector;
pub mod types;
pub mod validation;

pub use filter::{filter, CandidateFilter, Rejection};
pub use generator::{generate, generate_with_rng, TeamGenerator};
pub use interpreter::{interpret, KeywordInterpreter, MAX_TOKENS};
pub use query::{ElementType, EvolutionStage, TeamQuery, DEFAULT_TEAM_SIZE, MAX_TEAM_SIZE, MIN_TEAM_SIZE};
pub use scorer::{rank, score};
pub use selector::{select, weighted_pick, POOL_WINDOW};
pub use types::{GenerateTeamResult, InterpretedKeywords, ProjectedEntry, ScoredCandidate};
pub use validation::{FieldError, GenerateTeamRequest, ValidationError};
