//! Team generation pipeline: filter → score → select.

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info};

use super::filter::filter;
use super::interpreter::KeywordInterpreter;
use super::query::TeamQuery;
use super::scorer::rank;
use super::selector::select;
use super::types::{GenerateTeamResult, InterpretedKeywords};
use crate::core::catalog::CatalogView;

/// Generate a team with a fresh thread-local RNG.
pub fn generate<C>(query: &TeamQuery, interpreted: InterpretedKeywords, catalog: &C) -> GenerateTeamResult
where
    C: CatalogView + ?Sized,
{
    generate_with_rng(query, interpreted, catalog, &mut rand::thread_rng())
}

/// Generate a team drawing randomness from `rng`.
///
/// No matches is not an error: the team comes back empty and `interpreted`
/// is returned untouched.
pub fn generate_with_rng<C, R>(
    query: &TeamQuery,
    interpreted: InterpretedKeywords,
    catalog: &C,
    rng: &mut R,
) -> GenerateTeamResult
where
    C: CatalogView + ?Sized,
    R: Rng + ?Sized,
{
    if interpreted.is_empty() {
        debug!("Theme text has no usable tokens");
        return GenerateTeamResult {
            interpreted,
            team: Vec::new(),
        };
    }

    let candidates = filter(catalog.entries(), query);
    let scored = rank(candidates, &interpreted, catalog.tag_overrides());

    if scored.is_empty() {
        debug!(tokens = interpreted.raw_tokens.len(), "No candidate matched the theme");
        return GenerateTeamResult {
            interpreted,
            team: Vec::new(),
        };
    }

    let team = select(scored, query, rng);
    debug!(picked = team.len(), requested = query.clamped_team_size(), "Selected team");

    GenerateTeamResult { interpreted, team }
}

// ============================================================================
// Team Generator
// ============================================================================

/// Interprets and generates against a shared catalog.
///
/// Cloning is cheap; clones share the catalog.
#[derive(Debug)]
pub struct TeamGenerator<C: CatalogView> {
    catalog: Arc<C>,
    interpreter: KeywordInterpreter,
}

impl<C: CatalogView> Clone for TeamGenerator<C> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            interpreter: self.interpreter.clone(),
        }
    }
}

impl<C: CatalogView> TeamGenerator<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self {
            catalog,
            interpreter: KeywordInterpreter::new(),
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn interpret(&self, theme_text: &str) -> InterpretedKeywords {
        self.interpreter.interpret(theme_text, self.catalog.as_ref())
    }

    /// Interpret `query.theme_text` and generate a team.
    pub fn run(&self, query: &TeamQuery) -> GenerateTeamResult {
        self.run_with_rng(query, &mut rand::thread_rng())
    }

    pub fn run_with_rng<R: Rng + ?Sized>(&self, query: &TeamQuery, rng: &mut R) -> GenerateTeamResult {
        let interpreted = self.interpret(&query.theme_text);
        let result = generate_with_rng(query, interpreted, self.catalog.as_ref(), rng);

        info!(
            theme = %query.theme_text,
            unknown = result.interpreted.unknown_tokens.len(),
            team = result.team.len(),
            "Generated team"
        );
        result
    }
}
