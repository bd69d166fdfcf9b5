//! Candidate Filter
//!
//! Hard structural constraints. Every check is independent; an entry is
//! dropped if any of them rejects it.

use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use super::query::{EvolutionStage, TeamQuery};
use crate::core::catalog::CatalogEntry;

/// Why an entry was filtered out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Generation,
    Legendary,
    NotFullyEvolved,
    NotUnevolved,
    MegaForm,
    GmaxForm,
    AlternateForm,
    MissingIncludedType,
    ExcludedType,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::Generation => "generation not requested",
            Rejection::Legendary => "legendary or mythical",
            Rejection::NotFullyEvolved => "not fully evolved",
            Rejection::NotUnevolved => "not unevolved",
            Rejection::MegaForm => "mega forms disallowed",
            Rejection::GmaxForm => "gigantamax forms disallowed",
            Rejection::AlternateForm => "alternate forms disallowed",
            Rejection::MissingIncludedType => "lacks every included type",
            Rejection::ExcludedType => "has an excluded type",
        };
        f.write_str(reason)
    }
}

/// Structural filter prepared from a query.
#[derive(Debug, Clone)]
pub struct CandidateFilter {
    generations: HashSet<u32>,
    exclude_legendaries: bool,
    evolution_stage: EvolutionStage,
    allow_forms: bool,
    allow_mega: bool,
    allow_gmax: bool,
    include_types: HashSet<String>,
    exclude_types: HashSet<String>,
}

impl CandidateFilter {
    pub fn new(query: &TeamQuery) -> Self {
        Self {
            generations: query.generations.iter().copied().collect(),
            exclude_legendaries: query.exclude_legendaries,
            evolution_stage: query.evolution_stage,
            allow_forms: query.allow_forms,
            allow_mega: query.allow_mega,
            allow_gmax: query.allow_gmax,
            include_types: query.include_types.iter().map(|t| t.to_lowercase()).collect(),
            exclude_types: query.exclude_types.iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    /// First constraint `entry` violates, if any.
    pub fn rejection(&self, entry: &CatalogEntry) -> Option<Rejection> {
        if !self.generations.is_empty() && !self.generations.contains(&entry.generation) {
            return Some(Rejection::Generation);
        }

        if self.exclude_legendaries && entry.flags.is_restricted() {
            return Some(Rejection::Legendary);
        }

        match self.evolution_stage {
            EvolutionStage::FullyEvolved if !entry.evolution.is_fully_evolved => {
                return Some(Rejection::NotFullyEvolved);
            }
            EvolutionStage::Unevolved if !entry.evolution.is_unevolved => {
                return Some(Rejection::NotUnevolved);
            }
            _ => {}
        }

        if entry.form.is_mega && !self.allow_mega {
            return Some(Rejection::MegaForm);
        }
        if entry.form.is_gmax && !self.allow_gmax {
            return Some(Rejection::GmaxForm);
        }
        if entry.form.is_alternate() && !self.allow_forms {
            return Some(Rejection::AlternateForm);
        }

        let has_any = |set: &HashSet<String>| {
            entry.types.iter().any(|t| set.contains(&t.to_lowercase()))
        };
        if !self.include_types.is_empty() && !has_any(&self.include_types) {
            return Some(Rejection::MissingIncludedType);
        }
        if has_any(&self.exclude_types) {
            return Some(Rejection::ExcludedType);
        }

        None
    }
}

/// Lazily yield the entries of `entries` that satisfy `query`.
pub fn filter<'a>(
    entries: &'a [CatalogEntry],
    query: &TeamQuery,
) -> impl Iterator<Item = &'a CatalogEntry> + 'a {
    let filter = CandidateFilter::new(query);
    entries.iter().filter(move |entry| match filter.rejection(entry) {
        None => true,
        Some(reason) => {
            debug!(key = %entry.key, %reason, "Filtered out candidate");
            false
        }
    })
}
