//! Team Selector
//!
//! Greedy weighted sampling without replacement over a sliding window of
//! the best-scoring candidates. Each iteration re-slices the top of the
//! (shrinking) ranked list, drops ineligible candidates, applies a soft
//! primary-type diversity penalty, and draws one pick.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use tracing::debug;

use super::query::TeamQuery;
use super::types::{ProjectedEntry, ScoredCandidate};

/// Candidates considered per draw, taken from the top of the ranking.
pub const POOL_WINDOW: usize = 50;

/// Weight lost per earlier pick sharing a primary type.
pub const TYPE_REPEAT_PENALTY: i64 = 2;

// ============================================================================
// Selection State
// ============================================================================

/// What has been picked so far in one selection call.
#[derive(Debug, Default)]
struct SelectionState {
    picked_keys: HashSet<String>,
    picked_species: HashSet<String>,
    primary_type_picks: HashMap<String, i64>,
    /// Base species of mega/gmax forms already on the team.
    excluded_species: HashSet<String>,
}

impl SelectionState {
    fn admits(&self, candidate: &ScoredCandidate<'_>, query: &TeamQuery) -> bool {
        let entry = candidate.entry;
        let species = entry.species_key.to_lowercase();

        if !query.allow_same_form_duplicates && self.picked_keys.contains(&entry.key) {
            return false;
        }
        if !query.allow_same_species_multiple && self.picked_species.contains(&species) {
            return false;
        }
        !self.excluded_species.contains(&species)
    }

    fn weight(&self, candidate: &ScoredCandidate<'_>) -> i64 {
        let repeats = self
            .primary_type_picks
            .get(&candidate.entry.primary_type().to_lowercase())
            .copied()
            .unwrap_or(0);
        (i64::from(candidate.score) - TYPE_REPEAT_PENALTY * repeats).max(1)
    }

    fn record(&mut self, candidate: &ScoredCandidate<'_>) {
        let entry = candidate.entry;
        self.picked_keys.insert(entry.key.clone());
        self.picked_species.insert(entry.species_key.to_lowercase());
        *self
            .primary_type_picks
            .entry(entry.primary_type().to_lowercase())
            .or_insert(0) += 1;

        if let Some(base) = entry.form.special_form_base() {
            self.excluded_species.insert(base.to_lowercase());
        }
    }
}

// ============================================================================
// Weighted Draw
// ============================================================================

/// Index drawn with probability proportional to its weight.
///
/// Falls back to a uniform draw when the weights do not sum to a positive
/// total. Returns `None` only for an empty slice.
pub fn weighted_pick<R: Rng + ?Sized>(weights: &[i64], rng: &mut R) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }

    let total: i64 = weights.iter().sum();
    if total <= 0 {
        return Some(rng.gen_range(0..weights.len()));
    }

    let roll = rng.gen_range(0..total);
    let mut cumulative = 0;
    for (idx, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if roll < cumulative {
            return Some(idx);
        }
    }

    Some(weights.len() - 1)
}

// ============================================================================
// Selection
// ============================================================================

/// Pick up to `query.clamped_team_size()` entries from a ranked list.
///
/// `scored` must already be sorted best-first. The team may come back
/// shorter than requested when the eligible pool runs dry.
pub fn select<R: Rng + ?Sized>(
    mut scored: Vec<ScoredCandidate<'_>>,
    query: &TeamQuery,
    rng: &mut R,
) -> Vec<ProjectedEntry> {
    let team_size = query.clamped_team_size();
    let mut state = SelectionState::default();
    let mut team = Vec::with_capacity(team_size);

    while team.len() < team_size {
        let window = scored.len().min(POOL_WINDOW);
        let pool: Vec<usize> = (0..window)
            .filter(|&idx| state.admits(&scored[idx], query))
            .collect();

        if pool.is_empty() {
            debug!(picked = team.len(), requested = team_size, "Candidate pool exhausted");
            break;
        }

        let weights: Vec<i64> = pool.iter().map(|&idx| state.weight(&scored[idx])).collect();
        let Some(drawn) = weighted_pick(&weights, rng) else {
            break;
        };
        let chosen = pool[drawn];

        state.record(&scored[chosen]);
        team.push(ProjectedEntry::from(&scored[chosen]));

        if !query.allow_same_form_duplicates {
            scored.remove(chosen);
        }
    }

    team
}
