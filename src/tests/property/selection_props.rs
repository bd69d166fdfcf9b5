//! Property-based tests for filtering and team selection
//!
//! Tests invariants:
//! - team.len() <= clamp(requested, 1, 6)
//! - Distinct keys when duplicate forms are disallowed
//! - Distinct species when same-species picks are disallowed
//! - A mega/gmax pick excludes its base species from later picks
//! - excludeLegendaries / allowMega are honored end to end

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::catalog::{Catalog, CatalogEntry, SynonymTable, TagOverrideTable, TagTier};
use crate::core::team::{select, ScoredCandidate, TeamGenerator, TeamQuery};

const TYPES: [&str; 4] = ["fire", "water", "grass", "ghost"];

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

/// (species index, type index, special form, legendary, score)
type EntrySpec = (usize, usize, u8, bool, u32);

fn arb_entry_spec() -> impl Strategy<Value = EntrySpec> {
    (0usize..5, 0usize..TYPES.len(), 0u8..3, any::<bool>(), 1u32..10)
}

fn arb_specs() -> impl Strategy<Value = Vec<EntrySpec>> {
    prop::collection::vec(arb_entry_spec(), 0..40)
}

/// Build entries from specs. Special forms (1 = mega, 2 = gmax) get their
/// own species key and point back at the base species.
fn build_entries(specs: &[EntrySpec]) -> Vec<CatalogEntry> {
    specs
        .iter()
        .enumerate()
        .map(|(i, &(species, ty, special, legendary, _))| {
            let base = format!("s{species}");
            let key = format!("e{i}");
            let mut entry = match special {
                1 => CatalogEntry::new(&key, &format!("{base}-mega"), &[TYPES[ty]]).mega_of(&base),
                2 => CatalogEntry::new(&key, &format!("{base}-gmax"), &[TYPES[ty]]).gmax_of(&base),
                _ => CatalogEntry::new(&key, &base, &[TYPES[ty]]),
            };
            if legendary {
                entry = entry.legendary();
            }
            entry.with_tags(TagTier::Curated, &["theme"])
        })
        .collect()
}

fn arb_query() -> impl Strategy<Value = TeamQuery> {
    (0usize..10, any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(size, dup_forms, same_species, exclude_legendaries, allow_mega)| {
            TeamQuery::new("theme")
                .with_team_size(size)
                .allow_same_form_duplicates(dup_forms)
                .allow_same_species_multiple(same_species)
                .exclude_legendaries(exclude_legendaries)
                .allow_mega(allow_mega)
                .allow_gmax(true)
        },
    )
}

proptest! {
    /// Property: Selection honors size, duplicate, species, and special-form rules
    #[test]
    fn prop_selection_invariants(specs in arb_specs(), query in arb_query(), seed in any::<u64>()) {
        let entries = build_entries(&specs);
        let mut scored: Vec<ScoredCandidate<'_>> = entries
            .iter()
            .zip(&specs)
            .map(|(entry, spec)| ScoredCandidate { entry, score: spec.4, reasons: Vec::new() })
            .collect();
        scored.sort_by(|a, b| b.score.cmp(&a.score));

        let team = select(scored, &query, &mut StdRng::seed_from_u64(seed));
        prop_assert!(team.len() <= query.clamped_team_size());

        let by_key: HashMap<&str, &CatalogEntry> =
            entries.iter().map(|e| (e.key.as_str(), e)).collect();
        let picked: Vec<&CatalogEntry> = team.iter().map(|p| by_key[p.key.as_str()]).collect();

        if !query.allow_same_form_duplicates {
            let keys: HashSet<&str> = picked.iter().map(|e| e.key.as_str()).collect();
            prop_assert_eq!(keys.len(), picked.len());
        }
        if !query.allow_same_species_multiple {
            let species: HashSet<&str> = picked.iter().map(|e| e.species_key.as_str()).collect();
            prop_assert_eq!(species.len(), picked.len());
        }

        let mut excluded: HashSet<&str> = HashSet::new();
        for entry in &picked {
            prop_assert!(!excluded.contains(entry.species_key.as_str()));
            if let Some(base) = entry.form.special_form_base() {
                excluded.insert(base);
            }
        }
    }

    /// Property: Legendary and mega filters hold through the whole pipeline
    #[test]
    fn prop_pipeline_respects_filters(specs in arb_specs(), query in arb_query(), seed in any::<u64>()) {
        let catalog = Catalog::new(
            build_entries(&specs),
            SynonymTable::default(),
            TagOverrideTable::default(),
        ).unwrap();
        let generator = TeamGenerator::new(Arc::new(catalog));
        let result = generator.run_with_rng(&query, &mut StdRng::seed_from_u64(seed));

        for projected in &result.team {
            let entry = generator.catalog().get(&projected.key).unwrap();
            if query.exclude_legendaries {
                prop_assert!(!entry.flags.is_restricted());
            }
            if !query.allow_mega {
                prop_assert!(!entry.form.is_mega);
            }
        }
    }
}
