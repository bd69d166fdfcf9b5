//! Scorer
//!
//! Relevance of a candidate against interpreted keywords. Each synonym group
//! can contribute once per category:
//!
//! | Category     | Weight |
//! |--------------|--------|
//! | type label   | 2      |
//! | curated      | 3      |
//! | text-derived | 2      |
//! | derived      | 1      |
//!
//! Tag overrides are folded into the curated tier at scoring time.

use std::borrow::Cow;

use indexmap::IndexSet;
use tracing::debug;

use super::types::{InterpretedKeywords, ScoredCandidate};
use crate::core::catalog::{loose_pieces, normalize_tag, CatalogEntry, TagOverrideTable, TagSet};

pub const TYPE_WEIGHT: u32 = 2;
pub const CURATED_WEIGHT: u32 = 3;
pub const TEXT_DERIVED_WEIGHT: u32 = 2;
pub const DERIVED_WEIGHT: u32 = 1;

/// Reasons kept per candidate.
pub const MAX_REASONS: usize = 6;

/// Curated tags of `entry` with its override folded in.
///
/// Each override contributes its normalized whole form plus the loose
/// pieces of that form, so `"big dog"` also matches `"dog"`.
fn curated_with_overrides<'e>(
    entry: &'e CatalogEntry,
    overrides: &TagOverrideTable,
) -> Cow<'e, TagSet> {
    let Some(extra) = overrides.for_entry(entry) else {
        return Cow::Borrowed(&entry.tags.curated);
    };

    let mut curated = entry.tags.curated.clone();
    for raw in extra {
        let normalized = normalize_tag(raw);
        curated.extend(loose_pieces(&normalized).map(str::to_string));
        curated.extend([normalized]);
    }
    Cow::Owned(curated)
}

fn any_in(group: &[String], tags: &TagSet) -> bool {
    group.iter().any(|token| tags.contains(token))
}

/// Score one entry.
pub fn score<'a>(
    entry: &'a CatalogEntry,
    interpreted: &InterpretedKeywords,
    overrides: &TagOverrideTable,
) -> ScoredCandidate<'a> {
    let curated = curated_with_overrides(entry, overrides);
    let tags = &entry.tags;

    let mut total = 0;
    let mut type_reasons = Vec::new();
    let mut curated_reasons = Vec::new();
    let mut tag_reasons = Vec::new();

    for (root, group) in &interpreted.groups {
        if group.iter().any(|token| entry.has_type(token)) {
            total += TYPE_WEIGHT;
            type_reasons.push(root);
        }
        if any_in(group, &curated) {
            total += CURATED_WEIGHT;
            curated_reasons.push(root);
        }
        if any_in(group, &tags.text_derived) {
            total += TEXT_DERIVED_WEIGHT;
            tag_reasons.push(root);
        }
        if any_in(group, &tags.derived) {
            total += DERIVED_WEIGHT;
            tag_reasons.push(root);
        }
    }

    let reasons: Vec<String> = type_reasons
        .into_iter()
        .chain(curated_reasons)
        .chain(tag_reasons)
        .collect::<IndexSet<&String>>()
        .into_iter()
        .take(MAX_REASONS)
        .cloned()
        .collect();

    ScoredCandidate {
        entry,
        score: total,
        reasons,
    }
}

/// Score every candidate, drop non-matches, and sort by score descending.
///
/// The sort is stable, so equal scores keep their input order.
pub fn rank<'a, I>(
    candidates: I,
    interpreted: &InterpretedKeywords,
    overrides: &TagOverrideTable,
) -> Vec<ScoredCandidate<'a>>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    let mut considered = 0usize;
    let mut scored: Vec<ScoredCandidate<'a>> = candidates
        .into_iter()
        .inspect(|_| considered += 1)
        .map(|entry| score(entry, interpreted, overrides))
        .filter(|candidate| candidate.score > 0)
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));

    debug!(candidates = considered, scored = scored.len(), "Ranked candidates");
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{CatalogView, TagTier};
    use crate::core::team::interpreter::interpret;
    use crate::tests::common::fixtures;

    fn keywords(text: &str) -> InterpretedKeywords {
        interpret(text, &fixtures::mini_catalog())
    }

    #[test]
    fn test_category_weights_accumulate_per_group() {
        let entry = CatalogEntry::new("gengar", "gengar", &["ghost", "poison"])
            .with_tags(TagTier::Derived, &["type:ghost"])
            .with_tags(TagTier::TextDerived, &["ghost"])
            .with_tags(TagTier::Curated, &["ghost"]);
        let result = score(&entry, &keywords("ghost"), &TagOverrideTable::default());

        assert_eq!(
            result.score,
            TYPE_WEIGHT + CURATED_WEIGHT + TEXT_DERIVED_WEIGHT + DERIVED_WEIGHT
        );
        assert_eq!(result.reasons, vec!["ghost"]);
    }

    #[test]
    fn test_group_counts_once_per_category() {
        // spooky, ghost and haunted all sit in one group
        let entry = CatalogEntry::new("x", "x", &["normal"])
            .with_tags(TagTier::Curated, &["spooky", "ghost", "haunted"]);
        let result = score(&entry, &keywords("spooky"), &TagOverrideTable::default());
        assert_eq!(result.score, CURATED_WEIGHT);
        assert_eq!(result.reasons, vec!["spooky"]);
    }

    #[test]
    fn test_reason_is_root_not_synonym() {
        let entry = CatalogEntry::new("x", "x", &["normal"]).with_tags(TagTier::Curated, &["hound"]);
        let result = score(&entry, &keywords("dog"), &TagOverrideTable::default());
        assert_eq!(result.reasons, vec!["dog"]);
    }

    #[test]
    fn test_reasons_ordered_type_then_curated_then_tags() {
        let entry = CatalogEntry::new("x", "x", &["fire"])
            .with_tags(TagTier::Derived, &["shiny"])
            .with_tags(TagTier::Curated, &["cute"]);
        let result = score(&entry, &keywords("shiny cute fire"), &TagOverrideTable::default());
        assert_eq!(result.reasons, vec!["fire", "cute", "shiny"]);
    }

    #[test]
    fn test_reasons_capped_at_six() {
        let words = ["a1", "b2", "c3", "d4", "e5", "f6", "g7", "h8"];
        let entry = CatalogEntry::new("x", "x", &["normal"]).with_tags(TagTier::Curated, &words);
        let result = score(&entry, &keywords(&words.join(" ")), &TagOverrideTable::default());
        assert_eq!(result.score, CURATED_WEIGHT * 8);
        assert_eq!(result.reasons.len(), MAX_REASONS);
        assert_eq!(result.reasons[0], "a1");
    }

    #[test]
    fn test_overrides_fold_into_curated_with_pieces() {
        let entry = CatalogEntry::new("arcanine", "arcanine", &["fire"]);
        let overrides = TagOverrideTable::new([("arcanine", vec!["theme:Loyal-Dog"])]);

        let whole = score(&entry, &keywords("loyal-dog"), &overrides);
        assert_eq!(whole.score, CURATED_WEIGHT);

        let piece = score(&entry, &keywords("loyal"), &overrides);
        assert_eq!(piece.score, CURATED_WEIGHT);
        assert_eq!(piece.reasons, vec!["loyal"]);

        let without = score(&entry, &keywords("loyal"), &TagOverrideTable::default());
        assert_eq!(without.score, 0);
    }

    #[test]
    fn test_species_override_applies_without_entry_override() {
        let mega = CatalogEntry::new("gengar-mega", "gengar", &["ghost"]).mega_of("gengar");
        let overrides = TagOverrideTable::new([("gengar", vec!["prankster"])]);
        assert_eq!(score(&mega, &keywords("prankster"), &overrides).score, CURATED_WEIGHT);

        let shadowed = TagOverrideTable::new([
            ("gengar", vec!["prankster"]),
            ("gengar-mega", vec!["huge"]),
        ]);
        assert_eq!(score(&mega, &keywords("prankster"), &shadowed).score, 0);
    }

    #[test]
    fn test_rank_drops_zero_scores_and_sorts_stably() {
        let catalog = fixtures::mini_catalog();
        let ranked = rank(catalog.entries(), &keywords("spooky"), catalog.tag_overrides());
        let keys: Vec<&str> = ranked.iter().map(|c| c.entry.key.as_str()).collect();

        assert!(!keys.contains(&"lucario"));
        assert!(!keys.contains(&"mewtwo"));
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));

        // Equal scores keep catalog order
        for pair in ranked.windows(2).filter(|w| w[0].score == w[1].score) {
            let pos = |key: &str| catalog.entries().iter().position(|e| e.key == key);
            assert!(pos(&pair[0].entry.key) < pos(&pair[1].entry.key));
        }
    }

    #[test]
    fn test_no_keywords_scores_nothing() {
        let catalog = fixtures::mini_catalog();
        assert!(rank(catalog.entries(), &keywords(""), catalog.tag_overrides()).is_empty());
    }
}
