//! Values passed between pipeline stages and returned to callers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::catalog::CatalogEntry;

/// Interpretation of a theme text, created once per request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpretedKeywords {
    /// Cleaned, stopword-free, deduplicated tokens in first-seen order.
    pub raw_tokens: Vec<String>,
    /// Union of every raw token's equivalence group, in first-seen order.
    pub expanded_tokens: Vec<String>,
    /// Raw tokens absent from the catalog vocabulary.
    pub unknown_tokens: Vec<String>,
    /// Raw token (root) → root plus its synonyms.
    pub groups: IndexMap<String, Vec<String>>,
}

impl InterpretedKeywords {
    pub fn is_empty(&self) -> bool {
        self.raw_tokens.is_empty()
    }
}

/// A filtered entry with its relevance score and match reasons.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate<'a> {
    pub entry: &'a CatalogEntry,
    pub score: u32,
    /// At most six deduplicated root tokens, type matches first.
    pub reasons: Vec<String>,
}

/// Public projection of a picked entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedEntry {
    pub key: String,
    pub name: String,
    pub art_url: String,
    pub types: Vec<String>,
    pub reasons: Vec<String>,
}

impl From<&ScoredCandidate<'_>> for ProjectedEntry {
    fn from(candidate: &ScoredCandidate<'_>) -> Self {
        Self {
            key: candidate.entry.key.clone(),
            name: candidate.entry.display_name.clone(),
            art_url: candidate.entry.art_ref.clone(),
            types: candidate.entry.types.clone(),
            reasons: candidate.reasons.clone(),
        }
    }
}

/// Result of a generation call.
///
/// `interpreted` is always populated, even when `team` is empty, so callers
/// can explain why nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateTeamResult {
    pub interpreted: InterpretedKeywords,
    pub team: Vec<ProjectedEntry>,
}
