//! Keyword Interpreter
//!
//! Turns free theme text into a structured, synonym-expanded vocabulary:
//!
//! 1. Tokenize (lowercase, strip punctuation, split, cap at 30 tokens)
//! 2. Drop stopwords
//! 3. Deduplicate, keeping first-seen order
//! 4. Expand each token through the synonym table into its group
//! 5. Flag tokens the catalog has never heard of
//!
//! Interpretation is a pure function of `(text, catalog)`.

use std::collections::HashSet;
use std::sync::OnceLock;

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use super::types::InterpretedKeywords;
use crate::core::catalog::CatalogView;

// ============================================================================
// Constants
// ============================================================================

/// Hard cap on tokens taken from the theme text.
pub const MAX_TOKENS: usize = 30;

/// Characters replaced by spaces before splitting.
const PUNCTUATION: &[char] = &[',', '.', '!', '?', ':', ';', '(', ')', '"'];

/// Articles, prepositions, and request filler.
const STOP_WORDS: &[&str] = &[
    // Articles and conjunctions
    "a", "an", "the", "and", "or",
    // Prepositions
    "to", "of", "for", "with", "in", "on", "at",
    // Domain filler
    "team", "pokemon", "pokémon", "make", "generate",
];

// ============================================================================
// Keyword Interpreter
// ============================================================================

/// Tokenizes theme text and expands it against a catalog's synonyms.
#[derive(Debug, Clone)]
pub struct KeywordInterpreter {
    stop_words: HashSet<String>,
    max_tokens: usize,
}

impl Default for KeywordInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordInterpreter {
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            max_tokens: MAX_TOKENS,
        }
    }

    /// Case-insensitive stopword check.
    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(&token.to_lowercase())
    }

    /// Lowercase, strip punctuation, split on whitespace, cap the count.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned = text.trim().to_lowercase().replace(PUNCTUATION, " ");
        cleaned
            .split_whitespace()
            .take(self.max_tokens)
            .map(str::to_string)
            .collect()
    }

    /// Interpret `theme_text` against `catalog`.
    pub fn interpret<C>(&self, theme_text: &str, catalog: &C) -> InterpretedKeywords
    where
        C: CatalogView + ?Sized,
    {
        let raw_tokens: Vec<String> = self
            .tokenize(theme_text)
            .into_iter()
            .filter(|t| !self.is_stop_word(t))
            .collect::<IndexSet<String>>()
            .into_iter()
            .collect();

        let synonyms = catalog.synonyms();
        let mut groups: IndexMap<String, Vec<String>> = IndexMap::with_capacity(raw_tokens.len());
        let mut expanded: IndexSet<String> = IndexSet::new();

        for token in &raw_tokens {
            let mut group: IndexSet<String> = IndexSet::new();
            group.insert(token.clone());
            group.extend(synonyms.lookup(token).iter().map(|s| s.to_lowercase()));

            expanded.extend(group.iter().cloned());
            groups.insert(token.clone(), group.into_iter().collect());
        }

        let vocabulary = catalog.vocabulary();
        let unknown_tokens: Vec<String> = raw_tokens
            .iter()
            .filter(|t| !vocabulary.contains(t.as_str()))
            .cloned()
            .collect();

        debug!(
            raw = raw_tokens.len(),
            expanded = expanded.len(),
            unknown = unknown_tokens.len(),
            "Interpreted theme text"
        );

        InterpretedKeywords {
            raw_tokens,
            expanded_tokens: expanded.into_iter().collect(),
            unknown_tokens,
            groups,
        }
    }
}

/// Interpret `theme_text` with the default stopword set.
pub fn interpret<C>(theme_text: &str, catalog: &C) -> InterpretedKeywords
where
    C: CatalogView + ?Sized,
{
    static DEFAULT: OnceLock<KeywordInterpreter> = OnceLock::new();
    DEFAULT
        .get_or_init(KeywordInterpreter::new)
        .interpret(theme_text, catalog)
}
