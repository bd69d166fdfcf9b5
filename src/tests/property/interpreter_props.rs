//! Property-based tests for the Keyword Interpreter
//!
//! Tests invariants:
//! - Interpretation is deterministic
//! - No stopword appears in raw tokens
//! - Raw tokens are capped at 30
//! - Groups are keyed by exactly the raw tokens, root first

use proptest::prelude::*;

use crate::core::team::{interpret, KeywordInterpreter, MAX_TOKENS};
use crate::tests::common::fixtures;

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

/// Words drawn from stopwords, catalog vocabulary, and noise.
fn arb_word() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("the".to_string()),
        Just("Team".to_string()),
        Just("pokémon".to_string()),
        Just("spooky".to_string()),
        Just("DOG".to_string()),
        Just("cute!".to_string()),
        Just("(ghost)".to_string()),
        "[a-z]{1,8}",
    ]
}

/// Theme text assembled from words and assorted separators.
fn arb_theme() -> impl Strategy<Value = String> {
    let separator = prop_oneof![Just(" "), Just(", "), Just("\t"), Just(". ")];
    prop::collection::vec((arb_word(), separator), 0..60).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(word, sep)| format!("{word}{sep}"))
            .collect::<String>()
    })
}

proptest! {
    /// Property: Identical input yields identical interpretation
    #[test]
    fn prop_interpretation_is_deterministic(text in arb_theme()) {
        let catalog = fixtures::mini_catalog();
        prop_assert_eq!(interpret(&text, &catalog), interpret(&text, &catalog));
    }

    /// Property: Stopwords never survive, in any casing
    #[test]
    fn prop_no_stopwords_in_raw_tokens(text in arb_theme()) {
        let catalog = fixtures::mini_catalog();
        let interpreter = KeywordInterpreter::new();
        let result = interpreter.interpret(&text, &catalog);
        for token in &result.raw_tokens {
            prop_assert!(!interpreter.is_stop_word(token), "stopword {} leaked", token);
        }
    }

    /// Property: Raw token count is capped regardless of input length
    #[test]
    fn prop_raw_tokens_capped(text in "([a-z]{1,6} ){0,120}") {
        let catalog = fixtures::mini_catalog();
        let result = interpret(&text, &catalog);
        prop_assert!(result.raw_tokens.len() <= MAX_TOKENS);
    }

    /// Property: Every raw token roots a group that starts with itself,
    /// and every unknown token is a raw token
    #[test]
    fn prop_groups_match_raw_tokens(text in arb_theme()) {
        let catalog = fixtures::mini_catalog();
        let result = interpret(&text, &catalog);

        let roots: Vec<&String> = result.groups.keys().collect();
        let raw: Vec<&String> = result.raw_tokens.iter().collect();
        prop_assert_eq!(roots, raw);

        for (root, group) in &result.groups {
            prop_assert_eq!(group.first(), Some(root));
            for token in group {
                prop_assert!(result.expanded_tokens.contains(token));
            }
        }
        for token in &result.unknown_tokens {
            prop_assert!(result.raw_tokens.contains(token));
        }
    }
}
