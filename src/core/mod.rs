
pub mod api;
pub mod logging;

// Read-only dataset: entries, synonyms, tag overrides
pub mod catalog;

// Interpret → filter → score → select
pub mod team;
