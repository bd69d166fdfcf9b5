//! Pokémon Catalog
//!
//! The read-only dataset the team generator works against:
//!
//! - Catalog entries (one per addressable form)
//! - A synonym table used to expand theme tokens
//! - A tag-override table folded into curated tags at scoring time
//!
//! The catalog is loaded once at startup (see [`loader`]) and shared
//! immutably afterwards; concurrent readers need no synchronization.

pub mod error;
pub mod loader;
pub mod types;

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

pub use error::{CatalogError, Result};
pub use loader::load_catalog;
pub use types::{
    loose_pieces, normalize_tag, CatalogEntry, EntryTags, Evolution, Flags, Form, FormKind,
    SynonymTable, TagOverrideTable, TagSet, TagTier,
};

// ============================================================================
// Catalog View
// ============================================================================

/// Read access to a catalog, as consumed by the team pipeline.
pub trait CatalogView {
    /// All entries, in catalog order.
    fn entries(&self) -> &[CatalogEntry];

    fn synonyms(&self) -> &SynonymTable;

    fn tag_overrides(&self) -> &TagOverrideTable;

    /// Every token the catalog knows about: normalized tags from all tiers,
    /// type labels, and synonym-table keys.
    fn vocabulary(&self) -> &HashSet<String>;
}

/// Build the interpretation vocabulary for a set of entries and synonyms.
pub fn build_vocabulary(entries: &[CatalogEntry], synonyms: &SynonymTable) -> HashSet<String> {
    let mut vocabulary = HashSet::new();
    for entry in entries {
        vocabulary.extend(entry.tags.all().map(str::to_string));
        vocabulary.extend(entry.types.iter().map(|t| t.to_lowercase()));
    }
    vocabulary.extend(synonyms.keys().map(str::to_string));
    vocabulary
}

// ============================================================================
// Catalog
// ============================================================================

/// Validated, immutable catalog.
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    synonyms: SynonymTable,
    tag_overrides: TagOverrideTable,
    vocabulary: OnceLock<HashSet<String>>,
}

impl Catalog {
    /// Assemble a catalog, enforcing entry invariants.
    ///
    /// Keys must be unique, every entry needs at least one type, and a form
    /// cannot be both mega and gmax.
    pub fn new(
        entries: Vec<CatalogEntry>,
        synonyms: SynonymTable,
        tag_overrides: TagOverrideTable,
    ) -> Result<Self> {
        let mut seen: HashMap<&str, usize> = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            if seen.insert(entry.key.as_str(), idx).is_some() {
                return Err(CatalogError::DuplicateKey(entry.key.clone()));
            }
            if entry.types.is_empty() {
                return Err(CatalogError::InvalidEntry {
                    key: entry.key.clone(),
                    reason: "entry has no types".to_string(),
                });
            }
            if entry.types.len() > 2 {
                return Err(CatalogError::InvalidEntry {
                    key: entry.key.clone(),
                    reason: format!("entry has {} types, at most 2 allowed", entry.types.len()),
                });
            }
            if entry.form.is_mega && entry.form.is_gmax {
                return Err(CatalogError::InvalidEntry {
                    key: entry.key.clone(),
                    reason: "form cannot be both mega and gmax".to_string(),
                });
            }
        }

        Ok(Self {
            entries,
            synonyms,
            tag_overrides,
            vocabulary: OnceLock::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by key.
    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.key == key)
    }
}

impl CatalogView for Catalog {
    fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    fn tag_overrides(&self) -> &TagOverrideTable {
        &self.tag_overrides
    }

    fn vocabulary(&self) -> &HashSet<String> {
        self.vocabulary
            .get_or_init(|| build_vocabulary(&self.entries, &self.synonyms))
    }
}
