//! Catalog domain types.
//!
//! Entries are normalized once at ingestion: tag namespaces are stripped,
//! everything matchable is lowercased. Matching code downstream can then
//! compare plain strings.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

// ============================================================================
// Tag Normalization
// ============================================================================

/// Normalize a tag for matching: trim, lowercase, strip a `namespace:` prefix.
///
/// `"type:Ghost"` becomes `"ghost"`; `"spooky"` stays `"spooky"`.
pub fn normalize_tag(tag: &str) -> String {
    let tag = tag.trim();
    let value = match tag.find(':') {
        Some(idx) => &tag[idx + 1..],
        None => tag,
    };
    value.trim().to_lowercase()
}

/// Split a free-form tag into loose pieces on whitespace and punctuation.
pub fn loose_pieces(tag: &str) -> impl Iterator<Item = &str> {
    tag.split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .filter(|piece| !piece.is_empty())
}

// ============================================================================
// Tags
// ============================================================================

/// Trust tier of a tag collection, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagTier {
    /// Structural tags (`type:fire`, `gen:3`).
    Derived,
    /// Looser tags inferred from names, abilities, size.
    TextDerived,
    /// Manually or rule-asserted tags.
    Curated,
}

/// A set of normalized tag values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagSet(HashSet<String>);

impl TagSet {
    /// Build a tag set, normalizing every raw tag.
    pub fn from_raw<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            tags.into_iter()
                .map(|t| normalize_tag(t.as_ref()))
                .filter(|t| !t.is_empty())
                .collect(),
        )
    }

    /// Membership test against an already-normalized token.
    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Extend<String> for TagSet {
    /// Add already-normalized tags.
    fn extend<I: IntoIterator<Item = String>>(&mut self, tags: I) {
        self.0.extend(tags.into_iter().filter(|t| !t.is_empty()));
    }
}

impl From<Vec<String>> for TagSet {
    fn from(tags: Vec<String>) -> Self {
        Self::from_raw(tags)
    }
}

impl From<TagSet> for Vec<String> {
    fn from(set: TagSet) -> Self {
        let mut tags: Vec<String> = set.0.into_iter().collect();
        tags.sort();
        tags
    }
}

/// The three tag tiers carried by an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryTags {
    pub derived: TagSet,
    pub text_derived: TagSet,
    pub curated: TagSet,
}

impl EntryTags {
    /// Every normalized tag across all tiers.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.derived
            .iter()
            .chain(self.text_derived.iter())
            .chain(self.curated.iter())
    }
}

// ============================================================================
// Entry Attributes
// ============================================================================

/// Rarity flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Flags {
    pub is_legendary: bool,
    pub is_mythical: bool,
    pub is_baby: bool,
}

impl Flags {
    /// Legendary or mythical.
    pub fn is_restricted(&self) -> bool {
        self.is_legendary || self.is_mythical
    }
}

/// Evolutionary position, fixed at catalog build time.
///
/// Both booleans are true only for single-stage chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evolution {
    pub chain_id: u32,
    pub is_unevolved: bool,
    pub is_fully_evolved: bool,
}

impl Default for Evolution {
    fn default() -> Self {
        Self {
            chain_id: 0,
            is_unevolved: true,
            is_fully_evolved: true,
        }
    }
}

/// Form category of an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    #[default]
    Base,
    Mega,
    Gmax,
    Regional,
    Other,
}

impl FormKind {
    /// Parse a dataset form label; unknown labels map to `Other`.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "base" | "" => FormKind::Base,
            "mega" => FormKind::Mega,
            "gmax" | "gigantamax" => FormKind::Gmax,
            "regional" => FormKind::Regional,
            _ => FormKind::Other,
        }
    }
}

/// Form details, including the base species a mega/gmax form belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub kind: FormKind,
    pub is_mega: bool,
    pub is_gmax: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mega_of_species_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gmax_of_species_key: Option<String>,
}

impl Form {
    /// Regional or other alternate form that is neither mega nor gmax.
    pub fn is_alternate(&self) -> bool {
        !self.is_mega && !self.is_gmax && self.kind != FormKind::Base
    }

    /// Species key excluded once this form is picked.
    pub fn special_form_base(&self) -> Option<&str> {
        let base = if self.is_mega {
            self.mega_of_species_key.as_deref()
        } else if self.is_gmax {
            self.gmax_of_species_key.as_deref()
        } else {
            None
        };
        base.filter(|key| !key.trim().is_empty())
    }
}

// ============================================================================
// Catalog Entry
// ============================================================================

/// One addressable catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub key: String,
    pub species_key: String,
    pub national_dex: u32,
    pub generation: u32,
    /// One or two lowercase type labels; the first is the primary type.
    pub types: Vec<String>,
    pub flags: Flags,
    pub evolution: Evolution,
    pub form: Form,
    pub tags: EntryTags,
    pub display_name: String,
    pub art_ref: String,
}

impl CatalogEntry {
    /// Create a base-form entry with the given key, species and types.
    pub fn new(key: &str, species_key: &str, types: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            species_key: species_key.to_string(),
            national_dex: 0,
            generation: 1,
            types: types.iter().map(|t| t.trim().to_lowercase()).collect(),
            flags: Flags::default(),
            evolution: Evolution::default(),
            form: Form::default(),
            tags: EntryTags::default(),
            display_name: key.to_string(),
            art_ref: String::new(),
        }
    }

    pub fn with_generation(mut self, generation: u32) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_display_name(mut self, name: &str) -> Self {
        self.display_name = name.to_string();
        self
    }

    pub fn with_art(mut self, art_ref: &str) -> Self {
        self.art_ref = art_ref.to_string();
        self
    }

    pub fn legendary(mut self) -> Self {
        self.flags.is_legendary = true;
        self
    }

    pub fn mythical(mut self) -> Self {
        self.flags.is_mythical = true;
        self
    }

    pub fn with_evolution(mut self, chain_id: u32, is_unevolved: bool, is_fully_evolved: bool) -> Self {
        self.evolution = Evolution {
            chain_id,
            is_unevolved,
            is_fully_evolved,
        };
        self
    }

    /// Mark as the mega form of `base_species`.
    pub fn mega_of(mut self, base_species: &str) -> Self {
        self.form = Form {
            kind: FormKind::Mega,
            is_mega: true,
            is_gmax: false,
            mega_of_species_key: Some(base_species.to_string()),
            gmax_of_species_key: None,
        };
        self
    }

    /// Mark as the gigantamax form of `base_species`.
    pub fn gmax_of(mut self, base_species: &str) -> Self {
        self.form = Form {
            kind: FormKind::Gmax,
            is_mega: false,
            is_gmax: true,
            mega_of_species_key: None,
            gmax_of_species_key: Some(base_species.to_string()),
        };
        self
    }

    pub fn with_form_kind(mut self, kind: FormKind) -> Self {
        self.form.kind = kind;
        self
    }

    pub fn with_tags(mut self, tier: TagTier, tags: &[&str]) -> Self {
        let set = TagSet::from_raw(tags);
        match tier {
            TagTier::Derived => self.tags.derived = set,
            TagTier::TextDerived => self.tags.text_derived = set,
            TagTier::Curated => self.tags.curated = set,
        }
        self
    }

    pub fn primary_type(&self) -> &str {
        self.types.first().map(String::as_str).unwrap_or_default()
    }

    pub fn secondary_type(&self) -> Option<&str> {
        self.types.get(1).map(String::as_str)
    }

    /// Case-insensitive type membership.
    pub fn has_type(&self, label: &str) -> bool {
        self.types.iter().any(|t| t.eq_ignore_ascii_case(label))
    }
}

// ============================================================================
// Synonym and Override Tables
// ============================================================================

/// Token → equivalent tokens. Not guaranteed symmetric.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymTable {
    entries: HashMap<String, Vec<String>>,
}

impl SynonymTable {
    /// Build a table, lowercasing keys and values.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut table = HashMap::new();
        for (key, values) in entries {
            let key = key.as_ref().trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            let values: Vec<String> = values
                .iter()
                .map(|v| v.as_ref().trim().to_lowercase())
                .filter(|v| !v.is_empty())
                .collect();
            table.entry(key).or_insert_with(Vec::new).extend(values);
        }
        Self { entries: table }
    }

    /// Synonyms of `token`; empty when the token has no entry of its own.
    pub fn lookup(&self, token: &str) -> &[String] {
        self.entries.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Entry key or species key → extra curated tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagOverrideTable {
    overrides: HashMap<String, Vec<String>>,
}

impl TagOverrideTable {
    pub fn new<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let overrides = overrides
            .into_iter()
            .map(|(key, tags)| {
                (
                    key.as_ref().trim().to_lowercase(),
                    tags.iter().map(|t| t.as_ref().to_string()).collect(),
                )
            })
            .collect();
        Self { overrides }
    }

    /// Overrides applying to `entry`.
    ///
    /// An entry-level override shadows the species-level one; the two are
    /// never merged.
    pub fn for_entry(&self, entry: &CatalogEntry) -> Option<&[String]> {
        self.overrides
            .get(&entry.key.to_lowercase())
            .or_else(|| self.overrides.get(&entry.species_key.to_lowercase()))
            .map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}
