//! Test Fixtures
//!
//! A six-entry catalog covering every filter dimension: a legendary, a mega
//! form, an unevolved entry, and overlapping curated themes (spooky, dog,
//! cute) backed by synonyms and tag overrides.

use std::fs;

use serde_json::{json, Value};
use tempfile::TempDir;

use crate::core::catalog::loader::{POKEMON_FILE, SYNONYMS_FILE, TAG_OVERRIDES_FILE};
use crate::core::catalog::{
    Catalog, CatalogEntry, FormKind, SynonymTable, TagOverrideTable, TagTier,
};

// =============================================================================
// Entries
// =============================================================================

fn art(key: &str) -> String {
    format!("https://img.example/{key}.png")
}

fn entry(
    key: &str,
    species: &str,
    name: &str,
    generation: u32,
    types: &[&str],
    derived: &[&str],
    curated: &[&str],
) -> CatalogEntry {
    CatalogEntry::new(key, species, types)
        .with_generation(generation)
        .with_display_name(name)
        .with_art(&art(key))
        .with_tags(TagTier::Derived, derived)
        .with_tags(TagTier::Curated, curated)
}

/// Catalog entries in catalog order.
pub fn mini_entries() -> Vec<CatalogEntry> {
    vec![
        entry(
            "gengar", "gengar", "Gengar", 1,
            &["ghost", "poison"],
            &["type:ghost", "type:poison", "gen:1"],
            &["spooky", "ghost"],
        )
        .with_evolution(40, false, true)
        .with_tags(TagTier::TextDerived, &["shadow"]),
        entry(
            "houndoom", "houndoom", "Houndoom", 2,
            &["dark", "fire"],
            &["type:dark", "type:fire", "gen:2"],
            &["dog", "canine", "spooky"],
        )
        .with_evolution(98, false, true),
        entry(
            "mimikyu", "mimikyu", "Mimikyu", 7,
            &["ghost", "fairy"],
            &["type:ghost", "type:fairy", "gen:7"],
            &["spooky", "cute"],
        )
        .with_evolution(400, true, false),
        entry(
            "lucario", "lucario", "Lucario", 4,
            &["fighting", "steel"],
            &["type:fighting", "type:steel", "gen:4"],
            &["dog", "aura"],
        )
        .with_evolution(232, false, true),
        entry(
            "charizard-mega-x", "charizard", "Mega Charizard X", 1,
            &["fire", "dragon"],
            &["type:fire", "type:dragon", "gen:1"],
            &["dragon"],
        )
        .with_evolution(2, false, true)
        .mega_of("charizard"),
        entry(
            "mewtwo", "mewtwo", "Mewtwo", 1,
            &["psychic"],
            &["type:psychic", "gen:1"],
            &["psychic"],
        )
        .with_evolution(63, true, true)
        .legendary(),
    ]
}

fn synonym_pairs() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        ("spooky", vec!["ghost", "haunted", "eerie"]),
        ("dog", vec!["canine", "hound", "wolf"]),
        ("cute", vec!["adorable", "sweet"]),
    ]
}

fn override_pairs() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        ("houndoom", vec!["dog", "canine", "spooky"]),
        ("lucario", vec!["dog", "canine", "aura"]),
        ("mimikyu", vec!["spooky", "cute"]),
    ]
}

/// The mini catalog, built in memory.
pub fn mini_catalog() -> Catalog {
    Catalog::new(
        mini_entries(),
        SynonymTable::new(synonym_pairs()),
        TagOverrideTable::new(override_pairs()),
    )
    .expect("fixture catalog is valid")
}

// =============================================================================
// On-disk Dataset
// =============================================================================

fn sorted(tags: impl Iterator<Item = impl ToString>) -> Vec<String> {
    let mut tags: Vec<String> = tags.map(|t| t.to_string()).collect();
    tags.sort();
    tags
}

fn record(entry: &CatalogEntry) -> Value {
    let form_type = match entry.form.kind {
        FormKind::Base => "base",
        FormKind::Mega => "mega",
        FormKind::Gmax => "gmax",
        FormKind::Regional => "regional",
        FormKind::Other => "other",
    };

    json!({
        "key": entry.key,
        "dex": { "national": entry.national_dex, "generation": entry.generation },
        "names": { "default": entry.display_name },
        "species": { "key": entry.species_key, "id": entry.national_dex },
        "form": {
            "type": form_type,
            "isRegional": false,
            "isMega": entry.form.is_mega,
            "megaOfSpeciesKey": entry.form.mega_of_species_key,
            "isGmax": entry.form.is_gmax,
            "gmaxOfSpeciesKey": entry.form.gmax_of_species_key,
        },
        "typing": {
            "types": entry.types,
            "primary": entry.primary_type(),
            "secondary": entry.secondary_type(),
        },
        "flags": entry.flags,
        "evolution": entry.evolution,
        "art": { "preferred": entry.art_ref, "variants": {} },
        "tags": {
            // Namespaced on disk, normalized by the loader
            "derived": sorted(entry.tags.derived.iter().map(|t| format!("tag:{t}"))),
            "textDerived": sorted(entry.tags.text_derived.iter()),
            "curated": sorted(entry.tags.curated.iter()),
        },
        "search": { "aliases": [] },
    })
}

fn table(pairs: Vec<(&'static str, Vec<&'static str>)>) -> Value {
    pairs
        .into_iter()
        .map(|(key, values)| (key.to_string(), json!(values)))
        .collect::<serde_json::Map<String, Value>>()
        .into()
}

/// Write the mini catalog as the three JSON data files into a fresh
/// temporary directory. Keep the returned `TempDir` alive while loading.
pub fn write_data_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp directory");

    let pokemon = json!({
        "version": 1,
        "generatedAt": "2024-01-01T00:00:00Z",
        "pokemon": mini_entries().iter().map(record).collect::<Vec<_>>(),
    });
    let synonyms = json!({ "version": 1, "synonyms": table(synonym_pairs()) });
    let overrides = json!({ "version": 1, "overrides": table(override_pairs()) });

    for (file, value) in [
        (POKEMON_FILE, pokemon),
        (SYNONYMS_FILE, synonyms),
        (TAG_OVERRIDES_FILE, overrides),
    ] {
        let body = serde_json::to_string_pretty(&value).expect("fixture serializes");
        fs::write(dir.path().join(file), body).expect("Failed to write fixture file");
    }

    dir
}
