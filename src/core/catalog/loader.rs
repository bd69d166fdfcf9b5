//! Catalog loader.
//!
//! Reads the three JSON data files from a data directory and converts the
//! dataset records into normalized [`CatalogEntry`] values.
//!
//! ```text
//! data/
//!   pokemon.json        {version, generatedAt, pokemon: [...]}
//!   synonyms.json       {version, synonyms: {token: [tokens]}}
//!   tag-overrides.json  {version, overrides: {key: [tags]}}
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use super::error::{CatalogError, Result};
use super::types::{
    CatalogEntry, EntryTags, Evolution, Flags, Form, FormKind, SynonymTable, TagOverrideTable,
    TagSet,
};
use super::{Catalog, CatalogView};

pub const POKEMON_FILE: &str = "pokemon.json";
pub const SYNONYMS_FILE: &str = "synonyms.json";
pub const TAG_OVERRIDES_FILE: &str = "tag-overrides.json";

// ============================================================================
// Dataset Records
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PokemonRoot {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    generated_at: Option<DateTime<Utc>>,
    pokemon: Vec<PokemonRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PokemonRecord {
    key: String,
    dex: DexRecord,
    names: NamesRecord,
    species: SpeciesRecord,
    #[serde(default)]
    form: FormRecord,
    typing: TypingRecord,
    #[serde(default)]
    flags: Flags,
    evolution: Evolution,
    #[serde(default)]
    art: ArtRecord,
    #[serde(default)]
    tags: TagsRecord,
}

#[derive(Debug, Deserialize)]
struct DexRecord {
    #[serde(default)]
    national: u32,
    generation: u32,
}

#[derive(Debug, Deserialize)]
struct NamesRecord {
    default: String,
}

#[derive(Debug, Deserialize)]
struct SpeciesRecord {
    key: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormRecord {
    #[serde(default, rename = "type")]
    form_type: String,
    #[serde(default)]
    is_mega: bool,
    #[serde(default)]
    mega_of_species_key: Option<String>,
    #[serde(default)]
    is_gmax: bool,
    #[serde(default)]
    gmax_of_species_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TypingRecord {
    types: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ArtRecord {
    #[serde(default)]
    preferred: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TagsRecord {
    #[serde(default)]
    derived: Vec<String>,
    #[serde(default)]
    text_derived: Vec<String>,
    #[serde(default)]
    curated: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SynonymsRoot {
    #[serde(default)]
    version: u32,
    synonyms: HashMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct TagOverridesRoot {
    #[serde(default)]
    version: u32,
    overrides: HashMap<String, Vec<String>>,
}

impl From<PokemonRecord> for CatalogEntry {
    fn from(record: PokemonRecord) -> Self {
        Self {
            key: record.key,
            species_key: record.species.key,
            national_dex: record.dex.national,
            generation: record.dex.generation,
            types: record
                .typing
                .types
                .iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
            flags: record.flags,
            evolution: record.evolution,
            form: Form {
                kind: FormKind::parse(&record.form.form_type),
                is_mega: record.form.is_mega,
                is_gmax: record.form.is_gmax,
                mega_of_species_key: record.form.mega_of_species_key,
                gmax_of_species_key: record.form.gmax_of_species_key,
            },
            tags: EntryTags {
                derived: TagSet::from_raw(&record.tags.derived),
                text_derived: TagSet::from_raw(&record.tags.text_derived),
                curated: TagSet::from_raw(&record.tags.curated),
            },
            display_name: record.names.default,
            art_ref: record.art.preferred,
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(CatalogError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate the catalog from `data_dir`.
///
/// Fails on the first missing, unreadable, or malformed file; there is no
/// partial fallback.
pub fn load_catalog(data_dir: &Path) -> Result<Catalog> {
    let root: PokemonRoot = read_json(&data_dir.join(POKEMON_FILE))?;
    let synonyms: SynonymsRoot = read_json(&data_dir.join(SYNONYMS_FILE))?;
    let overrides: TagOverridesRoot = read_json(&data_dir.join(TAG_OVERRIDES_FILE))?;

    debug!(
        pokemon_version = root.version,
        synonyms_version = synonyms.version,
        overrides_version = overrides.version,
        generated_at = ?root.generated_at,
        "Parsed catalog data files"
    );

    let entries: Vec<CatalogEntry> = root.pokemon.into_iter().map(CatalogEntry::from).collect();
    let catalog = Catalog::new(
        entries,
        SynonymTable::new(synonyms.synonyms),
        TagOverrideTable::new(overrides.overrides),
    )?;

    info!(
        entries = catalog.len(),
        synonyms = catalog.synonyms().len(),
        overrides = catalog.tag_overrides().len(),
        "Loaded catalog from {}",
        data_dir.display()
    );

    Ok(catalog)
}
