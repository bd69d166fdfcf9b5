//! Team query: the validated structural constraints of a generation request.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Smallest team the selector will aim for.
pub const MIN_TEAM_SIZE: usize = 1;
/// Largest team the selector will aim for.
pub const MAX_TEAM_SIZE: usize = 6;
/// Team size used when a request does not specify one.
pub const DEFAULT_TEAM_SIZE: usize = 6;

// ============================================================================
// Evolution Stage
// ============================================================================

/// Evolution stage filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EvolutionStage {
    #[default]
    Any,
    FullyEvolved,
    Unevolved,
}

impl FromStr for EvolutionStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "" | "any" => Ok(EvolutionStage::Any),
            "fullyevolved" => Ok(EvolutionStage::FullyEvolved),
            "unevolved" => Ok(EvolutionStage::Unevolved),
            other => Err(format!(
                "unknown evolution stage '{other}' (expected any, fully-evolved, unevolved)"
            )),
        }
    }
}

impl fmt::Display for EvolutionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EvolutionStage::Any => "any",
            EvolutionStage::FullyEvolved => "fullyEvolved",
            EvolutionStage::Unevolved => "unevolved",
        };
        f.write_str(label)
    }
}

// ============================================================================
// Element Types
// ============================================================================

/// The closed set of elemental types a request may constrain on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl ElementType {
    pub const ALL: [ElementType; 18] = [
        ElementType::Normal,
        ElementType::Fire,
        ElementType::Water,
        ElementType::Grass,
        ElementType::Electric,
        ElementType::Ice,
        ElementType::Fighting,
        ElementType::Poison,
        ElementType::Ground,
        ElementType::Flying,
        ElementType::Psychic,
        ElementType::Bug,
        ElementType::Rock,
        ElementType::Ghost,
        ElementType::Dragon,
        ElementType::Dark,
        ElementType::Steel,
        ElementType::Fairy,
    ];

    /// Lowercase catalog label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Normal => "normal",
            ElementType::Fire => "fire",
            ElementType::Water => "water",
            ElementType::Grass => "grass",
            ElementType::Electric => "electric",
            ElementType::Ice => "ice",
            ElementType::Fighting => "fighting",
            ElementType::Poison => "poison",
            ElementType::Ground => "ground",
            ElementType::Flying => "flying",
            ElementType::Psychic => "psychic",
            ElementType::Bug => "bug",
            ElementType::Rock => "rock",
            ElementType::Ghost => "ghost",
            ElementType::Dragon => "dragon",
            ElementType::Dark => "dark",
            ElementType::Steel => "steel",
            ElementType::Fairy => "fairy",
        }
    }
}

impl FromStr for ElementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        ElementType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| format!("unknown type '{}'", s.trim()))
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Team Query
// ============================================================================

/// Already-validated generation request.
///
/// Type labels are compared case-insensitively; the builder methods store
/// them lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamQuery {
    pub theme_text: String,
    pub team_size: usize,
    pub evolution_stage: EvolutionStage,
    /// Allowed generations; empty means unrestricted.
    pub generations: BTreeSet<u32>,
    pub exclude_legendaries: bool,
    /// Regional and other alternate forms.
    pub allow_forms: bool,
    pub allow_mega: bool,
    pub allow_gmax: bool,
    pub allow_same_species_multiple: bool,
    pub allow_same_form_duplicates: bool,
    pub include_types: BTreeSet<String>,
    pub exclude_types: BTreeSet<String>,
}

impl Default for TeamQuery {
    fn default() -> Self {
        Self {
            theme_text: String::new(),
            team_size: DEFAULT_TEAM_SIZE,
            evolution_stage: EvolutionStage::Any,
            generations: BTreeSet::new(),
            exclude_legendaries: false,
            allow_forms: false,
            allow_mega: false,
            allow_gmax: false,
            allow_same_species_multiple: false,
            allow_same_form_duplicates: false,
            include_types: BTreeSet::new(),
            exclude_types: BTreeSet::new(),
        }
    }
}

impl TeamQuery {
    pub fn new(theme_text: &str) -> Self {
        Self {
            theme_text: theme_text.to_string(),
            ..Self::default()
        }
    }

    /// Requested size clamped to `1..=6`.
    pub fn clamped_team_size(&self) -> usize {
        self.team_size.clamp(MIN_TEAM_SIZE, MAX_TEAM_SIZE)
    }

    pub fn with_team_size(mut self, size: usize) -> Self {
        self.team_size = size;
        self
    }

    pub fn with_evolution_stage(mut self, stage: EvolutionStage) -> Self {
        self.evolution_stage = stage;
        self
    }

    pub fn with_generations<I: IntoIterator<Item = u32>>(mut self, generations: I) -> Self {
        self.generations = generations.into_iter().collect();
        self
    }

    pub fn exclude_legendaries(mut self, exclude: bool) -> Self {
        self.exclude_legendaries = exclude;
        self
    }

    pub fn allow_forms(mut self, allow: bool) -> Self {
        self.allow_forms = allow;
        self
    }

    pub fn allow_mega(mut self, allow: bool) -> Self {
        self.allow_mega = allow;
        self
    }

    pub fn allow_gmax(mut self, allow: bool) -> Self {
        self.allow_gmax = allow;
        self
    }

    pub fn allow_same_species_multiple(mut self, allow: bool) -> Self {
        self.allow_same_species_multiple = allow;
        self
    }

    pub fn allow_same_form_duplicates(mut self, allow: bool) -> Self {
        self.allow_same_form_duplicates = allow;
        self
    }

    pub fn include_type(mut self, label: &str) -> Self {
        self.include_types.insert(label.trim().to_lowercase());
        self
    }

    pub fn exclude_type(mut self, label: &str) -> Self {
        self.exclude_types.insert(label.trim().to_lowercase());
        self
    }
}
