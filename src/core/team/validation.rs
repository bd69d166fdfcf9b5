//! Request Validation
//!
//! Field checks on an incoming generation request before it becomes a
//! [`TeamQuery`]. Every failing field is reported, not just the first.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::query::{ElementType, EvolutionStage, TeamQuery, DEFAULT_TEAM_SIZE, MAX_TEAM_SIZE, MIN_TEAM_SIZE};

/// Longest accepted theme text, in characters.
pub const MAX_THEME_LENGTH: usize = 200;

pub const THEME_TEXT_REQUIRED: &str = "Theme text is required.";
pub const THEME_TEXT_TOO_LONG: &str = "Theme text must be 200 characters or less.";
pub const TEAM_SIZE_INVALID: &str = "Team size must be between 1 and 6.";
pub const TYPE_CONSTRAINTS_OVERLAP: &str = "Include and exclude types overlap.";

// ============================================================================
// Error Types
// ============================================================================

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid request: {}", summarize(.0))]
pub struct ValidationError(pub Vec<FieldError>);

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;

// ============================================================================
// Request
// ============================================================================

/// Generation request as received from a caller.
///
/// Absent booleans mean `false`, an absent stage means any stage, and an
/// absent team size means a full team. Unknown type names fail to
/// deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTeamRequest {
    #[serde(default)]
    pub theme_text: String,
    #[serde(default)]
    pub team_size: Option<i64>,
    #[serde(default)]
    pub evolution_stage: Option<EvolutionStage>,
    #[serde(default)]
    pub generations: Option<Vec<u32>>,
    #[serde(default)]
    pub exclude_legendaries: Option<bool>,
    #[serde(default)]
    pub allow_forms: Option<bool>,
    #[serde(default)]
    pub allow_mega: Option<bool>,
    #[serde(default)]
    pub allow_gmax: Option<bool>,
    #[serde(default)]
    pub allow_same_species_multiple: Option<bool>,
    #[serde(default)]
    pub allow_same_form_duplicates: Option<bool>,
    #[serde(default)]
    pub include_types: Option<Vec<ElementType>>,
    #[serde(default)]
    pub exclude_types: Option<Vec<ElementType>>,
}

impl GenerateTeamRequest {
    pub fn new(theme_text: &str) -> Self {
        Self {
            theme_text: theme_text.to_string(),
            ..Self::default()
        }
    }

    /// Collect every field error.
    pub fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.theme_text.trim().is_empty() {
            errors.push(FieldError::new("themeText", THEME_TEXT_REQUIRED));
        } else if self.theme_text.chars().count() > MAX_THEME_LENGTH {
            errors.push(FieldError::new("themeText", THEME_TEXT_TOO_LONG));
        }

        let size = self.team_size.unwrap_or(DEFAULT_TEAM_SIZE as i64);
        if size < MIN_TEAM_SIZE as i64 || size > MAX_TEAM_SIZE as i64 {
            errors.push(FieldError::new("teamSize", TEAM_SIZE_INVALID));
        }

        let include: BTreeSet<ElementType> = self.include_types.iter().flatten().copied().collect();
        let exclude: BTreeSet<ElementType> = self.exclude_types.iter().flatten().copied().collect();
        if !include.is_disjoint(&exclude) {
            errors.push(FieldError::new("includeTypes", TYPE_CONSTRAINTS_OVERLAP));
        }

        errors
    }

    pub fn validate(&self) -> Result<()> {
        let errors = self.field_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError(errors))
        }
    }

    /// Validate and convert into a core query.
    pub fn into_query(self) -> Result<TeamQuery> {
        self.validate()?;

        let labels = |types: Option<Vec<ElementType>>| -> BTreeSet<String> {
            types
                .unwrap_or_default()
                .into_iter()
                .map(|t| t.as_str().to_string())
                .collect()
        };

        Ok(TeamQuery {
            team_size: self
                .team_size
                .map_or(DEFAULT_TEAM_SIZE, |size| size.clamp(MIN_TEAM_SIZE as i64, MAX_TEAM_SIZE as i64) as usize),
            evolution_stage: self.evolution_stage.unwrap_or_default(),
            generations: self.generations.unwrap_or_default().into_iter().collect(),
            exclude_legendaries: self.exclude_legendaries.unwrap_or(false),
            allow_forms: self.allow_forms.unwrap_or(false),
            allow_mega: self.allow_mega.unwrap_or(false),
            allow_gmax: self.allow_gmax.unwrap_or(false),
            allow_same_species_multiple: self.allow_same_species_multiple.unwrap_or(false),
            allow_same_form_duplicates: self.allow_same_form_duplicates.unwrap_or(false),
            include_types: labels(self.include_types),
            exclude_types: labels(self.exclude_types),
            theme_text: self.theme_text,
        })
    }
}
