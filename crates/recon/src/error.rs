use thiserror::Error;

use crate::model::Side;

#[derive(Debug, Error)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// Config validation error (empty identity column, no aliases, etc.).
    #[error("config validation error: {0}")]
    ConfigValidation(String),

    /// The identity column is absent from one or both input tables.
    #[error("{} must contain column '{column}'", describe_sides(.sides))]
    MissingIdentityColumn { sides: Vec<MissingSide>, column: String },
}

/// One input table that failed validation, with its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingSide {
    pub side: Side,
    pub label: String,
}

fn describe_sides(sides: &[MissingSide]) -> String {
    let labels: Vec<String> = sides
        .iter()
        .map(|s| format!("{} ({})", s.label, s.side))
        .collect();
    labels.join(" and ")
}

impl ReconError {
    /// Sides lacking the identity column, if this is a validation error.
    pub fn missing_sides(&self) -> Option<Vec<Side>> {
        match self {
            Self::MissingIdentityColumn { sides, .. } => Some(sides.iter().map(|s| s.side).collect()),
            _ => None,
        }
    }
}
