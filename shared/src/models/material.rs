//! Material catalog models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::Id;

/// A catalog entry for a tracked substance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Material {
    pub id: Id,
    pub name: String,
    pub unit: Unit,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Units materials are measured in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Grams
    G,
    /// Pieces
    Pcs,
    /// Carats
    Ct,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::G => "g",
            Unit::Pcs => "pcs",
            Unit::Ct => "ct",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "g" => Ok(Unit::G),
            "pcs" => Ok(Unit::Pcs),
            "ct" => Ok(Unit::Ct),
            other => Err(format!("unknown unit: {}", other)),
        }
    }
}

/// Input for creating a material
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewMaterial {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub unit: Unit,
}

/// Partial update for a material
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
}
