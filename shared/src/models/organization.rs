//! Organization (workshop) models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::Id;

/// A business unit holding inventory: the central bank vault or a workshop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Organization {
    pub id: Id,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: OrganizationType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Kinds of organizations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationType {
    Bank,
    GoldProcessing,
    SilverProcessing,
    JewelryMaking,
    Cleaning,
    Repair,
}

impl OrganizationType {
    pub const ALL: [OrganizationType; 6] = [
        OrganizationType::Bank,
        OrganizationType::GoldProcessing,
        OrganizationType::SilverProcessing,
        OrganizationType::JewelryMaking,
        OrganizationType::Cleaning,
        OrganizationType::Repair,
    ];

    /// Wire value, also used as the status filter key
    pub fn as_str(&self) -> &'static str {
        match self {
            OrganizationType::Bank => "bank",
            OrganizationType::GoldProcessing => "gold_processing",
            OrganizationType::SilverProcessing => "silver_processing",
            OrganizationType::JewelryMaking => "jewelry_making",
            OrganizationType::Cleaning => "cleaning",
            OrganizationType::Repair => "repair",
        }
    }
}

impl std::fmt::Display for OrganizationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrganizationType::Bank => write!(f, "Bank"),
            OrganizationType::GoldProcessing => write!(f, "Gold Processing"),
            OrganizationType::SilverProcessing => write!(f, "Silver Processing"),
            OrganizationType::JewelryMaking => write!(f, "Jewelry Making"),
            OrganizationType::Cleaning => write!(f, "Cleaning"),
            OrganizationType::Repair => write!(f, "Repair"),
        }
    }
}

impl std::str::FromStr for OrganizationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown organization type: {}", s))
    }
}

/// Input for creating an organization
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewOrganization {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: OrganizationType,
}

/// Partial update for an organization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<OrganizationType>,
}
