//! Inventory models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Material, Organization};
use crate::types::Id;

/// How much of one material one organization currently holds.
///
/// The quantity is authoritative only on the backend; it changes when
/// transfers are accepted or processes complete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Inventory {
    pub id: Id,
    pub quantity: Decimal,
    pub organization: Organization,
    pub material: Material,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Inventory {
    pub fn has_stock(&self) -> bool {
        self.quantity > Decimal::ZERO
    }
}

/// Inventory rows belonging to one organization with positive stock
pub fn stock_of(inventory: &[Inventory], organization: Id) -> Vec<&Inventory> {
    inventory
        .iter()
        .filter(|row| row.organization.id == organization && row.has_stock())
        .collect()
}

/// Input for creating an inventory row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewInventory {
    pub organization: Id,
    pub material: Id,
    pub quantity: Decimal,
}

/// Partial update for an inventory row
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InventoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Decimal>,
}
