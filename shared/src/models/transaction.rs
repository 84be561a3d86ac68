//! Transfer (transaction) models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Inventory, Organization, Unit};
use crate::types::Id;

/// A proposed movement of inventory from one organization to another
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Id,
    pub items: Vec<TransactionItem>,
    pub sender: Organization,
    pub receiver: Organization,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One inventory line of a transfer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionItem {
    pub id: Id,
    pub quantity: Decimal,
    pub inventory: Inventory,
    pub transaction: Id,
}

/// Transfer lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Accepted,
    Rejected,
    Cancelled,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Accepted => "accepted",
            TransactionStatus::Rejected => "rejected",
            TransactionStatus::Cancelled => "cancelled",
        }
    }

    /// Only pending transfers await the receiver's decision
    pub fn is_open(&self) -> bool {
        matches!(self, TransactionStatus::Pending)
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "Pending"),
            TransactionStatus::Accepted => write!(f, "Accepted"),
            TransactionStatus::Rejected => write!(f, "Rejected"),
            TransactionStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Quantity of one material moved by a transfer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialTotal {
    pub material: String,
    pub unit: Unit,
    pub quantity: Decimal,
}

impl Transaction {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn total_quantity(&self) -> Decimal {
        self.items.iter().fold(Decimal::ZERO, |total, item| total.saturating_add(item.quantity))
    }

    /// Totals grouped by material, in order of first appearance
    pub fn totals_by_material(&self) -> Vec<MaterialTotal> {
        let mut totals: Vec<MaterialTotal> = Vec::new();
        for item in &self.items {
            let material = &item.inventory.material;
            match totals.iter_mut().find(|t| t.material == material.name) {
                Some(total) => total.quantity = total.quantity.saturating_add(item.quantity),
                None => totals.push(MaterialTotal {
                    material: material.name.clone(),
                    unit: material.unit,
                    quantity: item.quantity,
                }),
            }
        }
        totals
    }
}

/// Input line for creating a transfer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTransactionItem {
    pub inventory: Id,
    pub quantity: Decimal,
}

/// Input for creating a transfer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTransaction {
    pub sender: Id,
    pub receiver: Id,
    pub items: Vec<NewTransactionItem>,
}

/// Partial update for a transfer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
}
