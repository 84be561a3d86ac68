//! Material processing models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Inventory, Material, Organization};
use crate::types::Id;

/// A conversion of consumed inventory into new material outputs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Process {
    pub id: Id,
    pub organization: Organization,
    pub inputs: Vec<ProcessInput>,
    pub outputs: Vec<ProcessOutput>,
    pub status: ProcessStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// Inventory consumed by a process
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessInput {
    pub id: Id,
    pub inventory: Inventory,
    pub quantity: Decimal,
}

/// Material produced by a process
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessOutput {
    pub id: Id,
    pub material: Material,
    pub quantity: Decimal,
}

/// Process lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ProcessStatus {
    #[serde(rename = "in process", alias = "in_process")]
    InProcess,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl ProcessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessStatus::InProcess => "in process",
            ProcessStatus::Completed => "completed",
            ProcessStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessStatus::InProcess => write!(f, "In Process"),
            ProcessStatus::Completed => write!(f, "Completed"),
            ProcessStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl Process {
    pub fn total_input(&self) -> Decimal {
        self.inputs.iter().fold(Decimal::ZERO, |total, input| total.saturating_add(input.quantity))
    }

    pub fn total_output(&self) -> Decimal {
        self.outputs.iter().fold(Decimal::ZERO, |total, output| total.saturating_add(output.quantity))
    }
}

/// Inventory line consumed by a new process
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProcessInput {
    pub inventory: Id,
    pub quantity: Decimal,
}

/// Material line declared by a new process
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProcessOutput {
    pub material: Id,
    pub quantity: Decimal,
}

/// Input for starting a process
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProcess {
    pub organization: Id,
    pub inputs: Vec<NewProcessInput>,
    pub outputs: Vec<NewProcessOutput>,
}

/// Partial update for a process
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProcessStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}
