//! Activity history combining transfers and processes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::filter::Filterable;
use crate::models::{Process, Transaction};
use crate::types::Id;

/// Kind of activity shown on the history page
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HistoryKind {
    Transfer,
    Process,
}

/// One row of the history page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub id: Id,
    pub kind: HistoryKind,
    /// Organization that initiated the activity
    pub actor: String,
    pub description: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&Transaction> for HistoryEntry {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id,
            kind: HistoryKind::Transfer,
            actor: tx.sender.name.clone(),
            description: format!(
                "Transfer to {} ({} items, {} total)",
                tx.receiver.name,
                tx.item_count(),
                tx.total_quantity()
            ),
            status: tx.status.as_str().to_string(),
            timestamp: tx.created_at,
        }
    }
}

impl From<&Process> for HistoryEntry {
    fn from(process: &Process) -> Self {
        Self {
            id: process.id,
            kind: HistoryKind::Process,
            actor: process.organization.name.clone(),
            description: format!(
                "Process: {} in, {} out",
                process.total_input(),
                process.total_output()
            ),
            status: process.status.as_str().to_string(),
            timestamp: process.finished_at.unwrap_or(process.started_at),
        }
    }
}

/// Merge transfers and processes, newest first
pub fn build_history(transactions: &[Transaction], processes: &[Process]) -> Vec<HistoryEntry> {
    let mut entries: Vec<HistoryEntry> = transactions
        .iter()
        .map(HistoryEntry::from)
        .chain(processes.iter().map(HistoryEntry::from))
        .collect();
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    entries
}

impl Filterable for HistoryEntry {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.actor.clone(),
            self.description.clone(),
        ]
    }

    fn status_key(&self) -> Option<&str> {
        Some(&self.status)
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        Some(self.timestamp)
    }
}
