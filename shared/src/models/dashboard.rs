//! Dashboard summary models

use serde::{Deserialize, Serialize};

/// Counters shown on the dashboard landing page
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    #[serde(default)]
    pub organizations: u64,
    #[serde(default)]
    pub materials: u64,
    #[serde(default)]
    pub pending_transactions: u64,
    #[serde(default)]
    pub active_processes: u64,
    /// Counters the backend adds beyond the known ones
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
