//! Dashboard summary numbers

use shared::DashboardStats;
use tracing::debug;

use crate::cache::{ResourceKind, Tag};
use crate::error::ClientResult;
use crate::http::ApiClient;

const STATS_PATH: &str = "dashboard/stats/";

impl ApiClient {
    pub async fn dashboard_stats(&self) -> ClientResult<DashboardStats> {
        if let Some(stats) = self.cache().get(STATS_PATH) {
            debug!("Cache hit for {}", STATS_PATH);
            return Ok(stats);
        }
        let stats: DashboardStats = self.get(STATS_PATH, &[]).await?;
        self.cache().put(
            STATS_PATH,
            vec![Tag::All(ResourceKind::DashboardStats)],
            &stats,
        );
        Ok(stats)
    }
}
