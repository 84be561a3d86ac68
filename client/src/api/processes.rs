//! Material processing runs

use chrono::Utc;
use shared::{Id, NewProcess, Process, ProcessStatus, ProcessUpdate};
use tracing::info;

use super::resource::{Resource, Saved};
use crate::cache::{ResourceKind, Tag};
use crate::error::ClientResult;
use crate::http::ApiClient;

pub struct Processes;

impl Resource for Processes {
    const KIND: ResourceKind = ResourceKind::Process;
    const PATH: &'static str = "processes/";
    const SERVER_FILTER: bool = true;

    type Item = Process;
    type Create = NewProcess;
    type Update = ProcessUpdate;

    fn dependents() -> &'static [Tag] {
        &[
            Tag::List(ResourceKind::Inventory),
            Tag::All(ResourceKind::DashboardStats),
        ]
    }
}

impl ApiClient {
    /// Mark a running process completed as of now
    pub async fn complete_process(&self, id: Id) -> ClientResult<Saved> {
        let saved = self
            .resource::<Processes>()
            .update(
                id,
                &ProcessUpdate {
                    status: Some(ProcessStatus::Completed),
                    finished_at: Some(Utc::now()),
                },
            )
            .await?;
        info!("Process {} completed", id);
        Ok(saved)
    }
}
