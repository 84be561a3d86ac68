//! Transfers between organizations

use shared::{Id, NewTransaction, Transaction, TransactionStatus, TransactionUpdate};
use tracing::info;

use super::resource::{Resource, Saved};
use crate::cache::{ResourceKind, Tag};
use crate::error::ClientResult;
use crate::http::ApiClient;

pub struct Transactions;

impl Resource for Transactions {
    const KIND: ResourceKind = ResourceKind::Transaction;
    const PATH: &'static str = "transactions/";
    const SERVER_FILTER: bool = true;

    type Item = Transaction;
    type Create = NewTransaction;
    type Update = TransactionUpdate;

    // Accepting a transfer moves stock on the backend
    fn dependents() -> &'static [Tag] {
        &[
            Tag::List(ResourceKind::Inventory),
            Tag::All(ResourceKind::DashboardStats),
        ]
    }
}

impl ApiClient {
    async fn decide_transfer(&self, id: Id, status: TransactionStatus) -> ClientResult<Saved> {
        let saved = self
            .resource::<Transactions>()
            .update(
                id,
                &TransactionUpdate {
                    status: Some(status),
                },
            )
            .await?;
        info!("Transfer {} marked {}", id, status.as_str());
        Ok(saved)
    }

    pub async fn accept_transfer(&self, id: Id) -> ClientResult<Saved> {
        self.decide_transfer(id, TransactionStatus::Accepted).await
    }

    pub async fn reject_transfer(&self, id: Id) -> ClientResult<Saved> {
        self.decide_transfer(id, TransactionStatus::Rejected).await
    }
}
