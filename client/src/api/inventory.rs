//! Inventory rows

use shared::{Id, Inventory, InventoryUpdate, NewInventory};

use super::query::ListQuery;
use super::resource::Resource;
use crate::cache::ResourceKind;
use crate::error::ClientResult;
use crate::http::ApiClient;

pub struct InventoryItems;

impl Resource for InventoryItems {
    const KIND: ResourceKind = ResourceKind::Inventory;
    const PATH: &'static str = "inventory/";
    const SERVER_FILTER: bool = true;

    type Item = Inventory;
    type Create = NewInventory;
    type Update = InventoryUpdate;
}

impl ApiClient {
    /// Inventory held by one organization, as the backend reports it
    pub async fn inventory_of(&self, organization: Id) -> ClientResult<Vec<Inventory>> {
        self.resource::<InventoryItems>()
            .list(&ListQuery::new().organization(organization))
            .await
    }
}
