//! Generic CRUD endpoints
//!
//! Each backend resource declares its path, its cache kind and the payload
//! types it accepts; `Endpoint` turns that into list/get/create/update/delete
//! calls that read from and invalidate the query cache.

use std::marker::PhantomData;

use reqwest::Url;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use shared::{Filterable, Id, ListFilter, ListResponse};
use tracing::{debug, info};

use super::query::ListQuery;
use crate::cache::{ResourceKind, Tag};
use crate::error::{ClientError, ClientResult};
use crate::http::{ApiClient, Auth};

/// A REST resource exposed under `/api/v1/`
pub trait Resource {
    const KIND: ResourceKind;
    /// Collection path relative to the API root, with trailing slash
    const PATH: &'static str;
    /// Whether the backend applies `search`/`status` itself
    const SERVER_FILTER: bool = false;

    type Item: DeserializeOwned + Serialize + Filterable + Clone;
    type Create: Serialize;
    type Update: Serialize;

    /// Other tags made stale by any mutation of this resource
    fn dependents() -> &'static [Tag] {
        &[]
    }
}

/// Record as stored by the backend after a create or update
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Saved {
    pub id: Id,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Typed endpoint for resource `R`
pub struct Endpoint<'a, R> {
    client: &'a ApiClient,
    _resource: PhantomData<R>,
}

impl ApiClient {
    pub fn resource<R: Resource>(&self) -> Endpoint<'_, R> {
        Endpoint {
            client: self,
            _resource: PhantomData,
        }
    }
}

impl<'a, R: Resource> Endpoint<'a, R> {
    fn item_path(id: Id) -> String {
        format!("{}{}/", R::PATH, id)
    }

    /// Cache key for a list query: the request URL with escaped parameters
    fn list_key(&self, pairs: &[(&'static str, String)]) -> ClientResult<String> {
        let base = format!("{}{}", self.client.base_url(), R::PATH);
        let url = Url::parse_with_params(&base, pairs)
            .map_err(|err| ClientError::Configuration(format!("invalid url {}: {}", base, err)))?;
        Ok(url.into())
    }

    /// Tags made stale by a mutation
    pub fn stale_tags(id: Option<Id>) -> Vec<Tag> {
        let mut tags = vec![Tag::List(R::KIND)];
        if let Some(id) = id {
            tags.push(Tag::Item(R::KIND, id));
        }
        tags.extend_from_slice(R::dependents());
        tags
    }

    /// List, served from cache until invalidated
    pub async fn list(&self, query: &ListQuery) -> ClientResult<Vec<R::Item>> {
        let pairs = query.to_pairs();
        let key = self.list_key(&pairs)?;
        if let Some(items) = self.client.cache().get(&key) {
            debug!("Cache hit for {}", key);
            return Ok(items);
        }
        self.fetch_list(&pairs, key).await
    }

    /// List bypassing the cache; the result still refreshes it
    pub async fn list_fresh(&self, query: &ListQuery) -> ClientResult<Vec<R::Item>> {
        let pairs = query.to_pairs();
        let key = self.list_key(&pairs)?;
        self.fetch_list(&pairs, key).await
    }

    async fn fetch_list(
        &self,
        pairs: &[(&'static str, String)],
        key: String,
    ) -> ClientResult<Vec<R::Item>> {
        let response: ListResponse<R::Item> = self.client.get(R::PATH, pairs).await?;
        let items = response.into_items();
        self.client
            .cache()
            .put(key, vec![Tag::List(R::KIND)], &items);
        Ok(items)
    }

    pub async fn get(&self, id: Id) -> ClientResult<R::Item> {
        let path = Self::item_path(id);
        if let Some(item) = self.client.cache().get(&path) {
            debug!("Cache hit for {}", path);
            return Ok(item);
        }
        let item: R::Item = self.client.get(&path, &[]).await?;
        self.client
            .cache()
            .put(path, vec![Tag::Item(R::KIND, id)], &item);
        Ok(item)
    }

    pub async fn create(&self, payload: &R::Create) -> ClientResult<Saved> {
        let saved: Saved = self.client.post(R::PATH, payload, Auth::Bearer).await?;
        info!("Created {}{}", R::PATH, saved.id);
        self.client.cache().invalidate(&Self::stale_tags(None));
        Ok(saved)
    }

    /// PATCH `patch` onto item `id`; the id travels in the path only
    pub async fn update(&self, id: Id, patch: &R::Update) -> ClientResult<Saved> {
        let saved: Saved = self.client.patch(&Self::item_path(id), patch).await?;
        info!("Updated {}{}", R::PATH, id);
        self.client.cache().invalidate(&Self::stale_tags(Some(id)));
        Ok(saved)
    }

    pub async fn delete(&self, id: Id) -> ClientResult<()> {
        self.client.delete(&Self::item_path(id)).await?;
        info!("Deleted {}{}", R::PATH, id);
        self.client.cache().invalidate(&Self::stale_tags(Some(id)));
        Ok(())
    }

    /// Apply a list page filter, server-side where the backend supports it
    pub async fn search(&self, filter: &ListFilter) -> ClientResult<Vec<R::Item>> {
        if R::SERVER_FILTER {
            let items = self.list(&ListQuery::from_filter(filter)).await?;
            // The backend only knows the lower date bound
            let range_only = ListFilter::new().range(filter.range);
            return Ok(items
                .into_iter()
                .filter(|item| range_only.matches(item))
                .collect());
        }

        let items = self.list(&ListQuery::default()).await?;
        Ok(filter.apply(&items).into_iter().cloned().collect())
    }
}
