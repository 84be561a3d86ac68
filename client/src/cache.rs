//! Tag-based query cache
//!
//! Query results are cached under their request key together with the tags
//! they depend on. A mutation invalidates tags: covered entries are dropped and
//! every subscriber watching one of the tags is notified so it can re-fetch.

use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use shared::Id;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::debug;

const EVENT_CAPACITY: usize = 64;

/// Resource families cached by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Organization,
    Material,
    Inventory,
    Transaction,
    Process,
    User,
    DashboardStats,
}

/// Cache dependency of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Every query of a kind
    All(ResourceKind),
    /// List queries of a kind
    List(ResourceKind),
    /// Detail query of one item
    Item(ResourceKind, Id),
}

impl Tag {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Tag::All(kind) | Tag::List(kind) | Tag::Item(kind, _) => *kind,
        }
    }

    /// Invalidating `self` makes `other` stale
    pub fn covers(&self, other: &Tag) -> bool {
        match self {
            Tag::All(kind) => other.kind() == *kind,
            _ => self == other,
        }
    }
}

struct Entry {
    tags: Vec<Tag>,
    value: serde_json::Value,
}

/// Cache of decoded query results
pub struct QueryCache {
    entries: DashMap<String, Entry>,
    events: broadcast::Sender<Tag>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            entries: DashMap::new(),
            events,
        }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entry = self.entries.get(key)?;
        serde_json::from_value(entry.value.clone()).ok()
    }

    pub fn put<T: Serialize>(&self, key: impl Into<String>, tags: Vec<Tag>, value: &T) {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(value) => {
                self.entries.insert(key, Entry { tags, value });
            }
            Err(err) => debug!("Not caching {}: {}", key, err),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Drop every entry depending on one of `tags` and notify subscribers.
    ///
    /// Returns the number of dropped entries.
    pub fn invalidate(&self, tags: &[Tag]) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| {
            !entry
                .tags
                .iter()
                .any(|cached| tags.iter().any(|stale| stale.covers(cached)))
        });
        let dropped = before.saturating_sub(self.entries.len());

        for tag in tags {
            // No subscribers is fine
            let _ = self.events.send(*tag);
        }

        debug!("Invalidated {:?}, dropped {} cached queries", tags, dropped);
        dropped
    }

    /// Watch `tags` for invalidation
    pub fn subscribe(&self, tags: Vec<Tag>) -> Subscription {
        Subscription {
            events: self.events.subscribe(),
            watched: tags,
        }
    }
}

/// A view's interest in a set of tags
pub struct Subscription {
    events: broadcast::Receiver<Tag>,
    watched: Vec<Tag>,
}

impl Subscription {
    pub fn watched(&self) -> &[Tag] {
        &self.watched
    }

    fn is_watched(&self, tag: &Tag) -> bool {
        self.watched
            .iter()
            .any(|watched| tag.covers(watched) || watched.covers(tag))
    }

    /// Wait for the next invalidation of a watched tag.
    ///
    /// Missed events count as a change. Returns `None` once the cache is gone.
    pub async fn changed(&mut self) -> Option<Tag> {
        loop {
            match self.events.recv().await {
                Ok(tag) if self.is_watched(&tag) => return Some(tag),
                Ok(_) => continue,
                Err(RecvError::Lagged(_)) => return self.watched.first().copied(),
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking variant of [`Subscription::changed`]
    pub fn try_changed(&mut self) -> Option<Tag> {
        loop {
            match self.events.try_recv() {
                Ok(tag) if self.is_watched(&tag) => return Some(tag),
                Ok(_) => continue,
                Err(TryRecvError::Lagged(_)) => return self.watched.first().copied(),
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }
}
