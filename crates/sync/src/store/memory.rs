//! In-memory document store with live query support.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};
use tokio::sync::mpsc;
use tracing::debug;

use super::{DocumentStore, Snapshot, StoreError, Subscription};

/// An in-process [`DocumentStore`].
///
/// Collections are plain maps behind one mutex; every mutation re-runs the
/// registered live queries for that collection and pushes fresh snapshots.
/// Notification happens inside the write call, so a subscriber that awaits
/// its channel is guaranteed to observe every write - the same
/// eventual-delivery contract the hosted store gives, minus the network.
///
/// Clones share the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    collections: HashMap<String, BTreeMap<String, Value>>,
    watchers: Vec<Watcher>,
}

#[derive(Debug)]
struct Watcher {
    collection: String,
    field: String,
    value: Value,
    tx: mpsc::UnboundedSender<Snapshot>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inner {
    fn matching(&self, collection: &str, field: &str, value: &Value) -> Snapshot {
        self.collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, doc)| doc.get(field) == Some(value))
                    .map(|(key, doc)| (key.clone(), doc.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Push fresh snapshots to every live query on `collection`, dropping
    /// watchers whose subscriber side has gone away.
    fn notify(&mut self, collection: &str) {
        let mut snapshots = Vec::new();
        for (idx, watcher) in self.watchers.iter().enumerate() {
            if watcher.collection == collection {
                snapshots.push((idx, self.matching(collection, &watcher.field, &watcher.value)));
            }
        }

        let mut closed = Vec::new();
        for (idx, snapshot) in snapshots {
            if let Some(watcher) = self.watchers.get(idx)
                && watcher.tx.send(snapshot).is_err()
            {
                closed.push(idx);
            }
        }

        for idx in closed.into_iter().rev() {
            self.watchers.swap_remove(idx);
        }
    }

    fn merge_into(doc: &mut Value, fields: Map<String, Value>) {
        if let Value::Object(existing) = doc {
            for (name, value) in fields {
                existing.insert(name, value);
            }
        } else {
            *doc = Value::Object(fields);
        }
    }
}

impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError> {
        let inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(inner
            .collections
            .get(collection)
            .and_then(|docs| docs.get(key))
            .cloned())
    }

    async fn set_merged(
        &self,
        collection: &str,
        key: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let docs = inner.collections.entry(collection.to_owned()).or_default();
        match docs.get_mut(key) {
            Some(doc) => Inner::merge_into(doc, fields),
            None => {
                docs.insert(key.to_owned(), Value::Object(fields));
            }
        }
        inner.notify(collection);
        Ok(())
    }

    async fn update(
        &self,
        collection: &str,
        key: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let doc = inner
            .collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(key))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_owned(),
                key: key.to_owned(),
            })?;
        Inner::merge_into(doc, fields);
        inner.notify(collection);
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Snapshot, StoreError> {
        let inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(inner.matching(collection, field, value))
    }

    async fn list(&self, collection: &str) -> Result<Snapshot, StoreError> {
        let inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(inner
            .collections
            .get(collection)
            .map(|docs| docs.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default())
    }

    fn subscribe(&self, collection: &str, field: &str, value: Value) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        // Initial snapshot is delivered before the watcher can observe any
        // further write, so subscribers always start from current state.
        let initial = inner.matching(collection, field, &value);
        debug!(collection, field, docs = initial.len(), "live query registered");
        let _ = tx.send(initial);

        inner.watchers.push(Watcher {
            collection: collection.to_owned(),
            field: field.to_owned(),
            value,
            tx,
        });

        Subscription::new(rx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_set_merged_creates_then_merges() {
        let store = MemoryStore::new();
        store
            .set_merged("profiles", "p1", fields(json!({"name": "Asha", "city": "Pune"})))
            .await
            .unwrap();
        store
            .set_merged("profiles", "p1", fields(json!({"city": "Mumbai"})))
            .await
            .unwrap();

        let doc = store.get("profiles", "p1").await.unwrap().unwrap();
        assert_eq!(doc, json!({"name": "Asha", "city": "Mumbai"}));
    }

    #[tokio::test]
    async fn test_update_requires_existing_document() {
        let store = MemoryStore::new();
        let err = store
            .update("orders", "missing", fields(json!({"status": "ready"})))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_query_matches_field_equality() {
        let store = MemoryStore::new();
        store
            .set_merged("orders", "a", fields(json!({"shopPhone": "1111111111"})))
            .await
            .unwrap();
        store
            .set_merged("orders", "b", fields(json!({"shopPhone": "2222222222"})))
            .await
            .unwrap();

        let hits = store
            .query("orders", "shopPhone", &json!("1111111111"))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, "a");
    }

    #[tokio::test]
    async fn test_subscribe_delivers_initial_then_every_write() {
        let store = MemoryStore::new();
        store
            .set_merged("orders", "a", fields(json!({"shopPhone": "1111111111", "n": 1})))
            .await
            .unwrap();

        let mut sub = store.subscribe("orders", "shopPhone", json!("1111111111"));

        let first = sub.next().await.unwrap();
        assert_eq!(first.len(), 1);

        store
            .update("orders", "a", fields(json!({"n": 2})))
            .await
            .unwrap();
        let second = sub.next().await.unwrap();
        assert_eq!(second[0].1["n"], json!(2));

        // A write to a non-matching document still produces a snapshot; the
        // matching set is simply unchanged.
        store
            .set_merged("orders", "b", fields(json!({"shopPhone": "2222222222"})))
            .await
            .unwrap();
        let third = sub.next().await.unwrap();
        assert_eq!(third.len(), 1);
    }

    #[tokio::test]
    async fn test_dropped_subscription_is_pruned() {
        let store = MemoryStore::new();
        let sub = store.subscribe("orders", "shopPhone", json!("1111111111"));
        drop(sub);

        store
            .set_merged("orders", "a", fields(json!({"shopPhone": "1111111111"})))
            .await
            .unwrap();

        let inner = store.inner.lock().unwrap();
        assert!(inner.watchers.is_empty());
    }
}
