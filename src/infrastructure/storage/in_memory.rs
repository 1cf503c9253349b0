use crate::core::errors::TripError;
use crate::infrastructure::storage::{DocumentStore, Listener, SubscriptionId};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Process-local stand-in for the remote store. Clones share the same
/// documents, so two clones behave like two devices on one backend.
#[derive(Clone)]
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<HashMap<String, Value>>>,
    listeners: Arc<RwLock<HashMap<SubscriptionId, (String, Listener)>>>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        InMemoryDocumentStore {
            documents: Arc::new(RwLock::new(HashMap::new())),
            listeners: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub async fn subscriber_count(&self, path: &str) -> usize {
        self.listeners
            .read()
            .await
            .values()
            .filter(|(p, _)| p == path)
            .count()
    }

    async fn listeners_for(&self, path: &str) -> Vec<Listener> {
        self.listeners
            .read()
            .await
            .values()
            .filter(|(p, _)| p == path)
            .map(|(_, listener)| listener.clone())
            .collect()
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn read(&self, path: &str) -> Result<Option<Value>, TripError> {
        Ok(self.documents.read().await.get(path).cloned())
    }

    async fn write(&self, path: &str, value: Value) -> Result<(), TripError> {
        let current = {
            let mut documents = self.documents.write().await;
            if value.is_null() {
                documents.remove(path);
                None
            } else {
                documents.insert(path.to_string(), value.clone());
                Some(value)
            }
        };
        tracing::debug!(path, removed = current.is_none(), "document written");

        // Listeners run outside the lock so they may read the store again.
        for listener in self.listeners_for(path).await {
            listener(current.as_ref());
        }
        Ok(())
    }

    async fn subscribe(&self, path: &str, listener: Listener) -> Result<SubscriptionId, TripError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .write()
            .await
            .insert(id, (path.to_string(), listener.clone()));

        if let Some(value) = self.read(path).await? {
            listener(Some(&value));
        }
        Ok(id)
    }

    async fn unsubscribe(&self, id: SubscriptionId) -> Result<(), TripError> {
        self.listeners.write().await.remove(&id);
        Ok(())
    }
}
