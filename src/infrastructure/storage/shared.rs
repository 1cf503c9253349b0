use crate::core::errors::TripError;
use crate::infrastructure::storage::{DocumentStore, Listener, SubscriptionId};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Typed local copy of one store document.
///
/// Local changes are applied immediately and then written through; any value
/// arriving from the store replaces the local copy wholesale.
pub struct SharedDocument<T, S: DocumentStore> {
    store: Arc<S>,
    path: String,
    state: Arc<RwLock<T>>,
    subscription: SubscriptionId,
}

impl<T, S> SharedDocument<T, S>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
    S: DocumentStore,
{
    pub async fn attach(store: Arc<S>, path: &str, initial: T) -> Result<Self, TripError> {
        let state = Arc::new(RwLock::new(initial));

        let target = state.clone();
        let watched = path.to_string();
        let listener: Listener = Arc::new(move |value: Option<&Value>| {
            // A missing document keeps whatever we already have locally.
            let Some(value) = value else { return };
            match serde_json::from_value::<T>(value.clone()) {
                Ok(remote) => *write_lock(&target) = remote,
                Err(err) => tracing::warn!(path = %watched, error = %err, "ignoring malformed document"),
            }
        });
        let subscription = store.subscribe(path, listener).await?;

        Ok(SharedDocument {
            store,
            path: path.to_string(),
            state,
            subscription,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Snapshot of the local copy.
    pub fn get(&self) -> T {
        read_lock(&self.state).clone()
    }

    /// Applies `mutate` locally, then writes the whole document to the store.
    /// The local change stays even when the write fails.
    pub async fn update<F>(&self, mutate: F) -> Result<T, TripError>
    where
        F: FnOnce(&mut T),
    {
        let snapshot = {
            let mut state = write_lock(&self.state);
            mutate(&mut *state);
            state.clone()
        };
        let value = serde_json::to_value(&snapshot)?;
        if let Err(err) = self.store.write(&self.path, value).await {
            tracing::error!(path = %self.path, error = %err, "failed to sync document");
            return Err(err);
        }
        Ok(snapshot)
    }

    pub async fn detach(self) -> Result<(), TripError> {
        self.store.unsubscribe(self.subscription).await
    }
}

// A panic while holding the lock leaves the value itself intact.
fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
