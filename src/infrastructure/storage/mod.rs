pub mod in_memory;
pub mod shared;

use crate::core::errors::TripError;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub type SubscriptionId = u64;

/// Called with the new document on every change of a subscribed path, `None`
/// once the document is removed.
pub type Listener = Arc<dyn Fn(Option<&Value>) + Send + Sync>;

/// Remote key/value document store with change notifications.
///
/// Writes replace the whole document at a path; concurrent writers race and
/// the last one wins.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn read(&self, path: &str) -> Result<Option<Value>, TripError>;
    /// Writing `null` removes the document.
    async fn write(&self, path: &str, value: Value) -> Result<(), TripError>;
    /// The listener receives the current document straight away if one exists.
    async fn subscribe(&self, path: &str, listener: Listener) -> Result<SubscriptionId, TripError>;
    async fn unsubscribe(&self, id: SubscriptionId) -> Result<(), TripError>;
}
