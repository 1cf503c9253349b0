mod api_tests;
mod service_tests;

use crate::core::services::TripService;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryDocumentStore;

pub async fn create_test_service() -> TripService<InMemoryLogging, InMemoryDocumentStore> {
    create_test_service_on(InMemoryDocumentStore::new()).await
}

/// Attaches a service to an existing store, like a second device joining.
pub async fn create_test_service_on(storage: InMemoryDocumentStore) -> TripService<InMemoryLogging, InMemoryDocumentStore> {
    let _ = env_logger::builder().is_test(true).try_init();
    TripService::new(storage, InMemoryLogging::new())
        .await
        .unwrap()
        .with_currency("€")
        .with_default_head_count(4)
        .with_default_roster(["Ala", "Bartek", "Celina", "Darek"])
}
