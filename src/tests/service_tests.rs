// src/tests/service_tests.rs

use crate::constants::{DEFAULT_ROSTER_LOADED, EXPENSE_ADDED, EXPENSE_REMOVED, PARTICIPANT_ADDED, PARTICIPANT_RENAMED, SETTLEMENT_COMPUTED};
use crate::core::errors::TripError;
use crate::core::models::{money::Money, settlement::SettlementPlan};
use crate::infrastructure::storage::DocumentStore;
use crate::infrastructure::storage::in_memory::InMemoryDocumentStore;
use crate::tests::{create_test_service, create_test_service_on};

#[tokio::test]
async fn test_add_and_remove_expense() {
    let service = create_test_service().await;

    let taxi = service
        .add_expense("Taxi".to_string(), 42.5, "Ala".to_string())
        .await
        .unwrap();
    let dinner = service
        .add_expense("Dinner".to_string(), 90.0, "Bartek".to_string())
        .await
        .unwrap();
    assert_eq!(taxi.amount, Money::from_cents(4250));
    assert!(taxi.id < dinner.id);

    let expenses = service.list_expenses();
    assert_eq!(expenses.len(), 2);
    assert_eq!(expenses[0].description, "Taxi");

    service.remove_expense(&taxi.id).await.unwrap();
    assert_eq!(service.list_expenses(), vec![dinner]);

    let result = service.remove_expense(&taxi.id).await;
    assert!(matches!(result, Err(TripError::ExpenseNotFound(id)) if id == taxi.id));

    let logs = service.get_app_logs().await.unwrap();
    assert_eq!(logs.len(), 3);
    assert_eq!(logs[0].action, EXPENSE_ADDED);
    assert_eq!(logs[2].action, EXPENSE_REMOVED);
}

#[tokio::test]
async fn test_add_expense_validation() {
    let service = create_test_service().await;

    let cases = [
        ("", 10.0, "Ala", "description"),
        ("Taxi", 0.0, "Ala", "amount"),
        ("Taxi", -5.0, "Ala", "amount"),
        ("Taxi", f64::NAN, "Ala", "amount"),
        ("Taxi", 1_000_001.0, "Ala", "amount"),
        ("Taxi", 1.234, "Ala", "amount"),
        ("Taxi", 10.0, "  ", "payer"),
        ("Tax\u{0007}i", 10.0, "Ala", "description"),
    ];
    for (description, amount, payer, field) in cases {
        let result = service
            .add_expense(description.to_string(), amount, payer.to_string())
            .await;
        assert!(
            matches!(&result, Err(TripError::InvalidInput(f, _)) if f == field),
            "expected {} to be rejected, got {:?}",
            field,
            result
        );
    }
    assert!(service.list_expenses().is_empty());

    // two decimals that are not exact in binary still pass
    let expense = service
        .add_expense("Snacks".to_string(), 19.99, "Ala".to_string())
        .await
        .unwrap();
    assert_eq!(expense.amount, Money::from_cents(1999));
}

#[tokio::test]
async fn test_roster_management() {
    let service = create_test_service().await;

    let blank = service.add_participant(String::new()).await.unwrap();
    assert_eq!(blank.name, "");
    let ala = service.add_participant("Ala".to_string()).await.unwrap();

    let renamed = service
        .rename_participant(&blank.id, "Bartek".to_string())
        .await
        .unwrap();
    assert_eq!(renamed.id, blank.id);
    assert_eq!(renamed.name, "Bartek");

    let names: Vec<String> = service.list_participants().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["Bartek", "Ala"]);

    service.remove_participant(&ala.id).await.unwrap();
    assert_eq!(service.list_participants().len(), 1);

    assert!(matches!(
        service.remove_participant(&ala.id).await,
        Err(TripError::ParticipantNotFound(_))
    ));
    assert!(matches!(
        service.rename_participant("missing", "X".to_string()).await,
        Err(TripError::ParticipantNotFound(_))
    ));

    let logs = service.get_app_logs().await.unwrap();
    assert_eq!(logs[0].action, PARTICIPANT_ADDED);
    assert_eq!(logs[2].action, PARTICIPANT_RENAMED);
    assert_eq!(logs[2].details["old_name"], "");
}

#[tokio::test]
async fn test_default_roster_fills_only_an_empty_roster() {
    let service = create_test_service().await;

    let loaded = service.load_default_roster().await.unwrap();
    let names: Vec<&str> = loaded.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Ala", "Bartek", "Celina", "Darek"]);
    assert_eq!(service.list_participants(), loaded);
    assert_eq!(service.budget_summary().head_count, 4);

    assert!(matches!(
        service.load_default_roster().await,
        Err(TripError::InvalidInput(field, _)) if field == "roster"
    ));
    assert_eq!(service.list_participants().len(), 4);

    let logs = service.get_app_logs().await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, DEFAULT_ROSTER_LOADED);
    assert_eq!(logs[0].details["count"], 4);
}

#[tokio::test]
async fn test_default_roster_is_refused_once_someone_joined() {
    let service = create_test_service().await;
    service.add_participant(String::new()).await.unwrap();

    assert!(service.load_default_roster().await.is_err());
    assert_eq!(service.list_participants().len(), 1);
}

#[tokio::test]
async fn test_budget_summary_uses_default_head_count_without_roster() {
    let service = create_test_service().await;
    service
        .add_expense("Fuel".to_string(), 100.0, "Ala".to_string())
        .await
        .unwrap();

    let summary = service.budget_summary();
    assert_eq!(summary.total, Money::from_cents(10_000));
    assert_eq!(summary.head_count, 4);
    assert_eq!(summary.per_person, Money::from_cents(2500));

    service.add_participant("Ala".to_string()).await.unwrap();
    service.add_participant("Bartek".to_string()).await.unwrap();
    let summary = service.budget_summary();
    assert_eq!(summary.head_count, 2);
    assert_eq!(summary.per_person, Money::from_cents(5000));
}

#[tokio::test]
async fn test_settle_uses_current_snapshot() {
    let service = create_test_service().await;

    let settlement = service.settle().await.unwrap();
    assert_eq!(settlement.plan, SettlementPlan::NothingToSettle);

    for name in ["A", "B", "C"] {
        service.add_participant(name.to_string()).await.unwrap();
    }
    service
        .add_expense("Villa".to_string(), 90.0, "A".to_string())
        .await
        .unwrap();

    let settlement = service.settle().await.unwrap();
    assert_eq!(
        service.render_plan(&settlement),
        vec!["B → A: 30.00 €", "C → A: 30.00 €"]
    );

    // settling stores nothing
    assert_eq!(service.list_expenses().len(), 1);
    let logs = service.get_app_logs().await.unwrap();
    let last = logs.last().unwrap();
    assert_eq!(last.action, SETTLEMENT_COMPUTED);
    assert_eq!(last.details["status"], "transfers");
    assert_eq!(last.details["transfer_count"], 2);
}

#[tokio::test]
async fn test_two_devices_share_the_ledger() {
    let store = InMemoryDocumentStore::new();
    let phone = create_test_service_on(store.clone()).await;
    let laptop = create_test_service_on(store.clone()).await;

    phone.add_participant("Ala".to_string()).await.unwrap();
    laptop
        .add_expense("Tickets".to_string(), 20.0, "Ala".to_string())
        .await
        .unwrap();

    assert_eq!(laptop.list_participants().len(), 1);
    assert_eq!(phone.list_expenses().len(), 1);
    assert!(store.read("budget").await.unwrap().is_some());

    phone.shutdown().await.unwrap();
    assert_eq!(store.subscriber_count("budget").await, 1);
}

#[tokio::test]
async fn test_service_picks_up_existing_documents() {
    let store = InMemoryDocumentStore::new();
    let first = create_test_service_on(store.clone()).await;
    first.add_participant("Ala".to_string()).await.unwrap();
    first
        .add_expense("Boat".to_string(), 60.0, "Ala".to_string())
        .await
        .unwrap();
    first.shutdown().await.unwrap();

    let second = create_test_service_on(store).await;
    assert_eq!(second.list_participants()[0].name, "Ala");
    assert_eq!(second.list_expenses()[0].amount, Money::from_cents(6000));
}
