use crate::{
    api::models::*,
    core::{
        models::{audit::AppLog, budget::BudgetSummary, expense::Expense, participant::Participant},
        services::TripService,
    },
    infrastructure::{logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryDocumentStore},
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
};

use std::sync::Arc;

pub type AppService = TripService<InMemoryLogging, InMemoryDocumentStore>;

// Define API routes
pub fn api_routes(service: Arc<AppService>) -> Router {
    Router::new()
        .route(
            "/expenses",
            axum::routing::get(list_expenses).post(add_expense),
        )
        .route("/expenses/{expense_id}", axum::routing::delete(remove_expense))
        .route(
            "/participants",
            axum::routing::get(list_participants).post(add_participant),
        )
        .route("/participants/defaults", axum::routing::post(load_default_roster))
        .route(
            "/participants/{participant_id}",
            axum::routing::put(rename_participant).delete(remove_participant),
        )
        .route("/budget", axum::routing::get(get_budget_summary))
        .route("/settlement", axum::routing::get(get_settlement))
        .route("/logs", axum::routing::get(get_app_logs))
        .with_state(service)
}

#[utoipa::path(
    get,
    path = "/api/expenses",
    responses(
        (status = 200, description = "Expenses in creation order", body = Vec<Expense>)
    )
)]
pub async fn list_expenses(State(service): State<Arc<AppService>>) -> Json<Vec<Expense>> {
    Json(service.list_expenses())
}

#[utoipa::path(
    post,
    path = "/api/expenses",
    request_body = AddExpenseRequest,
    responses(
        (status = 201, description = "Expense added", body = Expense),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn add_expense(
    State(service): State<Arc<AppService>>,
    Json(req): Json<AddExpenseRequest>,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    let expense = service.add_expense(req.description, req.amount, req.payer).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

#[utoipa::path(
    delete,
    path = "/api/expenses/{expense_id}",
    params(
        ("expense_id" = String, Path, description = "ID of the expense to remove")
    ),
    responses(
        (status = 204, description = "Expense removed"),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn remove_expense(
    State(service): State<Arc<AppService>>,
    Path(expense_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.remove_expense(&expense_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/participants",
    responses(
        (status = 200, description = "Trip roster", body = Vec<Participant>)
    )
)]
pub async fn list_participants(State(service): State<Arc<AppService>>) -> Json<Vec<Participant>> {
    Json(service.list_participants())
}

#[utoipa::path(
    post,
    path = "/api/participants",
    request_body = AddParticipantRequest,
    responses(
        (status = 201, description = "Participant added", body = Participant),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn add_participant(
    State(service): State<Arc<AppService>>,
    Json(req): Json<AddParticipantRequest>,
) -> Result<(StatusCode, Json<Participant>), ApiError> {
    let participant = service.add_participant(req.name).await?;
    Ok((StatusCode::CREATED, Json(participant)))
}

#[utoipa::path(
    post,
    path = "/api/participants/defaults",
    responses(
        (status = 201, description = "Default members loaded into an empty roster", body = Vec<Participant>),
        (status = 400, description = "Roster is not empty", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn load_default_roster(
    State(service): State<Arc<AppService>>,
) -> Result<(StatusCode, Json<Vec<Participant>>), ApiError> {
    let participants = service.load_default_roster().await?;
    Ok((StatusCode::CREATED, Json(participants)))
}

#[utoipa::path(
    put,
    path = "/api/participants/{participant_id}",
    request_body = RenameParticipantRequest,
    params(
        ("participant_id" = String, Path, description = "ID of the participant to rename")
    ),
    responses(
        (status = 200, description = "Participant renamed", body = Participant),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "Participant not found", body = ErrorResponse)
    )
)]
pub async fn rename_participant(
    State(service): State<Arc<AppService>>,
    Path(participant_id): Path<String>,
    Json(req): Json<RenameParticipantRequest>,
) -> Result<Json<Participant>, ApiError> {
    let participant = service.rename_participant(&participant_id, req.name).await?;
    Ok(Json(participant))
}

#[utoipa::path(
    delete,
    path = "/api/participants/{participant_id}",
    params(
        ("participant_id" = String, Path, description = "ID of the participant to remove")
    ),
    responses(
        (status = 204, description = "Participant removed"),
        (status = 404, description = "Participant not found", body = ErrorResponse)
    )
)]
pub async fn remove_participant(
    State(service): State<Arc<AppService>>,
    Path(participant_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.remove_participant(&participant_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/budget",
    responses(
        (status = 200, description = "Total spent and estimated cost per head", body = BudgetSummary)
    )
)]
pub async fn get_budget_summary(State(service): State<Arc<AppService>>) -> Json<BudgetSummary> {
    Json(service.budget_summary())
}

#[utoipa::path(
    get,
    path = "/api/settlement",
    responses(
        (status = 200, description = "Settlement plan for the current ledger", body = SettlementResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_settlement(State(service): State<Arc<AppService>>) -> Result<Json<SettlementResponse>, ApiError> {
    let settlement = service.settle().await?;
    let lines = service.render_plan(&settlement);
    Ok(Json(SettlementResponse::new(settlement, lines)))
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses(
        (status = 200, description = "Application action log", body = Vec<AppLog>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_app_logs(State(service): State<Arc<AppService>>) -> Result<Json<Vec<AppLog>>, ApiError> {
    let logs = service.get_app_logs().await?;
    Ok(Json(logs))
}
