use utoipa::OpenApi;

use crate::{
    api::models::{AddExpenseRequest, AddParticipantRequest, ErrorResponse, RenameParticipantRequest, SettlementResponse},
    core::models::{
        audit::AppLog,
        budget::BudgetSummary,
        expense::Expense,
        participant::Participant,
        settlement::{BalanceEntry, Transfer},
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::list_expenses,
        super::handlers::add_expense,
        super::handlers::remove_expense,
        super::handlers::list_participants,
        super::handlers::add_participant,
        super::handlers::load_default_roster,
        super::handlers::rename_participant,
        super::handlers::remove_participant,
        super::handlers::get_budget_summary,
        super::handlers::get_settlement,
        super::handlers::get_app_logs
    ),
    components(schemas(
        AddExpenseRequest,
        AddParticipantRequest,
        RenameParticipantRequest,
        SettlementResponse,
        ErrorResponse,
        Expense,
        Participant,
        BudgetSummary,
        Transfer,
        BalanceEntry,
        AppLog
    )),
    info(
        title = "Tripsplit API",
        description = "Shared trip expenses, roster and debt settlement",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
