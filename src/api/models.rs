use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::errors::TripError;
use crate::core::models::settlement::{BalanceEntry, Settlement, Transfer};

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct AddExpenseRequest {
    pub description: String,
    pub amount: f64,
    pub payer: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AddParticipantRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize, ToSchema)]
pub struct RenameParticipantRequest {
    pub name: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SettlementResponse {
    /// `nothing_to_settle`, `all_square` or `transfers`
    pub status: String,
    pub transfers: Vec<Transfer>,
    /// Ready-to-display lines, one per transfer or a single message
    pub lines: Vec<String>,
    pub balances: Vec<BalanceEntry>,
}

impl SettlementResponse {
    pub fn new(settlement: Settlement, lines: Vec<String>) -> Self {
        SettlementResponse {
            status: settlement.plan.status().to_string(),
            transfers: settlement.plan.transfers().to_vec(),
            lines,
            balances: settlement.balances.entries,
        }
    }
}

// Error response struct
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for TripError to implement IntoResponse
pub struct ApiError(pub TripError);

impl From<TripError> for ApiError {
    fn from(err: TripError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            TripError::InvalidInput(..) | TripError::InvalidAmount(_) => StatusCode::BAD_REQUEST,
            TripError::ExpenseNotFound(_) | TripError::ParticipantNotFound(_) => StatusCode::NOT_FOUND,
            TripError::StorageError(_)
            | TripError::SerializationError(_)
            | TripError::LoggingError(_)
            | TripError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let error_message = match &self.0 {
            TripError::InvalidInput(field, detail) => format!("Invalid input for {}: {}", field, detail.description),
            other => other.to_string(),
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, Json(ErrorResponse { error: error_message })).into_response()
    }
}
