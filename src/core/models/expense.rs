use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::money::Money;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Expense {
    /// UUIDv7, so ids sort in creation order
    pub id: String,
    pub description: String,
    #[schema(value_type = f64, example = 42.5)]
    pub amount: Money,
    /// Name of the participant who paid
    pub payer: String,
    #[serde(default = "Utc::now")]
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(description: impl Into<String>, amount: Money, payer: impl Into<String>) -> Self {
        Expense {
            id: Uuid::now_v7().to_string(),
            description: description.into(),
            amount,
            payer: payer.into(),
            created_at: Utc::now(),
        }
    }
}
