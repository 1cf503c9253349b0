pub mod api;
pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;

pub use crate::core::errors::TripError;
pub use crate::core::models::{
    expense::Expense,
    money::Money,
    participant::Participant,
    settlement::{BalanceSheet, Settlement, SettlementPlan, Transfer},
};
pub use crate::core::services::TripService;
pub use crate::core::settlement::{compute_balances, compute_plan};
pub use crate::infrastructure::logging::in_memory::InMemoryLogging;
pub use crate::infrastructure::storage::in_memory::InMemoryDocumentStore;

#[cfg(test)]
mod tests;
