use crate::config::CONFIG;
use crate::constants::{
    DEFAULT_ROSTER_LOADED, EXPENSE_ADDED, EXPENSE_REMOVED, EXPENSES_PATH, MAX_DESCRIPTION_LENGTH, MAX_EXPENSE_AMOUNT, MAX_NAME_LENGTH,
    PARTICIPANT_ADDED, PARTICIPANT_REMOVED, PARTICIPANT_RENAMED, ROSTER_PATH, SETTLEMENT_COMPUTED,
};
use crate::core::errors::{FieldError, TripError};
use crate::core::models::{
    audit::AppLog, budget::BudgetSummary, expense::Expense, money::Money, participant::Participant,
    settlement::Settlement,
};
use crate::core::settlement::compute_plan;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::DocumentStore;
use crate::infrastructure::storage::shared::SharedDocument;
use serde_json::json;
use std::sync::Arc;

/// Expense ledger and roster of one trip, kept in sync with the document
/// store. Settlement plans are computed on request and never stored.
pub struct TripService<L: LoggingService, S: DocumentStore> {
    expenses: SharedDocument<Vec<Expense>, S>,
    roster: SharedDocument<Vec<Participant>, S>,
    logging: L,
    currency: String,
    default_head_count: usize,
    default_roster: Vec<String>,
}

impl<L: LoggingService, S: DocumentStore> TripService<L, S> {
    pub async fn new(storage: S, logging: L) -> Result<Self, TripError> {
        let store = Arc::new(storage);
        let (expenses, roster) = futures::try_join!(
            SharedDocument::<Vec<Expense>, S>::attach(store.clone(), EXPENSES_PATH, Vec::new()),
            SharedDocument::<Vec<Participant>, S>::attach(store, ROSTER_PATH, Vec::new()),
        )?;

        Ok(TripService {
            expenses,
            roster,
            logging,
            currency: CONFIG.currency_symbol.clone(),
            default_head_count: CONFIG.default_head_count,
            default_roster: CONFIG.default_roster.clone(),
        })
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_default_head_count(mut self, head_count: usize) -> Self {
        self.default_head_count = head_count.max(1);
        self
    }

    pub fn with_default_roster<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.default_roster = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    fn validate_string_input(
        &self,
        field: &str,
        value: &str,
        max_length: usize,
        allow_empty: bool,
    ) -> Result<(), TripError> {
        if !allow_empty && value.trim().is_empty() {
            return Err(TripError::InvalidInput(
                field.to_string(),
                FieldError::new(field, format!("Invalid {}", field), format!("{} cannot be empty", field)),
            ));
        }
        if value.chars().count() > max_length {
            return Err(TripError::InvalidInput(
                field.to_string(),
                FieldError::new(
                    field,
                    format!("{} Too Long", field),
                    format!("{} cannot exceed {} characters", field, max_length),
                ),
            ));
        }
        if value.chars().any(|c| c.is_control()) {
            return Err(TripError::InvalidInput(
                field.to_string(),
                FieldError::new(
                    field,
                    format!("Invalid {}", field),
                    format!("{} contains invalid characters", field),
                ),
            ));
        }
        Ok(())
    }

    fn validate_amount_input(&self, field: &str, amount: f64) -> Result<Money, TripError> {
        let invalid = |title: &str, description: &str| {
            TripError::InvalidInput(field.to_string(), FieldError::new(field, title, description))
        };
        if !amount.is_finite() {
            return Err(invalid("Invalid Amount", "Amount must be a finite number"));
        }
        if amount <= 0.0 {
            return Err(invalid("Invalid Amount", "Amount must be greater than 0"));
        }
        if amount > MAX_EXPENSE_AMOUNT {
            return Err(invalid("Amount Too Large", "Amount cannot exceed 1,000,000"));
        }
        let scaled = amount * 100.0;
        if (scaled - scaled.round()).abs() > 1e-6 {
            return Err(invalid("Invalid Amount", "Amount cannot have more than 2 decimal places"));
        }
        Money::from_decimal(amount)
    }

    pub async fn add_expense(&self, description: String, amount: f64, payer: String) -> Result<Expense, TripError> {
        self.validate_string_input("description", &description, MAX_DESCRIPTION_LENGTH, false)?;
        self.validate_string_input("payer", &payer, MAX_NAME_LENGTH, false)?;
        let amount = self.validate_amount_input("amount", amount)?;

        let expense = Expense::new(description, amount, payer);
        self.expenses.update(|expenses| expenses.push(expense.clone())).await?;

        self.logging
            .log_action(
                EXPENSE_ADDED,
                json!({
                    "expense_id": expense.id,
                    "description": expense.description,
                    "amount": expense.amount,
                    "payer": expense.payer
                }),
            )
            .await?;

        Ok(expense)
    }

    pub async fn remove_expense(&self, expense_id: &str) -> Result<(), TripError> {
        if !self.expenses.get().iter().any(|e| e.id == expense_id) {
            return Err(TripError::ExpenseNotFound(expense_id.to_string()));
        }
        self.expenses
            .update(|expenses| expenses.retain(|e| e.id != expense_id))
            .await?;

        self.logging
            .log_action(EXPENSE_REMOVED, json!({ "expense_id": expense_id }))
            .await
    }

    pub fn list_expenses(&self) -> Vec<Expense> {
        self.expenses.get()
    }

    /// Roster rows may be created without a name and filled in later.
    pub async fn add_participant(&self, name: String) -> Result<Participant, TripError> {
        self.validate_string_input("name", &name, MAX_NAME_LENGTH, true)?;

        let participant = Participant::new(name);
        self.roster.update(|roster| roster.push(participant.clone())).await?;

        self.logging
            .log_action(
                PARTICIPANT_ADDED,
                json!({ "participant_id": participant.id, "name": participant.name }),
            )
            .await?;

        Ok(participant)
    }

    /// Expenses keep the payer name they were logged with.
    pub async fn rename_participant(&self, participant_id: &str, name: String) -> Result<Participant, TripError> {
        self.validate_string_input("name", &name, MAX_NAME_LENGTH, true)?;

        let previous = self
            .roster
            .get()
            .into_iter()
            .find(|p| p.id == participant_id)
            .ok_or_else(|| TripError::ParticipantNotFound(participant_id.to_string()))?;

        let roster = self
            .roster
            .update(|roster| {
                if let Some(participant) = roster.iter_mut().find(|p| p.id == participant_id) {
                    participant.name = name;
                }
            })
            .await?;
        let renamed = roster
            .into_iter()
            .find(|p| p.id == participant_id)
            .ok_or_else(|| TripError::ParticipantNotFound(participant_id.to_string()))?;

        self.logging
            .log_action(
                PARTICIPANT_RENAMED,
                json!({
                    "participant_id": participant_id,
                    "old_name": previous.name,
                    "new_name": renamed.name
                }),
            )
            .await?;

        Ok(renamed)
    }

    pub async fn remove_participant(&self, participant_id: &str) -> Result<(), TripError> {
        if !self.roster.get().iter().any(|p| p.id == participant_id) {
            return Err(TripError::ParticipantNotFound(participant_id.to_string()));
        }
        self.roster
            .update(|roster| roster.retain(|p| p.id != participant_id))
            .await?;

        self.logging
            .log_action(PARTICIPANT_REMOVED, json!({ "participant_id": participant_id }))
            .await
    }

    /// Fills an empty roster with the configured default members. A roster
    /// that already has rows is left alone.
    pub async fn load_default_roster(&self) -> Result<Vec<Participant>, TripError> {
        let not_empty = || {
            TripError::InvalidInput(
                "roster".to_string(),
                FieldError::new(
                    "roster",
                    "Roster Not Empty",
                    "default members can only be loaded into an empty roster",
                ),
            )
        };
        if !self.roster.get().is_empty() {
            return Err(not_empty());
        }

        let defaults: Vec<Participant> = self.default_roster.iter().map(Participant::new).collect();
        let mut loaded = false;
        self.roster
            .update(|roster| {
                if roster.is_empty() {
                    roster.extend(defaults.iter().cloned());
                    loaded = true;
                }
            })
            .await?;
        // A remote update may have filled the roster in the meantime
        if !loaded {
            return Err(not_empty());
        }

        self.logging
            .log_action(
                DEFAULT_ROSTER_LOADED,
                json!({ "names": self.default_roster, "count": defaults.len() }),
            )
            .await?;

        Ok(defaults)
    }

    pub fn list_participants(&self) -> Vec<Participant> {
        self.roster.get()
    }

    pub fn budget_summary(&self) -> BudgetSummary {
        let total = self.expenses.get().iter().map(|e| e.amount).sum();
        let head_count = match self.roster.get().len() {
            0 => self.default_head_count,
            n => n,
        };
        BudgetSummary::new(total, head_count)
    }

    /// Settles the current snapshot of the ledger against the current roster.
    pub async fn settle(&self) -> Result<Settlement, TripError> {
        let expenses = self.expenses.get();
        let participants = self.roster.get();
        let settlement = compute_plan(&expenses, &participants);

        self.logging
            .log_action(
                SETTLEMENT_COMPUTED,
                json!({
                    "status": settlement.plan.status(),
                    "expense_count": expenses.len(),
                    "transfer_count": settlement.plan.transfers().len(),
                    "total_spent": settlement.balances.total_spent
                }),
            )
            .await?;

        Ok(settlement)
    }

    pub fn render_plan(&self, settlement: &Settlement) -> Vec<String> {
        settlement.plan.render(&self.currency)
    }

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, TripError> {
        self.logging.get_logs().await
    }

    /// Stops listening for remote changes.
    pub async fn shutdown(self) -> Result<(), TripError> {
        self.expenses.detach().await?;
        self.roster.detach().await
    }
}
