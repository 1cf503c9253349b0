use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use super::money::Money;

/// One payment in a settlement plan: `from` pays `to`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Transfer {
    pub from: String,
    pub to: String,
    #[schema(value_type = f64, example = 30.0)]
    pub amount: Money,
}

impl Transfer {
    /// Human readable line, e.g. `B → A: 30.00 €`.
    pub fn render(&self, currency: &str) -> String {
        format!("{} → {}: {} {}", self.from, self.to, self.amount, currency)
    }
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}: {}", self.from, self.to, self.amount)
    }
}

/// Balances within this many cents of zero are treated as settled.
pub const SETTLED_TOLERANCE_CENTS: i64 = 1;

/// Net position of one participant: positive is owed money, negative owes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BalanceEntry {
    pub name: String,
    #[schema(value_type = f64)]
    pub amount: Money,
}

impl BalanceEntry {
    pub fn is_debtor(&self) -> bool {
        self.amount.cents() < -SETTLED_TOLERANCE_CENTS
    }

    pub fn is_creditor(&self) -> bool {
        self.amount.cents() > SETTLED_TOLERANCE_CENTS
    }

    pub fn is_settled(&self) -> bool {
        !self.is_debtor() && !self.is_creditor()
    }
}

/// Balances of every participant in the universe rounded to cents, in
/// universe order. Each amount is rounded on its own, so the sum may differ
/// from zero by up to half a cent per entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub entries: Vec<BalanceEntry>,
    /// Number of people each expense was divided among
    pub split_count: usize,
    pub total_spent: Money,
}

impl BalanceSheet {
    pub fn get(&self, name: &str) -> Option<Money> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.amount)
    }

    pub fn total(&self) -> Money {
        self.entries.iter().map(|e| e.amount).sum()
    }

    pub fn debtor_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_debtor()).count()
    }

    pub fn creditor_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_creditor()).count()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "transfers", rename_all = "snake_case")]
pub enum SettlementPlan {
    /// No expenses, or nothing was actually spent.
    NothingToSettle,
    /// Money was spent but every balance is within a cent of zero.
    AllSquare,
    /// Never empty.
    Transfers(Vec<Transfer>),
}

impl SettlementPlan {
    pub fn transfers(&self) -> &[Transfer] {
        match self {
            SettlementPlan::Transfers(transfers) => transfers,
            _ => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transfers().is_empty()
    }

    pub fn status(&self) -> &'static str {
        match self {
            SettlementPlan::NothingToSettle => "nothing_to_settle",
            SettlementPlan::AllSquare => "all_square",
            SettlementPlan::Transfers(_) => "transfers",
        }
    }

    /// Lines to show the user. Empty plans render as a single message line.
    pub fn render(&self, currency: &str) -> Vec<String> {
        match self {
            SettlementPlan::NothingToSettle => vec!["Nothing to settle.".to_string()],
            SettlementPlan::AllSquare => vec!["Everyone is square!".to_string()],
            SettlementPlan::Transfers(transfers) => transfers.iter().map(|t| t.render(currency)).collect(),
        }
    }
}

/// Result of one settlement request. Derived from a snapshot and never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub balances: BalanceSheet,
    pub plan: SettlementPlan,
}
