//! Debt settlement for a shared expense ledger.
//!
//! Every expense is split equally across the whole group. Each participant's
//! balance is what they paid minus their share of everything spent, and the
//! plan pairs the largest debtor with the largest creditor until all balances
//! are zero.
//!
//! Arithmetic is done in whole cents scaled by the split count, so the
//! unrounded balances sum to exactly zero. Each balance is then rounded to the
//! nearest cent on its own, and anything within one cent of zero counts as
//! settled. The rounded sheet can therefore be off by a fraction of a cent per
//! participant, which the settled band absorbs.

use std::collections::HashMap;

use crate::core::models::{
    expense::Expense,
    money::Money,
    participant::Participant,
    settlement::{BalanceEntry, BalanceSheet, SETTLED_TOLERANCE_CENTS, Settlement, SettlementPlan, Transfer},
};

/// Distinct names taking part in a settlement, roster first and then ad hoc
/// payers in order of first appearance.
#[derive(Debug, Default)]
struct Universe<'a> {
    names: Vec<&'a str>,
    index: HashMap<&'a str, usize>,
    roster_len: usize,
}

impl<'a> Universe<'a> {
    fn build(expenses: &'a [Expense], participants: &'a [Participant]) -> Self {
        let mut universe = Universe::default();
        for participant in participants.iter().filter(|p| p.has_name()) {
            universe.insert(&participant.name);
        }
        universe.roster_len = universe.names.len();
        for expense in expenses {
            universe.insert(&expense.payer);
        }
        universe
    }

    fn insert(&mut self, name: &'a str) {
        if !self.index.contains_key(name) {
            self.index.insert(name, self.names.len());
            self.names.push(name);
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Ad hoc payers outside the roster share the cost too; otherwise their
    /// consumption would not be offset by anybody and the sheet would not net
    /// to zero. With no such payers this is the roster size.
    fn split_count(&self) -> usize {
        self.names.len()
    }
}

/// Computes every participant's rounded net balance.
pub fn compute_balances(expenses: &[Expense], participants: &[Participant]) -> BalanceSheet {
    let universe = Universe::build(expenses, participants);
    let split_count = universe.split_count();
    if universe.names.len() > universe.roster_len && universe.roster_len > 0 {
        log::debug!(
            "{} payer(s) not on the roster joined the split",
            universe.names.len() - universe.roster_len
        );
    }

    let mut paid = vec![0i128; universe.names.len()];
    let mut total: i128 = 0;
    for expense in expenses {
        let cents = expense.amount.cents() as i128;
        total += cents;
        if let Some(index) = universe.position(&expense.payer) {
            paid[index] += cents;
        }
    }

    let k = split_count as i128;
    let amounts: Vec<i64> = paid.iter().map(|p| round_to_cent(p * k - total, k)).collect();

    BalanceSheet {
        entries: universe
            .names
            .iter()
            .zip(amounts)
            .map(|(name, cents)| BalanceEntry {
                name: name.to_string(),
                amount: Money::from_cents(cents),
            })
            .collect(),
        split_count,
        total_spent: Money::from_cents(total as i64),
    }
}

/// Rounds a balance of `scaled / k` cents to the nearest cent, halves
/// towards positive infinity.
fn round_to_cent(scaled: i128, k: i128) -> i64 {
    (2 * scaled + k).div_euclid(2 * k) as i64
}

/// Greedy largest-debtor to largest-creditor matching over a balance sheet.
pub fn match_transfers(balances: &BalanceSheet) -> Vec<Transfer> {
    let mut debtors: Vec<(&str, i64)> = balances
        .entries
        .iter()
        .filter(|e| e.is_debtor())
        .map(|e| (e.name.as_str(), -e.amount.cents()))
        .collect();
    let mut creditors: Vec<(&str, i64)> = balances
        .entries
        .iter()
        .filter(|e| e.is_creditor())
        .map(|e| (e.name.as_str(), e.amount.cents()))
        .collect();

    // Stable sorts: equal amounts keep universe order.
    debtors.sort_by(|a, b| b.1.cmp(&a.1));
    creditors.sort_by(|a, b| b.1.cmp(&a.1));

    let mut transfers = Vec::with_capacity((debtors.len() + creditors.len()).saturating_sub(1));
    let (mut i, mut j) = (0, 0);
    while i < debtors.len() && j < creditors.len() {
        let amount = debtors[i].1.min(creditors[j].1);
        transfers.push(Transfer {
            from: debtors[i].0.to_string(),
            to: creditors[j].0.to_string(),
            amount: Money::from_cents(amount),
        });

        debtors[i].1 -= amount;
        creditors[j].1 -= amount;
        if debtors[i].1 <= SETTLED_TOLERANCE_CENTS {
            i += 1;
        }
        if creditors[j].1 <= SETTLED_TOLERANCE_CENTS {
            j += 1;
        }
    }
    transfers
}

/// Computes who pays whom so that every balance ends at zero.
///
/// Pure and deterministic: identical inputs give identical plans. An empty
/// ledger yields [`SettlementPlan::NothingToSettle`], while a ledger where
/// every balance is within a cent of zero yields [`SettlementPlan::AllSquare`].
pub fn compute_plan(expenses: &[Expense], participants: &[Participant]) -> Settlement {
    let balances = compute_balances(expenses, participants);

    let plan = if expenses.is_empty() || balances.total_spent.is_zero() {
        SettlementPlan::NothingToSettle
    } else {
        let transfers = match_transfers(&balances);
        if transfers.is_empty() {
            SettlementPlan::AllSquare
        } else {
            SettlementPlan::Transfers(transfers)
        }
    };

    log::debug!(
        "settled {} expense(s) across {} participant(s): {}",
        expenses.len(),
        balances.split_count,
        plan.status()
    );

    Settlement { balances, plan }
}
