use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::money::Money;

/// Running totals shown above the expense list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BudgetSummary {
    #[schema(value_type = f64)]
    pub total: Money,
    /// Roster size, or the configured default when the roster is empty
    pub head_count: usize,
    #[schema(value_type = f64)]
    pub per_person: Money,
}

impl BudgetSummary {
    pub fn new(total: Money, head_count: usize) -> Self {
        let per_person = match head_count {
            0 => Money::ZERO,
            n => Money::from_cents(div_round(total.cents(), n as i64)),
        };
        BudgetSummary {
            total,
            head_count,
            per_person,
        }
    }
}

fn div_round(numerator: i64, denominator: i64) -> i64 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder.abs() * 2 >= denominator {
        quotient + numerator.signum()
    } else {
        quotient
    }
}
