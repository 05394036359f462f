// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wire model for budget records owned by the budget service, plus the
//! derived spending status.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Derived spending status of a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BudgetStatus {
    Safe,
    Warning,
    Exceeded,
}

/// A budget record as returned by the budget service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLimit {
    pub id: u64,
    pub user_id: u64,
    pub category: String,
    pub limit_amount: Decimal,
    pub spent_amount: Decimal,
    pub period: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl BudgetLimit {
    /// Amount left before the limit is reached (may be negative).
    pub fn remaining(&self) -> Decimal {
        self.limit_amount - self.spent_amount
    }

    /// Derived status of this budget.
    pub fn status(&self) -> BudgetStatus {
        derive_status(self.spent_amount, self.limit_amount)
    }
}

/// Compute the spending status from spent and limit amounts.
///
/// The spent/limit ratio is rounded to two decimal places (half-up) before
/// thresholding: >= 100% is `Exceeded`, >= 80% is `Warning`. A zero limit
/// is `Exceeded` as soon as anything is spent, `Safe` otherwise.
pub fn derive_status(spent: Decimal, limit: Decimal) -> BudgetStatus {
    if limit.is_zero() {
        return if spent > Decimal::ZERO {
            BudgetStatus::Exceeded
        } else {
            BudgetStatus::Safe
        };
    }

    let percentage = (spent / limit)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        * Decimal::ONE_HUNDRED;

    if percentage >= Decimal::ONE_HUNDRED {
        BudgetStatus::Exceeded
    } else if percentage >= Decimal::from(80) {
        BudgetStatus::Warning
    } else {
        BudgetStatus::Safe
    }
}
