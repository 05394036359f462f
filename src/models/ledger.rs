// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wire model for transaction records owned by the ledger service.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryType {
    Income,
    Expense,
}

/// A transaction record as returned by the ledger service.
///
/// Referenced by `user_id` only; there is no enforced foreign key, so
/// cleaning these up when an account goes away is the cascade delete's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: u64,
    pub user_id: u64,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
