// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod account;
pub mod budget;
pub mod ledger;

pub use account::{Account, NewAccount};
pub use budget::{BudgetLimit, BudgetStatus};
pub use ledger::{EntryType, LedgerEntry};
