// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fintrack Accounts: account service for the Fintrack personal-finance
//! system.
//!
//! This crate owns user accounts, issues and validates the session tokens
//! every service shares, and orchestrates cascading account deletion across
//! the ledger and budget services.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::AccountDb;
use services::{BudgetEraser, CascadeDelete, TokenService, TransactionEraser};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: AccountDb,
    pub tokens: TokenService,
    pub ledger: Arc<dyn TransactionEraser>,
    pub budgets: Arc<dyn BudgetEraser>,
    pub cascade: CascadeDelete,
}
