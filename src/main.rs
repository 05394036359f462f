// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fintrack Accounts API Server
//!
//! Owns user accounts and session tokens, and removes a user's transactions
//! and budgets from the dependent services when an account is deleted.

use fintrack_accounts::{
    config::Config,
    db::AccountDb,
    services::{BudgetClient, BudgetEraser, CascadeDelete, LedgerClient, TokenService, TransactionEraser},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Fintrack Accounts API");

    // Open the embedded account database
    let db = AccountDb::open(&config.database_path).expect("Failed to open account database");

    // Token service holds the shared signing key for the whole deployment
    let tokens = TokenService::new(&config.token_signing_key, config.token_ttl_secs);

    // Clients for the dependent stores
    let ledger: Arc<dyn TransactionEraser> = Arc::new(LedgerClient::new(&config.ledger_base_url)?);
    let budgets: Arc<dyn BudgetEraser> = Arc::new(BudgetClient::new(&config.budget_base_url)?);
    tracing::info!(
        ledger = %config.ledger_base_url,
        budgets = %config.budget_base_url,
        "Dependent store clients initialized"
    );

    let cascade = CascadeDelete::new(db.clone(), Arc::clone(&ledger), Arc::clone(&budgets));

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        tokens,
        ledger,
        budgets,
        cascade,
    });

    // Build router
    let app = fintrack_accounts::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fintrack_accounts=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
