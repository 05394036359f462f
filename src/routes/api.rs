// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::db::accounts::AccountUpdate;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Account, BudgetStatus, LedgerEntry};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// API routes (require a valid session token).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/me/transactions", get(get_my_transactions))
        .route("/api/me/budgets", get(get_my_budgets))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/users/username/{username}", get(get_user_by_username))
        .route("/api/users/{id}/deactivate", post(deactivate_user))
        .route("/api/users/{id}/reactivate", post(reactivate_user))
}

// ─── Account Profile ─────────────────────────────────────────

/// Account as returned by the API (no password hash).
#[derive(Serialize)]
pub struct AccountResponse {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            full_name: account.full_name,
            phone_number: account.phone_number,
            is_active: account.is_active,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Look up the account behind the authenticated token.
async fn account_for(state: &AppState, user: &AuthUser) -> Result<Account> {
    state
        .db
        .find_by_username(&user.username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.username)))
}

/// Get the current user's profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<AccountResponse>> {
    let account = account_for(&state, &user).await?;
    Ok(Json(account.into()))
}

/// Get an account by id.
async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<AccountResponse>> {
    let account = state
        .db
        .get_account(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;
    Ok(Json(account.into()))
}

/// Get an account by username.
async fn get_user_by_username(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<AccountResponse>> {
    let account = state
        .db
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", username)))?;
    Ok(Json(account.into()))
}

/// Profile update request; absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 100))]
    pub full_name: Option<String>,
    #[validate(length(max = 15))]
    pub phone_number: Option<String>,
}

/// Update an account's profile.
async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(payload): Json<UpdateAccountRequest>,
) -> Result<Json<AccountResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let account = state
        .db
        .update_account(
            id,
            AccountUpdate {
                username: payload.username,
                email: payload.email,
                full_name: payload.full_name,
                phone_number: payload.phone_number,
            },
        )
        .await?;

    Ok(Json(account.into()))
}

/// Soft-disable an account (the record stays).
async fn deactivate_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<AccountResponse>> {
    let account = state.db.set_active(id, false).await?;
    tracing::info!(user_id = id, "Account deactivated");
    Ok(Json(account.into()))
}

/// Re-enable a soft-disabled account.
async fn reactivate_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<AccountResponse>> {
    let account = state.db.set_active(id, true).await?;
    tracing::info!(user_id = id, "Account reactivated");
    Ok(Json(account.into()))
}

// ─── Account Deletion ────────────────────────────────────────

/// Response for account deletion.
#[derive(Serialize)]
pub struct DeleteAccountResponse {
    pub success: bool,
    pub message: String,
}

/// Delete an account and every dependent record it owns in the ledger and
/// budget services.
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteAccountResponse>> {
    tracing::info!(
        user_id = id,
        requested_by = %user.username,
        "Account deletion requested"
    );

    state.cascade.delete_account(id).await?;

    Ok(Json(DeleteAccountResponse {
        success: true,
        message: "Account and all associated records deleted".to_string(),
    }))
}

// ─── Cross-Service Reads ─────────────────────────────────────

#[derive(Serialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<LedgerEntry>,
    pub total: usize,
}

/// List the current user's transactions from the ledger service.
async fn get_my_transactions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<TransactionListResponse>> {
    let account = account_for(&state, &user).await?;
    let transactions = state.ledger.list_for_user(account.id).await?;

    Ok(Json(TransactionListResponse {
        total: transactions.len(),
        transactions,
    }))
}

/// One budget with its derived status.
#[derive(Serialize)]
pub struct BudgetSummary {
    pub id: u64,
    pub category: String,
    pub limit_amount: Decimal,
    pub spent_amount: Decimal,
    pub remaining: Decimal,
    pub period: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: BudgetStatus,
}

#[derive(Serialize)]
pub struct BudgetListResponse {
    pub budgets: Vec<BudgetSummary>,
    pub total: usize,
}

/// List the current user's budgets with derived spending status.
async fn get_my_budgets(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<BudgetListResponse>> {
    let account = account_for(&state, &user).await?;
    let limits = state.budgets.list_for_user(account.id).await?;

    let budgets: Vec<BudgetSummary> = limits
        .into_iter()
        .map(|b| BudgetSummary {
            status: b.status(),
            remaining: b.remaining(),
            id: b.id,
            category: b.category,
            limit_amount: b.limit_amount,
            spent_amount: b.spent_amount,
            period: b.period,
            start_date: b.start_date,
            end_date: b.end_date,
        })
        .collect();

    Ok(Json(BudgetListResponse {
        total: budgets.len(),
        budgets,
    }))
}
