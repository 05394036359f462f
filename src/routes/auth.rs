// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration and login routes (public).

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::NewAccount;
use crate::routes::api::AccountResponse;
use crate::services::password;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users/register", post(register))
        .route("/api/users/login", post(login))
}

/// Registration request body.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(max = 100))]
    pub full_name: Option<String>,
    #[validate(length(max = 15))]
    pub phone_number: Option<String>,
}

/// Register a new account.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AccountResponse>)> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    // Argon2 is deliberately slow; keep it off the async workers
    let password = payload.password;
    let password_hash = tokio::task::spawn_blocking(move || password::hash(&password)).await??;

    let account = state
        .db
        .create_account(NewAccount {
            username: payload.username,
            email: payload.email,
            password_hash,
            full_name: payload.full_name,
            phone_number: payload.phone_number,
        })
        .await?;

    tracing::info!(
        user_id = account.id,
        username = %account.username,
        "Account registered"
    );

    Ok((StatusCode::CREATED, Json(account.into())))
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username_or_email: String,
    pub password: String,
}

/// Login response: the session token plus the account it belongs to.
#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AccountResponse,
}

/// Authenticate and issue a session token.
///
/// Every failure path is the same `Unauthorized` so a caller cannot probe
/// which usernames exist.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let account = state
        .db
        .find_by_username_or_email(&payload.username_or_email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let stored_hash = account.password_hash.clone();
    let password = payload.password;
    let password_ok =
        tokio::task::spawn_blocking(move || password::verify(&password, &stored_hash)).await?;

    if !password_ok {
        return Err(AppError::Unauthorized);
    }

    if !account.is_active {
        tracing::info!(
            user_id = account.id,
            username = %account.username,
            "Login attempt on deactivated account"
        );
        return Err(AppError::Unauthorized);
    }

    let token = state.tokens.issue(&account.username)?;

    tracing::info!(user_id = account.id, username = %account.username, "Login successful");

    Ok(Json(AuthResponse {
        token,
        user: account.into(),
    }))
}
