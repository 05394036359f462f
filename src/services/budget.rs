// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP client for the budget service.

use crate::error::{AppError, Result};
use crate::models::BudgetLimit;
use async_trait::async_trait;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Read and bulk-remove access to a user's budget records.
#[async_trait]
pub trait BudgetEraser: Send + Sync {
    /// List the user's budget records (empty list if none).
    async fn list_for_user(&self, user_id: u64) -> Result<Vec<BudgetLimit>>;

    /// Remove every budget record the user owns.
    /// Idempotent on an empty set per the budget service's contract.
    async fn erase_for_user(&self, user_id: u64) -> Result<()>;
}

/// Budget service API client.
#[derive(Clone)]
pub struct BudgetClient {
    http: reqwest::Client,
    base_url: String,
}

impl BudgetClient {
    /// Create a client for the budget service at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl BudgetEraser for BudgetClient {
    async fn list_for_user(&self, user_id: u64) -> Result<Vec<BudgetLimit>> {
        let url = format!("{}/api/budgets/user/{}", self.base_url, user_id);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::RemoteService(format!("Budget request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::RemoteService(format!(
                "Budget HTTP {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::RemoteService(format!("Budget JSON parse error: {}", e)))
    }

    async fn erase_for_user(&self, user_id: u64) -> Result<()> {
        let url = format!("{}/api/budgets/user/{}/all", self.base_url, user_id);

        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| AppError::RemoteService(format!("Budget request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::RemoteService(format!(
                "Budget HTTP {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}
