// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP client for the transaction (ledger) service.
//!
//! The orchestrator only depends on the `TransactionEraser` capability, so
//! tests substitute a fake without any network in the loop.

use crate::error::{AppError, Result};
use crate::models::LedgerEntry;
use async_trait::async_trait;
use std::time::Duration;

/// Every outbound call is bounded; an unresponsive ledger service must not
/// hang a delete forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Read and bulk-remove access to a user's transaction records.
#[async_trait]
pub trait TransactionEraser: Send + Sync {
    /// List the user's transaction records (empty list if none).
    async fn list_for_user(&self, user_id: u64) -> Result<Vec<LedgerEntry>>;

    /// Remove every transaction record the user owns.
    /// Idempotent on an empty set per the ledger service's contract.
    async fn erase_for_user(&self, user_id: u64) -> Result<()>;
}

/// Ledger service API client.
#[derive(Clone)]
pub struct LedgerClient {
    http: reqwest::Client,
    base_url: String,
}

impl LedgerClient {
    /// Create a client for the ledger service at `base_url`.
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
impl TransactionEraser for LedgerClient {
    async fn list_for_user(&self, user_id: u64) -> Result<Vec<LedgerEntry>> {
        let url = format!("{}/api/transactions/user/{}", self.base_url, user_id);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::RemoteService(format!("Ledger request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::RemoteService(format!(
                "Ledger HTTP {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::RemoteService(format!("Ledger JSON parse error: {}", e)))
    }

    async fn erase_for_user(&self, user_id: u64) -> Result<()> {
        let url = format!("{}/api/transactions/user/{}/all", self.base_url, user_id);

        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| AppError::RemoteService(format!("Ledger request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::RemoteService(format!(
                "Ledger HTTP {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}
