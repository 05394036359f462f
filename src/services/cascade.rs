// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cascading account deletion across the dependent stores.
//!
//! Deleting a user means removing their transactions (ledger service) and
//! budgets (budget service) before the local account record, over plain
//! HTTP with no distributed transaction. There is no rollback: a failure
//! mid-sequence leaves earlier deletions in place, the account record
//! intact, and the details in the logs for reconciliation.

use crate::db::AccountDb;
use crate::error::{AppError, Result};
use crate::services::{BudgetEraser, TransactionEraser};
use dashmap::DashMap;
use std::sync::Arc;

/// What the cascade removed, for logging and the API response.
#[derive(Debug, Clone, Copy, Default)]
pub struct CascadeReport {
    pub transactions_removed: usize,
    pub budgets_removed: usize,
}

/// Orchestrates account deletion across the dependent stores.
pub struct CascadeDelete {
    db: AccountDb,
    ledger: Arc<dyn TransactionEraser>,
    budgets: Arc<dyn BudgetEraser>,
    /// Users with a delete currently running. A second request for the same
    /// user is rejected instead of double-issuing remote deletes.
    in_flight: DashMap<u64, ()>,
}

/// Removes the in-flight marker when the cascade ends, on any path.
struct InFlightGuard<'a> {
    map: &'a DashMap<u64, ()>,
    user_id: u64,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.map.remove(&self.user_id);
    }
}

impl CascadeDelete {
    pub fn new(
        db: AccountDb,
        ledger: Arc<dyn TransactionEraser>,
        budgets: Arc<dyn BudgetEraser>,
    ) -> Self {
        Self {
            db,
            ledger,
            budgets,
            in_flight: DashMap::new(),
        }
    }

    /// Delete an account and all dependent records it owns.
    ///
    /// Steps, in order:
    /// 1. Look up the account; `NotFound` stops everything.
    /// 2. Query the ledger service; bulk-delete only if records exist.
    /// 3. Same for the budget service.
    /// 4. Delete the local account record.
    ///
    /// Each outbound call is a single attempt. Any failure in steps 2-4
    /// aborts with `CascadeDeleteFailed` wrapping the cause; records removed
    /// by earlier steps stay removed.
    pub async fn delete_account(&self, user_id: u64) -> Result<CascadeReport> {
        if self.in_flight.insert(user_id, ()).is_some() {
            return Err(AppError::Conflict(format!(
                "Deletion already in progress for user {}",
                user_id
            )));
        }
        let _guard = InFlightGuard {
            map: &self.in_flight,
            user_id,
        };

        let account = self
            .db
            .get_account(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        tracing::warn!(
            user_id,
            username = %account.username,
            "Deleting account and all dependent records"
        );

        let mut report = CascadeReport::default();

        // Transactions first
        let entries = self
            .ledger
            .list_for_user(user_id)
            .await
            .map_err(AppError::cascade)?;

        if entries.is_empty() {
            tracing::info!(user_id, "No transactions, skipping ledger delete");
        } else {
            self.ledger.erase_for_user(user_id).await.map_err(|e| {
                tracing::error!(user_id, error = %e, "Ledger delete failed, aborting cascade");
                AppError::cascade(e)
            })?;
            report.transactions_removed = entries.len();
            tracing::info!(
                user_id,
                count = report.transactions_removed,
                "Transactions deleted"
            );
        }

        // Then budgets
        let limits = self.budgets.list_for_user(user_id).await.map_err(|e| {
            self.log_partial(user_id, &report);
            AppError::cascade(e)
        })?;

        if limits.is_empty() {
            tracing::info!(user_id, "No budgets, skipping budget delete");
        } else {
            self.budgets.erase_for_user(user_id).await.map_err(|e| {
                tracing::error!(user_id, error = %e, "Budget delete failed, aborting cascade");
                self.log_partial(user_id, &report);
                AppError::cascade(e)
            })?;
            report.budgets_removed = limits.len();
            tracing::info!(user_id, count = report.budgets_removed, "Budgets deleted");
        }

        // Finally the account itself
        self.db.delete_account(user_id).await.map_err(|e| {
            self.log_partial(user_id, &report);
            AppError::cascade(e)
        })?;

        tracing::info!(
            user_id,
            transactions_removed = report.transactions_removed,
            budgets_removed = report.budgets_removed,
            "Account deletion complete"
        );

        Ok(report)
    }

    /// Record which dependent deletions already ran before an abort. The
    /// API response never carries this; the logs are the reconciliation
    /// trail.
    fn log_partial(&self, user_id: u64, report: &CascadeReport) {
        if report.transactions_removed > 0 || report.budgets_removed > 0 {
            tracing::error!(
                user_id,
                transactions_removed = report.transactions_removed,
                budgets_removed = report.budgets_removed,
                "Cascade aborted after partial cleanup; dependent records were not restored"
            );
        }
    }
}
