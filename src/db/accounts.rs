// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Embedded account store with typed operations.
//!
//! Uniqueness of usernames and emails is enforced through secondary index
//! tables maintained in the same write transaction as the record itself.
//! redb transactions are blocking, so every operation runs on the blocking
//! thread pool.

use crate::db::tables;
use crate::error::AppError;
use crate::models::{Account, NewAccount};
use redb::Database;
use redb::ReadableTable;
use std::path::Path;
use std::sync::Arc;

const BINCODE_CONFIG: bincode::config::Configuration = bincode::config::standard();

/// Key of the id counter in the meta table.
const NEXT_ACCOUNT_ID: &str = "next_account_id";

/// Fields of an account that a profile update may change.
/// `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
}

/// Account database handle.
#[derive(Clone)]
pub struct AccountDb {
    db: Arc<Database>,
}

fn encode_account(account: &Account) -> Result<Vec<u8>, AppError> {
    Ok(bincode::serde::encode_to_vec(account, BINCODE_CONFIG)?)
}

fn decode_account(bytes: &[u8]) -> Result<Account, AppError> {
    let (account, _) = bincode::serde::decode_from_slice(bytes, BINCODE_CONFIG)?;
    Ok(account)
}

impl AccountDb {
    /// Open (or create) the account database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::Internal(anyhow::anyhow!(
                        "Failed to create database directory: {}",
                        e
                    ))
                })?;
            }
        }

        let db = Database::create(&path).map_err(redb::Error::from)?;

        // Create tables on first run so read transactions never see a
        // missing table.
        let txn = db.begin_write()?;
        {
            let _ = txn.open_table(tables::ACCOUNTS)?;
            let _ = txn.open_table(tables::USERNAMES)?;
            let _ = txn.open_table(tables::EMAILS)?;
            let _ = txn.open_table(tables::META)?;
        }
        txn.commit()?;

        tracing::info!(path = %path.as_ref().display(), "Account database opened");

        Ok(Self { db: Arc::new(db) })
    }

    // ─── Account Operations ──────────────────────────────────────

    /// Create a new account, assigning the next id.
    ///
    /// Fails with `Conflict` when the username or email is already taken.
    pub async fn create_account(&self, new: NewAccount) -> Result<Account, AppError> {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || -> Result<Account, AppError> {
            let txn = db.begin_write()?;
            let account = {
                let mut accounts = txn.open_table(tables::ACCOUNTS)?;
                let mut usernames = txn.open_table(tables::USERNAMES)?;
                let mut emails = txn.open_table(tables::EMAILS)?;
                let mut meta = txn.open_table(tables::META)?;

                if usernames.get(new.username.as_str())?.is_some() {
                    return Err(AppError::Conflict(format!(
                        "Username '{}' already exists",
                        new.username
                    )));
                }
                if emails.get(new.email.as_str())?.is_some() {
                    return Err(AppError::Conflict(format!(
                        "Email '{}' already exists",
                        new.email
                    )));
                }

                let id = match meta.get(NEXT_ACCOUNT_ID)? {
                    Some(guard) => guard.value(),
                    None => 1,
                };
                meta.insert(NEXT_ACCOUNT_ID, id + 1)?;

                let now = chrono::Utc::now().to_rfc3339();
                let account = Account {
                    id,
                    username: new.username,
                    email: new.email,
                    password_hash: new.password_hash,
                    full_name: new.full_name,
                    phone_number: new.phone_number,
                    is_active: true,
                    created_at: now.clone(),
                    updated_at: now,
                };

                accounts.insert(id, encode_account(&account)?.as_slice())?;
                usernames.insert(account.username.as_str(), id)?;
                emails.insert(account.email.as_str(), id)?;
                account
            };
            txn.commit()?;
            Ok(account)
        })
        .await?
    }

    /// Get an account by id.
    pub async fn get_account(&self, id: u64) -> Result<Option<Account>, AppError> {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || -> Result<Option<Account>, AppError> {
            let txn = db.begin_read()?;
            let accounts = txn.open_table(tables::ACCOUNTS)?;
            match accounts.get(id)? {
                Some(guard) => Ok(Some(decode_account(guard.value())?)),
                None => Ok(None),
            }
        })
        .await?
    }

    /// Whether an account with this id exists.
    pub async fn exists(&self, id: u64) -> Result<bool, AppError> {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || -> Result<bool, AppError> {
            let txn = db.begin_read()?;
            let accounts = txn.open_table(tables::ACCOUNTS)?;
            Ok(accounts.get(id)?.is_some())
        })
        .await?
    }

    /// Get an account by username.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError> {
        let db = Arc::clone(&self.db);
        let username = username.to_string();
        tokio::task::spawn_blocking(move || -> Result<Option<Account>, AppError> {
            let txn = db.begin_read()?;
            let usernames = txn.open_table(tables::USERNAMES)?;
            let id = match usernames.get(username.as_str())? {
                Some(guard) => guard.value(),
                None => return Ok(None),
            };
            let accounts = txn.open_table(tables::ACCOUNTS)?;
            match accounts.get(id)? {
                Some(guard) => Ok(Some(decode_account(guard.value())?)),
                None => Ok(None),
            }
        })
        .await?
    }

    /// Get an account by username or email (login lookup).
    pub async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<Account>, AppError> {
        let db = Arc::clone(&self.db);
        let identifier = identifier.to_string();
        tokio::task::spawn_blocking(move || -> Result<Option<Account>, AppError> {
            let txn = db.begin_read()?;
            let usernames = txn.open_table(tables::USERNAMES)?;
            let emails = txn.open_table(tables::EMAILS)?;

            let id = match usernames.get(identifier.as_str())? {
                Some(guard) => Some(guard.value()),
                None => emails.get(identifier.as_str())?.map(|g| g.value()),
            };
            let id = match id {
                Some(id) => id,
                None => return Ok(None),
            };

            let accounts = txn.open_table(tables::ACCOUNTS)?;
            match accounts.get(id)? {
                Some(guard) => Ok(Some(decode_account(guard.value())?)),
                None => Ok(None),
            }
        })
        .await?
    }

    /// Apply a profile update, keeping the index tables consistent.
    ///
    /// Fails with `NotFound` when the account is absent and with `Conflict`
    /// when a changed username/email collides with another account.
    pub async fn update_account(
        &self,
        id: u64,
        update: AccountUpdate,
    ) -> Result<Account, AppError> {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || -> Result<Account, AppError> {
            let txn = db.begin_write()?;
            let account = {
                let mut accounts = txn.open_table(tables::ACCOUNTS)?;
                let mut usernames = txn.open_table(tables::USERNAMES)?;
                let mut emails = txn.open_table(tables::EMAILS)?;

                let mut account = {
                    match accounts.get(id)? {
                        Some(guard) => decode_account(guard.value())?,
                        None => {
                            return Err(AppError::NotFound(format!("Account {} not found", id)))
                        }
                    }
                };

                if let Some(username) = update.username {
                    if username != account.username {
                        if usernames.get(username.as_str())?.is_some() {
                            return Err(AppError::Conflict(format!(
                                "Username '{}' already exists",
                                username
                            )));
                        }
                        usernames.remove(account.username.as_str())?;
                        usernames.insert(username.as_str(), id)?;
                        account.username = username;
                    }
                }

                if let Some(email) = update.email {
                    if email != account.email {
                        if emails.get(email.as_str())?.is_some() {
                            return Err(AppError::Conflict(format!(
                                "Email '{}' already exists",
                                email
                            )));
                        }
                        emails.remove(account.email.as_str())?;
                        emails.insert(email.as_str(), id)?;
                        account.email = email;
                    }
                }

                if let Some(full_name) = update.full_name {
                    account.full_name = Some(full_name);
                }
                if let Some(phone_number) = update.phone_number {
                    account.phone_number = Some(phone_number);
                }

                account.updated_at = chrono::Utc::now().to_rfc3339();
                accounts.insert(id, encode_account(&account)?.as_slice())?;
                account
            };
            txn.commit()?;
            Ok(account)
        })
        .await?
    }

    /// Flip the active flag (soft disable / re-enable).
    pub async fn set_active(&self, id: u64, active: bool) -> Result<Account, AppError> {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || -> Result<Account, AppError> {
            let txn = db.begin_write()?;
            let account = {
                let mut accounts = txn.open_table(tables::ACCOUNTS)?;
                let mut account = {
                    match accounts.get(id)? {
                        Some(guard) => decode_account(guard.value())?,
                        None => {
                            return Err(AppError::NotFound(format!("Account {} not found", id)))
                        }
                    }
                };
                account.is_active = active;
                account.updated_at = chrono::Utc::now().to_rfc3339();
                accounts.insert(id, encode_account(&account)?.as_slice())?;
                account
            };
            txn.commit()?;
            Ok(account)
        })
        .await?
    }

    /// Remove an account record and its index entries.
    ///
    /// Returns whether a record was actually removed; deleting an absent
    /// account is not an error.
    pub async fn delete_account(&self, id: u64) -> Result<bool, AppError> {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || -> Result<bool, AppError> {
            let txn = db.begin_write()?;
            let removed = {
                let mut accounts = txn.open_table(tables::ACCOUNTS)?;
                let mut usernames = txn.open_table(tables::USERNAMES)?;
                let mut emails = txn.open_table(tables::EMAILS)?;

                let account = {
                    match accounts.get(id)? {
                        Some(guard) => Some(decode_account(guard.value())?),
                        None => None,
                    }
                };

                match account {
                    Some(account) => {
                        accounts.remove(id)?;
                        usernames.remove(account.username.as_str())?;
                        emails.remove(account.email.as_str())?;
                        true
                    }
                    None => false,
                }
            };
            txn.commit()?;
            Ok(removed)
        })
        .await?
    }
}
