// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use fintrack_accounts::config::Config;
use fintrack_accounts::db::AccountDb;
use fintrack_accounts::error::{AppError, Result};
use fintrack_accounts::models::{Account, BudgetLimit, LedgerEntry, NewAccount};
use fintrack_accounts::routes::create_router;
use fintrack_accounts::services::{BudgetEraser, CascadeDelete, TokenService, TransactionEraser};
use fintrack_accounts::AppState;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Ledger fake with scripted contents and call counters.
#[derive(Default)]
pub struct FakeLedger {
    pub entries: Mutex<Vec<LedgerEntry>>,
    pub fail_erase: AtomicBool,
    pub list_calls: AtomicUsize,
    pub erase_calls: AtomicUsize,
}

#[async_trait::async_trait]
impl TransactionEraser for FakeLedger {
    async fn list_for_user(&self, _user_id: u64) -> Result<Vec<LedgerEntry>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn erase_for_user(&self, _user_id: u64) -> Result<()> {
        self.erase_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_erase.load(Ordering::SeqCst) {
            return Err(AppError::RemoteService("ledger unavailable".to_string()));
        }
        self.entries.lock().unwrap().clear();
        Ok(())
    }
}

/// Budget fake with scripted contents and call counters.
#[derive(Default)]
pub struct FakeBudgets {
    pub limits: Mutex<Vec<BudgetLimit>>,
    pub fail_erase: AtomicBool,
    pub list_calls: AtomicUsize,
    pub erase_calls: AtomicUsize,
}

#[async_trait::async_trait]
impl BudgetEraser for FakeBudgets {
    async fn list_for_user(&self, _user_id: u64) -> Result<Vec<BudgetLimit>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.limits.lock().unwrap().clone())
    }

    async fn erase_for_user(&self, _user_id: u64) -> Result<()> {
        self.erase_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_erase.load(Ordering::SeqCst) {
            return Err(AppError::RemoteService("budget unavailable".to_string()));
        }
        self.limits.lock().unwrap().clear();
        Ok(())
    }
}

/// A fully wired app over a scratch database and fake dependent stores.
pub struct TestApp {
    pub router: axum::Router,
    pub state: Arc<AppState>,
    pub ledger: Arc<FakeLedger>,
    pub budgets: Arc<FakeBudgets>,
    _dir: tempfile::TempDir,
}

/// Build a test app with a scratch database and fake store clients.
#[allow(dead_code)]
pub fn create_test_app() -> TestApp {
    let config = Config::test_default();
    let dir = tempfile::tempdir().unwrap();
    let db = AccountDb::open(dir.path().join("accounts.redb")).unwrap();

    let tokens = TokenService::new(&config.token_signing_key, config.token_ttl_secs);
    let ledger = Arc::new(FakeLedger::default());
    let budgets = Arc::new(FakeBudgets::default());

    let cascade = CascadeDelete::new(
        db.clone(),
        ledger.clone() as Arc<dyn TransactionEraser>,
        budgets.clone() as Arc<dyn BudgetEraser>,
    );

    let state = Arc::new(AppState {
        config,
        db,
        tokens,
        ledger: ledger.clone(),
        budgets: budgets.clone(),
        cascade,
    });

    TestApp {
        router: create_router(state.clone()),
        state,
        ledger,
        budgets,
        _dir: dir,
    }
}

/// Insert an account directly, skipping the (slow) registration password
/// hash. The stored hash is a placeholder: seeded accounts authenticate in
/// tests with directly issued tokens, never through the login route.
#[allow(dead_code)]
pub async fn seed_account(db: &AccountDb, username: &str) -> Account {
    db.create_account(NewAccount {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password_hash: "$argon2id$placeholder".to_string(),
        full_name: None,
        phone_number: None,
    })
    .await
    .unwrap()
}

/// Sample ledger entry owned by `user_id`.
#[allow(dead_code)]
pub fn sample_entry(user_id: u64, id: u64) -> LedgerEntry {
    use fintrack_accounts::models::EntryType;

    LedgerEntry {
        id,
        user_id,
        amount: rust_decimal::Decimal::from(250),
        entry_type: EntryType::Expense,
        category: "Groceries".to_string(),
        date: chrono::NaiveDate::from_ymd_opt(2026, 5, 20).unwrap(),
        payment_method: Some("UPI".to_string()),
        description: Some("weekly shop".to_string()),
    }
}

/// Sample budget owned by `user_id`.
#[allow(dead_code)]
pub fn sample_budget(user_id: u64, id: u64, spent: i64, limit: i64) -> BudgetLimit {
    BudgetLimit {
        id,
        user_id,
        category: "Groceries".to_string(),
        limit_amount: rust_decimal::Decimal::from(limit),
        spent_amount: rust_decimal::Decimal::from(spent),
        period: "MONTHLY".to_string(),
        start_date: chrono::NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
        end_date: chrono::NaiveDate::from_ymd_opt(2026, 5, 31).unwrap(),
    }
}
