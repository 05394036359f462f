//! Account model for storage and API.

use serde::{Deserialize, Serialize};

/// Account record stored in the embedded database.
///
/// `is_active = false` marks a soft-disabled account; the record itself is
/// only removed by the cascade delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Account ID (also used as the record key)
    pub id: u64,
    /// Login name, unique across accounts
    pub username: String,
    /// Email address, unique across accounts
    pub email: String,
    /// Argon2id password hash (never serialized into API responses)
    pub password_hash: String,
    /// Display name
    pub full_name: Option<String>,
    /// Phone number
    pub phone_number: Option<String>,
    /// Whether the account may log in
    pub is_active: bool,
    /// When the account was registered (RFC 3339)
    pub created_at: String,
    /// Last profile change (RFC 3339)
    pub updated_at: String,
}

/// Input for creating an account; the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
}
