//! Database layer (embedded redb store).

pub mod accounts;

pub use accounts::AccountDb;

/// Table definitions.
pub mod tables {
    use redb::TableDefinition;

    /// Accounts table: account id -> Account (bincode)
    pub const ACCOUNTS: TableDefinition<u64, &[u8]> = TableDefinition::new("accounts");

    /// Username index: username -> account id
    pub const USERNAMES: TableDefinition<&str, u64> = TableDefinition::new("usernames");

    /// Email index: email -> account id
    pub const EMAILS: TableDefinition<&str, u64> = TableDefinition::new("emails");

    /// Metadata table (id counter)
    pub const META: TableDefinition<&str, u64> = TableDefinition::new("meta");
}
