//! Account repository trait.
//!
//! Defines the interface for account persistence operations.

use super::model::Account;
use crate::error::Result;

/// An abstract repository for the account collection.
///
/// The store is snapshot-shaped: the whole collection is read and replaced
/// at once. Callers are expected to issue at most one in-flight mutating
/// call at a time; the repository performs no locking beyond what the
/// storage medium itself provides.
#[async_trait::async_trait]
pub trait AccountRepository: Send + Sync {
    /// Retrieves all accounts from storage.
    async fn get_all(&self) -> Result<Vec<Account>>;

    /// Saves all accounts to storage, replacing the existing collection.
    async fn save_all(&self, accounts: &[Account]) -> Result<()>;
}
