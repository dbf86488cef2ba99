//! Session-pointer repository trait.
//!
//! The pointer is the single record identifying which account is currently
//! authenticated.

use crate::error::Result;

/// An abstract repository for the current-session pointer.
#[async_trait::async_trait]
pub trait StateRepository: Send + Sync {
    /// Gets the id of the currently signed-in account.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(account_id))`: an account is signed in
    /// - `Ok(None)`: no account is signed in
    async fn current_account(&self) -> Result<Option<String>>;

    /// Sets the currently signed-in account.
    async fn set_current_account(&self, account_id: &str) -> Result<()>;

    /// Clears the pointer. Deletes no other data.
    async fn clear_current_account(&self) -> Result<()>;
}
