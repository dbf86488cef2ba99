//! Account domain model.

use serde::{Deserialize, Serialize};

/// A registered account.
///
/// The `credential` field holds the salted one-way hash produced by a
/// [`crate::identity::CredentialHasher`]; the raw secret is never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account identifier (UUID format)
    pub id: String,
    /// Sign-in email. Unique across accounts, compared case-insensitively.
    pub email: String,
    /// Salted credential hash.
    pub credential: String,
    /// Timestamp when the account was created (RFC 3339 format)
    pub created_at: String,
}

impl Account {
    /// Case-insensitive email comparison, the uniqueness key for accounts.
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email)
    }
}
