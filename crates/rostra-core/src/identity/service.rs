//! Identity manager.
//!
//! Resolves "who is acting", creates accounts with their paired profiles,
//! and owns the current-session pointer. Everything is built on injected
//! repository traits so the storage backend can be swapped without
//! touching this logic.

use std::sync::Arc;

use crate::account::{Account, AccountRepository};
use crate::error::{Result, RostraError};
use crate::profile::{Profile, ProfileRepository, ProfileUpdate};
use crate::state::StateRepository;

use super::credential::CredentialHasher;

/// Account lifecycle and session-pointer operations.
pub struct IdentityManager {
    accounts: Arc<dyn AccountRepository>,
    profiles: Arc<dyn ProfileRepository>,
    state: Arc<dyn StateRepository>,
    hasher: Arc<dyn CredentialHasher>,
}

impl IdentityManager {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        profiles: Arc<dyn ProfileRepository>,
        state: Arc<dyn StateRepository>,
        hasher: Arc<dyn CredentialHasher>,
    ) -> Self {
        Self {
            accounts,
            profiles,
            state,
            hasher,
        }
    }

    /// Resolves the current-session pointer to an account.
    ///
    /// A missing or dangling pointer resolves to `None`; a dangling
    /// pointer indicates stale data, not an error.
    pub async fn current_session(&self) -> Result<Option<Account>> {
        let Some(account_id) = self.state.current_account().await? else {
            return Ok(None);
        };

        let accounts = self.accounts.get_all().await?;
        let account = accounts.into_iter().find(|a| a.id == account_id);
        if account.is_none() {
            tracing::warn!(%account_id, "session pointer references a missing account");
        }
        Ok(account)
    }

    /// Creates an account and its paired profile, then signs the new
    /// account in.
    ///
    /// The two collections are written in sequence; there is no
    /// cross-collection transaction (accepted narrow race for a local
    /// single-user store).
    pub async fn sign_up(&self, email: &str, secret: &str, username: &str) -> Result<(Account, Profile)> {
        let email = email.trim();
        let username = username.trim();
        if email.is_empty() {
            return Err(RostraError::validation("email must not be empty"));
        }
        if secret.is_empty() {
            return Err(RostraError::validation("password must not be empty"));
        }
        if username.is_empty() {
            return Err(RostraError::validation("username must not be empty"));
        }

        let mut accounts = self.accounts.get_all().await?;
        if accounts.iter().any(|a| a.email_matches(email)) {
            return Err(RostraError::duplicate_account(email));
        }

        let now = chrono::Utc::now().to_rfc3339();
        let account = Account {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            credential: self.hasher.hash(secret),
            created_at: now.clone(),
        };
        let profile = Profile::new_for_account(&account.id, username, &now);

        accounts.push(account.clone());
        self.accounts.save_all(&accounts).await?;

        let mut profiles = self.profiles.get_all().await?;
        profiles.push(profile.clone());
        self.profiles.save_all(&profiles).await?;

        self.state.set_current_account(&account.id).await?;
        tracing::debug!(account_id = %account.id, "account created");

        Ok((account, profile))
    }

    /// Signs an existing account in.
    ///
    /// Fails with `InvalidCredential` on an unknown email or a secret
    /// mismatch, without revealing which.
    pub async fn sign_in(&self, email: &str, secret: &str) -> Result<Account> {
        let email = email.trim();
        if email.is_empty() || secret.is_empty() {
            return Err(RostraError::validation(
                "email and password must not be empty",
            ));
        }

        let accounts = self.accounts.get_all().await?;
        let account = accounts
            .into_iter()
            .find(|a| a.email_matches(email))
            .ok_or(RostraError::InvalidCredential)?;

        if !self.hasher.verify(secret, &account.credential) {
            return Err(RostraError::InvalidCredential);
        }

        self.state.set_current_account(&account.id).await?;
        Ok(account)
    }

    /// Clears the session pointer. Deletes nothing else.
    pub async fn sign_out(&self) -> Result<()> {
        self.state.clear_current_account().await
    }

    /// Merges a partial edit into a profile and stamps its update time.
    pub async fn update_profile(&self, account_id: &str, update: ProfileUpdate) -> Result<Profile> {
        let mut profiles = self.profiles.get_all().await?;
        let profile = profiles
            .iter_mut()
            .find(|p| p.id == account_id)
            .ok_or_else(|| RostraError::not_found("profile", account_id))?;

        let now = chrono::Utc::now().to_rfc3339();
        profile.apply(update, &now);
        let updated = profile.clone();

        self.profiles.save_all(&profiles).await?;
        Ok(updated)
    }

    /// All profiles, in storage order. Standings are the ranking engine's
    /// job.
    pub async fn list_profiles(&self) -> Result<Vec<Profile>> {
        self.profiles.get_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::RankTitle;
    use crate::test_support::{memory_identity, MemoryAccounts, MemoryProfiles, MemoryState, PlainHasher};

    #[tokio::test]
    async fn test_sign_up_creates_account_profile_and_session() {
        let identity = memory_identity();

        let (account, profile) = identity
            .sign_up("a@example.com", "secret", "rhetor")
            .await
            .unwrap();

        assert_eq!(profile.id, account.id);
        assert_eq!(profile.username, "rhetor");
        assert_eq!(profile.total_debates, 0);
        assert_eq!(profile.wins, 0);
        assert_eq!(profile.total_score, 0);
        assert_eq!(profile.rank, RankTitle::Novice);
        assert_ne!(account.credential, "secret");

        let session = identity.current_session().await.unwrap();
        assert_eq!(session.map(|a| a.id), Some(account.id));
    }

    #[tokio::test]
    async fn test_sign_up_rejects_duplicate_email_case_insensitively() {
        let identity = memory_identity();
        identity
            .sign_up("User@Example.com", "secret", "first")
            .await
            .unwrap();

        let err = identity
            .sign_up("user@example.com", "other", "second")
            .await
            .unwrap_err();
        assert!(matches!(err, RostraError::DuplicateAccount { .. }));

        // No partial writes.
        assert_eq!(identity.list_profiles().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sign_up_rejects_empty_fields() {
        let identity = memory_identity();
        assert!(identity.sign_up("", "secret", "name").await.unwrap_err().is_validation());
        assert!(identity.sign_up("a@b.c", "", "name").await.unwrap_err().is_validation());
        assert!(identity.sign_up("a@b.c", "secret", "  ").await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_sign_in_verifies_secret() {
        let identity = memory_identity();
        identity
            .sign_up("a@example.com", "secret", "rhetor")
            .await
            .unwrap();
        identity.sign_out().await.unwrap();
        assert!(identity.current_session().await.unwrap().is_none());

        let err = identity.sign_in("a@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, RostraError::InvalidCredential));
        let err = identity.sign_in("nobody@example.com", "secret").await.unwrap_err();
        assert!(matches!(err, RostraError::InvalidCredential));

        let account = identity.sign_in("A@EXAMPLE.COM", "secret").await.unwrap();
        let session = identity.current_session().await.unwrap();
        assert_eq!(session.map(|a| a.id), Some(account.id));
    }

    #[tokio::test]
    async fn test_dangling_session_pointer_resolves_to_none() {
        let accounts = std::sync::Arc::new(MemoryAccounts::default());
        let profiles = std::sync::Arc::new(MemoryProfiles::default());
        let state = std::sync::Arc::new(MemoryState::default());
        state.set_current_account("gone").await.unwrap();

        let identity = IdentityManager::new(accounts, profiles, state, std::sync::Arc::new(PlainHasher));
        assert!(identity.current_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_profile_merges_and_stamps() {
        let identity = memory_identity();
        let (account, profile) = identity
            .sign_up("a@example.com", "secret", "rhetor")
            .await
            .unwrap();

        let updated = identity
            .update_profile(
                &account.id,
                ProfileUpdate {
                    username: Some("orator".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.username, "orator");
        assert_eq!(updated.created_at, profile.created_at);
        assert!(updated.updated_at >= profile.updated_at);
    }

    #[tokio::test]
    async fn test_update_profile_missing_id_is_not_found() {
        let identity = memory_identity();
        let err = identity
            .update_profile("missing", ProfileUpdate::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
