//! The local store: every collection repository over one base directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rostra_core::error::Result;
use rostra_core::identity::IdentityManager;

use crate::credential::Sha256CredentialHasher;
use crate::latency::Latency;
use crate::paths::RostraPaths;
use crate::repository::{
    JsonAccountRepository, JsonAnalysisRepository, JsonDebateRepository, JsonMessageRepository,
    JsonProfileRepository,
};
use crate::state_repository::JsonStateRepository;

/// All six collection repositories, backed by JSON files under one
/// directory.
pub struct LocalStore {
    pub accounts: Arc<JsonAccountRepository>,
    pub profiles: Arc<JsonProfileRepository>,
    pub debates: Arc<JsonDebateRepository>,
    pub messages: Arc<JsonMessageRepository>,
    pub analyses: Arc<JsonAnalysisRepository>,
    pub state: Arc<JsonStateRepository>,
}

impl LocalStore {
    /// Opens the store under `base_dir` with the given latency.
    pub fn open(base_dir: impl AsRef<Path>, latency: Latency) -> Self {
        let base_dir: PathBuf = base_dir.as_ref().to_path_buf();
        tracing::debug!(base_dir = %base_dir.display(), "opening local store");
        Self {
            accounts: Arc::new(JsonAccountRepository::new(&base_dir, latency)),
            profiles: Arc::new(JsonProfileRepository::new(&base_dir, latency)),
            debates: Arc::new(JsonDebateRepository::new(&base_dir, latency)),
            messages: Arc::new(JsonMessageRepository::new(&base_dir, latency)),
            analyses: Arc::new(JsonAnalysisRepository::new(&base_dir, latency)),
            state: Arc::new(JsonStateRepository::new(&base_dir, latency)),
        }
    }

    /// Opens the store at the default platform location with the default
    /// latency.
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(RostraPaths::config_dir()?, Latency::default()))
    }

    /// Builds an identity manager over this store with the salted SHA-256
    /// hasher.
    pub fn identity(&self) -> IdentityManager {
        IdentityManager::new(
            self.accounts.clone(),
            self.profiles.clone(),
            self.state.clone(),
            Arc::new(Sha256CredentialHasher),
        )
    }
}
