//! JSON-file repository implementations.
//!
//! One file per named collection, read and replaced as a whole snapshot.
//! Every call pauses for the configured [`Latency`] first.

use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use rostra_core::account::{Account, AccountRepository};
use rostra_core::analysis::{AnalysisRepository, MediaAnalysis};
use rostra_core::debate::{Debate, DebateMessage, DebateRepository, MessageRepository};
use rostra_core::error::Result;
use rostra_core::profile::{Profile, ProfileRepository};

use crate::latency::Latency;
use crate::storage::AtomicJsonFile;

/// Snapshot access to one collection file.
pub(crate) struct JsonCollection<T> {
    file: AtomicJsonFile<Vec<T>>,
    latency: Latency,
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    pub(crate) fn new(base_dir: &Path, collection: &'static str, latency: Latency) -> Self {
        let path = base_dir.join(format!("{}.json", collection));
        Self {
            file: AtomicJsonFile::new(path, collection),
            latency,
        }
    }

    pub(crate) async fn load(&self) -> Result<Vec<T>> {
        self.latency.pause().await;
        Ok(self.file.load()?.unwrap_or_default())
    }

    pub(crate) async fn replace(&self, records: &[T]) -> Result<()> {
        self.latency.pause().await;
        self.file.save(&records.to_vec())
    }
}

/// JSON-file account repository (`accounts.json`).
pub struct JsonAccountRepository {
    collection: JsonCollection<Account>,
}

impl JsonAccountRepository {
    pub fn new(base_dir: &Path, latency: Latency) -> Self {
        Self {
            collection: JsonCollection::new(base_dir, "accounts", latency),
        }
    }
}

#[async_trait::async_trait]
impl AccountRepository for JsonAccountRepository {
    async fn get_all(&self) -> Result<Vec<Account>> {
        self.collection.load().await
    }

    async fn save_all(&self, accounts: &[Account]) -> Result<()> {
        self.collection.replace(accounts).await
    }
}

/// JSON-file profile repository (`profiles.json`).
pub struct JsonProfileRepository {
    collection: JsonCollection<Profile>,
}

impl JsonProfileRepository {
    pub fn new(base_dir: &Path, latency: Latency) -> Self {
        Self {
            collection: JsonCollection::new(base_dir, "profiles", latency),
        }
    }
}

#[async_trait::async_trait]
impl ProfileRepository for JsonProfileRepository {
    async fn get_all(&self) -> Result<Vec<Profile>> {
        self.collection.load().await
    }

    async fn save_all(&self, profiles: &[Profile]) -> Result<()> {
        self.collection.replace(profiles).await
    }
}

/// JSON-file debate repository (`debates.json`).
pub struct JsonDebateRepository {
    collection: JsonCollection<Debate>,
}

impl JsonDebateRepository {
    pub fn new(base_dir: &Path, latency: Latency) -> Self {
        Self {
            collection: JsonCollection::new(base_dir, "debates", latency),
        }
    }
}

#[async_trait::async_trait]
impl DebateRepository for JsonDebateRepository {
    async fn get_all(&self) -> Result<Vec<Debate>> {
        self.collection.load().await
    }

    async fn save_all(&self, debates: &[Debate]) -> Result<()> {
        self.collection.replace(debates).await
    }
}

/// JSON-file message repository (`messages.json`).
pub struct JsonMessageRepository {
    collection: JsonCollection<DebateMessage>,
}

impl JsonMessageRepository {
    pub fn new(base_dir: &Path, latency: Latency) -> Self {
        Self {
            collection: JsonCollection::new(base_dir, "messages", latency),
        }
    }
}

#[async_trait::async_trait]
impl MessageRepository for JsonMessageRepository {
    async fn get_all(&self) -> Result<Vec<DebateMessage>> {
        self.collection.load().await
    }

    async fn save_all(&self, messages: &[DebateMessage]) -> Result<()> {
        self.collection.replace(messages).await
    }
}

/// JSON-file analysis repository (`analyses.json`).
pub struct JsonAnalysisRepository {
    collection: JsonCollection<MediaAnalysis>,
}

impl JsonAnalysisRepository {
    pub fn new(base_dir: &Path, latency: Latency) -> Self {
        Self {
            collection: JsonCollection::new(base_dir, "analyses", latency),
        }
    }
}

#[async_trait::async_trait]
impl AnalysisRepository for JsonAnalysisRepository {
    async fn get_all(&self) -> Result<Vec<MediaAnalysis>> {
        self.collection.load().await
    }

    async fn save_all(&self, analyses: &[MediaAnalysis]) -> Result<()> {
        self.collection.replace(analyses).await
    }
}
