//! Session-pointer repository implementation.
//!
//! Persists the "who is signed in" pointer in `session.json`. Clearing
//! the pointer removes the file, so a signed-out store has no stale
//! pointer record.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use rostra_core::error::Result;
use rostra_core::state::StateRepository;

use crate::latency::Latency;
use crate::storage::AtomicJsonFile;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionPointer {
    account_id: String,
}

/// JSON-file session-pointer repository.
pub struct JsonStateRepository {
    file: AtomicJsonFile<SessionPointer>,
    path: PathBuf,
    latency: Latency,
}

impl JsonStateRepository {
    pub fn new(base_dir: &Path, latency: Latency) -> Self {
        let path = base_dir.join("session.json");
        Self {
            file: AtomicJsonFile::new(path.clone(), "session"),
            path,
            latency,
        }
    }
}

#[async_trait::async_trait]
impl StateRepository for JsonStateRepository {
    async fn current_account(&self) -> Result<Option<String>> {
        self.latency.pause().await;
        Ok(self.file.load()?.map(|pointer| pointer.account_id))
    }

    async fn set_current_account(&self, account_id: &str) -> Result<()> {
        self.latency.pause().await;
        self.file.save(&SessionPointer {
            account_id: account_id.to_string(),
        })
    }

    async fn clear_current_account(&self) -> Result<()> {
        self.latency.pause().await;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
