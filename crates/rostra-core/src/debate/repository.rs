//! Debate and message repository traits.

use super::message::DebateMessage;
use super::model::Debate;
use crate::error::Result;

/// An abstract repository for the debate collection.
#[async_trait::async_trait]
pub trait DebateRepository: Send + Sync {
    /// Retrieves all debates from storage.
    async fn get_all(&self) -> Result<Vec<Debate>>;

    /// Saves all debates to storage, replacing the existing collection.
    async fn save_all(&self, debates: &[Debate]) -> Result<()>;
}

/// An abstract repository for the debate-message collection.
///
/// Messages are append-only; "replace all" is still the storage contract,
/// so appends are load-push-save sequences performed by the session, which
/// awaits each store call before accepting the next turn.
#[async_trait::async_trait]
pub trait MessageRepository: Send + Sync {
    /// Retrieves all messages from storage.
    async fn get_all(&self) -> Result<Vec<DebateMessage>>;

    /// Saves all messages to storage, replacing the existing collection.
    async fn save_all(&self, messages: &[DebateMessage]) -> Result<()>;
}
