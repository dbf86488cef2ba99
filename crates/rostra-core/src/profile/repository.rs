//! Profile repository trait.

use super::model::Profile;
use crate::error::Result;

/// An abstract repository for the profile collection.
///
/// Snapshot-shaped like the other collection repositories: read-all and
/// replace-all, one in-flight mutating call at a time.
#[async_trait::async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Retrieves all profiles from storage. Ordering is not part of the
    /// contract; standings are the ranking engine's job.
    async fn get_all(&self) -> Result<Vec<Profile>>;

    /// Saves all profiles to storage, replacing the existing collection.
    async fn save_all(&self, profiles: &[Profile]) -> Result<()>;
}
