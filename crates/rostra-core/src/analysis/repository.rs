//! Analysis repository trait.

use super::model::MediaAnalysis;
use crate::error::Result;

/// An abstract repository for the saved-analysis collection.
#[async_trait::async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// Retrieves all analyses from storage.
    async fn get_all(&self) -> Result<Vec<MediaAnalysis>>;

    /// Saves all analyses to storage, replacing the existing collection.
    async fn save_all(&self, analyses: &[MediaAnalysis]) -> Result<()>;
}
