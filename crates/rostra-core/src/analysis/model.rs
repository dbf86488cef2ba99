//! Media analysis model.

use serde::{Deserialize, Serialize};

/// A saved analysis of a debate topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAnalysis {
    /// Unique identifier (UUID format)
    pub id: String,
    /// Owning account id.
    pub account_id: String,
    pub topic: String,
    pub summary: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    /// Estimated engagement potential, 0-100.
    pub sentiment_score: u32,
    /// Timestamp when the analysis was saved (RFC 3339 format)
    pub created_at: String,
}

impl MediaAnalysis {
    pub fn new(
        account_id: &str,
        topic: &str,
        summary: &str,
        pros: Vec<String>,
        cons: Vec<String>,
        sentiment_score: u32,
        now: &str,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            account_id: account_id.to_string(),
            topic: topic.to_string(),
            summary: summary.to_string(),
            pros,
            cons,
            sentiment_score,
            created_at: now.to_string(),
        }
    }
}
