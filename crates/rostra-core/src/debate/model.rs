//! Debate domain model.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Lifecycle status of a debate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DebateStatus {
    Ongoing,
    Completed,
}

/// One practice debate.
///
/// Created at session start with zero scores, mutated exactly once at
/// completion, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debate {
    /// Unique identifier (UUID format)
    pub id: String,
    /// Owning account id. Must reference an account that existed at
    /// creation time.
    pub account_id: String,
    /// Debate motion. Non-empty.
    pub topic: String,
    /// Name of the AI persona argued against.
    pub persona: String,
    pub status: DebateStatus,
    pub user_score: u32,
    pub ai_score: u32,
    pub duration_seconds: u64,
    /// Feedback shown on the results screen. Empty until completion.
    pub feedback: String,
    /// Timestamp when the debate was created (RFC 3339 format)
    pub created_at: String,
    /// Present iff `status` is `Completed`.
    pub completed_at: Option<String>,
}

impl Debate {
    /// Creates a fresh ongoing debate for an account.
    pub fn start(account_id: &str, topic: &str, persona: &str, now: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            account_id: account_id.to_string(),
            topic: topic.to_string(),
            persona: persona.to_string(),
            status: DebateStatus::Ongoing,
            user_score: 0,
            ai_score: 0,
            duration_seconds: 0,
            feedback: String::new(),
            created_at: now.to_string(),
            completed_at: None,
        }
    }

    /// Applies the one-and-only completion mutation.
    pub fn complete(&mut self, completion: DebateCompletion) {
        self.status = DebateStatus::Completed;
        self.user_score = completion.user_score;
        self.ai_score = completion.ai_score;
        self.duration_seconds = completion.duration_seconds;
        self.feedback = completion.feedback;
        self.completed_at = Some(completion.completed_at);
    }
}

/// The final values written to a debate when it completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateCompletion {
    pub user_score: u32,
    pub ai_score: u32,
    pub duration_seconds: u64,
    pub feedback: String,
    pub completed_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_is_ongoing_with_zero_scores() {
        let debate = Debate::start("acc-1", "Motion", "Pragmatic Scientist", "2024-01-01T00:00:00Z");
        assert_eq!(debate.status, DebateStatus::Ongoing);
        assert_eq!(debate.user_score, 0);
        assert_eq!(debate.ai_score, 0);
        assert_eq!(debate.duration_seconds, 0);
        assert!(debate.completed_at.is_none());
        assert!(debate.feedback.is_empty());
    }

    #[test]
    fn test_complete_stamps_final_fields() {
        let mut debate =
            Debate::start("acc-1", "Motion", "Skeptical Journalist", "2024-01-01T00:00:00Z");
        debate.complete(DebateCompletion {
            user_score: 80,
            ai_score: 40,
            duration_seconds: 95,
            feedback: "Well argued.".to_string(),
            completed_at: "2024-01-01T00:05:00Z".to_string(),
        });

        assert_eq!(debate.status, DebateStatus::Completed);
        assert_eq!(debate.user_score, 80);
        assert_eq!(debate.ai_score, 40);
        assert_eq!(debate.duration_seconds, 95);
        assert_eq!(debate.completed_at.as_deref(), Some("2024-01-01T00:05:00Z"));
    }
}
