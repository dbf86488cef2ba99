//! Debate message model.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Which side authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Sender {
    User,
    Ai,
}

/// One message in a debate transcript.
///
/// Messages are append-only; within a debate, append order equals
/// chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateMessage {
    /// Unique identifier (UUID format)
    pub id: String,
    /// Owning debate id.
    pub debate_id: String,
    pub sender: Sender,
    pub content: String,
    /// Points this message contributes to its sender's running score.
    pub score_impact: u32,
    /// Timestamp when the message was appended (RFC 3339 format)
    pub timestamp: String,
}

impl DebateMessage {
    pub fn new(debate_id: &str, sender: Sender, content: &str, score_impact: u32, now: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            debate_id: debate_id.to_string(),
            sender,
            content: content.to_string(),
            score_impact,
            timestamp: now.to_string(),
        }
    }
}
