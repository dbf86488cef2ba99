//! AI debate partner boundary.
//!
//! The session consumes opponents through this trait; implementations may
//! call a hosted model or run entirely offline. Failures are absorbed by
//! the session per its recovery rules, never retried here.

use serde::{Deserialize, Serialize};
use strum_macros::Display;
use thiserror::Error;

use crate::debate::DebateMessage;
use crate::error::RostraError;
use crate::persona::Persona;

/// A debate partner call failed (network, timeout, malformed response).
#[derive(Error, Debug, Clone)]
#[error("{0}")]
pub struct ProviderError(pub String);

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<ProviderError> for RostraError {
    fn from(err: ProviderError) -> Self {
        RostraError::Provider(err.0)
    }
}

/// One reply from the partner, carrying the AI side's per-turn points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerReply {
    pub content: String,
    pub score_impact: u32,
}

/// Declared winner of a scored transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Winner {
    User,
    Ai,
    Draw,
}

/// The judge's assessment of a finished transcript.
///
/// Scores are on a 0-100 scale per side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateVerdict {
    pub user_score: u32,
    pub ai_score: u32,
    pub justification: String,
    pub winner: Winner,
}

/// The AI opponent and judge.
#[async_trait::async_trait]
pub trait DebatePartner: Send + Sync {
    /// Produces the opening line for a fresh debate.
    async fn open_debate(&self, persona: &Persona, topic: &str)
        -> Result<String, ProviderError>;

    /// Produces the rebuttal to the user's latest argument.
    ///
    /// `transcript` is the conversation so far, including the user message
    /// being answered.
    async fn reply_to_turn(
        &self,
        persona: &Persona,
        topic: &str,
        transcript: &[DebateMessage],
        user_text: &str,
    ) -> Result<PartnerReply, ProviderError>;

    /// Judges the full transcript and declares final scores.
    async fn score_transcript(
        &self,
        transcript: &[DebateMessage],
        topic: &str,
        persona: &Persona,
    ) -> Result<DebateVerdict, ProviderError>;
}

/// Per-turn scoring of the user's arguments.
///
/// Pure and infallible: the user message must carry its points before the
/// partner's reply resolves (or fails), so this cannot depend on the
/// reply call.
pub trait TurnScorer: Send + Sync {
    /// Points a single argument contributes to the user's running score.
    /// Bounded, non-negative.
    fn score_turn(&self, content: &str) -> u32;
}
