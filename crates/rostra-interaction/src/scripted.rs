//! Offline scripted debate partner.
//!
//! Works without any network: rebuttals come from a canned pool and the
//! judge derives final scores from the transcript's per-turn impacts.
//! Tagged as the no-network fallback; a hosted-model partner implements
//! the same trait.

use std::time::Duration;

use rand::Rng;

use rostra_core::debate::{DebateMessage, Sender};
use rostra_core::persona::Persona;
use rostra_core::session::{DebatePartner, DebateVerdict, PartnerReply, ProviderError, Winner};

const REBUTTALS: &[&str] = &[
    "That's an interesting point, but have you considered the counterargument that the evidence cuts both ways?",
    "I appreciate your perspective, however, the evidence suggests otherwise.",
    "While I understand your reasoning, there are several flaws in that logic.",
    "That's a compelling argument, but let me challenge you with this: what happens at scale?",
    "I see where you're coming from, but the data shows a different picture.",
];

/// Lower bound of a reply's per-turn points.
const MIN_IMPACT: u32 = 5;
/// Upper bound (inclusive) of a reply's per-turn points.
const MAX_IMPACT: u32 = 19;

/// A debate partner that runs entirely offline.
#[derive(Default)]
pub struct ScriptedPartner {
    thinking_delay: Duration,
}

impl ScriptedPartner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pauses before each rebuttal, shaping the "opponent is typing"
    /// state a hosted model would produce.
    pub fn with_thinking_delay(mut self, delay: Duration) -> Self {
        self.thinking_delay = delay;
        self
    }

    fn side_score(transcript: &[DebateMessage], sender: Sender) -> u32 {
        let total: u32 = transcript
            .iter()
            .filter(|m| m.sender == sender)
            .map(|m| m.score_impact)
            .sum();
        total.min(100)
    }
}

#[async_trait::async_trait]
impl DebatePartner for ScriptedPartner {
    async fn open_debate(&self, persona: &Persona, topic: &str) -> Result<String, ProviderError> {
        Ok(format!(
            "I am the {}. I will argue against the motion: \"{}\". State your first point.",
            persona.name, topic
        ))
    }

    async fn reply_to_turn(
        &self,
        _persona: &Persona,
        _topic: &str,
        transcript: &[DebateMessage],
        _user_text: &str,
    ) -> Result<PartnerReply, ProviderError> {
        if !self.thinking_delay.is_zero() {
            tokio::time::sleep(self.thinking_delay).await;
        }

        // Rotate through the pool so consecutive turns read differently.
        let content = REBUTTALS[transcript.len() % REBUTTALS.len()].to_string();
        let score_impact = rand::thread_rng().gen_range(MIN_IMPACT..=MAX_IMPACT);
        Ok(PartnerReply {
            content,
            score_impact,
        })
    }

    async fn score_transcript(
        &self,
        transcript: &[DebateMessage],
        topic: &str,
        persona: &Persona,
    ) -> Result<DebateVerdict, ProviderError> {
        let user_score = Self::side_score(transcript, Sender::User);
        let ai_score = Self::side_score(transcript, Sender::Ai);

        let winner = match user_score.cmp(&ai_score) {
            std::cmp::Ordering::Greater => Winner::User,
            std::cmp::Ordering::Less => Winner::Ai,
            std::cmp::Ordering::Equal => Winner::Draw,
        };

        let justification = match winner {
            Winner::User => format!(
                "On \"{}\", the user's arguments carried more weight than the {}'s rebuttals.",
                topic, persona.name
            ),
            Winner::Ai => format!(
                "On \"{}\", the {} presented the stronger counterarguments.",
                topic, persona.name
            ),
            Winner::Draw => format!("On \"{}\", both sides argued to a standstill.", topic),
        };

        Ok(DebateVerdict {
            user_score,
            ai_score,
            justification,
            winner,
        })
    }
}
