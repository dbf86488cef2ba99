//! Deterministic per-turn scoring.

use rostra_core::session::TurnScorer;

/// Floor points for any non-empty argument.
const BASE: u32 = 5;
/// Ceiling for a single turn.
const CAP: u32 = 19;

/// Scores a turn from its word count.
///
/// Deterministic so the same transcript always produces the same running
/// score.
pub struct HeuristicTurnScorer;

impl TurnScorer for HeuristicTurnScorer {
    fn score_turn(&self, content: &str) -> u32 {
        let words = content.split_whitespace().count() as u32;
        (BASE + words / 4).min(CAP)
    }
}
