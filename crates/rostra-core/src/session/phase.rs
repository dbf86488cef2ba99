//! Session phases.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Where a debate run currently stands.
///
/// `SelectingPersona → Debating → Scoring → Results`, with a side path
/// `Results → Leaderboard` and a restart path back to `SelectingPersona`
/// from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    SelectingPersona,
    Debating,
    Scoring,
    Results,
    Leaderboard,
}
