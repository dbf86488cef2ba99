//! Session events.
//!
//! The state machine publishes these instead of rendering or speaking;
//! a consumer decides what to do with each one.

use serde::{Deserialize, Serialize};

use crate::debate::Sender;

use super::phase::Phase;

/// High-level events published by a debate session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// The session moved to a new phase.
    PhaseChanged { phase: Phase },
    /// A message entered the transcript (either side).
    TurnReceived { sender: Sender, content: String },
    /// The once-per-second elapsed-time counter advanced.
    Tick { elapsed_seconds: u64 },
}
