//! Rostra interaction adapters.
//!
//! Implementations of the core's boundary traits: an offline scripted
//! debate partner with a heuristic judge, the deterministic turn scorer,
//! and voice adapters. A hosted-model partner would slot in behind the
//! same `DebatePartner` trait.

pub mod scorer;
pub mod scripted;
pub mod voice;

pub use scorer::HeuristicTurnScorer;
pub use scripted::ScriptedPartner;
pub use voice::{ConsoleVoice, SilentVoice};
