//! Debate domain module.
//!
//! A debate record plus its append-only message transcript.

pub mod message;
pub mod model;
pub mod repository;

pub use message::{DebateMessage, Sender};
pub use model::{Debate, DebateCompletion, DebateStatus};
pub use repository::{DebateRepository, MessageRepository};
