//! Voice I/O boundary.
//!
//! Optional speech output/input. The state machine never calls this;
//! event consumers decide whether a turn is spoken, and the input path
//! feeds transcripts into the pending-argument field exactly like typing.

use crate::error::Result;

/// One-shot speech synthesis and recognition.
#[async_trait::async_trait]
pub trait VoiceLink: Send + Sync {
    /// Speaks a line. `voice_hint` names a preferred voice; implementations
    /// may ignore it.
    async fn speak(&self, text: &str, voice_hint: Option<&str>);

    /// Listens once and returns the transcript. Non-continuous.
    async fn listen(&self) -> Result<String>;
}
