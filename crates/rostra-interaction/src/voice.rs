//! Voice adapters.
//!
//! The state machine never calls these; event consumers do. `SilentVoice`
//! is the default, `ConsoleVoice` stands in for a real speech stack on a
//! terminal.

use std::time::Duration;

use rostra_core::error::{Result, RostraError};
use rostra_core::session::VoiceLink;

/// Transcript returned by [`ConsoleVoice::listen`], standing in for real
/// speech recognition.
const CANNED_TRANSCRIPT: &str =
    "I believe this is an important issue that requires careful consideration.";

/// Discards speech output and has no input.
#[derive(Default)]
pub struct SilentVoice;

#[async_trait::async_trait]
impl VoiceLink for SilentVoice {
    async fn speak(&self, _text: &str, _voice_hint: Option<&str>) {}

    async fn listen(&self) -> Result<String> {
        Err(RostraError::validation(
            "speech recognition is not available",
        ))
    }
}

/// Prints spoken lines to the terminal and returns a canned transcript
/// after a short listening pause.
#[derive(Default)]
pub struct ConsoleVoice;

#[async_trait::async_trait]
impl VoiceLink for ConsoleVoice {
    async fn speak(&self, text: &str, voice_hint: Option<&str>) {
        match voice_hint {
            Some(hint) => println!("🔊 ({}) {}", hint, text),
            None => println!("🔊 {}", text),
        }
    }

    async fn listen(&self) -> Result<String> {
        tokio::time::sleep(Duration::from_millis(500)).await;
        Ok(CANNED_TRANSCRIPT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_silent_voice_has_no_input() {
        assert!(SilentVoice.listen().await.is_err());
    }

    #[tokio::test]
    async fn test_console_voice_returns_a_transcript() {
        let transcript = ConsoleVoice.listen().await.unwrap();
        assert!(!transcript.is_empty());
    }
}
