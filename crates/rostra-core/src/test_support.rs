//! In-memory doubles shared by the unit tests.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::account::{Account, AccountRepository};
use crate::debate::{Debate, DebateMessage, DebateRepository, MessageRepository};
use crate::error::Result;
use crate::identity::{CredentialHasher, IdentityManager};
use crate::persona::Persona;
use crate::profile::{Profile, ProfileRepository};
use crate::session::{
    DebatePartner, DebateSession, DebateVerdict, PartnerReply, ProviderError, SessionEvent,
    TurnScorer, Winner,
};
use crate::state::StateRepository;

#[derive(Default)]
pub struct MemoryAccounts {
    records: Mutex<Vec<Account>>,
}

#[async_trait::async_trait]
impl AccountRepository for MemoryAccounts {
    async fn get_all(&self) -> Result<Vec<Account>> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn save_all(&self, accounts: &[Account]) -> Result<()> {
        *self.records.lock().unwrap() = accounts.to_vec();
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryProfiles {
    records: Mutex<Vec<Profile>>,
}

#[async_trait::async_trait]
impl ProfileRepository for MemoryProfiles {
    async fn get_all(&self) -> Result<Vec<Profile>> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn save_all(&self, profiles: &[Profile]) -> Result<()> {
        *self.records.lock().unwrap() = profiles.to_vec();
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryDebates {
    records: Mutex<Vec<Debate>>,
}

#[async_trait::async_trait]
impl DebateRepository for MemoryDebates {
    async fn get_all(&self) -> Result<Vec<Debate>> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn save_all(&self, debates: &[Debate]) -> Result<()> {
        *self.records.lock().unwrap() = debates.to_vec();
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryMessages {
    records: Mutex<Vec<DebateMessage>>,
}

#[async_trait::async_trait]
impl MessageRepository for MemoryMessages {
    async fn get_all(&self) -> Result<Vec<DebateMessage>> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn save_all(&self, messages: &[DebateMessage]) -> Result<()> {
        *self.records.lock().unwrap() = messages.to_vec();
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryState {
    pointer: Mutex<Option<String>>,
}

#[async_trait::async_trait]
impl StateRepository for MemoryState {
    async fn current_account(&self) -> Result<Option<String>> {
        Ok(self.pointer.lock().unwrap().clone())
    }

    async fn set_current_account(&self, account_id: &str) -> Result<()> {
        *self.pointer.lock().unwrap() = Some(account_id.to_string());
        Ok(())
    }

    async fn clear_current_account(&self) -> Result<()> {
        *self.pointer.lock().unwrap() = None;
        Ok(())
    }
}

/// Transparent "hash" for tests; real hashing is an infrastructure
/// concern.
pub struct PlainHasher;

impl CredentialHasher for PlainHasher {
    fn hash(&self, secret: &str) -> String {
        format!("plain${}", secret)
    }

    fn verify(&self, secret: &str, stored: &str) -> bool {
        stored == self.hash(secret)
    }
}

/// Identity manager over fresh in-memory repositories.
pub fn memory_identity() -> IdentityManager {
    IdentityManager::new(
        Arc::new(MemoryAccounts::default()),
        Arc::new(MemoryProfiles::default()),
        Arc::new(MemoryState::default()),
        Arc::new(PlainHasher),
    )
}

/// Scripted partner with switchable failure modes.
#[derive(Default)]
pub struct StubPartner {
    reply_failure: Mutex<bool>,
    scoring_failure: Mutex<bool>,
    verdict: Mutex<Option<DebateVerdict>>,
}

impl StubPartner {
    pub const REPLY_IMPACT: u32 = 8;

    pub fn fail_replies(&self, fail: bool) {
        *self.reply_failure.lock().unwrap() = fail;
    }

    pub fn fail_scoring(&self, fail: bool) {
        *self.scoring_failure.lock().unwrap() = fail;
    }

    pub fn set_verdict(&self, verdict: DebateVerdict) {
        *self.verdict.lock().unwrap() = Some(verdict);
    }
}

#[async_trait::async_trait]
impl DebatePartner for StubPartner {
    async fn open_debate(&self, persona: &Persona, topic: &str) -> std::result::Result<String, ProviderError> {
        Ok(format!(
            "I am the {}. I will argue against the motion: \"{}\".",
            persona.name, topic
        ))
    }

    async fn reply_to_turn(
        &self,
        _persona: &Persona,
        _topic: &str,
        _transcript: &[DebateMessage],
        _user_text: &str,
    ) -> std::result::Result<PartnerReply, ProviderError> {
        if *self.reply_failure.lock().unwrap() {
            return Err(ProviderError::new("stubbed reply failure"));
        }
        Ok(PartnerReply {
            content: "Have you considered the counterargument?".to_string(),
            score_impact: Self::REPLY_IMPACT,
        })
    }

    async fn score_transcript(
        &self,
        _transcript: &[DebateMessage],
        _topic: &str,
        _persona: &Persona,
    ) -> std::result::Result<DebateVerdict, ProviderError> {
        if *self.scoring_failure.lock().unwrap() {
            return Err(ProviderError::new("stubbed judge failure"));
        }
        Ok(self.verdict.lock().unwrap().clone().unwrap_or(DebateVerdict {
            user_score: 50,
            ai_score: 50,
            justification: "Evenly matched.".to_string(),
            winner: Winner::Draw,
        }))
    }
}

/// Constant per-turn score for predictable assertions.
pub struct FixedScorer(pub u32);

impl TurnScorer for FixedScorer {
    fn score_turn(&self, _content: &str) -> u32 {
        self.0
    }
}

/// Everything a session test needs, with a signed-in account.
pub struct SessionFixture {
    pub identity: Arc<IdentityManager>,
    pub debates: Arc<MemoryDebates>,
    pub messages: Arc<MemoryMessages>,
    pub partner: Arc<StubPartner>,
    turn_impact: u32,
}

impl SessionFixture {
    pub fn session(&self) -> (DebateSession, mpsc::UnboundedReceiver<SessionEvent>) {
        DebateSession::new(
            Arc::clone(&self.identity),
            self.debates.clone(),
            self.messages.clone(),
            self.partner.clone(),
            Arc::new(FixedScorer(self.turn_impact)),
        )
    }

    pub fn persona(&self) -> Persona {
        Persona::new("Pragmatic Scientist", "Focuses on data and evidence.")
    }

    pub fn turn_impact(&self) -> u32 {
        self.turn_impact
    }
}

/// Builds a fixture with one signed-up account (`debater@example.com`).
pub async fn memory_session() -> SessionFixture {
    let identity = Arc::new(memory_identity());
    identity
        .sign_up("debater@example.com", "secret", "debater")
        .await
        .expect("fixture sign-up succeeds");

    SessionFixture {
        identity,
        debates: Arc::new(MemoryDebates::default()),
        messages: Arc::new(MemoryMessages::default()),
        partner: Arc::new(StubPartner::default()),
        turn_impact: 10,
    }
}
