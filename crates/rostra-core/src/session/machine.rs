//! Debate session state machine.
//!
//! Drives one practice session: persona/topic selection, the live
//! exchange, judging, and the profile/leaderboard update on completion.
//! All storage and provider access goes through injected traits; progress
//! is reported on an event channel.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::debate::{
    Debate, DebateCompletion, DebateMessage, DebateRepository, MessageRepository, Sender,
};
use crate::error::{Result, RostraError};
use crate::identity::IdentityManager;
use crate::persona::Persona;
use crate::profile::{Profile, ProfileUpdate};
use crate::ranking::{self, RankTitle};

use super::event::SessionEvent;
use super::partner::{DebatePartner, DebateVerdict, TurnScorer};
use super::phase::Phase;

/// Appended in place of a reply when the partner fails mid-debate.
pub const APOLOGY_LINE: &str =
    "I seem to be having trouble formulating a response. Please try again.";

/// Results-screen feedback when the user out-scores the AI.
pub const WIN_FEEDBACK: &str = "Excellent debate! Your arguments were well-structured and \
     persuasive. Keep developing your critical thinking skills.";

/// Results-screen feedback otherwise.
pub const LOSS_FEEDBACK: &str = "Good effort! The AI presented stronger counterarguments this \
     time. Review the key points and try again.";

/// One debate run from selection to results.
///
/// Methods take `&mut self`: a session is driven by exactly one consumer,
/// and each storage call is awaited before the next submission is
/// accepted, so message append order equals submission order.
pub struct DebateSession {
    identity: Arc<IdentityManager>,
    debates: Arc<dyn DebateRepository>,
    messages: Arc<dyn MessageRepository>,
    partner: Arc<dyn DebatePartner>,
    scorer: Arc<dyn TurnScorer>,
    events: mpsc::UnboundedSender<SessionEvent>,

    phase: Phase,
    debate: Option<Debate>,
    persona: Option<Persona>,
    transcript: Vec<DebateMessage>,
    user_score: u32,
    ai_score: u32,
    verdict: Option<DebateVerdict>,
    /// Single-flight guard: no new submission while a reply is pending.
    awaiting_reply: bool,
    /// Seconds elapsed in the current run, advanced by the ticker task.
    elapsed: Arc<AtomicU64>,
    /// Invalidated on restart; in-flight provider calls race against it.
    cancel: CancellationToken,
    ticker: Option<CancellationToken>,
}

impl DebateSession {
    /// Creates a session in the selection phase, returning the machine and
    /// the receiving end of its event channel.
    pub fn new(
        identity: Arc<IdentityManager>,
        debates: Arc<dyn DebateRepository>,
        messages: Arc<dyn MessageRepository>,
        partner: Arc<dyn DebatePartner>,
        scorer: Arc<dyn TurnScorer>,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let session = Self {
            identity,
            debates,
            messages,
            partner,
            scorer,
            events,
            phase: Phase::SelectingPersona,
            debate: None,
            persona: None,
            transcript: Vec::new(),
            user_score: 0,
            ai_score: 0,
            verdict: None,
            awaiting_reply: false,
            elapsed: Arc::new(AtomicU64::new(0)),
            cancel: CancellationToken::new(),
            ticker: None,
        };
        (session, receiver)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn topic(&self) -> Option<&str> {
        self.debate.as_ref().map(|d| d.topic.as_str())
    }

    pub fn persona(&self) -> Option<&Persona> {
        self.persona.as_ref()
    }

    pub fn transcript(&self) -> &[DebateMessage] {
        &self.transcript
    }

    pub fn user_score(&self) -> u32 {
        self.user_score
    }

    pub fn ai_score(&self) -> u32 {
        self.ai_score
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed.load(Ordering::Relaxed)
    }

    pub fn verdict(&self) -> Option<&DebateVerdict> {
        self.verdict.as_ref()
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// Starts a debate on `topic` against `persona`.
    ///
    /// Requires the selection phase, a non-empty topic, and a signed-in
    /// account. The partner's opening line is fetched before anything is
    /// persisted, so a provider failure aborts with no record written.
    pub async fn start(&mut self, persona: Persona, topic: &str) -> Result<()> {
        if self.phase != Phase::SelectingPersona {
            return Err(RostraError::validation(format!(
                "cannot start a debate from the {} phase",
                self.phase
            )));
        }
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(RostraError::validation("topic must not be empty"));
        }
        let account = self
            .identity
            .current_session()
            .await?
            .ok_or(RostraError::Unauthenticated)?;

        let opening = self.partner.open_debate(&persona, topic).await?;

        let now = chrono::Utc::now().to_rfc3339();
        let debate = Debate::start(&account.id, topic, &persona.name, &now);

        let mut debates = self.debates.get_all().await?;
        debates.push(debate.clone());
        self.debates.save_all(&debates).await?;

        let opening_message = DebateMessage::new(&debate.id, Sender::Ai, &opening, 0, &now);
        self.persist_message(&opening_message).await?;

        tracing::debug!(debate_id = %debate.id, topic, persona = %persona.name, "debate started");

        self.debate = Some(debate);
        self.persona = Some(persona);
        self.transcript.push(opening_message);
        self.user_score = 0;
        self.ai_score = 0;
        self.verdict = None;
        self.elapsed = Arc::new(AtomicU64::new(0));
        self.spawn_ticker();

        self.emit(SessionEvent::TurnReceived {
            sender: Sender::Ai,
            content: opening,
        });
        self.set_phase(Phase::Debating);
        Ok(())
    }

    /// Submits one user argument and awaits the partner's rebuttal.
    ///
    /// The user message is scored, persisted, and counted before the
    /// partner is consulted; a provider failure appends the apology line
    /// with zero impact and stays in the debating phase. While the reply
    /// is pending, further submissions are rejected.
    pub async fn submit_turn(&mut self, input: &str) -> Result<()> {
        if self.phase != Phase::Debating {
            return Err(RostraError::validation("no debate in progress"));
        }
        if self.awaiting_reply {
            return Err(RostraError::validation("a reply is already pending"));
        }
        let input = input.trim();
        if input.is_empty() {
            return Err(RostraError::validation("argument must not be empty"));
        }
        let (debate_id, topic) = {
            let debate = self
                .debate
                .as_ref()
                .ok_or_else(|| RostraError::internal("debating phase without a debate record"))?;
            (debate.id.clone(), debate.topic.clone())
        };
        let persona = self
            .persona
            .clone()
            .ok_or_else(|| RostraError::internal("debating phase without a persona"))?;

        let impact = self.scorer.score_turn(input);
        let now = chrono::Utc::now().to_rfc3339();
        let user_message = DebateMessage::new(&debate_id, Sender::User, input, impact, &now);
        self.persist_message(&user_message).await?;
        self.transcript.push(user_message);
        self.user_score += impact;
        self.emit(SessionEvent::TurnReceived {
            sender: Sender::User,
            content: input.to_string(),
        });

        self.awaiting_reply = true;
        let partner = Arc::clone(&self.partner);
        let cancel = self.cancel.clone();
        let outcome = tokio::select! {
            _ = cancel.cancelled() => None,
            result = partner.reply_to_turn(&persona, &topic, &self.transcript, input) => {
                Some(result)
            }
        };
        self.awaiting_reply = false;

        // The run was abandoned while the reply was in flight; drop it.
        let Some(outcome) = outcome else {
            return Ok(());
        };

        let (content, impact) = match outcome {
            Ok(reply) => (reply.content, reply.score_impact),
            Err(err) => {
                tracing::warn!(error = %err, "debate partner failed to reply");
                (APOLOGY_LINE.to_string(), 0)
            }
        };

        let now = chrono::Utc::now().to_rfc3339();
        let ai_message = DebateMessage::new(&debate_id, Sender::Ai, &content, impact, &now);
        self.persist_message(&ai_message).await?;
        self.transcript.push(ai_message);
        self.ai_score += impact;
        self.emit(SessionEvent::TurnReceived {
            sender: Sender::Ai,
            content,
        });
        Ok(())
    }

    /// Ends the exchange and asks the judge for a verdict.
    ///
    /// On success the debate is persisted as completed, the profile
    /// aggregates are applied, and the session shows results. A judge
    /// failure returns to the debating phase with nothing persisted; a
    /// storage failure stays in the scoring phase so `end` can be retried.
    pub async fn end(&mut self) -> Result<DebateVerdict> {
        if self.phase != Phase::Debating && self.phase != Phase::Scoring {
            return Err(RostraError::validation("no debate to end"));
        }
        let debate = self
            .debate
            .clone()
            .ok_or_else(|| RostraError::internal("scoring phase without a debate record"))?;
        let persona = self
            .persona
            .clone()
            .ok_or_else(|| RostraError::internal("scoring phase without a persona"))?;

        self.stop_ticker();
        self.set_phase(Phase::Scoring);

        let verdict = match self
            .partner
            .score_transcript(&self.transcript, &debate.topic, &persona)
            .await
        {
            Ok(verdict) => verdict,
            Err(err) => {
                tracing::warn!(error = %err, "judge failed; returning to the debate");
                self.set_phase(Phase::Debating);
                self.spawn_ticker();
                return Err(err.into());
            }
        };

        let user_won = verdict.user_score > verdict.ai_score;
        let completion = DebateCompletion {
            user_score: verdict.user_score,
            ai_score: verdict.ai_score,
            duration_seconds: self.elapsed.load(Ordering::Relaxed),
            feedback: if user_won { WIN_FEEDBACK } else { LOSS_FEEDBACK }.to_string(),
            completed_at: chrono::Utc::now().to_rfc3339(),
        };

        // Storage faults from here on leave the phase at Scoring; the
        // caller may retry `end`.
        self.persist_completion(&debate.id, completion).await?;
        self.apply_profile_aggregates(&debate.account_id, &verdict).await?;

        tracing::debug!(
            debate_id = %debate.id,
            user_score = verdict.user_score,
            ai_score = verdict.ai_score,
            winner = %verdict.winner,
            "debate completed"
        );

        self.verdict = Some(verdict.clone());
        self.set_phase(Phase::Results);
        Ok(verdict)
    }

    /// Abandons the current run and returns to the selection phase.
    ///
    /// Cancels the ticker and any in-flight provider call, clears all
    /// session-local state, and leaves persisted history untouched.
    pub fn restart(&mut self) {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        self.ticker = None;
        self.debate = None;
        self.persona = None;
        self.transcript.clear();
        self.user_score = 0;
        self.ai_score = 0;
        self.verdict = None;
        self.awaiting_reply = false;
        self.elapsed = Arc::new(AtomicU64::new(0));
        self.set_phase(Phase::SelectingPersona);
    }

    /// Opens the leaderboard view from the results screen.
    pub async fn view_leaderboard(&mut self) -> Result<Vec<Profile>> {
        if self.phase != Phase::Results {
            return Err(RostraError::validation(
                "the leaderboard opens from the results screen",
            ));
        }
        let profiles = self.identity.list_profiles().await?;
        self.set_phase(Phase::Leaderboard);
        Ok(ranking::leaderboard(&profiles))
    }

    /// Leaves the leaderboard and returns to the selection phase.
    pub fn close_leaderboard(&mut self) -> Result<()> {
        if self.phase != Phase::Leaderboard {
            return Err(RostraError::validation("the leaderboard is not open"));
        }
        self.restart();
        Ok(())
    }

    fn emit(&self, event: SessionEvent) {
        // A dropped receiver must not take the session down.
        let _ = self.events.send(event);
    }

    fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.emit(SessionEvent::PhaseChanged { phase });
    }

    async fn persist_message(&self, message: &DebateMessage) -> Result<()> {
        let mut all = self.messages.get_all().await?;
        all.push(message.clone());
        self.messages.save_all(&all).await
    }

    async fn persist_completion(&mut self, debate_id: &str, completion: DebateCompletion) -> Result<()> {
        let mut debates = self.debates.get_all().await?;
        let stored = debates
            .iter_mut()
            .find(|d| d.id == debate_id)
            .ok_or_else(|| RostraError::not_found("debate", debate_id))?;
        stored.complete(completion);
        let completed = stored.clone();
        self.debates.save_all(&debates).await?;
        self.debate = Some(completed);
        Ok(())
    }

    async fn apply_profile_aggregates(
        &self,
        account_id: &str,
        verdict: &DebateVerdict,
    ) -> Result<()> {
        let profiles = self.identity.list_profiles().await?;
        let profile = profiles
            .iter()
            .find(|p| p.id == account_id)
            .ok_or_else(|| RostraError::not_found("profile", account_id))?;

        let user_won = verdict.user_score > verdict.ai_score;
        let total_score = profile.total_score + verdict.user_score;
        let update = ProfileUpdate {
            total_debates: Some(profile.total_debates + 1),
            wins: Some(profile.wins + u32::from(user_won)),
            total_score: Some(total_score),
            rank: Some(RankTitle::for_score(total_score)),
            ..Default::default()
        };
        self.identity.update_profile(account_id, update).await?;
        Ok(())
    }

    fn spawn_ticker(&mut self) {
        let ticker = self.cancel.child_token();
        let events = self.events.clone();
        let elapsed = Arc::clone(&self.elapsed);
        let cancel = ticker.clone();
        self.ticker = Some(ticker);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first tick completes immediately; skip it.
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = interval.tick() => {
                        let seconds = elapsed.fetch_add(1, Ordering::Relaxed) + 1;
                        let _ = events.send(SessionEvent::Tick {
                            elapsed_seconds: seconds,
                        });
                    }
                }
            }
        });
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debate::DebateStatus;
    use crate::session::partner::Winner;
    use crate::test_support::{memory_session, StubPartner};

    fn verdict(user_score: u32, ai_score: u32) -> DebateVerdict {
        DebateVerdict {
            user_score,
            ai_score,
            justification: "The user argued consistently.".to_string(),
            winner: if user_score > ai_score {
                Winner::User
            } else if ai_score > user_score {
                Winner::Ai
            } else {
                Winner::Draw
            },
        }
    }

    #[tokio::test]
    async fn test_start_requires_topic_and_account() {
        let fixture = memory_session().await;
        let (mut session, _events) = fixture.session();

        let err = session
            .start(fixture.persona(), "   ")
            .await
            .unwrap_err();
        assert!(err.is_validation());

        fixture.identity.sign_out().await.unwrap();
        let err = session
            .start(fixture.persona(), "Motion")
            .await
            .unwrap_err();
        assert!(matches!(err, RostraError::Unauthenticated));
        assert_eq!(session.phase(), Phase::SelectingPersona);
        assert!(fixture.debates.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_start_creates_debate_and_opening_message() {
        let fixture = memory_session().await;
        let (mut session, mut events) = fixture.session();

        session.start(fixture.persona(), "Cities should ban cars").await.unwrap();

        assert_eq!(session.phase(), Phase::Debating);
        assert_eq!(session.topic(), Some("Cities should ban cars"));

        let debates = fixture.debates.get_all().await.unwrap();
        assert_eq!(debates.len(), 1);
        assert_eq!(debates[0].status, DebateStatus::Ongoing);
        assert_eq!(debates[0].user_score, 0);

        let messages = fixture.messages.get_all().await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::Ai);
        assert_eq!(messages[0].score_impact, 0);

        // Opening line and phase change were published.
        let mut saw_turn = false;
        let mut saw_phase = false;
        while let Ok(event) = events.try_recv() {
            match event {
                SessionEvent::TurnReceived { sender: Sender::Ai, .. } => saw_turn = true,
                SessionEvent::PhaseChanged { phase: Phase::Debating } => saw_phase = true,
                _ => {}
            }
        }
        assert!(saw_turn && saw_phase);
    }

    #[tokio::test]
    async fn test_submit_turn_appends_in_order_and_scores_both_sides() {
        let fixture = memory_session().await;
        let (mut session, _events) = fixture.session();
        session.start(fixture.persona(), "Motion").await.unwrap();

        session.submit_turn("Opening argument").await.unwrap();
        session.submit_turn("Second argument").await.unwrap();

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 5); // opening + 2 * (user, ai)
        let senders: Vec<Sender> = transcript.iter().map(|m| m.sender).collect();
        assert_eq!(
            senders,
            vec![Sender::Ai, Sender::User, Sender::Ai, Sender::User, Sender::Ai]
        );

        // Persisted order equals submission order.
        let stored = fixture.messages.get_all().await.unwrap();
        assert_eq!(stored, transcript.to_vec());

        assert_eq!(session.user_score(), 2 * fixture.turn_impact());
        assert_eq!(session.ai_score(), 2 * StubPartner::REPLY_IMPACT);
    }

    #[tokio::test]
    async fn test_submit_turn_rejects_empty_and_wrong_phase() {
        let fixture = memory_session().await;
        let (mut session, _events) = fixture.session();

        assert!(session.submit_turn("hello").await.unwrap_err().is_validation());

        session.start(fixture.persona(), "Motion").await.unwrap();
        assert!(session.submit_turn("  ").await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_partner_failure_appends_apology_and_stays_debating() {
        let fixture = memory_session().await;
        fixture.partner.fail_replies(true);
        let (mut session, _events) = fixture.session();
        session.start(fixture.persona(), "Motion").await.unwrap();

        session.submit_turn("My argument").await.unwrap();

        assert_eq!(session.phase(), Phase::Debating);
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1].sender, Sender::User);
        assert!(transcript[1].score_impact > 0);
        assert_eq!(transcript[2].content, APOLOGY_LINE);
        assert_eq!(transcript[2].score_impact, 0);
        assert_eq!(session.ai_score(), 0);
    }

    #[tokio::test]
    async fn test_end_persists_completion_and_updates_profile() {
        let fixture = memory_session().await;
        fixture.partner.set_verdict(verdict(80, 40));
        let (mut session, _events) = fixture.session();

        session.start(fixture.persona(), "X").await.unwrap();
        session.submit_turn("One message").await.unwrap();
        let result = session.end().await.unwrap();

        assert_eq!(result.user_score, 80);
        assert_eq!(session.phase(), Phase::Results);

        let debates = fixture.debates.get_all().await.unwrap();
        assert_eq!(debates[0].status, DebateStatus::Completed);
        assert_eq!(debates[0].user_score, 80);
        assert_eq!(debates[0].ai_score, 40);
        assert!(!debates[0].feedback.is_empty());
        assert!(debates[0].completed_at.is_some());

        let profile = &fixture.identity.list_profiles().await.unwrap()[0];
        assert_eq!(profile.total_debates, 1);
        assert_eq!(profile.wins, 1);
        assert_eq!(profile.total_score, 80);
        assert_eq!(profile.rank, RankTitle::Apprentice);
    }

    #[tokio::test]
    async fn test_judge_failure_returns_to_debating_without_persisting() {
        let fixture = memory_session().await;
        fixture.partner.fail_scoring(true);
        let (mut session, _events) = fixture.session();

        session.start(fixture.persona(), "Motion").await.unwrap();
        session.submit_turn("Argument").await.unwrap();
        let err = session.end().await.unwrap_err();
        assert!(err.is_provider());

        assert_eq!(session.phase(), Phase::Debating);
        let debates = fixture.debates.get_all().await.unwrap();
        assert_eq!(debates[0].status, DebateStatus::Ongoing);
        let profile = &fixture.identity.list_profiles().await.unwrap()[0];
        assert_eq!(profile.total_debates, 0);

        // End can be attempted again once the judge recovers.
        fixture.partner.fail_scoring(false);
        fixture.partner.set_verdict(verdict(30, 60));
        session.end().await.unwrap();
        assert_eq!(session.phase(), Phase::Results);
        let profile = &fixture.identity.list_profiles().await.unwrap()[0];
        assert_eq!(profile.total_debates, 1);
        assert_eq!(profile.wins, 0);
        assert_eq!(profile.total_score, 30);
    }

    #[tokio::test]
    async fn test_aggregates_across_multiple_debates() {
        let fixture = memory_session().await;
        let (mut session, _events) = fixture.session();

        let rounds = [(80u32, 40u32), (20, 70), (90, 90)];
        for (user, ai) in rounds {
            fixture.partner.set_verdict(verdict(user, ai));
            session.start(fixture.persona(), "Motion").await.unwrap();
            session.submit_turn("Argument").await.unwrap();
            session.end().await.unwrap();
            session.restart();
        }

        let profile = &fixture.identity.list_profiles().await.unwrap()[0];
        assert_eq!(profile.total_debates, 3);
        assert_eq!(profile.wins, 1); // only the 80 > 40 round
        assert_eq!(profile.total_score, 80 + 20 + 90);
        assert_eq!(profile.rank, RankTitle::Apprentice);

        let completed = fixture.debates.get_all().await.unwrap();
        assert_eq!(completed.len(), 3);
        assert!(completed.iter().all(|d| d.status == DebateStatus::Completed));
    }

    #[tokio::test]
    async fn test_restart_clears_session_state_but_not_history() {
        let fixture = memory_session().await;
        fixture.partner.set_verdict(verdict(80, 40));
        let (mut session, _events) = fixture.session();

        session.start(fixture.persona(), "Motion").await.unwrap();
        session.submit_turn("Argument").await.unwrap();
        session.end().await.unwrap();
        session.restart();

        assert_eq!(session.phase(), Phase::SelectingPersona);
        assert!(session.transcript().is_empty());
        assert_eq!(session.user_score(), 0);
        assert_eq!(session.ai_score(), 0);
        assert!(session.verdict().is_none());
        assert!(session.topic().is_none());

        // Persisted history survives.
        assert_eq!(fixture.debates.get_all().await.unwrap().len(), 1);
        assert!(!fixture.messages.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_leaderboard_view_round_trip() {
        let fixture = memory_session().await;
        fixture.partner.set_verdict(verdict(80, 40));
        let (mut session, _events) = fixture.session();

        assert!(session.view_leaderboard().await.unwrap_err().is_validation());

        session.start(fixture.persona(), "Motion").await.unwrap();
        session.end().await.unwrap();

        let standings = session.view_leaderboard().await.unwrap();
        assert_eq!(session.phase(), Phase::Leaderboard);
        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].total_score, 80);

        session.close_leaderboard().unwrap();
        assert_eq!(session.phase(), Phase::SelectingPersona);
    }
}
