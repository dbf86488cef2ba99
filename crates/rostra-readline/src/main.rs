use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Editor;
use rustyline::{Context, Helper};

use rostra_core::debate::Sender;
use rostra_core::persona::{builtin_personas, find_persona, Persona};
use rostra_core::ranking;
use rostra_core::session::{DebateSession, Phase, SessionEvent, VoiceLink};
use rostra_core::RostraError;
use rostra_infrastructure::LocalStore;
use rostra_interaction::{ConsoleVoice, HeuristicTurnScorer, ScriptedPartner};

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        let commands = [
            "/signup", "/signin", "/signout", "/whoami", "/personas", "/persona", "/start",
            "/end", "/again", "/board", "/voice", "/listen", "/status",
        ];
        Self {
            commands: commands.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

fn print_error(err: &RostraError) {
    if err.is_retryable() {
        eprintln!("{}", format!("{} (you can retry)", err).red());
    } else {
        eprintln!("{}", err.to_string().red());
    }
}

fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// The main entry point for the Rostra debate REPL.
///
/// Sets up the local store, identity manager, and one debate session,
/// then drives the session from terminal input. Session events are
/// consumed by a background task that renders AI turns and, when enabled,
/// speaks them; the state machine itself never prints.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // ===== Backend Initialization =====
    let store = LocalStore::open_default().map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let identity = Arc::new(store.identity());
    let partner = Arc::new(ScriptedPartner::new().with_thinking_delay(Duration::from_millis(1200)));
    let scorer = Arc::new(HeuristicTurnScorer);

    let (mut session, mut events) = DebateSession::new(
        Arc::clone(&identity),
        store.debates.clone(),
        store.messages.clone(),
        partner,
        scorer,
    );

    // Voice is a consumer decision, not a state-machine concern.
    let tts_enabled = Arc::new(AtomicBool::new(false));

    // Spawn the event consumer: renders AI turns, speaks them if enabled.
    let consumer_tts = Arc::clone(&tts_enabled);
    let consumer = tokio::spawn(async move {
        let voice = ConsoleVoice;
        while let Some(event) = events.recv().await {
            match event {
                SessionEvent::TurnReceived {
                    sender: Sender::Ai,
                    content,
                } => {
                    println!("{}", format!("[opponent] {}", content).bright_blue());
                    if consumer_tts.load(Ordering::Relaxed) {
                        voice.speak(&content, Some("en-US")).await;
                    }
                }
                SessionEvent::TurnReceived { .. } => {
                    // User turns are already echoed by the prompt.
                }
                SessionEvent::PhaseChanged { phase } => {
                    println!("{}", format!("-- {} --", phase).bright_black());
                }
                SessionEvent::Tick { .. } => {
                    // The timer is shown on demand via /status.
                }
            }
        }
    });

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== Rostra Debate REPL ===".bright_magenta().bold());
    println!(
        "{}",
        "Sign in with /signin or /signup, pick a persona with /persona, then /start <topic>."
            .bright_black()
    );
    println!(
        "{}",
        "Plain text is your argument while a debate is running. Type 'quit' to exit.".bright_black()
    );
    println!();

    let mut selected_persona: Option<Persona> = None;

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        let line = match readline {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                continue;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "quit" || trimmed == "exit" {
            println!("{}", "Goodbye!".bright_green());
            break;
        }
        let _ = rl.add_history_entry(&line);

        let (command, rest) = match trimmed.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (trimmed, ""),
        };

        match command {
            "/signup" => {
                let mut parts = rest.split_whitespace();
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(email), Some(password), Some(username)) => {
                        match identity.sign_up(email, password, username).await {
                            Ok((_, profile)) => println!(
                                "{}",
                                format!("Welcome, {}! Rank: {}", profile.username, profile.rank)
                                    .green()
                            ),
                            Err(err) => print_error(&err),
                        }
                    }
                    _ => eprintln!("{}", "usage: /signup <email> <password> <username>".yellow()),
                }
            }
            "/signin" => {
                let mut parts = rest.split_whitespace();
                match (parts.next(), parts.next()) {
                    (Some(email), Some(password)) => match identity.sign_in(email, password).await
                    {
                        Ok(account) => {
                            println!("{}", format!("Signed in as {}", account.email).green())
                        }
                        Err(err) => print_error(&err),
                    },
                    _ => eprintln!("{}", "usage: /signin <email> <password>".yellow()),
                }
            }
            "/signout" => match identity.sign_out().await {
                Ok(()) => println!("{}", "Signed out.".green()),
                Err(err) => print_error(&err),
            },
            "/whoami" => match identity.current_session().await {
                Ok(Some(account)) => println!("{}", account.email.green()),
                Ok(None) => println!("{}", "Nobody is signed in.".bright_black()),
                Err(err) => print_error(&err),
            },
            "/personas" => {
                for persona in builtin_personas() {
                    println!("{}", format!("{} - {}", persona.name.bold(), persona.style));
                }
            }
            "/persona" => match find_persona(rest) {
                Some(persona) => {
                    println!("{}", format!("Debating against: {}", persona.name).green());
                    selected_persona = Some(persona);
                }
                None => eprintln!(
                    "{}",
                    "Unknown persona. See /personas for the catalog.".yellow()
                ),
            },
            "/start" => {
                let Some(persona) = selected_persona.clone() else {
                    eprintln!("{}", "Pick a persona first with /persona <name>.".yellow());
                    continue;
                };
                if let Err(err) = session.start(persona, rest).await {
                    print_error(&err);
                }
            }
            "/end" => match session.end().await {
                Ok(verdict) => {
                    println!();
                    println!(
                        "{}",
                        format!(
                            "Final score - you: {}  opponent: {}  ({})",
                            verdict.user_score, verdict.ai_score, verdict.winner
                        )
                        .bold()
                    );
                    println!("{}", verdict.justification.bright_blue());
                    println!(
                        "{}",
                        format!("Duration: {}", format_time(session.elapsed_seconds()))
                            .bright_black()
                    );
                }
                Err(err) => print_error(&err),
            },
            "/again" => {
                session.restart();
                println!("{}", "Ready for a new debate.".green());
            }
            "/board" => {
                let standings = if session.phase() == Phase::Results {
                    let result = session.view_leaderboard().await;
                    // Return to selection once the board has been shown.
                    if result.is_ok() {
                        let _ = session.close_leaderboard();
                    }
                    result
                } else {
                    // Outside a finished run, the ranking engine reads the
                    // store directly.
                    identity
                        .list_profiles()
                        .await
                        .map(|profiles| ranking::leaderboard(&profiles))
                };
                match standings {
                    Ok(entries) => {
                        for (position, profile) in entries.iter().enumerate() {
                            println!(
                                "{}",
                                format!(
                                    "{:>2}. {:<20} {:>5} pts  {} ({} wins / {} debates)",
                                    position + 1,
                                    profile.username,
                                    profile.total_score,
                                    profile.rank,
                                    profile.wins,
                                    profile.total_debates
                                )
                            );
                        }
                        if entries.is_empty() {
                            println!("{}", "No debaters yet.".bright_black());
                        }
                    }
                    Err(err) => print_error(&err),
                }
            }
            "/voice" => {
                let enabled = !tts_enabled.load(Ordering::Relaxed);
                tts_enabled.store(enabled, Ordering::Relaxed);
                println!(
                    "{}",
                    format!("Speech output {}", if enabled { "on" } else { "off" }).green()
                );
            }
            "/listen" => {
                let voice = ConsoleVoice;
                match voice.listen().await {
                    Ok(transcript) => {
                        println!("{}", format!("> {}", transcript).green());
                        if let Err(err) = session.submit_turn(&transcript).await {
                            print_error(&err);
                        }
                    }
                    Err(err) => print_error(&err),
                }
            }
            "/status" => {
                println!(
                    "{}",
                    format!(
                        "phase: {}  you: {}  opponent: {}  elapsed: {}",
                        session.phase(),
                        session.user_score(),
                        session.ai_score(),
                        format_time(session.elapsed_seconds())
                    )
                    .bright_black()
                );
            }
            _ if command.starts_with('/') => {
                eprintln!("{}", "Unknown command".bright_black());
            }
            // Plain text during a debate is the next argument.
            _ => {
                if let Err(err) = session.submit_turn(trimmed).await {
                    print_error(&err);
                }
            }
        }
    }

    // Dropping the session closes the event channel and ends the consumer.
    drop(session);
    let _ = consumer.await;

    Ok(())
}
