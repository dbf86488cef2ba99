//! Profile domain model.
//!
//! One profile exists per account, created atomically with it and sharing
//! its id. The aggregate counters are mutated only by the debate session's
//! completion step and by explicit profile edits.

use serde::{Deserialize, Serialize};

use crate::ranking::RankTitle;

/// Public player profile backing the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique identifier, equal to the owning account's id (1:1).
    pub id: String,
    /// Display name.
    pub username: String,
    /// Avatar image reference, derived deterministically from the username.
    pub avatar_url: String,
    /// Count of this player's completed debates.
    pub total_debates: u32,
    /// Completed debates where the player out-scored the AI.
    /// Always <= `total_debates`.
    pub wins: u32,
    /// Cumulative score across completed debates. Monotonically
    /// non-decreasing.
    pub total_score: u32,
    /// Tier title derived from `total_score`.
    pub rank: RankTitle,
    /// Timestamp when the profile was created (RFC 3339 format)
    pub created_at: String,
    /// Timestamp when the profile was last updated (RFC 3339 format)
    pub updated_at: String,
}

impl Profile {
    /// Creates a fresh profile for a new account: zero counters, Novice
    /// rank, avatar seeded from the username.
    pub fn new_for_account(account_id: &str, username: &str, now: &str) -> Self {
        Self {
            id: account_id.to_string(),
            username: username.to_string(),
            avatar_url: default_avatar(username),
            total_debates: 0,
            wins: 0,
            total_score: 0,
            rank: RankTitle::Novice,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }

    /// Applies a partial update and stamps `updated_at`.
    pub fn apply(&mut self, update: ProfileUpdate, now: &str) {
        if let Some(username) = update.username {
            self.username = username;
        }
        if let Some(avatar_url) = update.avatar_url {
            self.avatar_url = avatar_url;
        }
        if let Some(total_debates) = update.total_debates {
            self.total_debates = total_debates;
        }
        if let Some(wins) = update.wins {
            self.wins = wins;
        }
        if let Some(total_score) = update.total_score {
            self.total_score = total_score;
        }
        if let Some(rank) = update.rank {
            self.rank = rank;
        }
        self.updated_at = now.to_string();
    }
}

/// A partial profile edit. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub total_debates: Option<u32>,
    pub wins: Option<u32>,
    pub total_score: Option<u32>,
    pub rank: Option<RankTitle>,
}

/// Deterministic avatar reference for a username seed.
pub fn default_avatar(seed: &str) -> String {
    format!(
        "https://api.dicebear.com/7.x/avataaars/svg?seed={}",
        urlencoding::encode(seed)
    )
}
