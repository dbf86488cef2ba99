//! Ranking engine.
//!
//! Pure computation over the profile collection: tier labels derived from
//! cumulative score, and deterministic standings for the leaderboard and
//! podium views. Nothing here touches storage; callers pass in whatever
//! snapshot of profiles they hold.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::profile::Profile;

/// Maximum number of entries in the leaderboard view.
pub const LEADERBOARD_CAP: usize = 50;

/// Number of entries in the podium view.
pub const PODIUM_SIZE: usize = 3;

/// Tiered title derived from cumulative `total_score`, distinct from
/// leaderboard position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString,
)]
pub enum RankTitle {
    Novice,
    Apprentice,
    Adept,
    Expert,
    Grandmaster,
}

impl Default for RankTitle {
    fn default() -> Self {
        RankTitle::Novice
    }
}

impl RankTitle {
    /// Pure mapping from cumulative score to tier, against fixed ascending
    /// thresholds.
    pub fn for_score(total_score: u32) -> Self {
        match total_score {
            0..=74 => RankTitle::Novice,
            75..=149 => RankTitle::Apprentice,
            150..=299 => RankTitle::Adept,
            300..=499 => RankTitle::Expert,
            _ => RankTitle::Grandmaster,
        }
    }
}

/// Orders profiles by `total_score` descending.
///
/// Ties are broken by `created_at` ascending, then `id` ascending, so the
/// output is a deterministic function of the input regardless of the sort
/// algorithm's stability guarantees.
pub fn standings(profiles: &[Profile]) -> Vec<Profile> {
    let mut ranked: Vec<Profile> = profiles.to_vec();
    ranked.sort_by(|a, b| {
        b.total_score
            .cmp(&a.total_score)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
    ranked
}

/// The top [`PODIUM_SIZE`] standings.
pub fn podium(profiles: &[Profile]) -> Vec<Profile> {
    let mut ranked = standings(profiles);
    ranked.truncate(PODIUM_SIZE);
    ranked
}

/// The top [`LEADERBOARD_CAP`] standings.
pub fn leaderboard(profiles: &[Profile]) -> Vec<Profile> {
    let mut ranked = standings(profiles);
    ranked.truncate(LEADERBOARD_CAP);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str, score: u32, created_at: &str) -> Profile {
        Profile {
            id: id.to_string(),
            username: format!("user-{}", id),
            avatar_url: String::new(),
            total_debates: 0,
            wins: 0,
            total_score: score,
            rank: RankTitle::for_score(score),
            created_at: created_at.to_string(),
            updated_at: created_at.to_string(),
        }
    }

    #[test]
    fn test_rank_thresholds() {
        assert_eq!(RankTitle::for_score(0), RankTitle::Novice);
        assert_eq!(RankTitle::for_score(74), RankTitle::Novice);
        assert_eq!(RankTitle::for_score(75), RankTitle::Apprentice);
        assert_eq!(RankTitle::for_score(149), RankTitle::Apprentice);
        assert_eq!(RankTitle::for_score(150), RankTitle::Adept);
        assert_eq!(RankTitle::for_score(299), RankTitle::Adept);
        assert_eq!(RankTitle::for_score(300), RankTitle::Expert);
        assert_eq!(RankTitle::for_score(499), RankTitle::Expert);
        assert_eq!(RankTitle::for_score(500), RankTitle::Grandmaster);
        assert_eq!(RankTitle::for_score(10_000), RankTitle::Grandmaster);
    }

    #[test]
    fn test_rank_label_display() {
        assert_eq!(RankTitle::Novice.to_string(), "Novice");
        assert_eq!(RankTitle::Grandmaster.to_string(), "Grandmaster");
    }

    #[test]
    fn test_standings_order_by_score_descending() {
        let profiles = vec![
            profile("a", 10, "2024-01-01T00:00:00Z"),
            profile("b", 300, "2024-01-02T00:00:00Z"),
            profile("c", 75, "2024-01-03T00:00:00Z"),
        ];

        let ranked = standings(&profiles);
        let ids: Vec<&str> = ranked.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_standings_tie_break_by_creation_order() {
        let profiles = vec![
            profile("late", 100, "2024-06-01T00:00:00Z"),
            profile("early", 100, "2024-01-01T00:00:00Z"),
        ];

        let ranked = standings(&profiles);
        assert_eq!(ranked[0].id, "early");
        assert_eq!(ranked[1].id, "late");

        // Swapping the input order must not change the output.
        let swapped = vec![profiles[1].clone(), profiles[0].clone()];
        let reranked = standings(&swapped);
        assert_eq!(reranked[0].id, "early");
        assert_eq!(reranked[1].id, "late");
    }

    #[test]
    fn test_standings_deterministic() {
        let profiles: Vec<Profile> = (0..20)
            .map(|i| profile(&format!("p{}", i), (i % 5) * 50, "2024-01-01T00:00:00Z"))
            .collect();

        let first = standings(&profiles);
        let second = standings(&profiles);
        assert_eq!(first, second);
    }

    #[test]
    fn test_podium_and_leaderboard_caps() {
        let profiles: Vec<Profile> = (0..60)
            .map(|i| profile(&format!("p{:02}", i), i, "2024-01-01T00:00:00Z"))
            .collect();

        assert_eq!(podium(&profiles).len(), 3);
        assert_eq!(leaderboard(&profiles).len(), LEADERBOARD_CAP);
        assert_eq!(podium(&profiles)[0].id, "p59");
    }
}
