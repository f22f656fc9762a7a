//! Leaderboard and account session
//!
//! There is no backend yet: `PlaceholderLeaderboard` serves fixed rankings
//! and fakes sign in/out so the UI flow can be exercised end to end.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single ranked entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<String>, score: u64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Leaderboard failures. All are recoverable and never touch the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardError {
    /// Submitting requires a signed-in session
    NotAuthenticated,
    /// The operation has no implementation yet
    Unsupported(&'static str),
}

impl fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaderboardError::NotAuthenticated => write!(f, "Please sign in to save your score!"),
            LeaderboardError::Unsupported(what) => write!(f, "{} is not implemented", what),
        }
    }
}

impl std::error::Error for LeaderboardError {}

/// Ranked score listing
pub trait Leaderboard {
    /// Entries ranked by descending score
    fn fetch(&self) -> Vec<LeaderboardEntry>;
    /// Submit a finished run's score
    fn submit(&mut self, score: u64) -> Result<(), LeaderboardError>;
}

/// Name shown for the local player while signed in
pub const SIGNED_IN_NAME: &str = "You";
/// Name shown for the local player as a guest
pub const GUEST_NAME: &str = "You (Guest)";

/// Offline stand-in for a real leaderboard service
#[derive(Debug, Clone, Default)]
pub struct PlaceholderLeaderboard {
    signed_in: bool,
    local_best: u64,
    submitted: Vec<u64>,
}

impl PlaceholderLeaderboard {
    pub fn new(local_best: u64) -> Self {
        Self {
            local_best,
            ..Self::default()
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.signed_in
    }

    pub fn sign_in(&mut self) {
        self.signed_in = true;
        log::info!("Signed in (placeholder session)");
    }

    pub fn sign_out(&mut self) {
        self.signed_in = false;
        log::info!("Signed out");
    }

    pub fn sign_up(&mut self) -> Result<(), LeaderboardError> {
        Err(LeaderboardError::Unsupported("Sign up"))
    }

    /// Flip between signed in and signed out. Returns the new state.
    pub fn toggle_session(&mut self) -> bool {
        if self.signed_in {
            self.sign_out();
        } else {
            self.sign_in();
        }
        self.signed_in
    }

    /// Keep the device best in sync with the score store
    pub fn set_local_best(&mut self, best: u64) {
        self.local_best = best;
    }

    /// Scores accepted by `submit` this session, oldest first
    pub fn submitted(&self) -> &[u64] {
        &self.submitted
    }
}

impl Leaderboard for PlaceholderLeaderboard {
    fn fetch(&self) -> Vec<LeaderboardEntry> {
        let mut entries = if self.signed_in {
            let mut entries = vec![
                LeaderboardEntry::new("ServerPlayer1", 2100),
                LeaderboardEntry::new("ServerPlayer2", 1850),
                LeaderboardEntry::new("TopDino", 1700),
            ];
            if self.local_best > 0 {
                entries.push(LeaderboardEntry::new(SIGNED_IN_NAME, self.local_best));
            }
            entries
        } else {
            vec![
                LeaderboardEntry::new("Player1", 1500),
                LeaderboardEntry::new("Player2", 1250),
                LeaderboardEntry::new("Player3", 1100),
                LeaderboardEntry::new(GUEST_NAME, self.local_best),
            ]
        };
        // Stable: ties keep listing order
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries
    }

    fn submit(&mut self, score: u64) -> Result<(), LeaderboardError> {
        if !self.signed_in {
            log::warn!("Score submit rejected: not signed in");
            return Err(LeaderboardError::NotAuthenticated);
        }
        log::info!("Score {} would be saved", score);
        self.submitted.push(score);
        Ok(())
    }
}
