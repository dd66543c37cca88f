//! Member and MemberStats data structures.

use crate::models::player::Player;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a club member (also used as their player id).
pub type MemberId = Uuid;

/// Statistics view of a member (for API / display).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberStats {
    pub wins: u32,
    pub losses: u32,
    pub matches_played: u32,
    /// Wins divided by matches played; 0.0 before the first result.
    pub win_rate: f64,
}

impl MemberStats {
    pub fn from_member(m: &Member) -> Self {
        let matches_played = m.wins + m.losses;
        let win_rate = if matches_played == 0 {
            0.0
        } else {
            f64::from(m.wins) / f64::from(matches_played)
        };
        Self {
            wins: m.wins,
            losses: m.losses,
            matches_played,
            win_rate,
        }
    }
}

/// A registered club member.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: Option<String>,
    pub is_admin: bool,
    /// Inactive members keep their history but cannot check in.
    pub active: bool,
    pub wins: u32,
    pub losses: u32,
    pub joined_at: DateTime<Utc>,
}

impl Member {
    /// Create an active, non-admin member with no results.
    pub fn new(name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email,
            is_admin: false,
            active: true,
            wins: 0,
            losses: 0,
            joined_at: Utc::now(),
        }
    }

    pub fn stats(&self) -> MemberStats {
        MemberStats::from_member(self)
    }

    /// This member as a roster entry for the match generator.
    pub fn as_player(&self) -> Player {
        Player::with_id(self.id, self.name.clone())
    }

    pub fn add_win(&mut self) {
        self.wins += 1;
    }

    pub fn add_loss(&mut self) {
        self.losses += 1;
    }

    /// Undo a previously recorded win (result correction).
    pub fn remove_win(&mut self) {
        self.wins = self.wins.saturating_sub(1);
    }

    /// Undo a previously recorded loss (result correction).
    pub fn remove_loss(&mut self) {
        self.losses = self.losses.saturating_sub(1);
    }
}
