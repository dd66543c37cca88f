//! Team, DoublesMatch and Side for generated 2v2 games.

use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};

/// One of the two teams in a match (used to record the winner).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    One,
    Two,
}

impl Side {
    /// The opposing side.
    pub fn other(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

/// Two players paired for a doubles match. Order inside the pair carries no meaning.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team(pub [Player; 2]);

impl Team {
    pub fn new(first: Player, second: Player) -> Self {
        Self([first, second])
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.0
    }

    pub fn ids(&self) -> [PlayerId; 2] {
        [self.0[0].id, self.0[1].id]
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.0.iter().any(|p| p.id == id)
    }

    /// The other member of the pair, if `id` is on this team.
    pub fn partner_of(&self, id: PlayerId) -> Option<&Player> {
        match &self.0 {
            [a, b] if a.id == id => Some(b),
            [a, b] if b.id == id => Some(a),
            _ => None,
        }
    }
}

/// A doubles match assigned to a court. Court numbers start at 1.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DoublesMatch {
    pub court: u32,
    pub team_1: Team,
    pub team_2: Team,
}

impl DoublesMatch {
    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::One => &self.team_1,
            Side::Two => &self.team_2,
        }
    }

    /// All four players, team 1 first.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.team_1.players().iter().chain(self.team_2.players().iter())
    }
}
