//! Player: the match generator's view of someone on the roster.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player. Shares its id space with club members.
pub type PlayerId = Uuid;

/// A player handed to the match generator. Only identity and display name matter here.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Generated when absent from incoming JSON, so ad-hoc rosters can be plain names.
    #[serde(default = "Uuid::new_v4")]
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    /// Create a player with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    pub fn with_id(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
