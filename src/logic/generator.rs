//! Random doubles-match generation.

use crate::models::{DoublesMatch, Player, Team};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Players needed for one doubles match.
pub const PLAYERS_PER_MATCH: usize = 4;

/// Result of one generation call.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchGeneration {
    /// Matches on courts 1..=N, in court order.
    pub matches: Vec<DoublesMatch>,
    /// Roster players not placed on a court: an odd player out, a leftover team, and
    /// anyone beyond the court limit. The whole roster when no match could be formed.
    pub unused: Vec<Player>,
}

impl MatchGeneration {
    /// Number of matches produced.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Generate doubles matches for up to `courts` courts from `players`.
///
/// 1. Shuffle the roster uniformly (Fisher-Yates, drawn from `rng`).
/// 2. Adjacent players form teams (0&1, 2&3, ...); an odd last player is left over.
/// 3. Adjacent teams form matches; an odd last team is left over.
/// 4. Matches take courts 1, 2, ... until either runs out. Surplus matches are dropped.
///
/// Fewer than 4 players or zero courts yields no matches; that is not an error.
/// Always `matches.len() == min(players.len() / 4, courts)`.
pub fn generate_matches<R: Rng + ?Sized>(
    players: &[Player],
    courts: u32,
    rng: &mut R,
) -> MatchGeneration {
    if players.len() < PLAYERS_PER_MATCH || courts == 0 {
        return MatchGeneration {
            matches: Vec::new(),
            unused: players.to_vec(),
        };
    }

    let mut shuffled = players.to_vec();
    shuffled.shuffle(rng);

    let teams: Vec<Team> = shuffled
        .chunks_exact(2)
        .map(|pair| Team::new(pair[0].clone(), pair[1].clone()))
        .collect();

    let matches: Vec<DoublesMatch> = (1..=courts)
        .zip(teams.chunks_exact(2))
        .map(|(court, pair)| DoublesMatch {
            court,
            team_1: pair[0].clone(),
            team_2: pair[1].clone(),
        })
        .collect();

    // Matches consume the shuffled roster front to back, four at a time.
    let unused = shuffled.split_off(matches.len() * PLAYERS_PER_MATCH);

    log::debug!(
        "Generated {} match(es) from {} player(s) on {} court(s), {} unused",
        matches.len(),
        players.len(),
        courts,
        unused.len()
    );

    MatchGeneration { matches, unused }
}
