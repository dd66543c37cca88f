//! Schedule: the stored outcome of generating matches for one club date.

use crate::models::club::ClubError;
use crate::models::game::{DoublesMatch, Side};
use crate::models::member::MemberId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a scheduled match.
pub type MatchId = Uuid;

/// Unique identifier for a schedule.
pub type ScheduleId = Uuid;

/// Recorded outcome of a scheduled match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: Side,
    /// Points as (team 1, team 2), when the score was entered.
    pub score: Option<(u32, u32)>,
    pub recorded_at: DateTime<Utc>,
}

impl MatchResult {
    /// Build a result. A score, if given, must have the winning side strictly ahead.
    pub fn new(winner: Side, score: Option<(u32, u32)>) -> Result<Self, ClubError> {
        if let Some((team_1, team_2)) = score {
            let consistent = match winner {
                Side::One => team_1 > team_2,
                Side::Two => team_2 > team_1,
            };
            if !consistent {
                return Err(ClubError::InvalidScore);
            }
        }
        Ok(Self {
            winner,
            score,
            recorded_at: Utc::now(),
        })
    }
}

/// A generated match as stored in a schedule: member ids only, plus its result.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduledMatch {
    pub id: MatchId,
    pub court: u32,
    pub team_1: [MemberId; 2],
    pub team_2: [MemberId; 2],
    /// None until played.
    pub result: Option<MatchResult>,
}

impl ScheduledMatch {
    pub fn from_generated(m: &DoublesMatch) -> Self {
        Self {
            id: Uuid::new_v4(),
            court: m.court,
            team_1: m.team_1.ids(),
            team_2: m.team_2.ids(),
            result: None,
        }
    }

    pub fn team(&self, side: Side) -> &[MemberId; 2] {
        match side {
            Side::One => &self.team_1,
            Side::Two => &self.team_2,
        }
    }

    pub fn contains(&self, id: MemberId) -> bool {
        self.team_1.contains(&id) || self.team_2.contains(&id)
    }

    pub fn member_ids(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.team_1.iter().chain(self.team_2.iter()).copied()
    }
}

/// Matches for one date, plus everyone who attended but was not placed on a court.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub date: NaiveDate,
    /// Courts requested when the schedule was generated.
    pub courts: u32,
    pub matches: Vec<ScheduledMatch>,
    pub sitting_out: Vec<MemberId>,
    pub created_at: DateTime<Utc>,
}

impl Schedule {
    pub fn new(
        date: NaiveDate,
        courts: u32,
        matches: Vec<ScheduledMatch>,
        sitting_out: Vec<MemberId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            courts,
            matches,
            sitting_out,
            created_at: Utc::now(),
        }
    }

    /// True once any match has a result; such a schedule can no longer be regenerated.
    pub fn has_results(&self) -> bool {
        self.matches.iter().any(|m| m.result.is_some())
    }

    /// True if the member plays in or sits out of this schedule.
    pub fn involves(&self, id: MemberId) -> bool {
        self.sitting_out.contains(&id) || self.matches.iter().any(|m| m.contains(id))
    }

    pub fn get_match(&self, id: MatchId) -> Option<&ScheduledMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn get_match_mut(&mut self, id: MatchId) -> Option<&mut ScheduledMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }
}
