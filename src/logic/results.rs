//! Results: record, correct and clear the outcome of scheduled matches.

use crate::logic::notifications::notify;
use crate::models::{Club, ClubError, MatchId, MatchResult, MemberId, NotificationKind, Side};

#[derive(Clone, Copy)]
enum StatChange {
    Apply,
    Revert,
}

/// Record the winner (and optionally the score) of a scheduled match.
///
/// Recording over an existing result is a correction: the old result's wins/losses are
/// reverted before the new ones are applied. All four players are notified.
pub fn record_result(
    club: &mut Club,
    match_id: MatchId,
    winner: Side,
    score: Option<(u32, u32)>,
) -> Result<(), ClubError> {
    let result = MatchResult::new(winner, score)?;
    // Copy match data out so we don't hold a reference into club while mutating it.
    let (team_1, team_2, previous) = {
        let m = club
            .find_match(match_id)
            .ok_or(ClubError::MatchNotFound(match_id))?;
        (m.team_1, m.team_2, m.result.as_ref().map(|r| r.winner))
    };

    if let Some(previous) = previous {
        apply_stats(club, &team_1, &team_2, previous, StatChange::Revert)?;
    }
    apply_stats(club, &team_1, &team_2, winner, StatChange::Apply)?;

    let message = match score {
        Some((s1, s2)) => format!("Result recorded: {} - {}", s1, s2),
        None => "Result recorded".to_string(),
    };
    if let Some(m) = club.find_match_mut(match_id) {
        m.result = Some(result);
    }

    let (winners, losers) = match winner {
        Side::One => (team_1, team_2),
        Side::Two => (team_2, team_1),
    };
    for id in winners {
        notify(club, id, NotificationKind::ResultRecorded, format!("{} (won)", message))?;
    }
    for id in losers {
        notify(club, id, NotificationKind::ResultRecorded, format!("{} (lost)", message))?;
    }
    log::info!("Recorded result for match {}: side {:?} won", match_id, winner);
    Ok(())
}

/// Remove a match's result and revert its effect on member stats.
pub fn clear_result(club: &mut Club, match_id: MatchId) -> Result<(), ClubError> {
    let m = club
        .find_match_mut(match_id)
        .ok_or(ClubError::MatchNotFound(match_id))?;
    let result = m
        .result
        .take()
        .ok_or(ClubError::ResultNotRecorded(match_id))?;
    let (team_1, team_2) = (m.team_1, m.team_2);
    apply_stats(club, &team_1, &team_2, result.winner, StatChange::Revert)?;
    log::info!("Cleared result for match {}", match_id);
    Ok(())
}

/// Apply or revert a single match result on member win/loss counts.
fn apply_stats(
    club: &mut Club,
    team_1: &[MemberId],
    team_2: &[MemberId],
    winner: Side,
    change: StatChange,
) -> Result<(), ClubError> {
    let (winner_ids, loser_ids) = match winner {
        Side::One => (team_1, team_2),
        Side::Two => (team_2, team_1),
    };
    for &id in winner_ids {
        let m = club.member_mut(id).ok_or(ClubError::MemberNotFound(id))?;
        match change {
            StatChange::Apply => m.add_win(),
            StatChange::Revert => m.remove_win(),
        }
    }
    for &id in loser_ids {
        let m = club.member_mut(id).ok_or(ClubError::MemberNotFound(id))?;
        match change {
            StatChange::Apply => m.add_loss(),
            StatChange::Revert => m.remove_loss(),
        }
    }
    Ok(())
}
