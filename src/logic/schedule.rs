//! Scheduling: run the generator over a date's attendance and store the result.

use crate::logic::generator::generate_matches;
use crate::logic::notifications::notify_for_date;
use crate::logic::roster::roster_for_date;
use crate::models::{
    Club, ClubError, DoublesMatch, NotificationKind, Schedule, ScheduledMatch, Side,
};
use chrono::NaiveDate;
use rand::Rng;
use std::collections::btree_map::Entry;

/// Generate and store the schedule for `date` from everyone checked in.
///
/// Replaces an existing schedule for the date unless it already has results; placement
/// notices sent for the replaced schedule are withdrawn.
/// Too few players or zero courts still stores a schedule: no matches, everyone sitting out.
/// Each placed member is notified of court, partner and opponents; the rest that they sit out.
pub fn schedule_matches<'a, R: Rng + ?Sized>(
    club: &'a mut Club,
    date: NaiveDate,
    courts: u32,
    rng: &mut R,
) -> Result<&'a Schedule, ClubError> {
    if club.schedule(date).is_some_and(Schedule::has_results) {
        return Err(ClubError::ScheduleLocked(date));
    }

    let roster = roster_for_date(club, date);
    let generation = generate_matches(&roster, courts, rng);

    club.withdraw_schedule_notices(date);
    for m in &generation.matches {
        notify_match(club, date, m)?;
    }
    for p in &generation.unused {
        notify_for_date(
            club,
            p.id,
            NotificationKind::SittingOut,
            date,
            format!("{}: you are sitting out this round", date),
        )?;
    }

    let schedule = Schedule::new(
        date,
        courts,
        generation
            .matches
            .iter()
            .map(ScheduledMatch::from_generated)
            .collect(),
        generation.unused.iter().map(|p| p.id).collect(),
    );
    log::info!(
        "Scheduled {} match(es) for {} ({} sitting out)",
        schedule.matches.len(),
        date,
        schedule.sitting_out.len()
    );

    let stored = match club.schedules.entry(date) {
        Entry::Occupied(mut e) => {
            e.insert(schedule);
            e.into_mut()
        }
        Entry::Vacant(e) => e.insert(schedule),
    };
    Ok(&*stored)
}

fn notify_match(club: &mut Club, date: NaiveDate, m: &DoublesMatch) -> Result<(), ClubError> {
    for side in [Side::One, Side::Two] {
        let team = m.team(side);
        let opponents = m.team(side.other()).players();
        for player in team.players() {
            let partner = team
                .partner_of(player.id)
                .map(|p| p.name.as_str())
                .unwrap_or_default();
            notify_for_date(
                club,
                player.id,
                NotificationKind::MatchScheduled,
                date,
                format!(
                    "{}: court {} with {} against {} and {}",
                    date, m.court, partner, opponents[0].name, opponents[1].name
                ),
            )?;
        }
    }
    Ok(())
}
