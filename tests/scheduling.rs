//! Integration tests for schedule generation and result recording.

use badminton_club::{
    clear_result, record_result, schedule_matches, Club, ClubError, MemberId, NotificationKind,
    Side,
};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 14).unwrap()
}

/// Club with `n` members, all checked in for `date()`.
fn club_with_attendance(n: usize) -> (Club, Vec<MemberId>) {
    let mut club = Club::new();
    let ids: Vec<MemberId> = (0..n)
        .map(|i| club.add_member(&format!("M{i}"), None).unwrap())
        .collect();
    for &id in &ids {
        club.check_in(date(), id).unwrap();
    }
    (club, ids)
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(2024)
}

#[test]
fn schedule_places_attendees_and_lists_sitting_out() {
    let (mut club, ids) = club_with_attendance(10);
    let schedule = schedule_matches(&mut club, date(), 3, &mut rng()).unwrap();
    assert_eq!(schedule.date, date());
    assert_eq!(schedule.courts, 3);
    assert_eq!(schedule.matches.len(), 2);
    assert_eq!(schedule.sitting_out.len(), 2);

    let mut seen = HashSet::new();
    for m in &schedule.matches {
        for id in m.member_ids() {
            assert!(seen.insert(id));
        }
    }
    for id in &schedule.sitting_out {
        assert!(seen.insert(*id));
    }
    assert_eq!(seen, ids.iter().copied().collect());
}

#[test]
fn schedule_notifies_players_and_sitters() {
    let (mut club, _) = club_with_attendance(5);
    let schedule = schedule_matches(&mut club, date(), 2, &mut rng()).unwrap().clone();
    for id in schedule.matches[0].member_ids() {
        let inbox = club.notifications_for(id, true);
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].kind, NotificationKind::MatchScheduled);
        assert!(inbox[0].message.contains("court 1"));
    }
    let sitter = schedule.sitting_out[0];
    assert_eq!(
        club.notifications_for(sitter, true)[0].kind,
        NotificationKind::SittingOut
    );
}

#[test]
fn too_few_attendees_store_an_empty_schedule() {
    let (mut club, _) = club_with_attendance(3);
    let schedule = schedule_matches(&mut club, date(), 2, &mut rng()).unwrap();
    assert!(schedule.matches.is_empty());
    assert_eq!(schedule.sitting_out.len(), 3);
}

#[test]
fn regenerate_replaces_until_results_recorded() {
    let (mut club, _) = club_with_attendance(8);
    let first_id = schedule_matches(&mut club, date(), 2, &mut rng()).unwrap().id;
    let second = schedule_matches(&mut club, date(), 1, &mut rng()).unwrap();
    assert_ne!(second.id, first_id);
    assert_eq!(second.matches.len(), 1);
    assert_eq!(club.schedules.len(), 1);

    let match_id = club.schedule(date()).unwrap().matches[0].id;
    record_result(&mut club, match_id, Side::One, None).unwrap();
    assert_eq!(
        schedule_matches(&mut club, date(), 2, &mut rng()).unwrap_err(),
        ClubError::ScheduleLocked(date())
    );
    assert_eq!(
        club.clear_schedule(date()).unwrap_err(),
        ClubError::ScheduleLocked(date())
    );
}

#[test]
fn clear_schedule_without_results() {
    let (mut club, _) = club_with_attendance(4);
    schedule_matches(&mut club, date(), 1, &mut rng()).unwrap();
    club.clear_schedule(date()).unwrap();
    assert!(club.schedule(date()).is_none());
    assert_eq!(
        club.clear_schedule(date()).unwrap_err(),
        ClubError::ScheduleNotFound(date())
    );
}

#[test]
fn scheduled_member_cannot_be_removed() {
    let (mut club, ids) = club_with_attendance(4);
    schedule_matches(&mut club, date(), 1, &mut rng()).unwrap();
    assert_eq!(
        club.remove_member(ids[0]),
        Err(ClubError::MemberInUse(ids[0]))
    );
}

#[test]
fn record_result_updates_stats_and_notifies() {
    let (mut club, _) = club_with_attendance(4);
    let m = schedule_matches(&mut club, date(), 1, &mut rng()).unwrap().matches[0].clone();
    record_result(&mut club, m.id, Side::Two, Some((15, 21))).unwrap();

    for &id in &m.team_2 {
        let stats = club.member_stats(id).unwrap();
        assert_eq!((stats.wins, stats.losses), (1, 0));
        assert_eq!(stats.win_rate, 1.0);
    }
    for &id in &m.team_1 {
        let stats = club.member_stats(id).unwrap();
        assert_eq!((stats.wins, stats.losses), (0, 1));
        assert_eq!(stats.matches_played, 1);
    }
    let stored = club.find_match(m.id).unwrap().result.clone().unwrap();
    assert_eq!(stored.winner, Side::Two);
    assert_eq!(stored.score, Some((15, 21)));

    let inbox = club.notifications_for(m.team_2[0], false);
    assert_eq!(inbox[0].kind, NotificationKind::ResultRecorded);
    assert!(inbox[0].message.contains("won"));
}

#[test]
fn correcting_a_result_reverts_previous_stats() {
    let (mut club, _) = club_with_attendance(4);
    let m = schedule_matches(&mut club, date(), 1, &mut rng()).unwrap().matches[0].clone();
    record_result(&mut club, m.id, Side::One, None).unwrap();
    record_result(&mut club, m.id, Side::Two, None).unwrap();

    for &id in &m.team_1 {
        let member = club.member(id).unwrap();
        assert_eq!((member.wins, member.losses), (0, 1));
    }
    for &id in &m.team_2 {
        let member = club.member(id).unwrap();
        assert_eq!((member.wins, member.losses), (1, 0));
    }
}

#[test]
fn clear_result_reverts_stats() {
    let (mut club, ids) = club_with_attendance(4);
    let match_id = schedule_matches(&mut club, date(), 1, &mut rng()).unwrap().matches[0].id;
    record_result(&mut club, match_id, Side::One, Some((21, 19))).unwrap();
    clear_result(&mut club, match_id).unwrap();
    for id in ids {
        let member = club.member(id).unwrap();
        assert_eq!((member.wins, member.losses), (0, 0));
    }
    assert_eq!(
        clear_result(&mut club, match_id),
        Err(ClubError::ResultNotRecorded(match_id))
    );
    // No result left, so the schedule can be regenerated.
    assert!(schedule_matches(&mut club, date(), 1, &mut rng()).is_ok());
}

#[test]
fn score_must_agree_with_winner() {
    let (mut club, _) = club_with_attendance(4);
    let match_id = schedule_matches(&mut club, date(), 1, &mut rng()).unwrap().matches[0].id;
    assert_eq!(
        record_result(&mut club, match_id, Side::One, Some((18, 21))),
        Err(ClubError::InvalidScore)
    );
    assert_eq!(
        record_result(&mut club, match_id, Side::Two, Some((21, 21))),
        Err(ClubError::InvalidScore)
    );
    assert!(club.find_match(match_id).unwrap().result.is_none());
}

#[test]
fn unknown_match_is_not_found() {
    let mut club = Club::new();
    let missing = uuid::Uuid::new_v4();
    let err = record_result(&mut club, missing, Side::One, None).unwrap_err();
    assert_eq!(err, ClubError::MatchNotFound(missing));
    assert!(err.is_not_found());
}

fn placement_notices(club: &Club, id: MemberId) -> Vec<NotificationKind> {
    club.notifications_for(id, false)
        .into_iter()
        .map(|n| n.kind)
        .filter(|k| matches!(k, NotificationKind::MatchScheduled | NotificationKind::SittingOut))
        .collect()
}

#[test]
fn regenerating_replaces_placement_notices() {
    let (mut club, _) = club_with_attendance(8);
    schedule_matches(&mut club, date(), 2, &mut StdRng::seed_from_u64(1)).unwrap();
    let schedule = schedule_matches(&mut club, date(), 1, &mut StdRng::seed_from_u64(2))
        .unwrap()
        .clone();
    assert_eq!(schedule.sitting_out.len(), 4);

    for id in &schedule.sitting_out {
        assert_eq!(placement_notices(&club, *id), vec![NotificationKind::SittingOut]);
    }
    for id in schedule.matches[0].member_ids() {
        let inbox = club.notifications_for(id, true);
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].kind, NotificationKind::MatchScheduled);
        assert!(inbox[0].message.contains("court 1"));
    }
    // One notice per attendee, none left over from the two-court draw.
    assert_eq!(club.notifications.len(), 8);
}

#[test]
fn clearing_a_schedule_withdraws_its_notices() {
    let (mut club, ids) = club_with_attendance(8);
    schedule_matches(&mut club, date(), 2, &mut rng()).unwrap();
    club.clear_schedule(date()).unwrap();
    for id in ids {
        assert!(placement_notices(&club, id).is_empty());
    }
    assert!(club.notifications.is_empty());
}

#[test]
fn other_dates_keep_their_notices() {
    let (mut club, ids) = club_with_attendance(4);
    let next_week = date() + chrono::Duration::days(7);
    for &id in &ids {
        club.check_in(next_week, id).unwrap();
    }
    schedule_matches(&mut club, date(), 1, &mut rng()).unwrap();
    schedule_matches(&mut club, next_week, 1, &mut rng()).unwrap();
    club.clear_schedule(next_week).unwrap();
    for &id in &ids {
        assert_eq!(placement_notices(&club, id), vec![NotificationKind::MatchScheduled]);
        assert_eq!(club.notifications_for(id, false)[0].date, Some(date()));
    }
}
