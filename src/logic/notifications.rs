//! In-app notifications: push, announce, mark read.

use crate::models::{Club, ClubError, MemberId, Notification, NotificationId, NotificationKind};
use chrono::NaiveDate;

/// Push a notification to one member.
pub fn notify(
    club: &mut Club,
    member_id: MemberId,
    kind: NotificationKind,
    message: impl Into<String>,
) -> Result<NotificationId, ClubError> {
    deliver(club, Notification::new(member_id, kind, message))
}

/// Push a notification tied to a session date, so it can be withdrawn with that date's schedule.
pub fn notify_for_date(
    club: &mut Club,
    member_id: MemberId,
    kind: NotificationKind,
    date: NaiveDate,
    message: impl Into<String>,
) -> Result<NotificationId, ClubError> {
    deliver(club, Notification::new(member_id, kind, message).for_date(date))
}

fn deliver(club: &mut Club, notification: Notification) -> Result<NotificationId, ClubError> {
    if club.member(notification.member_id).is_none() {
        return Err(ClubError::MemberNotFound(notification.member_id));
    }
    let id = notification.id;
    club.notifications.push(notification);
    Ok(id)
}

/// Send an announcement to every active member. Returns how many were sent.
pub fn announce(club: &mut Club, message: &str) -> Result<usize, ClubError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(ClubError::EmptyMessage);
    }
    let recipients: Vec<MemberId> = club
        .members
        .iter()
        .filter(|m| m.active)
        .map(|m| m.id)
        .collect();
    for &id in &recipients {
        club.notifications
            .push(Notification::new(id, NotificationKind::Announcement, message));
    }
    log::info!("Announcement sent to {} member(s)", recipients.len());
    Ok(recipients.len())
}

pub fn mark_read(club: &mut Club, id: NotificationId) -> Result<(), ClubError> {
    club.notifications
        .iter_mut()
        .find(|n| n.id == id)
        .ok_or(ClubError::NotificationNotFound(id))?
        .read = true;
    Ok(())
}

/// Mark all of a member's notifications read. Returns how many were unread.
pub fn mark_all_read(club: &mut Club, member_id: MemberId) -> Result<usize, ClubError> {
    if club.member(member_id).is_none() {
        return Err(ClubError::MemberNotFound(member_id));
    }
    let mut count = 0;
    for n in club
        .notifications
        .iter_mut()
        .filter(|n| n.member_id == member_id && !n.read)
    {
        n.read = true;
        count += 1;
    }
    Ok(count)
}
