//! Club: members, attendance, schedules and notifications.

use crate::models::member::{Member, MemberId, MemberStats};
use crate::models::notification::{Notification, NotificationId};
use crate::models::schedule::{MatchId, Schedule, ScheduledMatch};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Errors that can occur during club operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ClubError {
    /// Member name is empty after trimming.
    EmptyName,
    /// A member with this name already exists (names are unique, case-insensitive).
    DuplicateMemberName,
    MemberNotFound(MemberId),
    /// Inactive members cannot check in.
    MemberInactive(MemberId),
    /// Member appears in a stored schedule and cannot be removed.
    MemberInUse(MemberId),
    /// Member is not checked in for the date.
    NotCheckedIn(MemberId),
    ScheduleNotFound(NaiveDate),
    /// Schedule already has recorded results and cannot be regenerated or cleared.
    ScheduleLocked(NaiveDate),
    MatchNotFound(MatchId),
    /// Match has no result to clear.
    ResultNotRecorded(MatchId),
    /// Score does not agree with the declared winner.
    InvalidScore,
    NotificationNotFound(NotificationId),
    /// Announcement text is empty after trimming.
    EmptyMessage,
    /// Roster CSV could not be read or parsed.
    Csv(String),
}

impl ClubError {
    /// True for lookups of something that does not exist (maps to HTTP 404).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ClubError::MemberNotFound(_)
                | ClubError::ScheduleNotFound(_)
                | ClubError::MatchNotFound(_)
                | ClubError::NotificationNotFound(_)
        )
    }
}

impl std::fmt::Display for ClubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClubError::EmptyName => write!(f, "Member name cannot be empty"),
            ClubError::DuplicateMemberName => write!(f, "A member with this name already exists"),
            ClubError::MemberNotFound(id) => write!(f, "Member {} not found", id),
            ClubError::MemberInactive(id) => write!(f, "Member {} is inactive", id),
            ClubError::MemberInUse(id) => {
                write!(f, "Member {} appears in a schedule and cannot be removed", id)
            }
            ClubError::NotCheckedIn(id) => write!(f, "Member {} is not checked in", id),
            ClubError::ScheduleNotFound(date) => write!(f, "No schedule for {}", date),
            ClubError::ScheduleLocked(date) => {
                write!(f, "Schedule for {} already has results recorded", date)
            }
            ClubError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            ClubError::ResultNotRecorded(id) => write!(f, "Match {} has no result", id),
            ClubError::InvalidScore => write!(f, "Score does not match the winning side"),
            ClubError::NotificationNotFound(id) => write!(f, "Notification {} not found", id),
            ClubError::EmptyMessage => write!(f, "Announcement message cannot be empty"),
            ClubError::Csv(msg) => write!(f, "Invalid roster CSV: {}", msg),
        }
    }
}

impl std::error::Error for ClubError {}

impl From<csv::Error> for ClubError {
    fn from(e: csv::Error) -> Self {
        ClubError::Csv(e.to_string())
    }
}

/// Full club state. Owned by the web server behind a lock; plain data otherwise.
#[derive(Clone, Debug, Default)]
pub struct Club {
    pub members: Vec<Member>,
    /// Checked-in members per date, in check-in order.
    pub attendance: BTreeMap<NaiveDate, Vec<MemberId>>,
    /// At most one schedule per date.
    pub schedules: BTreeMap<NaiveDate, Schedule>,
    /// All notifications, oldest first.
    pub notifications: Vec<Notification>,
}

impl Club {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn member_mut(&mut self, id: MemberId) -> Option<&mut Member> {
        self.members.iter_mut().find(|m| m.id == id)
    }

    /// Case-insensitive lookup by name.
    pub fn find_member_by_name(&self, name: &str) -> Option<&Member> {
        let name = name.trim();
        self.members.iter().find(|m| m.name.eq_ignore_ascii_case(name))
    }

    /// Trimmed name, checked for emptiness and uniqueness (ignoring `except`, for renames).
    fn validate_name(&self, name: &str, except: Option<MemberId>) -> Result<String, ClubError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ClubError::EmptyName);
        }
        let is_duplicate = self
            .members
            .iter()
            .any(|m| Some(m.id) != except && m.name.eq_ignore_ascii_case(name));
        if is_duplicate {
            return Err(ClubError::DuplicateMemberName);
        }
        Ok(name.to_string())
    }

    /// Add a member. Names must be non-empty and unique (case-insensitive).
    pub fn add_member(&mut self, name: &str, email: Option<String>) -> Result<MemberId, ClubError> {
        let name = self.validate_name(name, None)?;
        let member = Member::new(name, email);
        let id = member.id;
        log::info!("Added member {} ({})", member.name, id);
        self.members.push(member);
        Ok(id)
    }

    pub fn rename_member(&mut self, id: MemberId, name: &str) -> Result<(), ClubError> {
        if self.member(id).is_none() {
            return Err(ClubError::MemberNotFound(id));
        }
        let name = self.validate_name(name, Some(id))?;
        let member = self.member_mut(id).ok_or(ClubError::MemberNotFound(id))?;
        member.name = name;
        Ok(())
    }

    pub fn set_admin(&mut self, id: MemberId, is_admin: bool) -> Result<(), ClubError> {
        self.member_mut(id)
            .ok_or(ClubError::MemberNotFound(id))?
            .is_admin = is_admin;
        Ok(())
    }

    /// Deactivate or reactivate a member. Existing attendance and schedules are left as they are.
    pub fn set_active(&mut self, id: MemberId, active: bool) -> Result<(), ClubError> {
        self.member_mut(id)
            .ok_or(ClubError::MemberNotFound(id))?
            .active = active;
        Ok(())
    }

    /// Remove a member who does not appear in any schedule. Drops their attendance and notifications.
    pub fn remove_member(&mut self, id: MemberId) -> Result<(), ClubError> {
        let idx = self
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or(ClubError::MemberNotFound(id))?;
        if self.schedules.values().any(|s| s.involves(id)) {
            return Err(ClubError::MemberInUse(id));
        }
        let member = self.members.remove(idx);
        for ids in self.attendance.values_mut() {
            ids.retain(|x| *x != id);
        }
        self.attendance.retain(|_, ids| !ids.is_empty());
        self.notifications.retain(|n| n.member_id != id);
        log::info!("Removed member {} ({})", member.name, id);
        Ok(())
    }

    pub fn member_stats(&self, id: MemberId) -> Result<MemberStats, ClubError> {
        self.member(id)
            .map(Member::stats)
            .ok_or(ClubError::MemberNotFound(id))
    }

    /// Check a member in for a date. Checking in twice is a no-op.
    pub fn check_in(&mut self, date: NaiveDate, id: MemberId) -> Result<(), ClubError> {
        let member = self.member(id).ok_or(ClubError::MemberNotFound(id))?;
        if !member.active {
            return Err(ClubError::MemberInactive(id));
        }
        let ids = self.attendance.entry(date).or_default();
        if !ids.contains(&id) {
            ids.push(id);
        }
        Ok(())
    }

    pub fn check_out(&mut self, date: NaiveDate, id: MemberId) -> Result<(), ClubError> {
        let ids = self
            .attendance
            .get_mut(&date)
            .ok_or(ClubError::NotCheckedIn(id))?;
        let idx = ids
            .iter()
            .position(|x| *x == id)
            .ok_or(ClubError::NotCheckedIn(id))?;
        ids.remove(idx);
        if ids.is_empty() {
            self.attendance.remove(&date);
        }
        Ok(())
    }

    /// Members checked in for a date, in check-in order.
    pub fn attendance(&self, date: NaiveDate) -> &[MemberId] {
        self.attendance.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn schedule(&self, date: NaiveDate) -> Option<&Schedule> {
        self.schedules.get(&date)
    }

    /// Remove the schedule for a date, unless results have been recorded against it.
    /// Placement notices already sent for the date are withdrawn.
    pub fn clear_schedule(&mut self, date: NaiveDate) -> Result<Schedule, ClubError> {
        let schedule = self
            .schedules
            .get(&date)
            .ok_or(ClubError::ScheduleNotFound(date))?;
        if schedule.has_results() {
            return Err(ClubError::ScheduleLocked(date));
        }
        self.withdraw_schedule_notices(date);
        self.schedules
            .remove(&date)
            .ok_or(ClubError::ScheduleNotFound(date))
    }

    /// Drop the court placement and sit-out notices sent for `date`. Returns how many were dropped.
    pub fn withdraw_schedule_notices(&mut self, date: NaiveDate) -> usize {
        let before = self.notifications.len();
        self.notifications.retain(|n| !n.is_schedule_notice(date));
        before - self.notifications.len()
    }

    /// Look up a scheduled match in any schedule.
    pub fn find_match(&self, id: MatchId) -> Option<&ScheduledMatch> {
        self.schedules.values().find_map(|s| s.get_match(id))
    }

    pub fn find_match_mut(&mut self, id: MatchId) -> Option<&mut ScheduledMatch> {
        self.schedules.values_mut().find_map(|s| s.get_match_mut(id))
    }

    /// A member's notifications, newest first.
    pub fn notifications_for(&self, id: MemberId, unread_only: bool) -> Vec<&Notification> {
        self.notifications
            .iter()
            .rev()
            .filter(|n| n.member_id == id && (!unread_only || !n.read))
            .collect()
    }
}
