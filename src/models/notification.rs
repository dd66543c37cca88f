//! In-app notifications.

use crate::models::member::MemberId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type NotificationId = Uuid;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Placed on a court in a newly generated schedule.
    MatchScheduled,
    /// Attended but not placed in a match.
    SittingOut,
    ResultRecorded,
    /// Free-form message from an admin to all active members.
    Announcement,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub member_id: MemberId,
    pub kind: NotificationKind,
    pub message: String,
    /// Session date for schedule placements; withdrawn when that date's schedule changes.
    pub date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

impl Notification {
    pub fn new(member_id: MemberId, kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            member_id,
            kind,
            message: message.into(),
            date: None,
            created_at: Utc::now(),
            read: false,
        }
    }

    pub fn for_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// True for a court placement or sit-out notice belonging to `date`'s schedule.
    pub fn is_schedule_notice(&self, date: NaiveDate) -> bool {
        self.date == Some(date)
            && matches!(
                self.kind,
                NotificationKind::MatchScheduled | NotificationKind::SittingOut
            )
    }
}
