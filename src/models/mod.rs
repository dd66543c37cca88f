//! Data structures for the club: players, matches, members, schedules, notifications.

mod club;
mod game;
mod member;
mod notification;
mod player;
mod schedule;

pub use club::{Club, ClubError};
pub use game::{DoublesMatch, Side, Team};
pub use member::{Member, MemberId, MemberStats};
pub use notification::{Notification, NotificationId, NotificationKind};
pub use player::{Player, PlayerId};
pub use schedule::{MatchId, MatchResult, Schedule, ScheduleId, ScheduledMatch};
