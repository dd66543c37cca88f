//! Badminton club organizer: library with models, business logic and the HTTP API.

pub mod api;
pub mod logic;
pub mod models;

pub use logic::{
    announce, clear_result, generate_matches, import_members_csv, mark_all_read, mark_read,
    notify, notify_for_date, record_result, roster_for_date, schedule_matches, ImportSummary,
    MatchGeneration, PLAYERS_PER_MATCH,
};
pub use models::{
    Club, ClubError, DoublesMatch, MatchId, MatchResult, Member, MemberId, MemberStats,
    Notification, NotificationId, NotificationKind, Player, PlayerId, Schedule, ScheduleId,
    ScheduledMatch, Side, Team,
};
