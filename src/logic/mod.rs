//! Club business logic: match generation, rosters, scheduling, results, notifications.

mod generator;
mod notifications;
mod results;
mod roster;
mod schedule;

pub use generator::{generate_matches, MatchGeneration, PLAYERS_PER_MATCH};
pub use notifications::{announce, mark_all_read, mark_read, notify, notify_for_date};
pub use results::{clear_result, record_result};
pub use roster::{import_members_csv, roster_for_date, ImportSummary};
pub use schedule::schedule_matches;
