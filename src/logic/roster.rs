//! Rosters: the generator input for a date, and bulk member import from CSV.

use crate::models::{Club, ClubError, Member, MemberId, Player};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Players checked in for `date`, in check-in order. Inactive or unknown members are skipped.
pub fn roster_for_date(club: &Club, date: NaiveDate) -> Vec<Player> {
    club.attendance(date)
        .iter()
        .filter_map(|&id| club.member(id))
        .filter(|m| m.active)
        .map(Member::as_player)
        .collect()
}

/// Outcome of a roster import.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ImportSummary {
    pub added: Vec<MemberId>,
    /// Rows with a blank or already-registered name.
    pub skipped: usize,
}

#[derive(Debug, Deserialize)]
struct MemberRecord {
    name: String,
    #[serde(default)]
    email: Option<String>,
}

/// Import members from a headered CSV with a `name` column and an optional `email` column.
///
/// Blank and duplicate names are skipped and counted; malformed CSV aborts the import
/// (rows before the bad one stay imported).
pub fn import_members_csv<R: Read>(club: &mut Club, reader: R) -> Result<ImportSummary, ClubError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut summary = ImportSummary::default();

    for record in rdr.deserialize::<MemberRecord>() {
        let record = record?;
        let email = record.email.filter(|e| !e.is_empty());
        match club.add_member(&record.name, email) {
            Ok(id) => summary.added.push(id),
            Err(e @ (ClubError::EmptyName | ClubError::DuplicateMemberName)) => {
                log::warn!("Skipping roster row {:?}: {}", record.name, e);
                summary.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    log::info!(
        "Imported {} member(s), skipped {}",
        summary.added.len(),
        summary.skipped
    );
    Ok(summary)
}
