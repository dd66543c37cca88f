//! Integration tests for CSV member import.

use badminton_club::{import_members_csv, Club, ClubError};

#[test]
fn imports_names_and_optional_emails() {
    let csv = "name,email\nAlice,alice@example.com\n Bob ,\nCarol,carol@example.com\n";
    let mut club = Club::new();
    let summary = import_members_csv(&mut club, csv.as_bytes()).unwrap();
    assert_eq!(summary.added.len(), 3);
    assert_eq!(summary.skipped, 0);

    let bob = club.find_member_by_name("bob").unwrap();
    assert_eq!(bob.name, "Bob");
    assert_eq!(bob.email, None);
    assert_eq!(
        club.find_member_by_name("Alice").unwrap().email.as_deref(),
        Some("alice@example.com")
    );
}

#[test]
fn email_column_is_optional() {
    let mut club = Club::new();
    let summary = import_members_csv(&mut club, "name\nDana\nEli\n".as_bytes()).unwrap();
    assert_eq!(summary.added.len(), 2);
}

#[test]
fn blank_and_duplicate_names_are_skipped() {
    let mut club = Club::new();
    club.add_member("Alice", None).unwrap();
    let csv = "name,email\nalice,\n,nobody@example.com\nFrank,\nfrank,\n";
    let summary = import_members_csv(&mut club, csv.as_bytes()).unwrap();
    assert_eq!(summary.added.len(), 1);
    assert_eq!(summary.skipped, 3);
    assert_eq!(club.members.len(), 2);
}

#[test]
fn missing_name_column_is_an_error() {
    let mut club = Club::new();
    let err = import_members_csv(&mut club, "email\nx@example.com\n".as_bytes()).unwrap_err();
    assert!(matches!(err, ClubError::Csv(_)));
    assert!(club.members.is_empty());
}
