use std::{collections::HashSet, path::PathBuf};

use super::*;

fn test_directory() -> FixtureDirectory {
    FixtureDirectory::from_files(
        &PathBuf::from("tests/test.students.json"),
        &PathBuf::from("tests/test.teachers.json"),
    )
    .unwrap()
}

#[test]
fn read_valid_fixtures() {
    let directory = test_directory();
    assert_eq!(directory.students().count(), 2);
    assert_eq!(directory.teachers().count(), 1);
    let malevich = directory.student_by_id("S2").unwrap();
    assert_eq!(malevich.name, "Kazimir Malevich");
    assert!(malevich.courses_completed.is_empty());
    assert!(malevich.courses_ongoing.is_empty());
}

#[test]
fn bundled_fixtures_share_no_email() {
    let directory = FixtureDirectory::bundled().unwrap();
    let mut emails = HashSet::new();
    for email in directory
        .students()
        .map(|student| &student.email)
        .chain(directory.teachers().map(|teacher| &teacher.email))
    {
        assert!(emails.insert(email), "{email} appears twice");
    }
}

#[test]
fn duplicate_email_across_lists_is_rejected() {
    let result = FixtureDirectory::from_files(
        &PathBuf::from("tests/test.students.json"),
        &PathBuf::from("tests/test.duplicate_email.teachers.json"),
    );
    match result {
        Err(FixtureError::DuplicateEmail(email)) => assert_eq!(email, "warhol@factory.example"),
        other => panic!("expected a duplicate email, got {other:?}"),
    }
}

#[test]
fn non_existent_fixture_is_an_io_error() {
    let result = FixtureDirectory::from_files(
        &PathBuf::from("non_existent.json"),
        &PathBuf::from("tests/test.teachers.json"),
    );
    assert!(matches!(result, Err(FixtureError::Io { .. })));
}

#[test]
fn authenticate_student_before_teacher() {
    let directory = test_directory();
    let identity = directory
        .authenticate("warhol@factory.example", "soup")
        .unwrap();
    assert!(matches!(identity, Identity::Student(_)));
    assert_eq!(identity.id(), "S1");

    let identity = directory
        .authenticate("kandinsky@bauhaus.example", "point-line-plane")
        .unwrap();
    assert!(matches!(identity, Identity::Teacher(_)));
    assert_eq!(identity.id(), "T1");
}

#[test]
fn authenticate_is_exact_and_case_sensitive() {
    let directory = test_directory();
    assert!(directory
        .authenticate("Warhol@factory.example", "soup")
        .is_none());
    assert!(directory
        .authenticate("warhol@factory.example", "Soup")
        .is_none());
    assert!(directory
        .authenticate(" warhol@factory.example", "soup")
        .is_none());
    assert!(directory
        .authenticate("warhol@factory.example", "square")
        .is_none());
}
