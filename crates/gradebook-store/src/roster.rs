// ABOUTME: The in-memory student roster and its create/search/update/delete operations.
// ABOUTME: Owns every record, enforces roll number uniqueness, and persists after each mutation.

use std::path::{Path, PathBuf};

use gradebook_core::{NewStudent, Student, StudentUpdate, ValidationError};
use thiserror::Error;

use crate::csv_file::{self, CsvError};

/// Errors that can occur during roster operations.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no student with roll number {roll_no:?}")]
    NotFound { roll_no: String },

    #[error("roster file error: {0}")]
    Csv(#[from] CsvError),
}

/// How to look up students: by exact roll number or by a fragment of the
/// name. Both comparisons ignore case.
#[derive(Debug, Clone)]
pub enum SearchQuery {
    RollNo(String),
    NameContains(String),
}

/// The in-memory roster backed by a CSV file.
///
/// Mutations validate first, then apply, then rewrite the backing file in
/// full. A validation failure leaves the roster untouched; a save failure
/// after an applied mutation leaves memory ahead of disk. Two rosters over
/// the same file do not coordinate; the last writer wins.
pub struct Roster {
    path: PathBuf,
    students: Vec<Student>,
}

impl Roster {
    /// Open the roster at `path`, creating an empty file with a header
    /// row if none exists yet.
    pub fn open(path: &Path) -> Result<Self, RosterError> {
        csv_file::initialize(path)?;
        let students = csv_file::load(path)?;
        tracing::debug!("loaded {} students from {}", students.len(), path.display());
        Ok(Self {
            path: path.to_path_buf(),
            students,
        })
    }

    /// Path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records in insertion order.
    pub fn all(&self) -> &[Student] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Validate and add a new student, then persist. Fails without
    /// touching the roster if any field is invalid or the roll number is
    /// already taken under case-insensitive comparison.
    pub fn create(&mut self, new: NewStudent) -> Result<Student, RosterError> {
        new.validate()?;
        if self.index_of(&new.roll_no).is_some() {
            return Err(ValidationError::DuplicateRollNo {
                roll_no: new.roll_no,
            }
            .into());
        }

        let student = new.into_student();
        tracing::info!("adding student {} ({})", student.roll_no, student.name);
        self.students.push(student.clone());
        self.save()?;
        Ok(student)
    }

    /// Find students matching the query. Roll number lookups return at
    /// most one record in practice, since uniqueness is an invariant.
    pub fn find(&self, query: &SearchQuery) -> Vec<&Student> {
        match query {
            SearchQuery::RollNo(roll_no) => self
                .students
                .iter()
                .filter(|s| s.has_roll_no(roll_no))
                .collect(),
            SearchQuery::NameContains(fragment) => {
                let needle = fragment.to_lowercase();
                self.students
                    .iter()
                    .filter(|s| s.name.to_lowercase().contains(&needle))
                    .collect()
            }
        }
    }

    /// Apply a partial update to the student with the given roll number,
    /// then persist. Only supplied fields change; a marks change also
    /// re-derives GPA and grade. Validation runs before anything mutates.
    pub fn update(&mut self, roll_no: &str, update: StudentUpdate) -> Result<Student, RosterError> {
        let index = self.index_of(roll_no).ok_or_else(|| RosterError::NotFound {
            roll_no: roll_no.to_string(),
        })?;
        update.validate()?;

        update.apply(&mut self.students[index]);
        self.save()?;
        tracing::info!("updated student {}", self.students[index].roll_no);
        Ok(self.students[index].clone())
    }

    /// Remove the student with the given roll number, persist, and return
    /// the removed record for confirmation display.
    pub fn remove(&mut self, roll_no: &str) -> Result<Student, RosterError> {
        let index = self.index_of(roll_no).ok_or_else(|| RosterError::NotFound {
            roll_no: roll_no.to_string(),
        })?;

        let removed = self.students.remove(index);
        self.save()?;
        tracing::info!("removed student {} ({})", removed.roll_no, removed.name);
        Ok(removed)
    }

    fn index_of(&self, roll_no: &str) -> Option<usize> {
        self.students.iter().position(|s| s.has_roll_no(roll_no))
    }

    fn save(&self) -> Result<(), CsvError> {
        csv_file::save(&self.path, &self.students)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebook_core::Gender;
    use tempfile::TempDir;

    fn new_student(roll_no: &str, name: &str, marks: f64) -> NewStudent {
        NewStudent {
            roll_no: roll_no.to_string(),
            name: name.to_string(),
            age: 20,
            gender: Gender::Female,
            department: "CS".to_string(),
            semester: 3,
            marks,
        }
    }

    fn open_temp_roster(dir: &TempDir) -> Roster {
        Roster::open(&dir.path().join("students.csv")).unwrap()
    }

    #[test]
    fn open_remembers_the_backing_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.csv");

        let roster = Roster::open(&path).unwrap();
        assert_eq!(roster.path(), path);
    }

    #[test]
    fn create_derives_gpa_and_grade() {
        let dir = TempDir::new().unwrap();
        let mut roster = open_temp_roster(&dir);

        let student = roster.create(new_student("101", "Asha", 85.0)).unwrap();

        assert_eq!(student.gpa, 3.7);
        assert_eq!(student.grade, "A");
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn create_rejects_duplicate_roll_no_in_any_case() {
        let dir = TempDir::new().unwrap();
        let mut roster = open_temp_roster(&dir);
        roster.create(new_student("CS-101", "Asha", 85.0)).unwrap();

        let err = roster
            .create(new_student("cs-101", "Bilal", 60.0))
            .unwrap_err();

        assert!(matches!(
            err,
            RosterError::Validation(ValidationError::DuplicateRollNo { .. })
        ));
        assert_eq!(roster.len(), 1, "store must be unchanged after a rejected create");
    }

    #[test]
    fn create_rejects_invalid_fields_without_mutating() {
        let dir = TempDir::new().unwrap();
        let mut roster = open_temp_roster(&dir);

        let mut bad = new_student("101", "Asha", 85.0);
        bad.age = 120;
        assert!(roster.create(bad).is_err());
        assert!(roster.is_empty());
    }

    #[test]
    fn insertion_order_is_preserved() {
        let dir = TempDir::new().unwrap();
        let mut roster = open_temp_roster(&dir);
        roster.create(new_student("103", "Chen", 91.0)).unwrap();
        roster.create(new_student("101", "Asha", 85.0)).unwrap();
        roster.create(new_student("102", "Bilal", 47.5)).unwrap();

        let roll_nos: Vec<&str> = roster.all().iter().map(|s| s.roll_no.as_str()).collect();
        assert_eq!(roll_nos, ["103", "101", "102"]);
    }

    #[test]
    fn find_by_roll_no_ignores_case() {
        let dir = TempDir::new().unwrap();
        let mut roster = open_temp_roster(&dir);
        roster.create(new_student("CS-101", "Asha", 85.0)).unwrap();

        let found = roster.find(&SearchQuery::RollNo("cs-101".to_string()));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Asha");
    }

    #[test]
    fn find_by_name_fragment_matches_many() {
        let dir = TempDir::new().unwrap();
        let mut roster = open_temp_roster(&dir);
        roster.create(new_student("101", "Asha Khan", 85.0)).unwrap();
        roster.create(new_student("102", "Omar Khan", 60.0)).unwrap();
        roster.create(new_student("103", "Chen Wei", 91.0)).unwrap();

        let found = roster.find(&SearchQuery::NameContains("khan".to_string()));
        assert_eq!(found.len(), 2);

        let none = roster.find(&SearchQuery::NameContains("zz".to_string()));
        assert!(none.is_empty());
    }

    #[test]
    fn update_changes_only_supplied_fields() {
        let dir = TempDir::new().unwrap();
        let mut roster = open_temp_roster(&dir);
        roster.create(new_student("101", "Asha", 85.0)).unwrap();

        let updated = roster
            .update(
                "101",
                StudentUpdate {
                    marks: Some(35.0),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.marks, 35.0);
        assert_eq!(updated.gpa, 0.0);
        assert_eq!(updated.grade, "F");
        assert_eq!(updated.name, "Asha");
        assert_eq!(updated.age, 20);
    }

    #[test]
    fn update_missing_roll_no_fails_and_leaves_store_unchanged() {
        let dir = TempDir::new().unwrap();
        let mut roster = open_temp_roster(&dir);
        roster.create(new_student("101", "Asha", 85.0)).unwrap();

        let err = roster
            .update(
                "999",
                StudentUpdate {
                    marks: Some(50.0),
                    ..Default::default()
                },
            )
            .unwrap_err();

        assert!(matches!(err, RosterError::NotFound { .. }));
        assert_eq!(roster.all()[0].marks, 85.0);
    }

    #[test]
    fn update_with_out_of_range_field_leaves_store_unchanged() {
        let dir = TempDir::new().unwrap();
        let mut roster = open_temp_roster(&dir);
        roster.create(new_student("101", "Asha", 85.0)).unwrap();

        let err = roster
            .update(
                "101",
                StudentUpdate {
                    semester: Some(9),
                    ..Default::default()
                },
            )
            .unwrap_err();

        assert!(matches!(err, RosterError::Validation(_)));
        assert_eq!(roster.all()[0].semester, 3);
    }

    #[test]
    fn remove_returns_the_record_and_find_comes_back_empty() {
        let dir = TempDir::new().unwrap();
        let mut roster = open_temp_roster(&dir);
        roster.create(new_student("101", "Asha", 85.0)).unwrap();
        roster.create(new_student("102", "Bilal", 60.0)).unwrap();

        let removed = roster.remove("101").unwrap();
        assert_eq!(removed.name, "Asha");
        assert_eq!(roster.len(), 1);

        let found = roster.find(&SearchQuery::RollNo("101".to_string()));
        assert!(found.is_empty());
    }

    #[test]
    fn remove_missing_roll_no_fails() {
        let dir = TempDir::new().unwrap();
        let mut roster = open_temp_roster(&dir);

        let err = roster.remove("101").unwrap_err();
        assert!(matches!(err, RosterError::NotFound { .. }));
    }

    #[test]
    fn mutations_survive_a_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.csv");

        let mut roster = Roster::open(&path).unwrap();
        roster.create(new_student("101", "Asha", 85.0)).unwrap();
        roster.create(new_student("102", "Bilal", 47.5)).unwrap();
        roster
            .update(
                "102",
                StudentUpdate {
                    marks: Some(95.0),
                    ..Default::default()
                },
            )
            .unwrap();
        drop(roster);

        let reopened = Roster::open(&path).unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.all()[1].marks, 95.0);
        assert_eq!(reopened.all()[1].grade, "A+");
    }

    #[test]
    fn uniqueness_holds_after_delete_and_recreate() {
        let dir = TempDir::new().unwrap();
        let mut roster = open_temp_roster(&dir);
        roster.create(new_student("101", "Asha", 85.0)).unwrap();
        roster.remove("101").unwrap();
        roster.create(new_student("101", "Asha II", 70.0)).unwrap();

        assert_eq!(roster.len(), 1);
        assert_eq!(roster.all()[0].name, "Asha II");
    }
}
