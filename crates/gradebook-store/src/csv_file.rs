// ABOUTME: Stateless CSV adapter for the roster file.
// ABOUTME: Handles the fixed header row and text/typed coercion in both directions.

use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::Path;

use gradebook_core::Student;
use thiserror::Error;

/// The canonical header row, in column order.
pub const HEADER: [&str; 9] = [
    "Roll_No",
    "Name",
    "Age",
    "Gender",
    "Department",
    "Semester",
    "Marks",
    "GPA",
    "Grade",
];

/// Errors that can occur while reading or writing the roster file.
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Ensure a roster file exists at `path`, writing the header row into a
/// fresh file. Creates parent directories if they do not exist. An
/// existing file is left untouched, whatever its contents.
pub fn initialize(path: &Path) -> Result<(), CsvError> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    save(path, &[])
}

/// Read every record from the roster file, in file order.
///
/// A missing file is an empty roster, not an error. A row that fails to
/// parse aborts the whole load; partial results are never returned.
/// Empty numeric cells coerce to zero rather than failing.
pub fn load(path: &Path) -> Result<Vec<Student>, CsvError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut reader = csv::Reader::from_reader(file);
    let mut students = Vec::new();
    for row in reader.deserialize() {
        students.push(row?);
    }
    Ok(students)
}

/// Rewrite the roster file from scratch: header first, then one row per
/// record in the given order. The header is written even for an empty
/// record set so the file always round-trips.
///
/// The rewrite is not atomic; a crash mid-save can leave a truncated
/// file behind.
pub fn save(path: &Path, students: &[Student]) -> Result<(), CsvError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(HEADER)?;
    for student in students {
        writer.serialize(student)?;
    }
    writer.flush()?;
    Ok(())
}
