// ABOUTME: Core library for gradebook, containing the student record model and validation rules.
// ABOUTME: This crate defines the shared data types used by the store and the CLI.

pub mod grade;
pub mod record;
pub mod validate;

pub use grade::gpa_and_grade;
pub use record::{Gender, NewStudent, Student, StudentUpdate};
pub use validate::ValidationError;
