// ABOUTME: Defines the Student record type, its creation input, and its partial-update companion.
// ABOUTME: Serde field names mirror the CSV header used by the persistence layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::grade::gpa_and_grade;
use crate::validate::{self, ValidationError};

/// Student gender as stored in the roster file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "OTHER")]
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::Other => "OTHER",
        };
        f.write_str(s)
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    /// Parse user input case-insensitively: "m", "F", "other" all work.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "M" => Ok(Gender::Male),
            "F" => Ok(Gender::Female),
            "OTHER" => Ok(Gender::Other),
            _ => Err(ValidationError::InvalidGender {
                value: s.to_string(),
            }),
        }
    }
}

/// One student's stored attributes plus the derived GPA and letter grade.
///
/// The serde names match the CSV header columns in order; the numeric
/// fields accept empty cells as zero when read back from a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(rename = "Roll_No")]
    pub roll_no: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Age", deserialize_with = "int_or_zero")]
    pub age: u32,
    #[serde(rename = "Gender")]
    pub gender: Gender,
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Semester", deserialize_with = "int_or_zero")]
    pub semester: u32,
    #[serde(rename = "Marks", deserialize_with = "float_or_zero")]
    pub marks: f64,
    #[serde(rename = "GPA", deserialize_with = "float_or_zero")]
    pub gpa: f64,
    #[serde(rename = "Grade")]
    pub grade: String,
}

impl Student {
    /// Roll numbers compare case-insensitively everywhere.
    pub fn has_roll_no(&self, roll_no: &str) -> bool {
        self.roll_no.to_lowercase() == roll_no.to_lowercase()
    }
}

fn int_or_zero<'de, D>(de: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(de)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse().map_err(serde::de::Error::custom)
}

fn float_or_zero<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(de)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse().map_err(serde::de::Error::custom)
}

/// Input fields for creating a student. GPA and grade are derived from
/// marks at creation time and never supplied by the caller.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub roll_no: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub department: String,
    pub semester: u32,
    pub marks: f64,
}

impl NewStudent {
    /// Check every field constraint except roll number uniqueness, which
    /// only the roster can decide.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::non_empty("roll number", &self.roll_no)?;
        validate::non_empty("name", &self.name)?;
        validate::int_range("age", self.age, 15, 100)?;
        validate::non_empty("department", &self.department)?;
        validate::int_range("semester", self.semester, 1, 8)?;
        validate::float_range("marks", self.marks, 0.0, 100.0)?;
        Ok(())
    }

    /// Build the full record, deriving GPA and grade from marks.
    pub fn into_student(self) -> Student {
        let (gpa, grade) = gpa_and_grade(self.marks);
        Student {
            roll_no: self.roll_no,
            name: self.name,
            age: self.age,
            gender: self.gender,
            department: self.department,
            semester: self.semester,
            marks: self.marks,
            gpa,
            grade: grade.to_string(),
        }
    }
}

/// A partial update. `None` leaves a field untouched; an empty name or
/// department also keeps the old value rather than failing validation,
/// unlike create where empty strings are rejected.
#[derive(Debug, Clone, Default)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub department: Option<String>,
    pub semester: Option<u32>,
    pub marks: Option<f64>,
}

impl StudentUpdate {
    /// Check every supplied field against the same ranges create uses.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(age) = self.age {
            validate::int_range("age", age, 15, 100)?;
        }
        if let Some(semester) = self.semester {
            validate::int_range("semester", semester, 1, 8)?;
        }
        if let Some(marks) = self.marks {
            validate::float_range("marks", marks, 0.0, 100.0)?;
        }
        Ok(())
    }

    /// Apply the supplied fields to a record. A marks change re-derives
    /// GPA and grade; otherwise the derived fields are left alone.
    pub fn apply(self, student: &mut Student) {
        if let Some(name) = self.name
            && !name.trim().is_empty()
        {
            student.name = name;
        }
        if let Some(age) = self.age {
            student.age = age;
        }
        if let Some(gender) = self.gender {
            student.gender = gender;
        }
        if let Some(department) = self.department
            && !department.trim().is_empty()
        {
            student.department = department;
        }
        if let Some(semester) = self.semester {
            student.semester = semester;
        }
        if let Some(marks) = self.marks {
            let (gpa, grade) = gpa_and_grade(marks);
            student.marks = marks;
            student.gpa = gpa;
            student.grade = grade.to_string();
        }
    }
}
