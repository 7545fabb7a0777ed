// ABOUTME: The fixed marks-to-GPA mapping applied to every student record.
// ABOUTME: GPA and letter grade are always derived together and never set directly.

/// Map marks onto a (GPA, letter grade) pair.
///
/// Band lower bounds are inclusive: 90 earns an A+, 89.9 an A. Marks are
/// compared as given, with no rounding.
pub fn gpa_and_grade(marks: f64) -> (f64, &'static str) {
    if marks >= 90.0 {
        (4.0, "A+")
    } else if marks >= 80.0 {
        (3.7, "A")
    } else if marks >= 70.0 {
        (3.3, "B+")
    } else if marks >= 60.0 {
        (3.0, "B")
    } else if marks >= 50.0 {
        (2.7, "C+")
    } else if marks >= 40.0 {
        (2.0, "C")
    } else {
        (0.0, "F")
    }
}
