//! Student marks, averages and the in-memory result table.

use std::collections::BTreeMap;

use crate::error::ResultError;

/// Number of subjects every student is marked in
pub const SUBJECTS: usize = 3;

/// Lowest mark a subject can receive
pub const MIN_MARK: i32 = 0;

/// Highest mark a subject can receive
pub const MAX_MARK: i32 = 100;

/// Average needed to pass, inclusive
pub const PASS_MARK: f64 = 40.0;

/// Whether a student passed overall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Average at or above the pass mark
    Pass,
    /// Average below the pass mark
    Fail,
}

impl Outcome {
    /// Classify an average
    #[must_use]
    pub fn from_average(average: f64) -> Self {
        if average >= PASS_MARK { Self::Pass } else { Self::Fail }
    }

    /// Label shown to the user
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
        }
    }
}

/// Check that every mark lies in `MIN_MARK..=MAX_MARK`
///
/// # Errors
///
/// Returns `ResultError::InvalidMarks` for the first subject, in order, whose
/// mark is out of range.
pub fn validate_marks(marks: &[i32; SUBJECTS]) -> Result<(), ResultError> {
    match marks.iter().enumerate().find(|(_, m)| !(MIN_MARK..=MAX_MARK).contains(*m)) {
        Some((subject, &value)) => Err(ResultError::InvalidMarks { subject, value }),
        None => Ok(()),
    }
}

/// Arithmetic mean of the marks, without rounding
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn calculate_average(marks: &[i32; SUBJECTS]) -> f64 {
    let sum: f64 = marks.iter().copied().map(f64::from).sum();
    sum / SUBJECTS as f64
}

/// A student and their marks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    /// Unique roll number
    roll_number: u32,
    /// Full name
    name: String,
    /// One mark per subject
    marks: [i32; SUBJECTS],
}

impl Student {
    /// Create a student, rejecting out-of-range marks
    ///
    /// # Errors
    ///
    /// Returns `ResultError::InvalidMarks` if any mark is out of range.
    pub fn new(roll_number: u32, name: &str, marks: [i32; SUBJECTS]) -> Result<Self, ResultError> {
        validate_marks(&marks)?;
        Ok(Self { roll_number, name: name.to_string(), marks })
    }

    /// Roll number
    #[must_use]
    pub fn roll_number(&self) -> u32 {
        self.roll_number
    }

    /// Full name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Marks per subject
    #[must_use]
    pub fn marks(&self) -> &[i32; SUBJECTS] {
        &self.marks
    }

    /// Mean of the marks
    #[must_use]
    pub fn average(&self) -> f64 {
        calculate_average(&self.marks)
    }

    /// Pass or fail
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        Outcome::from_average(self.average())
    }
}

/// Students keyed by roll number, held in memory only
#[derive(Debug, Default)]
pub struct ResultTable {
    /// Students keyed by roll number
    students: BTreeMap<u32, Student>,
}

impl ResultTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and admit a new student
    ///
    /// # Errors
    ///
    /// Returns `ResultError::InvalidMarks` if a mark is out of range, or
    /// `ResultError::DuplicateRollNumber` if the roll number is taken. The
    /// table is unchanged in both cases.
    pub fn add(
        &mut self,
        roll_number: u32,
        name: &str,
        marks: [i32; SUBJECTS],
    ) -> Result<&Student, ResultError> {
        let student = Student::new(roll_number, name, marks)?;
        if self.students.contains_key(&roll_number) {
            return Err(ResultError::DuplicateRollNumber(roll_number));
        }
        tracing::debug!(roll_number, "adding student");
        Ok(self.students.entry(roll_number).or_insert(student))
    }

    /// Look a student up by roll number
    #[must_use]
    pub fn get(&self, roll_number: u32) -> Option<&Student> {
        self.students.get(&roll_number)
    }

    /// Number of students recorded
    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Whether no student has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
