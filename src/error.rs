//! Input and configuration validation errors.
//!
//! Validation is the only failure surfaced to callers. Solver
//! unavailability, infeasible models and runs that produce nothing are
//! absorbed by the coordinator and reported through logging.

/// Reason an optimization request was rejected before any work started.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The course catalog is empty.
    EmptyCourses,
    /// The student list is empty.
    EmptyStudents,
    /// Two courses share the same name.
    DuplicateCourse(String),
    /// A student's priority lies outside `1..=MAX_PRIORITY`.
    InvalidPriority { student_id: u32, priority: u8 },
    /// A configuration value is out of range or inconsistent.
    InvalidConfig(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyCourses => write!(f, "no courses supplied"),
            ValidationError::EmptyStudents => write!(f, "no students supplied"),
            ValidationError::DuplicateCourse(name) => {
                write!(f, "course name {name:?} appears more than once")
            }
            ValidationError::InvalidPriority {
                student_id,
                priority,
            } => write!(
                f,
                "student {student_id} has priority {priority}, expected 1..={}",
                crate::model::MAX_PRIORITY
            ),
            ValidationError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ValidationError {}
