//! Validated input snapshot shared read-only by every attempt.

use super::course::{Course, TimeSlot};
use super::student::Student;
use crate::error::ValidationError;
use std::collections::HashMap;

/// Course list with a name index.
///
/// Course positions in the catalog are the course identifiers used by
/// rosters and solver variables; fallback searches walk courses in
/// catalog order.
#[derive(Debug, Clone)]
pub struct Catalog {
    courses: Vec<Course>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate course names.
    pub fn new(courses: Vec<Course>) -> Result<Self, ValidationError> {
        let mut by_name = HashMap::with_capacity(courses.len());
        for (idx, course) in courses.iter().enumerate() {
            if by_name.insert(course.name.clone(), idx).is_some() {
                return Err(ValidationError::DuplicateCourse(course.name.clone()));
            }
        }
        Ok(Self { courses, by_name })
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course(&self, idx: usize) -> &Course {
        &self.courses[idx]
    }

    /// Catalog position of the course with this name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Positions of all courses in `slot`, in catalog order.
    pub fn indices_in(&self, slot: TimeSlot) -> Vec<usize> {
        self.courses
            .iter()
            .enumerate()
            .filter(|(_, c)| c.time_slot == slot)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Courses and students for one optimization request.
///
/// Construction performs all input validation, so engines can assume a
/// non-empty catalog, a non-empty student list, unique course names and
/// priorities in range.
///
/// # Examples
///
/// ```
/// use u_enroll::model::{Course, SchedulingProblem, Student, TimeSlot};
///
/// let problem = SchedulingProblem::new(
///     vec![Course::new(1, "Bio", TimeSlot::Am, 10)],
///     vec![Student::new(1, 1).with_am_preferences(["Bio"])],
/// )
/// .unwrap();
/// assert_eq!(problem.students().len(), 1);
///
/// assert!(SchedulingProblem::new(vec![], vec![Student::new(1, 1)]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct SchedulingProblem {
    catalog: Catalog,
    students: Vec<Student>,
}

impl SchedulingProblem {
    pub fn new(courses: Vec<Course>, students: Vec<Student>) -> Result<Self, ValidationError> {
        if courses.is_empty() {
            return Err(ValidationError::EmptyCourses);
        }
        if students.is_empty() {
            return Err(ValidationError::EmptyStudents);
        }
        if let Some(bad) = students.iter().find(|s| !s.has_valid_priority()) {
            return Err(ValidationError::InvalidPriority {
                student_id: bad.id,
                priority: bad.priority,
            });
        }
        let catalog = Catalog::new(courses)?;
        Ok(Self { catalog, students })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn student(&self, idx: usize) -> &Student {
        &self.students[idx]
    }

    /// Total seats across the whole catalog.
    pub fn total_capacity(&self) -> u64 {
        self.catalog
            .courses()
            .iter()
            .map(|c| u64::from(c.capacity))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn courses() -> Vec<Course> {
        vec![
            Course::new(1, "Bio", TimeSlot::Am, 2),
            Course::new(2, "Art", TimeSlot::Pm, 3),
            Course::new(3, "Lab", TimeSlot::FullDay, 1),
            Course::new(4, "Chem", TimeSlot::Am, 4),
        ]
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = Catalog::new(courses()).unwrap();
        assert_eq!(catalog.index_of("Art"), Some(1));
        assert_eq!(catalog.index_of("Music"), None);
        assert_eq!(catalog.indices_in(TimeSlot::Am), vec![0, 3]);
        assert_eq!(catalog.indices_in(TimeSlot::FullDay), vec![2]);
    }

    #[test]
    fn test_duplicate_course_rejected() {
        let mut list = courses();
        list.push(Course::new(9, "Bio", TimeSlot::Pm, 5));
        assert_eq!(
            Catalog::new(list).unwrap_err(),
            ValidationError::DuplicateCourse("Bio".into())
        );
    }

    #[test]
    fn test_empty_inputs_rejected() {
        assert_eq!(
            SchedulingProblem::new(vec![], vec![Student::new(1, 1)]).unwrap_err(),
            ValidationError::EmptyCourses
        );
        assert_eq!(
            SchedulingProblem::new(courses(), vec![]).unwrap_err(),
            ValidationError::EmptyStudents
        );
    }

    #[test]
    fn test_bad_priority_rejected() {
        let err = SchedulingProblem::new(courses(), vec![Student::new(4, 0)]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidPriority {
                student_id: 4,
                priority: 0
            }
        );
    }

    #[test]
    fn test_total_capacity() {
        let problem = SchedulingProblem::new(courses(), vec![Student::new(1, 1)]).unwrap();
        assert_eq!(problem.total_capacity(), 10);
    }
}
