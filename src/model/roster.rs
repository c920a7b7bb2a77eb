//! Per-attempt assignment arena.
//!
//! A [`Roster`] is allocated fresh for every attempt and owns all
//! mutable assignment state: one capacity-bounded roster per course and
//! one [`Placement`] per student. Nothing here is shared between
//! attempts, so attempts can run on separate threads without locking.

use super::course::TimeSlot;
use super::problem::{Catalog, SchedulingProblem};

/// Courses held by one student, as catalog positions.
///
/// At a stable point either `full_day` is set and both half-day fields
/// are empty, or `full_day` is empty and any subset of `am`/`pm` is set.
/// A student holding only a morning course is a partial outcome, not an
/// error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Placement {
    pub am: Option<usize>,
    pub pm: Option<usize>,
    pub full_day: Option<usize>,
}

impl Placement {
    pub fn is_empty(&self) -> bool {
        self.am.is_none() && self.pm.is_none() && self.full_day.is_none()
    }

    /// Holds either a full-day course or a morning/afternoon pair.
    pub fn is_complete(&self) -> bool {
        match self.full_day {
            Some(_) => self.am.is_none() && self.pm.is_none(),
            None => self.am.is_some() && self.pm.is_some(),
        }
    }

    /// Exclusivity invariant: a full-day course excludes half-day courses.
    pub fn is_consistent(&self) -> bool {
        self.full_day.is_none() || (self.am.is_none() && self.pm.is_none())
    }
}

/// Seat rosters and student placements for one attempt.
#[derive(Debug, Clone)]
pub struct Roster {
    capacities: Vec<usize>,
    slots: Vec<TimeSlot>,
    enrolled: Vec<Vec<usize>>,
    placements: Vec<Placement>,
}

impl Roster {
    /// Allocates an empty roster sized for `problem`.
    pub fn new(problem: &SchedulingProblem) -> Self {
        Self::for_catalog(problem.catalog(), problem.students().len())
    }

    pub fn for_catalog(catalog: &Catalog, num_students: usize) -> Self {
        let courses = catalog.courses();
        Self {
            capacities: courses.iter().map(|c| c.capacity as usize).collect(),
            slots: courses.iter().map(|c| c.time_slot).collect(),
            enrolled: courses
                .iter()
                .map(|c| Vec::with_capacity((c.capacity as usize).min(num_students)))
                .collect(),
            placements: vec![Placement::default(); num_students],
        }
    }

    /// Whether the course still has a free seat.
    pub fn has_room(&self, course: usize) -> bool {
        self.enrolled[course].len() < self.capacities[course]
    }

    pub fn enrolled_count(&self, course: usize) -> usize {
        self.enrolled[course].len()
    }

    /// Student positions enrolled in `course`, in enrollment order.
    pub fn enrolled(&self, course: usize) -> &[usize] {
        &self.enrolled[course]
    }

    pub fn placement(&self, student: usize) -> &Placement {
        &self.placements[student]
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Seats `student` in `course` if a seat is free and the slot it
    /// occupies is still open for the student.
    ///
    /// Returns `false` without side effects otherwise.
    pub fn enroll(&mut self, student: usize, course: usize) -> bool {
        if !self.has_room(course) {
            return false;
        }
        let placement = &mut self.placements[student];
        let field = match self.slots[course] {
            TimeSlot::Am if placement.full_day.is_none() => &mut placement.am,
            TimeSlot::Pm if placement.full_day.is_none() => &mut placement.pm,
            TimeSlot::FullDay if placement.am.is_none() && placement.pm.is_none() => {
                &mut placement.full_day
            }
            _ => return false,
        };
        if field.is_some() {
            return false;
        }
        *field = Some(course);
        self.enrolled[course].push(student);
        true
    }

    /// Whether every course is within capacity.
    pub fn within_capacity(&self) -> bool {
        self.enrolled
            .iter()
            .zip(&self.capacities)
            .all(|(roster, &cap)| roster.len() <= cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Course, Student};

    fn problem() -> SchedulingProblem {
        SchedulingProblem::new(
            vec![
                Course::new(1, "Bio", TimeSlot::Am, 1),
                Course::new(2, "Art", TimeSlot::Pm, 2),
                Course::new(3, "Lab", TimeSlot::FullDay, 1),
            ],
            vec![Student::new(1, 1), Student::new(2, 1), Student::new(3, 2)],
        )
        .unwrap()
    }

    #[test]
    fn test_enroll_respects_capacity() {
        let mut roster = Roster::new(&problem());
        assert!(roster.enroll(0, 0));
        assert!(!roster.enroll(1, 0), "Bio holds one seat");
        assert_eq!(roster.enrolled_count(0), 1);
        assert_eq!(roster.enrolled(0), &[0]);
        assert!(roster.within_capacity());
    }

    #[test]
    fn test_full_day_excludes_half_days() {
        let mut roster = Roster::new(&problem());
        assert!(roster.enroll(0, 2));
        assert!(!roster.enroll(0, 0));
        assert!(!roster.enroll(0, 1));
        assert!(roster.placement(0).is_complete());

        assert!(roster.enroll(1, 1));
        assert!(!roster.enroll(1, 2), "half-day holder cannot take full day");
        assert!(roster.placement(1).is_consistent());
    }

    #[test]
    fn test_slot_taken_once() {
        let mut roster = Roster::new(&problem());
        assert!(roster.enroll(2, 1));
        assert!(!roster.enroll(2, 1));
        assert_eq!(roster.enrolled_count(1), 1);
    }

    #[test]
    fn test_placement_states() {
        let empty = Placement::default();
        assert!(empty.is_empty());
        assert!(!empty.is_complete());

        let am_only = Placement {
            am: Some(0),
            ..Placement::default()
        };
        assert!(am_only.is_consistent());
        assert!(!am_only.is_complete());

        let bad = Placement {
            am: Some(0),
            pm: None,
            full_day: Some(2),
        };
        assert!(!bad.is_consistent());
    }

    #[test]
    fn test_huge_capacity_allocates_by_student_count() {
        let problem = SchedulingProblem::new(
            vec![
                Course::new(1, "Bio", TimeSlot::Am, u32::MAX),
                Course::new(2, "Art", TimeSlot::Pm, u32::MAX),
            ],
            vec![Student::new(1, 1)],
        )
        .unwrap();
        let mut roster = Roster::new(&problem);
        assert!(roster.has_room(0));
        assert!(roster.enroll(0, 0));
        assert!(roster.enroll(0, 1));
        assert!(roster.placement(0).is_complete());
        assert!(roster.within_capacity());
    }
}
