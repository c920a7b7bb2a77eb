//! Materialized output of one optimization attempt.

use super::course::TimeSlot;
use super::problem::SchedulingProblem;
use super::roster::Roster;
use crate::scoring::satisfaction_score;

/// Courses and score for one student.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StudentAssignment {
    pub student_id: u32,
    pub am_course: Option<String>,
    pub pm_course: Option<String>,
    pub full_day_course: Option<String>,
    pub satisfaction_score: f64,
}

/// Roster view of one course.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionSummary {
    pub name: String,
    pub time_slot: TimeSlot,
    pub capacity: u32,
    pub enrolled_count: u32,
    /// Ids of enrolled students, in enrollment order.
    pub student_ids: Vec<u32>,
}

impl SectionSummary {
    /// Enrolled share of capacity; 0 for a zero-capacity course.
    pub fn fill_ratio(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            f64::from(self.enrolled_count) / f64::from(self.capacity)
        }
    }
}

/// Every student's courses and score, plus every course's roster.
///
/// `score` is the sum of per-student satisfaction scores. Students are
/// listed in input order and sections in catalog order, regardless of
/// the processing order used while searching.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentSnapshot {
    pub score: f64,
    pub students: Vec<StudentAssignment>,
    pub sections: Vec<SectionSummary>,
}

impl AssignmentSnapshot {
    /// Scores and materializes a roster.
    pub fn capture(problem: &SchedulingProblem, roster: &Roster) -> Self {
        let catalog = problem.catalog();
        let course_name = |idx: Option<usize>| idx.map(|i| catalog.course(i).name.clone());

        let students: Vec<StudentAssignment> = problem
            .students()
            .iter()
            .zip(roster.placements())
            .map(|(student, placement)| StudentAssignment {
                student_id: student.id,
                am_course: course_name(placement.am),
                pm_course: course_name(placement.pm),
                full_day_course: course_name(placement.full_day),
                satisfaction_score: satisfaction_score(student, placement, catalog),
            })
            .collect();

        let sections = catalog
            .courses()
            .iter()
            .enumerate()
            .map(|(idx, course)| SectionSummary {
                name: course.name.clone(),
                time_slot: course.time_slot,
                capacity: course.capacity,
                enrolled_count: roster.enrolled_count(idx) as u32,
                student_ids: roster
                    .enrolled(idx)
                    .iter()
                    .map(|&s| problem.student(s).id)
                    .collect(),
            })
            .collect();

        let score = students.iter().map(|s| s.satisfaction_score).sum();
        Self {
            score,
            students,
            sections,
        }
    }

    /// Looks up a student's assignment by id.
    pub fn student(&self, student_id: u32) -> Option<&StudentAssignment> {
        self.students.iter().find(|s| s.student_id == student_id)
    }

    /// Looks up a section by course name.
    pub fn section(&self, name: &str) -> Option<&SectionSummary> {
        self.sections.iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Course, Student};

    #[test]
    fn test_capture_scores_and_rosters() {
        let problem = SchedulingProblem::new(
            vec![
                Course::new(1, "Bio", TimeSlot::Am, 2),
                Course::new(2, "Chem", TimeSlot::Am, 2),
                Course::new(3, "Art", TimeSlot::Pm, 2),
            ],
            vec![
                Student::new(10, 1)
                    .with_am_preferences(["Bio", "Chem"])
                    .with_pm_preferences(["Art"]),
                Student::new(11, 2)
                    .with_am_preferences(["Bio", "Chem", "Art"])
                    .with_pm_preferences(["Art"]),
            ],
        )
        .unwrap();
        let mut roster = Roster::new(&problem);
        assert!(roster.enroll(0, 0));
        assert!(roster.enroll(0, 2));
        assert!(roster.enroll(1, 1));

        let snap = AssignmentSnapshot::capture(&problem, &roster);
        let first = snap.student(10).unwrap();
        assert_eq!(first.am_course.as_deref(), Some("Bio"));
        assert_eq!(first.pm_course.as_deref(), Some("Art"));
        assert_eq!(first.satisfaction_score, 0.0);

        let second = snap.student(11).unwrap();
        assert_eq!(second.am_course.as_deref(), Some("Chem"));
        assert!(second.pm_course.is_none());
        assert!((second.satisfaction_score - 0.5).abs() < 1e-12);

        assert!((snap.score - 0.5).abs() < 1e-12);
        let art = snap.section("Art").unwrap();
        assert_eq!(art.enrolled_count, 1);
        assert_eq!(art.student_ids, vec![10]);
        assert!((art.fill_ratio() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_capacity_fill_ratio() {
        let section = SectionSummary {
            name: "Closed".into(),
            time_slot: TimeSlot::Pm,
            capacity: 0,
            enrolled_count: 0,
            student_ids: vec![],
        };
        assert_eq!(section.fill_ratio(), 0.0);
    }
}
