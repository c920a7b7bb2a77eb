//! Tier shuffle and greedy assignment pass.

use crate::model::{Catalog, Roster, SchedulingProblem, TimeSlot, MAX_PRIORITY};
use rand::seq::SliceRandom;
use rand::Rng;

/// Student positions grouped by priority; index 0 holds priority 1.
pub(crate) fn priority_tiers(problem: &SchedulingProblem) -> Vec<Vec<usize>> {
    let mut tiers = vec![Vec::new(); MAX_PRIORITY as usize];
    for (idx, student) in problem.students().iter().enumerate() {
        tiers[usize::from(student.priority) - 1].push(idx);
    }
    tiers
}

/// Shuffles each tier independently and concatenates them, priority 1
/// first, so ties within a tier are broken at random while tier order
/// is preserved.
pub(crate) fn tier_shuffle<R: Rng>(tiers: &[Vec<usize>], rng: &mut R) -> Vec<usize> {
    let mut order = Vec::with_capacity(tiers.iter().map(Vec::len).sum());
    for tier in tiers {
        let start = order.len();
        order.extend_from_slice(tier);
        order[start..].shuffle(rng);
    }
    order
}

/// First course with a free seat, trying ranked preferences first and
/// then the whole catalog in order. Only courses whose slot passes
/// `accepts` are considered; unknown preference names are skipped.
fn pick_course(
    catalog: &Catalog,
    roster: &Roster,
    preferences: &[String],
    accepts: fn(TimeSlot) -> bool,
) -> Option<usize> {
    let open = |idx: usize| accepts(catalog.course(idx).time_slot) && roster.has_room(idx);

    preferences
        .iter()
        .filter_map(|name| catalog.index_of(name))
        .find(|&idx| open(idx))
        .or_else(|| (0..catalog.len()).find(|&idx| open(idx)))
}

/// Assigns students greedily in `order` on a fresh roster.
///
/// Each student first gets a morning pick (AM or full-day course). Only
/// when that pick is a half-day AM course does the student get an
/// afternoon pick from the PM courses.
pub(crate) fn assign_greedy(problem: &SchedulingProblem, order: &[usize]) -> Roster {
    let catalog = problem.catalog();
    let mut roster = Roster::new(problem);

    for &s in order {
        let student = problem.student(s);
        let Some(am) = pick_course(catalog, &roster, &student.am_preferences, TimeSlot::covers_morning)
        else {
            continue;
        };
        if !roster.enroll(s, am) || catalog.course(am).time_slot != TimeSlot::Am {
            continue;
        }
        if let Some(pm) = pick_course(catalog, &roster, &student.pm_preferences, TimeSlot::is_afternoon)
        {
            roster.enroll(s, pm);
        }
    }

    roster
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Course, Student};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn problem(students: Vec<Student>) -> SchedulingProblem {
        SchedulingProblem::new(
            vec![
                Course::new(1, "Bio", TimeSlot::Am, 1),
                Course::new(2, "Chem", TimeSlot::Am, 1),
                Course::new(3, "Lab", TimeSlot::FullDay, 1),
                Course::new(4, "Art", TimeSlot::Pm, 1),
                Course::new(5, "Music", TimeSlot::Pm, 2),
            ],
            students,
        )
        .unwrap()
    }

    #[test]
    fn test_tiers_group_by_priority() {
        let p = problem(vec![
            Student::new(1, 3),
            Student::new(2, 1),
            Student::new(3, 3),
            Student::new(4, 5),
        ]);
        let tiers = priority_tiers(&p);
        assert_eq!(tiers.len(), 5);
        assert_eq!(tiers[0], vec![1]);
        assert_eq!(tiers[2], vec![0, 2]);
        assert_eq!(tiers[4], vec![3]);
    }

    #[test]
    fn test_tier_shuffle_preserves_tier_order() {
        let tiers = vec![vec![0, 1, 2, 3], vec![4, 5, 6], vec![], vec![7], vec![8, 9]];
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..20 {
            let order = tier_shuffle(&tiers, &mut rng);
            assert_eq!(order.len(), 10);
            let mut head = order[..4].to_vec();
            head.sort_unstable();
            assert_eq!(head, vec![0, 1, 2, 3]);
            let mut mid = order[4..7].to_vec();
            mid.sort_unstable();
            assert_eq!(mid, vec![4, 5, 6]);
            assert_eq!(order[7], 7);
        }
    }

    #[test]
    fn test_preferred_course_wins() {
        let p = problem(vec![Student::new(1, 1)
            .with_am_preferences(["Chem", "Bio"])
            .with_pm_preferences(["Music", "Art"])]);
        let roster = assign_greedy(&p, &[0]);
        let placement = roster.placement(0);
        assert_eq!(placement.am, Some(1));
        assert_eq!(placement.pm, Some(4));
        assert!(placement.full_day.is_none());
    }

    #[test]
    fn test_fallback_when_preferences_full() {
        let p = problem(vec![
            Student::new(1, 1).with_am_preferences(["Bio"]),
            Student::new(2, 1).with_am_preferences(["Bio"]),
        ]);
        let roster = assign_greedy(&p, &[0, 1]);
        assert_eq!(roster.placement(0).am, Some(0));
        // Bio is full; first open morning course in catalog order is Chem.
        assert_eq!(roster.placement(1).am, Some(1));
    }

    #[test]
    fn test_fallback_can_land_on_full_day() {
        let p = problem(vec![
            Student::new(1, 1).with_am_preferences(["Bio"]),
            Student::new(2, 1).with_am_preferences(["Chem"]),
            Student::new(3, 1).with_am_preferences(["Bio"]),
        ]);
        let roster = assign_greedy(&p, &[0, 1, 2]);
        let third = roster.placement(2);
        assert_eq!(third.full_day, Some(2));
        assert!(third.am.is_none() && third.pm.is_none(), "full day skips PM pick");
    }

    #[test]
    fn test_full_day_preference_skips_pm() {
        let p = problem(vec![Student::new(1, 1)
            .with_am_preferences(["Lab"])
            .with_pm_preferences(["Art"])]);
        let roster = assign_greedy(&p, &[0]);
        assert_eq!(roster.placement(0).full_day, Some(2));
        assert_eq!(roster.enrolled_count(3), 0);
    }

    #[test]
    fn test_pm_course_not_taken_in_morning() {
        let p = problem(vec![Student::new(1, 1).with_am_preferences(["Art", "Bio"])]);
        let roster = assign_greedy(&p, &[0]);
        assert_eq!(roster.placement(0).am, Some(0));
    }

    #[test]
    fn test_unknown_names_skipped() {
        let p = problem(vec![Student::new(1, 1).with_am_preferences(["Welding", "Chem"])]);
        let roster = assign_greedy(&p, &[0]);
        assert_eq!(roster.placement(0).am, Some(1));
    }

    #[test]
    fn test_student_unplaced_when_mornings_full() {
        let p = problem(vec![
            Student::new(1, 1).with_am_preferences(["Bio"]),
            Student::new(2, 1).with_am_preferences(["Chem"]),
            Student::new(3, 1),
            Student::new(4, 1),
        ]);
        // Two AM seats and one full-day seat for four students.
        let roster = assign_greedy(&p, &[0, 1, 2, 3]);
        assert!(roster.placement(0).pm.is_some());
        assert!(roster.placement(1).pm.is_some());
        assert_eq!(roster.placement(2).full_day, Some(2));
        assert!(roster.placement(3).is_empty());
        assert!(roster.within_capacity());
    }

    #[test]
    fn test_morning_only_when_afternoons_full() {
        let p = SchedulingProblem::new(
            vec![
                Course::new(1, "Bio", TimeSlot::Am, 2),
                Course::new(2, "Art", TimeSlot::Pm, 1),
            ],
            vec![
                Student::new(1, 1).with_pm_preferences(["Art"]),
                Student::new(2, 2).with_pm_preferences(["Art"]),
            ],
        )
        .unwrap();
        let roster = assign_greedy(&p, &[0, 1]);
        assert_eq!(roster.placement(0).pm, Some(1));
        let second = roster.placement(1);
        assert_eq!(second.am, Some(0));
        assert!(second.pm.is_none());
        assert!(second.is_consistent());
    }
}
