//! Per-student satisfaction score.
//!
//! Score is a normalized rank penalty in `[0, 1]`, lower is better:
//!
//! - Half-day course at 0-indexed rank `p` contributes `p`; a course
//!   missing from the list contributes `len(list)`. Each scored list adds
//!   `len(list) - 1` to the normalizing maximum.
//! - A full-day course is ranked against both lists independently and
//!   replaces the half-day computation.
//! - Empty preference lists are not scored.
//!
//! The score is 0 whenever the maximum is 0, so a student with no
//! assignment at all is indistinguishable from a perfectly satisfied
//! one. Optimization behavior depends on this, so it is kept as is.

use crate::model::{Catalog, Placement, Student};

/// Course names chosen for one student.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CourseChoice<'a> {
    pub am: Option<&'a str>,
    pub pm: Option<&'a str>,
    pub full_day: Option<&'a str>,
}

impl<'a> CourseChoice<'a> {
    /// Resolves a roster placement into course names.
    pub fn from_placement(placement: &Placement, catalog: &'a Catalog) -> Self {
        let name = |idx: Option<usize>| idx.map(|i| catalog.course(i).name.as_str());
        Self {
            am: name(placement.am),
            pm: name(placement.pm),
            full_day: name(placement.full_day),
        }
    }
}

/// Contribution and maximum for one course against one ranked list.
///
/// `None` for an empty list.
fn rank_penalty(prefs: &[String], course: &str) -> Option<(usize, usize)> {
    if prefs.is_empty() {
        return None;
    }
    let contribution = prefs
        .iter()
        .position(|p| p == course)
        .unwrap_or(prefs.len());
    Some((contribution, prefs.len() - 1))
}

/// Scores a choice of course names against ranked preference lists.
///
/// # Examples
///
/// ```
/// use u_enroll::scoring::{score_choice, CourseChoice};
///
/// let am = vec!["Bio".to_string(), "Chem".to_string(), "Art".to_string()];
/// let choice = CourseChoice { am: Some("Chem"), ..Default::default() };
/// assert!((score_choice(&am, &[], &choice) - 0.5).abs() < 1e-12);
/// ```
pub fn score_choice(am_prefs: &[String], pm_prefs: &[String], choice: &CourseChoice<'_>) -> f64 {
    let mut total = 0usize;
    let mut max = 0usize;
    let mut add = |penalty: Option<(usize, usize)>| {
        if let Some((p, m)) = penalty {
            total += p;
            max += m;
        }
    };

    match choice.full_day {
        Some(course) => {
            add(rank_penalty(am_prefs, course));
            add(rank_penalty(pm_prefs, course));
        }
        None => {
            if let Some(course) = choice.am {
                add(rank_penalty(am_prefs, course));
            }
            if let Some(course) = choice.pm {
                add(rank_penalty(pm_prefs, course));
            }
        }
    }

    if max == 0 {
        return 0.0;
    }
    // An unlisted course contributes len against a maximum of len - 1.
    (total as f64 / max as f64).min(1.0)
}

/// Satisfaction score of `student` under `placement`.
pub fn satisfaction_score(student: &Student, placement: &Placement, catalog: &Catalog) -> f64 {
    score_choice(
        &student.am_preferences,
        &student.pm_preferences,
        &CourseChoice::from_placement(placement, catalog),
    )
}
