//! Course section assignment engine.
//!
//! Seats students into morning and afternoon course sections, or a
//! single full-day course, without exceeding any course's capacity, so
//! that assignments follow each student's ranked preferences. Students
//! with a higher priority (lower number) are served first.
//!
//! - **Scoring**: normalized per-student satisfaction in `[0, 1]`, lower
//!   is better.
//! - **Heuristic**: shuffles students within priority tiers, assigns them
//!   greedily and keeps the best scoring roster.
//! - **Exact**: a 0/1 integer program minimizing priority-weighted
//!   preference penalties under a wall-clock limit (cargo feature `exact`).
//! - **Coordinator**: runs either engine one or more times, falls back to
//!   the heuristic when the exact solve yields nothing, and reports the
//!   best schedule.
//!
//! # Examples
//!
//! ```
//! use u_enroll::coordinator::{RunCoordinator, SchedulerConfig};
//! use u_enroll::model::{Course, Student, TimeSlot};
//!
//! let courses = vec![
//!     Course::new(1, "Biology", TimeSlot::Am, 20),
//!     Course::new(2, "Chemistry", TimeSlot::Am, 20),
//!     Course::new(3, "Art", TimeSlot::Pm, 20),
//!     Course::new(4, "Field Trip", TimeSlot::FullDay, 10),
//! ];
//! let students = vec![
//!     Student::new(1, 1)
//!         .with_am_preferences(["Biology", "Chemistry"])
//!         .with_pm_preferences(["Art"]),
//!     Student::new(2, 2)
//!         .with_am_preferences(["Field Trip", "Biology"])
//!         .with_pm_preferences(["Art"]),
//! ];
//!
//! let coordinator = RunCoordinator::new(SchedulerConfig::default().with_seed(42)).unwrap();
//! let outcome = coordinator.run(courses, students).unwrap();
//! let report = outcome.report().unwrap();
//! assert!(report.sections.iter().all(|s| s.enrolled_count <= s.capacity));
//! ```

pub mod coordinator;
pub mod error;
#[cfg(feature = "exact")]
pub mod exact;
pub mod heuristic;
pub mod model;
pub mod scoring;

pub use coordinator::{RunCoordinator, ScheduleOutcome, ScheduleReport, SchedulerConfig};
pub use error::ValidationError;
