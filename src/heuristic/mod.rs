//! Priority-tiered randomized assigner.
//!
//! Each iteration shuffles students within their priority tier, assigns
//! them greedily (ranked preferences first, then any open course) and
//! scores the result. The best roster across iterations wins.
//!
//! # Key Components
//!
//! - [`HeuristicConfig`] - iteration budget, early stop, patience, seed
//! - [`HeuristicRunner`] - the search loop, with optional cancellation
//! - [`HeuristicResult`] - best snapshot, history and [`StopReason`]
//!
//! # Examples
//!
//! ```
//! use u_enroll::heuristic::{HeuristicConfig, HeuristicRunner};
//! use u_enroll::model::{Course, SchedulingProblem, Student, TimeSlot};
//!
//! let problem = SchedulingProblem::new(
//!     vec![
//!         Course::new(1, "Biology", TimeSlot::Am, 2),
//!         Course::new(2, "Art", TimeSlot::Pm, 2),
//!     ],
//!     vec![Student::new(1, 1)
//!         .with_am_preferences(["Biology"])
//!         .with_pm_preferences(["Art"])],
//! )
//! .unwrap();
//!
//! let result = HeuristicRunner::run(&problem, &HeuristicConfig::default().with_seed(42));
//! assert_eq!(result.best_score, 0.0);
//! ```

mod config;
mod greedy;
mod runner;

pub use config::{HeuristicConfig, PATIENCE_BEST_ONLY, PATIENCE_WITH_HISTORY};
pub use runner::{HeuristicResult, HeuristicRunner, StopReason};
