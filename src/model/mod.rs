//! Entity model and per-attempt assignment state.
//!
//! # Key Components
//!
//! - **Records**: [`Course`], [`Student`] - plain input values
//! - **Problem**: [`SchedulingProblem`] - validated, read-only input snapshot
//! - **Arena**: [`Roster`] - capacity-bounded rosters and [`Placement`]s for one attempt
//! - **Output**: [`AssignmentSnapshot`] - scored student assignments and section rosters

mod course;
mod problem;
mod roster;
mod snapshot;
mod student;

pub use course::{Course, TimeSlot};
pub use problem::{Catalog, SchedulingProblem};
pub use roster::{Placement, Roster};
pub use snapshot::{AssignmentSnapshot, SectionSummary, StudentAssignment};
pub use student::{Student, MAX_PRIORITY};
