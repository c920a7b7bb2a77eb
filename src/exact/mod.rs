//! Exact 0/1 integer program.
//!
//! Binary variables `x`, `y`, `z` seat each student in an AM, PM or
//! full-day course. Every student holds exactly one AM+PM pair or one
//! full-day course, seats never exceed capacity, and the objective is
//! the priority-weighted sum of per-student penalties:
//!
//! - `half_day_penalty` for each half-day course missing from the
//!   matching preference list
//! - `full_day_penalty` for any full-day course
//!
//! Solved with the HiGHS backend of `good_lp`, which stops at the
//! configured wall-clock limit and keeps its best incumbent.
//!
//! # Key Components
//!
//! - [`ExactConfig`] - time limit and penalty constants
//! - [`ExactRunner`] - formulation, solve and materialization
//! - [`ExactOutcome`] / [`SolveStatus`] - what happened and the snapshot

mod config;
mod formulation;
mod runner;

pub use config::ExactConfig;
pub use runner::{ExactOutcome, ExactRunner, SolveStatus};
