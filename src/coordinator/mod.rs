//! Best-of-N run coordination.
//!
//! Resolves priority weights and reporting thresholds from a
//! [`SchedulerConfig`], picks the exact engine when it is compiled in
//! (the heuristic otherwise), runs one or more independent attempts and
//! keeps the lowest-scoring schedule.
//!
//! # Key Components
//!
//! - [`SchedulerConfig`] - typed request configuration with defaults
//! - [`PriorityWeights`] / [`PriorityWeightMode`] - objective weight presets
//! - [`EngineKind`] - engine capability detection
//! - [`RunCoordinator`] - sequential or rayon-parallel run dispatch
//! - [`ScheduleOutcome`] / [`ScheduleReport`] - best schedule with fill,
//!   satisfaction and per-run statistics

mod config;
mod engine;
mod report;
mod runner;
mod weights;

pub use config::SchedulerConfig;
pub use engine::{run_seed, EngineKind};
pub use report::{FillStatistics, RunRecord, ScheduleOutcome, ScheduleReport};
pub use runner::RunCoordinator;
pub use weights::{PriorityWeightMode, PriorityWeights};
