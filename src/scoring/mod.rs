//! Satisfaction scoring.
//!
//! [`satisfaction_score`] is the single per-student measure used by every
//! engine and by result reporting. [`SatisfactionThresholds`] buckets
//! scores for display only.

mod satisfaction;
mod thresholds;

pub use satisfaction::{satisfaction_score, score_choice, CourseChoice};
pub use thresholds::{SatisfactionLevel, SatisfactionSummary, SatisfactionThresholds};
