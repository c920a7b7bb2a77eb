//! Randomized assignment loop.
//!
//! # Algorithm
//!
//! 1. Shuffle students within each priority tier, tiers in ascending order
//! 2. Greedily assign them on a fresh roster
//! 3. Score the roster (sum of per-student satisfaction)
//! 4. Keep it if strictly better than the incumbent
//! 5. Stop on the iteration cap, the early-stop threshold, the patience
//!    window, or cancellation

use super::config::HeuristicConfig;
use super::greedy::{assign_greedy, priority_tiers, tier_shuffle};
use crate::model::{AssignmentSnapshot, Roster, SchedulingProblem};
use crate::scoring::satisfaction_score;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Progress is logged every this many iterations.
const PROGRESS_INTERVAL: usize = 500;

/// Why the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// Ran the configured number of iterations.
    IterationLimit,
    /// Best score reached the early-stop threshold.
    EarlyStop,
    /// No improvement within the patience window.
    Stagnation,
    /// Cancelled externally.
    Cancelled,
}

/// Result of a randomized assigner run.
#[derive(Debug, Clone)]
pub struct HeuristicResult {
    /// Best assignment found, `None` when no iteration completed.
    pub best: Option<AssignmentSnapshot>,

    /// Score of `best`; infinite when nothing was found.
    pub best_score: f64,

    /// Iterations evaluated.
    pub iterations: usize,

    /// Iteration that produced `best`.
    pub best_iteration: usize,

    pub stop_reason: StopReason,

    /// Score of every evaluated iteration, in order.
    pub score_history: Vec<f64>,

    /// Every improving snapshot in discovery order. Empty when
    /// `keep_only_best` is set.
    pub improvements: Vec<AssignmentSnapshot>,
}

impl HeuristicResult {
    pub fn is_found(&self) -> bool {
        self.best.is_some()
    }

    pub fn cancelled(&self) -> bool {
        self.stop_reason == StopReason::Cancelled
    }
}

/// Executes the randomized assigner.
pub struct HeuristicRunner;

impl HeuristicRunner {
    /// Runs the assigner to completion.
    pub fn run(problem: &SchedulingProblem, config: &HeuristicConfig) -> HeuristicResult {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the assigner with an optional cancellation token.
    ///
    /// The flag is polled between iterations; an iteration in progress
    /// always completes. The best assignment found so far is returned.
    pub fn run_with_cancel(
        problem: &SchedulingProblem,
        config: &HeuristicConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> HeuristicResult {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let tiers = priority_tiers(problem);
        let patience = config.effective_patience();

        let mut best: Option<(Roster, f64)> = None;
        let mut best_iteration = 0usize;
        let mut iterations = 0usize;
        let mut stop_reason = StopReason::IterationLimit;
        let mut score_history = Vec::with_capacity(config.iterations.min(1 << 16));
        let mut improvements = Vec::new();

        for iteration in 0..config.iterations {
            if cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                stop_reason = StopReason::Cancelled;
                break;
            }

            let order = tier_shuffle(&tiers, &mut rng);
            let roster = assign_greedy(problem, &order);
            let score = roster_score(problem, &roster);
            score_history.push(score);
            iterations += 1;

            let improved = match &best {
                Some((_, incumbent)) => score < *incumbent,
                None => true,
            };
            if improved {
                best_iteration = iteration;
                if !config.keep_only_best {
                    improvements.push(AssignmentSnapshot::capture(problem, &roster));
                }
                best = Some((roster, score));
            }

            let best_score = best.as_ref().map_or(f64::INFINITY, |(_, s)| *s);

            if config.early_stop_score > 0.0 && best_score <= config.early_stop_score {
                info!(
                    "reached early stop threshold {} at iteration {}",
                    config.early_stop_score, iteration
                );
                stop_reason = StopReason::EarlyStop;
                break;
            }

            if iteration - best_iteration > patience {
                info!("stopping after {patience} iterations without improvement");
                stop_reason = StopReason::Stagnation;
                break;
            }

            if (iteration + 1) % PROGRESS_INTERVAL == 0 {
                debug!(
                    "completed {} iterations, best score {best_score:.4}",
                    iteration + 1
                );
            }
        }

        let (best, best_score) = match best {
            Some((roster, score)) => {
                info!("best schedule score {score:.4} after {iterations} iterations");
                (Some(AssignmentSnapshot::capture(problem, &roster)), score)
            }
            None => {
                warn!("no valid schedule found");
                (None, f64::INFINITY)
            }
        };

        HeuristicResult {
            best,
            best_score,
            iterations,
            best_iteration,
            stop_reason,
            score_history,
            improvements,
        }
    }
}

/// Summed satisfaction of all students, in input order.
fn roster_score(problem: &SchedulingProblem, roster: &Roster) -> f64 {
    let catalog = problem.catalog();
    problem
        .students()
        .iter()
        .zip(roster.placements())
        .map(|(student, placement)| satisfaction_score(student, placement, catalog))
        .sum()
}
