//! Best-of-N run coordination.

use super::config::SchedulerConfig;
use super::engine::{run_seed, EngineKind};
use super::report::{RunRecord, ScheduleOutcome, ScheduleReport};
use super::weights::PriorityWeights;
use crate::error::ValidationError;
use crate::heuristic::HeuristicRunner;
use crate::model::{AssignmentSnapshot, Course, SchedulingProblem, Student};
use crate::scoring::SatisfactionThresholds;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[cfg(feature = "exact")]
use crate::exact::{ExactConfig, ExactOutcome, ExactRunner, SolveStatus};
#[cfg(feature = "exact")]
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// One finished run.
struct RunAttempt {
    record: RunRecord,
    snapshot: Option<AssignmentSnapshot>,
}

/// Drives independent runs and keeps the lowest-scoring schedule.
///
/// Configuration, priority weights and reporting thresholds are resolved
/// once at construction, together with the engine.
///
/// # Examples
///
/// ```
/// use u_enroll::coordinator::{EngineKind, RunCoordinator, SchedulerConfig};
/// use u_enroll::model::{Course, Student, TimeSlot};
///
/// let config = SchedulerConfig::default().with_iterations(50).with_seed(1);
/// let coordinator = RunCoordinator::with_engine(config, EngineKind::Heuristic).unwrap();
///
/// let courses = vec![
///     Course::new(1, "Biology", TimeSlot::Am, 10),
///     Course::new(2, "Art", TimeSlot::Pm, 10),
/// ];
/// let students = vec![Student::new(1, 1)
///     .with_am_preferences(["Biology"])
///     .with_pm_preferences(["Art"])];
///
/// let outcome = coordinator.run(courses, students).unwrap();
/// assert_eq!(outcome.report().unwrap().score, 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct RunCoordinator {
    config: SchedulerConfig,
    weights: PriorityWeights,
    thresholds: SatisfactionThresholds,
    engine: EngineKind,
    #[cfg(feature = "exact")]
    exact: ExactConfig,
}

impl RunCoordinator {
    /// Validates `config` and selects the best available engine.
    pub fn new(config: SchedulerConfig) -> Result<Self, ValidationError> {
        Self::with_engine(config, EngineKind::detect())
    }

    /// Validates `config` and uses `engine`, or the heuristic when the
    /// exact engine is not compiled in.
    pub fn with_engine(config: SchedulerConfig, engine: EngineKind) -> Result<Self, ValidationError> {
        config.validate()?;
        let engine = if engine == EngineKind::Exact && !EngineKind::exact_available() {
            warn!("exact solver not available, using the heuristic engine");
            EngineKind::Heuristic
        } else {
            engine
        };
        info!("scheduling engine: {engine}");
        Ok(Self {
            weights: config.priority_weights()?,
            thresholds: config.thresholds()?,
            #[cfg(feature = "exact")]
            exact: config.exact_config(),
            config,
            engine,
        })
    }

    /// Replaces the exact solver settings derived from the config.
    #[cfg(feature = "exact")]
    pub fn with_exact_config(mut self, exact: ExactConfig) -> Self {
        self.exact = exact;
        self
    }

    pub fn engine(&self) -> EngineKind {
        self.engine
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn priority_weights(&self) -> &PriorityWeights {
        &self.weights
    }

    /// Validates the input and schedules it.
    ///
    /// Only validation failures are returned as errors. Runs that produce
    /// nothing yield [`ScheduleOutcome::NoValidSchedule`].
    pub fn run(
        &self,
        courses: Vec<Course>,
        students: Vec<Student>,
    ) -> Result<ScheduleOutcome, ValidationError> {
        let problem = SchedulingProblem::new(courses, students)?;
        Ok(self.run_problem(&problem))
    }

    pub fn run_problem(&self, problem: &SchedulingProblem) -> ScheduleOutcome {
        self.run_with_cancel(problem, None)
    }

    /// Schedules `problem`, stopping early when `cancel` is raised.
    ///
    /// Sequential dispatch checks the flag before each run. The heuristic
    /// also polls it between iterations, so a cancelled run still returns
    /// its best schedule so far.
    pub fn run_with_cancel(
        &self,
        problem: &SchedulingProblem,
        cancel: Option<Arc<AtomicBool>>,
    ) -> ScheduleOutcome {
        let start = Instant::now();
        let run_count = self.config.effective_run_count();
        let base_seed = self.config.seed.unwrap_or_else(rand::random);
        info!(
            "scheduling {} students into {} courses: {run_count} run(s), {} engine",
            problem.students().len(),
            problem.catalog().len(),
            self.engine
        );

        // Set once any run proves the model infeasible; later runs skip
        // straight to the heuristic.
        let exact_infeasible = AtomicBool::new(false);
        let cancelled = |cancel: &Option<Arc<AtomicBool>>| {
            cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed))
        };

        let attempts: Vec<RunAttempt> = if self.config.parallel && run_count > 1 {
            // Dispatch one pool-width batch at a time so the cancel flag is
            // honoured between batches.
            let batch = rayon::current_num_threads().max(1);
            let mut attempts = Vec::new();
            let mut next = 0;
            while next < run_count {
                if cancelled(&cancel) {
                    info!("cancelled before run {next}");
                    break;
                }
                let end = next.saturating_add(batch).min(run_count);
                let done: Vec<RunAttempt> = (next..end)
                    .into_par_iter()
                    .map(|run| {
                        let seed = run_seed(base_seed, run);
                        self.attempt(problem, run, seed, cancel.clone(), &exact_infeasible)
                    })
                    .collect();
                attempts.extend(done);
                next = end;
            }
            attempts
        } else {
            let mut attempts = Vec::new();
            for run in 0..run_count {
                if cancelled(&cancel) {
                    info!("cancelled before run {run}");
                    break;
                }
                let seed = run_seed(base_seed, run);
                let attempt = self.attempt(problem, run, seed, cancel.clone(), &exact_infeasible);
                let threshold = self.config.early_stop_score;
                let reached = attempt
                    .record
                    .score
                    .is_some_and(|s| threshold > 0.0 && s <= threshold);
                attempts.push(attempt);
                if reached {
                    info!(
                        "run {run} reached early stop threshold {}",
                        self.config.early_stop_score
                    );
                    break;
                }
            }
            attempts
        };

        let mut runs = Vec::with_capacity(attempts.len());
        let mut best: Option<(usize, EngineKind, AssignmentSnapshot)> = None;
        for attempt in attempts {
            let RunAttempt { record, snapshot } = attempt;
            if let Some(snapshot) = snapshot {
                let better = match &best {
                    Some((_, _, incumbent)) => snapshot.score < incumbent.score,
                    None => true,
                };
                if better {
                    best = Some((record.run, record.engine, snapshot));
                }
            }
            runs.push(record);
        }

        match best {
            Some((best_run, engine, snapshot)) => {
                let elapsed = start.elapsed();
                info!(
                    "best score {:.4} from run {best_run} in {elapsed:.2?}",
                    snapshot.score
                );
                ScheduleOutcome::Scheduled(Box::new(ScheduleReport::new(
                    snapshot,
                    runs,
                    best_run,
                    engine,
                    elapsed,
                    &self.thresholds,
                    self.config.min_course_fill,
                )))
            }
            None => {
                warn!("no valid schedule found after {} run(s)", runs.len());
                ScheduleOutcome::NoValidSchedule { runs }
            }
        }
    }

    #[cfg(feature = "exact")]
    fn attempt(
        &self,
        problem: &SchedulingProblem,
        run: usize,
        seed: u64,
        cancel: Option<Arc<AtomicBool>>,
        exact_infeasible: &AtomicBool,
    ) -> RunAttempt {
        match self.engine {
            EngineKind::Exact if exact_infeasible.load(Ordering::Relaxed) => {
                debug!("run {run}: model known infeasible, using the heuristic");
                self.fallback_attempt(problem, run, seed, cancel, false)
            }
            EngineKind::Exact => match self.exact_attempt(problem, run, seed) {
                Ok(attempt) => attempt,
                Err(status) => {
                    if status == SolveStatus::Infeasible {
                        exact_infeasible.store(true, Ordering::Relaxed);
                    }
                    warn!("run {run}: exact solve ended {status:?}, falling back to the heuristic");
                    self.fallback_attempt(problem, run, seed, cancel, true)
                }
            },
            EngineKind::Heuristic => self.heuristic_attempt(problem, run, seed, cancel),
        }
    }

    #[cfg(not(feature = "exact"))]
    fn attempt(
        &self,
        problem: &SchedulingProblem,
        run: usize,
        seed: u64,
        cancel: Option<Arc<AtomicBool>>,
        _exact_infeasible: &AtomicBool,
    ) -> RunAttempt {
        self.heuristic_attempt(problem, run, seed, cancel)
    }

    #[cfg(feature = "exact")]
    fn exact_attempt(
        &self,
        problem: &SchedulingProblem,
        run: usize,
        seed: u64,
    ) -> Result<RunAttempt, SolveStatus> {
        let mut order: Vec<usize> = (0..problem.students().len()).collect();
        if self.config.multiple_runs {
            order.shuffle(&mut StdRng::seed_from_u64(seed));
        }
        let outcome = ExactRunner::solve_in_order(problem, &self.weights, &self.exact, &order);
        Self::accept_exact(run, seed, outcome)
    }

    /// Turns a solver outcome into a run, or returns the status that
    /// calls for a fallback.
    #[cfg(feature = "exact")]
    fn accept_exact(run: usize, seed: u64, outcome: ExactOutcome) -> Result<RunAttempt, SolveStatus> {
        match outcome.snapshot {
            Some(snapshot) if outcome.status.is_solution_found() => {
                debug!(
                    "run {run}: exact score {:.4} ({:?})",
                    snapshot.score, outcome.status
                );
                Ok(RunAttempt {
                    record: RunRecord {
                        run,
                        engine: EngineKind::Exact,
                        seed,
                        score: Some(snapshot.score),
                        exact_attempted: true,
                        fell_back: false,
                    },
                    snapshot: Some(snapshot),
                })
            }
            _ => Err(outcome.status),
        }
    }

    #[cfg(feature = "exact")]
    fn fallback_attempt(
        &self,
        problem: &SchedulingProblem,
        run: usize,
        seed: u64,
        cancel: Option<Arc<AtomicBool>>,
        exact_attempted: bool,
    ) -> RunAttempt {
        let mut attempt = self.heuristic_attempt(problem, run, seed, cancel);
        attempt.record.exact_attempted = exact_attempted;
        attempt.record.fell_back = true;
        attempt
    }

    fn heuristic_attempt(
        &self,
        problem: &SchedulingProblem,
        run: usize,
        seed: u64,
        cancel: Option<Arc<AtomicBool>>,
    ) -> RunAttempt {
        let result =
            HeuristicRunner::run_with_cancel(problem, &self.config.heuristic_config(seed), cancel);
        let score = result.best.as_ref().map(|s| s.score);
        match score {
            Some(score) => debug!(
                "run {run}: heuristic score {score:.4} after {} iterations ({:?})",
                result.iterations, result.stop_reason
            ),
            None => debug!("run {run}: heuristic produced no schedule"),
        }
        RunAttempt {
            record: RunRecord {
                run,
                engine: EngineKind::Heuristic,
                seed,
                score,
                exact_attempted: false,
                fell_back: false,
            },
            snapshot: result.best,
        }
    }
}
