//! Run coordinator configuration.

use super::weights::{PriorityWeightMode, PriorityWeights};
use crate::error::ValidationError;
use crate::heuristic::HeuristicConfig;
use crate::scoring::SatisfactionThresholds;
use log::warn;
use std::collections::BTreeMap;

#[cfg(feature = "exact")]
use crate::exact::ExactConfig;

/// Scheduling request configuration.
///
/// # Examples
///
/// ```
/// use u_enroll::coordinator::{PriorityWeightMode, SchedulerConfig};
///
/// let config = SchedulerConfig::default()
///     .with_iterations(2000)
///     .with_multiple_runs(5)
///     .with_priority_weight(PriorityWeightMode::Strong)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.effective_run_count(), 5);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SchedulerConfig {
    /// Heuristic iteration cap per run.
    pub iterations: usize,

    /// Courses filled below this ratio are reported as under-filled.
    pub min_course_fill: f64,

    /// Stop once a score at or below this value is reached. 0 disables.
    pub early_stop_score: f64,

    pub multiple_runs: bool,

    /// Runs to attempt when `multiple_runs` is set.
    pub run_count: usize,

    pub priority_weight: PriorityWeightMode,

    /// Overrides every preset when present.
    pub custom_weights: Option<BTreeMap<u8, f64>>,

    /// Reporting cut points merged over the defaults.
    pub satisfaction_thresholds: Option<BTreeMap<String, f64>>,

    /// Exact solver wall-clock budget per solve.
    pub time_limit_seconds: u64,

    /// Base seed; each run derives its own.
    pub seed: Option<u64>,

    /// Dispatch runs on the rayon thread pool.
    pub parallel: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            min_course_fill: 0.75,
            early_stop_score: 0.0,
            multiple_runs: false,
            run_count: 3,
            priority_weight: PriorityWeightMode::Standard,
            custom_weights: None,
            satisfaction_thresholds: None,
            time_limit_seconds: 20,
            seed: None,
            parallel: false,
        }
    }
}

impl SchedulerConfig {
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_min_course_fill(mut self, ratio: f64) -> Self {
        self.min_course_fill = ratio;
        self
    }

    pub fn with_early_stop_score(mut self, score: f64) -> Self {
        self.early_stop_score = score;
        self
    }

    /// Enables multi-run mode with `n` runs.
    pub fn with_multiple_runs(mut self, n: usize) -> Self {
        self.multiple_runs = true;
        self.run_count = n;
        self
    }

    pub fn with_priority_weight(mut self, mode: PriorityWeightMode) -> Self {
        self.priority_weight = mode;
        self
    }

    pub fn with_custom_weights(mut self, weights: BTreeMap<u8, f64>) -> Self {
        self.custom_weights = Some(weights);
        self
    }

    pub fn with_satisfaction_thresholds(mut self, thresholds: BTreeMap<String, f64>) -> Self {
        self.satisfaction_thresholds = Some(thresholds);
        self
    }

    pub fn with_time_limit_seconds(mut self, seconds: u64) -> Self {
        self.time_limit_seconds = seconds;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Number of runs to attempt.
    pub fn effective_run_count(&self) -> usize {
        if self.multiple_runs {
            self.run_count
        } else {
            1
        }
    }

    /// Active priority weights. Custom weights win over any preset.
    ///
    /// `Custom` mode without a table uses the standard preset.
    pub fn priority_weights(&self) -> Result<PriorityWeights, ValidationError> {
        if let Some(table) = &self.custom_weights {
            let weights = PriorityWeights::custom(table.clone());
            weights.validate()?;
            return Ok(weights);
        }
        Ok(PriorityWeights::preset(self.priority_weight).unwrap_or_else(|| {
            warn!("custom priority weighting without custom_weights, using standard weights");
            PriorityWeights::standard()
        }))
    }

    /// Reporting thresholds with any overrides applied.
    pub fn thresholds(&self) -> Result<SatisfactionThresholds, ValidationError> {
        match &self.satisfaction_thresholds {
            Some(overrides) => SatisfactionThresholds::with_overrides(overrides),
            None => Ok(SatisfactionThresholds::default()),
        }
    }

    /// Heuristic settings for one run.
    pub fn heuristic_config(&self, seed: u64) -> HeuristicConfig {
        HeuristicConfig::default()
            .with_iterations(self.iterations)
            .with_early_stop_score(self.early_stop_score)
            .with_keep_only_best(true)
            .with_seed(seed)
    }

    #[cfg(feature = "exact")]
    pub fn exact_config(&self) -> ExactConfig {
        ExactConfig::default()
            .with_time_limit(std::time::Duration::from_secs(self.time_limit_seconds))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let invalid = |msg: String| Err(ValidationError::InvalidConfig(msg));

        if self.iterations == 0 {
            return invalid("iterations must be at least 1".into());
        }
        if self.multiple_runs && self.run_count == 0 {
            return invalid("run_count must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.min_course_fill) {
            return invalid(format!(
                "min_course_fill must lie in [0, 1], got {}",
                self.min_course_fill
            ));
        }
        if !self.early_stop_score.is_finite() || self.early_stop_score < 0.0 {
            return invalid(format!(
                "early_stop_score must be finite and non-negative, got {}",
                self.early_stop_score
            ));
        }
        if self.time_limit_seconds == 0 {
            return invalid("time_limit_seconds must be at least 1".into());
        }
        self.priority_weights()?;
        self.thresholds()?;
        Ok(())
    }
}
