//! Randomized assigner configuration.

/// Patience window when only the best snapshot is retained.
pub const PATIENCE_BEST_ONLY: usize = 5000;

/// Patience window when every improving snapshot is retained.
pub const PATIENCE_WITH_HISTORY: usize = 2000;

/// Configuration for [`HeuristicRunner`](super::HeuristicRunner).
///
/// # Examples
///
/// ```
/// use u_enroll::heuristic::HeuristicConfig;
///
/// let config = HeuristicConfig::default()
///     .with_iterations(500)
///     .with_early_stop_score(0.1)
///     .with_seed(42);
/// assert_eq!(config.iterations, 500);
/// assert_eq!(config.effective_patience(), 5000);
/// ```
#[derive(Debug, Clone)]
pub struct HeuristicConfig {
    /// Maximum number of shuffle-assign-score iterations.
    pub iterations: usize,

    /// Stop once the best score is at or below this value. 0 disables.
    pub early_stop_score: f64,

    /// Retain only the best snapshot (`true`) or every improving
    /// snapshot (`false`). Also selects the default patience window.
    pub keep_only_best: bool,

    /// Non-improving iterations tolerated after the best one; the run
    /// stops on the next. `None` uses
    /// [`PATIENCE_BEST_ONLY`] or [`PATIENCE_WITH_HISTORY`].
    pub patience: Option<usize>,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            early_stop_score: 0.0,
            keep_only_best: true,
            patience: None,
            seed: None,
        }
    }
}

impl HeuristicConfig {
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_early_stop_score(mut self, score: f64) -> Self {
        self.early_stop_score = score;
        self
    }

    pub fn with_keep_only_best(mut self, keep: bool) -> Self {
        self.keep_only_best = keep;
        self
    }

    pub fn with_patience(mut self, n: usize) -> Self {
        self.patience = Some(n);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Patience window in effect, never below 1.
    pub fn effective_patience(&self) -> usize {
        let window = self.patience.unwrap_or(if self.keep_only_best {
            PATIENCE_BEST_ONLY
        } else {
            PATIENCE_WITH_HISTORY
        });
        window.max(1)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.early_stop_score.is_finite() || self.early_stop_score < 0.0 {
            return Err(format!(
                "early_stop_score must be finite and non-negative, got {}",
                self.early_stop_score
            ));
        }
        if self.patience == Some(0) {
            return Err("patience must be positive".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HeuristicConfig::default();
        assert_eq!(config.iterations, 1000);
        assert_eq!(config.early_stop_score, 0.0);
        assert!(config.keep_only_best);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_patience_defaults_follow_retention() {
        assert_eq!(HeuristicConfig::default().effective_patience(), 5000);
        assert_eq!(
            HeuristicConfig::default()
                .with_keep_only_best(false)
                .effective_patience(),
            2000
        );
        assert_eq!(
            HeuristicConfig::default().with_patience(30).effective_patience(),
            30
        );
    }

    #[test]
    fn test_validate_rejects_negative_threshold() {
        let config = HeuristicConfig::default().with_early_stop_score(-1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_patience() {
        let config = HeuristicConfig::default().with_patience(0);
        assert!(config.validate().is_err());
    }
}
