//! Exact optimizer configuration.

use std::time::Duration;

/// Configuration for [`ExactRunner`](super::ExactRunner).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_enroll::exact::ExactConfig;
///
/// let config = ExactConfig::default().with_time_limit(Duration::from_secs(5));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ExactConfig {
    /// Wall-clock budget for a single solve.
    pub time_limit: Duration,

    /// Charged per half-day course missing from the matching preference list.
    pub half_day_penalty: f64,

    /// Flat charge for any full-day course.
    pub full_day_penalty: f64,
}

impl Default for ExactConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(20),
            half_day_penalty: 0.5,
            full_day_penalty: 1.0,
        }
    }
}

impl ExactConfig {
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    pub fn with_half_day_penalty(mut self, penalty: f64) -> Self {
        self.half_day_penalty = penalty;
        self
    }

    pub fn with_full_day_penalty(mut self, penalty: f64) -> Self {
        self.full_day_penalty = penalty;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.time_limit.is_zero() {
            return Err("time_limit must be positive".into());
        }
        for (name, value) in [
            ("half_day_penalty", self.half_day_penalty),
            ("full_day_penalty", self.full_day_penalty),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be finite and non-negative, got {value}"));
            }
        }
        // A full day closes both preference lists at once.
        if self.full_day_penalty <= self.half_day_penalty {
            return Err(format!(
                "full_day_penalty ({}) must exceed half_day_penalty ({})",
                self.full_day_penalty, self.half_day_penalty
            ));
        }
        Ok(())
    }
}
