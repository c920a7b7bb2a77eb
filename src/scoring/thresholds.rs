//! Reporting buckets for satisfaction scores.
//!
//! Thresholds only classify results for display; they never enter the
//! optimization objective.

use crate::error::ValidationError;
use std::collections::BTreeMap;

/// Quality bucket for a single satisfaction score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SatisfactionLevel {
    Perfect,
    Good,
    Partial,
    Poor,
    Unsatisfied,
}

/// Upper cut points for each bucket. Scores are lower-is-better, so a
/// score at or below `perfect` is [`SatisfactionLevel::Perfect`], and
/// anything above `poor` is [`SatisfactionLevel::Unsatisfied`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SatisfactionThresholds {
    pub perfect: f64,
    pub good: f64,
    pub partial: f64,
    pub poor: f64,
}

impl Default for SatisfactionThresholds {
    fn default() -> Self {
        Self {
            perfect: 0.2,
            good: 0.4,
            partial: 0.6,
            poor: 0.8,
        }
    }
}

impl SatisfactionThresholds {
    /// Merges caller overrides (keyed `perfect`, `good`, `partial`,
    /// `poor`) over the defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use u_enroll::scoring::SatisfactionThresholds;
    ///
    /// let mut custom = BTreeMap::new();
    /// custom.insert("perfect".to_string(), 0.1);
    /// let t = SatisfactionThresholds::with_overrides(&custom).unwrap();
    /// assert_eq!(t.perfect, 0.1);
    /// assert_eq!(t.poor, 0.8);
    /// ```
    pub fn with_overrides(overrides: &BTreeMap<String, f64>) -> Result<Self, ValidationError> {
        let mut thresholds = Self::default();
        for (key, &value) in overrides {
            let slot = match key.as_str() {
                "perfect" => &mut thresholds.perfect,
                "good" => &mut thresholds.good,
                "partial" => &mut thresholds.partial,
                "poor" => &mut thresholds.poor,
                other => {
                    return Err(ValidationError::InvalidConfig(format!(
                        "unknown satisfaction threshold {other:?}"
                    )))
                }
            };
            *slot = value;
        }
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Checks that cut points lie in `[0, 1]` and do not decrease.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let cuts = [self.perfect, self.good, self.partial, self.poor];
        if cuts.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(ValidationError::InvalidConfig(
                "satisfaction thresholds must lie in [0, 1]".into(),
            ));
        }
        if cuts.windows(2).any(|w| w[0] > w[1]) {
            return Err(ValidationError::InvalidConfig(
                "satisfaction thresholds must satisfy perfect <= good <= partial <= poor".into(),
            ));
        }
        Ok(())
    }

    pub fn classify(&self, score: f64) -> SatisfactionLevel {
        if score <= self.perfect {
            SatisfactionLevel::Perfect
        } else if score <= self.good {
            SatisfactionLevel::Good
        } else if score <= self.partial {
            SatisfactionLevel::Partial
        } else if score <= self.poor {
            SatisfactionLevel::Poor
        } else {
            SatisfactionLevel::Unsatisfied
        }
    }
}

/// Student counts per satisfaction bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SatisfactionSummary {
    pub perfect: usize,
    pub good: usize,
    pub partial: usize,
    pub poor: usize,
    pub unsatisfied: usize,
}

impl SatisfactionSummary {
    pub fn tally<I>(thresholds: &SatisfactionThresholds, scores: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut summary = Self::default();
        for score in scores {
            match thresholds.classify(score) {
                SatisfactionLevel::Perfect => summary.perfect += 1,
                SatisfactionLevel::Good => summary.good += 1,
                SatisfactionLevel::Partial => summary.partial += 1,
                SatisfactionLevel::Poor => summary.poor += 1,
                SatisfactionLevel::Unsatisfied => summary.unsatisfied += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.perfect + self.good + self.partial + self.poor + self.unsatisfied
    }
}
