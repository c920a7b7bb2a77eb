//! Priority weight tables.

use crate::error::ValidationError;
use crate::model::MAX_PRIORITY;
use std::collections::BTreeMap;

/// Named priority weight preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PriorityWeightMode {
    /// `{1: 1.0, 2: 0.8, 3: 0.6}`
    #[default]
    Standard,
    /// `{1: 1.0, 2: 0.6, 3: 0.3}`
    Strong,
    /// `{1: 1.0, 2: 0.9, 3: 0.8}`
    Balanced,
    /// Caller-supplied table.
    Custom,
}

/// Objective weight per priority value. Unmapped priorities weigh 1.0.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriorityWeights(BTreeMap<u8, f64>);

impl PriorityWeights {
    fn from_pairs(pairs: [(u8, f64); 3]) -> Self {
        Self(pairs.into_iter().collect())
    }

    pub fn standard() -> Self {
        Self::from_pairs([(1, 1.0), (2, 0.8), (3, 0.6)])
    }

    pub fn strong() -> Self {
        Self::from_pairs([(1, 1.0), (2, 0.6), (3, 0.3)])
    }

    pub fn balanced() -> Self {
        Self::from_pairs([(1, 1.0), (2, 0.9), (3, 0.8)])
    }

    /// Table for a preset. `Custom` has no table of its own.
    pub fn preset(mode: PriorityWeightMode) -> Option<Self> {
        match mode {
            PriorityWeightMode::Standard => Some(Self::standard()),
            PriorityWeightMode::Strong => Some(Self::strong()),
            PriorityWeightMode::Balanced => Some(Self::balanced()),
            PriorityWeightMode::Custom => None,
        }
    }

    pub fn custom(table: BTreeMap<u8, f64>) -> Self {
        Self(table)
    }

    pub fn weight(&self, priority: u8) -> f64 {
        self.0.get(&priority).copied().unwrap_or(1.0)
    }

    pub fn as_map(&self) -> &BTreeMap<u8, f64> {
        &self.0
    }

    /// Keys in `1..=MAX_PRIORITY`, weights finite and non-negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (&priority, &weight) in &self.0 {
            if !(1..=MAX_PRIORITY).contains(&priority) {
                return Err(ValidationError::InvalidConfig(format!(
                    "priority weight key {priority} outside 1..={MAX_PRIORITY}"
                )));
            }
            if !weight.is_finite() || weight < 0.0 {
                return Err(ValidationError::InvalidConfig(format!(
                    "priority {priority} has invalid weight {weight}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self::standard()
    }
}
