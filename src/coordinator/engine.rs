//! Engine selection and per-run seeding.

/// Optimization engine used for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EngineKind {
    /// 0/1 integer program with a time limit.
    Exact,
    /// Priority-tiered randomized assigner.
    Heuristic,
}

impl EngineKind {
    /// Best engine compiled into this build.
    pub fn detect() -> Self {
        if Self::exact_available() {
            EngineKind::Exact
        } else {
            EngineKind::Heuristic
        }
    }

    pub fn exact_available() -> bool {
        cfg!(feature = "exact")
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineKind::Exact => write!(f, "exact"),
            EngineKind::Heuristic => write!(f, "heuristic"),
        }
    }
}

/// Seed for run `run`, derived from the request's base seed.
pub fn run_seed(base: u64, run: usize) -> u64 {
    base.wrapping_add((run as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_matches_features() {
        let expected = if cfg!(feature = "exact") {
            EngineKind::Exact
        } else {
            EngineKind::Heuristic
        };
        assert_eq!(EngineKind::detect(), expected);
    }

    #[test]
    fn test_run_seeds_differ() {
        assert_eq!(run_seed(42, 0), 42);
        assert_ne!(run_seed(42, 1), run_seed(42, 2));
        assert_eq!(run_seed(42, 3), run_seed(42, 3));
    }
}
