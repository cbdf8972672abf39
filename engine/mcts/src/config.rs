//! Search configuration parameters.

use std::time::Duration;

use crate::search::SearchError;

/// Configuration for UCT tree search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of select/expand/simulate/backup iterations per search.
    pub iterations: u32,

    /// Random rollouts run from each newly expanded node.
    /// The summed result is the value backed up the tree.
    pub simulations: u32,

    /// Exploration constant C in `Q/N + C * sqrt(2 ln N_parent / N)`.
    /// Higher values spread visits more evenly across children.
    pub exploration: f64,

    /// Worker threads the rollouts of one expansion are split across.
    pub rollout_threads: usize,

    /// Optional wall-clock budget, checked before each iteration.
    /// At least one iteration always runs.
    pub time_limit: Option<Duration>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            simulations: 100,
            exploration: 1.0,
            rollout_threads: 8,
            time_limit: None,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            iterations: 200,
            simulations: 16,
            exploration: 1.0,
            rollout_threads: 2,
            time_limit: None,
        }
    }

    /// Builder pattern: set number of iterations.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = n;
        self
    }

    /// Builder pattern: set rollouts per expansion.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.simulations = n;
        self
    }

    /// Builder pattern: set exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set rollout worker count.
    pub fn with_rollout_threads(mut self, threads: usize) -> Self {
        self.rollout_threads = threads;
        self
    }

    /// Builder pattern: set the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Reject parameter combinations the search cannot run with.
    ///
    /// `iterations == 0` is accepted here; the search reports it as an empty tree.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.simulations == 0 {
            return Err(SearchError::InvalidConfig(
                "simulations must be at least 1".to_string(),
            ));
        }
        if self.rollout_threads == 0 {
            return Err(SearchError::InvalidConfig(
                "rollout_threads must be at least 1".to_string(),
            ));
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "exploration must be a finite non-negative number, got {}",
                self.exploration
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.iterations, 1000);
        assert_eq!(config.rollout_threads, 8);
        assert!((config.exploration - 1.0).abs() < 1e-9);
        assert!(config.time_limit.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_iterations(100)
            .with_simulations(4)
            .with_exploration(0.5)
            .with_time_limit(Duration::from_millis(250));

        assert_eq!(config.iterations, 100);
        assert_eq!(config.simulations, 4);
        assert!((config.exploration - 0.5).abs() < 1e-9);
        assert_eq!(config.time_limit, Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(MctsConfig::default().with_simulations(0).validate().is_err());
        assert!(MctsConfig::default().with_rollout_threads(0).validate().is_err());
        assert!(MctsConfig::default().with_exploration(-1.0).validate().is_err());
        assert!(MctsConfig::default()
            .with_exploration(f64::NAN)
            .validate()
            .is_err());

        // An empty budget is a search-time failure, not a config error
        assert!(MctsConfig::default().with_iterations(0).validate().is_ok());
    }
}
