//! Pipeline configuration.

use super::error::PipelineError;
use super::filter::FilterPolicy;

/// Configuration parameters for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Number of routes drawn per attempt (with replacement).
    pub sample_size: usize,

    /// Maximum number of samples drawn before giving up.
    pub max_attempts: usize,

    /// Fetch the routes of one sample concurrently.
    /// Results are still paired with their routes in sample order.
    pub concurrent_fetch: bool,

    /// Which arrivals count as "arriving soon".
    pub filter: FilterPolicy,
}

impl PipelineConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        sample_size: usize,
        max_attempts: usize,
        concurrent_fetch: bool,
        filter: FilterPolicy,
    ) -> Self {
        Self {
            sample_size,
            max_attempts,
            concurrent_fetch,
            filter,
        }
    }

    /// Reject parameters that would make a run meaningless.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.sample_size == 0 {
            return Err(PipelineError::InvalidConfig(
                "sample_size must be at least 1".to_string(),
            ));
        }

        if self.max_attempts == 0 {
            return Err(PipelineError::InvalidConfig(
                "max_attempts must be at least 1".to_string(),
            ));
        }

        if self.filter.eta_threshold_secs == 0 {
            return Err(PipelineError::InvalidConfig(
                "eta_threshold_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_size: 3,
            max_attempts: 20,
            concurrent_fetch: true,
            filter: FilterPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::filter::DEPARTURE_PENDING;

    #[test]
    fn default_config() {
        let config = PipelineConfig::default();

        assert_eq!(config.sample_size, 3);
        assert_eq!(config.max_attempts, 20);
        assert!(config.concurrent_fetch);
        assert_eq!(config.filter.eta_threshold_secs, 300);
        assert_eq!(config.filter.excluded_messages, vec![DEPARTURE_PENDING]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn custom_config() {
        let config = PipelineConfig::new(5, 2, false, FilterPolicy::default());

        assert_eq!(config.sample_size, 5);
        assert_eq!(config.max_attempts, 2);
        assert!(!config.concurrent_fetch);
    }

    #[test]
    fn zero_sample_size_invalid() {
        let config = PipelineConfig {
            sample_size: 0,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PipelineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_attempts_invalid() {
        let config = PipelineConfig {
            max_attempts: 0,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_threshold_invalid() {
        let mut config = PipelineConfig::default();
        config.filter.eta_threshold_secs = 0;
        assert!(config.validate().is_err());
    }
}
