//! Pipeline error types.

use crate::seoul::ArrivalFeedError;

/// Error from a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Pipeline parameters are unusable
    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),

    /// The feed failed in a way that affects every route
    #[error("arrival feed failed: {0}")]
    Feed(#[from] ArrivalFeedError),

    /// Every sample drawn within the attempt limit came back empty
    #[error("no arrival data after {attempts} sampling attempts")]
    NoData { attempts: usize },
}
