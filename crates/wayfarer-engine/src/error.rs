//! Engine error types

use thiserror::Error;
use wayfarer_providers::ProviderError;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The controller loop executed more stages than the cap allows.
    /// This signals a router/stage contract bug, not bad user input: some
    /// stage returned without writing its field.
    #[error("stage limit exceeded after {limit} executions; a stage left its field unwritten")]
    StageLimitExceeded { limit: usize },

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
}
