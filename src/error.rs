//! Error channel between a handler and the boundary adapter.

use crate::outcome::Outcome;

/// Why a handler did not return a body.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// A deliberate non-success response.
    #[error("{0}")]
    Outcome(#[from] Outcome),

    /// Anything the handler did not anticipate.
    #[error(transparent)]
    Failure(#[from] anyhow::Error),
}

impl HandlerError {
    /// True for a deliberate outcome, false for an unexpected failure.
    pub fn is_outcome(&self) -> bool {
        matches!(self, Self::Outcome(_))
    }
}

pub type HandlerResult<T> = Result<T, HandlerError>;
