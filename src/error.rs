use std::fmt;

use thiserror::Error;

/// Boxed error produced by an external collaborator (mesh provider,
/// forward simulation, plotting sink, persistence backend).
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Workflow stage an external failure originated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Mesh,
    Simulation,
    Plotting,
    Persistence,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mesh => "mesh provider",
            Self::Simulation => "forward simulation",
            Self::Plotting => "plotting",
            Self::Persistence => "persistence",
        };
        f.write_str(name)
    }
}

/// Top-level error type for gravsynth.
#[derive(Debug, Error)]
pub enum GravsynthError {
    /// Malformed scenario or region parameters, detected before any work.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("shape mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Failure reported by an external collaborator, passed through unchanged.
    #[error("{stage} failed")]
    External {
        stage: Stage,
        #[source]
        source: CollaboratorError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GravsynthError {
    /// Wraps a collaborator failure without altering it.
    pub fn external(stage: Stage, source: impl Into<CollaboratorError>) -> Self {
        Self::External {
            stage,
            source: source.into(),
        }
    }
}

/// Convenience type alias for results using [`GravsynthError`].
pub type Result<T> = std::result::Result<T, GravsynthError>;
