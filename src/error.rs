use thiserror::Error;

/// Errors produced by the taste matching engine.
///
/// Every error is raised synchronously at the point of detection; nothing is
/// retried and a failed operation leaves its inputs unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("frame sequence is empty")]
    EmptyFrames,

    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("feature blob of {len} bytes is not a whole {dim}-row f32 matrix")]
    InvalidBlob { len: usize, dim: usize },

    #[error("cannot remove a track from an empty profile")]
    EmptyProfileRemoval,

    #[error("similarity is undefined for an empty profile or zero-norm vector")]
    UndefinedSimilarity,
}

/// Broad classification callers use to decide user-facing handling.
///
/// `UndefinedSimilarity` is the only recoverable kind: the front end should
/// translate it into a "not enough data yet" message. The other kinds signal
/// a bug upstream (corrupted data or broken track bookkeeping) and should
/// alert an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    InconsistentState,
    UndefinedSimilarity,
}

impl EngineError {
    /// Returns the taxonomy kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyFrames | Self::DimensionMismatch { .. } | Self::InvalidBlob { .. } => {
                ErrorKind::InvalidInput
            }
            Self::EmptyProfileRemoval => ErrorKind::InconsistentState,
            Self::UndefinedSimilarity => ErrorKind::UndefinedSimilarity,
        }
    }

    /// Returns a machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyFrames => "EMPTY_FRAMES",
            Self::DimensionMismatch { .. } => "DIMENSION_MISMATCH",
            Self::InvalidBlob { .. } => "INVALID_BLOB",
            Self::EmptyProfileRemoval => "EMPTY_PROFILE_REMOVAL",
            Self::UndefinedSimilarity => "UNDEFINED_SIMILARITY",
        }
    }

    /// Whether the condition is expected during normal operation and can be
    /// surfaced to the end user rather than an operator.
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::UndefinedSimilarity)
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
