//! Error handling for Callweave
//!
//! All failures are per-episode and non-recoverable locally: a stage either
//! fully succeeds or the whole episode synthesis fails. Retries belong to
//! the calling batch driver.

use thiserror::Error;

/// Result type alias for Callweave operations
pub type Result<T> = std::result::Result<T, CallweaveError>;

/// Main error type for Callweave operations
#[derive(Error, Debug)]
pub enum CallweaveError {
    // Fragment loading errors
    #[error("Failed to decode fragment {path}: {reason}")]
    Decode {
        path: String,
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Fragment indices do not form a contiguous 0..N range: {details}")]
    MissingFragment { details: String },

    // Sequencing errors
    #[error("Episode contains no audio fragments")]
    EmptyEpisode,

    // Mixing errors
    #[error("Channel length mismatch: left has {left} samples, right has {right}")]
    ChannelLengthMismatch { left: usize, right: usize },

    // Dialogue boundary errors
    #[error("Invalid transcript: {reason}")]
    InvalidTranscript { reason: String },

    // Output errors
    #[error("Failed to write recording: {path}")]
    Write {
        path: String,
        #[source]
        source: hound::Error,
    },

    // Generic I/O
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CallweaveError {
    /// Get the error code for this error type
    ///
    /// Used by the batch driver to report failed episodes by error kind.
    pub fn error_code(&self) -> &'static str {
        match self {
            CallweaveError::Decode { .. } => "DECODE_ERROR",
            CallweaveError::MissingFragment { .. } => "MISSING_FRAGMENT",
            CallweaveError::EmptyEpisode => "EMPTY_EPISODE",
            CallweaveError::ChannelLengthMismatch { .. } => "CHANNEL_LENGTH_MISMATCH",
            CallweaveError::InvalidTranscript { .. } => "INVALID_TRANSCRIPT",
            CallweaveError::Write { .. } => "WRITE_ERROR",
            CallweaveError::Io(_) => "IO_ERROR",
            CallweaveError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Whether this error points at bad input rather than a defect in the
    /// pipeline itself
    ///
    /// `ChannelLengthMismatch` is the one variant that signals an internal
    /// invariant violation; everything else is attributable to the episode's
    /// input files or the transcript.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, CallweaveError::ChannelLengthMismatch { .. })
    }
}
