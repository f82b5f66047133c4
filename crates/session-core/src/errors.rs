//! Error types for call coordination

use thiserror::Error;

use tonewire_morse_core::MorseError;

/// Main error type for call operations
#[derive(Error, Debug)]
pub enum CallError {
    /// A call is already active; only one session exists at a time
    #[error("Call already active: {0}")]
    AlreadyActive(String),

    /// Local media acquisition failed; the call was aborted
    #[error("Media acquisition failed: {0}")]
    MediaAcquisition(String),

    /// The offer/answer exchange failed; the call is in a failed state
    /// reachable only via hangup
    #[error("Negotiation failed: {0}")]
    Negotiation(String),

    /// A message send was rejected because a previous message is still
    /// draining
    #[error("Messaging busy: {0}")]
    Busy(String),
}

impl CallError {
    /// Create an already-active error
    pub fn already_active(msg: impl Into<String>) -> Self {
        Self::AlreadyActive(msg.into())
    }

    /// Create a media acquisition error
    pub fn media_acquisition(msg: impl Into<String>) -> Self {
        Self::MediaAcquisition(msg.into())
    }

    /// Create a negotiation error
    pub fn negotiation(msg: impl Into<String>) -> Self {
        Self::Negotiation(msg.into())
    }
}

impl From<MorseError> for CallError {
    fn from(err: MorseError) -> Self {
        match err {
            MorseError::Busy(msg) => Self::Busy(msg),
        }
    }
}

/// Result type for call operations
pub type CallResult<T> = Result<T, CallError>;
