//! Error types for the platform media contract

use thiserror::Error;

/// Errors surfaced by platform media implementations
#[derive(Error, Debug)]
pub enum MediaError {
    /// Local media acquisition failed (device missing, permission denied)
    #[error("Media acquisition failed: {0}")]
    MediaAcquisition(String),

    /// Offer or answer creation was rejected by the platform
    #[error("Description creation failed: {0}")]
    DescriptionCreation(String),

    /// A description could not be applied to an endpoint
    #[error("Description application failed: {0}")]
    DescriptionApplication(String),

    /// A candidate could not be applied to an endpoint
    #[error("Candidate application failed: {0}")]
    Candidate(String),

    /// The endpoint is not in a state that permits the operation
    #[error("Invalid endpoint state: {0}")]
    InvalidState(String),

    /// Any other platform-level failure
    #[error("Platform error: {0}")]
    Platform(String),
}

impl MediaError {
    /// Create a media acquisition error
    pub fn media_acquisition(msg: impl Into<String>) -> Self {
        Self::MediaAcquisition(msg.into())
    }

    /// Create a description creation error
    pub fn description_creation(msg: impl Into<String>) -> Self {
        Self::DescriptionCreation(msg.into())
    }

    /// Create a description application error
    pub fn description_application(msg: impl Into<String>) -> Self {
        Self::DescriptionApplication(msg.into())
    }

    /// Create a candidate application error
    pub fn candidate(msg: impl Into<String>) -> Self {
        Self::Candidate(msg.into())
    }

    /// Create an invalid state error
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Create a generic platform error
    pub fn platform(msg: impl Into<String>) -> Self {
        Self::Platform(msg.into())
    }
}

/// Result type for platform media operations
pub type MediaResult<T> = Result<T, MediaError>;
