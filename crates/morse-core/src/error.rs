//! Error types for tone scheduling

use thiserror::Error;

/// Errors surfaced by the tone scheduler
#[derive(Error, Debug)]
pub enum MorseError {
    /// A previous message is still draining; the new send was rejected
    #[error("Tone scheduler busy: {0}")]
    Busy(String),
}

impl MorseError {
    /// Create a busy error
    pub fn busy(msg: impl Into<String>) -> Self {
        Self::Busy(msg.into())
    }
}

/// Result type for tone scheduling operations
pub type MorseResult<T> = Result<T, MorseError>;
