//! Tone timing configuration

use serde::{Deserialize, Serialize};

/// Timing parameters for tone emission.
///
/// The defaults match the classic DTMF-Morse demo cadence: 100 ms dots,
/// 300 ms dashes, a 50 ms inter-tone gap, 1500 ms word spacing, and DTMF
/// digit `8` as the signal tone for both dots and dashes (the duration,
/// not the tone id, distinguishes them).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneTiming {
    /// Dot tone duration in milliseconds
    pub dot_ms: u64,
    /// Dash tone duration in milliseconds
    pub dash_ms: u64,
    /// Silence after each tone in milliseconds
    pub gap_ms: u64,
    /// Effective duration of a word-space in milliseconds
    pub word_space_ms: u64,
    /// DTMF tone id used for every signal
    pub tone: u8,
}

impl Default for ToneTiming {
    fn default() -> Self {
        Self {
            dot_ms: 100,
            dash_ms: 300,
            gap_ms: 50,
            word_space_ms: 1500,
            tone: 8,
        }
    }
}
