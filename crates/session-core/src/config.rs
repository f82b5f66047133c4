//! Call configuration

use serde::{Deserialize, Serialize};

use tonewire_media_api::OfferOptions;
use tonewire_morse_core::ToneTiming;

/// Controls the codec preference rewrite applied to answers.
///
/// Whether to restrict codecs is the embedder's decision; the coordinator
/// never sniffs the platform identity. With the policy enabled, the
/// answer's audio media line is rewritten to advertise exactly
/// `payload_types` and all codec-parameter (`a=fmtp:`) lines are stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecPolicy {
    /// Apply the rewrite at all
    pub enabled: bool,
    /// Payload types the rewritten media line advertises, in preference
    /// order
    pub payload_types: Vec<u8>,
}

impl Default for CodecPolicy {
    fn default() -> Self {
        // PCMU plus the telephone-event payload used for tone emission
        Self {
            enabled: true,
            payload_types: vec![0, 126],
        }
    }
}

impl CodecPolicy {
    /// A policy that leaves answers untouched
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            payload_types: Vec::new(),
        }
    }
}

/// Configuration for one coordinator instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallConfig {
    /// Options passed to offer creation
    pub offer_options: OfferOptions,
    /// Codec preference rewrite policy
    pub codec_policy: CodecPolicy,
    /// Tone pacing for outgoing messages
    pub timing: ToneTiming,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            offer_options: OfferOptions::default(),
            codec_policy: CodecPolicy::default(),
            timing: ToneTiming::default(),
        }
    }
}

impl CallConfig {
    /// Replace the codec policy
    pub fn with_codec_policy(mut self, policy: CodecPolicy) -> Self {
        self.codec_policy = policy;
        self
    }

    /// Replace the tone timing
    pub fn with_timing(mut self, timing: ToneTiming) -> Self {
        self.timing = timing;
        self
    }
}
