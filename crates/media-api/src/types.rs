//! Value types exchanged across the platform media contract

use serde::{Deserialize, Serialize};

/// Whether a session description is the offer or the answer half
/// of the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DescriptionKind {
    /// Originates at the local endpoint
    Offer,
    /// Originates at the remote endpoint
    Answer,
}

/// An opaque negotiated session payload produced by one endpoint and
/// applied to both.
///
/// The session layer treats the SDP body as text; the only structured
/// operation performed on it is the codec preference rewrite applied to
/// answers before they are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDescription {
    /// Offer or answer
    pub kind: DescriptionKind,
    /// The SDP payload
    pub sdp: String,
}

impl SessionDescription {
    /// Create an offer description
    pub fn offer(sdp: impl Into<String>) -> Self {
        Self {
            kind: DescriptionKind::Offer,
            sdp: sdp.into(),
        }
    }

    /// Create an answer description
    pub fn answer(sdp: impl Into<String>) -> Self {
        Self {
            kind: DescriptionKind::Answer,
            sdp: sdp.into(),
        }
    }

    /// True when this description is an answer
    pub fn is_answer(&self) -> bool {
        self.kind == DescriptionKind::Answer
    }
}

/// An opaque network-reachability token emitted by an endpoint after its
/// local description is set. Each candidate must be delivered to the
/// opposite endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IceCandidate {
    /// The candidate payload, as produced by the platform
    pub candidate: String,
}

impl IceCandidate {
    /// Wrap a platform candidate payload
    pub fn new(candidate: impl Into<String>) -> Self {
        Self {
            candidate: candidate.into(),
        }
    }
}

/// A single audio track within a media stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioTrack {
    /// Platform track identifier
    pub id: String,
    /// Human-readable device label
    pub label: String,
}

impl AudioTrack {
    /// Create a track handle
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A media stream handle holding zero or more audio tracks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaStream {
    /// Platform stream identifier
    pub id: String,
    audio_tracks: Vec<AudioTrack>,
}

impl MediaStream {
    /// Create a stream with the given audio tracks
    pub fn new(id: impl Into<String>, audio_tracks: Vec<AudioTrack>) -> Self {
        Self {
            id: id.into(),
            audio_tracks,
        }
    }

    /// The stream's audio tracks, in platform order
    pub fn audio_tracks(&self) -> &[AudioTrack] {
        &self.audio_tracks
    }
}

/// Constraints passed to local media acquisition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaConstraints {
    /// Request audio capture
    pub audio: bool,
    /// Request video capture
    pub video: bool,
}

impl MediaConstraints {
    /// Audio capture only, no video
    pub fn audio_only() -> Self {
        Self {
            audio: true,
            video: false,
        }
    }
}

/// Options recognized by offer creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferOptions {
    /// Ask the peer to send audio (0 or 1)
    pub offer_to_receive_audio: u8,
    /// Ask the peer to send video (0 or 1)
    pub offer_to_receive_video: u8,
}

impl Default for OfferOptions {
    fn default() -> Self {
        Self {
            offer_to_receive_audio: 1,
            offer_to_receive_video: 0,
        }
    }
}
