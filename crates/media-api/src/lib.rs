//! Platform media capability contract for Tonewire.
//!
//! Tonewire's session layer drives two locally-created connection endpoints
//! through an offer/answer exchange and then pushes DTMF tones over the
//! established audio path. The endpoints themselves, local media acquisition,
//! and the tone emission primitive all belong to the embedding platform.
//! This crate defines the narrow contract the session layer consumes:
//! description/candidate/stream value types, the [`MediaEndpoint`],
//! [`MediaDevices`] and [`ToneSender`] traits, and the endpoint event stream.
//!
//! Platform implementations live outside this workspace; the session-core
//! integration tests ship an in-process loopback double.

// Error handling
pub mod error;

// Description, candidate, stream and option value types
pub mod types;

// Capability traits and endpoint events
pub mod endpoint;

// Public exports
pub use endpoint::{EndpointEvent, MediaDevices, MediaEndpoint, MediaPlatform, ToneSender};
pub use error::{MediaError, MediaResult};
pub use types::{
    AudioTrack, DescriptionKind, IceCandidate, MediaConstraints, MediaStream, OfferOptions,
    SessionDescription,
};
