//! Offer/answer negotiation coordination for Tonewire.
//!
//! The [`CallCoordinator`] owns the lifecycle of a single call session: it
//! constructs both connection endpoints, drives the offer/answer exchange
//! (applying the codec preference rewrite to the answer), forwards
//! network-reachability candidates between the endpoints, binds the tone
//! sender when remote media arrives, and feeds outgoing Morse messages to
//! the tone scheduler. All cross-endpoint data transfer goes through the
//! coordinator; the endpoints never reference each other.

// Error handling
pub mod errors;

// Call/session identifiers, states and events
pub mod types;

// Call configuration
pub mod config;

// Codec preference rewrite over SDP answers
pub mod sdp;

// The negotiation coordinator
pub mod coordinator;

// Public exports
pub use config::{CallConfig, CodecPolicy};
pub use coordinator::CallCoordinator;
pub use errors::{CallError, CallResult};
pub use sdp::apply_codec_preference;
pub use types::{CallEvent, CallId, CallState, EndpointRole};
