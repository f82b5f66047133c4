//! Capability traits implemented by the embedding media platform

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::MediaResult;
use crate::types::{
    AudioTrack, IceCandidate, MediaConstraints, MediaStream, OfferOptions, SessionDescription,
};

/// Asynchronous notifications emitted by a connection endpoint.
///
/// Candidates are emitted unboundedly after the endpoint's local description
/// is set; `IceCandidate(None)` signals end-of-candidates. The platform (not
/// the session layer) is responsible for buffering events emitted before the
/// consumer starts draining the channel.
#[derive(Debug, Clone)]
pub enum EndpointEvent {
    /// A network-reachability candidate, or `None` for end-of-candidates
    IceCandidate(Option<IceCandidate>),
    /// Media from the peer has started arriving
    RemoteStream(MediaStream),
}

/// One of the two connection endpoints participating in a call.
///
/// Implementations must tolerate `close` at any point in the negotiation,
/// including before any description has been set.
#[async_trait]
pub trait MediaEndpoint: Send + Sync {
    /// Create the offer half of the description exchange
    async fn create_offer(&self, options: &OfferOptions) -> MediaResult<SessionDescription>;

    /// Create the answer half of the description exchange.
    ///
    /// Only valid once a remote offer has been applied.
    async fn create_answer(&self) -> MediaResult<SessionDescription>;

    /// Apply a description this endpoint produced
    async fn set_local_description(&self, description: SessionDescription) -> MediaResult<()>;

    /// Apply a description the peer produced
    async fn set_remote_description(&self, description: SessionDescription) -> MediaResult<()>;

    /// Apply a candidate forwarded from the peer
    async fn add_ice_candidate(&self, candidate: IceCandidate) -> MediaResult<()>;

    /// Attach a locally-captured stream to this endpoint
    async fn add_stream(&self, stream: MediaStream) -> MediaResult<()>;

    /// Construct the tone-sending capability over a local audio track.
    ///
    /// Returns `Ok(None)` when the platform does not expose tone sending;
    /// the absence of the capability is not an error.
    async fn create_tone_sender(
        &self,
        track: &AudioTrack,
    ) -> MediaResult<Option<Arc<dyn ToneSender>>>;

    /// Take the endpoint's event channel. May be taken exactly once.
    async fn take_events(&self) -> MediaResult<mpsc::Receiver<EndpointEvent>>;

    /// Release all endpoint resources
    async fn close(&self) -> MediaResult<()>;
}

/// Local media acquisition
#[async_trait]
pub trait MediaDevices: Send + Sync {
    /// Request capture of local media matching the constraints.
    ///
    /// Fails with a platform-defined reason when the user denies access or
    /// no matching device exists.
    async fn get_user_media(&self, constraints: &MediaConstraints) -> MediaResult<MediaStream>;
}

/// The capability object through which discrete tone emissions are issued
/// once media is connected. At most one live sender exists per call, bound
/// to a single local audio track.
#[async_trait]
pub trait ToneSender: Send + Sync {
    /// Emit one tone for `duration`, followed by `gap` of silence
    async fn emit(&self, tone: u8, duration: Duration, gap: Duration) -> MediaResult<()>;
}

/// Factory for connection endpoints plus access to media acquisition.
///
/// One platform instance serves many calls; endpoints are created fresh
/// per call.
#[async_trait]
pub trait MediaPlatform: Send + Sync {
    /// Construct a fresh connection endpoint
    async fn create_endpoint(&self) -> MediaResult<Arc<dyn MediaEndpoint>>;

    /// The platform's media acquisition entry point
    fn devices(&self) -> Arc<dyn MediaDevices>;
}
