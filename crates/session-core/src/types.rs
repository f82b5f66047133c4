//! Identifiers, states and events for call sessions

use std::fmt;

use uuid::Uuid;

use tonewire_media_api::MediaStream;

/// Unique identifier for one call session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallId(Uuid);

impl CallId {
    /// Generate a fresh call id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CallId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which of the two connection endpoints is meant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointRole {
    /// The endpoint that captures local media and originates the offer
    Local,
    /// The endpoint that receives the offer and originates the answer
    Remote,
}

impl EndpointRole {
    /// The opposite endpoint
    pub fn peer(&self) -> Self {
        match self {
            EndpointRole::Local => EndpointRole::Remote,
            EndpointRole::Remote => EndpointRole::Local,
        }
    }
}

impl fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointRole::Local => write!(f, "local"),
            EndpointRole::Remote => write!(f, "remote"),
        }
    }
}

/// Negotiation progress of the active call.
///
/// The progression is linear: each state is reached exactly once per call,
/// there is no renegotiation. `Failed` is reachable from any negotiation
/// step and is exited only via hangup, which returns to `Idle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallState {
    /// No call active
    Idle,
    /// Local audio captured and attached to the local endpoint
    MediaAcquired,
    /// The offer exists but has not been applied
    OfferCreated,
    /// The offer is set on both endpoints
    OfferAppliedRemote,
    /// The answer exists but has not been applied
    AnswerCreated,
    /// The (rewritten) answer is set on both endpoints
    AnswerAppliedLocal,
    /// Candidate exchange is running and media can flow
    Connected,
    /// Negotiation failed; only hangup leaves this state
    Failed(String),
}

impl fmt::Display for CallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallState::Idle => write!(f, "idle"),
            CallState::MediaAcquired => write!(f, "media-acquired"),
            CallState::OfferCreated => write!(f, "offer-created"),
            CallState::OfferAppliedRemote => write!(f, "offer-applied-remote"),
            CallState::AnswerCreated => write!(f, "answer-created"),
            CallState::AnswerAppliedLocal => write!(f, "answer-applied-local"),
            CallState::Connected => write!(f, "connected"),
            CallState::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Notifications emitted by the coordinator over its broadcast channel
#[derive(Debug, Clone)]
pub enum CallEvent {
    /// The call moved to a new negotiation state
    StateChanged(CallId, CallState),
    /// Media from the peer arrived; the stream is ready for a sink
    RemoteMedia(CallId, MediaStream),
    /// The tone sender is live; messaging is available
    MessagingReady(CallId),
    /// The platform lacks tone sending; the call stays up without messaging
    MessagingUnavailable(CallId, String),
    /// A forwarded candidate was rejected by the receiving endpoint
    /// (non-fatal, negotiation continues)
    CandidateFailed(CallId, EndpointRole, String),
    /// The call ended and all resources were released
    Ended(CallId),
}
