//! The negotiation coordinator.
//!
//! Owns both connection endpoints for a single call session and mediates
//! every cross-endpoint transfer: the offer/answer exchange, candidate
//! forwarding, and remote-media handling. Negotiation is linear and
//! single-pass; candidate pumps start only after both descriptions are
//! applied, so the platform's event channel is the only buffer candidates
//! ever need.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use tonewire_media_api::{
    EndpointEvent, MediaConstraints, MediaEndpoint, MediaPlatform, MediaStream,
    SessionDescription, ToneSender,
};
use tonewire_morse_core::ToneScheduler;

use crate::config::CallConfig;
use crate::errors::{CallError, CallResult};
use crate::sdp::apply_codec_preference;
use crate::types::{CallEvent, CallId, CallState, EndpointRole};

/// Everything owned by one call, torn down together on hangup
struct CallSession {
    id: CallId,
    local: Arc<dyn MediaEndpoint>,
    remote: Arc<dyn MediaEndpoint>,
    local_stream: MediaStream,
    sender: Option<Arc<dyn ToneSender>>,
    pumps: Vec<JoinHandle<()>>,
    state: CallState,
}

/// Drives two connection endpoints from idle to media flowing and feeds
/// outgoing messages to the tone scheduler.
///
/// One coordinator handles at most one call at a time. Progress is
/// observable through [`CallCoordinator::subscribe`].
pub struct CallCoordinator {
    platform: Arc<dyn MediaPlatform>,
    config: CallConfig,
    scheduler: ToneScheduler,
    session: Mutex<Option<CallSession>>,
    events: broadcast::Sender<CallEvent>,
}

impl CallCoordinator {
    /// Create a coordinator over the given platform
    pub fn new(platform: Arc<dyn MediaPlatform>, config: CallConfig) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        let scheduler = ToneScheduler::new(config.timing.clone());
        Arc::new(Self {
            platform,
            config,
            scheduler,
            session: Mutex::new(None),
            events,
        })
    }

    /// Subscribe to call events
    pub fn subscribe(&self) -> broadcast::Receiver<CallEvent> {
        self.events.subscribe()
    }

    /// The active call's negotiation state, or `Idle` when no call exists
    pub async fn state(&self) -> CallState {
        self.session
            .lock()
            .await
            .as_ref()
            .map(|s| s.state.clone())
            .unwrap_or(CallState::Idle)
    }

    /// True once the tone sender is live for the active call
    pub async fn messaging_available(&self) -> bool {
        self.session
            .lock()
            .await
            .as_ref()
            .is_some_and(|s| s.sender.is_some())
    }

    /// Start a call: construct both endpoints, acquire local audio, run the
    /// offer/answer exchange, then begin candidate forwarding.
    ///
    /// Fails with [`CallError::AlreadyActive`] while a session exists
    /// (including one stuck in `Failed`). On media-acquisition failure both
    /// endpoints are closed and no session remains; on negotiation failure
    /// the session is kept in `Failed` until hangup.
    pub async fn start_call(self: &Arc<Self>) -> CallResult<CallId> {
        let mut slot = self.session.lock().await;
        if slot.is_some() {
            return Err(CallError::already_active("hang up before starting a new call"));
        }

        let id = CallId::new();
        info!("starting call {}", id);

        let local = self
            .platform
            .create_endpoint()
            .await
            .map_err(|e| CallError::negotiation(format!("creating local endpoint: {}", e)))?;
        let remote = match self.platform.create_endpoint().await {
            Ok(endpoint) => endpoint,
            Err(e) => {
                let _ = local.close().await;
                return Err(CallError::negotiation(format!("creating remote endpoint: {}", e)));
            }
        };
        debug!("created local and remote endpoint objects");

        // Take both event channels up front; anything emitted during
        // negotiation waits in the channel until the pumps start.
        let local_events = match local.take_events().await {
            Ok(events) => events,
            Err(e) => {
                let _ = local.close().await;
                let _ = remote.close().await;
                return Err(CallError::negotiation(format!("taking local events: {}", e)));
            }
        };
        let remote_events = match remote.take_events().await {
            Ok(events) => events,
            Err(e) => {
                let _ = local.close().await;
                let _ = remote.close().await;
                return Err(CallError::negotiation(format!("taking remote events: {}", e)));
            }
        };

        info!("requesting local audio stream");
        let constraints = MediaConstraints::audio_only();
        let stream = match self.platform.devices().get_user_media(&constraints).await {
            Ok(stream) => stream,
            Err(e) => {
                warn!("local media acquisition failed: {}", e);
                let _ = local.close().await;
                let _ = remote.close().await;
                return Err(CallError::media_acquisition(e.to_string()));
            }
        };
        if let Some(track) = stream.audio_tracks().first() {
            info!("using audio device: {}", track.label);
        }

        let mut session = CallSession {
            id,
            local,
            remote,
            local_stream: stream,
            sender: None,
            pumps: Vec::new(),
            state: CallState::Idle,
        };

        if let Err(e) = self.negotiate(&mut session).await {
            self.set_state(&mut session, CallState::Failed(e.to_string()));
            *slot = Some(session);
            return Err(e);
        }

        // Candidate exchange starts strictly after both descriptions are
        // applied on both endpoints.
        session.pumps.push(tokio::spawn(pump_events(
            local_events,
            EndpointRole::Local,
            session.remote.clone(),
            self.clone(),
            id,
        )));
        session.pumps.push(tokio::spawn(pump_events(
            remote_events,
            EndpointRole::Remote,
            session.local.clone(),
            self.clone(),
            id,
        )));

        self.set_state(&mut session, CallState::Connected);
        *slot = Some(session);
        Ok(id)
    }

    /// Encode and transmit a text message over the established media path.
    ///
    /// A no-op when no tone sender is live (messaging unavailable or call
    /// not connected). Rejects with [`CallError::Busy`] while a previous
    /// message is still draining.
    pub async fn send_message(&self, message: &str) -> CallResult<()> {
        let sender = {
            let slot = self.session.lock().await;
            slot.as_ref().and_then(|s| s.sender.clone())
        };
        let Some(sender) = sender else {
            debug!("no tone sender available, dropping message");
            return Ok(());
        };
        info!("sending message of {} characters", message.chars().count());
        self.scheduler.send(message, sender).await?;
        Ok(())
    }

    /// End the call: stop any in-flight tone drain, abort the candidate
    /// pumps, close both endpoints and discard the sender.
    ///
    /// Idempotent, and safe at any point of the call lifecycle including
    /// before negotiation finishes.
    pub async fn hangup(&self) -> CallResult<()> {
        // Cancel first so no emission can slip out while the session is
        // being torn down.
        self.scheduler.cancel().await;

        let mut slot = self.session.lock().await;
        let Some(mut session) = slot.take() else {
            debug!("hangup with no active call");
            return Ok(());
        };
        info!("ending call {}", session.id);

        for pump in session.pumps.drain(..) {
            pump.abort();
        }
        if let Err(e) = session.local.close().await {
            warn!("closing local endpoint: {}", e);
        }
        if let Err(e) = session.remote.close().await {
            warn!("closing remote endpoint: {}", e);
        }

        self.emit(CallEvent::Ended(session.id));
        self.emit(CallEvent::StateChanged(session.id, CallState::Idle));
        Ok(())
    }

    /// The offer/answer exchange. Runs with no candidate pump active, so
    /// the paired description applications cannot interleave with
    /// candidate delivery.
    async fn negotiate(&self, session: &mut CallSession) -> CallResult<()> {
        session
            .local
            .add_stream(session.local_stream.clone())
            .await
            .map_err(|e| CallError::negotiation(format!("attaching local stream: {}", e)))?;
        debug!("added local stream to local endpoint");
        self.set_state(session, CallState::MediaAcquired);

        let offer = session
            .local
            .create_offer(&self.config.offer_options)
            .await
            .map_err(|e| CallError::negotiation(format!("creating offer: {}", e)))?;
        debug!("offer from local endpoint:\n{}", offer.sdp);
        self.set_state(session, CallState::OfferCreated);

        // One logical step: the offer becomes the local endpoint's own
        // description and the remote endpoint's peer description.
        session
            .local
            .set_local_description(offer.clone())
            .await
            .map_err(|e| CallError::negotiation(format!("applying offer locally: {}", e)))?;
        session
            .remote
            .set_remote_description(offer)
            .await
            .map_err(|e| CallError::negotiation(format!("applying offer remotely: {}", e)))?;
        self.set_state(session, CallState::OfferAppliedRemote);

        let answer = session
            .remote
            .create_answer()
            .await
            .map_err(|e| CallError::negotiation(format!("creating answer: {}", e)))?;
        self.set_state(session, CallState::AnswerCreated);

        // The codec preference rewrite must land before the answer is set
        // on either endpoint.
        let answer =
            SessionDescription::answer(apply_codec_preference(&answer.sdp, &self.config.codec_policy));
        debug!("answer from remote endpoint:\n{}", answer.sdp);

        session
            .remote
            .set_local_description(answer.clone())
            .await
            .map_err(|e| CallError::negotiation(format!("applying answer remotely: {}", e)))?;
        session
            .local
            .set_remote_description(answer)
            .await
            .map_err(|e| CallError::negotiation(format!("applying answer locally: {}", e)))?;
        self.set_state(session, CallState::AnswerAppliedLocal);
        Ok(())
    }

    /// Bind the remote stream and construct the tone sender if the
    /// platform exposes the capability. A call without the capability
    /// stays connected; only messaging is disabled.
    async fn handle_remote_media(&self, call_id: CallId, stream: MediaStream) {
        info!("received remote stream");
        self.emit(CallEvent::RemoteMedia(call_id, stream));

        let mut slot = self.session.lock().await;
        let Some(session) = slot.as_mut() else {
            return;
        };
        if session.id != call_id || session.sender.is_some() {
            return;
        }

        let Some(track) = session.local_stream.audio_tracks().first().cloned() else {
            warn!("no local audio track to bind a tone sender to");
            self.emit(CallEvent::MessagingUnavailable(
                call_id,
                "no local audio track".to_string(),
            ));
            return;
        };

        match session.local.create_tone_sender(&track).await {
            Ok(Some(sender)) => {
                info!("created tone sender");
                session.sender = Some(sender);
                self.emit(CallEvent::MessagingReady(call_id));
            }
            Ok(None) => {
                warn!("platform does not expose tone sending, messaging disabled");
                self.emit(CallEvent::MessagingUnavailable(
                    call_id,
                    "tone sending is not supported by this platform".to_string(),
                ));
            }
            Err(e) => {
                warn!("creating tone sender failed: {}", e);
                self.emit(CallEvent::MessagingUnavailable(call_id, e.to_string()));
            }
        }
    }

    fn set_state(&self, session: &mut CallSession, state: CallState) {
        debug!("call {} state: {} -> {}", session.id, session.state, state);
        session.state = state.clone();
        self.emit(CallEvent::StateChanged(session.id, state));
    }

    fn emit(&self, event: CallEvent) {
        let _ = self.events.send(event);
    }
}

impl Drop for CallCoordinator {
    fn drop(&mut self) {
        if let Some(session) = self.session.get_mut().as_ref() {
            warn!("coordinator dropped with call {} still active", session.id);
        }
    }
}

/// Forward one endpoint's events: candidates go to the opposite endpoint,
/// remote media goes back to the coordinator. Runs until the endpoint's
/// channel closes or the call hangs up.
async fn pump_events(
    mut events: mpsc::Receiver<EndpointEvent>,
    source: EndpointRole,
    peer: Arc<dyn MediaEndpoint>,
    coordinator: Arc<CallCoordinator>,
    call_id: CallId,
) {
    while let Some(event) = events.recv().await {
        match event {
            EndpointEvent::IceCandidate(Some(candidate)) => {
                debug!("{} candidate: {}", source, candidate.candidate);
                if let Err(e) = peer.add_ice_candidate(candidate).await {
                    // A lost candidate degrades connectivity, it does not
                    // end the call.
                    warn!("failed to add {} candidate: {}", source, e);
                    coordinator.emit(CallEvent::CandidateFailed(call_id, source, e.to_string()));
                }
            }
            EndpointEvent::IceCandidate(None) => {
                debug!("{} endpoint finished gathering candidates", source);
            }
            EndpointEvent::RemoteStream(stream) => {
                coordinator.handle_remote_media(call_id, stream).await;
            }
        }
    }
    debug!("{} event pump finished", source);
}
