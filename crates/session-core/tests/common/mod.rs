//! Shared loopback platform double for coordinator integration tests.
//!
//! Implements the platform capability contract fully in process: endpoints
//! emit canned SDP and a configurable number of candidates, the "wire"
//! hands the locally-attached stream to whichever endpoint applies the
//! answer as its own description, and every operation is recorded in a
//! per-run trace so tests can assert ordering invariants over whole call
//! flows.

#![allow(dead_code)]

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};

use tonewire_media_api::{
    AudioTrack, DescriptionKind, EndpointEvent, IceCandidate, MediaConstraints, MediaDevices,
    MediaEndpoint, MediaError, MediaPlatform, MediaResult, MediaStream, OfferOptions,
    SessionDescription, ToneSender,
};

pub const OFFER_SDP: &str = "v=0\r\n\
    o=- 1 2 IN IP4 127.0.0.1\r\n\
    s=-\r\n\
    t=0 0\r\n\
    m=audio 9 UDP/TLS/RTP/SAVPF 111 103 0 8 126\r\n\
    a=rtpmap:111 opus/48000/2\r\n\
    a=fmtp:111 minptime=10;useinbandfec=1\r\n\
    a=rtpmap:0 PCMU/8000\r\n";

pub const ANSWER_SDP: &str = "v=0\r\n\
    o=- 3 4 IN IP4 127.0.0.1\r\n\
    s=-\r\n\
    t=0 0\r\n\
    m=audio 9 UDP/TLS/RTP/SAVPF 111 103 0 8 126\r\n\
    a=rtpmap:111 opus/48000/2\r\n\
    a=fmtp:111 minptime=10;useinbandfec=1\r\n\
    a=rtpmap:0 PCMU/8000\r\n\
    a=rtpmap:126 telephone-event/8000\r\n\
    a=fmtp:126 0-15\r\n";

/// Ordered record of every platform operation, entries like
/// `"ep2:set_remote_description:offer"`.
#[derive(Default)]
pub struct OpTrace {
    entries: StdMutex<Vec<String>>,
}

impl OpTrace {
    pub fn record(&self, entry: impl Into<String>) {
        self.entries.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    /// Index of the first entry equal to `entry`
    pub fn position(&self, entry: &str) -> Option<usize> {
        self.entries().iter().position(|e| e == entry)
    }

    /// Index of the first entry starting with `prefix`
    pub fn first_with_prefix(&self, prefix: &str) -> Option<usize> {
        self.entries().iter().position(|e| e.starts_with(prefix))
    }

    pub fn count_with_prefix(&self, prefix: &str) -> usize {
        self.entries()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }
}

/// A description as it was applied to an endpoint
#[derive(Debug, Clone)]
pub struct AppliedDescription {
    pub endpoint: String,
    pub direction: &'static str,
    pub kind: DescriptionKind,
    pub sdp: String,
}

/// Failure/capability knobs for a platform instance
#[derive(Debug, Clone)]
pub struct LoopbackBehavior {
    pub deny_media: bool,
    pub tone_capable: bool,
    pub fail_candidates: bool,
    pub fail_answer: bool,
    pub candidates_per_endpoint: usize,
}

impl Default for LoopbackBehavior {
    fn default() -> Self {
        Self {
            deny_media: false,
            tone_capable: true,
            fail_candidates: false,
            fail_answer: false,
            candidates_per_endpoint: 2,
        }
    }
}

pub struct LoopbackPlatform {
    behavior: LoopbackBehavior,
    pub trace: Arc<OpTrace>,
    pub descriptions: Arc<StdMutex<Vec<AppliedDescription>>>,
    pub emissions: Arc<StdMutex<Vec<(u8, Duration, Duration)>>>,
    wire: Arc<StdMutex<Option<MediaStream>>>,
    endpoint_count: StdMutex<usize>,
}

impl LoopbackPlatform {
    pub fn new(behavior: LoopbackBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            trace: Arc::new(OpTrace::default()),
            descriptions: Arc::new(StdMutex::new(Vec::new())),
            emissions: Arc::new(StdMutex::new(Vec::new())),
            wire: Arc::new(StdMutex::new(None)),
            endpoint_count: StdMutex::new(0),
        })
    }

    pub fn with_defaults() -> Arc<Self> {
        Self::new(LoopbackBehavior::default())
    }

    pub fn emission_count(&self) -> usize {
        self.emissions.lock().unwrap().len()
    }

    /// Answer descriptions applied as some endpoint's peer or own
    /// description, in application order
    pub fn applied_answers(&self) -> Vec<AppliedDescription> {
        self.descriptions
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.kind == DescriptionKind::Answer)
            .cloned()
            .collect()
    }

    pub fn applied_offers(&self) -> Vec<AppliedDescription> {
        self.descriptions
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.kind == DescriptionKind::Offer)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl MediaPlatform for LoopbackPlatform {
    async fn create_endpoint(&self) -> MediaResult<Arc<dyn MediaEndpoint>> {
        let label = {
            let mut count = self.endpoint_count.lock().unwrap();
            *count += 1;
            format!("ep{}", count)
        };
        self.trace.record(format!("{}:create", label));
        let (events_tx, events_rx) = mpsc::channel(32);
        Ok(Arc::new(LoopbackEndpoint {
            label,
            behavior: self.behavior.clone(),
            trace: self.trace.clone(),
            descriptions: self.descriptions.clone(),
            emissions: self.emissions.clone(),
            wire: self.wire.clone(),
            events_tx,
            events_rx: Mutex::new(Some(events_rx)),
            owns_stream: StdMutex::new(false),
            remote_description: StdMutex::new(None),
        }))
    }

    fn devices(&self) -> Arc<dyn MediaDevices> {
        Arc::new(LoopbackDevices {
            deny: self.behavior.deny_media,
            trace: self.trace.clone(),
        })
    }
}

pub struct LoopbackDevices {
    deny: bool,
    trace: Arc<OpTrace>,
}

#[async_trait]
impl MediaDevices for LoopbackDevices {
    async fn get_user_media(&self, constraints: &MediaConstraints) -> MediaResult<MediaStream> {
        self.trace.record("devices:get_user_media");
        assert!(constraints.audio && !constraints.video);
        if self.deny {
            return Err(MediaError::media_acquisition("permission denied"));
        }
        Ok(MediaStream::new(
            "local-stream",
            vec![AudioTrack::new("track-0", "Loopback Microphone")],
        ))
    }
}

pub struct LoopbackEndpoint {
    label: String,
    behavior: LoopbackBehavior,
    trace: Arc<OpTrace>,
    descriptions: Arc<StdMutex<Vec<AppliedDescription>>>,
    emissions: Arc<StdMutex<Vec<(u8, Duration, Duration)>>>,
    wire: Arc<StdMutex<Option<MediaStream>>>,
    events_tx: mpsc::Sender<EndpointEvent>,
    events_rx: Mutex<Option<mpsc::Receiver<EndpointEvent>>>,
    owns_stream: StdMutex<bool>,
    remote_description: StdMutex<Option<SessionDescription>>,
}

impl LoopbackEndpoint {
    fn kind_tag(kind: DescriptionKind) -> &'static str {
        match kind {
            DescriptionKind::Offer => "offer",
            DescriptionKind::Answer => "answer",
        }
    }
}

#[async_trait]
impl MediaEndpoint for LoopbackEndpoint {
    async fn create_offer(&self, _options: &OfferOptions) -> MediaResult<SessionDescription> {
        self.trace.record(format!("{}:create_offer", self.label));
        Ok(SessionDescription::offer(OFFER_SDP))
    }

    async fn create_answer(&self) -> MediaResult<SessionDescription> {
        self.trace.record(format!("{}:create_answer", self.label));
        if self.behavior.fail_answer {
            return Err(MediaError::description_creation("simulated answer failure"));
        }
        if self.remote_description.lock().unwrap().is_none() {
            return Err(MediaError::invalid_state(
                "create_answer before remote offer was applied",
            ));
        }
        Ok(SessionDescription::answer(ANSWER_SDP))
    }

    async fn set_local_description(&self, description: SessionDescription) -> MediaResult<()> {
        let tag = Self::kind_tag(description.kind);
        self.trace
            .record(format!("{}:set_local_description:{}", self.label, tag));
        self.descriptions.lock().unwrap().push(AppliedDescription {
            endpoint: self.label.clone(),
            direction: "local",
            kind: description.kind,
            sdp: description.sdp.clone(),
        });

        // Candidate gathering starts once the local description is set.
        for i in 0..self.behavior.candidates_per_endpoint {
            let candidate = IceCandidate::new(format!(
                "candidate:{} 1 udp 2130706431 127.0.0.1 {} typ host",
                self.label,
                5000 + i
            ));
            let _ = self
                .events_tx
                .send(EndpointEvent::IceCandidate(Some(candidate)))
                .await;
        }
        let _ = self.events_tx.send(EndpointEvent::IceCandidate(None)).await;

        // The endpoint that applies the answer as its own description is
        // the one receiving the peer's media.
        if description.is_answer() && !*self.owns_stream.lock().unwrap() {
            let stream = self.wire.lock().unwrap().clone();
            if let Some(stream) = stream {
                let _ = self
                    .events_tx
                    .send(EndpointEvent::RemoteStream(stream))
                    .await;
            }
        }
        Ok(())
    }

    async fn set_remote_description(&self, description: SessionDescription) -> MediaResult<()> {
        let tag = Self::kind_tag(description.kind);
        self.trace
            .record(format!("{}:set_remote_description:{}", self.label, tag));
        self.descriptions.lock().unwrap().push(AppliedDescription {
            endpoint: self.label.clone(),
            direction: "remote",
            kind: description.kind,
            sdp: description.sdp.clone(),
        });
        *self.remote_description.lock().unwrap() = Some(description);
        Ok(())
    }

    async fn add_ice_candidate(&self, _candidate: IceCandidate) -> MediaResult<()> {
        self.trace
            .record(format!("{}:add_ice_candidate", self.label));
        if self.remote_description.lock().unwrap().is_none() {
            return Err(MediaError::invalid_state(
                "candidate before remote description",
            ));
        }
        if self.behavior.fail_candidates {
            return Err(MediaError::candidate("simulated candidate failure"));
        }
        Ok(())
    }

    async fn add_stream(&self, stream: MediaStream) -> MediaResult<()> {
        self.trace.record(format!("{}:add_stream", self.label));
        *self.owns_stream.lock().unwrap() = true;
        *self.wire.lock().unwrap() = Some(stream);
        Ok(())
    }

    async fn create_tone_sender(
        &self,
        track: &AudioTrack,
    ) -> MediaResult<Option<Arc<dyn ToneSender>>> {
        self.trace
            .record(format!("{}:create_tone_sender:{}", self.label, track.id));
        if !self.behavior.tone_capable {
            return Ok(None);
        }
        Ok(Some(Arc::new(LoopbackToneSender {
            emissions: self.emissions.clone(),
        })))
    }

    async fn take_events(&self) -> MediaResult<mpsc::Receiver<EndpointEvent>> {
        self.events_rx
            .lock()
            .await
            .take()
            .ok_or_else(|| MediaError::invalid_state("event channel already taken"))
    }

    async fn close(&self) -> MediaResult<()> {
        self.trace.record(format!("{}:close", self.label));
        Ok(())
    }
}

pub struct LoopbackToneSender {
    emissions: Arc<StdMutex<Vec<(u8, Duration, Duration)>>>,
}

#[async_trait]
impl ToneSender for LoopbackToneSender {
    async fn emit(&self, tone: u8, duration: Duration, gap: Duration) -> MediaResult<()> {
        self.emissions.lock().unwrap().push((tone, duration, gap));
        Ok(())
    }
}
