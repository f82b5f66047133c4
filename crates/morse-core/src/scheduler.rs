//! Tone drain engine.
//!
//! One message becomes one drain task. The task walks the tone queue front
//! to back, emitting signal tokens through the call's [`ToneSender`] and
//! sleeping each token's own duration-plus-gap before moving on. A second
//! send while a drain is active is rejected; hangup cancels the drain
//! mid-queue with no further emissions.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use tonewire_media_api::ToneSender;

use crate::code::{tokenize, ToneToken};
use crate::error::{MorseError, MorseResult};
use crate::timing::ToneTiming;

struct DrainSlot {
    handle: Option<JoinHandle<()>>,
    cancel: CancellationToken,
}

impl DrainSlot {
    fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

/// Schedules Morse tone emissions over a call's single tone sender.
///
/// At most one drain task is live at a time; the scheduler sits idle
/// between messages and across calls.
pub struct ToneScheduler {
    timing: ToneTiming,
    drain: Mutex<DrainSlot>,
}

impl ToneScheduler {
    /// Create a scheduler with the given timing parameters
    pub fn new(timing: ToneTiming) -> Self {
        Self {
            timing,
            drain: Mutex::new(DrainSlot {
                handle: None,
                cancel: CancellationToken::new(),
            }),
        }
    }

    /// Encode `message` and start draining it through `sender`.
    ///
    /// Returns immediately once the drain task is running. A message whose
    /// characters all fall outside the symbol table produces an empty queue
    /// and no drain. Rejects with [`MorseError::Busy`] while a previous
    /// message is still draining.
    pub async fn send(&self, message: &str, sender: Arc<dyn ToneSender>) -> MorseResult<()> {
        let mut slot = self.drain.lock().await;
        if slot.is_active() {
            return Err(MorseError::busy("a previous message is still draining"));
        }

        let queue = tokenize(message);
        if queue.is_empty() {
            debug!("message encoded to an empty tone queue, nothing to send");
            slot.handle = None;
            return Ok(());
        }

        debug!("scheduling {} tone tokens", queue.len());
        let cancel = CancellationToken::new();
        let timing = self.timing.clone();
        let drain_cancel = cancel.clone();
        slot.cancel = cancel;
        slot.handle = Some(tokio::spawn(async move {
            drain_queue(queue, timing, sender, drain_cancel).await;
        }));
        Ok(())
    }

    /// True while a message is draining
    pub async fn is_draining(&self) -> bool {
        self.drain.lock().await.is_active()
    }

    /// Stop any in-flight drain. No further emissions occur after this
    /// returns, regardless of remaining queue length. Idempotent.
    pub async fn cancel(&self) {
        let mut slot = self.drain.lock().await;
        slot.cancel.cancel();
        if let Some(handle) = slot.handle.take() {
            handle.abort();
            debug!("tone drain cancelled");
        }
    }
}

async fn drain_queue(
    queue: Vec<ToneToken>,
    timing: ToneTiming,
    sender: Arc<dyn ToneSender>,
    cancel: CancellationToken,
) {
    for token in queue {
        if token.is_signal() {
            let result = sender
                .emit(timing.tone, token.duration(&timing), token.gap(&timing))
                .await;
            if let Err(e) = result {
                warn!("tone emission failed, abandoning message: {}", e);
                return;
            }
        }

        // The token carries its own pacing: tone duration plus trailing gap
        // for signals, the full word-space duration for spaces.
        let pause = token.duration(&timing) + token.gap(&timing);
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("tone drain interrupted mid-queue");
                return;
            }
            _ = time::sleep(pause) => {}
        }
    }
    debug!("tone queue drained");
}
