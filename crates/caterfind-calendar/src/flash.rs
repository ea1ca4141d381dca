//! Status messages shown next to the calendar.
//!
//! A [`FlashSlot`] holds at most one message. Transient messages clear
//! themselves after [`FLASH_DURATION`]; showing anything else first makes
//! the pending clear a no-op, so only the newest timer can fire.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::trace;

/// How long transient messages stay visible.
pub const FLASH_DURATION: Duration = Duration::from_secs(3);

/// A message and whether it clears itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub text: String,
    pub transient: bool,
}

#[derive(Debug, Clone, Default)]
struct SlotState {
    seq: u64,
    flash: Option<Flash>,
}

/// One message slot, cloneable so background tasks can post into it.
#[derive(Debug, Clone)]
pub struct FlashSlot {
    state: Arc<watch::Sender<SlotState>>,
    duration: Duration,
}

impl Default for FlashSlot {
    fn default() -> Self {
        Self::new(FLASH_DURATION)
    }
}

impl FlashSlot {
    /// Creates an empty slot whose transient messages last `duration`.
    pub fn new(duration: Duration) -> Self {
        let (sender, _) = watch::channel(SlotState::default());
        Self {
            state: Arc::new(sender),
            duration,
        }
    }

    /// Current message, if any.
    pub fn current(&self) -> Option<Flash> {
        self.state.borrow().flash.clone()
    }

    /// Current message text, if any.
    pub fn text(&self) -> Option<String> {
        self.state.borrow().flash.as_ref().map(|flash| flash.text.clone())
    }

    /// Shows a message until it is replaced or cleared.
    pub fn show_persistent(&self, text: impl Into<String>) {
        self.replace(Some(Flash {
            text: text.into(),
            transient: false,
        }));
    }

    /// Shows a message that clears itself after the slot's duration.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show_transient(&self, text: impl Into<String>) {
        let seq = self.replace(Some(Flash {
            text: text.into(),
            transient: true,
        }));

        let state = Arc::clone(&self.state);
        let duration = self.duration;
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let cleared = state.send_if_modified(|slot| {
                if slot.seq == seq {
                    slot.flash = None;
                    true
                } else {
                    false
                }
            });
            trace!(seq, cleared, "Transient message timer fired");
        });
    }

    pub fn clear(&self) {
        self.replace(None);
    }

    /// Stores `flash` under a new sequence number and returns it.
    fn replace(&self, flash: Option<Flash>) -> u64 {
        let mut seq = 0;
        self.state.send_modify(|slot| {
            slot.seq += 1;
            slot.flash = flash;
            seq = slot.seq;
        });
        seq
    }
}
