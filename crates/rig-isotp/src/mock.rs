//! Scripted CAN link for tests.
//!
//! Supports queued incoming frames and records everything transmitted, so
//! tests can assert on exact wire traffic without CAN hardware.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::{IsoTpError, IsoTpResult};
use crate::frame::CanFrame;
use crate::link::CanLink;

/// Mock CAN link with scripted incoming frames and transmit recording.
pub struct MockLink {
    /// Queued frames returned by `receive` (FIFO order).
    incoming: Mutex<Vec<CanFrame>>,
    /// All frames passed to `transmit` (for test assertions).
    sent: Mutex<Vec<CanFrame>>,
}

impl MockLink {
    /// Create a new mock with nothing queued.
    pub fn new() -> Self {
        Self {
            incoming: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock pre-loaded with incoming frames.
    pub fn with_frames(frames: Vec<CanFrame>) -> Self {
        Self {
            incoming: Mutex::new(frames),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Queue an additional incoming frame.
    pub fn queue_frame(&self, frame: CanFrame) {
        self.incoming.lock().unwrap().push(frame);
    }

    /// Copies of all frames that were transmitted.
    pub fn sent_frames(&self) -> Vec<CanFrame> {
        self.sent.lock().unwrap().clone()
    }

    /// The most recently transmitted frame, if any.
    pub fn last_sent(&self) -> Option<CanFrame> {
        self.sent.lock().unwrap().last().cloned()
    }
}

impl Default for MockLink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CanLink for MockLink {
    async fn transmit(&self, frame: &CanFrame) -> IsoTpResult<()> {
        self.sent.lock().unwrap().push(frame.clone());
        Ok(())
    }

    async fn receive(&self, timeout: Duration) -> IsoTpResult<CanFrame> {
        let mut incoming = self.incoming.lock().unwrap();
        if incoming.is_empty() {
            return Err(IsoTpError::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            });
        }
        Ok(incoming.remove(0))
    }
}
