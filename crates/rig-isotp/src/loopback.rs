//! In-memory duplex CAN link pair.
//!
//! `loopback_pair` returns two connected links: frames transmitted on one
//! side arrive at the other in transmission order, like same-priority frames
//! on a real bus. Dropping either side closes the link for its peer.

use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};

use crate::error::{IsoTpError, IsoTpResult};
use crate::frame::CanFrame;
use crate::link::CanLink;

/// One end of an in-memory CAN link pair.
pub struct LoopbackLink {
    tx: mpsc::Sender<CanFrame>,
    rx: Mutex<mpsc::Receiver<CanFrame>>,
}

/// Create two connected links with `capacity` frames of buffering per
/// direction.
pub fn loopback_pair(capacity: usize) -> (LoopbackLink, LoopbackLink) {
    let (a_tx, b_rx) = mpsc::channel(capacity);
    let (b_tx, a_rx) = mpsc::channel(capacity);
    (
        LoopbackLink {
            tx: a_tx,
            rx: Mutex::new(a_rx),
        },
        LoopbackLink {
            tx: b_tx,
            rx: Mutex::new(b_rx),
        },
    )
}

#[async_trait]
impl CanLink for LoopbackLink {
    async fn transmit(&self, frame: &CanFrame) -> IsoTpResult<()> {
        self.tx
            .send(frame.clone())
            .await
            .map_err(|_| IsoTpError::LinkClosed)
    }

    async fn receive(&self, timeout: Duration) -> IsoTpResult<CanFrame> {
        let mut rx = self.rx.lock().await;
        match tokio::time::timeout(timeout, rx.recv()).await {
            Ok(Some(frame)) => Ok(frame),
            Ok(None) => Err(IsoTpError::LinkClosed),
            Err(_) => Err(IsoTpError::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            }),
        }
    }
}
