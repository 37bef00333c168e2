//! CAN link abstraction.
//!
//! `CanLink` with `transmit`/`receive`. Implementations:
//! - `SocketCanLink` — Linux-only, wraps `socketcan::CanSocket`
//! - `MockLink` — scripted frames for unit tests (in `mock.rs`)
//! - `LoopbackLink` — in-memory duplex pair (in `loopback.rs`)

use async_trait::async_trait;
use std::time::Duration;

use crate::error::IsoTpResult;
use crate::frame::CanFrame;

/// Frame-level transmit/receive primitive the session engine drives.
#[async_trait]
pub trait CanLink: Send + Sync {
    /// Transmit one frame. Short frames are padded to 8 data bytes on the wire.
    async fn transmit(&self, frame: &CanFrame) -> IsoTpResult<()>;

    /// Receive one frame, blocking up to `timeout`.
    async fn receive(&self, timeout: Duration) -> IsoTpResult<CanFrame>;
}

// ── SocketCAN (Linux-only) ──────────────────────────────────────

#[cfg(target_os = "linux")]
mod socket {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use embedded_can::{Frame as EmbeddedFrame, StandardId};
    use socketcan::{CanSocket, Frame, Socket};

    use crate::error::{IsoTpError, IsoTpResult};
    use crate::frame::{CanFrame, CAN_DATA_LEN, PADDING_BYTE};

    use super::CanLink;

    /// CAN link over a Linux SocketCAN interface (e.g. "can0" or "vcan0").
    ///
    /// The socket's blocking syscalls run on the tokio blocking pool so the
    /// async engine above never stalls the runtime.
    pub struct SocketCanLink {
        socket: Arc<Mutex<CanSocket>>,
    }

    impl SocketCanLink {
        /// Open the named SocketCAN interface.
        pub fn open(interface: &str) -> IsoTpResult<Self> {
            let socket = CanSocket::open(interface)
                .map_err(|e| IsoTpError::Link(format!("failed to open {interface}: {e}")))?;
            Ok(Self {
                socket: Arc::new(Mutex::new(socket)),
            })
        }
    }

    #[async_trait]
    impl CanLink for SocketCanLink {
        async fn transmit(&self, frame: &CanFrame) -> IsoTpResult<()> {
            let id = StandardId::new(frame.id as u16).ok_or_else(|| {
                IsoTpError::Link(format!("0x{:X} is not an 11-bit CAN ID", frame.id))
            })?;
            let mut data = [PADDING_BYTE; CAN_DATA_LEN];
            let len = frame.data.len().min(CAN_DATA_LEN);
            data[..len].copy_from_slice(&frame.data[..len]);
            let out = socketcan::CanFrame::new(id, &data)
                .ok_or_else(|| IsoTpError::Link("frame construction failed".into()))?;

            let socket = Arc::clone(&self.socket);
            tokio::task::spawn_blocking(move || socket.lock().unwrap().write_frame(&out))
                .await
                .map_err(|e| IsoTpError::Link(e.to_string()))?
                .map_err(|e| IsoTpError::Link(e.to_string()))
        }

        async fn receive(&self, timeout: Duration) -> IsoTpResult<CanFrame> {
            let socket = Arc::clone(&self.socket);
            let frame = tokio::task::spawn_blocking(move || {
                socket.lock().unwrap().read_frame_timeout(timeout)
            })
            .await
            .map_err(|e| IsoTpError::Link(e.to_string()))?
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut => {
                    IsoTpError::Timeout {
                        timeout_ms: timeout.as_millis() as u64,
                    }
                }
                _ => IsoTpError::Link(e.to_string()),
            })?;

            Ok(CanFrame::new(frame.raw_id(), frame.data().to_vec()))
        }
    }
}

#[cfg(target_os = "linux")]
pub use socket::SocketCanLink;
