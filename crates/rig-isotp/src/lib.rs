//! ISO 15765-2 (ISO-TP) transport engine over classic CAN.
//!
//! Segments and reassembles payloads of up to 4095 bytes across 8-byte CAN
//! frames: a typed PCI frame codec, block-size/STmin flow control, and a
//! unified session engine usable from either side of a transfer.

pub mod config;
pub mod error;
pub mod frame;
pub mod link;
pub mod loopback;
pub mod mock;
pub mod session;

// Re-export key types for convenience
pub use config::IsoTpConfig;
pub use error::{IsoTpError, IsoTpResult};
pub use frame::{CanFrame, FlowStatus, IsoTpFrame};
pub use link::CanLink;
#[cfg(target_os = "linux")]
pub use link::SocketCanLink;
pub use loopback::{loopback_pair, LoopbackLink};
pub use mock::MockLink;
