//! ISO-TP session configuration.

use std::time::Duration;

use crate::frame::MAX_PAYLOAD_LEN;

/// Parameters for one side of an ISO-TP pairing.
///
/// `block_size` and `st_min` are what this side advertises in its own flow
/// control when receiving; when sending, the peer's advertised values govern.
#[derive(Debug, Clone)]
pub struct IsoTpConfig {
    /// CAN ID used for transmitted frames (data and flow control).
    pub tx_id: u32,
    /// CAN ID accepted on receive; frames for any other ID are skipped.
    pub rx_id: u32,
    /// Block size granted per flow control (0 = unlimited).
    pub block_size: u8,
    /// Raw STmin byte granted per flow control.
    pub st_min: u8,
    /// Per-frame receive timeout (the N_Bs / N_Cr timer).
    pub timeout: Duration,
    /// Largest payload accepted during reassembly.
    pub max_payload_len: usize,
}

impl IsoTpConfig {
    /// Pairing that transmits on `tx_id` and accepts `rx_id`, with the
    /// defaults used on the OBD bus: unlimited block size, 10 ms STmin,
    /// 1000 ms frame timeout.
    pub fn new(tx_id: u32, rx_id: u32) -> Self {
        Self {
            tx_id,
            rx_id,
            block_size: 0,
            st_min: 0x0A,
            timeout: Duration::from_millis(1000),
            max_payload_len: MAX_PAYLOAD_LEN,
        }
    }

    /// Cap reassembly at `max` bytes (never above the protocol's 4095).
    pub fn with_max_payload_len(mut self, max: usize) -> Self {
        self.max_payload_len = max.min(MAX_PAYLOAD_LEN);
        self
    }
}
