//! The ISO-TP session engine.
//!
//! One transaction at a time per link, driven from either role: `send`
//! segments a payload into Single/First/Consecutive frames under the peer's
//! flow control; `recv` reassembles the mirror image, granting flow control
//! of its own. Both drivers run to a terminal state, payload delivered or a
//! single `IsoTpError`, and never panic on wire input.

use tracing::{debug, trace, warn};

use crate::config::IsoTpConfig;
use crate::error::{IsoTpError, IsoTpResult};
use crate::frame::{
    st_min_delay, CanFrame, FlowStatus, IsoTpFrame, CF_MAX_PAYLOAD_LEN, FF_PAYLOAD_LEN,
    MAX_PAYLOAD_LEN, SF_MAX_PAYLOAD_LEN,
};
use crate::link::CanLink;

/// Transmit `payload` as one ISO-TP message.
///
/// Payloads of up to 7 bytes go out as a Single Frame. Anything longer opens
/// a First Frame / Flow Control / Consecutive Frame exchange: the peer's
/// granted block size meters how many frames may be sent before the next
/// flow control, and its STmin paces them. Sequence numbers start at 1 and
/// wrap mod 16.
pub async fn send(link: &dyn CanLink, cfg: &IsoTpConfig, payload: &[u8]) -> IsoTpResult<()> {
    if payload.len() <= SF_MAX_PAYLOAD_LEN {
        let single = IsoTpFrame::Single {
            payload: payload.to_vec(),
        };
        link.transmit(&single.to_frame(cfg.tx_id)?).await?;
        trace!(len = payload.len(), "single frame sent");
        return Ok(());
    }
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(IsoTpError::PayloadTooLarge(payload.len()));
    }

    let first = IsoTpFrame::First {
        total_len: payload.len(),
        payload: payload[..FF_PAYLOAD_LEN].to_vec(),
    };
    link.transmit(&first.to_frame(cfg.tx_id)?).await?;
    debug!(total = payload.len(), "first frame sent, awaiting flow control");

    let mut cursor = FF_PAYLOAD_LEN;
    let mut seq: u8 = 1;
    let (mut credit, mut st_min) = await_flow_control(link, cfg).await?;

    while cursor < payload.len() {
        if credit == Some(0) {
            let granted = await_flow_control(link, cfg).await?;
            credit = granted.0;
            st_min = granted.1;
        }

        tokio::time::sleep(st_min_delay(st_min)).await;

        let end = (cursor + CF_MAX_PAYLOAD_LEN).min(payload.len());
        let consecutive = IsoTpFrame::Consecutive {
            seq,
            payload: payload[cursor..end].to_vec(),
        };
        link.transmit(&consecutive.to_frame(cfg.tx_id)?).await?;
        trace!(seq, sent = end, total = payload.len(), "consecutive frame sent");

        cursor = end;
        seq = (seq + 1) & 0x0F;
        if let Some(frames_left) = credit.as_mut() {
            *frames_left -= 1;
        }
    }

    debug!(total = payload.len(), "payload sent");
    Ok(())
}

/// Receive one ISO-TP message, reassembling multi-frame transfers.
///
/// A First Frame is answered with Flow Control carrying the configured block
/// size and STmin; the grant is renewed whenever the advertised credit runs
/// out. Delivery happens only once the full announced length has arrived;
/// a partial payload is never surfaced.
pub async fn recv(link: &dyn CanLink, cfg: &IsoTpConfig) -> IsoTpResult<Vec<u8>> {
    let frame = recv_own(link, cfg).await?;
    let opening = decode_logged(&frame)?;

    let (total_len, mut payload) = match opening {
        IsoTpFrame::Single { payload } => {
            if payload.len() > cfg.max_payload_len {
                return Err(IsoTpError::BufferTooSmall {
                    needed: payload.len(),
                    capacity: cfg.max_payload_len,
                });
            }
            trace!(len = payload.len(), "single frame received");
            return Ok(payload);
        }
        IsoTpFrame::First { total_len, payload } => {
            debug!(total = total_len, "first frame received");
            if total_len > cfg.max_payload_len {
                // Tell the sender before giving up, so it fails with
                // Overflow instead of waiting out its flow-control timer.
                let overflow = IsoTpFrame::FlowControl {
                    status: FlowStatus::Overflow,
                    block_size: 0,
                    st_min: 0,
                };
                if let Err(e) = link.transmit(&overflow.to_frame(cfg.tx_id)?).await {
                    warn!(error = %e, "failed to signal overflow");
                }
                return Err(IsoTpError::BufferTooSmall {
                    needed: total_len,
                    capacity: cfg.max_payload_len,
                });
            }
            let mut buf = Vec::with_capacity(total_len);
            buf.extend_from_slice(&payload);
            (total_len, buf)
        }
        other => {
            warn!(kind = other.kind(), "frame arrived outside an active transfer");
            return Err(IsoTpError::UnexpectedFrame(other.kind()));
        }
    };

    grant_flow_control(link, cfg).await?;
    let mut credit = cfg.block_size;
    let mut expected_seq: u8 = 1;

    while payload.len() < total_len {
        let frame = recv_own(link, cfg).await?;
        let (seq, chunk) = match decode_logged(&frame)? {
            IsoTpFrame::Consecutive { seq, payload } => (seq, payload),
            other => {
                warn!(kind = other.kind(), "expected a consecutive frame");
                return Err(IsoTpError::UnexpectedFrame(other.kind()));
            }
        };

        if seq != expected_seq {
            return Err(IsoTpError::SeqMismatch {
                expected: expected_seq,
                actual: seq,
            });
        }

        let take = (total_len - payload.len()).min(CF_MAX_PAYLOAD_LEN);
        if chunk.len() < take {
            return Err(IsoTpError::MalformedPci(format!(
                "consecutive frame carries {} bytes, {take} expected",
                chunk.len()
            )));
        }
        payload.extend_from_slice(&chunk[..take]);
        expected_seq = (expected_seq + 1) & 0x0F;
        trace!(seq, received = payload.len(), total = total_len, "consecutive frame received");

        if cfg.block_size > 0 {
            credit -= 1;
            if credit == 0 && payload.len() < total_len {
                grant_flow_control(link, cfg).await?;
                credit = cfg.block_size;
            }
        }
    }

    debug!(total = total_len, "payload reassembled");
    Ok(payload)
}

/// Receive the next frame addressed to us, skipping foreign CAN IDs.
async fn recv_own(link: &dyn CanLink, cfg: &IsoTpConfig) -> IsoTpResult<CanFrame> {
    loop {
        let frame = link.receive(cfg.timeout).await?;
        if frame.id == cfg.rx_id {
            return Ok(frame);
        }
        trace!("ignoring frame for foreign CAN ID 0x{:03X}", frame.id);
    }
}

/// Decode a frame, logging malformed traffic before failing the session.
fn decode_logged(frame: &CanFrame) -> IsoTpResult<IsoTpFrame> {
    IsoTpFrame::decode(frame).inspect_err(|e| {
        warn!(error = %e, "dropping malformed frame");
    })
}

/// Sender side: wait for a Flow Control grant. WAIT keeps waiting, OVERFLOW
/// aborts; CTS yields `(credit, st_min)` with `None` meaning unlimited.
async fn await_flow_control(
    link: &dyn CanLink,
    cfg: &IsoTpConfig,
) -> IsoTpResult<(Option<u8>, u8)> {
    loop {
        let frame = recv_own(link, cfg).await?;
        match decode_logged(&frame)? {
            IsoTpFrame::FlowControl {
                status,
                block_size,
                st_min,
            } => match status {
                FlowStatus::ContinueToSend => {
                    trace!(block_size, st_min, "clear to send");
                    let credit = (block_size > 0).then_some(block_size);
                    return Ok((credit, st_min));
                }
                FlowStatus::Wait => {
                    debug!("peer asked to wait for the next flow control");
                }
                FlowStatus::Overflow => return Err(IsoTpError::Overflow),
            },
            other => {
                warn!(kind = other.kind(), "expected a flow control frame");
                return Err(IsoTpError::UnexpectedFrame(other.kind()));
            }
        }
    }
}

/// Receiver side: grant the configured block size and STmin.
async fn grant_flow_control(link: &dyn CanLink, cfg: &IsoTpConfig) -> IsoTpResult<()> {
    let grant = IsoTpFrame::FlowControl {
        status: FlowStatus::ContinueToSend,
        block_size: cfg.block_size,
        st_min: cfg.st_min,
    };
    link.transmit(&grant.to_frame(cfg.tx_id)?).await?;
    trace!(
        block_size = cfg.block_size,
        st_min = cfg.st_min,
        "flow control granted"
    );
    Ok(())
}
