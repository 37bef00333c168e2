//! The controller task: sole owner of the CAN link, one transaction at a
//! time.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use rig_isotp::{session, CanLink, IsoTpConfig, IsoTpResult};
use rig_obd::dispatch;

use crate::transaction::ObdRequest;

/// Drain transactions from `queue` to completion, serially.
///
/// Returns once every `TesterHandle` has been dropped.
pub async fn run<L: CanLink>(link: L, cfg: IsoTpConfig, mut queue: mpsc::Receiver<ObdRequest>) {
    while let Some(request) = queue.recv().await {
        debug!(
            "transaction start: service 0x{:02X}, PID 0x{:02X}",
            request.service, request.pid
        );

        let result = execute(&link, &cfg, &request).await;
        if let Err(e) = &result {
            warn!(error = %e, "transaction failed");
        }

        // A caller that gave up on the reply is not an error.
        let _ = request.reply.send(result.map_err(Into::into));
    }
    debug!("all handles dropped, controller stopping");
}

/// One full exchange: transmit the request, reassemble the response into a
/// buffer bounded by the caller's capacity.
async fn execute(
    link: &dyn CanLink,
    cfg: &IsoTpConfig,
    request: &ObdRequest,
) -> IsoTpResult<Vec<u8>> {
    let payload = dispatch::request_payload(request.service, request.pid);
    session::send(link, cfg, &payload).await?;

    let recv_cfg = cfg.clone().with_max_payload_len(request.max_len);
    session::recv(link, &recv_cfg).await
}
