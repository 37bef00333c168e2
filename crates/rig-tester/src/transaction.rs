//! Request descriptors and the caller-facing transaction API.
//!
//! Pollers enqueue `ObdRequest`s onto a bounded queue and park on a oneshot
//! completion; the controller task performs the full ISO-TP exchange for one
//! request at a time, so transactions never interleave on the bus.

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use rig_isotp::IsoTpError;

/// Default bound on queued requests.
pub const DEFAULT_QUEUE_CAPACITY: usize = 5;

/// Errors surfaced to a polling caller.
#[derive(Debug, Error)]
pub enum TesterError {
    #[error(transparent)]
    IsoTp(#[from] IsoTpError),

    /// The controller task is gone.
    #[error("transaction queue closed")]
    QueueClosed,
}

/// Convenience alias for tester results.
pub type TesterResult<T> = Result<T, TesterError>;

/// One queued OBD transaction: what to ask, how much response fits, and
/// where to deliver the payload.
pub struct ObdRequest {
    pub service: u8,
    pub pid: u8,
    /// Capacity of the caller's reassembly buffer.
    pub max_len: usize,
    /// Resolved with the payload strictly after it is fully written.
    pub reply: oneshot::Sender<TesterResult<Vec<u8>>>,
}

/// Cloneable handle pollers use to issue transactions.
#[derive(Clone)]
pub struct TesterHandle {
    queue: mpsc::Sender<ObdRequest>,
}

impl TesterHandle {
    /// Create the handle plus the receiving end for the controller task.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ObdRequest>) {
        let (queue, rx) = mpsc::channel(capacity);
        (Self { queue }, rx)
    }

    /// Issue one request and wait until the response payload is reassembled.
    pub async fn request(&self, service: u8, pid: u8, max_len: usize) -> TesterResult<Vec<u8>> {
        let (reply, response) = oneshot::channel();
        self.queue
            .send(ObdRequest {
                service,
                pid,
                max_len,
                reply,
            })
            .await
            .map_err(|_| TesterError::QueueClosed)?;
        response.await.map_err(|_| TesterError::QueueClosed)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn request_resolves_with_the_controller_reply() {
        let (handle, mut queue) = TesterHandle::channel(DEFAULT_QUEUE_CAPACITY);

        let server = tokio::spawn(async move {
            let request = queue.recv().await.unwrap();
            assert_eq!(request.service, 0x01);
            assert_eq!(request.pid, 0x0C);
            request.reply.send(Ok(vec![0x41, 0x0C, 0x0A, 0xBC])).ok();
        });

        let payload = handle.request(0x01, 0x0C, 256).await.unwrap();
        assert_eq!(payload, vec![0x41, 0x0C, 0x0A, 0xBC]);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn dropped_controller_surfaces_queue_closed() {
        let (handle, queue) = TesterHandle::channel(1);
        drop(queue);
        let err = handle.request(0x01, 0x0D, 256).await.unwrap_err();
        assert!(matches!(err, TesterError::QueueClosed));
    }

    #[tokio::test]
    async fn dropped_reply_surfaces_queue_closed() {
        let (handle, mut queue) = TesterHandle::channel(1);
        let server = tokio::spawn(async move {
            let request = queue.recv().await.unwrap();
            drop(request.reply);
        });
        let err = handle.request(0x09, 0x02, 256).await.unwrap_err();
        assert!(matches!(err, TesterError::QueueClosed));
        server.await.unwrap();
    }
}
