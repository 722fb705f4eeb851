use crate::domain::transfer::Request;
use crate::error::{EngineError, Result};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// Creates a fixed-capacity FIFO channel between one producer and many workers.
///
/// `put` suspends while the queue is full and `take` suspends while it is empty.
pub fn bounded(capacity: usize) -> Result<(RequestSender, RequestReceiver)> {
    if capacity == 0 {
        return Err(EngineError::InvalidConfig(
            "queue capacity must be at least 1".to_string(),
        ));
    }
    let (tx, rx) = mpsc::channel(capacity);
    Ok((
        RequestSender { inner: tx },
        RequestReceiver {
            inner: Arc::new(Mutex::new(rx)),
        },
    ))
}

/// Producer half of the request channel.
#[derive(Debug)]
pub struct RequestSender {
    inner: mpsc::Sender<Request>,
}

impl RequestSender {
    /// Enqueues a request, waiting for room if the queue is full.
    ///
    /// Fails with [`EngineError::ChannelClosed`] once every receiver is gone.
    pub async fn put(&self, request: Request) -> Result<()> {
        self.inner
            .send(request)
            .await
            .map_err(|_| EngineError::ChannelClosed)
    }

    pub fn capacity(&self) -> usize {
        self.inner.max_capacity()
    }

    /// Number of requests currently queued.
    pub fn len(&self) -> usize {
        self.inner.max_capacity() - self.inner.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Consumer half of the request channel, shared by every worker.
///
/// Cloning hands out another handle to the same queue. Workers take turns on
/// the inner receiver, so each request is delivered to exactly one of them.
#[derive(Debug, Clone)]
pub struct RequestReceiver {
    inner: Arc<Mutex<mpsc::Receiver<Request>>>,
}

impl RequestReceiver {
    /// Dequeues the next request, waiting while the queue is empty.
    ///
    /// Returns `None` once the sender has been dropped and the queue drained.
    pub async fn take(&self) -> Option<Request> {
        self.inner.lock().await.recv().await
    }
}
