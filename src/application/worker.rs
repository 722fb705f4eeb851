use crate::domain::transfer::Request;
use crate::infrastructure::channel::RequestReceiver;
use crate::infrastructure::latch::CompletionGuard;
use crate::infrastructure::ledger::Ledger;
use std::sync::Arc;

/// One member of the worker pool.
///
/// A worker drains the shared queue until it consumes a termination marker.
/// It owns a [`CompletionGuard`] for its whole life, so the completion latch is
/// counted down however the loop ends.
pub struct Worker {
    id: usize,
    requests: RequestReceiver,
    ledger: Arc<Ledger>,
    guard: CompletionGuard,
}

impl Worker {
    pub fn new(
        id: usize,
        requests: RequestReceiver,
        ledger: Arc<Ledger>,
        guard: CompletionGuard,
    ) -> Self {
        Self {
            id,
            requests,
            ledger,
            guard,
        }
    }

    /// Runs the worker loop and returns the number of transfers applied.
    pub async fn run(self) -> u64 {
        let Worker {
            id,
            requests,
            ledger,
            guard: _guard,
        } = self;
        let mut applied = 0;

        loop {
            match requests.take().await {
                Some(Request::Transfer(transfer)) => match ledger.apply(&transfer) {
                    Ok(()) => applied += 1,
                    Err(e) => {
                        tracing::error!(worker = id, ?transfer, error = %e, "failed to apply transfer");
                    }
                },
                Some(Request::Shutdown) => {
                    tracing::debug!(worker = id, "received termination marker");
                    break;
                }
                None => {
                    tracing::warn!(
                        worker = id,
                        "request channel closed before a termination marker arrived"
                    );
                    break;
                }
            }
        }

        applied
    }
}
