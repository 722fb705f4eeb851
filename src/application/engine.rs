use crate::application::worker::Worker;
use crate::config::EngineConfig;
use crate::domain::account::AccountSnapshot;
use crate::domain::transfer::{Request, Transfer};
use crate::error::{EngineError, Result};
use crate::infrastructure::channel::{self, RequestSender};
use crate::infrastructure::latch::CompletionLatch;
use crate::infrastructure::ledger::Ledger;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// The concurrent funds-transfer engine.
///
/// `TransferEngine` owns a fixed set of accounts and a pool of worker tasks.
/// Transfers submitted to it are queued on a bounded channel and applied by
/// whichever worker takes them, using per-account locks acquired in ascending
/// id order.
///
/// The engine spawns its workers with `tokio::spawn`, so it must be started
/// from within a Tokio runtime.
pub struct TransferEngine {
    ledger: Arc<Ledger>,
    requests: Option<RequestSender>,
    latch: Arc<CompletionLatch>,
    workers: Vec<JoinHandle<u64>>,
    worker_count: usize,
}

impl TransferEngine {
    /// Validates `config`, creates the accounts and starts the worker pool.
    pub fn start(config: &EngineConfig) -> Result<Self> {
        config.validate()?;

        let ledger = Arc::new(Ledger::new(config.accounts, config.initial_balance));
        let (sender, receiver) = channel::bounded(config.queue_capacity)?;
        let latch = Arc::new(CompletionLatch::new(config.workers));

        // Only the workers keep receivers, so `put` fails rather than hangs if
        // the whole pool is gone.
        let workers = (0..config.workers)
            .map(|id| {
                let worker = Worker::new(
                    id,
                    receiver.clone(),
                    Arc::clone(&ledger),
                    latch.guard(id),
                );
                tokio::spawn(worker.run())
            })
            .collect();

        tracing::info!(
            accounts = config.accounts,
            initial_balance = config.initial_balance,
            workers = config.workers,
            queue_capacity = config.queue_capacity,
            "transfer engine started"
        );

        Ok(Self {
            ledger,
            requests: Some(sender),
            latch,
            workers,
            worker_count: config.workers,
        })
    }

    pub fn accounts(&self) -> usize {
        self.ledger.len()
    }

    pub fn workers(&self) -> usize {
        self.worker_count
    }

    /// Queues a transfer, waiting while the queue is full.
    ///
    /// Both account ids are checked here so that a bad request never reaches a
    /// worker. Fails with [`EngineError::ShutDown`] once [`shutdown`](Self::shutdown)
    /// has been called.
    pub async fn submit(&self, transfer: Transfer) -> Result<()> {
        let requests = self.requests.as_ref().ok_or(EngineError::ShutDown)?;
        self.ledger.validate(&transfer)?;
        requests.put(Request::Transfer(transfer)).await
    }

    /// Queues one termination marker per worker and closes the producer side.
    ///
    /// Calling it again is a no-op.
    pub async fn shutdown(&mut self) -> Result<()> {
        let Some(requests) = self.requests.take() else {
            return Ok(());
        };
        for _ in 0..self.worker_count {
            requests.put(Request::Shutdown).await?;
        }
        tracing::debug!(markers = self.worker_count, "queued termination markers");
        Ok(())
    }

    /// Suspends until every worker has exited.
    pub async fn wait_for_completion(&self) {
        self.latch.wait().await;
    }

    /// Snapshots every account. Exact once [`wait_for_completion`](Self::wait_for_completion)
    /// has returned.
    pub fn snapshots(&self) -> Vec<AccountSnapshot> {
        self.ledger.snapshots()
    }

    /// Sum of all balances.
    pub fn total_balance(&self) -> i128 {
        self.ledger.total_balance()
    }

    /// Shuts down, waits for the pool to drain and returns the final account state.
    pub async fn into_results(mut self) -> Result<Vec<AccountSnapshot>> {
        self.shutdown().await?;
        self.wait_for_completion().await;
        self.join_workers().await;
        tracing::info!("all workers finished");
        Ok(self.ledger.snapshots())
    }

    /// Feeds `transfers` into the engine in order, then shuts it down and
    /// returns the final account state.
    ///
    /// The first error stops ingestion. The pool is still drained and shut
    /// down before the error is returned.
    pub async fn run<I>(self, transfers: I) -> Result<Vec<AccountSnapshot>>
    where
        I: IntoIterator<Item = Result<Transfer>>,
    {
        let ingested = self.ingest(transfers).await;
        if let Err(e) = &ingested {
            tracing::error!(error = %e, "aborting ingestion");
        }
        let results = self.into_results().await;

        let count = ingested?;
        tracing::info!(transfers = count, "ingestion complete");
        results
    }

    async fn ingest<I>(&self, transfers: I) -> Result<u64>
    where
        I: IntoIterator<Item = Result<Transfer>>,
    {
        let mut count = 0;
        for transfer in transfers {
            self.submit(transfer?).await?;
            count += 1;
        }
        Ok(count)
    }

    async fn join_workers(&mut self) {
        for (id, handle) in self.workers.drain(..).enumerate() {
            match handle.await {
                Ok(applied) => tracing::debug!(worker = id, applied, "worker joined"),
                Err(e) if e.is_panic() => tracing::error!(worker = id, "worker panicked"),
                Err(e) => tracing::warn!(worker = id, error = %e, "worker did not finish"),
            }
        }
    }
}
