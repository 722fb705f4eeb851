use std::sync::Arc;
use tokio::sync::watch;

/// One-shot countdown that lets a caller wait until every worker has exited.
///
/// The count starts at the number of workers and only ever decreases. Once it
/// reaches zero it stays there.
#[derive(Debug)]
pub struct CompletionLatch {
    remaining: watch::Sender<usize>,
}

impl CompletionLatch {
    pub fn new(count: usize) -> Self {
        let (remaining, _) = watch::channel(count);
        Self { remaining }
    }

    pub fn count(&self) -> usize {
        *self.remaining.borrow()
    }

    /// Decrements the count and returns the value it was left at.
    fn count_down(&self) -> usize {
        let mut left = 0;
        self.remaining.send_modify(|n| {
            *n = n.saturating_sub(1);
            left = *n;
        });
        left
    }

    /// Hands out a guard that counts the latch down when dropped.
    ///
    /// A worker holds its guard for its whole lifetime, so the decrement
    /// happens on every exit path: a consumed termination marker, an early
    /// return, a panic unwinding through the task, or the task being aborted.
    pub fn guard(self: &Arc<Self>, worker: usize) -> CompletionGuard {
        CompletionGuard {
            latch: Arc::clone(self),
            worker,
        }
    }

    /// Suspends until the count reaches zero.
    pub async fn wait(&self) {
        let mut rx = self.remaining.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = rx.wait_for(|n| *n == 0).await;
    }
}

/// Decrements its [`CompletionLatch`] exactly once, on drop.
#[derive(Debug)]
pub struct CompletionGuard {
    latch: Arc<CompletionLatch>,
    worker: usize,
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        let remaining = self.latch.count_down();
        tracing::debug!(
            worker = self.worker,
            remaining,
            "worker signalled completion"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_wait_returns_after_all_guards_drop() {
        let latch = Arc::new(CompletionLatch::new(3));
        let guards: Vec<_> = (0..3).map(|i| latch.guard(i)).collect();

        let waiter = {
            let latch = Arc::clone(&latch);
            tokio::spawn(async move { latch.wait().await })
        };

        let mut guards = guards.into_iter();
        drop(guards.next());
        drop(guards.next());
        assert_eq!(latch.count(), 1);
        assert!(
            timeout(Duration::from_millis(50), latch.wait())
                .await
                .is_err()
        );

        drop(guards.next());
        timeout(Duration::from_secs(5), waiter)
            .await
            .expect("latch never opened")
            .unwrap();
        assert_eq!(latch.count(), 0);
    }

    #[test]
    fn test_count_down_reports_its_own_decrement() {
        let latch = Arc::new(CompletionLatch::new(64));
        let mut seen: Vec<usize> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..64)
                .map(|_| scope.spawn(|| latch.count_down()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        seen.sort_unstable();
        assert_eq!(seen, (0..64).collect::<Vec<_>>());
        assert_eq!(latch.count(), 0);
    }

    #[tokio::test]
    async fn test_zero_latch_is_open() {
        let latch = CompletionLatch::new(0);
        timeout(Duration::from_secs(1), latch.wait())
            .await
            .expect("latch at zero must not block");
    }

    #[tokio::test]
    async fn test_count_never_goes_below_zero() {
        let latch = Arc::new(CompletionLatch::new(1));
        drop(latch.guard(0));
        drop(latch.guard(1));
        assert_eq!(latch.count(), 0);
        latch.wait().await;
    }

    #[tokio::test]
    async fn test_panicking_task_still_signals() {
        let latch = Arc::new(CompletionLatch::new(1));
        let guard = latch.guard(0);

        let task = tokio::spawn(async move {
            let _guard = guard;
            panic!("worker failed");
        });
        assert!(task.await.unwrap_err().is_panic());

        timeout(Duration::from_secs(5), latch.wait())
            .await
            .expect("panicked worker must still count down");
    }

    #[tokio::test]
    async fn test_aborted_task_still_signals() {
        let latch = Arc::new(CompletionLatch::new(1));
        let guard = latch.guard(0);

        let task = tokio::spawn(async move {
            let _guard = guard;
            std::future::pending::<()>().await;
        });
        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());

        timeout(Duration::from_secs(5), latch.wait())
            .await
            .expect("aborted worker must still count down");
    }
}
