//! Pool handle and its readiness state machine.
//!
//! The pool is the only shared mutable resource in the adapter. Its state
//! lives under a mutex that is never held across an await point: every
//! transition is lock-mutate-unlock, with waiter notification performed on
//! the already-drained queue, so the FIFO release is atomic with respect to
//! the state change.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::client::CqlClient;
use crate::config::ClientOptions;
use crate::error::{ClientError, CqlError, CqlResult};

pub(crate) type Waiter = oneshot::Sender<CqlResult<()>>;

enum PoolState {
    /// Connect outcome not yet known; callers queue here in FIFO order.
    Connecting { waiters: VecDeque<Waiter> },
    Ready,
    Failed(ClientError),
    Closed,
}

/// Handle to one managed connection set. Cheap to clone; all clones share
/// the same state.
#[derive(Clone)]
pub struct CqlPool {
    inner: Arc<PoolInner>,
}

struct PoolInner {
    client: Arc<dyn CqlClient>,
    options: ClientOptions,
    state: Mutex<PoolState>,
}

impl CqlPool {
    pub(crate) fn new(client: Arc<dyn CqlClient>, options: ClientOptions) -> Self {
        Self {
            inner: Arc::new(PoolInner {
                client,
                options,
                state: Mutex::new(PoolState::Connecting {
                    waiters: VecDeque::new(),
                }),
            }),
        }
    }

    /// Options this pool was built from.
    pub fn options(&self) -> &ClientOptions {
        &self.inner.options
    }

    pub(crate) fn client(&self) -> &Arc<dyn CqlClient> {
        &self.inner.client
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.inner.state.lock(), PoolState::Ready)
    }

    pub fn is_closed(&self) -> bool {
        matches!(*self.inner.state.lock(), PoolState::Closed)
    }

    /// Wait until readiness or failure is known. Resolves immediately when
    /// the outcome is already determined; otherwise queues FIFO behind
    /// earlier waiters.
    pub async fn wait_ready(&self) -> CqlResult<()> {
        let rx = {
            let mut state = self.inner.state.lock();
            match &mut *state {
                PoolState::Connecting { waiters } => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push_back(tx);
                    rx
                }
                PoolState::Ready => return Ok(()),
                PoolState::Failed(err) => return Err(CqlError::Connect(err.clone())),
                PoolState::Closed => return Err(CqlError::PoolClosed),
            }
        };
        // Every queued waiter is sent to exactly once on settle or close, so
        // a dropped sender can only mean the pool was torn down mid-connect.
        rx.await.unwrap_or(Err(CqlError::PoolClosed))
    }

    /// Record the connect outcome and hand back the drained waiter queue in
    /// registration order. Returns an empty queue when the outcome was
    /// already determined (late settle on a pool closed mid-connect).
    pub(crate) fn settle(&self, outcome: Result<(), ClientError>) -> Vec<Waiter> {
        let mut state = self.inner.state.lock();
        let PoolState::Connecting { waiters } = &mut *state else {
            return Vec::new();
        };
        let waiters = std::mem::take(waiters);
        *state = match outcome {
            Ok(()) => PoolState::Ready,
            Err(err) => PoolState::Failed(err),
        };
        Vec::from(waiters)
    }

    /// Mark the pool closed. Returns `false` when it already was. Waiters
    /// still queued (closure during connect) observe the closure.
    pub(crate) fn close(&self) -> bool {
        let waiters = {
            let mut state = self.inner.state.lock();
            if matches!(*state, PoolState::Closed) {
                return false;
            }
            let drained = match &mut *state {
                PoolState::Connecting { waiters } => std::mem::take(waiters),
                _ => VecDeque::new(),
            };
            *state = PoolState::Closed;
            drained
        };
        release(Vec::from(waiters), Err(CqlError::PoolClosed));
        true
    }
}

/// Notify drained waiters, preserving their registration order. Receivers
/// that gave up are skipped.
pub(crate) fn release(waiters: Vec<Waiter>, outcome: CqlResult<()>) {
    for waiter in waiters {
        let _ = waiter.send(outcome.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::mpsc;

    use crate::client::{ClientLog, NativeResult};
    use crate::mapping::NativeConsistency;
    use crate::value::WireValue;

    struct NoopClient;

    #[async_trait]
    impl CqlClient for NoopClient {
        async fn connect(&self) -> Result<(), ClientError> {
            Ok(())
        }

        async fn execute(
            &self,
            _statement: &str,
            _params: Vec<WireValue>,
            _consistency: NativeConsistency,
        ) -> Result<NativeResult, ClientError> {
            Ok(NativeResult::default())
        }

        async fn execute_prepared(
            &self,
            _statement: &str,
            _params: Vec<WireValue>,
            _consistency: NativeConsistency,
        ) -> Result<NativeResult, ClientError> {
            Ok(NativeResult::default())
        }

        async fn shutdown(&self) -> Result<(), ClientError> {
            Ok(())
        }

        fn log_stream(&self) -> Option<mpsc::UnboundedReceiver<ClientLog>> {
            None
        }
    }

    fn pool() -> CqlPool {
        CqlPool::new(Arc::new(NoopClient), ClientOptions::default())
    }

    #[tokio::test]
    async fn queued_waiters_share_the_success_outcome() {
        let pool = pool();
        let handles: Vec<_> = (0..3)
            .map(|_| {
                let pool = pool.clone();
                tokio::spawn(async move { pool.wait_ready().await })
            })
            .collect();
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }

        let waiters = pool.settle(Ok(()));
        assert_eq!(waiters.len(), 3);
        release(waiters, Ok(()));

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }
        assert!(pool.is_ready());
        assert!(!pool.is_closed());
    }

    #[tokio::test]
    async fn queued_waiters_share_the_failure_outcome() {
        let pool = pool();
        let first = {
            let pool = pool.clone();
            tokio::spawn(async move { pool.wait_ready().await })
        };
        tokio::task::yield_now().await;

        let err = ClientError::new("PoolConnectionError", "no hosts reachable");
        let waiters = pool.settle(Err(err.clone()));
        release(waiters, Err(CqlError::Connect(err)));

        let outcome = first.await.unwrap();
        match outcome {
            Err(CqlError::Connect(seen)) => {
                assert_eq!(seen.name, "PoolConnectionError");
                assert!(CqlError::Connect(seen).can_retry());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        // outcome already determined: a late waiter resolves immediately
        match pool.wait_ready().await {
            Err(CqlError::Connect(seen)) => assert_eq!(seen.name, "PoolConnectionError"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn waiting_on_a_ready_pool_resolves_immediately() {
        let pool = pool();
        release(pool.settle(Ok(())), Ok(()));
        assert!(pool.wait_ready().await.is_ok());
    }

    #[tokio::test]
    async fn close_drains_pending_waiters() {
        let pool = pool();
        let waiter = {
            let pool = pool.clone();
            tokio::spawn(async move { pool.wait_ready().await })
        };
        tokio::task::yield_now().await;

        assert!(pool.close());
        assert!(matches!(waiter.await.unwrap(), Err(CqlError::PoolClosed)));
        assert!(pool.is_closed());

        // second close is a no-op
        assert!(!pool.close());
    }

    #[tokio::test]
    async fn settle_after_close_is_ignored() {
        let pool = pool();
        assert!(pool.close());
        assert!(pool.settle(Ok(())).is_empty());
        assert!(pool.is_closed());
        assert!(!pool.is_ready());
    }
}
