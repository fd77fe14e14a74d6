//! Driver facade: composes the client seam, pool lifecycle, mapping
//! tables, parameter marshaling, and result normalization behind one
//! surface.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use uuid::Uuid;

use crate::client::{ClientConnector, ClientLog, LogLevel};
use crate::config::{self, ClientOptions, ConnectionOptions};
use crate::error::{CqlError, CqlResult};
use crate::events::{DriverEvent, EventBus};
use crate::mapping::{ConsistencyMap, TypeMap};
use crate::pool::{self, CqlPool};
use crate::rows::{normalize_rows, QueryOptions, Row};
use crate::value::Param;

/// The adapter's public surface. One driver serves many pools; the mapping
/// tables are built once here and never change afterwards.
pub struct CqlDriver {
    connector: Arc<dyn ClientConnector>,
    events: EventBus,
    consistencies: ConsistencyMap,
    types: TypeMap,
}

impl CqlDriver {
    /// Build a driver around a client implementation.
    pub fn new(connector: Arc<dyn ClientConnector>) -> Self {
        Self {
            connector,
            events: EventBus::new(),
            consistencies: ConsistencyMap::new(),
            types: TypeMap::new(),
        }
    }

    /// Subscribe to lifecycle and relay events.
    pub fn subscribe(&self) -> broadcast::Receiver<DriverEvent> {
        self.events.subscribe()
    }

    /// Translate caller options and apply this implementation's defaults.
    pub fn initialize_options(&self, options: ConnectionOptions) -> ClientOptions {
        config::initialize_options(options)
    }

    /// Consistency table, for callers resolving levels themselves.
    pub fn consistencies(&self) -> &ConsistencyMap {
        &self.consistencies
    }

    /// Data-type table, for callers building hinted parameters.
    pub fn types(&self) -> &TypeMap {
        &self.types
    }

    /// Create a pool and start connecting.
    ///
    /// The handle returns immediately in not-ready state; await
    /// [`CqlPool::wait_ready`] or watch the event stream to learn the
    /// outcome. A failed connect notifies every waiter with the error and
    /// then closes the pool best-effort.
    pub fn create_pool(&self, options: ClientOptions) -> CqlResult<CqlPool> {
        tracing::debug!(
            keyspace = ?options.keyspace,
            hosts = ?options.hosts,
            "creating connection pool"
        );

        let client = self.connector.build(&options).map_err(CqlError::Connect)?;
        let pool = CqlPool::new(Arc::clone(&client), options);

        if let Some(log_rx) = client.log_stream() {
            spawn_log_relay(log_rx, self.events.clone());
        }

        let attempt = Uuid::new_v4();
        self.events.publish(DriverEvent::ConnectionOpening { attempt });

        let task_pool = pool.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            match task_pool.client().connect().await {
                Ok(()) => {
                    let waiters = task_pool.settle(Ok(()));
                    events.publish(DriverEvent::ConnectionOpened { attempt });
                    pool::release(waiters, Ok(()));
                }
                Err(err) => {
                    events.publish(DriverEvent::ConnectionFailed {
                        attempt,
                        error: err.clone(),
                    });
                    tracing::error!(
                        name = %err.name,
                        code = ?err.code,
                        error = %err.message,
                        "pool connect failed"
                    );
                    let waiters = task_pool.settle(Err(err.clone()));
                    pool::release(waiters, Err(CqlError::Connect(err)));
                    close_pool_inner(&task_pool, &events).await;
                }
            }
        });

        Ok(pool)
    }

    /// Execute a statement through a pool and normalize the result.
    ///
    /// Assumes the pool is ready; callers await readiness through
    /// [`CqlPool::wait_ready`] first. A closed pool fails fast with a
    /// terminal error, without contacting the client. Client failures are
    /// propagated unchanged; classification is the caller's to consult via
    /// [`CqlError::can_retry`].
    pub async fn execute(
        &self,
        pool: &CqlPool,
        statement: &str,
        params: Vec<Param>,
        consistency: &str,
        options: &QueryOptions,
    ) -> CqlResult<Vec<Row>> {
        if pool.is_closed() {
            return Err(CqlError::PoolClosed);
        }

        let consistency = self
            .consistencies
            .resolve(consistency)
            .ok_or_else(|| CqlError::UnknownConsistency(consistency.to_string()))?;
        let params = params
            .into_iter()
            .map(Param::into_wire)
            .collect::<CqlResult<Vec<_>>>()?;

        let result = if options.execute_as_prepared {
            pool.client()
                .execute_prepared(statement, params, consistency)
                .await
        } else {
            pool.client().execute(statement, params, consistency).await
        }
        .map_err(CqlError::Execute)?;

        Ok(normalize_rows(result.rows, options))
    }

    /// Close a pool and shut the client down.
    ///
    /// Idempotent; a second close returns without touching the client.
    /// Shutdown failures are logged, never surfaced: close is best-effort.
    pub async fn close_pool(&self, pool: &CqlPool) {
        close_pool_inner(pool, &self.events).await;
    }
}

async fn close_pool_inner(pool: &CqlPool, events: &EventBus) {
    if !pool.close() {
        return;
    }
    events.publish(DriverEvent::ConnectionClosed);
    if let Err(err) = pool.client().shutdown().await {
        tracing::warn!(
            name = %err.name,
            code = ?err.code,
            error = %err.message,
            "client shutdown failed"
        );
    }
}

/// Relay the client's log stream as `ConnectionLogged` events. The relay
/// keeps client trace noise out of the adapter's own logs and never
/// escalates a client "error" line above warn: real execution failures
/// reach the caller through the result path, so the line is informational
/// here.
fn spawn_log_relay(mut rx: mpsc::UnboundedReceiver<ClientLog>, events: EventBus) {
    tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            events.publish(DriverEvent::ConnectionLogged {
                level: line.level,
                message: line.message.clone(),
                data: line.data.clone(),
            });
            match line.level {
                // too verbose even for our own debug logging
                LogLevel::Debug | LogLevel::Info => {}
                LogLevel::Warn => {
                    tracing::warn!(data = ?line.data, "client: {}", line.message);
                }
                LogLevel::Error => {
                    tracing::warn!(data = ?line.data, "client: {}", line.message);
                }
            }
        }
    });
}
