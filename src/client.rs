//! Trait seam over the underlying CQL client library.
//!
//! The adapter never touches the network itself; it drives whatever client
//! the [`ClientConnector`] hands it. Anything satisfying these traits can
//! sit underneath the driver unchanged.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::config::ClientOptions;
use crate::error::ClientError;
use crate::mapping::NativeConsistency;
use crate::value::{Value, WireValue};

/// Severity attached to a relayed client log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// A log line emitted by the underlying client.
#[derive(Debug, Clone)]
pub struct ClientLog {
    pub level: LogLevel,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Column metadata attached to a native row.
#[derive(Debug, Clone)]
pub struct NativeColumn {
    pub name: String,
}

/// One row as produced by the client: ordered column metadata plus
/// name-keyed values.
#[derive(Debug, Clone, Default)]
pub struct NativeRow {
    pub columns: Vec<NativeColumn>,
    pub values: HashMap<String, Value>,
}

impl NativeRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column and its value.
    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        self.columns.push(NativeColumn { name: name.clone() });
        self.values.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

/// The result shape handed back by the client. An empty result set is an
/// empty `rows`, never an absent value.
#[derive(Debug, Clone, Default)]
pub struct NativeResult {
    pub rows: Vec<NativeRow>,
}

/// Contract every underlying client implementation satisfies.
///
/// All operations are asynchronous with a single value-or-error outcome;
/// the adapter tolerates any of them completing immediately.
#[async_trait]
pub trait CqlClient: Send + Sync {
    /// Establish the connection set.
    async fn connect(&self) -> Result<(), ClientError>;

    /// Run an ad-hoc statement.
    async fn execute(
        &self,
        statement: &str,
        params: Vec<WireValue>,
        consistency: NativeConsistency,
    ) -> Result<NativeResult, ClientError>;

    /// Run a statement through the prepared-statement path.
    async fn execute_prepared(
        &self,
        statement: &str,
        params: Vec<WireValue>,
        consistency: NativeConsistency,
    ) -> Result<NativeResult, ClientError>;

    /// Tear down every connection held by the client.
    async fn shutdown(&self) -> Result<(), ClientError>;

    /// Hand over the client's log stream. Yields `Some` at most once; the
    /// driver takes it at pool creation and relays lines as events.
    fn log_stream(&self) -> Option<mpsc::UnboundedReceiver<ClientLog>>;
}

/// Builds client instances from translated options — the seam that makes
/// the underlying implementation interchangeable.
pub trait ClientConnector: Send + Sync {
    fn build(&self, options: &ClientOptions) -> Result<Arc<dyn CqlClient>, ClientError>;
}
