//! Pluggable CQL driver adapter.
//!
//! Sits between a query-building layer and an interchangeable CQL client
//! implementation, normalizing the three concerns that vary across
//! clients: connection-pool lifecycle and readiness signaling, transient
//! vs. terminal error classification for caller-side retries, and
//! translation of results and parameters between the client's native
//! shapes and a uniform row/value representation.
//!
//! # Example
//! ```ignore
//! use cqlbridge::prelude::*;
//!
//! let driver = CqlDriver::new(connector);
//! let options = driver.initialize_options(
//!     ConnectionOptions::new()
//!         .keyspace("events")
//!         .hosts(["10.0.0.1:9042", "10.0.0.2:9042"]),
//! );
//!
//! let pool = driver.create_pool(options)?;
//! pool.wait_ready().await?;
//!
//! let rows = driver
//!     .execute(
//!         &pool,
//!         "SELECT id, payload FROM events WHERE day = ?",
//!         vec!["2024-06-01".into()],
//!         "LOCAL_QUORUM",
//!         &QueryOptions::new(),
//!     )
//!     .await?;
//! ```

pub mod client;
pub mod config;
pub mod driver;
pub mod error;
pub mod events;
pub mod mapping;
pub mod pool;
pub mod rows;
pub mod value;

pub use client::{
    ClientConnector, ClientLog, CqlClient, LogLevel, NativeColumn, NativeResult, NativeRow,
};
pub use config::{
    initialize_options, remap_connection_options, ClientOptions, ConnectionOptions,
    CredentialOverrides, DEFAULT_PROTOCOL_VERSION,
};
pub use driver::CqlDriver;
pub use error::{ClientError, CqlError, CqlResult};
pub use events::DriverEvent;
pub use mapping::{ConsistencyMap, NativeConsistency, NativeType, TypeMap};
pub use pool::CqlPool;
pub use rows::{normalize_rows, QueryOptions, Row, StringHook};
pub use value::{Param, Value, WireValue};

/// Common imports for adapter consumers.
pub mod prelude {
    pub use crate::client::{ClientConnector, CqlClient};
    pub use crate::config::ConnectionOptions;
    pub use crate::driver::CqlDriver;
    pub use crate::error::{ClientError, CqlError, CqlResult};
    pub use crate::events::DriverEvent;
    pub use crate::pool::CqlPool;
    pub use crate::rows::{QueryOptions, Row};
    pub use crate::value::{Param, Value};
}
