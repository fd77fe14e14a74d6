//! Connection option structs and the caller-to-client key translation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Protocol version injected when the caller does not pin one.
pub const DEFAULT_PROTOCOL_VERSION: &str = "3.0.0";

/// Connection options as the query layer supplies them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionOptions {
    pub keyspace: Option<String>,
    #[serde(default)]
    pub hosts: Vec<String>,
    /// Maximum time to wait for a connection from the pool.
    pub timeout: Option<Duration>,
    /// Connections kept per host.
    pub host_pool_size: Option<u32>,
    /// CQL dialect version requested by the caller.
    pub cql_version: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl ConnectionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyspace(mut self, keyspace: impl Into<String>) -> Self {
        self.keyspace = Some(keyspace.into());
        self
    }

    pub fn hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hosts = hosts.into_iter().map(Into::into).collect();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn host_pool_size(mut self, size: u32) -> Self {
        self.host_pool_size = Some(size);
        self
    }

    pub fn cql_version(mut self, version: impl Into<String>) -> Self {
        self.cql_version = Some(version.into());
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

/// Connection options in the shape the underlying client expects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientOptions {
    pub keyspace: Option<String>,
    #[serde(default)]
    pub hosts: Vec<String>,
    pub get_a_connection_timeout: Option<Duration>,
    pub pool_size: Option<u32>,
    /// Protocol version; defaulted by [`initialize_options`] when unset.
    pub version: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub supports_prepared_statements: bool,
}

/// Pure key translation between the caller-facing and client-facing
/// shapes. Every rename is enumerated here; fields absent in the input
/// stay absent in the output.
pub fn remap_connection_options(options: ConnectionOptions) -> ClientOptions {
    ClientOptions {
        keyspace: options.keyspace,
        hosts: options.hosts,
        get_a_connection_timeout: options.timeout,
        pool_size: options.host_pool_size,
        version: options.cql_version,
        username: options.user,
        password: options.password,
        supports_prepared_statements: false,
    }
}

/// Translate caller options and fill in what this client implementation
/// guarantees: a protocol version and prepared-statement support.
pub fn initialize_options(options: ConnectionOptions) -> ClientOptions {
    let mut client = remap_connection_options(options);
    if client.version.is_none() {
        client.version = Some(DEFAULT_PROTOCOL_VERSION.to_string());
    }
    client.supports_prepared_statements = true;
    client
}

/// Per-connection credential overrides applied on top of translated
/// options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialOverrides {
    pub user: Option<String>,
    pub password: Option<String>,
}

impl CredentialOverrides {
    /// Apply onto client options, renaming `user` to the client's
    /// `username`.
    pub fn apply(self, options: &mut ClientOptions) {
        if let Some(user) = self.user {
            options.username = Some(user);
        }
        if let Some(password) = self.password {
            options.password = Some(password);
        }
    }
}
