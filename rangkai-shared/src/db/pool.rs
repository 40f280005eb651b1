/// Database connection pool management
///
/// This module turns a [`DbConfig`] into a PostgreSQL connection pool using sqlx.
/// Initialization is fail-fast: the database is pinged once over a direct
/// connection, and only then is the pool built. There is no retry.
///
/// # Example
///
/// ```no_run
/// use rangkai_shared::config::DbConfig;
/// use rangkai_shared::db::pool::{DbPool, PoolSettings};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DbConfig::load()?;
///     let pool = DbPool::init(&config, PoolSettings::default()).await?;
///
///     let row: (i64,) = sqlx::query_as("SELECT $1")
///         .bind(42i64)
///         .fetch_one(pool.inner())
///         .await?;
///
///     pool.close().await;
///     Ok(())
/// }
/// ```

use crate::config::DbConfig;
use sqlx::postgres::{PgConnectOptions, PgConnection, PgPool, PgPoolOptions};
use sqlx::Connection;
use std::io;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Pool initialization errors
#[derive(Error, Debug)]
pub enum DbError {
    /// The connection string could not be parsed into connect options
    #[error("Invalid DSN: {0}")]
    InvalidDsn(#[source] sqlx::Error),

    /// No connection could be established
    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    /// A connection was established but did not answer the liveness ping
    #[error("Failed to ping database: {0}")]
    Ping(#[source] sqlx::Error),
}

/// Pool sizing and lifetime policy
///
/// All durations are in seconds, like the rest of the configuration surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    /// Maximum number of connections in the pool
    ///
    /// Default: 20
    pub max_connections: u32,

    /// Minimum number of connections kept open
    ///
    /// Default: 4
    pub min_connections: u32,

    /// Maximum lifetime of a connection before it is recycled (seconds)
    ///
    /// Default: 300 (5 minutes)
    pub max_lifetime_seconds: u64,

    /// How long a connection above `min_connections` may sit idle before it
    /// is closed (seconds)
    ///
    /// Default: 60 (1 minute). sqlx has no periodic health ping; this is the
    /// closest knob to a one-minute health-check period. Liveness itself is
    /// covered by testing every connection before it is handed out.
    pub idle_timeout_seconds: u64,

    /// How long `acquire` waits for a free connection, and how long the
    /// startup check waits to connect (seconds)
    ///
    /// Default: 30
    pub acquire_timeout_seconds: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 20,
            min_connections: 4,
            max_lifetime_seconds: 300,
            idle_timeout_seconds: 60,
            acquire_timeout_seconds: 30,
        }
    }
}

impl PoolSettings {
    pub(crate) fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .max_lifetime(Duration::from_secs(self.max_lifetime_seconds))
            .idle_timeout(Duration::from_secs(self.idle_timeout_seconds))
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_seconds))
            .test_before_acquire(true)
    }
}

/// Pool connection statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub active_connections: usize,

    /// Number of idle connections available
    pub idle_connections: usize,

    /// Total connections in the pool
    pub total_connections: usize,
}

/// Handle to the PostgreSQL connection pool
///
/// Cloning is cheap; all clones share the same connections. The startup
/// routine owns the first handle and hands clones to whoever needs one.
#[derive(Debug, Clone)]
pub struct DbPool {
    pool: PgPool,
}

impl DbPool {
    /// Verifies the database answers a ping, then opens the pool
    ///
    /// The check runs on one direct connection rather than through the pool,
    /// so a refused connection is reported as-is instead of after the pool's
    /// acquire retries time out.
    ///
    /// # Errors
    ///
    /// - [`DbError::InvalidDsn`] if the DSN built from `config` is malformed
    /// - [`DbError::Connect`] if the check connection fails or does not
    ///   complete within `acquire_timeout_seconds`
    /// - [`DbError::Ping`] if the check connection fails the ping
    pub async fn init(config: &DbConfig, settings: PoolSettings) -> Result<Self, DbError> {
        info!(
            dsn = %config.redacted_dsn(),
            max_connections = settings.max_connections,
            min_connections = settings.min_connections,
            max_lifetime_seconds = settings.max_lifetime_seconds,
            idle_timeout_seconds = settings.idle_timeout_seconds,
            "Creating database connection pool"
        );

        let options = parse_dsn(&config.dsn())?;

        let timeout = Duration::from_secs(settings.acquire_timeout_seconds);
        if let Err(err) = ping_once(&options, timeout).await {
            warn!(error = %err, "Database liveness check failed");
            return Err(err);
        }

        let pool = settings.pool_options().connect_lazy_with(options);

        info!("Database connection pool initialized successfully");
        Ok(Self { pool })
    }

    /// Builds the pool without opening any connection
    ///
    /// Connections are established on first use. Must be called from within a
    /// Tokio runtime.
    pub fn connect_lazy(config: &DbConfig, settings: PoolSettings) -> Result<Self, DbError> {
        let options = parse_dsn(&config.dsn())?;
        let pool = settings.pool_options().connect_lazy_with(options);

        Ok(Self { pool })
    }

    /// Acquires one connection and pings it
    pub async fn ping(&self) -> Result<(), DbError> {
        debug!("Pinging database");

        let mut conn = self.pool.acquire().await.map_err(DbError::Connect)?;
        conn.ping().await.map_err(DbError::Ping)?;

        debug!("Database ping succeeded");
        Ok(())
    }

    /// Runs `SELECT 1` against the pool
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Ping`] if the query fails or returns anything but 1
    pub async fn health_check(&self) -> Result<(), DbError> {
        debug!("Performing database health check");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(DbError::Ping)?;

        if result.0 == 1 {
            debug!("Database health check passed");
            Ok(())
        } else {
            warn!("Database health check returned unexpected value: {}", result.0);
            Err(DbError::Ping(sqlx::Error::Protocol(
                "Health check returned unexpected value".into(),
            )))
        }
    }

    /// Current connection counts
    pub fn stats(&self) -> PoolStats {
        let size = self.pool.size();
        let idle = self.pool.num_idle() as u32;

        PoolStats {
            active_connections: size.saturating_sub(idle) as usize,
            idle_connections: idle as usize,
            total_connections: size as usize,
        }
    }

    /// Underlying sqlx pool, for running queries
    pub fn inner(&self) -> &PgPool {
        &self.pool
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Closes every pooled connection
    ///
    /// Safe to call more than once and on a pool that never connected.
    pub async fn close(&self) {
        if self.pool.is_closed() {
            debug!("Database connection pool already closed");
            return;
        }

        info!("Closing database connection pool");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

/// Opens one connection, pings it and closes it
async fn ping_once(options: &PgConnectOptions, timeout: Duration) -> Result<(), DbError> {
    debug!("Checking database with a direct connection");

    let mut conn = match tokio::time::timeout(timeout, PgConnection::connect_with(options)).await
    {
        Ok(result) => result.map_err(DbError::Connect)?,
        Err(_) => {
            return Err(DbError::Connect(sqlx::Error::Io(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("no connection within {}s", timeout.as_secs()),
            ))))
        }
    };

    let result = conn.ping().await.map_err(DbError::Ping);

    if let Err(err) = conn.close().await {
        debug!(error = %err, "Failed to close liveness check connection");
    }

    result
}

/// Parses a connection URI into sqlx connect options
pub fn parse_dsn(dsn: &str) -> Result<PgConnectOptions, DbError> {
    PgConnectOptions::from_str(dsn).map_err(DbError::InvalidDsn)
}
