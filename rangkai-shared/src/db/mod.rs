/// Database layer for Rangkai Edu
///
/// This module provides PostgreSQL connection pooling.
///
/// # Modules
///
/// - `pool`: Connection pool initialization, liveness check and shutdown
///
/// # Example
///
/// ```no_run
/// use rangkai_shared::config::DbConfig;
/// use rangkai_shared::db::{DbPool, PoolSettings};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DbConfig::load()?;
///     let pool = DbPool::init(&config, PoolSettings::default()).await?;
///     pool.close().await;
///     Ok(())
/// }
/// ```

pub mod pool;

pub use pool::{DbError, DbPool, PoolSettings, PoolStats};
