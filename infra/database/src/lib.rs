//! # Database Infrastructure
//!
//! This crate provides a unified interface for initializing and managing the
//! PostgreSQL connection pool used across the workspace.
//!
//! ## Key Features
//! - **Pooled Connections**: A bounded [`sqlx`] pool shared by all slices.
//! - **Resilient Connectivity**: Built-in retry logic for the startup probe.
//! - **Embedded Migrations**: The schema is applied on init, before the pool
//!   is handed out.
//! - **Builder Pattern**: Fluent API for configuring connections and
//!   authentication.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chub_database::{Database, DatabaseError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), DatabaseError> {
//!     let db = Database::builder()
//!         .url("postgres://localhost:5432/coursehub")
//!         .auth("svc", "secret")
//!         .init()
//!         .await?;
//!
//!     let row: (i64,) = sqlx::query_as("SELECT 1").fetch_one(&*db).await?;
//!     assert_eq!(row.0, 1);
//!     Ok(())
//! }
//! ```

mod error;

pub use error::{DatabaseError, DatabaseErrorExt};

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Schema migrations embedded at compile time.
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Pool size used when the builder does not specify one.
const DEFAULT_MAX_CONNECTIONS: u32 = 16;

/// Inner state of the [`Database`] wrapper.
#[derive(Debug)]
pub struct DatabaseInner {
    pool: PgPool,
}

/// PostgreSQL pool wrapper that provides thread-safety and contextual error handling.
#[derive(Debug, Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

impl Database {
    /// Creates a new [`DatabaseBuilder`].
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::new()
    }

    /// Wraps an externally managed pool.
    ///
    /// Use this when the caller owns pool construction (tests, tooling).
    /// No connectivity probe or migration run is performed.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { inner: Arc::new(DatabaseInner { pool }) }
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }
}

impl Deref for Database {
    type Target = PgPool;

    fn deref(&self) -> &Self::Target {
        &self.inner.pool
    }
}

/// A fluent builder for configuring and establishing the PostgreSQL pool.
///
/// The connection URL is the one mandatory parameter; credentials supplied via
/// [`DatabaseBuilder::auth`] override whatever the URL carries.
#[must_use = "builders do nothing unless you call .init()"]
#[derive(Debug, Default)]
pub struct DatabaseBuilder {
    url: Option<String>,
    max_connections: Option<u32>,
    auth: Option<(String, String)>,
}

impl DatabaseBuilder {
    /// Creates a new [`DatabaseBuilder`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the connection URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Bounds the pool size.
    pub const fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = Some(max);
        self
    }

    /// Adds credentials to the connection.
    pub fn auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some((username.into(), password.into()));
        self
    }

    /// Consumes the builder and attempts to establish the pool.
    ///
    /// # Process
    /// 1. **Validation**: Ensures a URL is provided and parses it.
    /// 2. **Pool Construction**: Builds a lazily connecting, bounded pool.
    /// 3. **Resilience**: Probes connectivity up to 3 times with exponential
    ///    backoff (starting at 500ms), so an engine still starting up does not
    ///    fail the boot.
    /// 4. **Migrations**: Applies the embedded schema migrations.
    ///
    /// # Errors
    /// * [`DatabaseError::Validation`] if the URL is missing or malformed.
    /// * [`DatabaseError::Connection`] if the probe never succeeds.
    /// * [`DatabaseError::Migration`] if a migration fails to apply.
    #[instrument(skip(self), fields(url = ?self.url))]
    pub async fn init(self) -> Result<Database, DatabaseError> {
        let url = self.url.ok_or(DatabaseError::Validation {
            message: "URL is required".into(),
            context: None,
        })?;

        let mut options: PgConnectOptions =
            url.parse().map_err(|e: sqlx::Error| DatabaseError::Validation {
                message: e.to_string().into(),
                context: Some("Parsing connection URL".into()),
            })?;

        if let Some((username, password)) = self.auth {
            options = options.username(&username).password(&password);
        }

        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS))
            .connect_lazy_with(options);

        // 1. Connectivity Probe with Retries
        let mut delay = Duration::from_millis(500);
        for attempt in 1..=3 {
            match sqlx::query("SELECT 1").execute(&pool).await {
                Ok(_) => break,
                Err(e) if attempt == 3 => {
                    return Err(DatabaseError::Connection {
                        message: e.to_string().into(),
                        context: Some(url.into()),
                    });
                }
                Err(e) => {
                    warn!(attempt, ?delay, error = %e, "Database not ready, retrying...");
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }

        let version = sqlx::query_scalar::<_, String>("SHOW server_version")
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|_| "unknown".to_owned());
        info!(%version, "PostgreSQL connection established");

        // 2. Schema Migrations
        info!("Applying database migrations...");
        MIGRATOR.run(&pool).await.context("Applying embedded migrations")?;
        info!("Database migrations applied successfully");

        Ok(Database { inner: Arc::new(DatabaseInner { pool }) })
    }
}
