#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the pos-sqlite crate.
//! [pos_core]: https://docs.rs/pos_core/latest/pos_core/index.html
//! [pos_axum]: https://docs.rs/pos_axum/latest/pos_axum/index.html
//! [pos_sqlite]: https://docs.rs/pos_sqlite/latest/pos_sqlite/index.html
#![doc = include_str!("../README.md")]

use sqlx::sqlite;
use std::{str::FromStr, time::Duration};
use tokio::try_join;

pub mod config;
mod r#impl;
mod types;

use config::SqliteConfig;
pub use types::CorruptRow;

/// SQLite database implementation of the points-of-sale storage ports.
///
/// This struct provides separate reader and writer connection pools to a SQLite database,
/// implementing the reader and writer traits defined in `pos-core`. The separation of read
/// and write connections allows for better concurrency control and follows SQLite best
/// practices for Write-Ahead Logging (WAL) mode.
///
/// # Connection Management
///
/// - `reader`: A connection pool for read operations, allowing concurrent reads
/// - `writer`: A single-connection pool for write operations, ensuring serialized writes
///
/// # Example
///
/// ```no_run
/// # use pos_sqlite::{Db, config::SqliteConfig};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SqliteConfig::default();
/// let db = Db::open(&config).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Db {
    /// Connection pool for read operations
    pub reader: sqlx::Pool<sqlx::Sqlite>,
    /// Connection pool for write operations (limited to 1 connection, which is
    /// kept open for an in-memory database)
    pub writer: sqlx::Pool<sqlx::Sqlite>,
}

impl Db {
    /// Open a connection to the specified SQLite database.
    ///
    /// Creates a new database if one doesn't exist (when `create_if_missing` is true)
    /// and applies all pending migrations.
    ///
    /// # Database Configuration
    ///
    /// - WAL mode for better concurrency
    /// - Foreign keys enabled, so opening hours cannot outlive their point of sale
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if:
    /// - Database connection fails
    /// - Migrations fail to apply
    pub async fn open(config: &SqliteConfig) -> Result<Self, sqlx::Error> {
        let filename = config.filename();

        let options = sqlite::SqliteConnectOptions::from_str(&filename)?
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true)
            .journal_mode(sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlite::SqliteSynchronous::Normal)
            .pragma("journal_size_limit", "27103364")
            .pragma("mmap_size", "134217728")
            .pragma("temp_store", "memory")
            .create_if_missing(config.create_if_missing);

        let (reader, writer) = pool_options(config);
        let (reader, writer) = try_join!(
            reader.connect_with(options.clone()),
            writer.connect_with(options)
        )?;

        sqlx::migrate!("./schema").run(&writer).await?;

        tracing::debug!(path = %filename, "database ready");

        Ok(Self { reader, writer })
    }
}

/// Pool settings for the reader and writer.
///
/// An in-memory database is dropped once its last connection closes, so the
/// writer keeps one connection open and never reaps it.
fn pool_options(config: &SqliteConfig) -> (sqlite::SqlitePoolOptions, sqlite::SqlitePoolOptions) {
    let reader = sqlite::SqlitePoolOptions::new();
    let writer = sqlite::SqlitePoolOptions::new().max_connections(1);

    if config.is_in_memory() {
        let writer = writer
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
        (reader, writer)
    } else {
        (reader, writer)
    }
}
