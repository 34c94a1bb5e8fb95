//! Where the points-of-sale tables live.

use serde::{Deserialize, Serialize};
use std::{borrow::Cow, path::PathBuf};

/// The special SQLite filename for a private, connection-scoped database.
const IN_MEMORY: &str = ":memory:";

/// Location of the SQLite database backing the storage ports.
///
/// Leaving `database_path` unset keeps everything in memory, which suits tests
/// and a server that rebuilds its tables from the feed on start-up anyway. Such
/// a database disappears with its last open connection, so [`Db::open`] pins
/// one writer connection for the lifetime of the pool.
///
/// ```
/// use pos_sqlite::config::SqliteConfig;
///
/// assert!(SqliteConfig::default().is_in_memory());
///
/// let on_disk: SqliteConfig = serde_json::from_str(r#"{"database_path": "pos.db"}"#).unwrap();
/// assert_eq!(on_disk.filename(), "pos.db");
/// assert!(on_disk.create_if_missing);
/// ```
///
/// [`Db::open`]: crate::Db::open
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqliteConfig {
    /// File to open; absent for an in-memory database
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Create the file on first open instead of failing
    #[serde(default = "create_by_default")]
    pub create_if_missing: bool,
}

fn create_by_default() -> bool {
    true
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            create_if_missing: create_by_default(),
        }
    }
}

impl SqliteConfig {
    /// Whether the tables live only as long as the process.
    pub fn is_in_memory(&self) -> bool {
        self.database_path.is_none()
    }

    /// The filename handed to SQLite.
    pub fn filename(&self) -> Cow<'_, str> {
        match &self.database_path {
            Some(path) => path.to_string_lossy(),
            None => Cow::Borrowed(IN_MEMORY),
        }
    }
}
