/*!
 * Project store connection management.
 *
 * Handles SQLite connection creation, schema initialization and async-safe
 * access using tokio's spawn_blocking.
 */

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use log::{debug, info};
use rusqlite::Connection;

/// Default database filename
const DEFAULT_DB_FILENAME: &str = "myasub.db";

/// Default database directory name under the user's data directory
const DEFAULT_DB_DIRNAME: &str = "myasub";

/// Store connection wrapper with thread-safe access.
#[derive(Clone)]
pub struct StoreConnection {
    /// Path to the database file
    db_path: PathBuf,
    /// Thread-safe connection wrapped in Arc<Mutex>
    connection: Arc<Mutex<Connection>>,
}

impl StoreConnection {
    /// Open (or create) the store at the default location.
    pub fn new_default() -> Result<Self> {
        let db_path = Self::default_database_path()?;
        Self::new(&db_path)
    }

    /// Open (or create) the store at the specified path.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create store directory: {:?}", parent))?;
        }

        info!("Opening project store at: {:?}", db_path);

        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open project store: {:?}", db_path))?;

        initialize_schema(&conn)?;

        Ok(Self {
            db_path,
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create an in-memory store (for testing).
    pub fn new_in_memory() -> Result<Self> {
        debug!("Creating in-memory project store");

        let conn = Connection::open_in_memory().context("Failed to create in-memory store")?;
        initialize_schema(&conn)?;

        Ok(Self {
            db_path: PathBuf::from(":memory:"),
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// Default store path under the platform data directory.
    pub fn default_database_path() -> Result<PathBuf> {
        let base_dir = dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;

        Ok(base_dir.join(DEFAULT_DB_DIRNAME).join(DEFAULT_DB_FILENAME))
    }

    /// Path this connection is backed by.
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Run a closure against the connection on a blocking thread.
    pub async fn execute_async<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let connection = Arc::clone(&self.connection);
        tokio::task::spawn_blocking(move || {
            let conn = connection
                .lock()
                .map_err(|e| anyhow::anyhow!("Store connection lock poisoned: {}", e))?;
            f(&conn)
        })
        .await
        .context("Store task panicked")?
    }
}

/// Initialize the project store schema.
fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS projects (
            id TEXT PRIMARY KEY,
            file_name TEXT NOT NULL,
            created_at TEXT NOT NULL,
            cues TEXT NOT NULL,
            is_external_import INTEGER NOT NULL DEFAULT 0
        );
        CREATE INDEX IF NOT EXISTS idx_projects_created_at
            ON projects (created_at DESC);
        "#,
    )
    .context("Failed to initialize project store schema")?;

    Ok(())
}
