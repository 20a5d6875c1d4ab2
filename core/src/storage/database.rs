use crate::Result;
use rusqlite::Connection as SqliteConnection;
use std::path::{Path, PathBuf};

pub type Connection = SqliteConnection;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS "Favorites" (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (name <> ''),
    category TEXT NOT NULL CHECK (category <> ''),
    note TEXT NOT NULL DEFAULT '',
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_favorites_created_at ON "Favorites" (created_at DESC);
"#;

/// Location of the local favorites database
pub struct Database {
    db_path: PathBuf,
}

impl Database {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    /// Open the file, creating parent directories and the table as needed
    pub fn create(&self) -> Result<Connection> {
        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = SqliteConnection::open(&self.db_path)?;
        Self::initialize_schema(&conn)?;
        Ok(conn)
    }

    /// Open a throwaway in-memory database with the table in place
    pub fn in_memory() -> Result<Connection> {
        let conn = SqliteConnection::open_in_memory()?;
        Self::initialize_schema(&conn)?;
        Ok(conn)
    }

    fn initialize_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.db_path.exists()
    }

    /// Open an existing file as-is, or create a fresh one
    pub fn get_or_create(&self) -> Result<Connection> {
        if self.exists() {
            Ok(SqliteConnection::open(&self.db_path)?)
        } else {
            self.create()
        }
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }
}
