use super::{Connection, Database, FavoriteRepository, FavoriteStore};
use crate::models::{Favorite, NewFavorite};
use crate::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::Path;
use tracing::debug;

/// `FavoriteStore` backed by a local SQLite file.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = Database::new(path);
        let conn = db.get_or_create()?;
        debug!(path = %db.path().display(), "opened sqlite favorites store");
        Ok(Self::from_connection(conn))
    }

    pub fn in_memory() -> Result<Self> {
        Ok(Self::from_connection(Database::in_memory()?))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl FavoriteStore for SqliteStore {
    async fn list(&self) -> Result<Vec<Favorite>> {
        let conn = self.conn.lock();
        FavoriteRepository::get_all(&conn)
    }

    async fn insert(&self, favorite: &NewFavorite) -> Result<()> {
        let conn = self.conn.lock();
        let id = FavoriteRepository::create(&conn, favorite)?;
        debug!(id, "inserted favorite");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_insert_then_list() {
        let store = SqliteStore::in_memory().unwrap();

        store.insert(&NewFavorite::new("Coffee", "Drinks", "")).await.unwrap();
        store.insert(&NewFavorite::new("Dune", "Books", "reread")).await.unwrap();

        let favorites = store.list().await.unwrap();
        assert_eq!(favorites.len(), 2);
        assert_eq!(favorites[0].name, "Dune");
        assert_eq!(favorites[1].name, "Coffee");
    }

    #[tokio::test]
    async fn test_open_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favlist.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.insert(&NewFavorite::new("Coffee", "Drinks", "")).await.unwrap();
        }

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.list().await.unwrap().len(), 1);
    }
}
