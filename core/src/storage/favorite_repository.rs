use crate::models::{datetime_to_timestamp, timestamp_to_datetime, Favorite, NewFavorite};
use crate::{Error, Result};
use chrono::Utc;
use rusqlite::{params, Connection};

pub struct FavoriteRepository;

impl FavoriteRepository {
    /// Insert a favorite, assigning its id and creation time. Returns the new id.
    pub fn create(conn: &Connection, favorite: &NewFavorite) -> Result<i64> {
        if favorite.name.is_empty() || favorite.category.is_empty() {
            return Err(Error::InvalidInput(
                "name and category are required".to_string(),
            ));
        }

        conn.execute(
            r#"INSERT INTO "Favorites" (name, category, note, created_at) VALUES (?1, ?2, ?3, ?4)"#,
            params![
                favorite.name,
                favorite.category,
                favorite.note,
                datetime_to_timestamp(&Utc::now()),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Get all favorites, most recent first
    pub fn get_all(conn: &Connection) -> Result<Vec<Favorite>> {
        let mut stmt = conn.prepare(
            r#"SELECT id, name, category, note, created_at FROM "Favorites"
               ORDER BY created_at DESC, id DESC"#,
        )?;

        let favorites = stmt
            .query_map([], |row| {
                Ok(Favorite {
                    id: Some(row.get(0)?),
                    name: row.get(1)?,
                    category: row.get(2)?,
                    note: row.get(3)?,
                    created_at: Some(timestamp_to_datetime(row.get(4)?)),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(favorites)
    }
}
