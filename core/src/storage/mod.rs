mod database;
mod favorite_repository;
mod rest_store;
mod sqlite_store;

pub use database::{Connection, Database};
pub use favorite_repository::FavoriteRepository;
pub use rest_store::RestStore;
pub use sqlite_store::SqliteStore;

use crate::models::{Favorite, NewFavorite};
use crate::Result;
use async_trait::async_trait;

/// The single logical table holding favorites
pub const TABLE_NAME: &str = "Favorites";

/// Narrow interface to the external record store.
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// All favorites, newest `created_at` first
    async fn list(&self) -> Result<Vec<Favorite>>;

    /// Persist a new favorite; the store assigns `id` and `created_at`
    async fn insert(&self, favorite: &NewFavorite) -> Result<()>;
}

#[async_trait]
impl<S: FavoriteStore + ?Sized> FavoriteStore for Box<S> {
    async fn list(&self) -> Result<Vec<Favorite>> {
        (**self).list().await
    }

    async fn insert(&self, favorite: &NewFavorite) -> Result<()> {
        (**self).insert(favorite).await
    }
}

#[async_trait]
impl<S: FavoriteStore + ?Sized> FavoriteStore for std::sync::Arc<S> {
    async fn list(&self) -> Result<Vec<Favorite>> {
        (**self).list().await
    }

    async fn insert(&self, favorite: &NewFavorite) -> Result<()> {
        (**self).insert(favorite).await
    }
}
