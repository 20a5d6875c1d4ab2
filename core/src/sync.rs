//! Keeps the displayed collection in step with the store.
//!
//! Both operations log failures and otherwise swallow them: the caller gets
//! an outcome it may inspect, but nothing is retried and nothing is fatal.

use crate::form::FavoriteForm;
use crate::models::Favorite;
use crate::storage::FavoriteStore;
use crate::SyncError;
use tracing::{debug, error};

/// Everything the user sees: the add form and the displayed collection.
#[derive(Debug, Default)]
pub struct FavoritesView {
    pub form: FavoriteForm,
    favorites: Vec<Favorite>,
}

impl FavoritesView {
    pub fn new() -> Self {
        Self::default()
    }

    /// The displayed collection, newest first
    pub fn favorites(&self) -> &[Favorite] {
        &self.favorites
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    fn replace_favorites(&mut self, favorites: Vec<Favorite>) {
        self.favorites = favorites;
    }
}

#[derive(Debug)]
pub enum ListOutcome {
    /// The collection was replaced with `count` records
    Refreshed { count: usize },
    /// The read failed; the previous collection is still shown
    Failed(SyncError),
}

impl ListOutcome {
    pub fn is_refreshed(&self) -> bool {
        matches!(self, ListOutcome::Refreshed { .. })
    }
}

#[derive(Debug)]
pub enum AddOutcome {
    /// Name or category missing; nothing was sent
    Skipped,
    /// Inserted, form cleared, and the follow-up read attempted
    Added { refresh: ListOutcome },
    /// The insert failed; the form is untouched and no read was made
    Failed(SyncError),
}

/// Runs `list` and `add` against a store on behalf of one view.
pub struct Synchronizer<S> {
    store: S,
}

impl<S: FavoriteStore> Synchronizer<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Re-read every favorite and replace the displayed collection.
    pub async fn list(&self, view: &mut FavoritesView) -> ListOutcome {
        match self.store.list().await {
            Ok(favorites) => {
                let count = favorites.len();
                view.replace_favorites(favorites);
                debug!(count, "favorites refreshed");
                ListOutcome::Refreshed { count }
            }
            Err(err) => {
                let err = SyncError::Read(err);
                error!(error = %err, "list failed");
                ListOutcome::Failed(err)
            }
        }
    }

    /// Submit the form as a new favorite, then refresh on success.
    pub async fn add(&self, view: &mut FavoritesView) -> AddOutcome {
        let Some(favorite) = view.form.to_new_favorite() else {
            debug!("add skipped: name or category empty");
            return AddOutcome::Skipped;
        };

        if let Err(err) = self.store.insert(&favorite).await {
            let err = SyncError::Write(err);
            error!(error = %err, "add failed");
            return AddOutcome::Failed(err);
        }

        view.form.clear();
        let refresh = self.list(view).await;
        AddOutcome::Added { refresh }
    }
}
