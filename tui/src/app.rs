use crate::config::{Config, KeyBindings};
use favlist_core::{
    form::FormField,
    storage::FavoriteStore,
    sync::{AddOutcome, FavoritesView, Synchronizer},
};
use tracing::info;

/// Application state
pub struct App<S> {
    pub should_quit: bool,
    pub view: FavoritesView,
    pub focus: FormField,
    pub scroll_offset: usize,
    pub config: Config,
    pub bindings: KeyBindings,
    sync: Synchronizer<S>,
}

impl<S: FavoriteStore> App<S> {
    /// Create a new App over the given store
    pub fn new(store: S, config: Config) -> Self {
        Self::with_bindings(store, config, KeyBindings::default())
    }

    pub fn with_bindings(store: S, config: Config, bindings: KeyBindings) -> Self {
        Self {
            should_quit: false,
            view: FavoritesView::new(),
            focus: FormField::Name,
            scroll_offset: 0,
            config,
            bindings,
            sync: Synchronizer::new(store),
        }
    }

    /// Initial read performed when the screen is first shown
    pub async fn load(&mut self) {
        let outcome = self.sync.list(&mut self.view).await;
        info!(loaded = outcome.is_refreshed(), "initial favorites load");
        self.clamp_scroll();
    }

    /// Add the form contents as a favorite. Failures are logged by the
    /// synchronizer and leave the form as typed.
    pub async fn submit(&mut self) {
        if let AddOutcome::Added { .. } = self.sync.add(&mut self.view).await {
            self.focus = FormField::Name;
            self.scroll_offset = 0;
        }
        self.clamp_scroll();
    }

    /// Enter moves to the next field, and submits from the last one
    pub async fn enter(&mut self) {
        if self.focus == FormField::Note {
            self.submit().await;
        } else {
            self.focus_next();
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.view.form.field_mut(self.focus).push(c);
    }

    pub fn backspace(&mut self) {
        self.view.form.field_mut(self.focus).pop();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset += 1;
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        let max = self.view.favorites().len().saturating_sub(1);
        self.scroll_offset = self.scroll_offset.min(max);
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
