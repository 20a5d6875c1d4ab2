use crate::app::App;
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use favlist_core::storage::FavoriteStore;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::warn;

/// Terminal events
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal tick event, also sent after a resize
    Tick,
}

/// Reads terminal input on a blocking task and forwards it as `Event`s.
pub struct EventHandler {
    receiver: mpsc::Receiver<Event>,
}

impl EventHandler {
    /// Start polling the terminal with the given tick rate
    pub fn new(tick_rate_ms: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate_ms);
        let (sender, receiver) = mpsc::channel(64);

        tokio::task::spawn_blocking(move || loop {
            let event = match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(CEvent::Key(key)) => Event::Key(key),
                    Ok(_) => Event::Tick,
                    Err(err) => {
                        warn!(error = %err, "failed to read terminal event");
                        break;
                    }
                },
                Ok(false) => Event::Tick,
                Err(err) => {
                    warn!(error = %err, "failed to poll terminal");
                    break;
                }
            };
            if sender.blocking_send(event).is_err() {
                break;
            }
        });

        Self { receiver }
    }

    /// Wait for the next event; `None` once input can no longer be read
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }
}

/// Handle key events for the application
pub async fn handle_key_event<S: FavoriteStore>(key: KeyEvent, app: &mut App<S>) {
    // On Windows, crossterm reports both key press and release events.
    // We only want to handle press events to avoid duplicates.
    if key.kind != KeyEventKind::Press {
        return;
    }

    let bindings = app.bindings.clone();
    if bindings.quit.matches(&key) {
        app.quit();
    } else if bindings.submit.matches(&key) {
        app.submit().await;
    } else if bindings.next_field.matches(&key) {
        app.focus_next();
    } else if bindings.prev_field.matches(&key) {
        app.focus_prev();
    } else if bindings.scroll_up.matches(&key) {
        app.scroll_up();
    } else if bindings.scroll_down.matches(&key) {
        app.scroll_down();
    } else {
        handle_editing_input(key, app).await;
    }
}

/// Keys that edit the focused field
async fn handle_editing_input<S: FavoriteStore>(key: KeyEvent, app: &mut App<S>) {
    match key.code {
        KeyCode::Enter => app.enter().await,
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) => {
            // Allow AltGr combinations (CONTROL+ALT) for special characters
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::ALT)
            {
                app.insert_char(c);
            } else if c == 'c' {
                // ctrl-c quits regardless of the configured quit key
                app.quit();
            }
        }
        _ => {}
    }
}
