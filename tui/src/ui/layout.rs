use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use super::{render_favorites, render_form, render_header, render_status_bar};

/// Height of the add form: three bordered inputs plus the action row
const FORM_HEIGHT: u16 = 3 * 3 + 1;

/// Render the complete UI
pub fn render<S>(frame: &mut Frame, app: &App<S>) {
    let size = frame.size();

    // Header, form, favorites list, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(FORM_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    render_header(frame, chunks[0]);
    render_form(frame, app, chunks[1]);
    render_favorites(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);
}
