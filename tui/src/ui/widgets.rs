use crate::app::App;
use crate::config::StoreBackend;
use favlist_core::form::FormField;
use favlist_core::models::Favorite;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the title bar
pub fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(Span::styled(
        " My Favorites ",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);

    frame.render_widget(header, area);
}

/// Render the three inputs and the add action
pub fn render_form<S>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    for (field, row) in FormField::ALL.iter().zip(rows.iter()) {
        render_input(frame, app, *field, *row);
    }

    let submit_hint = format!(" [ Add Favorite ]  ({}) ", app.config.keymap.submit);
    let button_style = if app.view.form.is_submittable() {
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(submit_hint, button_style)))
            .alignment(Alignment::Center),
        rows[3],
    );
}

fn render_input<S>(frame: &mut Frame, app: &App<S>, field: FormField, area: Rect) {
    let focused = app.focus == field;
    let value = app.view.form.field(field);

    let mut spans = Vec::new();
    if value.is_empty() && !focused {
        spans.push(Span::styled(field.label(), Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::raw(value.to_string()));
    }
    if focused {
        spans.push(Span::styled("▊", Style::default().fg(Color::Yellow)));
    }

    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", field.label())),
    );

    frame.render_widget(input, area);
}

/// Render the displayed collection, or the empty-state message
pub fn render_favorites<S>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Favorites ");

    if app.view.is_empty() {
        let empty_message = Paragraph::new("No favorites yet.")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty_message, area);
        return;
    }

    let items: Vec<ListItem> = app
        .view
        .favorites()
        .iter()
        .skip(app.scroll_offset)
        .map(favorite_item)
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn favorite_item(favorite: &Favorite) -> ListItem<'_> {
    let mut title = vec![Span::styled(
        favorite.name.as_str(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )];
    if let Some(ts) = favorite.display_timestamp() {
        title.push(Span::raw("  "));
        title.push(Span::styled(ts, Style::default().fg(Color::DarkGray)));
    }

    let mut lines = vec![
        Line::from(title),
        Line::from(vec![
            Span::styled("Category: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(favorite.category.as_str(), Style::default().fg(Color::Gray)),
        ]),
    ];
    if favorite.has_note() {
        lines.push(Line::from(Span::styled(
            favorite.note.as_str(),
            Style::default().fg(Color::Gray),
        )));
    }
    lines.push(Line::from(""));

    ListItem::new(lines)
}

/// Render the status bar at the bottom
pub fn render_status_bar<S>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let backend = match app.config.store.backend {
        StoreBackend::Rest => "rest",
        StoreBackend::Sqlite => "sqlite",
    };
    let keymap = &app.config.keymap;
    let status_text = format!(
        " {} favorites | store: {} | [{}:Next] [{}:Prev] [Enter:Next/Add] [{}:Add] [{}/{}:Scroll] [{}:Quit] ",
        app.view.favorites().len(),
        backend,
        keymap.next_field,
        keymap.prev_field,
        keymap.submit,
        keymap.scroll_up,
        keymap.scroll_down,
        keymap.quit,
    );

    let status_bar = Paragraph::new(status_text)
        .style(Style::default().bg(Color::DarkGray).fg(Color::White))
        .alignment(Alignment::Center);

    frame.render_widget(status_bar, area);
}
