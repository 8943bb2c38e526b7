//! Terminal rendering: query input, status line, ticker rows.
//!
//! All state transitions live in `app` and `model`; this module only draws
//! whatever the app currently holds.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Row, Table};

use ticker_common::record::TickerRecord;
use ticker_common::store::KeyValueStore;
use ticker_common::tickers::Ticker;

use crate::app::App;

/// Draws one frame.
pub fn render<S: KeyValueStore>(frame: &mut Frame, app: &App<S>) {
    let [input_area, status_area, rows_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(frame.area());

    let input = Paragraph::new(app.raw_query())
        .block(Block::bordered().title("Tickers (comma-separated)"));
    frame.render_widget(input, input_area);
    // The input is the only focusable element; keep the cursor at its end.
    frame.set_cursor_position(Position::new(
        input_area.x + 1 + app.raw_query().len() as u16,
        input_area.y + 1,
    ));

    frame.render_widget(Line::from(status_text(app)), status_area);

    if app.loading() && app.selection().is_none() {
        frame.render_widget(Paragraph::new("Loading..."), rows_area);
        return;
    }

    // With no active selection the full dataset is shown.
    let mut rows: Vec<(Ticker, &TickerRecord)> = match app.selection() {
        Some(selection) => selection.iter().map(|(t, r)| (*t, r)).collect(),
        None => app.dataset().iter().map(|(t, r)| (*t, r)).collect(),
    };
    rows.sort_by_key(|(ticker, _)| ticker.to_string());

    let table = Table::new(
        rows.iter().map(|(ticker, record)| {
            Row::new(vec![
                ticker.to_string(),
                format!("{:.2}", record.price),
                record.time.clone(),
            ])
        }),
        [
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Fill(1),
        ],
    )
    .header(Row::new(vec!["SYMBOL", "PRICE", "TIME"]).style(Style::new().add_modifier(Modifier::BOLD)));
    frame.render_widget(table, rows_area);
}

fn status_text<S: KeyValueStore>(app: &App<S>) -> String {
    if let Some(error) = app.feed_error() {
        return format!("feed failed: {error} (Esc to quit)");
    }
    if app.loading() {
        return "refreshing...".to_string();
    }
    match app.selection() {
        Some(selection) => format!("{} matched", selection.len()),
        None => format!("{} symbols", app.dataset().len()),
    }
}
