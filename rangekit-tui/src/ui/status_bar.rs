//! Bottom status bar — focused thumb and its value text, last message, key hints.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{AppState, StatusLevel};
use crate::theme;

const HINTS: &str = "Tab focus  ←→ ±1  PgUp/PgDn ±10  Home/End  ? help  q quit ";

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let hints_width = HINTS.chars().count() as u16;
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(hints_width)]).areas(area);

    let mut spans = vec![Span::raw(" ")];
    let focused = app.board.focused().and_then(|target| app.board.slider(target));
    match focused {
        Some(slider) => {
            spans.push(Span::styled(slider.id().to_string(), theme::accent_bold()));
            spans.push(Span::styled(format!(" = {}", slider.state().value_text), theme::neutral()));
            if slider.is_dragging() {
                spans.push(Span::styled(" (dragging)", theme::positive()));
            }
        }
        None => spans.push(Span::styled("no focus", theme::muted())),
    }

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), left);
    f.render_widget(Paragraph::new(Span::styled(HINTS, theme::muted())), right);
}
