//! Help overlay — keyboard and mouse reference.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::theme;

pub const WIDTH: u16 = 64;
pub const HEIGHT: u16 = 19;

pub fn render(f: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Keys");
    key(&mut lines, "Tab / Shift+Tab", "Focus next / previous thumb");
    key(&mut lines, "← ↓ / h j", "Decrease by 1");
    key(&mut lines, "→ ↑ / l k", "Increase by 1");
    key(&mut lines, "PgDn / PgUp", "Decrease / increase by 10");
    key(&mut lines, "Home / End", "Jump to minimum / maximum");
    key(&mut lines, "Esc", "Clear focus");
    key(&mut lines, "s", "Save values now");
    key(&mut lines, "q", "Quit (values are saved)");
    lines.push(Line::from(""));

    section(&mut lines, "Mouse");
    key(&mut lines, "Press on a track", "Grab the nearest thumb and jump there");
    key(&mut lines, "Drag", "Thumb follows the pointer anywhere on screen");
    key(&mut lines, "Release", "Drop the thumb");
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Any key closes this help.", theme::muted())));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(" Help ")
        .title_style(theme::panel_title(true));

    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>18}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
