//! Top-level UI layout — bordered control panel with status bar.

pub mod controls;
pub mod help_panel;
pub mod status_bar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{Block, Borders};

use crate::app::{self, AppState, Overlay};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let [main_area, status_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(f.area());

    let focused = app.board.focused().is_some();
    let block = Block::default()
        .style(theme::panel())
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused))
        .title(" Range controls ")
        .title_style(theme::panel_title(focused));
    f.render_widget(block, main_area);

    controls::render(f, app::controls_area(f.area()), app);
    status_bar::render(f, status_area, app);

    if app.overlay == Overlay::Help {
        help_panel::render(f, popup_area(main_area, help_panel::WIDTH, help_panel::HEIGHT));
    }
}

/// A `width` x `height` rect centred in `area`, shrunk to fit.
pub fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use rangekit_core::{Board, LayoutConfig};
    use std::path::PathBuf;

    fn screen_text(app: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn draws_labels_values_and_colour() {
        let board = Board::from_config(&LayoutConfig::demo()).unwrap();
        let mut app = AppState::new(board, PathBuf::from("."));
        app.measure(Rect::new(0, 0, 100, 30));
        let text = screen_text(&app, 100, 30);
        assert!(text.contains("Range controls"));
        assert!(text.contains("Red"));
        assert!(text.contains("Hotel price"));
        assert!(text.contains("$100 to $250"));
        assert!(text.contains("#8040c0"));
    }

    #[test]
    fn panel_is_painted_with_the_theme_background() {
        let board = Board::from_config(&LayoutConfig::demo()).unwrap();
        let mut app = AppState::new(board, PathBuf::from("."));
        app.measure(Rect::new(0, 0, 40, 12));
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
        let buffer = terminal.backend().buffer();
        let background = crate::theme::Theme::default().background;
        assert_eq!(buffer[(0, 0)].bg, background);
        assert_eq!(buffer[(39, 10)].bg, background);
    }

    #[test]
    fn help_overlay_draws_on_top() {
        let board = Board::from_config(&LayoutConfig::demo()).unwrap();
        let mut app = AppState::new(board, PathBuf::from("."));
        app.measure(Rect::new(0, 0, 100, 30));
        app.overlay = Overlay::Help;
        let text = screen_text(&app, 100, 30);
        assert!(text.contains("Keys"));
    }

    #[test]
    fn popup_is_centred_and_clipped() {
        let popup = popup_area(Rect::new(0, 0, 100, 50), 60, 20);
        assert_eq!(popup, Rect::new(20, 15, 60, 20));

        let clipped = popup_area(Rect::new(5, 5, 30, 10), 60, 20);
        assert_eq!(clipped, Rect::new(5, 5, 30, 10));
    }
}
