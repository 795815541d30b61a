//! Application state — single-owner, main-thread only.
//!
//! Track placement is measured from the terminal size and pushed into the board
//! as track geometry. One terminal column is one track pixel.

use std::path::PathBuf;

use ratatui::layout::Rect;

use rangekit_core::{Board, ControlRef, TrackGeometry};

/// Columns reserved left of each track for the label.
pub const LABEL_WIDTH: u16 = 16;
/// Columns reserved right of each track for the value text.
pub const VALUE_WIDTH: u16 = 16;
/// Terminal rows per control (track row plus spacer).
pub const ROW_PITCH: u16 = 2;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Which board entry a screen row shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Slider(usize),
    Dual(usize),
}

/// Screen placement of one control's track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    pub kind: RowKind,
    pub track: Rect,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
}

/// Top-level application state.
pub struct AppState {
    pub board: Board,
    pub running: bool,
    pub overlay: Overlay,
    pub rows: Vec<RowLayout>,
    /// Area the rows were last measured for.
    pub measured: Option<Rect>,
    pub status_message: Option<(String, StatusLevel)>,
    pub state_path: PathBuf,
}

impl AppState {
    pub fn new(board: Board, state_path: PathBuf) -> Self {
        Self {
            board,
            running: true,
            overlay: Overlay::None,
            rows: Vec::new(),
            measured: None,
            status_message: None,
            state_path,
        }
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    /// Set an error status message.
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }

    /// Measure track placement for a full-screen `area` and push the geometry
    /// into the board.
    pub fn measure(&mut self, area: Rect) {
        let panel = controls_area(area);
        let track_width = panel.width.saturating_sub(LABEL_WIDTH + VALUE_WIDTH);
        let kinds = (0..self.board.sliders().len())
            .map(RowKind::Slider)
            .chain((0..self.board.duals().len()).map(RowKind::Dual));

        self.rows.clear();
        for (i, kind) in kinds.enumerate() {
            let y = panel.y + i as u16 * ROW_PITCH;
            if y >= panel.y + panel.height || track_width < 2 {
                break;
            }
            let track = Rect::new(panel.x + LABEL_WIDTH, y, track_width, 1);
            let origin = track.x as f64;
            let length = (track.width - 1) as f64;
            match kind {
                RowKind::Slider(index) => {
                    self.board
                        .relayout_slider(index, TrackGeometry::new(length).at_origin(origin));
                }
                RowKind::Dual(index) => {
                    let geometry = TrackGeometry::new(length)
                        .with_thumb(1.0, 0.0)
                        .at_origin(origin);
                    self.board.relayout_dual(index, geometry);
                }
            }
            self.rows.push(RowLayout { kind, track });
        }
        self.measured = Some(area);
        tracing::debug!(rows = self.rows.len(), width = area.width, "tracks measured");
    }

    /// Row whose track covers a terminal cell.
    pub fn row_at(&self, column: u16, row: u16) -> Option<&RowLayout> {
        self.rows.iter().find(|r| {
            r.track.y == row && column >= r.track.x && column < r.track.x + r.track.width
        })
    }

    /// Thumb a press on a terminal cell should grab. On a dual-range the nearest
    /// thumb wins.
    pub fn target_at(&self, column: u16, row: u16) -> Option<ControlRef> {
        let layout = self.row_at(column, row)?;
        Some(match layout.kind {
            RowKind::Slider(i) => ControlRef::Slider(i),
            RowKind::Dual(i) => {
                let thumb = self.board.duals()[i].nearest_thumb(column as f64);
                ControlRef::Thumb(i, thumb)
            }
        })
    }

    /// Report a thumb's current value text in the status bar.
    pub fn announce(&mut self, target: ControlRef) {
        if let Some(slider) = self.board.slider(target) {
            let msg = format!("{}: {}", slider.label(), slider.state().value_text);
            self.set_status(msg);
        }
    }
}

/// Area the control rows occupy inside the bordered panel, above the status bar.
pub fn controls_area(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(2),
        area.y.saturating_add(2),
        area.width.saturating_sub(4),
        area.height.saturating_sub(5),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rangekit_core::{LayoutConfig, Thumb};

    fn app() -> AppState {
        let board = Board::from_config(&LayoutConfig::demo()).unwrap();
        let mut app = AppState::new(board, PathBuf::from("."));
        app.measure(Rect::new(0, 0, 100, 30));
        app
    }

    #[test]
    fn measures_one_row_per_control() {
        let app = app();
        assert_eq!(app.rows.len(), 4);
        assert_eq!(app.rows[0].kind, RowKind::Slider(0));
        assert_eq!(app.rows[3].kind, RowKind::Dual(0));
        assert_eq!(app.rows[1].track.y, app.rows[0].track.y + ROW_PITCH);
        // 100 - 4 (panel) - 16 (label) - 16 (value)
        assert_eq!(app.rows[0].track.width, 64);
    }

    #[test]
    fn measured_geometry_reaches_board() {
        let app = app();
        let geometry = app.board.sliders()[0].control().geometry();
        assert_eq!(geometry.origin, 18.0);
        assert_eq!(geometry.track_length, 63.0);
    }

    #[test]
    fn target_lookup() {
        let app = app();
        let row = app.rows[0].track;
        assert_eq!(app.target_at(row.x, row.y), Some(ControlRef::Slider(0)));
        assert_eq!(app.target_at(row.x, row.y + 1), None);
        assert_eq!(app.target_at(row.x - 1, row.y), None);

        let dual = app.rows[3].track;
        assert_eq!(app.target_at(dual.x, dual.y), Some(ControlRef::Thumb(0, Thumb::Low)));
        assert_eq!(
            app.target_at(dual.x + dual.width - 1, dual.y),
            Some(ControlRef::Thumb(0, Thumb::High))
        );
    }

    #[test]
    fn tiny_terminal_measures_nothing() {
        let board = Board::from_config(&LayoutConfig::demo()).unwrap();
        let mut app = AppState::new(board, PathBuf::from("."));
        app.measure(Rect::new(0, 0, 20, 10));
        assert!(app.rows.is_empty());
    }

    #[test]
    fn announce_uses_value_text() {
        let mut app = app();
        app.announce(ControlRef::Thumb(0, Thumb::High));
        let (msg, level) = app.status_message.clone().unwrap();
        assert_eq!(msg, "Hotel price (high): $250");
        assert_eq!(level, StatusLevel::Info);
    }
}
