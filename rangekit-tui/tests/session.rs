//! End-to-end session: keyboard and mouse through the app, then persistence.

use std::path::PathBuf;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::Rect;

use rangekit_core::{Board, ControlRef, LayoutConfig, Thumb};
use rangekit_tui::app::AppState;
use rangekit_tui::{input, persistence};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn app(state_path: PathBuf) -> AppState {
    let board = Board::from_config(&LayoutConfig::demo()).unwrap();
    let mut app = AppState::new(board, state_path);
    app.measure(Rect::new(0, 0, 120, 40));
    app
}

#[test]
fn colour_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("state.json");

    let mut first = app(state_path.clone());
    // red to max, green to min
    input::handle_key(&mut first, key(KeyCode::Tab));
    input::handle_key(&mut first, key(KeyCode::End));
    input::handle_key(&mut first, key(KeyCode::Tab));
    input::handle_key(&mut first, key(KeyCode::Home));
    assert_eq!(first.board.color().unwrap().hex, "#ff00c0");

    persistence::save(&state_path, &persistence::extract(&first)).unwrap();

    let mut second = app(state_path.clone());
    persistence::apply(&mut second, persistence::load(&state_path));
    assert_eq!(second.board.color().unwrap().hex, "#ff00c0");
    assert_eq!(second.board.focused(), Some(ControlRef::Slider(1)));
}

#[test]
fn price_thumbs_never_cross_under_mouse() {
    let mut app = app(PathBuf::from("."));
    let track = app.rows[3].track;
    let right = track.x + track.width - 1;

    // grab low near the left end, drag past the right end
    input::handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), track.x, track.y));
    assert_eq!(app.board.focused(), Some(ControlRef::Thumb(0, Thumb::Low)));
    input::handle_mouse(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), right + 30, 0));
    input::handle_mouse(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), right + 30, 0));

    let range = app.board.duals()[0].range();
    assert_eq!(range.min, 250);
    assert_eq!(range.max, 250);
    assert_eq!(app.board.surface().active_subscriptions(), 0);

    // keys cannot push the high thumb below the low one
    input::handle_key(&mut app, key(KeyCode::Tab));
    assert_eq!(app.board.focused(), Some(ControlRef::Thumb(0, Thumb::High)));
    input::handle_key(&mut app, key(KeyCode::PageDown));
    assert_eq!(app.board.duals()[0].range().max, 250);
}

#[test]
fn resize_remeasures_tracks() {
    let mut app = app(PathBuf::from("."));
    let before = app.board.sliders()[0].control().offset();
    app.measure(Rect::new(0, 0, 60, 40));
    let after = app.board.sliders()[0].control().offset();
    assert!(after < before);
    assert_eq!(app.board.sliders()[0].value(), 128);
}
