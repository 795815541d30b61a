//! Input dispatch — overlays → global keys → the focused thumb; mouse → tracks.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use rangekit_core::Key;

use crate::app::{AppState, Overlay};
use crate::persistence;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    if app.overlay == Overlay::Help {
        app.overlay = Overlay::None;
        return;
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Char('s') => {
            save_now(app);
            return;
        }
        KeyCode::Tab => {
            let next = if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.board.focus_prev()
            } else {
                app.board.focus_next()
            };
            if let Some(target) = next {
                app.announce(target);
            }
            return;
        }
        KeyCode::BackTab => {
            if let Some(target) = app.board.focus_prev() {
                app.announce(target);
            }
            return;
        }
        KeyCode::Esc => {
            app.board.blur();
            app.status_message = None;
            return;
        }
        _ => {}
    }

    // 3. Everything else goes to the focused thumb.
    let Some(mapped) = map_key(key.code) else {
        return;
    };
    let Some(target) = app.board.focused() else {
        app.set_warning("Nothing focused (Tab to select a slider)");
        return;
    };
    if app.board.key_down(&mapped).is_consumed() {
        app.announce(target);
    }
}

fn save_now(app: &mut AppState) {
    let state = persistence::extract(app);
    match persistence::save(&app.state_path, &state) {
        Ok(()) => app.set_status(format!("Saved {} values", state.values.len())),
        Err(err) => app.set_error(format!("Save failed: {err}")),
    }
}

/// Terminal key → slider key. Vim-style h/j/k/l alias the arrows.
pub fn map_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::Left | KeyCode::Char('h') => Key::ArrowLeft,
        KeyCode::Right | KeyCode::Char('l') => Key::ArrowRight,
        KeyCode::Up | KeyCode::Char('k') => Key::ArrowUp,
        KeyCode::Down | KeyCode::Char('j') => Key::ArrowDown,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        _ => return None,
    })
}

/// Handle a mouse event. Columns are track pixels.
pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    let x = mouse.column as f64;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app.overlay != Overlay::None {
                app.overlay = Overlay::None;
                return;
            }
            match app.target_at(mouse.column, mouse.row) {
                Some(target) => {
                    if app.board.pointer_press(target, x).is_some() {
                        app.announce(target);
                    }
                }
                None => app.board.blur(),
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if app.board.pointer_move(x) > 0 {
                if let Some(target) = app.board.focused() {
                    app.announce(target);
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if app.board.pointer_release() {
                tracing::debug!(column = mouse.column, "drag ended");
            }
        }
        _ => {}
    }
}
