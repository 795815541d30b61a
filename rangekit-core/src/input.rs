//! Input vocabulary: keys, pointer events, and the per-control input state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::control::ValueChange;

/// Small step for arrow keys.
pub const STEP: i64 = 1;
/// Large step for page keys.
pub const PAGE_STEP: i64 = 10;

/// Keys a range control understands. Everything else is [`Key::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Home,
    End,
    Other(String),
}

/// What a handled key does to the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Move by a signed amount.
    Step(i64),
    JumpToMin,
    JumpToMax,
}

impl Key {
    pub fn command(&self) -> Option<KeyCommand> {
        match self {
            Key::ArrowLeft | Key::ArrowDown => Some(KeyCommand::Step(-STEP)),
            Key::ArrowRight | Key::ArrowUp => Some(KeyCommand::Step(STEP)),
            Key::PageDown => Some(KeyCommand::Step(-PAGE_STEP)),
            Key::PageUp => Some(KeyCommand::Step(PAGE_STEP)),
            Key::Home => Some(KeyCommand::JumpToMin),
            Key::End => Some(KeyCommand::JumpToMax),
            Key::Other(_) => None,
        }
    }
}

impl FromStr for Key {
    type Err = std::convert::Infallible;

    /// Accepts both `ArrowLeft` and the legacy `Left` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            "Home" => Key::Home,
            "End" => Key::End,
            other => Key::Other(other.to_string()),
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::ArrowLeft => f.write_str("ArrowLeft"),
            Key::ArrowRight => f.write_str("ArrowRight"),
            Key::ArrowUp => f.write_str("ArrowUp"),
            Key::ArrowDown => f.write_str("ArrowDown"),
            Key::PageUp => f.write_str("PageUp"),
            Key::PageDown => f.write_str("PageDown"),
            Key::Home => f.write_str("Home"),
            Key::End => f.write_str("End"),
            Key::Other(name) => f.write_str(name),
        }
    }
}

/// Whether a key was handled.
///
/// `Consumed` means the host must suppress its default handling and stop
/// propagating the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Consumed(ValueChange),
    Ignored,
}

impl KeyOutcome {
    pub fn is_consumed(&self) -> bool {
        matches!(self, KeyOutcome::Consumed(_))
    }

    pub fn change(&self) -> Option<ValueChange> {
        match self {
            KeyOutcome::Consumed(change) => Some(*change),
            KeyOutcome::Ignored => None,
        }
    }
}

/// Pointer events in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerEvent {
    Press { x: f64 },
    Move { x: f64 },
    Release { x: f64 },
}

/// Pointer state of one control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputState {
    #[default]
    Idle,
    Dragging,
}
