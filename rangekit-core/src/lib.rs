//! rangekit core — accessible range controls without a rendering layer.
//!
//! - Track geometry and bounds ([`geometry`])
//! - Value ↔ offset mapping with silent clamping ([`control`])
//! - Accessibility state and declared-attribute defaults ([`attributes`])
//! - Key and pointer vocabulary ([`input`]), drag subscriptions ([`drag`])
//! - Interactive slider state machine ([`slider`]) and the dual-range coordinator ([`dual`])
//! - Colour aggregation over three sliders ([`color`])
//! - TOML layouts ([`config`]) and the surface-level [`board`]

pub mod attributes;
pub mod board;
pub mod color;
pub mod config;
pub mod control;
pub mod drag;
pub mod dual;
pub mod geometry;
pub mod input;
pub mod slider;

pub use attributes::{AccessibilityState, DeclaredRange, ValueText};
pub use board::{Board, BoardSnapshot, ControlRef, ControlSnapshot};
pub use color::{Channel, ColorMixer, ColorReadout};
pub use config::{ConfigError, LayoutConfig};
pub use control::{RangeControl, ValueChange};
pub use drag::{DragSubscription, InputSurface};
pub use dual::{DualRange, Thumb};
pub use geometry::{Bounds, ThumbAnchor, TrackGeometry};
pub use input::{InputState, Key, KeyOutcome, PointerEvent};
pub use slider::{Slider, TracingObserver, ValueObserver};
