//! rangekit terminal demo — sliders and range selectors driven by keyboard and mouse.
//!
//! Every control of a layout is drawn as one row; Tab moves focus between
//! thumbs, arrow/page/home/end keys step the focused thumb, and the mouse drags
//! thumbs along their tracks.

pub mod app;
pub mod input;
pub mod persistence;
pub mod theme;
pub mod ui;

pub use app::AppState;
pub use theme::Theme;
