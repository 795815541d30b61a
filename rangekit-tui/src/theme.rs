//! Parrot/neon theme tokens for the rangekit demo surface.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, focused thumb)
//! - **Positive**: Neon green (selected span of a range)
//! - **Negative**: Hot pink (errors)
//! - **Warning**: Neon orange (active drag)
//! - **Neutral**: Cool purple (secondary info)
//! - **Muted**: Steel blue (unfocused rails, hints)

use ratatui::style::{Color, Modifier, Style};

/// Parrot/neon theme for the rangekit TUI
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Near-black background (primary surface)
    pub background: Color,
    /// Electric cyan accent (focus, highlights)
    pub accent: Color,
    /// Neon green (filled track, selected range)
    pub positive: Color,
    /// Hot pink (errors)
    pub negative: Color,
    /// Neon orange (dragging)
    pub warning: Color,
    /// Cool purple (neutral info, secondary)
    pub neutral: Color,
    /// Steel blue (muted text, idle rail)
    pub muted: Color,
    /// White (primary text)
    pub text_primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub const fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
        }
    }

    /// Thumb colour: dragging beats focus beats idle.
    pub fn thumb_color(&self, focused: bool, dragging: bool) -> Color {
        match (focused, dragging) {
            (_, true) => self.warning,
            (true, false) => self.accent,
            (false, false) => self.text_primary,
        }
    }

    /// Rail colour for a control with or without focus.
    pub fn rail_color(&self, focused: bool) -> Color {
        if focused {
            self.accent
        } else {
            self.muted
        }
    }
}

const THEME: Theme = Theme::parrot_neon();

pub fn accent() -> Style {
    Style::default().fg(THEME.accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(THEME.muted)
}

pub fn neutral() -> Style {
    Style::default().fg(THEME.neutral)
}

pub fn warning() -> Style {
    Style::default().fg(THEME.warning)
}

pub fn negative() -> Style {
    Style::default().fg(THEME.negative)
}

pub fn positive() -> Style {
    Style::default().fg(THEME.positive)
}

/// Base style for the control panel surface.
pub fn panel() -> Style {
    Style::default().bg(THEME.background).fg(THEME.text_primary)
}

pub fn panel_border(active: bool) -> Style {
    Style::default().fg(THEME.rail_color(active))
}

pub fn panel_title(active: bool) -> Style {
    let style = panel_border(active);
    if active {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

pub fn thumb(focused: bool, dragging: bool) -> Style {
    Style::default()
        .fg(THEME.thumb_color(focused, dragging))
        .add_modifier(Modifier::BOLD)
}

pub fn rail(focused: bool) -> Style {
    Style::default().fg(THEME.rail_color(focused))
}
