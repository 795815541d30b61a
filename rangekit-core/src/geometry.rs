//! Track geometry and value bounds.
//!
//! A track is a fixed-length bar on the input surface. Its geometry is measured
//! once when the control is built; nothing here re-measures on its own.

use serde::{Deserialize, Serialize};

/// Closed integer interval `[min, max]`.
///
/// Construction normalises reversed bounds by swapping, so `min <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub min: i64,
    pub max: i64,
}

impl Bounds {
    pub fn new(a: i64, b: i64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Restrict `value` to `[min, max]`.
    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Width of the interval (`max - min`), saturating on overflow.
    pub fn span(&self) -> i64 {
        self.max.saturating_sub(self.min)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self { min: 0, max: 100 }
    }
}

/// Where the indicator sits relative to its computed offset.
///
/// The low thumb of a dual-range sits on the leading side of its value and the
/// high thumb on the trailing side, so two thumbs at the same value touch rather
/// than overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThumbAnchor {
    #[default]
    Leading,
    Trailing,
}

/// Pixel geometry of a track on the input surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackGeometry {
    /// Surface x-coordinate of the track's left edge.
    pub origin: f64,
    /// Pixel length of the interactive track (positive).
    pub track_length: f64,
    /// Pixel width of the thumb (non-negative).
    pub thumb_size: f64,
    /// Width of the track border.
    pub border_width: f64,
}

impl TrackGeometry {
    pub fn new(track_length: f64) -> Self {
        Self {
            origin: 0.0,
            track_length,
            thumb_size: 0.0,
            border_width: 0.0,
        }
    }

    pub fn with_thumb(mut self, thumb_size: f64, border_width: f64) -> Self {
        self.thumb_size = thumb_size;
        self.border_width = border_width;
        self
    }

    pub fn at_origin(mut self, origin: f64) -> Self {
        self.origin = origin;
        self
    }

    /// Thumb size less the border, never negative.
    pub fn adjusted_thumb_size(&self) -> f64 {
        (self.thumb_size - self.border_width).max(0.0)
    }

    /// Length the indicator can travel: the track less an adjusted thumb at each end.
    pub fn usable_length(&self) -> f64 {
        (self.track_length - 2.0 * self.adjusted_thumb_size()).max(0.0)
    }

    /// Convert a surface x-coordinate into an offset from the track origin.
    pub fn relative(&self, surface_x: f64) -> f64 {
        surface_x - self.origin
    }

    /// Whether a surface x-coordinate falls on the track.
    pub fn contains(&self, surface_x: f64) -> bool {
        let rel = self.relative(surface_x);
        rel >= 0.0 && rel <= self.track_length
    }

    /// Surface position of the indicator's left edge for a given track offset.
    pub fn indicator_position(&self, offset: i64, anchor: ThumbAnchor) -> f64 {
        let shift = match anchor {
            ThumbAnchor::Leading => -self.border_width,
            ThumbAnchor::Trailing => self.thumb_size - self.border_width,
        };
        self.origin + offset as f64 + shift
    }
}

impl Default for TrackGeometry {
    fn default() -> Self {
        Self::new(200.0)
    }
}
