//! Dual-range coordinator — two coupled thumbs selecting a sub-interval of a rail.
//!
//! The coordinator owns both thumbs and is the only place the coupling lives:
//! after any commit on one thumb, the other thumb's opposing bound is set to the
//! committed value. The low thumb can never pass the high thumb and vice versa.
//!
//! Invariant: `low.value() <= high.value()` after every operation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::attributes::ValueText;
use crate::control::{RangeControl, ValueChange};
use crate::drag::InputSurface;
use crate::geometry::{Bounds, ThumbAnchor, TrackGeometry};
use crate::input::{Key, KeyOutcome};
use crate::slider::{Slider, ValueObserver};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Thumb {
    Low,
    High,
}

impl Thumb {
    pub fn other(self) -> Thumb {
        match self {
            Thumb::Low => Thumb::High,
            Thumb::High => Thumb::Low,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Thumb::Low => "low",
            Thumb::High => "high",
        }
    }
}

impl fmt::Display for Thumb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Thumb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" | "min" => Ok(Thumb::Low),
            "high" | "max" => Ok(Thumb::High),
            other => Err(format!("unknown thumb '{other}' (expected low or high)")),
        }
    }
}

#[derive(Debug)]
pub struct DualRange {
    id: String,
    label: String,
    rail: Bounds,
    low: Slider,
    high: Slider,
}

impl DualRange {
    /// Build a dual-range on `rail` with the given initial thumb values.
    ///
    /// Values are clamped to the rail; reversed values are swapped.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        rail: Bounds,
        low: i64,
        high: i64,
        geometry: TrackGeometry,
        text: ValueText,
    ) -> Self {
        let id = id.into();
        let label = label.into();
        let ordered = Bounds::new(rail.clamp(low), rail.clamp(high));

        let low = Slider::new(
            format!("{id}.{}", Thumb::Low),
            format!("{label} (low)"),
            RangeControl::with_rail(
                rail,
                Bounds::new(rail.min, ordered.max),
                ordered.min,
                geometry,
            ),
            text.clone(),
        )
        .with_anchor(ThumbAnchor::Leading);
        let high = Slider::new(
            format!("{id}.{}", Thumb::High),
            format!("{label} (high)"),
            RangeControl::with_rail(
                rail,
                Bounds::new(ordered.min, rail.max),
                ordered.max,
                geometry,
            ),
            text,
        )
        .with_anchor(ThumbAnchor::Trailing);

        Self {
            id,
            label,
            rail,
            low,
            high,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn rail(&self) -> Bounds {
        self.rail
    }

    pub fn thumb(&self, thumb: Thumb) -> &Slider {
        match thumb {
            Thumb::Low => &self.low,
            Thumb::High => &self.high,
        }
    }

    fn thumb_mut(&mut self, thumb: Thumb) -> &mut Slider {
        match thumb {
            Thumb::Low => &mut self.low,
            Thumb::High => &mut self.high,
        }
    }

    /// Selected sub-interval `[low, high]`.
    pub fn range(&self) -> Bounds {
        Bounds {
            min: self.low.value(),
            max: self.high.value(),
        }
    }

    /// The rail carries focus styling while either thumb is focused.
    pub fn rail_focused(&self) -> bool {
        self.low.is_focused() || self.high.is_focused()
    }

    pub fn add_observer(&mut self, thumb: Thumb, observer: Box<dyn ValueObserver>) {
        self.thumb_mut(thumb).add_observer(observer);
    }

    pub fn set_value(&mut self, thumb: Thumb, requested: i64) -> ValueChange {
        let change = self.thumb_mut(thumb).set_value(requested);
        self.couple(thumb);
        change
    }

    /// Place both thumbs at once, ignoring the current coupling.
    pub fn set_range(&mut self, low: i64, high: i64) {
        let ordered = Bounds::new(self.rail.clamp(low), self.rail.clamp(high));
        self.low.set_bounds(self.rail);
        self.high.set_bounds(self.rail);
        self.low.set_value(ordered.min);
        self.high.set_value(ordered.max);
        self.couple(Thumb::Low);
        self.couple(Thumb::High);
    }

    pub fn key_down(&mut self, thumb: Thumb, key: &Key) -> KeyOutcome {
        let outcome = self.thumb_mut(thumb).key_down(key);
        if outcome.is_consumed() {
            self.couple(thumb);
        }
        outcome
    }

    pub fn pointer_press(
        &mut self,
        thumb: Thumb,
        surface: &InputSurface,
        surface_x: f64,
    ) -> ValueChange {
        self.thumb_mut(thumb.other()).blur();
        let change = self.thumb_mut(thumb).pointer_press(surface, surface_x);
        self.couple(thumb);
        change
    }

    /// Route a surface-wide move to whichever thumb is dragging.
    pub fn pointer_move(&mut self, surface_x: f64) -> Option<(Thumb, ValueChange)> {
        let thumb = self.dragging()?;
        let change = self.thumb_mut(thumb).pointer_move(surface_x)?;
        self.couple(thumb);
        Some((thumb, change))
    }

    /// Route a surface-wide release. Returns true if a drag ended.
    pub fn pointer_release(&mut self) -> bool {
        let low = self.low.pointer_release();
        let high = self.high.pointer_release();
        low || high
    }

    /// Thumb currently being dragged, if any.
    pub fn dragging(&self) -> Option<Thumb> {
        if self.low.is_dragging() {
            Some(Thumb::Low)
        } else if self.high.is_dragging() {
            Some(Thumb::High)
        } else {
            None
        }
    }

    /// Thumb a press at `surface_x` should grab: the one whose value is closest.
    /// On a tie the low thumb wins at or left of it and the high thumb wins
    /// otherwise. Two thumbs stacked on the rail minimum always give the high
    /// thumb, since the low one has nowhere to go.
    pub fn nearest_thumb(&self, surface_x: f64) -> Thumb {
        let candidate = self.low.control().value_at(surface_x);
        let low = self.low.value();
        let to_low = (candidate - low).abs();
        let to_high = (candidate - self.high.value()).abs();
        let low_pinned = low == self.rail().min;
        if to_low < to_high || (to_low == to_high && candidate <= low && !low_pinned) {
            Thumb::Low
        } else {
            Thumb::High
        }
    }

    /// Click on the rail: move the nearest thumb to the click position.
    pub fn click(&mut self, surface_x: f64) -> (Thumb, ValueChange) {
        let thumb = self.nearest_thumb(surface_x);
        let change = self.thumb_mut(thumb).click(surface_x);
        self.couple(thumb);
        (thumb, change)
    }

    pub fn focus(&mut self, thumb: Thumb) {
        self.thumb_mut(thumb.other()).blur();
        self.thumb_mut(thumb).focus();
    }

    pub fn blur(&mut self, thumb: Thumb) {
        self.thumb_mut(thumb).blur();
    }

    /// Re-measure both thumbs. Nothing calls this implicitly.
    pub fn relayout(&mut self, geometry: TrackGeometry) {
        self.low.relayout(geometry);
        self.high.relayout(geometry);
    }

    pub fn hit_test(&self, surface_x: f64) -> bool {
        self.low.hit_test(surface_x)
    }

    /// Tighten the partner's opposing bound to the moved thumb's value.
    fn couple(&mut self, moved: Thumb) {
        match moved {
            Thumb::Low => {
                let bound = Bounds::new(self.low.value(), self.rail.max);
                self.high.set_bounds(bound);
            }
            Thumb::High => {
                let bound = Bounds::new(self.rail.min, self.high.value());
                self.low.set_bounds(bound);
            }
        }
        debug_assert!(self.low.value() <= self.high.value());
        debug!(
            id = %self.id,
            low = self.low.value(),
            high = self.high.value(),
            "dual range coupled"
        );
    }
}
