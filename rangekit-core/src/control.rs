//! RangeControl — a bounded integer value mapped onto a track and back.
//!
//! Two intervals are tracked separately:
//! - the **rail**: the full scale the track represents, used for every position computation
//! - the **bounds**: the interval the value is clamped into
//!
//! For a standalone slider both are the same. For a dual-range thumb the rail stays
//! fixed while the partner thumb tightens the bounds.
//!
//! Out-of-range requests are clamped silently; there is no error path.

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, TrackGeometry};

/// Result of committing a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueChange {
    /// Value before the commit.
    pub previous: i64,
    /// Committed (clamped) value.
    pub value: i64,
    /// Track offset of the committed value, in pixels.
    pub offset: i64,
}

impl ValueChange {
    /// True if the commit moved the value.
    pub fn changed(&self) -> bool {
        self.previous != self.value
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeControl {
    rail: Bounds,
    bounds: Bounds,
    value: i64,
    offset: i64,
    geometry: TrackGeometry,
}

impl RangeControl {
    /// Build a control whose rail and bounds are the same interval.
    pub fn new(bounds: Bounds, value: i64, geometry: TrackGeometry) -> Self {
        Self::with_rail(bounds, bounds, value, geometry)
    }

    /// Build a control whose clamp bounds are a sub-interval of `rail`.
    ///
    /// Bounds reaching outside the rail are cut back to it.
    pub fn with_rail(rail: Bounds, bounds: Bounds, value: i64, geometry: TrackGeometry) -> Self {
        let bounds = Bounds::new(rail.clamp(bounds.min), rail.clamp(bounds.max));
        let mut control = Self {
            rail,
            bounds,
            value: bounds.min,
            offset: 0,
            geometry,
        };
        control.set_value(value);
        control
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn min(&self) -> i64 {
        self.bounds.min
    }

    pub fn max(&self) -> i64 {
        self.bounds.max
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn rail(&self) -> Bounds {
        self.rail
    }

    /// Track offset of the current value, in pixels.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn geometry(&self) -> &TrackGeometry {
        &self.geometry
    }

    /// Clamp `requested` into the bounds, commit it and recompute the offset.
    pub fn set_value(&mut self, requested: i64) -> ValueChange {
        let previous = self.value;
        self.value = self.bounds.clamp(requested);
        self.offset = self.offset_from_value(self.value);
        ValueChange {
            previous,
            value: self.value,
            offset: self.offset,
        }
    }

    /// Pixel offset for `value` along the usable part of the track.
    ///
    /// `round((value - rail.min) * usable_length / rail.span)`, or 0 on a zero-width rail.
    pub fn offset_from_value(&self, value: i64) -> i64 {
        let span = self.rail.span();
        if span == 0 {
            return 0;
        }
        let from_min = value.saturating_sub(self.rail.min) as f64;
        (from_min * self.geometry.usable_length() / span as f64).round() as i64
    }

    /// Candidate value for a pixel offset measured from the track origin.
    ///
    /// The result is not clamped; pass it to [`RangeControl::set_value`].
    pub fn value_from_offset(&self, pixel_offset: f64) -> i64 {
        if self.geometry.track_length <= 0.0 || !pixel_offset.is_finite() {
            return self.rail.min;
        }
        let delta = (self.rail.span() as f64 * pixel_offset / self.geometry.track_length).round();
        self.rail.min.saturating_add(delta as i64)
    }

    /// Candidate value for an absolute surface x-coordinate.
    pub fn value_at(&self, surface_x: f64) -> i64 {
        self.value_from_offset(self.geometry.relative(surface_x))
    }

    /// Replace the clamp bounds. The current value is re-clamped into them.
    ///
    /// Returns the change if the value had to move.
    pub fn set_bounds(&mut self, bounds: Bounds) -> Option<ValueChange> {
        self.bounds = Bounds::new(self.rail.clamp(bounds.min), self.rail.clamp(bounds.max));
        if self.bounds.contains(self.value) {
            None
        } else {
            Some(self.set_value(self.value))
        }
    }

    /// Swap in freshly measured geometry and recompute the offset.
    pub fn relayout(&mut self, geometry: TrackGeometry) {
        self.geometry = geometry;
        self.offset = self.offset_from_value(self.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control(value: i64) -> RangeControl {
        RangeControl::new(Bounds::new(0, 100), value, TrackGeometry::new(200.0))
    }

    #[test]
    fn initial_value_is_clamped() {
        assert_eq!(control(150).value(), 100);
        assert_eq!(control(-5).value(), 0);
    }

    #[test]
    fn offset_scales_to_track() {
        let c = control(50);
        assert_eq!(c.offset(), 100);
        assert_eq!(c.offset_from_value(100), 200);
        assert_eq!(c.offset_from_value(0), 0);
    }

    #[test]
    fn offset_uses_usable_length() {
        let c = RangeControl::new(
            Bounds::new(0, 400),
            200,
            TrackGeometry::new(300.0).with_thumb(20.0, 1.0),
        );
        // usable = 300 - 2 * 19 = 262
        assert_eq!(c.offset(), 131);
        assert_eq!(c.offset_from_value(400), 262);
    }

    #[test]
    fn set_value_reports_change() {
        let mut c = control(50);
        let change = c.set_value(60);
        assert_eq!(change.previous, 50);
        assert_eq!(change.value, 60);
        assert_eq!(change.offset, 120);
        assert!(change.changed());

        let same = c.set_value(60);
        assert!(!same.changed());
    }

    #[test]
    fn value_from_offset_midpoint() {
        let c = control(0);
        assert_eq!(c.value_from_offset(100.0), 50);
        assert_eq!(c.value_from_offset(0.0), 0);
        assert_eq!(c.value_from_offset(200.0), 100);
    }

    #[test]
    fn value_from_offset_is_unclamped() {
        let c = control(0);
        assert_eq!(c.value_from_offset(-20.0), -10);
        assert_eq!(c.value_from_offset(260.0), 130);
    }

    #[test]
    fn value_from_offset_degenerate_track() {
        let c = RangeControl::new(Bounds::new(5, 10), 7, TrackGeometry::new(0.0));
        assert_eq!(c.value_from_offset(50.0), 5);
        assert_eq!(c.value_from_offset(f64::NAN), 5);
    }

    #[test]
    fn zero_width_rail_has_zero_offset() {
        let c = RangeControl::new(Bounds::new(7, 7), 99, TrackGeometry::new(200.0));
        assert_eq!(c.value(), 7);
        assert_eq!(c.offset(), 0);
    }

    #[test]
    fn value_at_accounts_for_origin() {
        let c = RangeControl::new(
            Bounds::new(0, 100),
            0,
            TrackGeometry::new(200.0).at_origin(50.0),
        );
        assert_eq!(c.value_at(150.0), 50);
    }

    #[test]
    fn tightened_bounds_reclamp() {
        let mut c = control(80);
        assert!(c.set_bounds(Bounds::new(0, 90)).is_none());
        let change = c.set_bounds(Bounds::new(0, 60)).unwrap();
        assert_eq!(change.value, 60);
        assert_eq!(c.value(), 60);
        // Position is still computed on the full rail.
        assert_eq!(c.offset(), 120);
    }

    #[test]
    fn bounds_are_cut_to_rail() {
        let c = RangeControl::with_rail(
            Bounds::new(0, 100),
            Bounds::new(-50, 500),
            40,
            TrackGeometry::new(200.0),
        );
        assert_eq!(c.bounds(), Bounds::new(0, 100));
    }

    #[test]
    fn relayout_recomputes_offset() {
        let mut c = control(50);
        c.relayout(TrackGeometry::new(400.0));
        assert_eq!(c.offset(), 200);
        assert_eq!(c.value(), 50);
    }
}
