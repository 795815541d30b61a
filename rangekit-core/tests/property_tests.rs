//! Property tests for range-control invariants.
//!
//! Uses proptest to verify:
//! 1. Clamping — the value stays inside its bounds after any commit
//! 2. Saturation — requests past either end land exactly on that end
//! 3. Idempotence — re-committing the current value changes nothing
//! 4. Round trip — offset → value recovers the value within one unit
//! 5. Pairing — a dual-range's low thumb never passes its high thumb

use proptest::prelude::*;
use rangekit_core::input::Key;
use rangekit_core::{Bounds, DualRange, RangeControl, Thumb, TrackGeometry, ValueText};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_bounds() -> impl Strategy<Value = Bounds> {
    (-1_000i64..1_000, 0i64..2_000).prop_map(|(min, span)| Bounds::new(min, min + span))
}

fn arb_geometry() -> impl Strategy<Value = TrackGeometry> {
    (1.0..2_000.0_f64, 0.0..40.0_f64, 0.0..3.0_f64)
        .prop_map(|(len, thumb, border)| TrackGeometry::new(len).with_thumb(thumb, border))
}

fn arb_key() -> impl Strategy<Value = Key> {
    prop_oneof![
        Just(Key::ArrowLeft),
        Just(Key::ArrowRight),
        Just(Key::ArrowUp),
        Just(Key::ArrowDown),
        Just(Key::PageUp),
        Just(Key::PageDown),
        Just(Key::Home),
        Just(Key::End),
    ]
}

fn arb_thumb() -> impl Strategy<Value = Thumb> {
    prop_oneof![Just(Thumb::Low), Just(Thumb::High)]
}

// ── 1–3. Clamping ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn value_stays_in_bounds(
        bounds in arb_bounds(),
        geometry in arb_geometry(),
        initial in -5_000i64..5_000,
        requested in any::<i64>(),
    ) {
        let mut control = RangeControl::new(bounds, initial, geometry);
        prop_assert!(bounds.contains(control.value()));
        control.set_value(requested);
        prop_assert!(control.min() <= control.value());
        prop_assert!(control.value() <= control.max());
    }

    #[test]
    fn past_the_ends_saturates(
        bounds in arb_bounds(),
        k in 1i64..1_000_000,
    ) {
        let mut control = RangeControl::new(bounds, bounds.min, TrackGeometry::new(200.0));
        prop_assert_eq!(control.set_value(bounds.min - k).value, bounds.min);
        prop_assert_eq!(control.set_value(bounds.max + k).value, bounds.max);
    }

    #[test]
    fn recommit_is_idempotent(
        bounds in arb_bounds(),
        geometry in arb_geometry(),
        requested in -5_000i64..5_000,
    ) {
        let mut control = RangeControl::new(bounds, requested, geometry);
        let (value, offset) = (control.value(), control.offset());
        let change = control.set_value(value);
        prop_assert!(!change.changed());
        prop_assert_eq!(control.value(), value);
        prop_assert_eq!(control.offset(), offset);
    }

    #[test]
    fn offsets_stay_on_usable_track(
        bounds in arb_bounds(),
        geometry in arb_geometry(),
        requested in -5_000i64..5_000,
    ) {
        let control = RangeControl::new(bounds, requested, geometry);
        prop_assert!(control.offset() >= 0);
        prop_assert!(control.offset() as f64 <= geometry.usable_length().round());
    }

    #[test]
    fn keys_keep_value_in_bounds(
        bounds in arb_bounds(),
        keys in prop::collection::vec(arb_key(), 1..40),
    ) {
        let mut slider = rangekit_core::Slider::new(
            "s",
            "S",
            RangeControl::new(bounds, bounds.min, TrackGeometry::new(200.0)),
            ValueText::plain(),
        );
        for key in &keys {
            prop_assert!(slider.key_down(key).is_consumed());
            prop_assert!(bounds.contains(slider.value()));
            prop_assert_eq!(slider.state().value_now, slider.value());
        }
    }
}

// ── 4. Round trip ────────────────────────────────────────────────────

proptest! {
    /// With no thumb inset the usable length is the whole track; when the track
    /// has at least one pixel per unit, offset → value is off by at most one.
    #[test]
    fn offset_round_trip(
        min in -500i64..500,
        span in 1i64..500,
        pixels_per_unit in 1.0..4.0_f64,
        pick in 0.0..1.0_f64,
    ) {
        let bounds = Bounds::new(min, min + span);
        let geometry = TrackGeometry::new(span as f64 * pixels_per_unit);
        let control = RangeControl::new(bounds, min, geometry);
        let v = min + (pick * span as f64).floor() as i64;
        let back = control.value_from_offset(control.offset_from_value(v) as f64);
        prop_assert!((back - v).abs() <= 1, "v={} back={}", v, back);
    }
}

// ── 5. Pairing ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn low_never_passes_high(
        rail in arb_bounds(),
        low in -3_000i64..3_000,
        high in -3_000i64..3_000,
        ops in prop::collection::vec((arb_thumb(), -3_000i64..3_000), 1..50),
    ) {
        let mut dual = DualRange::new(
            "d",
            "D",
            rail,
            low,
            high,
            TrackGeometry::new(300.0),
            ValueText::plain(),
        );
        prop_assert!(dual.range().min <= dual.range().max);
        for (thumb, requested) in ops {
            dual.set_value(thumb, requested);
            let range = dual.range();
            prop_assert!(range.min <= range.max);
            prop_assert!(rail.contains(range.min) && rail.contains(range.max));
            prop_assert_eq!(dual.thumb(Thumb::Low).control().max(), range.max);
            prop_assert_eq!(dual.thumb(Thumb::High).control().min(), range.min);
        }
    }

    #[test]
    fn keys_never_cross_thumbs(
        ops in prop::collection::vec((arb_thumb(), arb_key()), 1..60),
    ) {
        let mut dual = DualRange::new(
            "d",
            "D",
            Bounds::new(0, 100),
            40,
            60,
            TrackGeometry::new(200.0),
            ValueText::plain(),
        );
        for (thumb, key) in &ops {
            dual.key_down(*thumb, key);
            prop_assert!(dual.range().min <= dual.range().max);
        }
    }
}
