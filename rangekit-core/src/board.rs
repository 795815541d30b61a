//! Board — every control on one input surface, with focus and event routing.
//!
//! The board plays the host's part: it owns the [`InputSurface`], moves focus
//! between thumbs (blurring the previous one), routes surface-wide pointer moves
//! and releases to whatever is dragging, and runs the colour aggregator after
//! each committed change of one of its channels.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{ColorMixer, ColorReadout};
use crate::config::{ConfigError, LayoutConfig};
use crate::control::{RangeControl, ValueChange};
use crate::drag::InputSurface;
use crate::dual::{DualRange, Thumb};
use crate::geometry::TrackGeometry;
use crate::input::{Key, KeyOutcome};
use crate::slider::{Slider, ValueObserver};

/// Address of one focusable thumb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlRef {
    Slider(usize),
    Thumb(usize, Thumb),
}

/// Serializable view of one thumb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlSnapshot {
    pub path: String,
    pub label: String,
    pub value_now: i64,
    pub value_min: i64,
    pub value_max: i64,
    pub value_text: String,
    pub focused: bool,
    pub dragging: bool,
    pub offset: i64,
    pub indicator: f64,
}

impl ControlSnapshot {
    fn of(slider: &Slider) -> Self {
        let state = slider.state();
        Self {
            path: slider.id().to_string(),
            label: slider.label().to_string(),
            value_now: state.value_now,
            value_min: state.value_min,
            value_max: state.value_max,
            value_text: state.value_text.clone(),
            focused: state.focused,
            dragging: slider.is_dragging(),
            offset: slider.control().offset(),
            indicator: slider.indicator_position(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub controls: Vec<ControlSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorReadout>,
    pub active_drags: usize,
}

#[derive(Debug, Default)]
pub struct Board {
    surface: InputSurface,
    sliders: Vec<Slider>,
    duals: Vec<DualRange>,
    mixer: Option<ColorMixer>,
    focused: Option<ControlRef>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every control a layout declares.
    pub fn from_config(config: &LayoutConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut board = Self::new();
        for spec in &config.sliders {
            let declared = spec.declared();
            let geometry = spec.geometry.geometry();
            let control = RangeControl::new(declared.bounds, declared.value, geometry);
            board.push_slider(Slider::new(&spec.id, spec.label(), control, spec.value_text()));
        }
        for spec in &config.duals {
            let (low, high) = spec.thumbs();
            board.push_dual(DualRange::new(
                &spec.id,
                spec.label(),
                spec.rail(),
                low,
                high,
                spec.geometry.geometry(),
                spec.value_text(),
            ));
        }
        if let Some(color) = &config.color {
            board.set_mixer(ColorMixer::new(&color.red, &color.green, &color.blue));
        }
        debug!(
            sliders = board.sliders.len(),
            duals = board.duals.len(),
            "board built"
        );
        Ok(board)
    }

    pub fn push_slider(&mut self, slider: Slider) -> ControlRef {
        self.sliders.push(slider);
        self.aggregate();
        ControlRef::Slider(self.sliders.len() - 1)
    }

    pub fn push_dual(&mut self, dual: DualRange) -> usize {
        self.duals.push(dual);
        self.duals.len() - 1
    }

    pub fn set_mixer(&mut self, mixer: ColorMixer) {
        self.mixer = Some(mixer);
        self.aggregate();
    }

    pub fn surface(&self) -> &InputSurface {
        &self.surface
    }

    pub fn sliders(&self) -> &[Slider] {
        &self.sliders
    }

    pub fn duals(&self) -> &[DualRange] {
        &self.duals
    }

    pub fn color(&self) -> Option<&ColorReadout> {
        self.mixer.as_ref().map(|m| m.readout())
    }

    pub fn focused(&self) -> Option<ControlRef> {
        self.focused
    }

    /// Tab order: single sliders first, then each dual's low and high thumb.
    pub fn focus_order(&self) -> Vec<ControlRef> {
        let singles = (0..self.sliders.len()).map(ControlRef::Slider);
        let thumbs = (0..self.duals.len())
            .flat_map(|i| [ControlRef::Thumb(i, Thumb::Low), ControlRef::Thumb(i, Thumb::High)]);
        singles.chain(thumbs).collect()
    }

    /// Look up a thumb by path: `"red"` or `"price.low"`.
    pub fn resolve(&self, path: &str) -> Option<ControlRef> {
        if let Some((id, thumb)) = path.split_once('.') {
            let thumb: Thumb = thumb.parse().ok()?;
            let index = self.duals.iter().position(|d| d.id() == id)?;
            return Some(ControlRef::Thumb(index, thumb));
        }
        self.sliders
            .iter()
            .position(|s| s.id() == path)
            .map(ControlRef::Slider)
    }

    pub fn slider(&self, target: ControlRef) -> Option<&Slider> {
        match target {
            ControlRef::Slider(i) => self.sliders.get(i),
            ControlRef::Thumb(i, thumb) => self.duals.get(i).map(|d| d.thumb(thumb)),
        }
    }

    pub fn path(&self, target: ControlRef) -> Option<&str> {
        self.slider(target).map(|s| s.id())
    }

    /// Move focus to `target`, blurring whatever held it.
    pub fn focus(&mut self, target: ControlRef) -> bool {
        if self.slider(target).is_none() {
            return false;
        }
        if let Some(previous) = self.focused {
            if previous != target {
                self.blur_ref(previous);
            }
        }
        match target {
            ControlRef::Slider(i) => self.sliders[i].focus(),
            ControlRef::Thumb(i, thumb) => self.duals[i].focus(thumb),
        }
        self.focused = Some(target);
        true
    }

    /// Drop focus entirely. Cancels a drag on the blurred thumb.
    pub fn blur(&mut self) {
        if let Some(previous) = self.focused.take() {
            self.blur_ref(previous);
        }
    }

    pub fn focus_next(&mut self) -> Option<ControlRef> {
        self.cycle_focus(1)
    }

    pub fn focus_prev(&mut self) -> Option<ControlRef> {
        self.cycle_focus(-1)
    }

    fn cycle_focus(&mut self, step: isize) -> Option<ControlRef> {
        let order = self.focus_order();
        if order.is_empty() {
            return None;
        }
        let len = order.len() as isize;
        let next = match self.focused.and_then(|f| order.iter().position(|&r| r == f)) {
            Some(pos) => (pos as isize + step).rem_euclid(len),
            None if step >= 0 => 0,
            None => len - 1,
        };
        let target = order[next as usize];
        self.focus(target);
        Some(target)
    }

    fn blur_ref(&mut self, target: ControlRef) {
        match target {
            ControlRef::Slider(i) => {
                if let Some(s) = self.sliders.get_mut(i) {
                    s.blur();
                }
            }
            ControlRef::Thumb(i, thumb) => {
                if let Some(d) = self.duals.get_mut(i) {
                    d.blur(thumb);
                }
            }
        }
    }

    /// Deliver a key to the focused thumb.
    pub fn key_down(&mut self, key: &Key) -> KeyOutcome {
        let Some(target) = self.focused else {
            return KeyOutcome::Ignored;
        };
        let outcome = match target {
            ControlRef::Slider(i) => self.sliders[i].key_down(key),
            ControlRef::Thumb(i, thumb) => self.duals[i].key_down(thumb, key),
        };
        if outcome.is_consumed() {
            self.after_commit(target);
        }
        outcome
    }

    pub fn set_value(&mut self, target: ControlRef, requested: i64) -> Option<ValueChange> {
        self.slider(target)?;
        let change = match target {
            ControlRef::Slider(i) => self.sliders[i].set_value(requested),
            ControlRef::Thumb(i, thumb) => self.duals[i].set_value(thumb, requested),
        };
        self.after_commit(target);
        Some(change)
    }

    /// Place both thumbs of a dual at once.
    pub fn set_range(&mut self, dual: usize, low: i64, high: i64) -> bool {
        match self.duals.get_mut(dual) {
            Some(d) => {
                d.set_range(low, high);
                true
            }
            None => false,
        }
    }

    /// Pointer press on `target`: focus it, start its drag, set from position.
    pub fn pointer_press(&mut self, target: ControlRef, surface_x: f64) -> Option<ValueChange> {
        if !self.focus(target) {
            return None;
        }
        let surface = self.surface.clone();
        let change = match target {
            ControlRef::Slider(i) => self.sliders[i].pointer_press(&surface, surface_x),
            ControlRef::Thumb(i, thumb) => self.duals[i].pointer_press(thumb, &surface, surface_x),
        };
        self.after_commit(target);
        Some(change)
    }

    /// Surface-wide pointer move. Returns how many thumbs it moved.
    pub fn pointer_move(&mut self, surface_x: f64) -> usize {
        let mut moved = Vec::new();
        for (i, slider) in self.sliders.iter_mut().enumerate() {
            if slider.pointer_move(surface_x).is_some() {
                moved.push(ControlRef::Slider(i));
            }
        }
        for (i, dual) in self.duals.iter_mut().enumerate() {
            if let Some((thumb, _)) = dual.pointer_move(surface_x) {
                moved.push(ControlRef::Thumb(i, thumb));
            }
        }
        for target in &moved {
            self.after_commit(*target);
        }
        moved.len()
    }

    /// Surface-wide pointer release. Returns true if any drag ended.
    pub fn pointer_release(&mut self) -> bool {
        let mut ended = false;
        for slider in &mut self.sliders {
            ended |= slider.pointer_release();
        }
        for dual in &mut self.duals {
            ended |= dual.pointer_release();
        }
        ended
    }

    /// Click on a control's rail. On a dual the nearest thumb moves and takes focus.
    pub fn click(
        &mut self,
        target: ControlRef,
        surface_x: f64,
    ) -> Option<(ControlRef, ValueChange)> {
        self.slider(target)?;
        let (moved, change) = match target {
            ControlRef::Slider(i) => (target, self.sliders[i].click(surface_x)),
            ControlRef::Thumb(i, _) => {
                let (thumb, change) = self.duals[i].click(surface_x);
                (ControlRef::Thumb(i, thumb), change)
            }
        };
        self.focus(moved);
        self.after_commit(moved);
        Some((moved, change))
    }

    /// Whether `surface_x` lands on the target's track. Hosts with a second axis
    /// pick the row themselves.
    pub fn hit_test(&self, target: ControlRef, surface_x: f64) -> bool {
        match target {
            ControlRef::Slider(i) => self.sliders.get(i).is_some_and(|s| s.hit_test(surface_x)),
            ControlRef::Thumb(i, _) => self.duals.get(i).is_some_and(|d| d.hit_test(surface_x)),
        }
    }

    pub fn relayout_slider(&mut self, index: usize, geometry: TrackGeometry) {
        if let Some(slider) = self.sliders.get_mut(index) {
            slider.relayout(geometry);
        }
    }

    pub fn relayout_dual(&mut self, index: usize, geometry: TrackGeometry) {
        if let Some(dual) = self.duals.get_mut(index) {
            dual.relayout(geometry);
        }
    }

    pub fn add_observer(&mut self, target: ControlRef, observer: Box<dyn ValueObserver>) -> bool {
        match target {
            ControlRef::Slider(i) => match self.sliders.get_mut(i) {
                Some(s) => {
                    s.add_observer(observer);
                    true
                }
                None => false,
            },
            ControlRef::Thumb(i, thumb) => match self.duals.get_mut(i) {
                Some(d) => {
                    d.add_observer(thumb, observer);
                    true
                }
                None => false,
            },
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut controls: Vec<ControlSnapshot> =
            self.sliders.iter().map(ControlSnapshot::of).collect();
        for dual in &self.duals {
            controls.push(ControlSnapshot::of(dual.thumb(Thumb::Low)));
            controls.push(ControlSnapshot::of(dual.thumb(Thumb::High)));
        }
        BoardSnapshot {
            controls,
            color: self.color().cloned(),
            active_drags: self.surface.active_subscriptions(),
        }
    }

    fn after_commit(&mut self, target: ControlRef) {
        let ControlRef::Slider(i) = target else {
            return;
        };
        let feeds_mixer = self
            .mixer
            .as_ref()
            .is_some_and(|m| m.channel_of(self.sliders[i].id()).is_some());
        if feeds_mixer {
            self.aggregate();
        }
    }

    fn aggregate(&mut self) {
        if let Some(mixer) = &mut self.mixer {
            let readout = mixer.recompute(&self.sliders);
            debug!(hex = %readout.hex, "colour readout updated");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> Board {
        Board::from_config(&LayoutConfig::demo()).unwrap()
    }

    #[test]
    fn builds_demo_layout() {
        let board = demo();
        assert_eq!(board.sliders().len(), 3);
        assert_eq!(board.duals().len(), 1);
        assert_eq!(board.focus_order().len(), 5);
        assert_eq!(board.color().unwrap().hex, "#8040c0");
    }

    #[test]
    fn resolves_paths() {
        let board = demo();
        assert_eq!(board.resolve("green"), Some(ControlRef::Slider(1)));
        assert_eq!(board.resolve("price.high"), Some(ControlRef::Thumb(0, Thumb::High)));
        assert_eq!(board.resolve("price"), None);
        assert_eq!(board.resolve("price.middle"), None);
        assert_eq!(board.path(ControlRef::Thumb(0, Thumb::Low)), Some("price.low"));
    }

    #[test]
    fn keys_go_to_focused_control() {
        let mut board = demo();
        assert_eq!(board.key_down(&Key::End), KeyOutcome::Ignored);
        board.focus(ControlRef::Slider(0));
        assert!(board.key_down(&Key::End).is_consumed());
        assert_eq!(board.color().unwrap().hex, "#ff40c0");
    }

    #[test]
    fn focus_cycles_and_blurs_previous() {
        let mut board = demo();
        assert_eq!(board.focus_next(), Some(ControlRef::Slider(0)));
        assert_eq!(board.focus_next(), Some(ControlRef::Slider(1)));
        assert!(!board.sliders()[0].is_focused());
        assert!(board.sliders()[1].is_focused());
        assert_eq!(board.focus_prev(), Some(ControlRef::Slider(0)));
        assert_eq!(board.focus_prev(), Some(ControlRef::Thumb(0, Thumb::High)));
        assert!(board.duals()[0].rail_focused());
        board.blur();
        assert_eq!(board.focused(), None);
        assert!(!board.duals()[0].rail_focused());
    }

    #[test]
    fn drag_routes_globally_and_releases() {
        let mut board = demo();
        let red = ControlRef::Slider(0);
        let change = board.pointer_press(red, 0.0).unwrap();
        assert_eq!(change.value, 0);
        assert_eq!(board.surface().active_subscriptions(), 1);
        assert_eq!(board.pointer_move(256.0), 1);
        assert_eq!(board.sliders()[0].value(), 255);
        assert!(board.pointer_release());
        assert_eq!(board.snapshot().active_drags, 0);
        assert_eq!(board.pointer_move(10.0), 0);
    }

    #[test]
    fn focus_change_cancels_drag() {
        let mut board = demo();
        board.pointer_press(ControlRef::Slider(0), 10.0);
        board.focus(ControlRef::Slider(1));
        assert_eq!(board.surface().active_subscriptions(), 0);
        assert!(!board.sliders()[0].is_dragging());
    }

    #[test]
    fn click_on_dual_moves_nearest_thumb() {
        let mut board = demo();
        // track 300 over rail 0..400: x = 270 → 360
        let (moved, change) = board.click(ControlRef::Thumb(0, Thumb::Low), 270.0).unwrap();
        assert_eq!(moved, ControlRef::Thumb(0, Thumb::High));
        assert_eq!(change.value, 360);
        assert_eq!(board.focused(), Some(moved));
    }

    #[test]
    fn snapshot_lists_every_thumb() {
        let board = demo();
        let snap = board.snapshot();
        let paths: Vec<&str> = snap.controls.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, vec!["red", "green", "blue", "price.low", "price.high"]);
        assert_eq!(snap.controls[3].value_text, "$100");
        assert_eq!(snap.controls[3].value_max, 250);
    }

    #[test]
    fn set_value_on_unknown_target() {
        let mut board = demo();
        assert!(board.set_value(ControlRef::Slider(9), 1).is_none());
        assert!(board.set_value(ControlRef::Thumb(0, Thumb::Low), 400).is_some());
        assert_eq!(board.duals()[0].range().min, 250);
    }
}
