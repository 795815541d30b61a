//! Interactive slider: a [`RangeControl`] plus focus, keyboard handling, and the
//! pointer drag state machine.
//!
//! ```text
//!   Idle ──press──▶ Dragging ──release / blur──▶ Idle
//!                     │  ▲
//!                     └──┘ move (anywhere on the surface)
//! ```
//!
//! Keys are handled independently of the pointer state while the slider has focus.
//! Every commit refreshes the published [`AccessibilityState`] and notifies observers.

use std::fmt;

use tracing::{debug, trace};

use crate::attributes::{AccessibilityState, ValueText};
use crate::control::{RangeControl, ValueChange};
use crate::drag::{DragSubscription, InputSurface};
use crate::geometry::{Bounds, ThumbAnchor, TrackGeometry};
use crate::input::{InputState, Key, KeyCommand, KeyOutcome};

/// Receives every committed value of a slider.
pub trait ValueObserver {
    fn on_commit(&mut self, id: &str, change: &ValueChange, state: &AccessibilityState);
}

impl<F> ValueObserver for F
where
    F: FnMut(&str, &ValueChange, &AccessibilityState),
{
    fn on_commit(&mut self, id: &str, change: &ValueChange, state: &AccessibilityState) {
        self(id, change, state)
    }
}

/// Observer that writes each commit to the log.
pub struct TracingObserver;

impl ValueObserver for TracingObserver {
    fn on_commit(&mut self, id: &str, change: &ValueChange, state: &AccessibilityState) {
        debug!(
            id,
            previous = change.previous,
            value = change.value,
            offset = change.offset,
            text = %state.value_text,
            "value committed"
        );
    }
}

pub struct Slider {
    id: String,
    label: String,
    control: RangeControl,
    anchor: ThumbAnchor,
    text: ValueText,
    state: AccessibilityState,
    input: InputState,
    drag: Option<DragSubscription>,
    observers: Vec<Box<dyn ValueObserver>>,
}

impl Slider {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        control: RangeControl,
        text: ValueText,
    ) -> Self {
        let state = AccessibilityState {
            value_now: control.value(),
            value_min: control.min(),
            value_max: control.max(),
            value_text: text.format(control.value()),
            focused: false,
        };
        Self {
            id: id.into(),
            label: label.into(),
            control,
            anchor: ThumbAnchor::Leading,
            text,
            state,
            input: InputState::Idle,
            drag: None,
            observers: Vec::new(),
        }
    }

    pub fn with_anchor(mut self, anchor: ThumbAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn add_observer(&mut self, observer: Box<dyn ValueObserver>) {
        self.observers.push(observer);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> i64 {
        self.control.value()
    }

    pub fn control(&self) -> &RangeControl {
        &self.control
    }

    pub fn state(&self) -> &AccessibilityState {
        &self.state
    }

    pub fn input_state(&self) -> InputState {
        self.input
    }

    pub fn is_dragging(&self) -> bool {
        self.input == InputState::Dragging
    }

    pub fn is_focused(&self) -> bool {
        self.state.focused
    }

    pub fn anchor(&self) -> ThumbAnchor {
        self.anchor
    }

    /// Surface position of the indicator's left edge.
    pub fn indicator_position(&self) -> f64 {
        self.control
            .geometry()
            .indicator_position(self.control.offset(), self.anchor)
    }

    /// Whether a surface x-coordinate lands on this slider's track.
    pub fn hit_test(&self, surface_x: f64) -> bool {
        self.control.geometry().contains(surface_x)
    }

    /// Clamp and commit a value, then notify observers.
    pub fn set_value(&mut self, requested: i64) -> ValueChange {
        let change = self.control.set_value(requested);
        self.publish(&change);
        change
    }

    /// Replace the clamp bounds; publishes the new bounds and, if the value had
    /// to move, commits it.
    pub fn set_bounds(&mut self, bounds: Bounds) -> Option<ValueChange> {
        let moved = self.control.set_bounds(bounds);
        self.state.value_min = self.control.min();
        self.state.value_max = self.control.max();
        if let Some(change) = &moved {
            self.publish(change);
        }
        moved
    }

    pub fn relayout(&mut self, geometry: TrackGeometry) {
        self.control.relayout(geometry);
    }

    pub fn key_down(&mut self, key: &Key) -> KeyOutcome {
        let Some(command) = key.command() else {
            return KeyOutcome::Ignored;
        };
        let requested = match command {
            KeyCommand::Step(delta) => self.value().saturating_add(delta),
            KeyCommand::JumpToMin => self.control.min(),
            KeyCommand::JumpToMax => self.control.max(),
        };
        trace!(id = %self.id, %key, requested, "key handled");
        KeyOutcome::Consumed(self.set_value(requested))
    }

    /// Pointer press on the slider: take focus, start a drag, and set the value
    /// from the press position.
    pub fn pointer_press(&mut self, surface: &InputSurface, surface_x: f64) -> ValueChange {
        self.focus();
        // A press while already dragging replaces the gesture.
        if let Some(previous) = self.drag.take() {
            previous.release();
        }
        self.drag = Some(surface.subscribe(self.id.clone()));
        self.input = InputState::Dragging;
        let requested = self.control.value_at(surface_x);
        self.set_value(requested)
    }

    /// Pointer move anywhere on the surface. Ignored unless dragging.
    pub fn pointer_move(&mut self, surface_x: f64) -> Option<ValueChange> {
        if !self.is_dragging() {
            return None;
        }
        let requested = self.control.value_at(surface_x);
        trace!(id = %self.id, surface_x, requested, "drag move");
        Some(self.set_value(requested))
    }

    /// Pointer release anywhere on the surface. Returns true if a drag ended.
    pub fn pointer_release(&mut self) -> bool {
        self.end_drag()
    }

    /// Click on the rail without dragging: set the value from the click position.
    pub fn click(&mut self, surface_x: f64) -> ValueChange {
        let requested = self.control.value_at(surface_x);
        self.set_value(requested)
    }

    pub fn focus(&mut self) {
        self.state.focused = true;
    }

    /// Lose focus. An in-progress drag is cancelled.
    pub fn blur(&mut self) {
        self.state.focused = false;
        if self.end_drag() {
            debug!(id = %self.id, "drag cancelled by blur");
        }
    }

    fn end_drag(&mut self) -> bool {
        self.input = InputState::Idle;
        match self.drag.take() {
            Some(subscription) => {
                subscription.release();
                true
            }
            None => false,
        }
    }

    fn publish(&mut self, change: &ValueChange) {
        self.state.value_now = change.value;
        self.state.value_min = self.control.min();
        self.state.value_max = self.control.max();
        self.state.value_text = self.text.format(change.value);
        for observer in &mut self.observers {
            observer.on_commit(&self.id, change, &self.state);
        }
    }
}

impl fmt::Debug for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slider")
            .field("id", &self.id)
            .field("control", &self.control)
            .field("state", &self.state)
            .field("input", &self.input)
            .field("observers", &self.observers.len())
            .finish()
    }
}
