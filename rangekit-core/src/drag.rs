//! Surface-wide drag subscriptions.
//!
//! While a thumb is dragged, pointer moves and releases anywhere on the input
//! surface belong to it. That listener pair is a [`DragSubscription`]: acquired on
//! press, released exactly once on release, blur, or drop. The surface counts live
//! subscriptions so a leaked gesture shows up as a non-zero count.

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

/// The whole input area. Cloning shares the subscription count.
#[derive(Debug, Clone, Default)]
pub struct InputSurface {
    active: Rc<Cell<usize>>,
}

impl InputSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of drag subscriptions currently attached.
    pub fn active_subscriptions(&self) -> usize {
        self.active.get()
    }

    /// Attach surface-wide move/release listeners for `owner`.
    pub fn subscribe(&self, owner: impl Into<String>) -> DragSubscription {
        let owner = owner.into();
        self.active.set(self.active.get() + 1);
        debug!(%owner, active = self.active.get(), "drag subscription acquired");
        DragSubscription {
            active: Rc::clone(&self.active),
            owner,
            released: false,
        }
    }
}

/// Handle for one drag gesture's surface listeners.
#[derive(Debug)]
#[must_use = "dropping the subscription immediately ends the drag"]
pub struct DragSubscription {
    active: Rc<Cell<usize>>,
    owner: String,
    released: bool,
}

impl DragSubscription {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Detach the listeners. Consumes the handle, so it cannot run twice.
    pub fn release(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.active.set(self.active.get().saturating_sub(1));
        debug!(owner = %self.owner, active = self.active.get(), "drag subscription released");
    }
}

impl Drop for DragSubscription {
    fn drop(&mut self) {
        self.detach();
    }
}
