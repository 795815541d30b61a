//! Slider state persistence — JSON save/load across restarts.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rangekit_core::{ControlRef, Thumb};

use crate::app::AppState;

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PersistedState {
    /// Value per thumb path (`"red"`, `"price.low"`).
    pub values: BTreeMap<String, i64>,
    pub focused: Option<String>,
    pub saved_at: Option<DateTime<Utc>>,
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), %err, "ignoring corrupt state file");
            PersistedState::default()
        }),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &AppState) -> PersistedState {
    let board = &app.board;
    let values = board
        .focus_order()
        .into_iter()
        .filter_map(|target| board.slider(target))
        .map(|slider| (slider.id().to_string(), slider.value()))
        .collect();
    PersistedState {
        values,
        focused: board.focused().and_then(|f| board.path(f)).map(str::to_string),
        saved_at: Some(Utc::now()),
    }
}

/// Apply persisted state to AppState. Paths the layout no longer has are skipped.
pub fn apply(app: &mut AppState, state: PersistedState) {
    let board = &mut app.board;
    for index in 0..board.sliders().len() {
        let id = board.sliders()[index].id().to_string();
        if let Some(&value) = state.values.get(&id) {
            board.set_value(ControlRef::Slider(index), value);
        }
    }
    for index in 0..board.duals().len() {
        let dual = &board.duals()[index];
        let range = dual.range();
        let lookup = |thumb: Thumb| state.values.get(dual.thumb(thumb).id()).copied();
        let low = lookup(Thumb::Low).unwrap_or(range.min);
        let high = lookup(Thumb::High).unwrap_or(range.max);
        board.set_range(index, low, high);
    }
    if let Some(target) = state.focused.as_deref().and_then(|p| board.resolve(p)) {
        board.focus(target);
    }
}
