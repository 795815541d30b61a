//! Accessibility state and declared-attribute parsing.
//!
//! Controls publish `aria-valuenow`, `aria-valuemin`, `aria-valuemax`, a value-text
//! mirror and a focus flag. Initial bounds are read from declared attributes;
//! anything missing or unparsable falls back to `0 / 100 / 50`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::geometry::Bounds;

pub const DEFAULT_MIN: i64 = 0;
pub const DEFAULT_MAX: i64 = 100;
pub const DEFAULT_VALUE: i64 = 50;

pub const ARIA_VALUENOW: &str = "aria-valuenow";
pub const ARIA_VALUEMIN: &str = "aria-valuemin";
pub const ARIA_VALUEMAX: &str = "aria-valuemax";
pub const ARIA_VALUETEXT: &str = "aria-valuetext";

/// Formats the human-readable value mirror (`aria-valuetext`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueText {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
}

impl ValueText {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn prefixed(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: String::new(),
        }
    }

    pub fn format(&self, value: i64) -> String {
        format!("{}{}{}", self.prefix, value, self.suffix)
    }
}

/// Published state of one control, refreshed on every commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilityState {
    pub value_now: i64,
    pub value_min: i64,
    pub value_max: i64,
    pub value_text: String,
    pub focused: bool,
}

impl AccessibilityState {
    /// Attribute view as name/value pairs, the way a markup host would apply them.
    pub fn attributes(&self) -> BTreeMap<&'static str, String> {
        let mut map = BTreeMap::new();
        map.insert(ARIA_VALUENOW, self.value_now.to_string());
        map.insert(ARIA_VALUEMIN, self.value_min.to_string());
        map.insert(ARIA_VALUEMAX, self.value_max.to_string());
        map.insert(ARIA_VALUETEXT, self.value_text.clone());
        map
    }

    /// CSS-style class list for the control.
    pub fn class_list(&self) -> Vec<&'static str> {
        if self.focused {
            vec!["focus"]
        } else {
            Vec::new()
        }
    }
}

/// Parse the leading integer of a string, ignoring leading whitespace and any
/// trailing text (`"300px"` → 300). Returns `None` when no digits lead.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Bounds and initial value resolved from declared attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclaredRange {
    pub bounds: Bounds,
    pub value: i64,
}

impl DeclaredRange {
    /// Resolve from a map of declared attributes.
    ///
    /// Reversed bounds are swapped; the value is not clamped here.
    pub fn from_attributes<'a, I>(attrs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut min = None;
        let mut max = None;
        let mut value = None;
        for (name, raw) in attrs {
            let slot = match name {
                ARIA_VALUEMIN => &mut min,
                ARIA_VALUEMAX => &mut max,
                ARIA_VALUENOW => &mut value,
                _ => continue,
            };
            *slot = Some(parse_or_default(name, raw));
        }
        Self::resolve(min.flatten(), max.flatten(), value.flatten())
    }

    /// Resolve from optional already-parsed parts.
    pub fn resolve(min: Option<i64>, max: Option<i64>, value: Option<i64>) -> Self {
        Self {
            bounds: Bounds::new(min.unwrap_or(DEFAULT_MIN), max.unwrap_or(DEFAULT_MAX)),
            value: value.unwrap_or(DEFAULT_VALUE),
        }
    }
}

impl Default for DeclaredRange {
    fn default() -> Self {
        Self::resolve(None, None, None)
    }
}

fn parse_or_default(name: &str, raw: &str) -> Option<i64> {
    let parsed = parse_leading_int(raw);
    if parsed.is_none() {
        warn!(attribute = name, raw, "malformed attribute, using default");
    }
    parsed
}
