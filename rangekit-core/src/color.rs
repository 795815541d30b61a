//! Colour mixer — aggregates three channel sliders into a colour readout.
//!
//! The mixer does not own the sliders. After any member commits, the host calls
//! [`ColorMixer::recompute`], which reads the current `aria-valuenow` of each
//! channel itself.

use serde::{Deserialize, Serialize};

use crate::slider::Slider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];
}

/// Derived colour display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorReadout {
    /// `#rrggbb`, lowercase.
    pub hex: String,
    /// `"r, g, b"`.
    pub rgb: String,
    pub channels: [i64; 3],
}

impl ColorReadout {
    pub fn from_channels(red: i64, green: i64, blue: i64) -> Self {
        Self {
            hex: format!("#{}{}{}", hex_channel(red), hex_channel(green), hex_channel(blue)),
            rgb: format!("{red}, {green}, {blue}"),
            channels: [red, green, blue],
        }
    }
}

/// Two-digit lowercase hex; wider values keep all their digits.
fn hex_channel(value: i64) -> String {
    if value < 0 {
        format!("-{:x}", value.unsigned_abs())
    } else {
        format!("{value:02x}")
    }
}

/// Names the three channel sliders by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMixer {
    red: String,
    green: String,
    blue: String,
    readout: ColorReadout,
}

impl ColorMixer {
    pub fn new(red: impl Into<String>, green: impl Into<String>, blue: impl Into<String>) -> Self {
        Self {
            red: red.into(),
            green: green.into(),
            blue: blue.into(),
            readout: ColorReadout::default(),
        }
    }

    pub fn channel_id(&self, channel: Channel) -> &str {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }

    /// Channel a slider id feeds, if any.
    pub fn channel_of(&self, id: &str) -> Option<Channel> {
        Channel::ALL
            .into_iter()
            .find(|&channel| self.channel_id(channel) == id)
    }

    pub fn readout(&self) -> &ColorReadout {
        &self.readout
    }

    /// Re-read the channel sliders and rebuild the readout.
    ///
    /// A channel whose slider is missing reads as 0.
    pub fn recompute(&mut self, sliders: &[Slider]) -> &ColorReadout {
        let read = |id: &str| {
            sliders
                .iter()
                .find(|s| s.id() == id)
                .map(|s| s.state().value_now)
                .unwrap_or(0)
        };
        self.readout =
            ColorReadout::from_channels(read(&self.red), read(&self.green), read(&self.blue));
        &self.readout
    }
}
