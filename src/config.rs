//! Session configuration: initial channels, palette sizes and slot timing.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Sizes of the color and symbol palettes the renderer offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub colors: usize,
    pub symbols: usize,
}

impl Palette {
    pub fn new(colors: usize, symbols: usize) -> Self {
        Self { colors, symbols }
    }

    /// Whether both indices address an entry of this palette.
    pub fn contains(&self, color_index: usize, symbol_index: usize) -> bool {
        color_index < self.colors && symbol_index < self.symbols
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(9, 9)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Channels created together with the timeline.
    pub initial_channel_count: usize,
    /// Wall-clock length of one slot while playing.
    pub slot_duration_ms: u64,
    /// Header shows a time label every this many slots.
    pub label_every: usize,
    pub palette: Palette,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            initial_channel_count: 4,
            slot_duration_ms: 2000,
            label_every: 15,
            palette: Palette::default(),
        }
    }
}

impl TimelineConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn slot_duration(&self) -> Duration {
        Duration::from_millis(self.slot_duration_ms)
    }
}
