//! Error types for timeline commands and configuration loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::timeline::{ChannelId, ModuleId};

/// Why a timeline command was rejected.
///
/// A rejected command never leaves a partial change behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    #[error("Channel not found: {channel_id}")]
    ChannelNotFound { channel_id: ChannelId },

    #[error("Module {module_id} not found in channel {channel_id}")]
    ModuleNotFound {
        channel_id: ChannelId,
        module_id: ModuleId,
    },

    #[error("Placement [{position}, {}) collides in channel {channel_id}", .position + .length)]
    Collision {
        channel_id: ChannelId,
        position: usize,
        length: usize,
    },

    #[error("Crop length {new_length} outside 1..={original_length}")]
    InvalidCrop {
        new_length: usize,
        original_length: usize,
    },

    #[error("Span of {length} slots from {position} runs past the last slot")]
    OutOfRange { position: usize, length: usize },

    #[error("Invalid module template: {reason}")]
    InvalidTemplate { reason: String },
}

/// Errors raised while loading a [`TimelineConfig`](crate::TimelineConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_message_shows_span() {
        let err = TimelineError::Collision {
            channel_id: 1,
            position: 4,
            length: 2,
        };
        assert_eq!(err.to_string(), "Placement [4, 6) collides in channel 1");
    }

    #[test]
    fn test_out_of_range_message_does_not_add() {
        let err = TimelineError::OutOfRange {
            position: usize::MAX,
            length: 2,
        };
        assert!(err.to_string().contains("runs past the last slot"));
    }
}
