//! TRAX - A multi-channel grid sequencer timeline library
//!
//! This library provides the core of a slot-based timeline editor:
//! - Channels of fixed-length modules that never overlap
//! - Linked placements ("instances") and the connectors between them
//! - Fill planning over the visible part of a channel
//! - Playhead tracking and a playback clock
//!
//! Rendering is left to the caller, which reads queries and issues commands.

pub mod config;
pub mod editor;
pub mod error;
pub mod timeline;
pub mod transport;

// Re-export commonly used types
pub use config::{Palette, TimelineConfig};
pub use editor::{ClickModifiers, EditMode, EditOutcome, Editor};
pub use error::{ConfigError, TimelineError};
pub use timeline::{
    Channel, ChannelId, Connector, FillPlan, InstanceGroup, InstanceId, Module, ModuleId,
    ModuleTemplate, Placement, Timeline,
};
pub use transport::clock::{ClockEvent, PlaybackClock};
pub use transport::{slot_time_label, Transport, TransportState};
