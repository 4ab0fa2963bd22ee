//! Playhead position tracking - play/stop and slot stepping
//! Timing is owned by `clock::PlaybackClock`; this only tracks where the playhead is.
use std::time::Duration;

use tracing::debug;

pub mod clock;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransportState {
    #[default]
    Stopped,
    Playing,
}

#[derive(Debug, Clone, Default)]
pub struct Transport {
    playhead: usize,
    state: TransportState,
}

impl Transport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn playhead(&self) -> usize {
        self.playhead
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == TransportState::Playing
    }

    pub fn play(&mut self) {
        if self.is_playing() {
            return;
        }
        self.state = TransportState::Playing;
        debug!(playhead = self.playhead, "Playback started");
    }

    /// Stop without moving the playhead.
    pub fn stop(&mut self) {
        self.state = TransportState::Stopped;
        debug!(playhead = self.playhead, "Playback stopped");
    }

    pub fn toggle_play(&mut self) {
        if self.is_playing() {
            self.stop();
        } else {
            self.play();
        }
    }

    pub fn set_playhead(&mut self, position: usize) {
        self.playhead = position;
    }

    /// Step one slot forward while playing. Returns the playhead.
    pub fn advance(&mut self) -> usize {
        if self.is_playing() {
            self.playhead += 1;
        }
        self.playhead
    }
}

/// `MM:SS` of the moment slot `slot` starts playing.
pub fn slot_time_label(slot: usize, slot_duration: Duration) -> String {
    let secs = (slot as u128 * slot_duration.as_millis() / 1000) as u64;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
