//! Playback clock - background thread that ticks once per slot
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockEvent {
    /// One slot duration elapsed.
    Tick,
}

pub struct PlaybackClock {
    sender: Sender<ClockEvent>,
    receiver: Receiver<ClockEvent>,
    is_running: Arc<AtomicBool>,
}

impl PlaybackClock {
    pub fn new() -> Self {
        let (sender, receiver) = channel();

        Self {
            sender,
            receiver,
            is_running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn start(&mut self, slot_duration: Duration) {
        if self.is_running() {
            return;
        }

        // Fresh flag per run so a thread from a previous run cannot be revived
        let is_running = Arc::new(AtomicBool::new(true));
        self.is_running = Arc::clone(&is_running);
        let sender = self.sender.clone();
        debug!(?slot_duration, "Clock started");

        thread::spawn(move || {
            let mut last_tick = Instant::now();

            while is_running.load(Ordering::SeqCst) {
                let now = Instant::now();

                if now.duration_since(last_tick) >= slot_duration {
                    if sender.send(ClockEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = now;
                }

                thread::sleep(Duration::from_millis(1));
            }
        });
    }

    pub fn stop(&mut self) {
        if self.is_running.swap(false, Ordering::SeqCst) {
            debug!("Clock stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::SeqCst)
    }

    pub fn poll_events(&self) -> Vec<ClockEvent> {
        self.receiver.try_iter().collect()
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PlaybackClock {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_ticks_while_running() {
        let mut clock = PlaybackClock::new();
        clock.start(Duration::from_millis(5));
        assert!(clock.is_running());

        thread::sleep(Duration::from_millis(100));
        clock.stop();
        assert!(!clock.is_running());

        let ticks = clock.poll_events();
        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|e| *e == ClockEvent::Tick));
    }

    #[test]
    fn test_idle_clock_has_no_events() {
        let clock = PlaybackClock::new();
        assert!(!clock.is_running());
        assert!(clock.poll_events().is_empty());
    }
}
