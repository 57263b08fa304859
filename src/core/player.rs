//! Playback state for the remote timeline.
//!
//! The engine owns real playback; this mirrors it on the panel side so the
//! playhead keeps moving between engine messages. Time is continuous
//! milliseconds, advanced by wall clock while playing. Every
//! playback-affecting action is followed by a time update to the engine
//! (callers send it; the player itself knows nothing about transport).

use std::time::Instant;

use log::trace;
use serde::{Deserialize, Serialize};

/// Playback state: current time and play flag. Time is never negative.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    cur_time_ms: f64,
    is_playing: bool,
    #[serde(skip)]
    last_tick: Option<Instant>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self { cur_time_ms: 0.0, is_playing: false, last_tick: None }
    }

    pub fn time_ms(&self) -> f64 {
        self.cur_time_ms
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Set current time, clamped at zero. Scrubs, transport jumps and
    /// engine ticks all come through here.
    pub fn set_time(&mut self, t: f64) {
        self.cur_time_ms = t.max(0.0);
    }

    /// Advance by wall-clock elapsed while playing. Returns true when the
    /// time moved.
    pub fn update(&mut self) -> bool {
        if !self.is_playing {
            self.last_tick = None;
            return false;
        }
        let now = Instant::now();
        let advanced = match self.last_tick {
            Some(last) => {
                let dt_ms = now.duration_since(last).as_secs_f64() * 1000.0;
                self.cur_time_ms += dt_ms;
                dt_ms > 0.0
            }
            None => false,
        };
        self.last_tick = Some(now);
        advanced
    }

    /// Toggle play/pause. Returns the new playing flag.
    pub fn toggle_play(&mut self) -> bool {
        self.is_playing = !self.is_playing;
        self.last_tick = self.is_playing.then(Instant::now);
        trace!("playback {}", if self.is_playing { "started" } else { "paused" });
        self.is_playing
    }

    /// Rewind to time zero.
    pub fn to_start(&mut self) {
        self.set_time(0.0);
        self.last_tick = None;
    }

    /// Jump by a signed amount (page forward/back), clamped at zero.
    pub fn jump(&mut self, delta_ms: f64) {
        self.set_time(self.cur_time_ms + delta_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_never_negative() {
        let mut p = Player::new();
        p.set_time(-100.0);
        assert_eq!(p.time_ms(), 0.0);
        p.set_time(500.0);
        p.jump(-2000.0);
        assert_eq!(p.time_ms(), 0.0);
    }

    #[test]
    fn test_update_only_advances_while_playing() {
        let mut p = Player::new();
        assert!(!p.update());
        assert_eq!(p.time_ms(), 0.0);

        p.toggle_play();
        p.update(); // arms the clock on first call after start
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(p.update());
        assert!(p.time_ms() > 0.0);

        let frozen = p.time_ms();
        p.toggle_play();
        assert!(!p.update());
        assert_eq!(p.time_ms(), frozen);
    }

    #[test]
    fn test_to_start_resets() {
        let mut p = Player::new();
        p.set_time(12_345.0);
        p.to_start();
        assert_eq!(p.time_ms(), 0.0);
    }
}
