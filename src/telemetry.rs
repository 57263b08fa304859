//! Live engine telemetry: frame stats and profiler captures.
//!
//! Fed by `system.fps` / `system.frame` / `system.profile` messages.
//! Frame samples accumulate in a bounded history for the status bar;
//! profiler captures replace each other wholesale. Chart smoothing is the
//! display layer's business, not modelled here.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Samples kept in the frame-stat history.
const HISTORY_CAP: usize = 600;

/// One frame statistics sample from the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSample {
    pub fps: f64,
    /// Frame time, milliseconds.
    pub ms: f64,
    /// Memory in use, megabytes.
    pub mem: f64,
    pub timestamp: f64,
}

/// One profiler span inside a thread track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileSpan {
    pub start: f64,
    pub end: f64,
    pub level: u32,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileThread {
    pub events: Vec<ProfileSpan>,
    pub max_depth: u32,
}

/// One profiler capture window, replaced on every `system.profile`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCapture {
    pub start_time: f64,
    pub end_time: f64,
    pub threads: Vec<ProfileThread>,
}

impl ProfileCapture {
    pub fn span_count(&self) -> usize {
        self.threads.iter().map(|t| t.events.len()).sum()
    }
}

/// Bounded frame-stat history.
#[derive(Clone, Debug, Default)]
pub struct TelemetryLog {
    samples: VecDeque<FrameSample>,
}

impl TelemetryLog {
    pub fn push(&mut self, sample: FrameSample) {
        if self.samples.len() >= HISTORY_CAP {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Record a bare fps reading (`system.fps` carries nothing else).
    pub fn push_fps(&mut self, fps: f64) {
        let mut sample = self.latest().copied().unwrap_or_default();
        sample.fps = fps;
        self.push(sample);
    }

    pub fn latest(&self) -> Option<&FrameSample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrameSample> {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_bounded() {
        let mut log = TelemetryLog::default();
        for i in 0..(HISTORY_CAP + 50) {
            log.push(FrameSample { fps: i as f64, ..Default::default() });
        }
        assert_eq!(log.len(), HISTORY_CAP);
        assert_eq!(log.latest().unwrap().fps, (HISTORY_CAP + 49) as f64);
    }

    #[test]
    fn test_push_fps_keeps_other_fields() {
        let mut log = TelemetryLog::default();
        log.push(FrameSample { fps: 60.0, ms: 16.6, mem: 100.0, timestamp: 1.0 });
        log.push_fps(30.0);
        let latest = log.latest().unwrap();
        assert_eq!(latest.fps, 30.0);
        assert_eq!(latest.mem, 100.0);
    }

    #[test]
    fn test_profile_wire_field_names() {
        let json = r#"{
            "startTime": 0.0, "endTime": 16.0,
            "threads": [{"maxDepth": 3, "events": [
                {"start": 0.0, "end": 4.0, "level": 0, "name": "render"},
                {"start": 1.0, "end": 2.0, "level": 1, "name": "particles"}
            ]}]
        }"#;
        let capture: ProfileCapture = serde_json::from_str(json).unwrap();
        assert_eq!(capture.end_time, 16.0);
        assert_eq!(capture.span_count(), 2);
    }
}
