//! Engine wire messages.
//!
//! Inbound messages arrive as single-key JSON objects
//! (`{"demo": ...}`, `{"system.fps": ...}`, ...); outbound messages wrap a
//! tagged payload under `msg`. Shapes match the engine's websocket
//! protocol byte-for-byte in structure.

use serde::{Deserialize, Serialize};

use crate::entities::Demo;
use crate::telemetry::{FrameSample, ProfileCapture};

/// Message published by the engine.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum InboundMsg {
    Demo {
        demo: Demo,
    },
    Frame {
        #[serde(rename = "system.frame")]
        frame: FrameSample,
    },
    Fps {
        #[serde(rename = "system.fps")]
        fps: f64,
    },
    Profile {
        #[serde(rename = "system.profile")]
        profile: ProfileCapture,
    },
}

/// Playback payload of a time update.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeData {
    pub is_playing: bool,
    pub cur_time: f64,
}

/// Tagged outbound payload: `{"type": ..., "data": ...}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum MsgBody {
    Time(TimeData),
    Demo(Demo),
}

/// Message sent to the engine, wrapped as `{"msg": {...}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutboundMsg {
    pub msg: MsgBody,
}

impl OutboundMsg {
    /// Time update, sent after every playback-affecting action.
    pub fn time(is_playing: bool, cur_time: f64) -> Self {
        Self { msg: MsgBody::Time(TimeData { is_playing, cur_time }) }
    }

    /// Full demo update, sent after every effect-boundary or param edit.
    pub fn demo(demo: &Demo) -> Self {
        Self { msg: MsgBody::Demo(demo.clone()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbound_time_shape() {
        let json = serde_json::to_value(OutboundMsg::time(true, 2450.0)).unwrap();
        assert_eq!(json["msg"]["type"], "time");
        assert_eq!(json["msg"]["data"]["is_playing"], true);
        assert_eq!(json["msg"]["data"]["cur_time"], 2450.0);
    }

    #[test]
    fn test_outbound_demo_shape() {
        let demo: Demo = serde_json::from_str(
            r#"{"effects": [{"name": "intro", "start_time": 0.0, "end_time": 4000.0}]}"#,
        )
        .unwrap();
        let json = serde_json::to_value(OutboundMsg::demo(&demo)).unwrap();
        assert_eq!(json["msg"]["type"], "demo");
        assert_eq!(json["msg"]["data"]["effects"][0]["name"], "intro");
    }

    #[test]
    fn test_inbound_variants() {
        let m: InboundMsg = serde_json::from_str(r#"{"system.fps": 59.7}"#).unwrap();
        assert!(matches!(m, InboundMsg::Fps { fps } if (fps - 59.7).abs() < 1e-9));

        let m: InboundMsg = serde_json::from_str(
            r#"{"system.frame": {"fps": 60.0, "ms": 16.6, "mem": 128.5, "timestamp": 1234.0}}"#,
        )
        .unwrap();
        assert!(matches!(m, InboundMsg::Frame { .. }));

        let m: InboundMsg = serde_json::from_str(r#"{"demo": {"effects": []}}"#).unwrap();
        assert!(matches!(m, InboundMsg::Demo { .. }));

        let m: InboundMsg = serde_json::from_str(
            r#"{"system.profile": {
                "startTime": 0.0, "endTime": 33.0,
                "threads": [{"maxDepth": 2, "events":
                    [{"start": 0.0, "end": 10.0, "level": 0, "name": "update"}]}]
            }}"#,
        )
        .unwrap();
        let InboundMsg::Profile { profile } = m else { panic!("expected profile") };
        assert_eq!(profile.threads.len(), 1);
        assert_eq!(profile.threads[0].max_depth, 2);
        assert_eq!(profile.threads[0].events[0].name, "update");
    }
}
