//! Application module - DemoscopeApp state and per-frame logic.
//!
//! - `run` - the eframe::App implementation (per-frame update loop)

mod run;

use std::time::Instant;

use log::{debug, info};

use crate::core::player::Player;
use crate::entities::Demo;
use crate::remote::link::EngineLink;
use crate::remote::msg::InboundMsg;
use crate::telemetry::{ProfileCapture, TelemetryLog};
use crate::widgets::params::ParamEditor;
use crate::widgets::timeline::{TimelineConfig, TimelineState};

/// Engine is considered gone after this much silence.
const ENGINE_TIMEOUT_SECS: f64 = 3.0;

/// Main application state.
///
/// The demo snapshot, playback mirror and telemetry are runtime-only;
/// the timeline view state (zoom, pan, snapping, selection) persists
/// between sessions.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct DemoscopeApp {
    #[serde(skip)]
    pub demo: Demo,
    #[serde(skip)]
    pub player: Player,
    pub timeline_state: TimelineState,
    #[serde(skip)]
    pub timeline_cfg: TimelineConfig,
    #[serde(skip)]
    pub editor: ParamEditor,
    #[serde(skip)]
    pub telemetry: TelemetryLog,
    #[serde(skip)]
    pub profile: Option<ProfileCapture>,
    #[serde(skip)]
    pub link: EngineLink,
    #[serde(skip)]
    pub last_engine_msg: Option<Instant>,
    /// Visible time-axis width from the previous frame, for page jumps.
    #[serde(skip)]
    pub last_axis_width_px: f32,
}

impl Default for DemoscopeApp {
    fn default() -> Self {
        // Dangling link; main() wires the real one after restore
        Self::with_link(EngineLink::pair().0)
    }
}

impl DemoscopeApp {
    pub fn with_link(link: EngineLink) -> Self {
        Self {
            demo: Demo::default(),
            player: Player::new(),
            timeline_state: TimelineState::default(),
            timeline_cfg: TimelineConfig::default(),
            editor: ParamEditor::default(),
            telemetry: TelemetryLog::default(),
            profile: None,
            link,
            last_engine_msg: None,
            last_axis_width_px: 800.0,
        }
    }

    /// Load persisted state if available and attach the engine link.
    pub fn new(cc: &eframe::CreationContext<'_>, link: EngineLink) -> Self {
        let mut app: DemoscopeApp = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_else(|| {
                info!("no persisted state found, creating default app");
                DemoscopeApp::default()
            });
        app.link = link;
        app
    }

    /// Drain and apply everything the engine pushed since last frame.
    pub fn apply_inbound(&mut self) {
        for msg in self.link.drain() {
            self.last_engine_msg = Some(Instant::now());
            match msg {
                InboundMsg::Demo { demo } => {
                    debug!("demo snapshot: {} effect(s)", demo.effects.len());
                    self.demo = demo;
                    // The snapshot replaces the whole tree; anything
                    // pointing into the old one must re-resolve or go
                    self.timeline_state.interaction.demo_replaced();
                    if let Some(path) = &self.timeline_state.selected {
                        if path.resolve(&self.demo).is_err() {
                            debug!("selection no longer resolves, clearing");
                            self.timeline_state.selected = None;
                        }
                    }
                }
                InboundMsg::Frame { frame } => self.telemetry.push(frame),
                InboundMsg::Fps { fps } => self.telemetry.push_fps(fps),
                InboundMsg::Profile { profile } => self.profile = Some(profile),
            }
        }
    }

    pub fn engine_connected(&self) -> bool {
        self.last_engine_msg
            .is_some_and(|t| t.elapsed().as_secs_f64() < ENGINE_TIMEOUT_SECS)
    }
}
