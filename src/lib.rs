//! DEMOSCOPE - remote control panel for a real-time demo engine.
//!
//! Re-exports all modules for use by binary targets.

pub mod anim;
pub mod app;
pub mod cli;
pub mod core;
pub mod entities;
pub mod error;
pub mod remote;
pub mod telemetry;
pub mod widgets;

// Re-export commonly used types
pub use anim::Sampler;
pub use app::DemoscopeApp;
pub use core::player::Player;
pub use entities::{Demo, Effect, Param, ParamPath, ParamValue};
pub use error::{ConfigError, EditError, StaleRef};
pub use remote::{EngineBridge, EngineLink, InboundMsg, OutboundMsg};
