//! Data model: demo snapshots, effects and animated parameter trees.

pub mod demo;
pub mod param;

pub use demo::{Demo, Effect, EffectEdge, MIN_EFFECT_WIDTH_MS};
pub use param::{AnimMode, Key, LeafParam, Param, ParamNode, ParamPath, ParamValue, ValueType};
