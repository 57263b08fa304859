//! Demo snapshot model.
//!
//! The engine publishes the whole demo as one JSON tree; every snapshot
//! replaces the previous one wholesale (no incremental merge). Effects
//! are laid out in declaration order - order matters for hit-testing by
//! row, nothing else.

use serde::{Deserialize, Serialize};

use crate::entities::param::Param;

/// Minimum effect width enforced during boundary drags, in milliseconds.
pub const MIN_EFFECT_WIDTH_MS: f64 = 50.0;

/// Which boundary of an effect a drag grabbed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectEdge {
    Start,
    End,
}

/// A time-bounded segment of the demo owning a tree of animated params.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub name: String,
    /// Milliseconds. Invariant: `start_time < end_time`, kept by clamping.
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default)]
    pub params: Vec<Param>,
}

impl Effect {
    /// Move one boundary to `t`, clamped so the effect never drops below
    /// [`MIN_EFFECT_WIDTH_MS`] and never starts before zero.
    ///
    /// The minimum width binds edits only; a snapshot may arrive with an
    /// effect already narrower than that, so the clamp bounds must stay
    /// ordered for any incoming `start_time < end_time`.
    pub fn set_edge(&mut self, edge: EffectEdge, t: f64) {
        match edge {
            EffectEdge::Start => {
                let upper = (self.end_time - MIN_EFFECT_WIDTH_MS).max(0.0);
                self.start_time = t.clamp(0.0, upper);
            }
            EffectEdge::End => {
                self.end_time = t.max(self.start_time + MIN_EFFECT_WIDTH_MS);
            }
        }
    }

    pub fn edge_time(&self, edge: EffectEdge) -> f64 {
        match edge {
            EffectEdge::Start => self.start_time,
            EffectEdge::End => self.end_time,
        }
    }
}

/// Root snapshot received from the engine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Demo {
    #[serde(default)]
    pub effects: Vec<Effect>,
}

impl Demo {
    /// Total demo length: end of the last-ending effect.
    pub fn duration_ms(&self) -> f64 {
        self.effects.iter().map(|e| e.end_time).fold(0.0, f64::max)
    }
}
