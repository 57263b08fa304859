//! Timeline widget - state and configuration.
//! Shared by the layout pass, the draw pass and the UI adapter. Pointer
//! input mutates `TimelineState` (view mapping, interaction mode,
//! selection); the draw pass reads it back to produce the draw list.

use serde::{Deserialize, Serialize};

use crate::entities::ParamPath;
use crate::widgets::timeline::interaction::Interaction;
use crate::widgets::timeline::timemap::TimeMap;

/// Static geometry of the timeline surface, in pixels.
#[derive(Clone, Debug)]
pub struct TimelineConfig {
    /// Height of the ruler band across the top of the time area.
    pub ruler_height: f32,
    /// Width of the left control column (effect/param names).
    pub name_column_width: f32,
    /// Gap between the control column and pixel 0 of the time axis.
    pub margin: f32,
    pub effect_row_height: f32,
    pub group_row_height: f32,
    /// Leaf with a single key - compact row.
    pub leaf_row_height: f32,
    /// Leaf with two or more keys - expanded row showing its curve.
    pub leaf_curve_height: f32,
    /// Horizontal indent per tree depth level.
    pub indent: f32,
    /// Grab tolerance around an effect boundary handle.
    pub handle_tolerance: f32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            ruler_height: 40.0,
            name_column_width: 150.0,
            margin: 10.0,
            effect_row_height: 30.0,
            group_row_height: 16.0,
            leaf_row_height: 18.0,
            leaf_curve_height: 40.0,
            indent: 12.0,
            handle_tolerance: 5.0,
        }
    }
}

impl TimelineConfig {
    /// Surface x of time-axis pixel 0.
    pub fn axis_origin_x(&self) -> f32 {
        self.name_column_width + self.margin
    }
}

/// Timeline view state (persistent between frames).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TimelineState {
    pub map: TimeMap,
    /// Selected param as a child-index path, re-resolved per use.
    pub selected: Option<ParamPath>,
    #[serde(skip)]
    pub interaction: Interaction,
}
