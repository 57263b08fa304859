//! Keyframe evaluation engine.
//!
//! Samples a leaf param's key track at an arbitrary query time. Strategy
//! selection is a closed `(mode, type)` match - no string-keyed dispatch
//! tables, and every unhandled combination is rejected up front when the
//! [`Sampler`] is built ("decoration time"), never mid-evaluation.
//!
//! Clamping rules:
//! - before the first key: first key's value (no extrapolation)
//! - at/after the last key: last key's value
//! - `spline` has no curve of its own in the engine and evaluates exactly
//!   like `linear`.

use crate::entities::param::{AnimMode, Key, LeafParam, ParamValue, ValueType};
use crate::error::ConfigError;

/// Pair of adjacent keys around a query time plus the normalized local
/// position between them. `u == 0` on both clamp branches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bracket {
    pub left: usize,
    pub right: usize,
    pub u: f64,
}

/// Locate the bracket for `t` in a time-sorted key list.
///
/// An empty list yields the degenerate zero bracket; [`Sampler::new`]
/// rejects keyless leaves before any evaluation, so the indices are only
/// meaningful for non-empty input.
pub fn find_bracket(keys: &[Key], t: f64) -> Bracket {
    if keys.is_empty() {
        return Bracket { left: 0, right: 0, u: 0.0 };
    }
    let last = keys.len() - 1;
    if t < keys[0].time {
        return Bracket { left: 0, right: 0, u: 0.0 };
    }
    for i in 0..last {
        let (k0, k1) = (&keys[i], &keys[i + 1]);
        if k0.time <= t && t < k1.time {
            let u = (t - k0.time) / (k1.time - k0.time);
            return Bracket { left: i, right: i + 1, u };
        }
    }
    Bracket { left: last, right: last, u: 0.0 }
}

/// Evaluation strategy bound to one leaf's key track.
///
/// Building one validates the leaf; evaluation itself cannot fail.
#[derive(Clone, Copy, Debug)]
pub struct Sampler<'a> {
    anim: AnimMode,
    value_type: ValueType,
    keys: &'a [Key],
}

impl<'a> Sampler<'a> {
    pub fn new(leaf: &'a LeafParam) -> Result<Self, ConfigError> {
        let value_type = match leaf.value_type {
            ValueType::Unknown => return Err(ConfigError::UnknownValueType),
            ty => ty,
        };
        let anim = match leaf.anim {
            AnimMode::Unknown => return Err(ConfigError::UnknownAnimMode),
            mode => mode,
        };
        if leaf.keys.is_empty() {
            return Err(ConfigError::NoKeys);
        }
        for (index, key) in leaf.keys.iter().enumerate() {
            if !key.value.matches(value_type) {
                return Err(ConfigError::KeyTypeMismatch { index });
            }
            if index > 0 && key.time < leaf.keys[index - 1].time {
                return Err(ConfigError::KeysUnsorted { index });
            }
        }
        Ok(Self { anim, value_type, keys: &leaf.keys })
    }

    /// Value at query time `t` (milliseconds).
    pub fn value_at(&self, t: f64) -> ParamValue {
        match self.anim {
            // Static ignores the query time entirely
            AnimMode::Static => self.keys[0].value,
            AnimMode::Step => {
                let b = find_bracket(self.keys, t);
                self.keys[b.left].value
            }
            AnimMode::Linear | AnimMode::Spline => {
                let b = find_bracket(self.keys, t);
                match self.value_type {
                    ValueType::Float => {
                        let (ParamValue::Float { x: x0 }, ParamValue::Float { x: x1 }) =
                            (self.keys[b.left].value, self.keys[b.right].value)
                        else {
                            unreachable!("validated at decoration time");
                        };
                        ParamValue::Float { x: x0 + b.u * (x1 - x0) }
                    }
                    // No curve defined for bool/color; hold the left key
                    ValueType::Bool | ValueType::Color => self.keys[b.left].value,
                    ValueType::Unknown => unreachable!("validated at decoration time"),
                }
            }
            AnimMode::Unknown => unreachable!("validated at decoration time"),
        }
    }
}

/// Canonical display string for a value. Presentation only - never used
/// for comparison or storage.
pub fn format_value(value: &ParamValue) -> String {
    match value {
        ParamValue::Bool(b) => b.to_string(),
        ParamValue::Float { x } => format!("{x:.2}"),
        ParamValue::Color { r, g, b, a } => format!(
            "{} {} {} {}",
            channel_to_byte(*r),
            channel_to_byte(*g),
            channel_to_byte(*b),
            channel_to_byte(*a)
        ),
    }
}

/// Display a normalized [0,1] color channel as its 0-255 integer form.
pub fn channel_to_byte(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}
