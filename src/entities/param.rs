//! Animated parameter tree.
//!
//! Mirrors the engine's wire format: every effect carries an ordered tree
//! of params. A param is either a group (children, no value) or a leaf
//! (typed keyframe track). Groups and leaves mix at any depth.
//!
//! Selection never holds a reference into the tree: snapshots replace the
//! whole `Demo` wholesale, so a selected param is remembered as a
//! [`ParamPath`] (chain of child indices) and re-resolved on every use.

use serde::{Deserialize, Serialize};

use crate::entities::demo::Demo;
use crate::error::StaleRef;

/// Value type tag of a leaf param, as sent by the engine.
///
/// Tags the engine does not document map to `Unknown` instead of failing
/// the whole snapshot parse; sampler decoration rejects them per-leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Bool,
    Float,
    Color,
    #[serde(other)]
    Unknown,
}

/// Interpolation mode tag of a leaf param.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimMode {
    Static,
    Step,
    Linear,
    Spline,
    #[serde(other)]
    Unknown,
}

/// One keyframe value. Wire shapes: `true`, `{"x": 1.5}`,
/// `{"r": 0.5, "g": 0.5, "b": 0.5, "a": 1.0}` (channels in [0,1]).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Float { x: f64 },
    Color { r: f64, g: f64, b: f64, a: f64 },
}

impl ParamValue {
    /// Does this value carry the declared type?
    pub fn matches(&self, ty: ValueType) -> bool {
        matches!(
            (self, ty),
            (ParamValue::Bool(_), ValueType::Bool)
                | (ParamValue::Float { .. }, ValueType::Float)
                | (ParamValue::Color { .. }, ValueType::Color)
        )
    }
}

/// A single `(time, value)` sample of a leaf param. Time in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Key {
    pub time: f64,
    pub value: ParamValue,
}

/// Keyframe track of a leaf param.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeafParam {
    #[serde(rename = "type")]
    pub value_type: ValueType,
    pub anim: AnimMode,
    pub keys: Vec<Key>,
}

/// Group or leaf payload of a [`Param`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamNode {
    Group { children: Vec<Param> },
    Leaf(LeafParam),
}

/// Node of an effect's parameter tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(flatten)]
    pub node: ParamNode,
}

impl Param {
    pub fn leaf(&self) -> Option<&LeafParam> {
        match &self.node {
            ParamNode::Leaf(leaf) => Some(leaf),
            ParamNode::Group { .. } => None,
        }
    }

    pub fn leaf_mut(&mut self) -> Option<&mut LeafParam> {
        match &mut self.node {
            ParamNode::Leaf(leaf) => Some(leaf),
            ParamNode::Group { .. } => None,
        }
    }

    pub fn children(&self) -> &[Param] {
        match &self.node {
            ParamNode::Group { children } => children,
            ParamNode::Leaf(_) => &[],
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.node, ParamNode::Group { .. })
    }
}

/// Stable lookup path to a param: effect index plus a chain of child
/// indices from the effect's param list down to the node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamPath {
    pub effect: usize,
    pub indices: Vec<usize>,
}

impl ParamPath {
    pub fn new(effect: usize, indices: Vec<usize>) -> Self {
        Self { effect, indices }
    }

    /// Re-resolve against the current snapshot. Fails with [`StaleRef`]
    /// when any index along the chain no longer exists.
    pub fn resolve<'a>(&self, demo: &'a Demo) -> Result<&'a Param, StaleRef> {
        let effect = demo.effects.get(self.effect).ok_or(StaleRef)?;
        let (&first, rest) = self.indices.split_first().ok_or(StaleRef)?;
        let mut node = effect.params.get(first).ok_or(StaleRef)?;
        for &idx in rest {
            node = node.children().get(idx).ok_or(StaleRef)?;
        }
        Ok(node)
    }

    pub fn resolve_mut<'a>(&self, demo: &'a mut Demo) -> Result<&'a mut Param, StaleRef> {
        let effect = demo.effects.get_mut(self.effect).ok_or(StaleRef)?;
        let (&first, rest) = self.indices.split_first().ok_or(StaleRef)?;
        let mut node = effect.params.get_mut(first).ok_or(StaleRef)?;
        for &idx in rest {
            let children = match &mut node.node {
                ParamNode::Group { children } => children,
                ParamNode::Leaf(_) => return Err(StaleRef),
            };
            node = children.get_mut(idx).ok_or(StaleRef)?;
        }
        Ok(node)
    }
}
