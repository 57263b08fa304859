//! Error taxonomy for the control panel core.
//!
//! Three recoverable families, matching how failures are actually handled:
//! - [`ConfigError`] - a leaf param cannot be decorated with a sampler
//!   (unknown wire tags, bad key data). Halts that leaf only; the rest of
//!   the tree keeps working.
//! - [`EditError`] - operator input rejected before any state change.
//! - [`StaleRef`] - a selection or drag target no longer exists after a
//!   demo snapshot replaced the tree. Recovered by clearing the selection
//!   or aborting the drag.

use thiserror::Error;

/// Unsupported or inconsistent leaf configuration, detected when a sampler
/// is built for the leaf (never mid-evaluation).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown value type tag on param")]
    UnknownValueType,
    #[error("unknown interpolation mode tag on param")]
    UnknownAnimMode,
    #[error("leaf param has no keys")]
    NoKeys,
    #[error("key {index} value does not match declared type")]
    KeyTypeMismatch { index: usize },
    #[error("key {index} is out of time order")]
    KeysUnsorted { index: usize },
}

/// Invalid operator input to the edit bridge. The model is untouched and
/// nothing is transmitted when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error("not a number: {0:?}")]
    BadNumber(String),
    #[error("channel value {0} outside 0..=255")]
    OutOfRange(i64),
    #[error("no such channel {0}")]
    BadChannel(usize),
    #[error("param type is not editable as text")]
    NotEditable,
    #[error("selection no longer resolves")]
    Stale(#[from] StaleRef),
}

/// A path into the demo tree failed to resolve against the current
/// snapshot. Node identity is not preserved across snapshots, so this is
/// an expected outcome, not a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("param path no longer resolves against the current demo")]
pub struct StaleRef;
