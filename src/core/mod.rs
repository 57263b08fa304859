//! Core playback state.

pub mod player;

pub use player::Player;
