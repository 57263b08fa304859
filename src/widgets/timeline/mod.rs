//! Timeline widget: time/pixel mapping, row layout, pointer interaction,
//! draw pass and the egui adapter tying them together.

pub mod draw;
pub mod interaction;
pub mod layout;
pub mod timeline;
pub mod timeline_ui;
pub mod timemap;

pub use interaction::{Interaction, InteractionCtx, Mode, PointerEvent};
pub use timeline::{TimelineConfig, TimelineState};
pub use timeline_ui::timeline_panel;
pub use timemap::TimeMap;
