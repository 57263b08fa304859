//! UI widgets: timeline surface, param editor, status bar.

pub mod params;
pub mod status;
pub mod timeline;
