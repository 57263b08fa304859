//! Time/pixel axis mapping and snapping.
//!
//! One-dimensional conversion between the engine's time axis (ms) and the
//! timeline surface's pixel axis, parameterized by the view offset and a
//! discrete zoom ladder. Both directions are exact inverses for a fixed
//! (offset, zoom) pair, which hit-testing relies on.
//!
//! All user-driven time writes (scrub, boundary drags, pans) go through
//! [`TimeMap::snap`]; internal reads such as hit-testing never snap.

use serde::{Deserialize, Serialize};

/// Zoom ladder, ms per pixel. Discrete steps keep zooming deterministic
/// and reversible.
pub const MS_PER_PIXEL: [f64; 9] = [1.0, 5.0, 10.0, 20.0, 50.0, 100.0, 250.0, 500.0, 1000.0];

/// Default ladder index (10 ms/px).
pub const DEFAULT_ZOOM_IDX: usize = 2;

/// Default snap grid in milliseconds.
pub const DEFAULT_SNAP_GRID_MS: f64 = 50.0;

/// View mapping state: pan offset, zoom ladder index, snapping config.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimeMap {
    /// Time at pixel 0, ms. Never negative.
    pub time_offset: f64,
    zoom_idx: usize,
    pub snap_enabled: bool,
    pub snap_grid_ms: f64,
}

impl Default for TimeMap {
    fn default() -> Self {
        Self {
            time_offset: 0.0,
            zoom_idx: DEFAULT_ZOOM_IDX,
            snap_enabled: true,
            snap_grid_ms: DEFAULT_SNAP_GRID_MS,
        }
    }
}

impl TimeMap {
    pub fn ms_per_pixel(&self) -> f64 {
        MS_PER_PIXEL[self.zoom_idx]
    }

    pub fn zoom_idx(&self) -> usize {
        self.zoom_idx
    }

    pub fn set_zoom_idx(&mut self, idx: usize) {
        self.zoom_idx = idx.min(MS_PER_PIXEL.len() - 1);
    }

    /// Step one ladder notch towards more detail (fewer ms per pixel).
    pub fn zoom_in(&mut self) {
        self.zoom_idx = self.zoom_idx.saturating_sub(1);
    }

    /// Step one ladder notch towards overview.
    pub fn zoom_out(&mut self) {
        self.zoom_idx = (self.zoom_idx + 1).min(MS_PER_PIXEL.len() - 1);
    }

    /// Absolute pixel position -> time.
    pub fn pixel_to_time(&self, px: f64) -> f64 {
        self.time_offset + px * self.ms_per_pixel()
    }

    /// Time -> pixel position on the surface.
    pub fn time_to_pixel(&self, t: f64) -> f64 {
        (t - self.time_offset) / self.ms_per_pixel()
    }

    /// Relative pixel delta -> time delta (offset not involved). Used for
    /// drags that move something by how far the pointer travelled.
    pub fn raw_pixel_to_time(&self, dpx: f64) -> f64 {
        dpx * self.ms_per_pixel()
    }

    /// Round down to the snap grid, or identity when snapping is off.
    pub fn snap(&self, t: f64) -> f64 {
        if self.snap_enabled && self.snap_grid_ms > 0.0 {
            (t / self.snap_grid_ms).floor() * self.snap_grid_ms
        } else {
            t
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_time_roundtrip_across_ladder() {
        for idx in 0..MS_PER_PIXEL.len() {
            let mut map = TimeMap::default();
            map.set_zoom_idx(idx);
            map.time_offset = 1234.0;
            for px in [0.0, 1.0, 17.0, 100.0, 999.0] {
                let rt = map.time_to_pixel(map.pixel_to_time(px));
                assert!((rt - px).abs() < 1e-9, "ladder {idx} px {px} -> {rt}");
            }
        }
    }

    #[test]
    fn test_default_ladder_scenario() {
        // Ladder index 2 (10 ms/px), offset 0
        let map = TimeMap::default();
        assert_eq!(map.ms_per_pixel(), 10.0);
        assert_eq!(map.pixel_to_time(100.0), 1000.0);
    }

    #[test]
    fn test_snap_floors_to_grid() {
        let map = TimeMap::default();
        assert_eq!(map.snap(2475.0), 2450.0);
        assert_eq!(map.snap(2450.0), 2450.0);
        assert_eq!(map.snap(49.9), 0.0);
    }

    #[test]
    fn test_snap_disabled_is_identity() {
        let map = TimeMap { snap_enabled: false, ..TimeMap::default() };
        assert_eq!(map.snap(2475.0), 2475.0);
    }

    #[test]
    fn test_zoom_steps_clamp_at_ladder_ends() {
        let mut map = TimeMap::default();
        for _ in 0..20 {
            map.zoom_in();
        }
        assert_eq!(map.zoom_idx(), 0);
        for _ in 0..20 {
            map.zoom_out();
        }
        assert_eq!(map.zoom_idx(), MS_PER_PIXEL.len() - 1);
    }

    #[test]
    fn test_raw_delta_ignores_offset() {
        let mut map = TimeMap::default();
        map.time_offset = 50_000.0;
        assert_eq!(map.raw_pixel_to_time(10.0), 100.0);
        assert_eq!(map.raw_pixel_to_time(-10.0), -100.0);
    }
}
