//! Bottom status bar: playback position plus live engine telemetry.

use eframe::egui;

use crate::core::player::Player;
use crate::telemetry::{ProfileCapture, TelemetryLog};

/// Render the status bar at the bottom of the screen.
pub fn status_bar(
    ctx: &egui::Context,
    player: &Player,
    telemetry: &TelemetryLog,
    profile: Option<&ProfileCapture>,
    connected: bool,
) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.monospace(format_time(player.time_ms()));

            ui.separator();
            ui.monospace(if player.is_playing() { "playing" } else { "paused " });

            ui.separator();
            match telemetry.latest() {
                Some(s) => {
                    ui.monospace(format!("{:>5.1} fps", s.fps));
                    ui.separator();
                    ui.monospace(format!("{:>5.1}ms", s.ms));
                    ui.separator();
                    ui.monospace(format!("{:>4.0}M", s.mem));
                }
                None => {
                    ui.monospace("  --- fps");
                }
            }

            if let Some(capture) = profile {
                ui.separator();
                ui.monospace(format!(
                    "profile: {} span(s) / {:.1}ms",
                    capture.span_count(),
                    capture.end_time - capture.start_time
                ));
            }

            ui.separator();
            ui.monospace(if connected { "engine: up" } else { "engine: down" });
        });
    });
}

/// mm:ss.cc display of a millisecond position.
fn format_time(ms: f64) -> String {
    let total_cs = (ms / 10.0).floor() as u64;
    let cs = total_cs % 100;
    let s = (total_cs / 100) % 60;
    let m = total_cs / 6000;
    format!("{m:02}:{s:02}.{cs:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_display() {
        assert_eq!(format_time(0.0), "00:00.00");
        assert_eq!(format_time(2450.0), "00:02.45");
        assert_eq!(format_time(61_230.0), "01:01.23");
    }
}
