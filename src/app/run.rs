//! Main application loop - eframe::App implementation.
//!
//! Per frame:
//! 1. Drain engine messages and apply them
//! 2. Advance the local playback mirror
//! 3. Render transport bar, param editor, timeline, status bar

use eframe::egui;

use crate::app::DemoscopeApp;
use crate::remote::msg::OutboundMsg;
use crate::widgets::status::status_bar;
use crate::widgets::timeline::timeline_panel;

impl eframe::App for DemoscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_inbound();
        if self.player.update() {
            self.follow_playhead();
        }

        self.transport_bar(ctx);

        egui::SidePanel::right("param_editor")
            .default_width(220.0)
            .show(ctx, |ui| {
                let selected = self.timeline_state.selected.clone();
                self.editor.ui(ui, &mut self.demo, &selected, &self.link);
            });

        status_bar(
            ctx,
            &self.player,
            &self.telemetry,
            self.profile.as_ref(),
            self.engine_connected(),
        );

        egui::CentralPanel::default().show(ctx, |ui| {
            self.last_axis_width_px =
                (ui.available_width() - self.timeline_cfg.axis_origin_x()).max(100.0);
            timeline_panel(
                ui,
                &mut self.demo,
                &mut self.timeline_state,
                &mut self.player,
                &self.timeline_cfg,
                &self.link,
            );
        });

        // Keep the playhead and telemetry moving without input
        ctx.request_repaint_after(std::time::Duration::from_millis(16));
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }
}

impl DemoscopeApp {
    fn transport_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("transport").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("|<").on_hover_text("to start").clicked() {
                    self.player.to_start();
                    self.timeline_state.map.time_offset = 0.0;
                    self.send_time();
                }
                if ui.button("<").on_hover_text("page back").clicked() {
                    self.page_jump(-1.0);
                }
                let play_label = if self.player.is_playing() { "||" } else { ">" };
                if ui.button(play_label).on_hover_text("play/pause").clicked() {
                    self.player.toggle_play();
                    self.send_time();
                }
                if ui.button(">>").on_hover_text("page forward").clicked() {
                    self.page_jump(1.0);
                }

                ui.separator();
                let map = &mut self.timeline_state.map;
                if ui.button("-").on_hover_text("zoom out").clicked() {
                    map.zoom_out();
                }
                ui.monospace(format!("{}ms/px", map.ms_per_pixel()));
                if ui.button("+").on_hover_text("zoom in").clicked() {
                    map.zoom_in();
                }

                ui.separator();
                ui.checkbox(&mut map.snap_enabled, "snap");
                ui.add_enabled(
                    map.snap_enabled,
                    egui::DragValue::new(&mut map.snap_grid_ms)
                        .range(1.0..=1000.0)
                        .suffix("ms"),
                );
            });
        });
    }

    /// Jump playhead and view by one visible page in either direction.
    fn page_jump(&mut self, pages: f64) {
        let map = &mut self.timeline_state.map;
        let page_ms = map.raw_pixel_to_time(f64::from(self.last_axis_width_px)) * pages;
        map.time_offset = (map.time_offset + page_ms).max(0.0);
        self.player.jump(page_ms);
        self.send_time();
    }

    /// Keep the playhead visible while playing: when it runs off the
    /// view, re-anchor the view at the playhead (view-only, no transmit).
    fn follow_playhead(&mut self) {
        let map = &mut self.timeline_state.map;
        let px = map.time_to_pixel(self.player.time_ms());
        if px < 0.0 || px > f64::from(self.last_axis_width_px) {
            map.time_offset = map.snap(self.player.time_ms());
        }
    }

    fn send_time(&self) {
        self.link
            .send(OutboundMsg::time(self.player.is_playing(), self.player.time_ms()));
    }
}
