//! egui adapter for the timeline surface.
//!
//! Thin glue: translates raw egui input into [`PointerEvent`]s for the
//! interaction machine, then replays the draw list onto the painter. All
//! geometry and behavior lives in the pure layers; this file only moves
//! pixels and events across the egui boundary.

use eframe::egui::{self, Color32, FontId, Pos2, Sense, Stroke, Ui, Vec2};

use crate::core::player::Player;
use crate::entities::demo::Demo;
use crate::remote::link::EngineLink;
use crate::widgets::timeline::draw::{DrawCmd, Tint, build_draw_list};
use crate::widgets::timeline::interaction::{InteractionCtx, PointerEvent};
use crate::widgets::timeline::layout::layout_rows;
use crate::widgets::timeline::timeline::{TimelineConfig, TimelineState};

const COLOR_RULER_BG: Color32 = Color32::from_rgb(32, 32, 38);
const COLOR_TICK_MAJOR: Color32 = Color32::from_gray(170);
const COLOR_TICK_MINOR: Color32 = Color32::from_gray(90);
const COLOR_LABEL: Color32 = Color32::from_gray(220);
const COLOR_ROW_SELECTED: Color32 = Color32::from_rgb(45, 65, 100);
const COLOR_EFFECT_BAR: Color32 = Color32::from_rgb(60, 100, 180);
const COLOR_EFFECT_HANDLE: Color32 = Color32::from_rgb(220, 160, 60);
const COLOR_CURVE: Color32 = Color32::from_rgb(80, 200, 120);
const COLOR_KEY_DOT: Color32 = Color32::from_gray(240);
const COLOR_VALUE_TEXT: Color32 = Color32::from_rgb(160, 200, 255);
const COLOR_PLAYHEAD: Color32 = Color32::from_rgb(255, 220, 100);

const LABEL_FONT: f32 = 11.0;

/// Show the timeline: handle this frame's pointer input, then draw.
pub fn timeline_panel(
    ui: &mut Ui,
    demo: &mut Demo,
    state: &mut TimelineState,
    player: &mut Player,
    cfg: &TimelineConfig,
    link: &EngineLink,
) {
    let desired = Vec2::new(ui.available_width(), ui.available_height());
    let (rect, response) = ui.allocate_exact_size(desired, Sense::click_and_drag());

    for ev in gather_events(ui, &response, rect) {
        let rows = layout_rows(demo, cfg);
        let mut ctx = InteractionCtx {
            demo,
            map: &mut state.map,
            player,
            selected: &mut state.selected,
            rows: &rows,
            cfg,
            link,
        };
        state.interaction.handle_event(ev, &mut ctx);
    }
    if response.hovered() {
        ui.ctx().set_cursor_icon(state.interaction.hover_cursor);
    }

    if ui.is_rect_visible(rect) {
        let rows = layout_rows(demo, cfg);
        let cmds = build_draw_list(
            demo,
            &rows,
            state,
            cfg,
            player.time_ms(),
            rect.width(),
            rect.height(),
        );
        paint(ui, rect.min, &cmds);
    }
}

/// Translate this frame's egui input into pointer events, surface-local.
fn gather_events(ui: &Ui, response: &egui::Response, rect: egui::Rect) -> Vec<PointerEvent> {
    let (pressed, released, pos, modifier, scroll) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.latest_pos(),
            i.modifiers.ctrl || i.modifiers.command,
            i.raw_scroll_delta.y,
        )
    });
    let local = |p: Pos2| Pos2::new(p.x - rect.min.x, p.y - rect.min.y);

    let mut events = Vec::new();
    match pos {
        Some(p) => {
            if pressed && rect.contains(p) {
                events.push(PointerEvent::Press { pos: local(p), modifier });
            } else if released {
                events.push(PointerEvent::Release { pos: Some(local(p)) });
            } else {
                // Drags keep receiving moves past the surface edge
                events.push(PointerEvent::Move { pos: Some(local(p)) });
            }
        }
        None => {
            if released {
                events.push(PointerEvent::Release { pos: None });
            }
            events.push(PointerEvent::Leave);
        }
    }
    if scroll != 0.0 && response.hovered() {
        events.push(PointerEvent::Wheel { dy: scroll });
    }
    events
}

fn tint_color(tint: Tint) -> Color32 {
    match tint {
        Tint::RulerBg => COLOR_RULER_BG,
        Tint::TickMajor => COLOR_TICK_MAJOR,
        Tint::TickMinor => COLOR_TICK_MINOR,
        Tint::Label => COLOR_LABEL,
        Tint::RowSelected => COLOR_ROW_SELECTED,
        Tint::EffectBar => COLOR_EFFECT_BAR,
        Tint::EffectHandle => COLOR_EFFECT_HANDLE,
        Tint::CurveLine => COLOR_CURVE,
        Tint::KeyDot => COLOR_KEY_DOT,
        Tint::ValueText => COLOR_VALUE_TEXT,
        Tint::Playhead => COLOR_PLAYHEAD,
    }
}

fn tint_stroke_width(tint: Tint) -> f32 {
    match tint {
        Tint::Playhead | Tint::EffectHandle => 2.0,
        _ => 1.0,
    }
}

/// Replay a draw list onto the painter, offset into screen space.
fn paint(ui: &Ui, origin: Pos2, cmds: &[DrawCmd]) {
    let painter = ui.painter();
    let at = |x: f32, y: f32| Pos2::new(origin.x + x, origin.y + y);

    for cmd in cmds {
        match cmd {
            DrawCmd::Rect { x, y, w, h, tint } => {
                let r = egui::Rect::from_min_size(at(*x, *y), Vec2::new(*w, *h));
                painter.rect_filled(r, 0.0, tint_color(*tint));
            }
            DrawCmd::Line { x0, y0, x1, y1, tint } => {
                painter.line_segment(
                    [at(*x0, *y0), at(*x1, *y1)],
                    (tint_stroke_width(*tint), tint_color(*tint)),
                );
            }
            DrawCmd::Text { x, y, text, tint } => {
                painter.text(
                    at(*x, *y),
                    egui::Align2::LEFT_TOP,
                    text,
                    FontId::proportional(LABEL_FONT),
                    tint_color(*tint),
                );
            }
            DrawCmd::Polyline { points, tint } => {
                let pts: Vec<Pos2> = points.iter().map(|&(x, y)| at(x, y)).collect();
                painter.add(egui::Shape::line(
                    pts,
                    Stroke::new(tint_stroke_width(*tint), tint_color(*tint)),
                ));
            }
            DrawCmd::Dot { x, y, radius, tint } => {
                painter.circle_filled(at(*x, *y), *radius, tint_color(*tint));
            }
        }
    }
}
