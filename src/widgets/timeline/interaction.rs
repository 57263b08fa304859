//! Pointer interaction state machine for the timeline surface.
//!
//! Exactly one mode is active at a time; every event is routed by
//! matching on the mode tag, so a mode can never see an event meant for
//! another one (no rebindable handler sets, no leaked handlers). Entry
//! data - drag origin, grabbed edge, original offset - travels inside the
//! mode variant itself.
//!
//! The machine never fails: missing coordinates are no-ops, out-of-range
//! positions clamp, and a demo snapshot replacing the tree mid-drag
//! aborts the effect drag back to `Normal`.

use eframe::egui::{CursorIcon, Pos2};
use log::{debug, trace};

use crate::core::player::Player;
use crate::entities::demo::{Demo, EffectEdge};
use crate::entities::param::ParamPath;
use crate::remote::link::EngineLink;
use crate::remote::msg::OutboundMsg;
use crate::widgets::timeline::layout::{
    Row, RowKind, hit_test_handle, hit_test_row, in_control_column, in_ruler,
};
use crate::widgets::timeline::timeline::TimelineConfig;
use crate::widgets::timeline::timemap::TimeMap;

/// Pointer event in surface-local coordinates. `None` positions model
/// events that arrived without usable coordinates; they are ignored.
#[derive(Clone, Copy, Debug)]
pub enum PointerEvent {
    Press { pos: Pos2, modifier: bool },
    Move { pos: Option<Pos2> },
    Release { pos: Option<Pos2> },
    Leave,
    Wheel { dy: f32 },
}

/// Active interaction mode. All entry data is carried in the variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mode {
    Normal,
    DraggingTimeline {
        origin_x: f32,
        origin_offset: f64,
        /// Pan the view instead of scrubbing the playhead.
        panning: bool,
        last_x: f32,
    },
    DraggingEffect {
        effect: usize,
        edge: EffectEdge,
        origin_x: f32,
        initial_start: f64,
        initial_end: f64,
    },
}

/// Everything an event may touch, borrowed for the duration of one event.
pub struct InteractionCtx<'a> {
    pub demo: &'a mut Demo,
    pub map: &'a mut TimeMap,
    pub player: &'a mut Player,
    pub selected: &'a mut Option<ParamPath>,
    pub rows: &'a [Row],
    pub cfg: &'a TimelineConfig,
    pub link: &'a EngineLink,
}

/// The state machine. Owns the mode tag and the hover affordance.
#[derive(Clone, Debug)]
pub struct Interaction {
    pub mode: Mode,
    /// Cursor the surface should show, updated on hover in `Normal`.
    pub hover_cursor: CursorIcon,
}

impl Default for Interaction {
    fn default() -> Self {
        Self { mode: Mode::Normal, hover_cursor: CursorIcon::Default }
    }
}

impl Interaction {
    /// Route one pointer event through the current mode.
    pub fn handle_event(&mut self, ev: PointerEvent, ctx: &mut InteractionCtx) {
        match self.mode {
            Mode::Normal => self.on_normal(ev, ctx),
            Mode::DraggingTimeline { origin_x, origin_offset, panning, last_x } => {
                self.on_dragging_timeline(ev, ctx, origin_x, origin_offset, panning, last_x)
            }
            Mode::DraggingEffect { effect, edge, origin_x, initial_start, initial_end } => {
                self.on_dragging_effect(ev, ctx, effect, edge, origin_x, initial_start, initial_end)
            }
        }
    }

    /// Called when a new demo snapshot replaced the tree. An in-flight
    /// effect drag points into the old tree and is aborted; timeline
    /// drags only touch view/playback state and keep going.
    pub fn demo_replaced(&mut self) {
        if matches!(self.mode, Mode::DraggingEffect { .. }) {
            debug!("demo snapshot replaced mid-drag, aborting effect drag");
            self.mode = Mode::Normal;
        }
    }

    fn on_normal(&mut self, ev: PointerEvent, ctx: &mut InteractionCtx) {
        match ev {
            PointerEvent::Press { pos, modifier } => {
                if in_ruler(ctx.cfg, pos.x, pos.y) {
                    trace!("ruler press at x={} (pan={modifier})", pos.x);
                    self.mode = Mode::DraggingTimeline {
                        origin_x: pos.x,
                        origin_offset: ctx.map.time_offset,
                        panning: modifier,
                        last_x: pos.x,
                    };
                } else if let Some((effect, edge)) =
                    hit_test_handle(ctx.demo, ctx.rows, ctx.map, ctx.cfg, pos.x, pos.y)
                {
                    if modifier {
                        let e = &ctx.demo.effects[effect];
                        trace!("grabbed {edge:?} handle of effect {}", e.name);
                        self.mode = Mode::DraggingEffect {
                            effect,
                            edge,
                            origin_x: pos.x,
                            initial_start: e.start_time,
                            initial_end: e.end_time,
                        };
                    }
                } else if in_control_column(ctx.cfg, pos.x) {
                    self.select_at(pos.y, ctx);
                }
            }
            PointerEvent::Move { pos: Some(pos) } => {
                // Hover affordance only; nothing is dragged in Normal
                let near_handle =
                    hit_test_handle(ctx.demo, ctx.rows, ctx.map, ctx.cfg, pos.x, pos.y).is_some();
                self.hover_cursor =
                    if near_handle { CursorIcon::ResizeHorizontal } else { CursorIcon::Default };
            }
            PointerEvent::Wheel { dy } => {
                if dy > 0.0 {
                    ctx.map.zoom_in();
                } else if dy < 0.0 {
                    ctx.map.zoom_out();
                }
            }
            PointerEvent::Move { pos: None } | PointerEvent::Release { .. } | PointerEvent::Leave => {}
        }
    }

    fn select_at(&mut self, y: f32, ctx: &mut InteractionCtx) {
        let hit = hit_test_row(ctx.rows, y);
        *ctx.selected = match hit.map(|r| &r.kind) {
            Some(RowKind::Leaf(path)) | Some(RowKind::Group(path)) => {
                debug!("selected param {path:?}");
                Some(path.clone())
            }
            Some(RowKind::Effect(_)) | None => None,
        };
    }

    #[allow(clippy::too_many_arguments)]
    fn on_dragging_timeline(
        &mut self,
        ev: PointerEvent,
        ctx: &mut InteractionCtx,
        origin_x: f32,
        origin_offset: f64,
        panning: bool,
        last_x: f32,
    ) {
        match ev {
            PointerEvent::Move { pos: Some(pos) } => {
                if panning {
                    let delta = ctx.map.raw_pixel_to_time(f64::from(pos.x - origin_x));
                    ctx.map.time_offset = (origin_offset + ctx.map.snap(delta)).max(0.0);
                } else {
                    scrub(pos.x, ctx);
                }
                self.mode =
                    Mode::DraggingTimeline { origin_x, origin_offset, panning, last_x: pos.x };
            }
            PointerEvent::Release { pos } => {
                // One final resolve from the last known pointer x
                if !panning {
                    scrub(pos.map_or(last_x, |p| p.x), ctx);
                }
                self.mode = Mode::Normal;
            }
            PointerEvent::Leave => {
                if !panning {
                    scrub(last_x, ctx);
                }
                self.mode = Mode::Normal;
            }
            _ => {}
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn on_dragging_effect(
        &mut self,
        ev: PointerEvent,
        ctx: &mut InteractionCtx,
        effect: usize,
        edge: EffectEdge,
        origin_x: f32,
        initial_start: f64,
        initial_end: f64,
    ) {
        match ev {
            PointerEvent::Move { pos: Some(pos) } => {
                let Some(e) = ctx.demo.effects.get_mut(effect) else {
                    // Target vanished under us - recover to Normal
                    debug!("dragged effect {effect} no longer exists, aborting drag");
                    self.mode = Mode::Normal;
                    return;
                };
                let delta = ctx.map.raw_pixel_to_time(f64::from(pos.x - origin_x));
                let target = match edge {
                    EffectEdge::Start => initial_start + delta,
                    EffectEdge::End => initial_end + delta,
                };
                e.set_edge(edge, ctx.map.snap(target));
                // Editing is live: full demo update after every move
                ctx.link.send(OutboundMsg::demo(ctx.demo));
            }
            PointerEvent::Release { .. } | PointerEvent::Leave => {
                ctx.link.send(OutboundMsg::demo(ctx.demo));
                self.mode = Mode::Normal;
            }
            _ => {}
        }
    }
}

/// Recompute and snap the playhead from a surface x, clamp at zero, store
/// it and tell the engine.
fn scrub(x: f32, ctx: &mut InteractionCtx) {
    let axis_px = f64::from(x - ctx.cfg.axis_origin_x());
    let t = ctx.map.snap(ctx.map.pixel_to_time(axis_px)).max(0.0);
    ctx.player.set_time(t);
    ctx.link.send(OutboundMsg::time(ctx.player.is_playing(), ctx.player.time_ms()));
}
