//! Draw pass for the timeline surface.
//!
//! Produces a plain draw list from the current snapshot, layout and view
//! state. No egui types in here; the UI adapter maps [`Tint`]s to theme
//! colors and replays the commands onto a painter. Keeping this pass pure
//! makes the geometry testable without a windowing stack.

use crate::anim::{Sampler, format_value};
use crate::entities::demo::Demo;
use crate::entities::param::{Param, ParamValue, ValueType};
use crate::widgets::timeline::layout::{Row, RowKind};
use crate::widgets::timeline::timeline::{TimelineConfig, TimelineState};
use crate::widgets::timeline::timemap::TimeMap;

/// Pixel spacing between labelled ruler ticks.
const RULER_LABEL_STEP_PX: f64 = 100.0;
/// Pixel spacing between minor ruler ticks.
const RULER_MINOR_STEP_PX: f64 = 25.0;
const KEY_DOT_RADIUS: f32 = 2.5;

/// Semantic color slot; the UI adapter owns the actual palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    RulerBg,
    TickMajor,
    TickMinor,
    Label,
    RowSelected,
    EffectBar,
    EffectHandle,
    CurveLine,
    KeyDot,
    ValueText,
    Playhead,
}

/// One drawing primitive in surface-local coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Rect { x: f32, y: f32, w: f32, h: f32, tint: Tint },
    Line { x0: f32, y0: f32, x1: f32, y1: f32, tint: Tint },
    Text { x: f32, y: f32, text: String, tint: Tint },
    Polyline { points: Vec<(f32, f32)>, tint: Tint },
    Dot { x: f32, y: f32, radius: f32, tint: Tint },
}

/// Build the full draw list for one frame.
pub fn build_draw_list(
    demo: &Demo,
    rows: &[Row],
    state: &TimelineState,
    cfg: &TimelineConfig,
    playhead_ms: f64,
    width: f32,
    height: f32,
) -> Vec<DrawCmd> {
    let mut out = Vec::new();
    draw_ruler(&state.map, cfg, width, &mut out);
    for row in rows {
        draw_row(demo, row, state, cfg, playhead_ms, width, &mut out);
    }
    draw_playhead(&state.map, cfg, playhead_ms, width, height, &mut out);
    out
}

fn format_tick(ms: f64) -> String {
    let s = ms / 1000.0;
    if s.fract() == 0.0 { format!("{s:.0}s") } else { format!("{s:.2}s") }
}

fn draw_ruler(map: &TimeMap, cfg: &TimelineConfig, width: f32, out: &mut Vec<DrawCmd>) {
    let origin = cfg.axis_origin_x();
    out.push(DrawCmd::Rect {
        x: origin,
        y: 0.0,
        w: (width - origin).max(0.0),
        h: cfg.ruler_height,
        tint: Tint::RulerBg,
    });

    let span_px = f64::from(width - origin);
    let mut px = 0.0;
    while px <= span_px {
        let x = origin + px as f32;
        out.push(DrawCmd::Line {
            x0: x,
            y0: cfg.ruler_height * 0.6,
            x1: x,
            y1: cfg.ruler_height,
            tint: Tint::TickMinor,
        });
        px += RULER_MINOR_STEP_PX;
    }

    let mut px = 0.0;
    while px <= span_px {
        let x = origin + px as f32;
        out.push(DrawCmd::Line {
            x0: x,
            y0: cfg.ruler_height * 0.25,
            x1: x,
            y1: cfg.ruler_height,
            tint: Tint::TickMajor,
        });
        out.push(DrawCmd::Text {
            x: x + 3.0,
            y: 2.0,
            text: format_tick(map.pixel_to_time(px)),
            tint: Tint::Label,
        });
        px += RULER_LABEL_STEP_PX;
    }
}

fn draw_row(
    demo: &Demo,
    row: &Row,
    state: &TimelineState,
    cfg: &TimelineConfig,
    playhead_ms: f64,
    width: f32,
    out: &mut Vec<DrawCmd>,
) {
    match &row.kind {
        RowKind::Effect(ei) => {
            let Some(effect) = demo.effects.get(*ei) else { return };
            out.push(DrawCmd::Text {
                x: 4.0,
                y: row.y + 4.0,
                text: effect.name.clone(),
                tint: Tint::Label,
            });
            draw_effect_bar(effect.start_time, effect.end_time, row, state, cfg, width, out);
        }
        RowKind::Group(path) | RowKind::Leaf(path) => {
            let Ok(param) = path.resolve(demo) else { return };
            if state.selected.as_ref() == Some(path) {
                out.push(DrawCmd::Rect {
                    x: 0.0,
                    y: row.y,
                    w: width,
                    h: row.height,
                    tint: Tint::RowSelected,
                });
            }
            out.push(DrawCmd::Text {
                x: 4.0 + cfg.indent * row.depth as f32,
                y: row.y + 2.0,
                text: param.name.clone(),
                tint: Tint::Label,
            });
            if let Some(leaf) = param.leaf() {
                let Ok(sampler) = Sampler::new(leaf) else { return };
                out.push(DrawCmd::Text {
                    x: cfg.name_column_width - 50.0,
                    y: row.y + 2.0,
                    text: format_value(&sampler.value_at(playhead_ms)),
                    tint: Tint::ValueText,
                });
                if leaf.keys.len() >= 2 {
                    draw_key_track(param, row, state, cfg, width, out);
                }
            }
        }
    }
}

fn draw_effect_bar(
    start: f64,
    end: f64,
    row: &Row,
    state: &TimelineState,
    cfg: &TimelineConfig,
    width: f32,
    out: &mut Vec<DrawCmd>,
) {
    let origin = cfg.axis_origin_x();
    let sx = origin + state.map.time_to_pixel(start) as f32;
    let ex = origin + state.map.time_to_pixel(end) as f32;
    let (cx0, cx1) = (sx.max(origin), ex.min(width));
    if cx1 <= cx0 {
        return; // fully off-view
    }
    out.push(DrawCmd::Rect {
        x: cx0,
        y: row.y + 3.0,
        w: cx1 - cx0,
        h: row.height - 6.0,
        tint: Tint::EffectBar,
    });
    for hx in [sx, ex] {
        if hx >= origin && hx <= width {
            out.push(DrawCmd::Line {
                x0: hx,
                y0: row.y,
                x1: hx,
                y1: row.y + row.height,
                tint: Tint::EffectHandle,
            });
        }
    }
}

/// Key dots for every track, plus the value curve for float tracks.
fn draw_key_track(
    param: &Param,
    row: &Row,
    state: &TimelineState,
    cfg: &TimelineConfig,
    width: f32,
    out: &mut Vec<DrawCmd>,
) {
    let Some(leaf) = param.leaf() else { return };
    let origin = cfg.axis_origin_x();
    let key_x = |t: f64| origin + state.map.time_to_pixel(t) as f32;

    if leaf.value_type == ValueType::Float {
        let xs: Vec<f64> = leaf
            .keys
            .iter()
            .filter_map(|k| match k.value {
                ParamValue::Float { x } => Some(x),
                _ => None,
            })
            .collect();
        if xs.len() == leaf.keys.len() {
            let (lo, hi) = xs.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
            let span = if hi > lo { hi - lo } else { 1.0 };
            let (top, bottom) = (row.y + 4.0, row.y + row.height - 4.0);
            let points: Vec<(f32, f32)> = leaf
                .keys
                .iter()
                .zip(&xs)
                .map(|(k, &v)| {
                    let ny = ((v - lo) / span) as f32;
                    (key_x(k.time), bottom - ny * (bottom - top))
                })
                .collect();
            out.push(DrawCmd::Polyline { points, tint: Tint::CurveLine });
        }
    }

    let mid = row.y + row.height / 2.0;
    for key in &leaf.keys {
        let x = key_x(key.time);
        if x >= origin && x <= width {
            out.push(DrawCmd::Dot { x, y: mid, radius: KEY_DOT_RADIUS, tint: Tint::KeyDot });
        }
    }
}

fn draw_playhead(
    map: &TimeMap,
    cfg: &TimelineConfig,
    playhead_ms: f64,
    width: f32,
    height: f32,
    out: &mut Vec<DrawCmd>,
) {
    let x = cfg.axis_origin_x() + map.time_to_pixel(playhead_ms) as f32;
    if x >= cfg.axis_origin_x() && x <= width {
        out.push(DrawCmd::Line { x0: x, y0: 0.0, x1: x, y1: height, tint: Tint::Playhead });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::demo::Effect;
    use crate::entities::param::{AnimMode, Key, LeafParam, ParamNode, ParamPath};
    use crate::widgets::timeline::layout::layout_rows;

    fn demo() -> Demo {
        Demo {
            effects: vec![Effect {
                name: "intro".into(),
                start_time: 1000.0,
                end_time: 5000.0,
                params: vec![Param {
                    name: "radius".into(),
                    node: ParamNode::Leaf(LeafParam {
                        value_type: ValueType::Float,
                        anim: AnimMode::Linear,
                        keys: vec![
                            Key { time: 0.0, value: ParamValue::Float { x: 0.0 } },
                            Key { time: 2000.0, value: ParamValue::Float { x: 10.0 } },
                        ],
                    }),
                }],
            }],
        }
    }

    fn build(demo: &Demo, state: &TimelineState, playhead: f64) -> Vec<DrawCmd> {
        let cfg = TimelineConfig::default();
        let rows = layout_rows(demo, &cfg);
        build_draw_list(demo, &rows, state, &cfg, playhead, 800.0, 600.0)
    }

    fn find_tint<'a>(cmds: &'a [DrawCmd], tint: Tint) -> Vec<&'a DrawCmd> {
        cmds.iter()
            .filter(|c| match c {
                DrawCmd::Rect { tint: t, .. }
                | DrawCmd::Line { tint: t, .. }
                | DrawCmd::Text { tint: t, .. }
                | DrawCmd::Polyline { tint: t, .. }
                | DrawCmd::Dot { tint: t, .. } => *t == tint,
            })
            .collect()
    }

    #[test]
    fn test_playhead_at_mapped_pixel() {
        let d = demo();
        let state = TimelineState::default(); // 10 ms/px, offset 0
        let cmds = build(&d, &state, 2450.0);
        let playheads = find_tint(&cmds, Tint::Playhead);
        assert_eq!(playheads.len(), 1);
        let DrawCmd::Line { x0, .. } = playheads[0] else { panic!("line") };
        let cfg = TimelineConfig::default();
        assert_eq!(*x0, cfg.axis_origin_x() + 245.0);
    }

    #[test]
    fn test_playhead_off_view_is_omitted() {
        let d = demo();
        let mut state = TimelineState::default();
        state.map.time_offset = 50_000.0;
        let cmds = build(&d, &state, 2450.0);
        assert!(find_tint(&cmds, Tint::Playhead).is_empty());
    }

    #[test]
    fn test_effect_bar_clipped_to_view() {
        let d = demo();
        let mut state = TimelineState::default();
        state.map.time_offset = 2000.0; // effect start is 100px left of view
        let cmds = build(&d, &state, 0.0);
        let bars = find_tint(&cmds, Tint::EffectBar);
        assert_eq!(bars.len(), 1);
        let DrawCmd::Rect { x, w, .. } = bars[0] else { panic!("rect") };
        let cfg = TimelineConfig::default();
        assert_eq!(*x, cfg.axis_origin_x());
        assert_eq!(*w, 300.0); // 5000ms end -> px 300 of visible axis
    }

    #[test]
    fn test_value_text_evaluates_at_playhead() {
        let d = demo();
        let state = TimelineState::default();
        let cmds = build(&d, &state, 1000.0);
        // Linear 0..10 over 0..2000ms -> 5.00 at 1000ms
        assert!(find_tint(&cmds, Tint::ValueText)
            .iter()
            .any(|c| matches!(c, DrawCmd::Text { text, .. } if text == "5.00")));
    }

    #[test]
    fn test_selected_row_gets_highlight() {
        let d = demo();
        let mut state = TimelineState::default();
        let cmds = build(&d, &state, 0.0);
        assert!(find_tint(&cmds, Tint::RowSelected).is_empty());

        state.selected = Some(ParamPath::new(0, vec![0]));
        let cmds = build(&d, &state, 0.0);
        assert_eq!(find_tint(&cmds, Tint::RowSelected).len(), 1);
    }

    #[test]
    fn test_curve_spans_keys_left_to_right() {
        let d = demo();
        let state = TimelineState::default();
        let cmds = build(&d, &state, 0.0);
        let curves = find_tint(&cmds, Tint::CurveLine);
        assert_eq!(curves.len(), 1);
        let DrawCmd::Polyline { points, .. } = curves[0] else { panic!("polyline") };
        assert_eq!(points.len(), 2);
        assert!(points[0].0 < points[1].0);
        // Rising track: second point is higher on screen (smaller y)
        assert!(points[1].1 < points[0].1);
        assert_eq!(find_tint(&cmds, Tint::KeyDot).len(), 2);
    }

    #[test]
    fn test_ruler_labels_follow_view_offset() {
        let d = demo();
        let mut state = TimelineState::default();
        state.map.time_offset = 1000.0;
        let cmds = build(&d, &state, 0.0);
        let labels: Vec<_> = find_tint(&cmds, Tint::Label)
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect();
        // First labelled tick sits at the view offset
        assert!(labels.contains(&"1s".to_string()));
        assert!(labels.contains(&"2s".to_string()));
    }
}
