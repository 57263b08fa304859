//! Row layout and hit-testing for the effect/param tree.
//!
//! One deterministic depth-first pre-order pass assigns every visible row
//! its vertical extent. Drawing and hit-testing both consume the same
//! pass output, so what was drawn is exactly what gets hit.

use crate::entities::demo::{Demo, EffectEdge};
use crate::entities::param::{Param, ParamPath};
use crate::widgets::timeline::timeline::TimelineConfig;
use crate::widgets::timeline::timemap::TimeMap;

/// What occupies a row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowKind {
    Effect(usize),
    Group(ParamPath),
    Leaf(ParamPath),
}

/// One laid-out row: vertical band plus tree depth (0 = effect header).
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub kind: RowKind,
    pub y: f32,
    pub height: f32,
    pub depth: usize,
}

impl Row {
    pub fn contains_y(&self, y: f32) -> bool {
        y >= self.y && y < self.y + self.height
    }
}

fn param_row_height(param: &Param, cfg: &TimelineConfig) -> f32 {
    match param.leaf() {
        None => cfg.group_row_height,
        Some(leaf) if leaf.keys.len() >= 2 => cfg.leaf_curve_height,
        Some(_) => cfg.leaf_row_height,
    }
}

fn push_param_rows(
    param: &Param,
    effect: usize,
    indices: &mut Vec<usize>,
    depth: usize,
    y: &mut f32,
    cfg: &TimelineConfig,
    out: &mut Vec<Row>,
) {
    let path = ParamPath::new(effect, indices.clone());
    let height = param_row_height(param, cfg);
    let kind = if param.is_group() { RowKind::Group(path) } else { RowKind::Leaf(path) };
    out.push(Row { kind, y: *y, height, depth });
    *y += height;
    for (i, child) in param.children().iter().enumerate() {
        indices.push(i);
        push_param_rows(child, effect, indices, depth + 1, y, cfg, out);
        indices.pop();
    }
}

/// Lay out every visible row of the demo. Y accumulates from the bottom
/// of the ruler band in declaration order.
pub fn layout_rows(demo: &Demo, cfg: &TimelineConfig) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut y = cfg.ruler_height;
    for (ei, effect) in demo.effects.iter().enumerate() {
        rows.push(Row {
            kind: RowKind::Effect(ei),
            y,
            height: cfg.effect_row_height,
            depth: 0,
        });
        y += cfg.effect_row_height;
        let mut indices = Vec::new();
        for (pi, param) in effect.params.iter().enumerate() {
            indices.push(pi);
            push_param_rows(param, ei, &mut indices, 1, &mut y, cfg, &mut rows);
            indices.pop();
        }
    }
    rows
}

/// Row under a surface-local y, if any.
pub fn hit_test_row<'a>(rows: &'a [Row], y: f32) -> Option<&'a Row> {
    rows.iter().find(|r| r.contains_y(y))
}

/// Effect boundary handle under a surface-local position: within the
/// handle tolerance of the boundary's mapped pixel, restricted to the
/// effect's own header row band.
pub fn hit_test_handle(
    demo: &Demo,
    rows: &[Row],
    map: &TimeMap,
    cfg: &TimelineConfig,
    x: f32,
    y: f32,
) -> Option<(usize, EffectEdge)> {
    let origin = cfg.axis_origin_x();
    for row in rows {
        let RowKind::Effect(ei) = &row.kind else { continue };
        if !row.contains_y(y) {
            continue;
        }
        let ei = *ei;
        let effect = demo.effects.get(ei)?;
        let sx = origin + map.time_to_pixel(effect.start_time) as f32;
        let ex = origin + map.time_to_pixel(effect.end_time) as f32;
        if (x - sx).abs() < cfg.handle_tolerance {
            return Some((ei, EffectEdge::Start));
        }
        if (x - ex).abs() < cfg.handle_tolerance {
            return Some((ei, EffectEdge::End));
        }
    }
    None
}

/// Is a surface-local position inside the ruler band?
pub fn in_ruler(cfg: &TimelineConfig, x: f32, y: f32) -> bool {
    x >= cfg.axis_origin_x() && y >= 0.0 && y < cfg.ruler_height
}

/// Is a surface-local position inside the name/control column?
pub fn in_control_column(cfg: &TimelineConfig, x: f32) -> bool {
    x >= 0.0 && x < cfg.name_column_width
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::demo::Effect;
    use crate::entities::param::{AnimMode, Key, LeafParam, ParamNode, ParamValue, ValueType};

    fn leaf(name: &str, n_keys: usize) -> Param {
        let keys = (0..n_keys)
            .map(|i| Key { time: i as f64 * 100.0, value: ParamValue::Float { x: i as f64 } })
            .collect();
        Param {
            name: name.into(),
            node: ParamNode::Leaf(LeafParam {
                value_type: ValueType::Float,
                anim: AnimMode::Linear,
                keys,
            }),
        }
    }

    fn demo() -> Demo {
        Demo {
            effects: vec![
                Effect {
                    name: "intro".into(),
                    start_time: 0.0,
                    end_time: 4000.0,
                    params: vec![Param {
                        name: "camera".into(),
                        node: ParamNode::Group { children: vec![leaf("fov", 1), leaf("shake", 3)] },
                    }],
                },
                Effect { name: "tunnel".into(), start_time: 4000.0, end_time: 9000.0, params: vec![] },
            ],
        }
    }

    #[test]
    fn test_rows_accumulate_in_preorder() {
        let cfg = TimelineConfig::default();
        let rows = layout_rows(&demo(), &cfg);
        // effect, group, compact leaf, curve leaf, effect
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].kind, RowKind::Effect(0));
        assert_eq!(rows[1].kind, RowKind::Group(ParamPath::new(0, vec![0])));
        assert_eq!(rows[2].kind, RowKind::Leaf(ParamPath::new(0, vec![0, 0])));
        assert_eq!(rows[3].kind, RowKind::Leaf(ParamPath::new(0, vec![0, 1])));
        assert_eq!(rows[4].kind, RowKind::Effect(1));

        assert_eq!(rows[0].y, cfg.ruler_height);
        assert_eq!(rows[2].height, cfg.leaf_row_height);
        assert_eq!(rows[3].height, cfg.leaf_curve_height);
        // Cumulative y: each row starts where the previous ended
        for pair in rows.windows(2) {
            assert_eq!(pair[1].y, pair[0].y + pair[0].height);
        }
    }

    #[test]
    fn test_hit_test_row_matches_layout() {
        let cfg = TimelineConfig::default();
        let rows = layout_rows(&demo(), &cfg);
        for row in &rows {
            let hit = hit_test_row(&rows, row.y + row.height / 2.0).unwrap();
            assert_eq!(hit.kind, row.kind);
        }
        assert!(hit_test_row(&rows, 0.0).is_none());
        assert!(hit_test_row(&rows, 10_000.0).is_none());
    }

    #[test]
    fn test_handle_hit_within_tolerance_and_own_band() {
        let cfg = TimelineConfig::default();
        let map = TimeMap::default(); // 10 ms/px, offset 0
        let d = demo();
        let rows = layout_rows(&d, &cfg);
        let origin = cfg.axis_origin_x();

        // Effect 1 starts at 4000ms -> axis px 400
        let row_y = rows[4].y + 2.0;
        let hit = hit_test_handle(&d, &rows, &map, &cfg, origin + 400.0 + 3.0, row_y);
        assert_eq!(hit, Some((1, EffectEdge::Start)));

        // Same x in effect 0's band hits effect 0's end (also 4000ms)
        let hit = hit_test_handle(&d, &rows, &map, &cfg, origin + 400.0 + 3.0, rows[0].y + 2.0);
        assert_eq!(hit, Some((0, EffectEdge::End)));

        // Outside tolerance
        let hit = hit_test_handle(&d, &rows, &map, &cfg, origin + 400.0 + 8.0, row_y);
        assert_eq!(hit, None);

        // Param rows are not handle bands
        let hit = hit_test_handle(&d, &rows, &map, &cfg, origin + 0.0, rows[2].y + 2.0);
        assert_eq!(hit, None);
    }
}
