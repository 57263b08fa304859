//! Param editor panel.
//!
//! Shows the selected leaf param as editable channel fields. Edits are
//! validated first and applied atomically: a rejected edit leaves the
//! demo untouched and nothing goes to the engine. Accepted edits rewrite
//! the param's base key and push the whole demo snapshot out.
//!
//! The selection is a child-index path re-resolved against the current
//! snapshot on every use; a path that no longer resolves (snapshot
//! changed shape underneath) surfaces as a stale error, never a panic.

use eframe::egui::{Color32, RichText, TextEdit, Ui};
use log::debug;

use crate::anim::{channel_to_byte, format_value};
use crate::entities::demo::Demo;
use crate::entities::param::{ParamPath, ParamValue, ValueType};
use crate::error::EditError;
use crate::remote::link::EngineLink;
use crate::remote::msg::OutboundMsg;

/// Color channel labels, edit order.
const COLOR_CHANNELS: [&str; 4] = ["r", "g", "b", "a"];

/// Apply one channel edit from raw field text.
///
/// Validates, then mutates the first key of the leaf's track (the base
/// value; animated tracks keep their later keys). On success the full
/// demo is sent to the engine and the canonical display string for the
/// edited channel comes back for the field buffer.
pub fn on_param_edited(
    demo: &mut Demo,
    path: &ParamPath,
    channel: usize,
    raw: &str,
    link: &EngineLink,
) -> Result<String, EditError> {
    let param = path.resolve_mut(demo)?;
    let Some(leaf) = param.leaf_mut() else {
        return Err(EditError::NotEditable);
    };
    let Some(key) = leaf.keys.first_mut() else {
        return Err(EditError::NotEditable);
    };

    let raw = raw.trim();
    let echo = match (leaf.value_type, &mut key.value) {
        (ValueType::Bool, ParamValue::Bool(b)) => {
            if channel != 0 {
                return Err(EditError::BadChannel(channel));
            }
            *b = raw.parse::<bool>().map_err(|_| EditError::BadNumber(raw.to_string()))?;
            b.to_string()
        }
        (ValueType::Float, ParamValue::Float { x }) => {
            if channel != 0 {
                return Err(EditError::BadChannel(channel));
            }
            let parsed: f64 = raw.parse().map_err(|_| EditError::BadNumber(raw.to_string()))?;
            if !parsed.is_finite() {
                return Err(EditError::BadNumber(raw.to_string()));
            }
            *x = parsed;
            format!("{parsed:.2}")
        }
        (ValueType::Color, ParamValue::Color { r, g, b, a }) => {
            let byte: i64 = raw.parse().map_err(|_| EditError::BadNumber(raw.to_string()))?;
            if !(0..=255).contains(&byte) {
                return Err(EditError::OutOfRange(byte));
            }
            let slot = match channel {
                0 => r,
                1 => g,
                2 => b,
                3 => a,
                n => return Err(EditError::BadChannel(n)),
            };
            *slot = byte as f64 / 255.0;
            byte.to_string()
        }
        _ => return Err(EditError::NotEditable),
    };

    debug!("param {path:?} channel {channel} <- {raw}");
    link.send(OutboundMsg::demo(demo));
    Ok(echo)
}

/// Field buffers for the currently edited param. Rebuilt whenever the
/// selection path changes; kept verbatim while the user is typing.
#[derive(Debug, Default)]
pub struct ParamEditor {
    path: Option<ParamPath>,
    buffers: Vec<String>,
    error: Option<String>,
}

impl ParamEditor {
    /// Show the editor for the current selection.
    pub fn ui(
        &mut self,
        ui: &mut Ui,
        demo: &mut Demo,
        selected: &Option<ParamPath>,
        link: &EngineLink,
    ) {
        if self.path != *selected {
            self.sync_to(demo, selected);
        }
        let Some(path) = selected.clone() else {
            ui.weak("no param selected");
            return;
        };
        let Ok(param) = path.resolve(demo) else {
            ui.weak("selection no longer exists");
            return;
        };
        let Some(leaf) = param.leaf() else {
            ui.label(&param.name);
            ui.weak("group");
            return;
        };

        ui.heading(&param.name);
        ui.label(format!("{:?} / {:?}, {} key(s)", leaf.value_type, leaf.anim, leaf.keys.len()));
        ui.separator();

        let value_type = leaf.value_type;
        let mut commits: Vec<(usize, String)> = Vec::new();
        for (channel, buffer) in self.buffers.iter_mut().enumerate() {
            ui.horizontal(|ui| {
                let label = match value_type {
                    ValueType::Color => COLOR_CHANNELS[channel],
                    _ => "value",
                };
                ui.label(label);
                let resp = ui.add(TextEdit::singleline(buffer).desired_width(80.0));
                if resp.lost_focus() && ui.input(|i| i.key_pressed(eframe::egui::Key::Enter)) {
                    commits.push((channel, buffer.clone()));
                }
            });
        }
        for (channel, raw) in commits {
            match on_param_edited(demo, &path, channel, &raw, link) {
                Ok(echo) => {
                    self.buffers[channel] = echo;
                    self.error = None;
                }
                Err(e) => {
                    self.error = Some(e.to_string());
                }
            }
        }
        if let Some(err) = &self.error {
            ui.label(RichText::new(err).color(Color32::from_rgb(200, 60, 60)));
        }
    }

    /// Refill buffers from the demo for a new selection.
    fn sync_to(&mut self, demo: &Demo, selected: &Option<ParamPath>) {
        self.path = selected.clone();
        self.error = None;
        self.buffers.clear();
        let Some(path) = selected else { return };
        let Ok(param) = path.resolve(demo) else { return };
        let Some(leaf) = param.leaf() else { return };
        let Some(key) = leaf.keys.first() else { return };
        match key.value {
            ParamValue::Bool(_) | ParamValue::Float { .. } => {
                self.buffers.push(format_value(&key.value));
            }
            ParamValue::Color { r, g, b, a } => {
                for v in [r, g, b, a] {
                    self.buffers.push(channel_to_byte(v).to_string());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::demo::Effect;
    use crate::entities::param::{AnimMode, Key, LeafParam, Param, ParamNode};
    use crate::remote::link::EngineRemote;
    use crate::remote::msg::MsgBody;

    fn rig() -> (Demo, EngineLink, EngineRemote) {
        let demo = Demo {
            effects: vec![Effect {
                name: "intro".into(),
                start_time: 0.0,
                end_time: 4000.0,
                params: vec![
                    Param {
                        name: "opacity".into(),
                        node: ParamNode::Leaf(LeafParam {
                            value_type: ValueType::Float,
                            anim: AnimMode::Linear,
                            keys: vec![
                                Key { time: 0.0, value: ParamValue::Float { x: 0.5 } },
                                Key { time: 1000.0, value: ParamValue::Float { x: 1.0 } },
                            ],
                        }),
                    },
                    Param {
                        name: "tint".into(),
                        node: ParamNode::Leaf(LeafParam {
                            value_type: ValueType::Color,
                            anim: AnimMode::Static,
                            keys: vec![Key {
                                time: 0.0,
                                value: ParamValue::Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 },
                            }],
                        }),
                    },
                    Param {
                        name: "fx".into(),
                        node: ParamNode::Group { children: vec![] },
                    },
                ],
            }],
        };
        let (link, remote) = EngineLink::pair();
        (demo, link, remote)
    }

    fn sent(remote: &EngineRemote) -> Vec<OutboundMsg> {
        remote.out_rx.try_iter().collect()
    }

    #[test]
    fn test_float_edit_rewrites_base_key_and_transmits() {
        let (mut demo, link, remote) = rig();
        let path = ParamPath::new(0, vec![0]);
        let echo = on_param_edited(&mut demo, &path, 0, " 0.75 ", &link).unwrap();
        assert_eq!(echo, "0.75");
        assert_eq!(
            demo.effects[0].params[0].leaf().unwrap().keys[0].value,
            ParamValue::Float { x: 0.75 }
        );
        // Later keys untouched
        assert_eq!(
            demo.effects[0].params[0].leaf().unwrap().keys[1].value,
            ParamValue::Float { x: 1.0 }
        );
        let msgs = sent(&remote);
        assert_eq!(msgs.len(), 1);
        assert!(matches!(msgs[0].msg, MsgBody::Demo(_)));
    }

    #[test]
    fn test_bad_float_rejected_without_mutation() {
        let (mut demo, link, remote) = rig();
        let before = demo.clone();
        let path = ParamPath::new(0, vec![0]);
        let err = on_param_edited(&mut demo, &path, 0, "fast", &link).unwrap_err();
        assert!(matches!(err, EditError::BadNumber(_)));
        assert_eq!(demo, before);
        assert!(sent(&remote).is_empty());
    }

    #[test]
    fn test_color_channel_scales_to_unit_range() {
        let (mut demo, link, remote) = rig();
        let path = ParamPath::new(0, vec![1]);
        let echo = on_param_edited(&mut demo, &path, 1, "128", &link).unwrap();
        assert_eq!(echo, "128");
        let ParamValue::Color { g, r, .. } =
            demo.effects[0].params[1].leaf().unwrap().keys[0].value
        else {
            panic!("color key");
        };
        assert!((g - 128.0 / 255.0).abs() < 1e-12);
        assert_eq!(r, 1.0);
        assert_eq!(sent(&remote).len(), 1);
    }

    #[test]
    fn test_color_out_of_range_rejected() {
        let (mut demo, link, remote) = rig();
        let before = demo.clone();
        let path = ParamPath::new(0, vec![1]);
        let err = on_param_edited(&mut demo, &path, 0, "300", &link).unwrap_err();
        assert_eq!(err, EditError::OutOfRange(300));
        let err = on_param_edited(&mut demo, &path, 0, "-1", &link).unwrap_err();
        assert_eq!(err, EditError::OutOfRange(-1));
        assert_eq!(demo, before);
        assert!(sent(&remote).is_empty());
    }

    #[test]
    fn test_bad_channel_and_group_rejected() {
        let (mut demo, link, remote) = rig();
        let err = on_param_edited(&mut demo, &ParamPath::new(0, vec![1]), 4, "0", &link).unwrap_err();
        assert_eq!(err, EditError::BadChannel(4));
        let err = on_param_edited(&mut demo, &ParamPath::new(0, vec![2]), 0, "1", &link).unwrap_err();
        assert_eq!(err, EditError::NotEditable);
        assert!(sent(&remote).is_empty());
    }

    #[test]
    fn test_stale_path_surfaces_as_error() {
        let (mut demo, link, remote) = rig();
        let path = ParamPath::new(0, vec![9]);
        let err = on_param_edited(&mut demo, &path, 0, "1.0", &link).unwrap_err();
        assert!(matches!(err, EditError::Stale(_)));
        assert!(sent(&remote).is_empty());
    }
}
