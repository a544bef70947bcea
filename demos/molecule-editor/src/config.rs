//! Editor tunables, loadable from JSON at runtime.
//!
//! Every field has a default, so a document only needs the keys it changes:
//! `{"highlight": 13421772, "palette": ["C", "H", "O"]}`. Documents loaded at
//! runtime patch the active config rather than the defaults.

use glam::Vec2;
use kekule_engine::ConfigError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::elements::Element;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Canvas size in world units.
    pub width: f32,
    pub height: f32,
    pub atom_radius: f32,
    pub atom_font_size: f32,
    /// Stroke width of each bond line.
    pub bond_width: f32,
    /// Preferred box for new atoms, `spawn_origin` to `spawn_origin + spawn_extent`.
    /// Trimmed to the draggable part of the canvas, see `spawn_bounds`.
    pub spawn_origin: [f32; 2],
    pub spawn_extent: [f32; 2],
    /// Dragged atoms stay at least this far above the bottom edge.
    pub toolbar_clearance: f32,
    /// Elements offered in the toolbar, left to right.
    pub palette: Vec<Element>,
    pub background: u32,
    pub atom_fill: u32,
    pub button_fill: u32,
    pub highlight: u32,
    pub bond_color: u32,
    /// RNG seed for atom placement.
    pub seed: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            atom_radius: 30.0,
            atom_font_size: 30.0,
            bond_width: 3.0,
            spawn_origin: [300.0, 300.0],
            spawn_extent: [600.0, 400.0],
            toolbar_clearance: 80.0,
            palette: Element::ALL.to_vec(),
            background: 0xEEEEEE,
            atom_fill: 0xFFFFFF,
            button_fill: 0xFBFBFB,
            highlight: 0xDDDDDD,
            bond_color: 0x000000,
            seed: 42,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a config document over the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::default().merged(json)
    }

    /// Apply the keys present in `json` on top of `self`. Absent keys keep
    /// their current values.
    pub fn merged(&self, json: &str) -> Result<Self, ConfigError> {
        let Value::Object(patch) = serde_json::from_str::<Value>(json)? else {
            return Err(ConfigError::Invalid {
                field: "document",
                reason: "expected a JSON object".to_owned(),
            });
        };

        let mut current = serde_json::to_value(self)?;
        if let Value::Object(fields) = &mut current {
            fields.extend(patch);
        }
        let config: Self = serde_json::from_value(current)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("atom_radius", self.atom_radius),
            ("atom_font_size", self.atom_font_size),
            ("bond_width", self.bond_width),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {}", value),
                });
            }
        }
        if self.palette.is_empty() {
            return Err(ConfigError::Invalid {
                field: "palette",
                reason: "needs at least one element".to_owned(),
            });
        }
        Ok(())
    }

    /// Lowest `y` a dragged atom may reach.
    pub fn max_atom_y(&self) -> f32 {
        self.height - self.toolbar_clearance
    }

    /// Corners of the box new atoms are drawn from.
    ///
    /// The configured spawn box is intersected with the region where a whole
    /// atom is visible and draggable: `[r, width - r] x [r, max_atom_y]`. An
    /// axis with no overlap falls back to the full draggable range.
    pub fn spawn_bounds(&self) -> (Vec2, Vec2) {
        let r = self.atom_radius;
        let axis = |origin: f32, extent: f32, lo: f32, hi: f32| {
            let hi = hi.max(lo);
            let (a, b) = (origin.max(lo), (origin + extent).min(hi));
            if a < b {
                (a, b)
            } else {
                (lo, hi)
            }
        };
        let (x0, x1) = axis(self.spawn_origin[0], self.spawn_extent[0], r, self.width - r);
        let (y0, y1) = axis(self.spawn_origin[1], self.spawn_extent[1], r, self.max_atom_y());
        (Vec2::new(x0, y0), Vec2::new(x1, y1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_layout() {
        let c = EditorConfig::default();
        assert_eq!(c.atom_radius, 30.0);
        assert_eq!(c.max_atom_y(), 520.0);
        assert_eq!(c.palette.len(), 7);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_document_overrides_fields() {
        let c = EditorConfig::from_json(r#"{"bond_width": 2.0, "palette": ["C", "Cl"]}"#).unwrap();
        assert_eq!(c.bond_width, 2.0);
        assert_eq!(c.palette, vec![Element::C, Element::Cl]);
        assert_eq!(c.atom_radius, 30.0);
    }

    #[test]
    fn rejects_bad_json() {
        assert!(matches!(
            EditorConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            EditorConfig::from_json(r#"{"palette": ["Xe"]}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn merge_keeps_unmentioned_fields() {
        let base = EditorConfig { width: 1200.0, height: 900.0, ..EditorConfig::default() };
        let c = base.merged(r#"{"bond_width": 2.0}"#).unwrap();
        assert_eq!(c.bond_width, 2.0);
        assert_eq!((c.width, c.height), (1200.0, 900.0));

        assert!(matches!(
            base.merged("[1, 2]"),
            Err(ConfigError::Invalid { field: "document", .. })
        ));
    }

    #[test]
    fn spawn_bounds_stay_on_default_canvas() {
        let (min, max) = EditorConfig::default().spawn_bounds();
        assert_eq!(min, Vec2::new(300.0, 300.0));
        assert_eq!(max, Vec2::new(770.0, 520.0));
    }

    #[test]
    fn spawn_bounds_fall_back_when_box_is_off_screen() {
        let small = EditorConfig { width: 400.0, height: 300.0, ..EditorConfig::default() };
        let (min, max) = small.spawn_bounds();
        assert_eq!(min, Vec2::new(300.0, 30.0));
        assert_eq!(max, Vec2::new(370.0, 220.0));

        let tiny = EditorConfig { width: 40.0, height: 40.0, ..EditorConfig::default() };
        let (min, max) = tiny.spawn_bounds();
        assert!(min.x <= max.x && min.y <= max.y);
    }

    #[test]
    fn rejects_invalid_values() {
        let err = EditorConfig::from_json(r#"{"atom_radius": -1.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "atom_radius", .. }));

        let err = EditorConfig::from_json(r#"{"palette": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "palette", .. }));
    }
}
