//! Text labels for the host to draw on top of the vector layer.
//!
//! Glyph rendering stays on the host side (canvas `fillText`); Rust only
//! decides what text goes where. The buffer is serialized to JSON once per frame.

use glam::Vec2;
use serde::Serialize;

/// A single centered text label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: String,
    /// Center of the label in world space.
    pub x: f32,
    pub y: f32,
    /// Font size in world units.
    pub size: f32,
}

/// Per-frame list of labels, in draw order.
#[derive(Debug, Default)]
pub struct LabelBuffer {
    labels: Vec<Label>,
}

impl LabelBuffer {
    pub fn new() -> Self {
        Self {
            labels: Vec::with_capacity(64),
        }
    }

    /// Queue a label centered at `center`.
    pub fn push(&mut self, text: impl Into<String>, center: Vec2, size: f32) {
        self.labels.push(Label {
            text: text.into(),
            x: center.x,
            y: center.y,
            size,
        });
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }

    /// Serialize at most `max` labels as a JSON array.
    pub fn to_json(&self, max: usize) -> String {
        let shown = &self.labels[..self.labels.len().min(max)];
        // Serializing plain strings and floats cannot fail.
        serde_json::to_string(shown).unwrap_or_else(|_| "[]".to_owned())
    }
}
