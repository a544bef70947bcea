//! Output buffer layout shared with the host page.
//!
//! The host reads each section through its own pointer accessor, but sizes
//! its typed-array views from these capacities:
//! ```text
//! [Vectors: max_vector_vertices × 6 floats]   x, y, r, g, b, a
//! [Events:  max_events × 4 floats]            kind, a, b, c
//! ```
//! Labels travel separately as JSON and are only capped by count.

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::systems::vector::VectorVertex;

/// Protocol version reported to the host.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Runtime-computed section sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_vector_vertices: usize,
    pub max_events: usize,
    pub max_labels: usize,

    /// Size of vector data section in floats.
    pub vector_data_floats: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,
}

impl ProtocolLayout {
    pub fn new(max_vector_vertices: usize, max_events: usize, max_labels: usize) -> Self {
        let vector_data_floats = max_vector_vertices * VectorVertex::FLOATS;
        let event_data_floats = max_events * GameEvent::FLOATS;

        Self {
            max_vector_vertices,
            max_events,
            max_labels,
            vector_data_floats,
            event_data_floats,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_vector_vertices, config.max_events, config.max_labels)
    }

    /// Clamp a produced vertex count to capacity.
    pub fn clamp_vertices(&self, count: usize) -> usize {
        count.min(self.max_vector_vertices)
    }

    /// Clamp a produced event count to capacity.
    pub fn clamp_events(&self, count: usize) -> usize {
        count.min(self.max_events)
    }
}
