pub mod api;
pub mod core;
pub mod systems;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{GameEvent, ConfigError};
pub use core::rng::Rng;
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::ProtocolLayout;
pub use systems::vector::{VectorState, VectorVertex, VectorColor};
pub use systems::labels::{Label, LabelBuffer};
