use crate::api::types::{ConfigError, GameEvent};
use crate::core::rng::Rng;
use crate::input::queue::InputQueue;
use crate::systems::labels::LabelBuffer;
use crate::systems::vector::VectorState;

/// Configuration for the runtime, provided by the game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// World width in game units (one unit = one CSS pixel on the host canvas).
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Maximum number of vector vertices per frame (default: 65536).
    pub max_vector_vertices: usize,
    /// Maximum number of text labels per frame (default: 256).
    pub max_labels: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Seed for the context RNG.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,
            max_vector_vertices: 65536,
            max_labels: 256,
            max_events: 32,
            seed: 42,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return runtime configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The per-frame tick: apply queued input, then draw into `ctx`.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// The host canvas changed size.
    fn resize(&mut self, _width: f32, _height: f32) {}

    /// Apply a game-specific JSON configuration document.
    fn load_config(&mut self, _json: &str) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// Mutable access to runtime state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub vectors: VectorState,
    pub labels: LabelBuffer,
    pub events: Vec<GameEvent>,
    pub rng: Rng,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_seed(GameConfig::default().seed)
    }

    /// Create a context whose RNG starts from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            vectors: VectorState::new(),
            labels: LabelBuffer::new(),
            events: Vec::new(),
            rng: Rng::new(seed),
        }
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame output (geometry, labels, events).
    pub fn clear_frame_data(&mut self) {
        self.vectors.clear();
        self.labels.clear();
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
