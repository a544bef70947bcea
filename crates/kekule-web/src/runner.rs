use kekule_engine::{
    EngineContext, Game, GameConfig, GameEvent, InputEvent, InputQueue, ProtocolLayout, VectorVertex,
};

/// Generic runner that wires a `Game` to the per-frame host loop.
///
/// Each concrete app creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    /// Cached JSON for the current frame's labels.
    labels_json: String,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);

        Self {
            game,
            ctx: EngineContext::with_seed(config.seed),
            input: InputQueue::new(),
            layout,
            config,
            initialized: false,
            labels_json: String::from("[]"),
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.refresh_config();
        self.ctx = EngineContext::with_seed(self.config.seed);
        self.game.init(&mut self.ctx);
        self.initialized = true;
    }

    fn refresh_config(&mut self) {
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Forward a canvas resize to the game and pick up the new world size.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            log::warn!("ignoring resize to {}x{}", width, height);
            return;
        }
        self.game.resize(width, height);
        self.refresh_config();
    }

    /// Apply a JSON config document. On failure the previous config stays active.
    pub fn load_config(&mut self, json: &str) {
        match self.game.load_config(json) {
            Ok(()) => {
                self.refresh_config();
                log::info!("config applied");
            }
            Err(err) => log::error!("config rejected: {}", err),
        }
    }

    /// Run one frame: apply queued input, redraw, then publish outputs.
    pub fn tick(&mut self, _dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();
        self.game.update(&mut self.ctx, &self.input);
        self.input.drain();

        let vertices = self.ctx.vectors.vertex_count();
        if vertices > self.layout.max_vector_vertices {
            log::warn!(
                "vector buffer overflow: {} vertices, capacity {}",
                vertices,
                self.layout.max_vector_vertices
            );
        }
        if self.ctx.events.len() > self.layout.max_events {
            log::warn!(
                "event overflow: {} events, capacity {}",
                self.ctx.events.len(),
                self.layout.max_events
            );
        }

        self.labels_json = self.ctx.labels.to_json(self.layout.max_labels);
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Accessors for host reads ----

    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.ctx.vectors.buffer_ptr()
    }

    pub fn vector_vertex_count(&self) -> u32 {
        self.layout.clamp_vertices(self.ctx.vectors.vertex_count()) as u32
    }

    /// Vertex floats of the current frame, clamped to capacity.
    pub fn vector_floats(&self) -> &[f32] {
        let count = self.vector_vertex_count() as usize;
        &self.ctx.vectors.as_floats()[..count * VectorVertex::FLOATS]
    }

    pub fn labels_json(&self) -> &str {
        &self.labels_json
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.layout.clamp_events(self.ctx.events.len()) as u32
    }

    /// Event floats of the current frame, clamped to capacity.
    pub fn game_event_floats(&self) -> &[f32] {
        let count = self.game_events_len() as usize;
        GameEvent::as_floats(&self.ctx.events[..count])
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    pub fn max_vector_vertices(&self) -> u32 {
        self.layout.max_vector_vertices as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn max_labels(&self) -> u32 {
        self.layout.max_labels as u32
    }
}
