//! Molecule editor - thin controller layer.
//!
//! Routes input to the interaction system, applies its results to the
//! molecule, then redraws the whole scene.

use glam::Vec2;
use kekule_engine::api::game::GameConfig;
use kekule_engine::input::queue::{InputEvent, InputQueue};
use kekule_engine::{ConfigError, EngineContext, Game, GameEvent};

use crate::config::EditorConfig;
use crate::elements::Element;
use crate::interaction::{CursorMode, InteractionResult, InteractionSystem, Target};
use crate::molecule::{AtomId, Molecule};
use crate::renderer::MoleculeRenderer;
use crate::toolbar::Toolbar;

/// Custom event kinds from the host UI.
pub mod events {
    /// a = element index in toolbar order.
    pub const SPAWN_ATOM: u32 = 1;
    pub const TOGGLE_BOND_MODE: u32 = 2;
    pub const CLEAR: u32 = 3;
}

/// Game event kinds to the host.
pub mod game_events {
    pub const ATOM_COUNT: f32 = 1.0;
    pub const BOND_COUNT: f32 = 2.0;
    /// a = 0 move, 1 bond-select.
    pub const MODE: f32 = 3.0;
    /// a = reason code of a rejected bond.
    pub const NOTICE: f32 = 4.0;
}

pub struct MoleculeSketch {
    config: EditorConfig,
    molecule: Molecule,
    interaction: InteractionSystem,
    toolbar: Toolbar,
    renderer: MoleculeRenderer,
    /// Rejection codes raised this frame, flushed as notice events.
    notices: Vec<u32>,
}

impl MoleculeSketch {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            toolbar: Toolbar::layout(&config.palette, config.width, config.height),
            renderer: MoleculeRenderer::new(&config),
            molecule: Molecule::new(),
            interaction: InteractionSystem::new(),
            notices: Vec::new(),
            config,
        }
    }

    pub fn molecule(&self) -> &Molecule {
        &self.molecule
    }

    pub fn interaction(&self) -> &InteractionSystem {
        &self.interaction
    }

    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    pub fn editor_config(&self) -> &EditorConfig {
        &self.config
    }

    fn apply_config(&mut self, config: EditorConfig) {
        self.toolbar = Toolbar::layout(&config.palette, config.width, config.height);
        self.renderer = MoleculeRenderer::new(&config);
        self.config = config;
    }

    /// Front-most thing under `p`: toolbar first, then atoms newest to oldest.
    fn hit_test(&self, p: Vec2) -> Option<Target> {
        if let Some(button) = self.toolbar.hit_test(p) {
            return Some(Target::Button(button));
        }
        let r2 = self.config.atom_radius * self.config.atom_radius;
        self.molecule
            .atoms()
            .iter()
            .rev()
            .find(|a| a.pos.distance_squared(p) <= r2)
            .map(|a| Target::Atom(a.id))
    }

    /// Add an atom at a random spot in the on-screen part of the spawn area.
    fn spawn_atom(&mut self, ctx: &mut EngineContext, element: Element) -> AtomId {
        let (min, max) = self.config.spawn_bounds();
        let extent = max - min;
        let pos = Vec2::new(ctx.rng.range(min.x, extent.x), ctx.rng.range(min.y, extent.y));
        let id = self.molecule.add_atom(element, pos);
        log::debug!("spawned {} {:?} at {:?}", element, id, pos);
        id
    }

    fn bond(&mut self, from: AtomId, to: AtomId) {
        match self.molecule.try_bond(from, to) {
            Ok(outcome) => log::debug!("bond {:?}-{:?}: {:?}", from, to, outcome),
            Err(err) => {
                log::info!("{}", err);
                self.notices.push(err.code());
            }
        }
    }

    fn handle_custom_event(&mut self, ctx: &mut EngineContext, kind: u32, a: f32) {
        match kind {
            events::SPAWN_ATOM => match (a >= 0.0 && a.fract() == 0.0)
                .then(|| a as usize)
                .and_then(Element::from_index)
            {
                Some(element) => {
                    self.spawn_atom(ctx, element);
                }
                None => log::warn!("spawn request for unknown element index {}", a),
            },
            events::TOGGLE_BOND_MODE => {
                self.interaction.toggle_bond_mode();
            }
            events::CLEAR => {
                self.molecule.clear();
                self.interaction.reset();
            }
            _ => log::warn!("unknown custom event {}", kind),
        }
    }

    fn handle_interaction(&mut self, ctx: &mut EngineContext, result: InteractionResult) {
        match result {
            InteractionResult::SpawnAtom { element } => {
                self.spawn_atom(ctx, element);
            }
            InteractionResult::MoveAtom { atom, pos } => {
                self.molecule.set_position(atom, pos);
            }
            InteractionResult::CreateBond { from, to } => self.bond(from, to),
            InteractionResult::ModeChanged(_) | InteractionResult::None => {}
        }
    }

    fn emit_events(&mut self, ctx: &mut EngineContext) {
        ctx.emit_event(GameEvent::new(game_events::ATOM_COUNT, self.molecule.atom_count() as f32));
        ctx.emit_event(GameEvent::new(game_events::BOND_COUNT, self.molecule.bond_count() as f32));
        let mode = match self.interaction.mode() {
            CursorMode::Move => 0.0,
            CursorMode::BondSelect => 1.0,
        };
        ctx.emit_event(GameEvent::new(game_events::MODE, mode));
        for code in self.notices.drain(..) {
            ctx.emit_event(GameEvent::new(game_events::NOTICE, code as f32));
        }
    }
}

impl Game for MoleculeSketch {
    fn config(&self) -> GameConfig {
        GameConfig {
            world_width: self.config.width,
            world_height: self.config.height,
            seed: self.config.seed,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, _ctx: &mut EngineContext) {
        log::info!(
            "molecule editor ready: {}x{}, {} elements",
            self.config.width,
            self.config.height,
            self.config.palette.len()
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            let result = match *event {
                InputEvent::PointerDown { x, y } => {
                    let hit = self.hit_test(Vec2::new(x, y));
                    self.interaction.on_pointer_down(hit)
                }
                InputEvent::PointerMove { x, y } => {
                    let pos = Vec2::new(x, y);
                    let hit = self.hit_test(pos);
                    self.interaction.on_pointer_move(pos, hit, self.config.max_atom_y())
                }
                InputEvent::PointerUp { x, y } => {
                    let hit = self.hit_test(Vec2::new(x, y));
                    self.interaction.on_pointer_up(hit)
                }
                InputEvent::PointerUpOutside => self.interaction.on_pointer_up_outside(),
                InputEvent::Custom { kind, a, .. } => {
                    self.handle_custom_event(ctx, kind, a);
                    InteractionResult::None
                }
            };
            self.handle_interaction(ctx, result);
        }

        let canvas = Vec2::new(self.config.width, self.config.height);
        self.renderer
            .draw(ctx, canvas, &self.molecule, &self.interaction, &self.toolbar);

        self.emit_events(ctx);
    }

    fn resize(&mut self, width: f32, height: f32) {
        let config = EditorConfig {
            width,
            height,
            ..self.config.clone()
        };
        self.apply_config(config);
    }

    fn load_config(&mut self, json: &str) -> Result<(), ConfigError> {
        let config = self.config.merged(json)?;
        self.apply_config(config);
        Ok(())
    }
}

impl Default for MoleculeSketch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(game: &mut MoleculeSketch, ctx: &mut EngineContext, events: Vec<InputEvent>) {
        ctx.clear_frame_data();
        let input: InputQueue = events.into_iter().collect();
        game.update(ctx, &input);
    }

    fn events_of(ctx: &EngineContext, kind: f32) -> Vec<f32> {
        ctx.events.iter().filter(|e| e.kind == kind).map(|e| e.a).collect()
    }

    fn spawn(index: f32) -> InputEvent {
        InputEvent::Custom { kind: events::SPAWN_ATOM, a: index, b: 0.0, c: 0.0 }
    }

    fn assert_reachable(game: &MoleculeSketch) {
        let config = game.editor_config();
        let r = config.atom_radius;
        for atom in game.molecule().atoms() {
            let p = atom.pos;
            assert!(p.x >= r && p.x <= config.width - r, "off-canvas x: {:?}", p);
            assert!(p.y >= r && p.y <= config.max_atom_y(), "below drag limit: {:?}", p);
            assert!(!matches!(game.hit_test(p), Some(Target::Button(_))), "under toolbar: {:?}", p);
        }
    }

    #[test]
    fn spawned_atoms_are_on_canvas_and_draggable() {
        let mut game = MoleculeSketch::new();
        let mut ctx = EngineContext::new();
        frame(&mut game, &mut ctx, (0..50).map(|i| spawn((i % 7) as f32)).collect());

        assert_eq!(game.molecule().atom_count(), 50);
        assert_reachable(&game);
        assert_eq!(events_of(&ctx, game_events::ATOM_COUNT), vec![50.0]);
    }

    #[test]
    fn spawn_area_follows_resize() {
        let mut game = MoleculeSketch::new();
        let mut ctx = EngineContext::new();
        game.resize(400.0, 300.0);
        frame(&mut game, &mut ctx, (0..30).map(|_| spawn(0.0)).collect());
        assert_reachable(&game);
    }

    #[test]
    fn fractional_or_negative_spawn_index_is_ignored() {
        let mut game = MoleculeSketch::new();
        let mut ctx = EngineContext::new();
        frame(&mut game, &mut ctx, vec![spawn(1.7), spawn(-1.0), spawn(7.0), spawn(1.0)]);

        let atoms = game.molecule().atoms();
        assert_eq!(atoms.len(), 1);
        assert_eq!(atoms[0].element, Element::H);
    }

    #[test]
    fn hit_test_prefers_toolbar_then_newest_atom() {
        let mut game = MoleculeSketch::new();
        let older = game.molecule.add_atom(Element::C, Vec2::new(100.0, 100.0));
        let newer = game.molecule.add_atom(Element::H, Vec2::new(120.0, 100.0));
        game.molecule.add_atom(Element::O, Vec2::new(100.0, 560.0));

        assert_eq!(game.hit_test(Vec2::new(110.0, 100.0)), Some(Target::Atom(newer)));
        assert_eq!(game.hit_test(Vec2::new(75.0, 100.0)), Some(Target::Atom(older)));
        assert_eq!(
            game.hit_test(Vec2::new(100.0, 575.0)),
            Some(Target::Button(crate::toolbar::ButtonKind::Spawn(Element::C)))
        );
        assert_eq!(game.hit_test(Vec2::new(400.0, 300.0)), None);
    }

    #[test]
    fn rejected_bond_emits_notice() {
        let mut game = MoleculeSketch::new();
        let mut ctx = EngineContext::new();
        let h = game.molecule.add_atom(Element::H, Vec2::new(100.0, 100.0));
        let c = game.molecule.add_atom(Element::C, Vec2::new(300.0, 100.0));
        let f = game.molecule.add_atom(Element::F, Vec2::new(500.0, 100.0));
        game.molecule.try_bond(h, c).unwrap();
        game.interaction.toggle_bond_mode();

        let tap = |x: f32| [InputEvent::PointerDown { x, y: 100.0 }, InputEvent::PointerUp { x, y: 100.0 }];
        frame(&mut game, &mut ctx, tap(100.0).into_iter().chain(tap(500.0)).collect());

        assert_eq!(events_of(&ctx, game_events::NOTICE), vec![2.0]);
        assert_eq!(game.molecule().atom(f).unwrap().bonded, 0);
        assert_eq!(game.interaction().selected(), None);

        frame(&mut game, &mut ctx, Vec::new());
        assert!(events_of(&ctx, game_events::NOTICE).is_empty());
    }

    #[test]
    fn clear_resets_everything() {
        let mut game = MoleculeSketch::new();
        let mut ctx = EngineContext::new();
        game.molecule.add_atom(Element::N, Vec2::new(100.0, 100.0));
        game.interaction.toggle_bond_mode();

        frame(&mut game, &mut ctx, vec![InputEvent::Custom { kind: events::CLEAR, a: 0.0, b: 0.0, c: 0.0 }]);
        assert_eq!(game.molecule().atom_count(), 0);
        assert_eq!(game.interaction().mode(), CursorMode::Move);
        assert_eq!(events_of(&ctx, game_events::MODE), vec![0.0]);
    }

    #[test]
    fn resize_moves_toolbar_and_drag_limit() {
        let mut game = MoleculeSketch::new();
        game.resize(1200.0, 900.0);
        assert_eq!(game.config().world_height, 900.0);
        assert_eq!(game.editor_config().max_atom_y(), 820.0);
        let bond = game.toolbar().buttons().last().unwrap();
        assert_eq!(bond.pos, Vec2::new(950.0, 850.0));
    }

    #[test]
    fn load_config_keeps_previous_on_error() {
        let mut game = MoleculeSketch::new();
        assert!(game.load_config(r#"{"palette": ["C", "H"]}"#).is_ok());
        assert_eq!(game.toolbar().buttons().len(), 3);

        assert!(game.load_config(r#"{"palette": 5}"#).is_err());
        assert_eq!(game.editor_config().palette, vec![Element::C, Element::H]);
    }

    #[test]
    fn partial_config_keeps_resized_canvas() {
        let mut game = MoleculeSketch::new();
        game.resize(1200.0, 900.0);
        game.load_config(r#"{"bond_width": 2.0}"#).unwrap();

        assert_eq!(game.editor_config().bond_width, 2.0);
        assert_eq!(game.config().world_width, 1200.0);
        assert_eq!(game.config().world_height, 900.0);
        assert_eq!(game.editor_config().max_atom_y(), 820.0);
        assert_eq!(game.toolbar().buttons().last().unwrap().pos, Vec2::new(950.0, 850.0));
    }

    #[test]
    fn successive_partial_configs_accumulate() {
        let mut game = MoleculeSketch::new();
        game.load_config(r#"{"palette": ["C", "O"]}"#).unwrap();
        game.load_config(r#"{"highlight": 13421772}"#).unwrap();

        assert_eq!(game.editor_config().palette, vec![Element::C, Element::O]);
        assert_eq!(game.editor_config().highlight, 0xCCCCCC);
    }
}
