//! Pointer handling and the move / bond-select cursor modes.
//!
//! One controller sees every pointer event. It owns the transient UI state
//! (mode, pending selection, drag target, hover) and reports what the editor
//! should do as an `InteractionResult`; it never touches the molecule itself.

use glam::Vec2;

use crate::elements::Element;
use crate::molecule::AtomId;
use crate::toolbar::ButtonKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMode {
    /// Pressing an atom drags it.
    Move,
    /// Tapping atoms picks bond endpoints.
    BondSelect,
}

/// What is under the pointer, front-most first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Button(ButtonKind),
    Atom(AtomId),
}

/// Result of processing a pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionResult {
    None,
    SpawnAtom { element: Element },
    MoveAtom { atom: AtomId, pos: Vec2 },
    CreateBond { from: AtomId, to: AtomId },
    ModeChanged(CursorMode),
}

pub struct InteractionSystem {
    mode: CursorMode,
    /// Pending first endpoint while in bond-select mode.
    selected: Option<AtomId>,
    /// Atom following the pointer while in move mode.
    drag: Option<AtomId>,
    /// Target the pointer went down on; a release over the same target is a tap.
    pressed: Option<Target>,
    hovered: Option<Target>,
}

impl InteractionSystem {
    pub fn new() -> Self {
        Self {
            mode: CursorMode::Move,
            selected: None,
            drag: None,
            pressed: None,
            hovered: None,
        }
    }

    pub fn mode(&self) -> CursorMode {
        self.mode
    }

    pub fn selected(&self) -> Option<AtomId> {
        self.selected
    }

    pub fn dragging(&self) -> Option<AtomId> {
        self.drag
    }

    pub fn hovered(&self) -> Option<Target> {
        self.hovered
    }

    /// Whether an atom should wear the highlight tint: hovered, mid-drag,
    /// or waiting as the first bond endpoint.
    pub fn is_atom_highlighted(&self, atom: AtomId) -> bool {
        self.hovered == Some(Target::Atom(atom))
            || self.drag == Some(atom)
            || self.selected == Some(atom)
    }

    /// Whether a button should wear the highlight tint. The bond toggle stays
    /// lit for as long as bond mode is active.
    pub fn is_button_highlighted(&self, button: ButtonKind) -> bool {
        self.hovered == Some(Target::Button(button))
            || (button == ButtonKind::BondMode && self.mode == CursorMode::BondSelect)
    }

    pub fn on_pointer_down(&mut self, hit: Option<Target>) -> InteractionResult {
        self.hovered = hit;
        self.pressed = hit;

        if let (CursorMode::Move, Some(Target::Atom(atom))) = (self.mode, hit) {
            log::debug!("drag start {:?}", atom);
            self.drag = Some(atom);
        }
        InteractionResult::None
    }

    /// Track the pointer. While dragging, the atom follows it with `y` capped
    /// at `max_y` so it stays above the toolbar.
    pub fn on_pointer_move(&mut self, pos: Vec2, hit: Option<Target>, max_y: f32) -> InteractionResult {
        self.hovered = hit;

        match self.drag {
            Some(atom) => InteractionResult::MoveAtom {
                atom,
                pos: Vec2::new(pos.x, pos.y.min(max_y)),
            },
            None => InteractionResult::None,
        }
    }

    pub fn on_pointer_up(&mut self, hit: Option<Target>) -> InteractionResult {
        self.hovered = hit;
        self.end_drag();

        let pressed = self.pressed.take();
        match hit {
            Some(target) if pressed == Some(target) => self.tap(target),
            _ => InteractionResult::None,
        }
    }

    /// Release outside the canvas: ends any drag, never counts as a tap.
    pub fn on_pointer_up_outside(&mut self) -> InteractionResult {
        self.end_drag();
        self.pressed = None;
        self.hovered = None;
        InteractionResult::None
    }

    fn end_drag(&mut self) {
        if let Some(atom) = self.drag.take() {
            log::debug!("drag end {:?}", atom);
        }
    }

    /// Activate a target directly (press and release on the same thing).
    pub fn tap(&mut self, target: Target) -> InteractionResult {
        match target {
            Target::Button(ButtonKind::Spawn(element)) => InteractionResult::SpawnAtom { element },
            Target::Button(ButtonKind::BondMode) => self.toggle_bond_mode(),
            Target::Atom(atom) => self.tap_atom(atom),
        }
    }

    fn tap_atom(&mut self, atom: AtomId) -> InteractionResult {
        if self.mode != CursorMode::BondSelect {
            return InteractionResult::None;
        }

        match self.selected {
            None => {
                self.selected = Some(atom);
                InteractionResult::None
            }
            Some(pending) if pending == atom => {
                self.selected = None;
                InteractionResult::None
            }
            Some(pending) => {
                self.selected = None;
                InteractionResult::CreateBond { from: pending, to: atom }
            }
        }
    }

    /// Flip between move and bond-select. Any pending selection is dropped.
    pub fn toggle_bond_mode(&mut self) -> InteractionResult {
        self.selected = None;
        self.mode = match self.mode {
            CursorMode::Move => CursorMode::BondSelect,
            CursorMode::BondSelect => CursorMode::Move,
        };
        log::debug!("cursor mode {:?}", self.mode);
        InteractionResult::ModeChanged(self.mode)
    }

    /// Back to a fresh move-mode controller.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for InteractionSystem {
    fn default() -> Self {
        Self::new()
    }
}
