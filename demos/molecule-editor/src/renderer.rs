//! Turns editor state into the frame's vector triangles and text labels.
//!
//! Paint order is background, bonds, atoms, toolbar, matching the hit-test
//! order in reverse. Labels sit above all geometry on the host, so their order
//! only matters for the label cap: toolbar labels go first and are never cut.

use glam::Vec2;
use kekule_engine::{EngineContext, VectorColor};

use crate::config::EditorConfig;
use crate::geometry::molecule_segments;
use crate::interaction::InteractionSystem;
use crate::molecule::Molecule;
use crate::toolbar::Toolbar;

/// Resolved colors and sizes for one frame.
pub struct MoleculeRenderer {
    background: VectorColor,
    atom_fill: VectorColor,
    button_fill: VectorColor,
    highlight: VectorColor,
    bond_color: VectorColor,
    atom_radius: f32,
    atom_font_size: f32,
    bond_width: f32,
}

impl MoleculeRenderer {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            background: VectorColor::from_hex(config.background),
            atom_fill: VectorColor::from_hex(config.atom_fill),
            button_fill: VectorColor::from_hex(config.button_fill),
            highlight: VectorColor::from_hex(config.highlight),
            bond_color: VectorColor::from_hex(config.bond_color),
            atom_radius: config.atom_radius,
            atom_font_size: config.atom_font_size,
            bond_width: config.bond_width,
        }
    }

    fn tint(&self, base: VectorColor, highlighted: bool) -> VectorColor {
        if highlighted {
            base.tinted(self.highlight)
        } else {
            base
        }
    }

    /// Draw the whole scene. Bonds are rebuilt from current atom positions.
    pub fn draw(
        &self,
        ctx: &mut EngineContext,
        canvas: Vec2,
        molecule: &Molecule,
        interaction: &InteractionSystem,
        toolbar: &Toolbar,
    ) {
        for button in toolbar.buttons() {
            ctx.labels.push(button.label.as_str(), button.center(), button.font_size);
        }

        ctx.vectors.fill_rect(Vec2::ZERO, canvas.x, canvas.y, self.background);

        for seg in molecule_segments(molecule) {
            ctx.vectors.stroke_segment(seg.from, seg.to, self.bond_width, self.bond_color);
        }

        for atom in molecule.atoms() {
            let fill = self.tint(self.atom_fill, interaction.is_atom_highlighted(atom.id));
            ctx.vectors.fill_circle(atom.pos, self.atom_radius, fill);
            ctx.labels.push(atom.element.symbol(), atom.pos, self.atom_font_size);
        }

        for button in toolbar.buttons() {
            let fill = self.tint(self.button_fill, interaction.is_button_highlighted(button.kind));
            ctx.vectors.fill_rect(button.pos, button.size.x, button.size.y, fill);
        }
    }
}
