//! Bottom button row: one spawn button per element plus the bond-mode toggle.

use glam::Vec2;

use crate::elements::Element;

const ELEMENT_BUTTON_X: f32 = 50.0;
const ELEMENT_BUTTON_W: f32 = 100.0;
const BOND_BUTTON_W: f32 = 200.0;
/// Gap between the bond button's right edge and the canvas edge.
const BOND_BUTTON_MARGIN: f32 = 50.0;
const BUTTON_H: f32 = 50.0;
const ELEMENT_FONT: f32 = 40.0;
const BOND_FONT: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    Spawn(Element),
    BondMode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub kind: ButtonKind,
    /// Top-left corner.
    pub pos: Vec2,
    pub size: Vec2,
    pub label: String,
    pub font_size: f32,
}

impl Button {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.pos.x
            && p.x <= self.pos.x + self.size.x
            && p.y >= self.pos.y
            && p.y <= self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

#[derive(Debug, Clone)]
pub struct Toolbar {
    buttons: Vec<Button>,
}

impl Toolbar {
    /// Lay the row out along the bottom edge of a `width` x `height` canvas.
    pub fn layout(palette: &[Element], width: f32, height: f32) -> Self {
        let y = height - BUTTON_H;
        let mut buttons: Vec<Button> = palette
            .iter()
            .enumerate()
            .map(|(i, element)| Button {
                kind: ButtonKind::Spawn(*element),
                pos: Vec2::new(ELEMENT_BUTTON_X + ELEMENT_BUTTON_W * i as f32, y),
                size: Vec2::new(ELEMENT_BUTTON_W, BUTTON_H),
                label: element.symbol().to_owned(),
                font_size: ELEMENT_FONT,
            })
            .collect();

        buttons.push(Button {
            kind: ButtonKind::BondMode,
            pos: Vec2::new(width - BOND_BUTTON_W - BOND_BUTTON_MARGIN, y),
            size: Vec2::new(BOND_BUTTON_W, BUTTON_H),
            label: "Add Bond".to_owned(),
            font_size: BOND_FONT,
        });

        Self { buttons }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Topmost button under `p`. Later buttons are drawn over earlier ones.
    pub fn hit_test(&self, p: Vec2) -> Option<ButtonKind> {
        self.buttons.iter().rev().find(|b| b.contains(p)).map(|b| b.kind)
    }
}
