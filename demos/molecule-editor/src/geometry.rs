//! Bond line geometry.
//!
//! Pure functions: every frame the renderer asks for fresh segments from the
//! current atom positions, nothing is cached.

use glam::Vec2;

use crate::molecule::{Bond, Molecule};

/// Offset of each line of a double bond from the atom axis.
pub const DOUBLE_OFFSET: f32 = 5.0;
/// Offset of the outer lines of a triple bond from the atom axis.
pub const TRIPLE_OFFSET: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
}

impl Segment {
    pub fn new(from: Vec2, to: Vec2) -> Self {
        Self { from, to }
    }

    fn shifted(self, offset: Vec2) -> Self {
        Self::new(self.from + offset, self.to + offset)
    }
}

/// Unit vector perpendicular to `a -> b`: `((b.y - a.y) / d, (a.x - b.x) / d)`.
///
/// Coincident atoms have no axis; this returns zero so the offset lines fall
/// onto the center line instead of producing NaN coordinates.
pub fn perpendicular(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new(b.y - a.y, a.x - b.x).normalize_or_zero()
}

/// Line segments for one bond of the given multiplicity.
///
/// - 1: the center line.
/// - 2: two lines at `±DOUBLE_OFFSET`.
/// - 3: the center line plus two lines at `±TRIPLE_OFFSET`.
///
/// Multiplicities outside 1..=3 draw nothing.
pub fn bond_segments(a: Vec2, b: Vec2, multiplicity: u8) -> Vec<Segment> {
    let center = Segment::new(a, b);
    let n = perpendicular(a, b);

    match multiplicity {
        1 => vec![center],
        2 => vec![
            center.shifted(n * DOUBLE_OFFSET),
            center.shifted(-n * DOUBLE_OFFSET),
        ],
        3 => vec![
            center,
            center.shifted(n * TRIPLE_OFFSET),
            center.shifted(-n * TRIPLE_OFFSET),
        ],
        _ => Vec::new(),
    }
}

/// Segments for a stored bond, or nothing if either endpoint is missing.
pub fn segments_for(molecule: &Molecule, bond: &Bond) -> Vec<Segment> {
    match (molecule.atom(bond.key.first()), molecule.atom(bond.key.second())) {
        (Some(a), Some(b)) => bond_segments(a.pos, b.pos, bond.multiplicity),
        _ => Vec::new(),
    }
}

/// Every segment of every bond, in bond creation order.
pub fn molecule_segments(molecule: &Molecule) -> Vec<Segment> {
    molecule
        .bonds()
        .iter()
        .flat_map(|bond| segments_for(molecule, bond))
        .collect()
}
