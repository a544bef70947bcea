//! Atom and bond registries plus the bond-accounting rules.
//!
//! No engine or rendering dependencies beyond `glam` positions.

use glam::Vec2;
use thiserror::Error;

use crate::elements::Element;

/// Highest bond order the editor draws.
pub const MAX_MULTIPLICITY: u8 = 3;

/// Stable handle for an atom. Issued in creation order and never reused,
/// so handle order is registry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AtomId(pub u32);

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub id: AtomId,
    pub element: Element,
    pub pos: Vec2,
    /// Sum of multiplicities of all bonds touching this atom.
    pub bonded: u8,
}

impl Atom {
    pub fn is_saturated(&self) -> bool {
        self.bonded >= self.element.max_bonds()
    }
}

/// Unordered atom pair stored in canonical order: `first < second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BondKey {
    first: AtomId,
    second: AtomId,
}

impl BondKey {
    /// Canonicalize a pair. Returns `None` for a self-pair.
    pub fn new(u: AtomId, v: AtomId) -> Option<Self> {
        match u.cmp(&v) {
            std::cmp::Ordering::Less => Some(Self { first: u, second: v }),
            std::cmp::Ordering::Greater => Some(Self { first: v, second: u }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn first(&self) -> AtomId {
        self.first
    }

    pub fn second(&self) -> AtomId {
        self.second
    }

    pub fn contains(&self, id: AtomId) -> bool {
        self.first == id || self.second == id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    pub key: BondKey,
    /// 1 = single, 2 = double, 3 = triple.
    pub multiplicity: u8,
}

/// Why a bond request changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BondError {
    #[error("cannot bond an atom to itself")]
    SameAtom,
    #[error("unknown atom {0:?}")]
    UnknownAtom(AtomId),
    #[error("bond limit reached: {element} atom {atom:?} already has {max} bonds")]
    ValenceFull { atom: AtomId, element: Element, max: u8 },
    #[error("already triple bonded")]
    AlreadyTriple,
}

impl BondError {
    /// Numeric reason code sent to the host with notice events.
    pub fn code(&self) -> u32 {
        match self {
            BondError::SameAtom => 0,
            BondError::UnknownAtom(_) => 1,
            BondError::ValenceFull { .. } => 2,
            BondError::AlreadyTriple => 3,
        }
    }
}

/// What an accepted bond request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondOutcome {
    Created,
    /// Existing bond raised to this multiplicity.
    Upgraded(u8),
}

/// Owns every atom and bond in the sketch.
#[derive(Debug, Default)]
pub struct Molecule {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    next_id: u32,
}

impl Molecule {
    pub fn new() -> Self {
        Self {
            atoms: Vec::new(),
            bonds: Vec::new(),
            next_id: 1,
        }
    }

    /// Register a new, unbonded atom and return its handle.
    pub fn add_atom(&mut self, element: Element, pos: Vec2) -> AtomId {
        let id = AtomId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        self.atoms.push(Atom {
            id,
            element,
            pos,
            bonded: 0,
        });
        id
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.iter().find(|a| a.id == id)
    }

    fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.iter_mut().find(|a| a.id == id)
    }

    /// Move an atom. Returns false if the handle is unknown.
    pub fn set_position(&mut self, id: AtomId, pos: Vec2) -> bool {
        match self.atom_mut(id) {
            Some(atom) => {
                atom.pos = pos;
                true
            }
            None => false,
        }
    }

    /// Atoms in creation order (back to front).
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Bonds in creation order.
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn bond(&self, u: AtomId, v: AtomId) -> Option<&Bond> {
        let key = BondKey::new(u, v)?;
        self.bonds.iter().find(|b| b.key == key)
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn clear(&mut self) {
        self.atoms.clear();
        self.bonds.clear();
    }

    /// Create a bond between `u` and `v`, or raise the order of the existing one.
    ///
    /// Both atoms must have a free valence slot before anything changes, so a
    /// saturated atom cannot take an upgrade either. Argument order does not matter.
    pub fn try_bond(&mut self, u: AtomId, v: AtomId) -> Result<BondOutcome, BondError> {
        let key = BondKey::new(u, v).ok_or(BondError::SameAtom)?;

        for id in [u, v] {
            let atom = self.atom(id).ok_or(BondError::UnknownAtom(id))?;
            if atom.is_saturated() {
                return Err(BondError::ValenceFull {
                    atom: id,
                    element: atom.element,
                    max: atom.element.max_bonds(),
                });
            }
        }

        let outcome = match self.bonds.iter_mut().find(|b| b.key == key) {
            Some(bond) if bond.multiplicity >= MAX_MULTIPLICITY => {
                return Err(BondError::AlreadyTriple);
            }
            Some(bond) => {
                bond.multiplicity += 1;
                BondOutcome::Upgraded(bond.multiplicity)
            }
            None => {
                self.bonds.push(Bond { key, multiplicity: 1 });
                BondOutcome::Created
            }
        };

        for id in [key.first(), key.second()] {
            if let Some(atom) = self.atom_mut(id) {
                atom.bonded += 1;
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: Element, b: Element) -> (Molecule, AtomId, AtomId) {
        let mut m = Molecule::new();
        let u = m.add_atom(a, Vec2::new(0.0, 0.0));
        let v = m.add_atom(b, Vec2::new(100.0, 0.0));
        (m, u, v)
    }

    #[test]
    fn handles_follow_creation_order() {
        let (_, u, v) = pair(Element::C, Element::O);
        assert!(u < v);
        assert_eq!(BondKey::new(v, u), BondKey::new(u, v));
        assert_eq!(BondKey::new(v, u).unwrap().first(), u);
        assert_eq!(BondKey::new(u, u), None);
    }

    #[test]
    fn first_bond_is_single() {
        let (mut m, u, v) = pair(Element::C, Element::O);
        assert_eq!(m.try_bond(u, v), Ok(BondOutcome::Created));
        assert_eq!(m.bond(u, v).unwrap().multiplicity, 1);
        assert_eq!(m.atom(u).unwrap().bonded, 1);
        assert_eq!(m.atom(v).unwrap().bonded, 1);
    }

    #[test]
    fn reversed_request_upgrades_same_record() {
        let (mut m, u, v) = pair(Element::C, Element::C);
        m.try_bond(u, v).unwrap();
        assert_eq!(m.try_bond(v, u), Ok(BondOutcome::Upgraded(2)));
        assert_eq!(m.bond_count(), 1);
        assert_eq!(m.bonds()[0].key.first(), u);
    }

    #[test]
    fn carbon_pair_caps_at_triple() {
        let (mut m, u, v) = pair(Element::C, Element::C);
        let results: Vec<_> = (0..5).map(|_| m.try_bond(u, v)).collect();

        assert_eq!(results[0], Ok(BondOutcome::Created));
        assert_eq!(results[1], Ok(BondOutcome::Upgraded(2)));
        assert_eq!(results[2], Ok(BondOutcome::Upgraded(3)));
        assert_eq!(results[3], Err(BondError::AlreadyTriple));
        assert_eq!(results[4], Err(BondError::AlreadyTriple));

        assert_eq!(m.bond_count(), 1);
        assert_eq!(m.bond(u, v).unwrap().multiplicity, 3);
        assert_eq!(m.atom(u).unwrap().bonded, 3);
        assert_eq!(m.atom(v).unwrap().bonded, 3);
    }

    #[test]
    fn hydrogen_takes_one_bond() {
        let mut m = Molecule::new();
        let h = m.add_atom(Element::H, Vec2::ZERO);
        let c1 = m.add_atom(Element::C, Vec2::ONE);
        let c2 = m.add_atom(Element::C, Vec2::new(5.0, 5.0));

        m.try_bond(h, c1).unwrap();
        assert_eq!(
            m.try_bond(c2, h),
            Err(BondError::ValenceFull { atom: h, element: Element::H, max: 1 })
        );
        // Upgrade of the existing H-C bond is refused as well.
        assert!(matches!(m.try_bond(h, c1), Err(BondError::ValenceFull { .. })));
        assert_eq!(m.atom(h).unwrap().bonded, 1);
        assert_eq!(m.atom(c2).unwrap().bonded, 0);
        assert_eq!(m.bond_count(), 1);
    }

    #[test]
    fn oxygen_double_bond_saturates() {
        let (mut m, o, c) = pair(Element::O, Element::C);
        m.try_bond(o, c).unwrap();
        m.try_bond(o, c).unwrap();
        assert!(m.atom(o).unwrap().is_saturated());
        assert!(matches!(m.try_bond(o, c), Err(BondError::ValenceFull { atom, .. }) if atom == o));
        assert_eq!(m.bond(o, c).unwrap().multiplicity, 2);
    }

    #[test]
    fn invalid_requests_change_nothing() {
        let (mut m, u, _) = pair(Element::C, Element::C);
        assert_eq!(m.try_bond(u, u), Err(BondError::SameAtom));
        assert_eq!(m.try_bond(u, AtomId(99)), Err(BondError::UnknownAtom(AtomId(99))));
        assert_eq!(m.bond_count(), 0);
        assert_eq!(m.atom(u).unwrap().bonded, 0);
    }

    #[test]
    fn no_atom_exceeds_its_cap() {
        let mut m = Molecule::new();
        let ids: Vec<AtomId> = Element::ALL
            .iter()
            .flat_map(|e| [*e, *e])
            .enumerate()
            .map(|(i, e)| m.add_atom(e, Vec2::new(i as f32 * 10.0, 0.0)))
            .collect();

        for round in 0..4 {
            for (i, u) in ids.iter().enumerate() {
                for v in ids.iter().skip(i + 1 + round % 2) {
                    let _ = m.try_bond(*u, *v);
                }
            }
        }

        for atom in m.atoms() {
            assert!(
                atom.bonded <= atom.element.max_bonds(),
                "{} has {} bonds",
                atom.element,
                atom.bonded
            );
            let from_bonds: u8 = m
                .bonds()
                .iter()
                .filter(|b| b.key.contains(atom.id))
                .map(|b| b.multiplicity)
                .sum();
            assert_eq!(from_bonds, atom.bonded);
        }
    }

    #[test]
    fn set_position_and_clear() {
        let (mut m, u, _) = pair(Element::N, Element::H);
        assert!(m.set_position(u, Vec2::new(3.0, 4.0)));
        assert_eq!(m.atom(u).unwrap().pos, Vec2::new(3.0, 4.0));
        assert!(!m.set_position(AtomId(42), Vec2::ZERO));

        m.clear();
        assert_eq!(m.atom_count(), 0);
        // Handles are not reused after a clear.
        let w = m.add_atom(Element::C, Vec2::ZERO);
        assert!(w > u);
    }
}
