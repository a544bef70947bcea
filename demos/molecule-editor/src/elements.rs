//! The element palette and its fixed valence caps.

use serde::{Deserialize, Serialize};

/// Elements available from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    C,
    H,
    N,
    O,
    F,
    Cl,
    Br,
}

impl Element {
    /// Toolbar order.
    pub const ALL: [Element; 7] = [
        Element::C,
        Element::H,
        Element::N,
        Element::O,
        Element::F,
        Element::Cl,
        Element::Br,
    ];

    /// Maximum number of bonds (counting multiplicity) an atom may hold.
    pub const fn max_bonds(self) -> u8 {
        match self {
            Element::C => 4,
            Element::N => 3,
            Element::O => 2,
            Element::H | Element::F | Element::Cl | Element::Br => 1,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Element::C => "C",
            Element::H => "H",
            Element::N => "N",
            Element::O => "O",
            Element::F => "F",
            Element::Cl => "Cl",
            Element::Br => "Br",
        }
    }

    /// Element at a toolbar position, the wire code for host spawn requests.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}
