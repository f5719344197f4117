//! The six adventurer roles and their capability table.

use serde::{Deserialize, Serialize};

/// What a role may do beyond the common rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Move, shore up and swim diagonally.
    pub diagonal: bool,
    /// Fly to any tile once per turn.
    pub flight: bool,
    /// Pass through sunk and flooded cells.
    pub dive: bool,
    /// Pass cards without sharing a tile.
    pub remote_pass: bool,
    /// Spend actions moving other adventurers.
    pub navigate: bool,
    /// Free shore-ups per turn.
    pub bonus_shore_ups: u8,
}

/// An adventurer role.
///
/// Variants are declared in numeric-identity order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Diver,
    Engineer,
    Explorer,
    Messenger,
    Navigator,
    Pilot,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Diver,
        Role::Engineer,
        Role::Explorer,
        Role::Messenger,
        Role::Navigator,
        Role::Pilot,
    ];

    /// Fixed numeric identity, independent of seating.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_id(id: u8) -> Option<Role> {
        Self::ALL.get(usize::from(id)).copied()
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Role::Diver => "Diver",
            Role::Engineer => "Engineer",
            Role::Explorer => "Explorer",
            Role::Messenger => "Messenger",
            Role::Navigator => "Navigator",
            Role::Pilot => "Pilot",
        }
    }

    #[must_use]
    pub const fn capabilities(self) -> Capabilities {
        let none = Capabilities {
            diagonal: false,
            flight: false,
            dive: false,
            remote_pass: false,
            navigate: false,
            bonus_shore_ups: 0,
        };
        match self {
            Role::Diver => Capabilities { dive: true, ..none },
            Role::Engineer => Capabilities {
                bonus_shore_ups: 1,
                ..none
            },
            Role::Explorer => Capabilities {
                diagonal: true,
                ..none
            },
            Role::Messenger => Capabilities {
                remote_pass: true,
                ..none
            },
            Role::Navigator => Capabilities {
                navigate: true,
                ..none
            },
            Role::Pilot => Capabilities { flight: true, ..none },
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
