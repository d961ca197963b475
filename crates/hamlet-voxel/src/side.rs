//! Voxel face directions and compact sets of them.

use std::fmt;

use hamlet_geom::Orientation;
use serde::{Deserialize, Serialize};

/// One of the six faces of a voxel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Top,
    Bottom,
    /// Towards -x.
    Left,
    /// Towards +x.
    Right,
    /// Towards -z.
    Front,
    /// Towards +z.
    Back,
}

impl Side {
    pub const ALL: [Side; 6] = [
        Side::Top,
        Side::Bottom,
        Side::Left,
        Side::Right,
        Side::Front,
        Side::Back,
    ];

    /// The horizontal face pointing in the given cardinal direction.
    pub fn from_orientation(orientation: Orientation) -> Side {
        match orientation {
            Orientation::North => Side::Front,
            Orientation::South => Side::Back,
            Orientation::West => Side::Left,
            Orientation::East => Side::Right,
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// A set of [`Side`] flags packed into one byte.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideSet(u8);

impl SideSet {
    pub const EMPTY: SideSet = SideSet(0);

    pub fn of(side: Side) -> Self {
        SideSet(side.bit())
    }

    pub fn insert(&mut self, side: Side) {
        self.0 |= side.bit();
    }

    pub fn contains(self, side: Side) -> bool {
        self.0 & side.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Side> {
        Side::ALL.into_iter().filter(move |s| self.contains(*s))
    }
}

/// `None` means no face flags; `Some(side)` means exactly that one.
impl From<Option<Side>> for SideSet {
    fn from(side: Option<Side>) -> Self {
        side.map_or(SideSet::EMPTY, SideSet::of)
    }
}

impl FromIterator<Side> for SideSet {
    fn from_iter<I: IntoIterator<Item = Side>>(iter: I) -> Self {
        let mut set = SideSet::EMPTY;
        for side in iter {
            set.insert(side);
        }
        set
    }
}

impl fmt::Debug for SideSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_conversion() {
        assert!(SideSet::from(None).is_empty());
        let one = SideSet::from(Some(Side::Front));
        assert_eq!(one.len(), 1);
        assert!(one.contains(Side::Front));
        assert!(!one.contains(Side::Back));
    }

    #[test]
    fn test_collect_and_iter() {
        let set: SideSet = [Side::Top, Side::Left, Side::Top].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Side::Top, Side::Left]);
    }

    #[test]
    fn test_orientation_faces_are_distinct() {
        let faces: SideSet = Orientation::ALL
            .into_iter()
            .map(Side::from_orientation)
            .collect();
        assert_eq!(faces.len(), 4);
        assert!(!faces.contains(Side::Top));
    }
}
