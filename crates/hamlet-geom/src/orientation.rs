use std::fmt;

use glam::IVec2;

/// One of the four cardinal directions on the horizontal grid.
///
/// The grid uses `x` growing east and `z` growing south, so North points
/// towards decreasing `z`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    North,
    East,
    South,
    West,
}

impl Orientation {
    /// All orientations in clockwise order starting at North.
    pub const ALL: [Orientation; 4] = [
        Orientation::North,
        Orientation::East,
        Orientation::South,
        Orientation::West,
    ];

    /// Unit step on the `(x, z)` grid pointing in this direction.
    pub fn direction(self) -> IVec2 {
        match self {
            Orientation::North => IVec2::new(0, -1),
            Orientation::East => IVec2::new(1, 0),
            Orientation::South => IVec2::new(0, 1),
            Orientation::West => IVec2::new(-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Orientation::North => Orientation::South,
            Orientation::East => Orientation::West,
            Orientation::South => Orientation::North,
            Orientation::West => Orientation::East,
        }
    }

    /// Rotates a quarter turn clockwise.
    pub fn rotate_cw(self) -> Self {
        match self {
            Orientation::North => Orientation::East,
            Orientation::East => Orientation::South,
            Orientation::South => Orientation::West,
            Orientation::West => Orientation::North,
        }
    }

    /// Returns `true` for East and West.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Orientation::East | Orientation::West)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Orientation::North => "north",
            Orientation::East => "east",
            Orientation::South => "south",
            Orientation::West => "west",
        };
        f.write_str(name)
    }
}
