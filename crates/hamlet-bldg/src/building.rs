//! Building models and the primitives rasterizers consume.

use hamlet_geom::{IVec2, Orientation, Rect2i, round_half_up};

use crate::deco::Decoration;
use crate::roof::Roof;

/// A rectangular storey block with walls of one height and a roof on top.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BuildingPart {
    footprint: Rect2i,
    floor_height: i32,
    wall_height: i32,
    roof: Roof,
}

impl BuildingPart {
    pub fn new(footprint: Rect2i, floor_height: i32, wall_height: i32, roof: Roof) -> Self {
        Self {
            footprint,
            floor_height,
            wall_height,
            roof,
        }
    }

    /// Cells enclosed by (and including) the walls.
    pub fn footprint(&self) -> Rect2i {
        self.footprint
    }

    /// y of the floor blocks.
    pub fn floor_height(&self) -> i32 {
        self.floor_height
    }

    /// Number of wall blocks stacked on the floor.
    pub fn wall_height(&self) -> i32 {
        self.wall_height
    }

    pub fn roof(&self) -> &Roof {
        &self.roof
    }

    /// y of the topmost wall block.
    pub fn top_height(&self) -> i32 {
        self.floor_height + self.wall_height
    }

    /// Cell of the door in the wall facing `orientation`: the midpoint of
    /// that wall, rounded half-up.
    pub fn door_position(&self, orientation: Orientation) -> IVec2 {
        round_half_up(self.footprint.edge(orientation).midpoint())
    }
}

/// A generated building. Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Building {
    orientation: Orientation,
    parts: Vec<BuildingPart>,
    decorations: Vec<Decoration>,
}

impl Building {
    pub fn new(
        orientation: Orientation,
        parts: Vec<BuildingPart>,
        decorations: Vec<Decoration>,
    ) -> Self {
        Self {
            orientation,
            parts,
            decorations,
        }
    }

    /// Direction the entrance faces.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn parts(&self) -> &[BuildingPart] {
        &self.parts
    }

    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    /// All primitives in drawing order: each part's walls then its roof,
    /// followed by the decorations.
    pub fn primitives(&self) -> impl Iterator<Item = Primitive<'_>> {
        let orientation = self.orientation;
        self.parts
            .iter()
            .flat_map(move |part| {
                [
                    Primitive::Walls { part, orientation },
                    Primitive::Roof(part.roof()),
                ]
            })
            .chain(self.decorations.iter().map(Primitive::Decoration))
    }
}

/// One piece of geometry a rasterizer knows how to draw.
#[derive(Clone, Copy, Debug)]
pub enum Primitive<'a> {
    /// Foundation, floor and walls of a part, with the door facing `orientation`.
    Walls {
        part: &'a BuildingPart,
        orientation: Orientation,
    },
    Roof(&'a Roof),
    Decoration(&'a Decoration),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deco::SingleBlockDecoration;
    use crate::roof::FlatRoof;
    use hamlet_geom::IVec3;
    use hamlet_voxel::BlockType;

    fn part() -> BuildingPart {
        let footprint = Rect2i::from_min_max(IVec2::new(2, 2), IVec2::new(7, 7));
        let roof = FlatRoof::new(footprint.expand(1, 1).unwrap(), 13, 0);
        BuildingPart::new(footprint, 10, 3, roof.into())
    }

    #[test]
    fn test_door_on_facing_wall() {
        let p = part();
        // 2..=7 has midpoint 4.5, rounded up to 5.
        assert_eq!(p.door_position(Orientation::South), IVec2::new(5, 7));
        assert_eq!(p.door_position(Orientation::West), IVec2::new(2, 5));
        assert_eq!(p.top_height(), 13);
    }

    #[test]
    fn test_primitives_walk_parts_then_decorations() {
        let deco = Decoration::SingleBlock(SingleBlockDecoration {
            pos: IVec3::new(3, 11, 3),
            block: BlockType(1),
            side: None,
        });
        let building = Building::new(Orientation::North, vec![part(), part()], vec![deco]);
        let kinds: Vec<&str> = building
            .primitives()
            .map(|p| match p {
                Primitive::Walls { .. } => "walls",
                Primitive::Roof(_) => "roof",
                Primitive::Decoration(_) => "deco",
            })
            .collect();
        assert_eq!(kinds, ["walls", "roof", "walls", "roof", "deco"]);
    }
}
