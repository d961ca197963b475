//! Small positioned features attached to a building.

use hamlet_geom::IVec3;
use hamlet_voxel::{BlockType, Side};

use crate::error::ModelError;

/// A vertical stack of blocks, bottom first, each with an optional facing.
///
/// Invariant: one facing entry per block and at least one block.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColumnDecoration {
    base_pos: IVec3,
    blocks: Vec<BlockType>,
    sides: Vec<Option<Side>>,
}

impl ColumnDecoration {
    /// # Errors
    ///
    /// [`ModelError::DecorationLength`] if `blocks` and `sides` differ in
    /// length, [`ModelError::EmptyDecoration`] if both are empty.
    pub fn new(
        blocks: Vec<BlockType>,
        sides: Vec<Option<Side>>,
        base_pos: IVec3,
    ) -> Result<Self, ModelError> {
        if blocks.len() != sides.len() {
            return Err(ModelError::DecorationLength {
                blocks: blocks.len(),
                sides: sides.len(),
            });
        }
        if blocks.is_empty() {
            return Err(ModelError::EmptyDecoration);
        }
        Ok(Self {
            base_pos,
            blocks,
            sides,
        })
    }

    pub fn base_pos(&self) -> IVec3 {
        self.base_pos
    }

    /// Number of blocks in the stack.
    pub fn height(&self) -> usize {
        self.blocks.len()
    }

    /// `(block, facing)` pairs from the bottom up.
    pub fn elements(&self) -> impl Iterator<Item = (BlockType, Option<Side>)> + '_ {
        self.blocks.iter().copied().zip(self.sides.iter().copied())
    }
}

/// One block placed at a fixed position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SingleBlockDecoration {
    pub pos: IVec3,
    pub block: BlockType,
    pub side: Option<Side>,
}

/// Any decoration a building can carry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Decoration {
    Column(ColumnDecoration),
    SingleBlock(SingleBlockDecoration),
}

impl Decoration {
    /// Position of the lowest block.
    pub fn base_pos(&self) -> IVec3 {
        match self {
            Decoration::Column(c) => c.base_pos,
            Decoration::SingleBlock(s) => s.pos,
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Decoration::Column(c) => c.height(),
            Decoration::SingleBlock(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatched_lengths_rejected() {
        let err = ColumnDecoration::new(
            vec![BlockType(1), BlockType(2)],
            vec![None],
            IVec3::ZERO,
        )
        .unwrap_err();
        assert_eq!(err, ModelError::DecorationLength { blocks: 2, sides: 1 });
    }

    #[test]
    fn test_empty_column_rejected() {
        let err = ColumnDecoration::new(Vec::new(), Vec::new(), IVec3::ZERO).unwrap_err();
        assert_eq!(err, ModelError::EmptyDecoration);
    }

    #[test]
    fn test_elements_bottom_up() {
        let column = ColumnDecoration::new(
            vec![BlockType(1), BlockType(2), BlockType(3)],
            vec![None, None, Some(Side::Front)],
            IVec3::new(4, 10, -2),
        )
        .unwrap();
        let deco = Decoration::Column(column.clone());
        assert_eq!(deco.height(), 3);
        assert_eq!(deco.base_pos(), IVec3::new(4, 10, -2));
        let elements: Vec<_> = column.elements().collect();
        assert_eq!(elements[0], (BlockType(1), None));
        assert_eq!(elements[2], (BlockType(3), Some(Side::Front)));
    }
}
