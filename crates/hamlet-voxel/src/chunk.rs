//! Palette-compressed storage for a 32×32×32 block volume.
//!
//! Each chunk keeps a palette of the distinct [`BlockState`]s it contains and
//! one palette index per voxel. A uniform chunk stores no indices at all.

use serde::{Deserialize, Serialize};

use crate::registry::BlockType;
use crate::side::SideSet;

/// Side length of a chunk in voxels.
pub const CHUNK_SIZE: usize = 32;

/// Total number of voxels in a chunk (32³).
pub const CHUNK_VOLUME: usize = CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE;

/// Everything stored for a single voxel: its type and its face flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockState {
    pub block: BlockType,
    pub sides: SideSet,
}

impl BlockState {
    pub const AIR: BlockState = BlockState {
        block: BlockType::AIR,
        sides: SideSet::EMPTY,
    };

    pub fn new(block: BlockType, sides: SideSet) -> Self {
        Self { block, sides }
    }
}

/// Palette-compressed block storage for one chunk.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlockChunk {
    palette: Vec<BlockState>,
    /// Empty while the chunk is uniform, otherwise `CHUNK_VOLUME` entries.
    indices: Vec<u16>,
}

impl BlockChunk {
    /// Creates a chunk filled entirely with `fill`.
    pub fn new(fill: BlockState) -> Self {
        Self {
            palette: vec![fill],
            indices: Vec::new(),
        }
    }

    pub fn new_air() -> Self {
        Self::new(BlockState::AIR)
    }

    /// Returns the state at local position `(x, y, z)`; each coordinate must
    /// be in `0..32`.
    pub fn get(&self, x: usize, y: usize, z: usize) -> BlockState {
        if self.indices.is_empty() {
            return self.palette[0];
        }
        self.palette[self.indices[Self::linear_index(x, y, z)] as usize]
    }

    /// Sets the state at local position `(x, y, z)`.
    ///
    /// Returns `true` if the stored state changed.
    pub fn set(&mut self, x: usize, y: usize, z: usize, state: BlockState) -> bool {
        if self.get(x, y, z) == state {
            return false;
        }
        let palette_idx = self.palette_index_or_insert(state);
        if self.indices.is_empty() {
            self.indices = vec![0; CHUNK_VOLUME];
        }
        self.indices[Self::linear_index(x, y, z)] = palette_idx;
        true
    }

    /// Resets the chunk to a uniform fill.
    pub fn fill(&mut self, state: BlockState) {
        self.palette = vec![state];
        self.indices = Vec::new();
    }

    pub fn palette(&self) -> &[BlockState] {
        &self.palette
    }

    pub fn palette_len(&self) -> usize {
        self.palette.len()
    }

    pub fn is_uniform(&self) -> bool {
        self.indices.is_empty()
    }

    /// Counts voxels whose block is not air.
    pub fn count_solid(&self) -> usize {
        if self.indices.is_empty() {
            return if self.palette[0].block.is_air() {
                0
            } else {
                CHUNK_VOLUME
            };
        }
        self.indices
            .iter()
            .filter(|&&i| !self.palette[i as usize].block.is_air())
            .count()
    }

    /// Drops palette entries no voxel refers to and collapses the chunk back
    /// to uniform storage when a single state remains.
    pub fn compact(&mut self) {
        if self.indices.is_empty() {
            return;
        }

        let mut used = vec![false; self.palette.len()];
        for &i in &self.indices {
            used[i as usize] = true;
        }

        let mut remap = vec![0u16; self.palette.len()];
        let mut palette = Vec::new();
        for (old, _) in used.iter().enumerate().filter(|(_, u)| **u) {
            remap[old] = palette.len() as u16;
            palette.push(self.palette[old]);
        }

        if palette.len() == 1 {
            self.fill(palette[0]);
            return;
        }
        for i in &mut self.indices {
            *i = remap[*i as usize];
        }
        self.palette = palette;
    }

    /// `x` varies fastest.
    fn linear_index(x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < CHUNK_SIZE && y < CHUNK_SIZE && z < CHUNK_SIZE);
        x + y * CHUNK_SIZE + z * CHUNK_SIZE * CHUNK_SIZE
    }

    fn palette_index_or_insert(&mut self, state: BlockState) -> u16 {
        if let Some(idx) = self.palette.iter().position(|&s| s == state) {
            return idx as u16;
        }
        // At most CHUNK_VOLUME states can be in use at once, so compacting
        // always brings the palette back under the u16 index range.
        if self.palette.len() > u16::MAX as usize {
            self.compact();
        }
        self.palette.push(state);
        (self.palette.len() - 1) as u16
    }
}

impl Default for BlockChunk {
    fn default() -> Self {
        Self::new_air()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::side::Side;

    fn stone() -> BlockState {
        BlockState::new(BlockType(1), SideSet::EMPTY)
    }

    #[test]
    fn test_new_chunk_is_uniform_air() {
        let chunk = BlockChunk::new_air();
        assert!(chunk.is_uniform());
        assert_eq!(chunk.get(31, 31, 31), BlockState::AIR);
        assert_eq!(chunk.count_solid(), 0);
    }

    #[test]
    fn test_set_grows_palette() {
        let mut chunk = BlockChunk::new_air();
        assert!(chunk.set(1, 2, 3, stone()));
        assert_eq!(chunk.palette_len(), 2);
        assert_eq!(chunk.get(1, 2, 3), stone());
        assert_eq!(chunk.get(3, 2, 1), BlockState::AIR);
        assert_eq!(chunk.count_solid(), 1);
    }

    #[test]
    fn test_face_flags_are_distinct_states() {
        let mut chunk = BlockChunk::new_air();
        let facing = BlockState::new(BlockType(1), SideSet::of(Side::Front));
        chunk.set(0, 0, 0, stone());
        chunk.set(1, 0, 0, facing);
        assert_eq!(chunk.palette_len(), 3);
        assert_eq!(chunk.get(1, 0, 0).sides, SideSet::of(Side::Front));
    }

    #[test]
    fn test_same_state_write_reports_no_change() {
        let mut chunk = BlockChunk::new_air();
        assert!(chunk.set(4, 4, 4, stone()));
        assert!(!chunk.set(4, 4, 4, stone()));
        assert!(!chunk.set(5, 5, 5, BlockState::AIR));
    }

    #[test]
    fn test_compact_collapses_to_uniform() {
        let mut chunk = BlockChunk::new_air();
        chunk.set(5, 5, 5, stone());
        chunk.set(5, 5, 5, BlockState::AIR);
        chunk.compact();
        assert!(chunk.is_uniform());
        assert_eq!(chunk.palette_len(), 1);
        assert_eq!(chunk.get(5, 5, 5), BlockState::AIR);
    }

    #[test]
    fn test_compact_keeps_used_entries() {
        let mut chunk = BlockChunk::new_air();
        let tiles = BlockState::new(BlockType(2), SideSet::EMPTY);
        chunk.set(0, 0, 0, stone());
        chunk.set(1, 0, 0, tiles);
        chunk.set(0, 0, 0, BlockState::AIR);
        chunk.compact();
        assert_eq!(chunk.palette(), &[BlockState::AIR, tiles]);
        assert_eq!(chunk.get(1, 0, 0), tiles);
    }

    #[test]
    fn test_fill_resets_storage() {
        let mut chunk = BlockChunk::new_air();
        chunk.set(0, 0, 0, stone());
        chunk.fill(stone());
        assert!(chunk.is_uniform());
        assert_eq!(chunk.count_solid(), CHUNK_VOLUME);
    }
}
