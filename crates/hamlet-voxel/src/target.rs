//! The bounded voxel write surface rasterizers draw into.
//!
//! [`RasterTarget`] is the contract: a horizontal affected area, an inclusive
//! vertical window and an idempotent `set_block`. [`ChunkRasterTarget`] is the
//! chunk-backed implementation used during region generation.

use hamlet_geom::{IVec2, IVec3, Rect2i, Region3i};

use crate::chunk::{BlockChunk, BlockState, CHUNK_SIZE};
use crate::registry::BlockType;
use crate::side::SideSet;

/// A bounded surface that accepts voxel writes.
///
/// Writes outside [`affected_area`](RasterTarget::affected_area) or outside
/// `min_height..=max_height` are ignored, never reported as errors. Writing
/// the same arguments twice leaves the same state as writing them once.
pub trait RasterTarget {
    /// Horizontal cells this target accepts writes for.
    fn affected_area(&self) -> Rect2i;

    /// Lowest writable y (inclusive).
    fn min_height(&self) -> i32;

    /// Highest writable y (inclusive).
    fn max_height(&self) -> i32;

    /// Overwrites one voxel.
    fn set_block(&mut self, x: i32, y: i32, z: i32, block: BlockType, sides: SideSet);

    /// Returns true if `y` lies inside the vertical window.
    fn contains_height(&self, y: i32) -> bool {
        y >= self.min_height() && y <= self.max_height()
    }
}

/// A [`RasterTarget`] backed by one chunk of block storage.
///
/// The vertical window defaults to the chunk's own y range and can be
/// narrowed with [`with_height_window`](ChunkRasterTarget::with_height_window).
#[derive(Clone, Debug)]
pub struct ChunkRasterTarget {
    /// Chunk-grid coordinate.
    chunk_pos: IVec3,
    data: BlockChunk,
    min_height: i32,
    max_height: i32,
    /// Accepted writes, including ones that did not change state.
    writes: u64,
    /// Writes dropped for falling outside the target.
    skipped: u64,
    /// Incremented only when a write changes stored state.
    version: u64,
}

impl ChunkRasterTarget {
    /// Creates an empty (air) target for the chunk at chunk-grid
    /// coordinate `chunk_pos`.
    pub fn new(chunk_pos: IVec3) -> Self {
        let origin = chunk_pos * CHUNK_SIZE as i32;
        Self {
            chunk_pos,
            data: BlockChunk::new_air(),
            min_height: origin.y,
            max_height: origin.y + CHUNK_SIZE as i32 - 1,
            writes: 0,
            skipped: 0,
            version: 0,
        }
    }

    /// Narrows the vertical window to its overlap with the chunk's y range.
    ///
    /// A window that misses the chunk, or has `min_height > max_height`,
    /// leaves the target empty: `min_height() > max_height()` and every write
    /// is skipped.
    pub fn with_height_window(mut self, min_height: i32, max_height: i32) -> Self {
        let lo = self.origin().y;
        let hi = lo + CHUNK_SIZE as i32 - 1;
        if min_height > max_height || max_height < lo || min_height > hi {
            self.min_height = hi + 1;
            self.max_height = hi;
        } else {
            self.min_height = min_height.max(lo);
            self.max_height = max_height.min(hi);
        }
        self
    }

    pub fn chunk_pos(&self) -> IVec3 {
        self.chunk_pos
    }

    /// World coordinate of the chunk's minimum corner.
    pub fn origin(&self) -> IVec3 {
        self.chunk_pos * CHUNK_SIZE as i32
    }

    /// The world region covered by this chunk.
    pub fn region(&self) -> Region3i {
        Region3i::from_min_size(self.origin(), IVec3::splat(CHUNK_SIZE as i32))
            .unwrap_or_else(|| unreachable!("chunk size is positive"))
    }

    /// Returns the state at a world position, or air outside the chunk.
    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockState {
        match self.local(IVec3::new(x, y, z)) {
            Some((lx, ly, lz)) => self.data.get(lx, ly, lz),
            None => BlockState::AIR,
        }
    }

    pub fn data(&self) -> &BlockChunk {
        &self.data
    }

    /// Consumes the target and returns its storage.
    pub fn into_data(self) -> BlockChunk {
        self.data
    }

    pub fn write_count(&self) -> u64 {
        self.writes
    }

    pub fn skipped_count(&self) -> u64 {
        self.skipped
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    fn local(&self, p: IVec3) -> Option<(usize, usize, usize)> {
        let l = p - self.origin();
        let size = CHUNK_SIZE as i32;
        if l.min_element() < 0 || l.max_element() >= size {
            return None;
        }
        Some((l.x as usize, l.y as usize, l.z as usize))
    }
}

impl RasterTarget for ChunkRasterTarget {
    fn affected_area(&self) -> Rect2i {
        let origin = self.origin();
        let min = IVec2::new(origin.x, origin.z);
        Rect2i::from_min_max(min, min + IVec2::splat(CHUNK_SIZE as i32 - 1))
    }

    fn min_height(&self) -> i32 {
        self.min_height
    }

    fn max_height(&self) -> i32 {
        self.max_height
    }

    fn set_block(&mut self, x: i32, y: i32, z: i32, block: BlockType, sides: SideSet) {
        if !self.contains_height(y) {
            self.skipped += 1;
            return;
        }
        let Some((lx, ly, lz)) = self.local(IVec3::new(x, y, z)) else {
            tracing::trace!("set_block outside chunk {}: ({x}, {y}, {z})", self.chunk_pos);
            self.skipped += 1;
            return;
        };
        self.writes += 1;
        if self.data.set(lx, ly, lz, BlockState::new(block, sides)) {
            self.version += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::side::Side;

    #[test]
    fn test_affected_area_matches_chunk() {
        let target = ChunkRasterTarget::new(IVec3::new(1, 0, -1));
        let area = target.affected_area();
        assert_eq!(area.min(), IVec2::new(32, -32));
        assert_eq!(area.max(), IVec2::new(63, -1));
        assert_eq!(target.min_height(), 0);
        assert_eq!(target.max_height(), 31);
    }

    #[test]
    fn test_write_and_read_back() {
        let mut target = ChunkRasterTarget::new(IVec3::new(-1, 0, 0));
        target.set_block(-5, 3, 7, BlockType(4), SideSet::of(Side::Top));
        let state = target.get(-5, 3, 7);
        assert_eq!(state.block, BlockType(4));
        assert!(state.sides.contains(Side::Top));
        assert_eq!(target.write_count(), 1);
        assert_eq!(target.chunk_pos(), IVec3::new(-1, 0, 0));

        // -5 lies at local x 27 of chunk -1.
        let data = target.into_data();
        assert_eq!(data.count_solid(), 1);
        assert_eq!(data.get(27, 3, 7).block, BlockType(4));
    }

    #[test]
    fn test_out_of_window_writes_are_skipped() {
        let mut target = ChunkRasterTarget::new(IVec3::ZERO).with_height_window(0, 6);
        target.set_block(1, 7, 1, BlockType(1), SideSet::EMPTY);
        target.set_block(40, 2, 1, BlockType(1), SideSet::EMPTY);
        assert_eq!(target.write_count(), 0);
        assert_eq!(target.skipped_count(), 2);
        assert_eq!(target.get(1, 7, 1), BlockState::AIR);
    }

    #[test]
    fn test_height_window_is_clamped_to_chunk() {
        let target = ChunkRasterTarget::new(IVec3::new(0, 1, 0)).with_height_window(-100, 40);
        assert_eq!(target.min_height(), 32);
        assert_eq!(target.max_height(), 40);
    }

    #[test]
    fn test_window_missing_chunk_accepts_nothing() {
        let above = ChunkRasterTarget::new(IVec3::ZERO).with_height_window(100, 200);
        let below = ChunkRasterTarget::new(IVec3::ZERO).with_height_window(-20, -1);
        let inverted = ChunkRasterTarget::new(IVec3::ZERO).with_height_window(10, 5);
        for mut target in [above, below, inverted] {
            assert!(target.min_height() > target.max_height());
            for y in [0, 5, 10, 31] {
                target.set_block(1, y, 1, BlockType(1), SideSet::EMPTY);
            }
            assert_eq!(target.write_count(), 0);
            assert_eq!(target.skipped_count(), 4);
            assert_eq!(target.get(1, 31, 1), BlockState::AIR);
        }
    }

    #[test]
    fn test_repeated_write_is_idempotent() {
        let mut once = ChunkRasterTarget::new(IVec3::ZERO);
        once.set_block(2, 2, 2, BlockType(3), SideSet::of(Side::Left));

        let mut twice = ChunkRasterTarget::new(IVec3::ZERO);
        twice.set_block(2, 2, 2, BlockType(3), SideSet::of(Side::Left));
        twice.set_block(2, 2, 2, BlockType(3), SideSet::of(Side::Left));

        assert_eq!(once.get(2, 2, 2), twice.get(2, 2, 2));
        assert_eq!(once.version(), twice.version());
        assert_eq!(once.data().palette(), twice.data().palette());
    }
}
