//! Block storage and the voxel write surface that rasterizers draw into.

pub mod chunk;
pub mod registry;
pub mod side;
pub mod target;

pub use chunk::{BlockChunk, BlockState, CHUNK_SIZE, CHUNK_VOLUME};
pub use registry::{BlockDef, BlockRegistry, BlockType, RegistryError};
pub use side::{Side, SideSet};
pub use target::{ChunkRasterTarget, RasterTarget};
