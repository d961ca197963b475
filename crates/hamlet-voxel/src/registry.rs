//! Block registry: maps compact [`BlockType`] ids to named [`BlockDef`]s.
//!
//! The registry is filled once before generation starts. Air is always id 0,
//! so a freshly created chunk is empty space.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Opaque block type tag written into every voxel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockType(pub u16);

impl BlockType {
    /// Empty space.
    pub const AIR: BlockType = BlockType(0);

    pub fn is_air(self) -> bool {
        self == Self::AIR
    }
}

/// Descriptor for a registered block type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDef {
    /// Unique name (e.g. "stone", "roof_tiles").
    pub name: String,
    /// Whether entities collide with this block.
    pub solid: bool,
    /// Whether the block carries face flags (stairs, column capitals, ...).
    pub directional: bool,
}

impl BlockDef {
    /// A solid, non-directional block.
    pub fn solid(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            solid: true,
            directional: false,
        }
    }

    /// A solid block whose appearance depends on its face flags.
    pub fn directional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            solid: true,
            directional: true,
        }
    }
}

/// Errors that can occur during block registration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A block with the same name has already been registered.
    #[error("duplicate block name: {0}")]
    DuplicateName(String),
    /// All 65 535 non-air slots have been consumed.
    #[error("block registry is full (max 65536 types)")]
    RegistryFull,
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Dense id -> definition table with reverse lookup by name.
#[derive(Clone, Debug)]
pub struct BlockRegistry {
    /// `index == BlockType.0`.
    blocks: Vec<BlockDef>,
    by_name: FxHashMap<String, BlockType>,
}

impl BlockRegistry {
    /// Creates a registry with only air registered.
    pub fn new() -> Self {
        let air = BlockDef {
            name: "air".to_string(),
            solid: false,
            directional: false,
        };
        let mut by_name = FxHashMap::default();
        by_name.insert(air.name.clone(), BlockType::AIR);
        Self {
            blocks: vec![air],
            by_name,
        }
    }

    /// Registers a block and returns its id. Ids are assigned sequentially
    /// starting at 1.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateName`] if the name is taken,
    /// [`RegistryError::RegistryFull`] once all ids are used.
    pub fn register(&mut self, def: BlockDef) -> Result<BlockType, RegistryError> {
        if self.by_name.contains_key(&def.name) {
            return Err(RegistryError::DuplicateName(def.name));
        }
        if self.blocks.len() > u16::MAX as usize {
            return Err(RegistryError::RegistryFull);
        }

        let id = BlockType(self.blocks.len() as u16);
        self.by_name.insert(def.name.clone(), id);
        self.blocks.push(def);
        Ok(id)
    }

    /// Returns the definition for an id, or `None` for ids this registry
    /// never handed out.
    pub fn get(&self, id: BlockType) -> Option<&BlockDef> {
        self.blocks.get(id.0 as usize)
    }

    pub fn lookup_by_name(&self, name: &str) -> Option<BlockType> {
        self.by_name.get(name).copied()
    }

    /// Number of registered blocks, air included.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if only air is registered.
    pub fn is_empty(&self) -> bool {
        self.blocks.len() <= 1
    }

    /// Iterates `(id, definition)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockType, &BlockDef)> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(i, def)| (BlockType(i as u16), def))
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}
