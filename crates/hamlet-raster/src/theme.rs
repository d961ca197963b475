//! Block themes: which registered block each part of a building is made of.

use std::fmt;
use std::str::FromStr;

use hamlet_voxel::{BlockDef, BlockRegistry, BlockType};
use thiserror::Error;

/// Semantic role of a voxel within a building.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockRole {
    /// Fill between the terrain and the floor.
    Foundation,
    Floor,
    Wall,
    /// Space enclosed by the walls.
    Interior,
    /// The opening in the front wall.
    Door,
    HipRoof,
    GableRoof,
    /// Triangular wall under the ends of a gable roof.
    GableWall,
    FlatRoof,
    /// Raised rim around a flat roof.
    Parapet,
}

impl BlockRole {
    pub const COUNT: usize = 10;

    pub const ALL: [BlockRole; Self::COUNT] = [
        BlockRole::Foundation,
        BlockRole::Floor,
        BlockRole::Wall,
        BlockRole::Interior,
        BlockRole::Door,
        BlockRole::HipRoof,
        BlockRole::GableRoof,
        BlockRole::GableWall,
        BlockRole::FlatRoof,
        BlockRole::Parapet,
    ];

    /// Name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            BlockRole::Foundation => "foundation",
            BlockRole::Floor => "floor",
            BlockRole::Wall => "wall",
            BlockRole::Interior => "interior",
            BlockRole::Door => "door",
            BlockRole::HipRoof => "hip_roof",
            BlockRole::GableRoof => "gable_roof",
            BlockRole::GableWall => "gable_wall",
            BlockRole::FlatRoof => "flat_roof",
            BlockRole::Parapet => "parapet",
        }
    }

    /// Block name used when a theme does not override this role.
    pub fn default_block(self) -> &'static str {
        match self {
            BlockRole::Foundation => "stone",
            BlockRole::Floor => "planks",
            BlockRole::Wall => "cobblestone",
            BlockRole::Interior | BlockRole::Door => "air",
            BlockRole::HipRoof | BlockRole::GableRoof => "roof_tiles",
            BlockRole::GableWall => "planks",
            BlockRole::FlatRoof => "stone_slab",
            BlockRole::Parapet => "cobblestone",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for BlockRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlockRole {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockRole::ALL
            .into_iter()
            .find(|role| role.name() == s)
            .ok_or_else(|| ThemeError::UnknownRole(s.to_string()))
    }
}

/// Errors raised while resolving a theme against a registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThemeError {
    /// The role name is not one of [`BlockRole::ALL`].
    #[error("unknown block role: {0}")]
    UnknownRole(String),

    /// A role maps to a block name the registry does not know.
    #[error("block {name:?} for role {role} is not registered")]
    UnknownBlock { role: BlockRole, name: String },
}

/// Blocks every building in a world is drawn with, in registration order.
///
/// Directional blocks carry face flags when placed.
pub fn default_blocks() -> Vec<BlockDef> {
    vec![
        BlockDef::solid("stone"),
        BlockDef::solid("planks"),
        BlockDef::solid("cobblestone"),
        BlockDef::directional("roof_tiles"),
        BlockDef::solid("stone_slab"),
        BlockDef::solid("column_base"),
        BlockDef::solid("column_shaft"),
        BlockDef::directional("column_capital"),
    ]
}

/// A resolved role -> block table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockTheme {
    blocks: [BlockType; BlockRole::COUNT],
}

impl BlockTheme {
    /// A theme that uses `block` for every role.
    pub fn uniform(block: BlockType) -> Self {
        Self {
            blocks: [block; BlockRole::COUNT],
        }
    }

    /// Resolves each role's block name against `registry`. `overrides`
    /// replaces the default block name of individual roles.
    ///
    /// # Errors
    ///
    /// [`ThemeError::UnknownRole`] for an override with an unknown role name,
    /// [`ThemeError::UnknownBlock`] if a block name is not registered.
    pub fn resolve<'a, I>(registry: &BlockRegistry, overrides: I) -> Result<Self, ThemeError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut names: [&str; BlockRole::COUNT] = BlockRole::ALL.map(BlockRole::default_block);
        for (role, name) in overrides {
            let role: BlockRole = role.parse()?;
            names[role.index()] = name;
        }

        let mut theme = Self::uniform(BlockType::AIR);
        for role in BlockRole::ALL {
            let name = names[role.index()];
            let block = registry
                .lookup_by_name(name)
                .ok_or_else(|| ThemeError::UnknownBlock {
                    role,
                    name: name.to_string(),
                })?;
            theme.blocks[role.index()] = block;
        }
        tracing::debug!("resolved block theme: {theme:?}");
        Ok(theme)
    }

    pub fn with(mut self, role: BlockRole, block: BlockType) -> Self {
        self.blocks[role.index()] = block;
        self
    }

    pub fn get(&self, role: BlockRole) -> BlockType {
        self.blocks[role.index()]
    }
}
