//! Turns building models into voxel writes.
//!
//! Each primitive kind has its own [`Rasterizer`], bound to a [`BlockTheme`]
//! when it is created. [`BuildingRasterizer`] owns one of each and routes the
//! primitives of a building to the matching one.

mod dispatch;
mod rasterizer;
mod theme;

pub use dispatch::BuildingRasterizer;
pub use rasterizer::{
    ColumnRasterizer, FlatRoofRasterizer, GableRoofRasterizer, HipRoofRasterizer, Rasterizer,
    SingleBlockRasterizer, WallRasterizer, Walls,
};
pub use theme::{BlockRole, BlockTheme, ThemeError, default_blocks};
