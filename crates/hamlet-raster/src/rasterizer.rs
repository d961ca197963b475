//! One rasterizer per primitive kind.
//!
//! All of them follow the same policy: reject the primitive outright when its
//! bounding box misses the target, then emit voxels only for the part that
//! overlaps the target's affected area and height window.

use hamlet_bldg::{
    BuildingPart, ColumnDecoration, FlatRoof, GableRoof, HipRoof, SingleBlockDecoration,
};
use hamlet_geom::{Orientation, Rect2i};
use hamlet_terrain::HeightSurface;
use hamlet_voxel::{BlockType, RasterTarget, SideSet};

use crate::theme::{BlockRole, BlockTheme};

/// Draws primitives of type `P` into a [`RasterTarget`].
pub trait Rasterizer<P: ?Sized> {
    fn raster(&self, target: &mut dyn RasterTarget, primitive: &P, surface: &dyn HeightSurface);
}

/// The part of the target that `area` overlaps, if any.
fn clip(target: &dyn RasterTarget, area: Rect2i) -> Option<Rect2i> {
    area.intersection(&target.affected_area())
}

/// Returns true if `[bottom, top]` overlaps the target's height window.
fn overlaps_window(target: &dyn RasterTarget, bottom: i32, top: i32) -> bool {
    target.min_height() <= target.max_height()
        && top >= target.min_height()
        && bottom <= target.max_height()
}

/// Writes `block` at every y in `[from, to]` that lies inside the window.
fn fill_column(
    target: &mut dyn RasterTarget,
    x: i32,
    z: i32,
    from: i32,
    to: i32,
    block: BlockType,
) {
    let lo = from.max(target.min_height());
    let hi = to.min(target.max_height());
    for y in lo..=hi {
        target.set_block(x, y, z, block, SideSet::EMPTY);
    }
}

// ---------------------------------------------------------------------------
// Walls
// ---------------------------------------------------------------------------

/// Walls of one building part, with the door facing `door_facing`.
#[derive(Clone, Copy, Debug)]
pub struct Walls<'a> {
    pub part: &'a BuildingPart,
    pub door_facing: Orientation,
}

/// Draws foundation, floor, walls, interior and door of a building part.
#[derive(Clone, Debug)]
pub struct WallRasterizer {
    foundation: BlockType,
    floor: BlockType,
    wall: BlockType,
    interior: BlockType,
    door: BlockType,
}

impl WallRasterizer {
    /// Height of the door opening in blocks.
    pub const DOOR_HEIGHT: i32 = 2;

    pub fn new(theme: &BlockTheme) -> Self {
        Self {
            foundation: theme.get(BlockRole::Foundation),
            floor: theme.get(BlockRole::Floor),
            wall: theme.get(BlockRole::Wall),
            interior: theme.get(BlockRole::Interior),
            door: theme.get(BlockRole::Door),
        }
    }
}

impl Rasterizer<Walls<'_>> for WallRasterizer {
    fn raster(
        &self,
        target: &mut dyn RasterTarget,
        walls: &Walls<'_>,
        surface: &dyn HeightSurface,
    ) {
        let part = walls.part;
        let floor = part.floor_height();
        let top = part.top_height();
        let bottom = floor.min(surface.min_height().floor() as i32);
        if !overlaps_window(target, bottom, top) {
            return;
        }
        let footprint = part.footprint();
        let Some(area) = clip(target, footprint) else {
            return;
        };

        let door = part.door_position(walls.door_facing);
        for cell in area.cells() {
            let (x, z) = (cell.x, cell.y);

            let ground = surface.height(f64::from(x), f64::from(z)).floor() as i32;
            fill_column(target, x, z, ground, floor - 1, self.foundation);
            fill_column(target, x, z, floor, floor, self.floor);

            if !footprint.is_on_border(x, z) {
                fill_column(target, x, z, floor + 1, top, self.interior);
            } else if cell == door {
                let lintel = floor + Self::DOOR_HEIGHT;
                fill_column(target, x, z, floor + 1, lintel.min(top), self.door);
                fill_column(target, x, z, lintel + 1, top, self.wall);
            } else {
                fill_column(target, x, z, floor + 1, top, self.wall);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Roofs
// ---------------------------------------------------------------------------

/// Lowest y that has to be filled under a roof cell at height `h` so the
/// surface has no holes where it drops by more than one block.
fn gap_floor(h: i32, x: i32, z: i32, height_at: impl Fn(i32, i32) -> Option<i32>) -> i32 {
    [(x - 1, z), (x + 1, z), (x, z - 1), (x, z + 1)]
        .into_iter()
        .filter_map(|(nx, nz)| height_at(nx, nz))
        .min()
        .map_or(h, |lowest| (lowest + 1).min(h))
}

/// Draws a hip roof's surface.
#[derive(Clone, Debug)]
pub struct HipRoofRasterizer {
    block: BlockType,
}

impl HipRoofRasterizer {
    pub fn new(theme: &BlockTheme) -> Self {
        Self {
            block: theme.get(BlockRole::HipRoof),
        }
    }
}

impl Rasterizer<HipRoof> for HipRoofRasterizer {
    fn raster(
        &self,
        target: &mut dyn RasterTarget,
        roof: &HipRoof,
        _surface: &dyn HeightSurface,
    ) {
        if !overlaps_window(target, roof.base_height(), roof.apex_height()) {
            return;
        }
        let Some(area) = clip(target, roof.area()) else {
            return;
        };
        for cell in area.cells() {
            let (x, z) = (cell.x, cell.y);
            let Some(h) = roof.height_at(x, z) else {
                continue;
            };
            let from = gap_floor(h, x, z, |nx, nz| roof.height_at(nx, nz));
            fill_column(target, x, z, from, h, self.block);
        }
    }
}

/// Draws a gable roof's surface and closes its two ends with gable walls.
#[derive(Clone, Debug)]
pub struct GableRoofRasterizer {
    block: BlockType,
    gable_wall: BlockType,
}

impl GableRoofRasterizer {
    pub fn new(theme: &BlockTheme) -> Self {
        Self {
            block: theme.get(BlockRole::GableRoof),
            gable_wall: theme.get(BlockRole::GableWall),
        }
    }
}

impl Rasterizer<GableRoof> for GableRoofRasterizer {
    fn raster(
        &self,
        target: &mut dyn RasterTarget,
        roof: &GableRoof,
        _surface: &dyn HeightSurface,
    ) {
        if !overlaps_window(target, roof.base_height(), roof.apex_height()) {
            return;
        }
        let Some(area) = clip(target, roof.area()) else {
            return;
        };
        for cell in area.cells() {
            let (x, z) = (cell.x, cell.y);
            let Some(h) = roof.height_at(x, z) else {
                continue;
            };
            let from = gap_floor(h, x, z, |nx, nz| roof.height_at(nx, nz));
            if roof.is_gable_end(x, z) {
                fill_column(target, x, z, roof.base_height(), from - 1, self.gable_wall);
            }
            fill_column(target, x, z, from, h, self.block);
        }
    }
}

/// Draws a flat roof and its parapet.
#[derive(Clone, Debug)]
pub struct FlatRoofRasterizer {
    block: BlockType,
    parapet: BlockType,
}

impl FlatRoofRasterizer {
    pub fn new(theme: &BlockTheme) -> Self {
        Self {
            block: theme.get(BlockRole::FlatRoof),
            parapet: theme.get(BlockRole::Parapet),
        }
    }
}

impl Rasterizer<FlatRoof> for FlatRoofRasterizer {
    fn raster(
        &self,
        target: &mut dyn RasterTarget,
        roof: &FlatRoof,
        _surface: &dyn HeightSurface,
    ) {
        let base = roof.base_height();
        let rim_top = base + roof.border_height();
        if !overlaps_window(target, base, rim_top) {
            return;
        }
        let plan = roof.area();
        let Some(area) = clip(target, plan) else {
            return;
        };
        for cell in area.cells() {
            let (x, z) = (cell.x, cell.y);
            fill_column(target, x, z, base, base, self.block);
            if plan.is_on_border(x, z) {
                fill_column(target, x, z, base + 1, rim_top, self.parapet);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Decorations
// ---------------------------------------------------------------------------

/// Draws column decorations. Blocks come from the decoration itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColumnRasterizer;

impl Rasterizer<ColumnDecoration> for ColumnRasterizer {
    fn raster(
        &self,
        target: &mut dyn RasterTarget,
        column: &ColumnDecoration,
        _surface: &dyn HeightSurface,
    ) {
        let base = column.base_pos();
        if !target.affected_area().contains(base.x, base.z) {
            return;
        }
        let top = base.y + column.height() as i32 - 1;
        if !overlaps_window(target, base.y, top) {
            return;
        }

        for (y, (block, side)) in (base.y..).zip(column.elements()) {
            if !target.contains_height(y) {
                continue;
            }
            target.set_block(base.x, y, base.z, block, SideSet::from(side));
        }
    }
}

/// Draws single-block decorations.
#[derive(Clone, Copy, Debug, Default)]
pub struct SingleBlockRasterizer;

impl Rasterizer<SingleBlockDecoration> for SingleBlockRasterizer {
    fn raster(
        &self,
        target: &mut dyn RasterTarget,
        deco: &SingleBlockDecoration,
        _surface: &dyn HeightSurface,
    ) {
        let p = deco.pos;
        if !target.affected_area().contains(p.x, p.z) || !target.contains_height(p.y) {
            return;
        }
        target.set_block(p.x, p.y, p.z, deco.block, SideSet::from(deco.side));
    }
}
