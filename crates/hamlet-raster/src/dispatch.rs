//! Per-primitive dispatch from building models to the concrete rasterizers.

use hamlet_bldg::{Building, BuildingFacet, Decoration, Primitive, Roof};
use hamlet_geom::Rect2i;
use hamlet_terrain::HeightSurface;
use hamlet_voxel::RasterTarget;

use crate::rasterizer::{
    ColumnRasterizer, FlatRoofRasterizer, GableRoofRasterizer, HipRoofRasterizer, Rasterizer,
    SingleBlockRasterizer, WallRasterizer, Walls,
};
use crate::theme::BlockTheme;

/// Routes every primitive of a building to the rasterizer for its kind.
///
/// All rasterizers are bound to the same theme when this is created, so
/// drawing never looks anything up.
#[derive(Clone, Debug)]
pub struct BuildingRasterizer {
    walls: WallRasterizer,
    hip: HipRoofRasterizer,
    gable: GableRoofRasterizer,
    flat: FlatRoofRasterizer,
    column: ColumnRasterizer,
    single: SingleBlockRasterizer,
}

impl BuildingRasterizer {
    pub fn new(theme: &BlockTheme) -> Self {
        Self {
            walls: WallRasterizer::new(theme),
            hip: HipRoofRasterizer::new(theme),
            gable: GableRoofRasterizer::new(theme),
            flat: FlatRoofRasterizer::new(theme),
            column: ColumnRasterizer,
            single: SingleBlockRasterizer,
        }
    }

    pub fn raster_primitive(
        &self,
        target: &mut dyn RasterTarget,
        primitive: Primitive<'_>,
        surface: &dyn HeightSurface,
    ) {
        match primitive {
            Primitive::Walls { part, orientation } => {
                let walls = Walls {
                    part,
                    door_facing: orientation,
                };
                self.walls.raster(target, &walls, surface);
            }
            Primitive::Roof(Roof::Hip(roof)) => self.hip.raster(target, roof, surface),
            Primitive::Roof(Roof::Gable(roof)) => self.gable.raster(target, roof, surface),
            Primitive::Roof(Roof::Flat(roof)) => self.flat.raster(target, roof, surface),
            Primitive::Decoration(Decoration::Column(column)) => {
                self.column.raster(target, column, surface);
            }
            Primitive::Decoration(Decoration::SingleBlock(block)) => {
                self.single.raster(target, block, surface);
            }
        }
    }

    /// Draws walls and roofs of every part, then the decorations.
    pub fn raster_building(
        &self,
        target: &mut dyn RasterTarget,
        building: &Building,
        surface: &dyn HeightSurface,
    ) {
        for primitive in building.primitives() {
            self.raster_primitive(target, primitive, surface);
        }
    }

    /// Draws every building in `facet` that reaches into the target.
    ///
    /// Returns the number of buildings that did.
    pub fn raster_facet(
        &self,
        target: &mut dyn RasterTarget,
        facet: &BuildingFacet,
        surface: &dyn HeightSurface,
    ) -> usize {
        let area = target.affected_area();
        let mut drawn = 0;
        for building in facet {
            if reaches_area(building, &area) {
                self.raster_building(target, building, surface);
                drawn += 1;
            }
        }
        tracing::trace!("rasterized {drawn} of {} building(s)", facet.len());
        drawn
    }
}

/// Returns true if any roof plan or decoration of `building` lies over `area`.
///
/// Roof plans cover the walls beneath them; decorations may stand anywhere.
fn reaches_area(building: &Building, area: &Rect2i) -> bool {
    let roofs = building
        .parts()
        .iter()
        .any(|part| part.roof().area().intersects(area));
    roofs
        || building.decorations().iter().any(|deco| {
            let pos = deco.base_pos();
            area.contains(pos.x, pos.z)
        })
}
