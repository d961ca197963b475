//! Parcel -> building model generation.

use hamlet_geom::{IVec2, IVec3, Rect2i, round_half_up};
use hamlet_terrain::HeightSurface;
use hamlet_voxel::{BlockType, Side};

use crate::building::{Building, BuildingPart};
use crate::deco::{ColumnDecoration, Decoration};
use crate::error::GenerationError;
use crate::parcel::Parcel;
use crate::roof::{FlatRoof, GableRoof, HipRoof, Roof, RoofKind};

/// Produces the buildings for one parcel.
///
/// Implementations must be pure: the result may only depend on the parcel
/// and the surface, because it is cached per parcel.
pub trait BuildingGenerator: Send + Sync {
    fn generate(
        &self,
        parcel: &Parcel,
        surface: &dyn HeightSurface,
    ) -> Result<Vec<Building>, GenerationError>;
}

/// Blocks for the optional corner columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnStyle {
    pub base: BlockType,
    pub shaft: BlockType,
    pub capital: BlockType,
}

/// Dimensions of the generated houses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildingStyle {
    /// Cells kept free between the parcel border and the walls.
    pub inset_margin: i32,
    /// Wall blocks stacked on the floor.
    pub wall_height: i32,
    pub roof_kind: RoofKind,
    /// Rise per cell towards the ridge.
    pub roof_pitch: i32,
    /// Cells the roof extends past the walls.
    pub roof_overhang: i32,
    /// Apex height above the roof base.
    pub apex_rise: i32,
    /// Flat roofs only: height of the raised rim.
    pub flat_border_height: i32,
    /// Place a column on every footprint corner when set.
    pub corner_columns: Option<ColumnStyle>,
}

impl Default for BuildingStyle {
    fn default() -> Self {
        Self {
            inset_margin: 2,
            wall_height: 3,
            roof_kind: RoofKind::Hip,
            roof_pitch: 1,
            roof_overhang: 1,
            apex_rise: 1,
            flat_border_height: 0,
            corner_columns: None,
        }
    }
}

/// Cell where the parcel's gate sits: the midpoint of the parcel side
/// facing its orientation, rounded half-up.
pub fn gate_position(parcel: &Parcel) -> IVec2 {
    round_half_up(parcel.shape().edge(parcel.orientation()).midpoint())
}

/// Places one rectangular house per parcel, inset from the parcel border,
/// with its floor level taken from the terrain at the gate.
#[derive(Clone, Debug, Default)]
pub struct RectBuildingGenerator {
    style: BuildingStyle,
}

impl RectBuildingGenerator {
    pub fn new(style: BuildingStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &BuildingStyle {
        &self.style
    }

    fn roof(&self, plan: Rect2i, base_height: i32) -> Result<Roof, GenerationError> {
        let style = &self.style;
        let apex = base_height + style.apex_rise;
        let roof = match style.roof_kind {
            RoofKind::Hip => HipRoof::new(plan, base_height, style.roof_pitch, apex)?.into(),
            RoofKind::Gable => GableRoof::new(plan, base_height, style.roof_pitch, apex)?.into(),
            RoofKind::Flat => FlatRoof::new(plan, base_height, style.flat_border_height).into(),
        };
        Ok(roof)
    }

    fn corner_columns(
        &self,
        parcel: &Parcel,
        footprint: Rect2i,
        floor_height: i32,
    ) -> Result<Vec<Decoration>, GenerationError> {
        let Some(blocks) = self.style.corner_columns else {
            return Ok(Vec::new());
        };
        let height = self.style.wall_height.max(0) as usize;
        if height == 0 {
            return Ok(Vec::new());
        }

        let mut stack = vec![blocks.shaft; height];
        let mut sides = vec![None; height];
        if height >= 2 {
            stack[0] = blocks.base;
            stack[height - 1] = blocks.capital;
            sides[height - 1] = Some(Side::from_orientation(parcel.orientation()));
        }

        let (min, max) = (footprint.min(), footprint.max());
        [(min.x, min.y), (max.x, min.y), (min.x, max.y), (max.x, max.y)]
            .into_iter()
            .map(|(x, z)| {
                let base = IVec3::new(x, floor_height + 1, z);
                let column = ColumnDecoration::new(stack.clone(), sides.clone(), base)?;
                Ok(Decoration::Column(column))
            })
            .collect()
    }
}

impl BuildingGenerator for RectBuildingGenerator {
    fn generate(
        &self,
        parcel: &Parcel,
        surface: &dyn HeightSurface,
    ) -> Result<Vec<Building>, GenerationError> {
        let margin = self.style.inset_margin;
        let Some(footprint) = parcel.shape().expand(-margin, -margin) else {
            return Ok(Vec::new());
        };

        let gate = gate_position(parcel);
        let (gx, gz) = (f64::from(gate.x), f64::from(gate.y));
        let sample = surface.height(gx, gz);
        if !sample.is_finite() {
            return Err(GenerationError::NonFiniteHeight {
                x: gx,
                z: gz,
                value: sample,
            });
        }
        let floor_height = sample.floor() as i32;
        let wall_height = self.style.wall_height;

        let overhang = self.style.roof_overhang;
        let Some(plan) = footprint.expand(overhang, overhang) else {
            return Ok(Vec::new());
        };
        let roof = self.roof(plan, floor_height + wall_height)?;

        let part = BuildingPart::new(footprint, floor_height, wall_height, roof);
        let decorations = self.corner_columns(parcel, footprint, floor_height)?;
        Ok(vec![Building::new(
            parcel.orientation(),
            vec![part],
            decorations,
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hamlet_geom::Orientation;
    use hamlet_terrain::{FlatSurface, HeightmapParams, NoiseSurface};

    fn parcel(x0: i32, z0: i32, x1: i32, z1: i32, o: Orientation) -> Parcel {
        Parcel::new(
            Rect2i::from_min_max(IVec2::new(x0, z0), IVec2::new(x1, z1)),
            o,
        )
    }

    struct Gradient;

    impl HeightSurface for Gradient {
        fn height(&self, x: f64, z: f64) -> f64 {
            x * 0.5 + z * 0.25
        }

        fn min_height(&self) -> f64 {
            f64::MIN
        }

        fn max_height(&self) -> f64 {
            f64::MAX
        }
    }

    #[test]
    fn test_gate_on_south_edge_midpoint() {
        let p = parcel(0, 0, 10, 10, Orientation::South);
        assert_eq!(gate_position(&p), IVec2::new(5, 10));

        // Even width: midpoint 4.5 rounds up.
        let p = parcel(0, 0, 9, 9, Orientation::South);
        assert_eq!(gate_position(&p), IVec2::new(5, 9));
        let p = parcel(0, 0, 9, 9, Orientation::West);
        assert_eq!(gate_position(&p), IVec2::new(0, 5));
    }

    #[test]
    fn test_reference_building_layout() {
        let p = parcel(0, 0, 10, 10, Orientation::South);
        let buildings = RectBuildingGenerator::default()
            .generate(&p, &FlatSurface::new(7.9))
            .unwrap();
        assert_eq!(buildings.len(), 1);

        let building = &buildings[0];
        assert_eq!(building.orientation(), Orientation::South);
        let part = &building.parts()[0];
        assert_eq!(
            part.footprint(),
            Rect2i::from_min_max(IVec2::new(2, 2), IVec2::new(8, 8))
        );
        assert!(p.shape().contains_rect(&part.footprint()));
        assert_eq!(part.floor_height(), 7);
        assert_eq!(part.wall_height(), 3);

        let roof = part.roof();
        assert_eq!(roof.kind(), RoofKind::Hip);
        assert_eq!(
            roof.area(),
            Rect2i::from_min_max(IVec2::new(1, 1), IVec2::new(9, 9))
        );
        assert_eq!(roof.base_height(), 10);
        assert_eq!(roof.pitch(), 1);
        assert_eq!(roof.apex_height(), 11);
        assert!(building.decorations().is_empty());
    }

    #[test]
    fn test_floor_sampled_at_gate() {
        // Gate of an east-facing parcel 0..=10 is (10, 5): 5.0 + 1.25 = 6.25.
        let p = parcel(0, 0, 10, 10, Orientation::East);
        let buildings = RectBuildingGenerator::default().generate(&p, &Gradient).unwrap();
        assert_eq!(buildings[0].parts()[0].floor_height(), 6);

        // Negative heights floor towards negative infinity.
        let buildings = RectBuildingGenerator::default()
            .generate(&p, &FlatSurface::new(-0.5))
            .unwrap();
        assert_eq!(buildings[0].parts()[0].floor_height(), -1);
    }

    #[test]
    fn test_small_parcel_yields_nothing() {
        let p = parcel(0, 0, 3, 3, Orientation::North);
        let buildings = RectBuildingGenerator::default()
            .generate(&p, &FlatSurface::new(0.0))
            .unwrap();
        assert!(buildings.is_empty());
    }

    #[test]
    fn test_non_finite_height_is_an_error() {
        let p = parcel(0, 0, 10, 10, Orientation::North);
        let err = RectBuildingGenerator::default()
            .generate(&p, &FlatSurface::new(f64::NAN))
            .unwrap_err();
        assert!(matches!(err, GenerationError::NonFiniteHeight { .. }));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let surface = NoiseSurface::new(
            HeightmapParams {
                seed: 7,
                ..Default::default()
            },
            32.0,
        );
        let generator = RectBuildingGenerator::default();
        for (i, o) in Orientation::ALL.into_iter().enumerate() {
            let offset = i as i32 * 37;
            let p = parcel(offset, -offset, offset + 12, -offset + 9, o);
            let first = generator.generate(&p, &surface).unwrap();
            let second = generator.generate(&p, &surface).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_corner_columns_follow_style() {
        let style = BuildingStyle {
            roof_kind: RoofKind::Gable,
            corner_columns: Some(ColumnStyle {
                base: BlockType(1),
                shaft: BlockType(2),
                capital: BlockType(3),
            }),
            ..Default::default()
        };
        let p = parcel(0, 0, 10, 10, Orientation::North);
        let generator = RectBuildingGenerator::new(style.clone());
        assert_eq!(generator.style(), &style);
        let buildings = generator.generate(&p, &FlatSurface::new(4.0)).unwrap();
        let building = &buildings[0];
        assert_eq!(building.parts()[0].roof().kind(), RoofKind::Gable);
        assert_eq!(building.decorations().len(), 4);

        let Decoration::Column(column) = &building.decorations()[0] else {
            panic!("expected a column");
        };
        assert_eq!(column.base_pos(), IVec3::new(2, 5, 2));
        let elements: Vec<_> = column.elements().collect();
        assert_eq!(
            elements,
            vec![
                (BlockType(1), None),
                (BlockType(2), None),
                (BlockType(3), Some(Side::Front)),
            ]
        );
    }
}
