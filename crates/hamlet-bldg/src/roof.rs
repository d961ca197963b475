//! Roof shapes and the height function each one occupies.
//!
//! Every roof covers a rectangular plan and answers [`Roof::height_at`]: the
//! y of the roof surface above a plan cell. Heights always lie in
//! `[base_height, apex_height]` and grow from the eaves towards the ridge.

use std::fmt;
use std::str::FromStr;

use hamlet_geom::Rect2i;

use crate::error::ModelError;

/// Tag for the roof variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RoofKind {
    #[default]
    Hip,
    Gable,
    Flat,
}

impl FromStr for RoofKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hip" => Ok(RoofKind::Hip),
            "gable" => Ok(RoofKind::Gable),
            "flat" => Ok(RoofKind::Flat),
            _ => Err(ModelError::UnknownRoofKind(s.to_string())),
        }
    }
}

impl fmt::Display for RoofKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RoofKind::Hip => "hip",
            RoofKind::Gable => "gable",
            RoofKind::Flat => "flat",
        })
    }
}

fn check_slope(base_height: i32, pitch: i32, apex_height: i32) -> Result<(), ModelError> {
    if pitch < 0 {
        return Err(ModelError::NegativePitch(pitch));
    }
    if apex_height < base_height {
        return Err(ModelError::InvertedRoof {
            base: base_height,
            apex: apex_height,
        });
    }
    Ok(())
}

/// A roof sloping up from all four eaves, capped at `apex_height`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HipRoof {
    area: Rect2i,
    base_height: i32,
    pitch: i32,
    apex_height: i32,
}

impl HipRoof {
    pub fn new(
        area: Rect2i,
        base_height: i32,
        pitch: i32,
        apex_height: i32,
    ) -> Result<Self, ModelError> {
        check_slope(base_height, pitch, apex_height)?;
        Ok(Self {
            area,
            base_height,
            pitch,
            apex_height,
        })
    }

    pub fn area(&self) -> Rect2i {
        self.area
    }

    pub fn base_height(&self) -> i32 {
        self.base_height
    }

    pub fn pitch(&self) -> i32 {
        self.pitch
    }

    pub fn apex_height(&self) -> i32 {
        self.apex_height
    }

    /// `base + d * pitch` where `d` is the distance to the nearest eave on
    /// either axis, capped at the apex.
    pub fn height_at(&self, x: i32, z: i32) -> Option<i32> {
        if !self.area.contains(x, z) {
            return None;
        }
        let rise = self.area.distance_to_border(x, z).saturating_mul(self.pitch);
        Some(self.base_height.saturating_add(rise).min(self.apex_height))
    }
}

/// A roof sloping up from two eaves to a ridge that runs along the plan's
/// longer axis. The short sides are closed by gable walls.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GableRoof {
    area: Rect2i,
    base_height: i32,
    pitch: i32,
    apex_height: i32,
    ridge_along_x: bool,
}

impl GableRoof {
    pub fn new(
        area: Rect2i,
        base_height: i32,
        pitch: i32,
        apex_height: i32,
    ) -> Result<Self, ModelError> {
        check_slope(base_height, pitch, apex_height)?;
        Ok(Self {
            area,
            base_height,
            pitch,
            apex_height,
            ridge_along_x: area.width() >= area.height(),
        })
    }

    pub fn area(&self) -> Rect2i {
        self.area
    }

    pub fn base_height(&self) -> i32 {
        self.base_height
    }

    pub fn pitch(&self) -> i32 {
        self.pitch
    }

    pub fn apex_height(&self) -> i32 {
        self.apex_height
    }

    /// Returns true if the ridge runs parallel to the x axis.
    pub fn ridge_along_x(&self) -> bool {
        self.ridge_along_x
    }

    /// Like [`HipRoof::height_at`], but the distance is only measured across
    /// the ridge.
    pub fn height_at(&self, x: i32, z: i32) -> Option<i32> {
        if !self.area.contains(x, z) {
            return None;
        }
        let (min, max) = (self.area.min(), self.area.max());
        let d = if self.ridge_along_x {
            (z - min.y).min(max.y - z)
        } else {
            (x - min.x).min(max.x - x)
        };
        let rise = d.saturating_mul(self.pitch);
        Some(self.base_height.saturating_add(rise).min(self.apex_height))
    }

    /// Returns true if the cell lies on one of the two gable ends.
    pub fn is_gable_end(&self, x: i32, z: i32) -> bool {
        let (min, max) = (self.area.min(), self.area.max());
        if self.ridge_along_x {
            x == min.x || x == max.x
        } else {
            z == min.y || z == max.y
        }
    }
}

/// A flat roof with an optional raised rim of `border_height` blocks.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FlatRoof {
    area: Rect2i,
    base_height: i32,
    border_height: i32,
}

impl FlatRoof {
    /// Negative border heights are treated as zero.
    pub fn new(area: Rect2i, base_height: i32, border_height: i32) -> Self {
        Self {
            area,
            base_height,
            border_height: border_height.max(0),
        }
    }

    pub fn area(&self) -> Rect2i {
        self.area
    }

    pub fn base_height(&self) -> i32 {
        self.base_height
    }

    pub fn border_height(&self) -> i32 {
        self.border_height
    }

    pub fn height_at(&self, x: i32, z: i32) -> Option<i32> {
        self.area.contains(x, z).then_some(self.base_height)
    }
}

/// A roof of any supported shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Roof {
    Hip(HipRoof),
    Gable(GableRoof),
    Flat(FlatRoof),
}

impl Roof {
    pub fn kind(&self) -> RoofKind {
        match self {
            Roof::Hip(_) => RoofKind::Hip,
            Roof::Gable(_) => RoofKind::Gable,
            Roof::Flat(_) => RoofKind::Flat,
        }
    }

    /// The plan the roof covers.
    pub fn area(&self) -> Rect2i {
        match self {
            Roof::Hip(r) => r.area,
            Roof::Gable(r) => r.area,
            Roof::Flat(r) => r.area,
        }
    }

    pub fn base_height(&self) -> i32 {
        match self {
            Roof::Hip(r) => r.base_height,
            Roof::Gable(r) => r.base_height,
            Roof::Flat(r) => r.base_height,
        }
    }

    /// Rise per horizontal cell; zero for flat roofs.
    pub fn pitch(&self) -> i32 {
        match self {
            Roof::Hip(r) => r.pitch,
            Roof::Gable(r) => r.pitch,
            Roof::Flat(_) => 0,
        }
    }

    /// Highest y any part of the roof occupies.
    pub fn apex_height(&self) -> i32 {
        match self {
            Roof::Hip(r) => r.apex_height,
            Roof::Gable(r) => r.apex_height,
            Roof::Flat(r) => r.base_height + r.border_height,
        }
    }

    /// Roof surface height above `(x, z)`, or `None` outside the plan.
    pub fn height_at(&self, x: i32, z: i32) -> Option<i32> {
        match self {
            Roof::Hip(r) => r.height_at(x, z),
            Roof::Gable(r) => r.height_at(x, z),
            Roof::Flat(r) => r.height_at(x, z),
        }
    }
}

impl From<HipRoof> for Roof {
    fn from(roof: HipRoof) -> Self {
        Roof::Hip(roof)
    }
}

impl From<GableRoof> for Roof {
    fn from(roof: GableRoof) -> Self {
        Roof::Gable(roof)
    }
}

impl From<FlatRoof> for Roof {
    fn from(roof: FlatRoof) -> Self {
        Roof::Flat(roof)
    }
}
