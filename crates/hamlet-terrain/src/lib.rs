//! Continuous height surfaces that building generation samples floor heights from.

mod heightmap;
mod surface;

pub use heightmap::{HeightmapParams, HeightmapSampler, NoiseSurface};
pub use surface::{DiagonalMirror, FlatSurface, HeightSurface};
