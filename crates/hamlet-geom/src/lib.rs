//! Integer grid geometry shared by the building and rasterization crates.

mod orientation;
mod rect;
mod region;

pub use glam::{IVec2, IVec3};
pub use orientation::Orientation;
pub use rect::{LineSegment, Rect2i, round_half_up};
pub use region::{Border3, Region3i};
