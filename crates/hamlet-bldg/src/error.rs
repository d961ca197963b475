//! Error types for building models and their generation.

use thiserror::Error;

/// A precondition on a model value was violated. These indicate a caller
/// bug and are returned from the constructor that detected them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A roof's apex lies below its base.
    #[error("roof apex {apex} is below its base height {base}")]
    InvertedRoof { base: i32, apex: i32 },

    /// Roof pitch must be zero or positive.
    #[error("roof pitch must not be negative, got {0}")]
    NegativePitch(i32),

    /// A column's block list and facing list differ in length.
    #[error("decoration declares {blocks} blocks but {sides} facing sides")]
    DecorationLength { blocks: usize, sides: usize },

    /// A column must be at least one block tall.
    #[error("decoration must be at least one block tall")]
    EmptyDecoration,

    /// A roof kind name that is not hip, gable or flat.
    #[error("unknown roof kind: {0}")]
    UnknownRoofKind(String),
}

/// Computing the buildings of one parcel failed.
///
/// Cached alongside successful results, hence `Clone`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    /// Assembling the model violated a model precondition.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The height surface returned NaN or infinity.
    #[error("height surface returned {value} at ({x}, {z})")]
    NonFiniteHeight { x: f64, z: f64, value: f64 },

    /// The generator panicked.
    #[error("building generator panicked: {0}")]
    Panicked(String),
}
