//! Parallax error types

use thiserror::Error;

use crate::element::ElementId;
use crate::offset::{Axis, OffsetUnit};

/// Errors raised while configuring or updating parallax elements
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParallaxError {
    /// Offset whose numeric part failed to parse or was not finite
    #[error("Invalid offset value: {0:?}")]
    InvalidOffsetValue(String),

    /// Offset with a unit other than `%` or `px`
    #[error("Invalid offset unit in {0:?} (expected `%` or `px`)")]
    InvalidOffsetUnit(String),

    /// Min and max offsets on one axis were given in different units
    #[error("Mismatched offset units on the {axis} axis: min is {min}, max is {max}")]
    UnitMismatch {
        axis: Axis,
        min: OffsetUnit,
        max: OffsetUnit,
    },

    /// Registry operation addressed an id that is not registered
    #[error("No element registered with id {0}")]
    UnknownElement(ElementId),
}

/// Result type for parallax operations
pub type Result<T> = std::result::Result<T, ParallaxError>;
