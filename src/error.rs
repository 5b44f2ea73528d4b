//! Error types for point set operations.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SpatialError>;

/// Errors returned when an argument cannot take part in a spatial query.
///
/// Both variants are invalid-argument conditions: the call that produced them
/// had no effect on the structure it was made against.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SpatialError {
    /// A point has a NaN or infinite coordinate, or one beyond
    /// [`Point::MAX_COORD`](crate::Point::MAX_COORD).
    #[error("invalid argument: point ({x}, {y}) is outside the supported coordinate range")]
    InvalidPoint {
        /// The offending x-coordinate.
        x: f64,
        /// The offending y-coordinate.
        y: f64,
    },

    /// Rectangle bounds are NaN or inverted.
    #[error("invalid argument: rectangle [{xmin}, {xmax}] x [{ymin}, {ymax}] is malformed")]
    InvalidRect {
        /// Requested left edge.
        xmin: f64,
        /// Requested bottom edge.
        ymin: f64,
        /// Requested right edge.
        xmax: f64,
        /// Requested top edge.
        ymax: f64,
    },
}

impl SpatialError {
    /// Returns true for errors caused by a malformed caller argument.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidPoint { .. } | Self::InvalidRect { .. })
    }
}
