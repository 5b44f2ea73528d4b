//! The query contract shared by [`SpatialTree`](crate::SpatialTree) and
//! [`BruteForceIndex`](crate::BruteForceIndex).
//!
//! Comparison tests and benchmarks are written once against this trait and
//! run both implementations side by side.

use crate::error::Result;
use crate::geometry::{Point, Rect};

/// A mutable set of points answering membership, range and nearest queries.
pub trait SpatialIndex {
    /// Adds `point`. Returns `Ok(false)` if an equal point is already stored.
    ///
    /// # Errors
    ///
    /// [`SpatialError::InvalidPoint`](crate::SpatialError::InvalidPoint) if
    /// `point` is outside the supported range; nothing is stored.
    fn insert(&mut self, point: Point) -> Result<bool>;

    /// Returns true if a point equal to `point` is stored.
    ///
    /// # Errors
    ///
    /// [`SpatialError::InvalidPoint`](crate::SpatialError::InvalidPoint) if
    /// `point` is outside the supported range.
    fn contains(&self, point: Point) -> Result<bool>;

    /// Clears `results` and fills it with every stored point inside `rect`.
    fn range_into(&self, rect: &Rect, results: &mut Vec<Point>);

    /// Closest stored point to `point`, or `None` when nothing is stored.
    ///
    /// # Errors
    ///
    /// [`SpatialError::InvalidPoint`](crate::SpatialError::InvalidPoint) if
    /// `point` is outside the supported range, even when nothing is stored.
    fn nearest(&self, point: Point) -> Result<Option<Point>>;

    /// Number of stored points.
    fn len(&self) -> usize;

    /// Returns true when no point is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every stored point inside `rect`.
    fn range(&self, rect: &Rect) -> Vec<Point> {
        let mut results = Vec::new();
        self.range_into(rect, &mut results);
        results
    }
}
