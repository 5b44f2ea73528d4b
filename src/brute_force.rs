//! Reference point set answering every query by a full scan.
//!
//! This is the baseline [`SpatialTree`](crate::SpatialTree) is checked and
//! benchmarked against. For production use, see the tree.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::index::SpatialIndex;

/// Ordered set of unique points with O(n) range and nearest queries.
///
/// # Examples
/// ```
/// use kdset::prelude::*;
///
/// let mut set = BruteForceIndex::new();
/// set.insert(Point::new(0.1, 0.1)).unwrap();
/// set.insert(Point::new(0.9, 0.9)).unwrap();
///
/// assert_eq!(set.nearest(Point::new(0.2, 0.2)).unwrap(), Some(Point::new(0.1, 0.1)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct BruteForceIndex {
    points: BTreeSet<Point>,
}

impl BruteForceIndex {
    /// Creates an empty index
    pub fn new() -> Self {
        Self { points: BTreeSet::new() }
    }

    /// Returns the number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Adds `point`; `Ok(false)` if it was already present.
    ///
    /// # Errors
    ///
    /// [`SpatialError::InvalidPoint`](crate::SpatialError::InvalidPoint) for a
    /// point outside the supported range.
    pub fn insert(&mut self, point: Point) -> Result<bool> {
        Ok(self.points.insert(point.validated()?))
    }

    /// Returns true if `point` is stored.
    ///
    /// # Errors
    ///
    /// [`SpatialError::InvalidPoint`](crate::SpatialError::InvalidPoint) for a
    /// point outside the supported range.
    pub fn contains(&self, point: Point) -> Result<bool> {
        Ok(self.points.contains(&point.validated()?))
    }

    /// Points inside `rect`, in (x, y) order.
    pub fn range(&self, rect: &Rect) -> Vec<Point> {
        let mut results = Vec::new();
        self.range_into(rect, &mut results);
        results
    }

    /// Like [`range`](Self::range), reusing `results`. The vector is cleared first.
    pub fn range_into(&self, rect: &Rect, results: &mut Vec<Point>) {
        results.clear();
        results.extend(self.points.iter().copied().filter(|&p| rect.contains(p)));
    }

    /// Closest point to `query`; ties go to the smallest point in (x, y) order.
    ///
    /// # Errors
    ///
    /// [`SpatialError::InvalidPoint`](crate::SpatialError::InvalidPoint) for a
    /// query outside the supported range.
    pub fn nearest(&self, query: Point) -> Result<Option<Point>> {
        let query = query.validated()?;

        let mut best: Option<(Point, f64)> = None;
        for &p in &self.points {
            let dist = query.distance_squared_to(p);
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((p, dist)),
            }
        }
        Ok(best.map(|(p, _)| p))
    }

    /// Points in (x, y) order.
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().copied()
    }
}

impl SpatialIndex for BruteForceIndex {
    fn insert(&mut self, point: Point) -> Result<bool> {
        Self::insert(self, point)
    }

    fn contains(&self, point: Point) -> Result<bool> {
        Self::contains(self, point)
    }

    fn range_into(&self, rect: &Rect, results: &mut Vec<Point>) {
        Self::range_into(self, rect, results);
    }

    fn nearest(&self, point: Point) -> Result<Option<Point>> {
        Self::nearest(self, point)
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}
