//! 2d-tree over points in the plane.
//!
//! Each level of the tree splits the plane with a line through the node's
//! point: vertical lines (comparing x) at even depths, horizontal lines
//! (comparing y) at odd depths. A point strictly below the node on the level's
//! axis goes left, anything else goes right, so every subtree is confined to
//! one side of each ancestor's splitting line. Range and nearest searches use
//! that confinement to skip whole subtrees.
//!
//! The tree is not rebalanced; its shape is a function of insertion order.
//! Sorted input degenerates it into a path, so teardown, cloning and the
//! structural walks run on explicit stacks instead of the call stack.

use std::fmt;

use tracing::{debug, trace};

use crate::error::Result;
use crate::geometry::{Axis, Point, Rect};
use crate::index::SpatialIndex;

/// Tree node. The splitting axis is implied by depth and never stored.
struct Node {
    point: Point,
    /// Points strictly below `point` on this level's axis
    left: Option<Box<Node>>,
    /// Points at or above `point` on this level's axis
    right: Option<Box<Node>>,
}

impl Node {
    fn leaf(point: Point) -> Self {
        Self { point, left: None, right: None }
    }

    /// Children ordered (same side as `p`, opposite side) for this level's axis.
    #[inline]
    fn sides(&self, p: Point, axis: Axis) -> (Option<&Self>, Option<&Self>) {
        if axis.is_below(p, self.point) {
            (self.left.as_deref(), self.right.as_deref())
        } else {
            (self.right.as_deref(), self.left.as_deref())
        }
    }
}

/// Mutable 2D point set backed by a 2d-tree.
///
/// # Examples
/// ```
/// use kdset::prelude::*;
///
/// let mut tree = SpatialTree::new();
/// tree.insert(Point::new(0.2, 0.3)).unwrap();
/// tree.insert(Point::new(0.4, 0.7)).unwrap();
/// tree.insert(Point::new(0.9, 0.6)).unwrap();
///
/// assert!(tree.contains(Point::new(0.4, 0.7)).unwrap());
///
/// let rect = Rect::new(0.0, 0.0, 0.5, 1.0).unwrap();
/// assert_eq!(tree.range(&rect).len(), 2);
///
/// let nearest = tree.nearest(Point::new(0.95, 0.6)).unwrap();
/// assert_eq!(nearest, Some(Point::new(0.9, 0.6)));
/// ```
#[derive(Default)]
pub struct SpatialTree {
    root: Option<Box<Node>>,
    /// Number of nodes
    size: usize,
}

impl SpatialTree {
    /// Creates an empty tree
    pub fn new() -> Self {
        Self { root: None, size: 0 }
    }

    /// Builds a tree by inserting `points` in order.
    ///
    /// # Errors
    ///
    /// Stops at the first point outside the supported range and returns its
    /// [`SpatialError::InvalidPoint`](crate::SpatialError::InvalidPoint).
    pub fn from_points<I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut tree = Self::new();
        for p in points {
            let _inserted = tree.insert(p)?;
        }
        debug!(size = tree.size, height = tree.height(), "built spatial tree");
        Ok(tree)
    }

    /// Returns the number of points
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns whether the tree is empty
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of levels; 0 for an empty tree.
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&Node, usize)> = self.root.as_deref().map(|n| (n, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        deepest
    }

    /// Inserts `point`, returning `Ok(true)` if a new node was created.
    ///
    /// Re-inserting a stored point is a no-op and returns `Ok(false)`.
    ///
    /// # Errors
    ///
    /// [`SpatialError::InvalidPoint`](crate::SpatialError::InvalidPoint) for a
    /// non-finite point or one beyond [`Point::MAX_COORD`]. The tree is left
    /// untouched.
    pub fn insert(&mut self, point: Point) -> Result<bool> {
        let point = point.validated()?;

        let mut slot = &mut self.root;
        let mut axis = Axis::ROOT;
        let mut depth = 0_usize;
        while let Some(node) = slot {
            if node.point == point {
                trace!(%point, depth, "duplicate point skipped");
                return Ok(false);
            }
            slot = if axis.is_below(point, node.point) {
                &mut node.left
            } else {
                &mut node.right
            };
            axis = axis.flip();
            depth += 1;
        }

        *slot = Some(Box::new(Node::leaf(point)));
        self.size += 1;
        trace!(%point, depth, "inserted point");
        Ok(true)
    }

    /// Returns true if `point` is stored.
    ///
    /// # Errors
    ///
    /// [`SpatialError::InvalidPoint`](crate::SpatialError::InvalidPoint) for a
    /// point outside the supported range.
    pub fn contains(&self, point: Point) -> Result<bool> {
        let point = point.validated()?;

        let mut node = self.root.as_deref();
        let mut axis = Axis::ROOT;
        while let Some(n) = node {
            if n.point == point {
                return Ok(true);
            }
            node = if axis.is_below(point, n.point) {
                n.left.as_deref()
            } else {
                n.right.as_deref()
            };
            axis = axis.flip();
        }
        Ok(false)
    }

    /// Every stored point inside `rect` (edges inclusive).
    ///
    /// The order is deterministic for a given tree and rectangle.
    pub fn range(&self, rect: &Rect) -> Vec<Point> {
        let mut results = Vec::new();
        self.range_into(rect, &mut results);
        results
    }

    /// Like [`range`](Self::range), reusing `results`. The vector is cleared first.
    pub fn range_into(&self, rect: &Rect, results: &mut Vec<Point>) {
        results.clear();
        Self::range_recursive(self.root.as_deref(), rect, Axis::ROOT, results);
    }

    fn range_recursive(node: Option<&Node>, rect: &Rect, axis: Axis, results: &mut Vec<Point>) {
        let Some(node) = node else {
            return;
        };

        let split = axis.coord(node.point);
        let (min, max) = axis.extent(rect);

        if split < min {
            // Rectangle lies entirely on the high side of the splitting line.
            Self::range_recursive(node.right.as_deref(), rect, axis.flip(), results);
        } else if split > max {
            // Strictly above max means the low side holds every candidate.
            Self::range_recursive(node.left.as_deref(), rect, axis.flip(), results);
        } else {
            Self::range_recursive(node.left.as_deref(), rect, axis.flip(), results);
            Self::range_recursive(node.right.as_deref(), rect, axis.flip(), results);
            if rect.contains(node.point) {
                results.push(node.point);
            }
        }
    }

    /// Stored point closest to `query`, or `None` if the tree is empty.
    ///
    /// Ties keep the first point reached by the search.
    ///
    /// # Errors
    ///
    /// [`SpatialError::InvalidPoint`](crate::SpatialError::InvalidPoint) for a
    /// query outside the supported range, whether or not the tree is empty.
    pub fn nearest(&self, query: Point) -> Result<Option<Point>> {
        let query = query.validated()?;

        let Some(root) = self.root.as_deref() else {
            return Ok(None);
        };
        Ok(Some(Self::nearest_recursive(Some(root), query, root.point, Axis::ROOT)))
    }

    fn nearest_recursive(node: Option<&Node>, query: Point, champion: Point, axis: Axis) -> Point {
        let Some(node) = node else {
            return champion;
        };

        let champion = if query.distance_squared_to(node.point) < query.distance_squared_to(champion) {
            node.point
        } else {
            champion
        };

        let (near, far) = node.sides(query, axis);
        let best = Self::nearest_recursive(near, query, champion, axis.flip());

        // Every point past the splitting line is at least this far away.
        if axis.gap_squared(query, node.point) < query.distance_squared_to(best) {
            // Seeded with `best`, so the far search can only return something closer.
            Self::nearest_recursive(far, query, best, axis.flip())
        } else {
            best
        }
    }

    /// Iterates over stored points in pre-order.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: self.root.as_deref().into_iter().collect() }
    }
}

impl SpatialIndex for SpatialTree {
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
        self.size
    }
}

impl Clone for SpatialTree {
    fn clone(&self) -> Self {
        // Post-order: finished subtrees wait on `built` until their parent pops.
        let mut built: Vec<Box<Node>> = Vec::new();
        let mut pending: Vec<(&Node, bool)> = self.root.as_deref().map(|n| (n, false)).into_iter().collect();
        while let Some((node, children_done)) = pending.pop() {
            if children_done {
                // Right was finished last, so it is on top.
                let right = node.right.as_ref().and_then(|_| built.pop());
                let left = node.left.as_ref().and_then(|_| built.pop());
                built.push(Box::new(Node { point: node.point, left, right }));
            } else {
                pending.push((node, true));
                pending.extend(node.right.as_deref().map(|n| (n, false)));
                pending.extend(node.left.as_deref().map(|n| (n, false)));
            }
        }
        Self { root: built.pop(), size: self.size }
    }
}

impl Drop for SpatialTree {
    fn drop(&mut self) {
        // Detach children before each node is freed so no drop glue recurses.
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl fmt::Debug for SpatialTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialTree")
            .field("size", &self.size)
            .field("points", &self.iter().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Pre-order iterator over the points of a [`SpatialTree`].
#[derive(Clone)]
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl fmt::Debug for Iter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("pending", &self.stack.len()).finish()
    }
}

impl Iterator for Iter<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let node = self.stack.pop()?;
        if let Some(right) = node.right.as_deref() {
            self.stack.push(right);
        }
        if let Some(left) = node.left.as_deref() {
            self.stack.push(left);
        }
        Some(node.point)
    }
}

impl<'a> IntoIterator for &'a SpatialTree {
    type Item = Point;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Walks the whole tree checking that every point sits on the correct side of
/// each ancestor's splitting line.
#[cfg(test)]
pub(crate) fn check_confinement(tree: &SpatialTree) -> bool {
    // Each entry carries the (axis, split coordinate, must be below) constraints
    // of every ancestor on its path.
    type Bounds = Vec<(Axis, f64, bool)>;
    let mut stack: Vec<(&Node, Axis, Bounds)> =
        tree.root.as_deref().map(|n| (n, Axis::ROOT, Vec::new())).into_iter().collect();

    while let Some((node, axis, bounds)) = stack.pop() {
        let confined = bounds.iter().all(|&(a, split, below)| {
            let c = a.coord(node.point);
            if below { c < split } else { c >= split }
        });
        if !confined {
            return false;
        }

        let split = axis.coord(node.point);
        if let Some(left) = node.left.as_deref() {
            let mut inner = bounds.clone();
            inner.push((axis, split, true));
            stack.push((left, axis.flip(), inner));
        }
        if let Some(right) = node.right.as_deref() {
            let mut inner = bounds;
            inner.push((axis, split, false));
            stack.push((right, axis.flip(), inner));
        }
    }
    true
}
