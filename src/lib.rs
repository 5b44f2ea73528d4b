//! # kdset - 2D Point Set on a 2d-tree
//!
//! A mutable set of points in the plane answering membership, rectangle range
//! and nearest-neighbor queries without scanning every point.
//!
//! ## Features
//!
//! - **Incremental Insertion**: Points are added one at a time, no build step
//! - **Range Search**: All points inside an axis-aligned rectangle, edges inclusive
//! - **Nearest Neighbor**: Closest stored point to any query point
//! - **Reference Oracle**: [`BruteForceIndex`] answers the same queries by full scan
//!
//! ## Quick Start
//!
//! ```rust
//! use kdset::prelude::*;
//!
//! let mut tree = SpatialTree::new();
//! tree.insert(Point::new(0.2, 0.3))?;
//! tree.insert(Point::new(0.4, 0.7))?;
//! tree.insert(Point::new(0.9, 0.6))?;
//! tree.insert(Point::new(0.1, 0.1))?;
//! assert_eq!(tree.len(), 4);
//!
//! // Points inside x in [0, 0.5], y in [0, 1]
//! let rect = Rect::new(0.0, 0.0, 0.5, 1.0)?;
//! let mut results = Vec::new();
//! tree.range_into(&rect, &mut results);
//! assert_eq!(results.len(), 3);
//!
//! // Closest stored point
//! assert_eq!(tree.nearest(Point::new(0.95, 0.6))?, Some(Point::new(0.9, 0.6)));
//! # Ok::<(), kdset::SpatialError>(())
//! ```
//!
//! ## How It Works
//!
//! Each node splits the plane with a line through its point, alternating
//! between vertical and horizontal lines level by level. A range search only
//! descends into both children when the rectangle straddles the splitting
//! line. A nearest search visits the far side of a line only when the line is
//! closer to the query than the best point found so far.
//!
//! The tree is not rebalanced. Random insertion order gives logarithmic depth
//! on average; sorted input degenerates to a list.
//!
//! ## Threads
//!
//! All operations are synchronous. Share a tree between threads by wrapping it
//! in a `Mutex` or `RwLock`.

pub mod brute_force;
pub mod error;
pub mod geometry;
pub mod index;
pub mod prelude;
pub mod spatial_tree;

pub use brute_force::BruteForceIndex;
pub use error::{Result, SpatialError};
pub use geometry::{Axis, Point, Rect};
pub use index::SpatialIndex;
pub use spatial_tree::SpatialTree;

mod component_tests;
