//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the crate.
//! Users can import everything they need with:
//!
//! ```
//! use kdset::prelude::*;
//! ```

pub use crate::{BruteForceIndex, Point, Rect, SpatialError, SpatialIndex, SpatialTree};
