//! Value types shared by the point set structures: points, rectangles and axes.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Result, SpatialError};

/// An immutable point in the plane.
///
/// Equality is exact coordinate equality. Negative zero is folded into
/// positive zero on construction so that equality and [`Ord`] agree.
///
/// The structures only store and query points whose coordinates lie within
/// `±`[`Point::MAX_COORD`]. Inside that range squared distances between any
/// two points stay finite, so nearest-neighbor comparisons are exact.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Coords", into = "Coords"))]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Largest coordinate magnitude accepted by the structures.
    ///
    /// A coordinate difference is at most `2e150`, whose square (`4e300`)
    /// plus another one still fits in an `f64`.
    pub const MAX_COORD: f64 = 1e150;

    /// Creates a point. Any coordinates are accepted here; the structures
    /// reject out-of-range points when they are inserted or queried.
    pub fn new(x: f64, y: f64) -> Self {
        // -0.0 + 0.0 == +0.0
        Self { x: x + 0.0, y: y + 0.0 }
    }

    /// The x-coordinate.
    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// The y-coordinate.
    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Returns true if both coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns true if both coordinates are within `±MAX_COORD`.
    #[inline]
    pub fn is_in_range(&self) -> bool {
        // NaN fails both comparisons
        self.x.abs() <= Self::MAX_COORD && self.y.abs() <= Self::MAX_COORD
    }

    /// Squared Euclidean distance to `other`.
    ///
    /// Finite for any two points satisfying [`is_in_range`](Self::is_in_range).
    #[inline]
    pub fn distance_squared_to(&self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: Self) -> f64 {
        self.distance_squared_to(other).sqrt()
    }

    /// Returns the point unchanged if it may be stored or queried.
    pub(crate) fn validated(self) -> Result<Self> {
        if self.is_in_range() {
            Ok(self)
        } else {
            Err(SpatialError::InvalidPoint { x: self.x, y: self.y })
        }
    }
}

// Structures only ever hold in-range points, for which total_cmp matches `==`.
impl Eq for Point {}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    /// Lexicographic by (x, y).
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct Coords {
    x: f64,
    y: f64,
}

#[cfg(feature = "serde")]
impl From<Coords> for Point {
    fn from(c: Coords) -> Self {
        Self::new(c.x, c.y)
    }
}

#[cfg(feature = "serde")]
impl From<Point> for Coords {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// Axis-aligned rectangle: xmin, ymin, xmax, ymax
///
/// Containment is inclusive on all four edges. Bounds may be infinite, so a
/// rectangle can describe a half-plane or the whole plane.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Bounds", into = "Bounds"))]
pub struct Rect {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

impl Rect {
    /// Creates a rectangle.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidRect`] if a bound is NaN or if
    /// `xmin > xmax` or `ymin > ymax`.
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Result<Self> {
        // NaN fails both comparisons
        if xmin <= xmax && ymin <= ymax {
            Ok(Self { xmin, ymin, xmax, ymax })
        } else {
            Err(SpatialError::InvalidRect { xmin, ymin, xmax, ymax })
        }
    }

    /// A rectangle covering the whole plane.
    pub fn everything() -> Self {
        Self {
            xmin: f64::NEG_INFINITY,
            ymin: f64::NEG_INFINITY,
            xmax: f64::INFINITY,
            ymax: f64::INFINITY,
        }
    }

    /// Left edge.
    #[inline]
    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    /// Bottom edge.
    #[inline]
    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    /// Right edge.
    #[inline]
    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    /// Top edge.
    #[inline]
    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    /// Extent along x; zero for a vertical segment.
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Extent along y; zero for a horizontal segment.
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Inclusive point containment.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.xmin && p.x <= self.xmax && p.y >= self.ymin && p.y <= self.ymax
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] x [{}, {}]", self.xmin, self.xmax, self.ymin, self.ymax)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct Bounds {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<Bounds> for Rect {
    type Error = SpatialError;

    fn try_from(b: Bounds) -> Result<Self> {
        Self::new(b.xmin, b.ymin, b.xmax, b.ymax)
    }
}

#[cfg(feature = "serde")]
impl From<Rect> for Bounds {
    fn from(r: Rect) -> Self {
        Self { xmin: r.xmin, ymin: r.ymin, xmax: r.xmax, ymax: r.ymax }
    }
}

/// The coordinate a tree level compares on.
///
/// The root level is `Vertical` (a vertical splitting line, comparing x) and
/// every level below flips once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_enums, reason = "the plane has exactly two axes")]
pub enum Axis {
    /// Vertical splitting line; compares x.
    Vertical,
    /// Horizontal splitting line; compares y.
    Horizontal,
}

impl Axis {
    /// Axis of the root level.
    pub const ROOT: Self = Self::Vertical;

    /// Axis of the level below.
    #[inline]
    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }

    /// Coordinate of `p` this axis compares on.
    #[inline]
    pub fn coord(self, p: Point) -> f64 {
        match self {
            Self::Vertical => p.x,
            Self::Horizontal => p.y,
        }
    }

    /// Inclusive (min, max) extent of `rect` on this axis.
    #[inline]
    pub fn extent(self, rect: &Rect) -> (f64, f64) {
        match self {
            Self::Vertical => (rect.xmin, rect.xmax),
            Self::Horizontal => (rect.ymin, rect.ymax),
        }
    }

    /// True if `p` belongs on the low side of the splitting line through `split`.
    #[inline]
    pub fn is_below(self, p: Point, split: Point) -> bool {
        self.coord(p) < self.coord(split)
    }

    /// Squared perpendicular distance from `p` to the splitting line through `split`.
    #[inline]
    pub fn gap_squared(self, p: Point, split: Point) -> f64 {
        let d = self.coord(p) - self.coord(split);
        d * d
    }
}
