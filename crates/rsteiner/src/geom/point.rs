use std::fmt;
use std::hash::{Hash, Hasher};

/// Read access to planar coordinates.
///
/// Solvers only ever need `x`/`y`; anything implementing this can be turned
/// into a [`Point`] with [`Point::from_coords`].
pub trait Coord2 {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
}

/// Immutable 2D point with exact structural equality.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        // -0.0 + 0.0 == +0.0; keeps Hash consistent with PartialEq.
        Self {
            x: x + 0.0,
            y: y + 0.0,
        }
    }

    #[inline]
    pub fn from_coords<C: Coord2 + ?Sized>(c: &C) -> Self {
        Self::new(c.x(), c.y())
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Coord2 for Point {
    #[inline]
    fn x(&self) -> f64 {
        self.x
    }
    #[inline]
    fn y(&self) -> f64 {
        self.y
    }
}

impl Coord2 for (f64, f64) {
    #[inline]
    fn x(&self) -> f64 {
        self.0
    }
    #[inline]
    fn y(&self) -> f64 {
        self.1
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

// Points are only ever compared exactly and never hold NaN inside solvers
// (inputs are rejected up front), so `Eq` is sound for our use.
impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// `|Δx| + |Δy|`.
#[inline]
pub fn manhattan(a: Point, b: Point) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Straight-line distance.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}
