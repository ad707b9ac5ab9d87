use std::fmt;

use super::point::{euclidean, manhattan, Point};

/// Distance used to weight an edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Metric {
    #[default]
    Manhattan,
    Euclidean,
}

impl Metric {
    #[inline]
    pub fn distance(self, a: Point, b: Point) -> f64 {
        match self {
            Metric::Manhattan => manhattan(a, b),
            Metric::Euclidean => euclidean(a, b),
        }
    }
}

/// Unordered pair of points with a scalar weight.
///
/// `PartialEq` compares endpoints in stored order and the weight; use
/// [`Edge::same_endpoints`] when orientation should not matter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub a: Point,
    pub b: Point,
    pub weight: f64,
}

impl Edge {
    #[inline]
    pub fn new(a: Point, b: Point, weight: f64) -> Self {
        Self { a, b, weight }
    }

    /// Edge weighted by the Manhattan distance of its endpoints.
    #[inline]
    pub fn manhattan(a: Point, b: Point) -> Self {
        Self::new(a, b, manhattan(a, b))
    }

    #[inline]
    pub fn with_metric(a: Point, b: Point, metric: Metric) -> Self {
        Self::new(a, b, metric.distance(a, b))
    }

    #[inline]
    pub fn same_endpoints(&self, other: &Edge) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }

    /// Endpoint opposite to `p`, if `p` is an endpoint.
    #[inline]
    pub fn other(&self, p: Point) -> Option<Point> {
        if self.a == p {
            Some(self.b)
        } else if self.b == p {
            Some(self.a)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.a == self.b
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.a.y() == self.b.y()
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.a.x() == self.b.x()
    }

    #[inline]
    pub fn is_axis_aligned(&self) -> bool {
        self.is_horizontal() || self.is_vertical()
    }

    #[inline]
    pub fn manhattan_length(&self) -> f64 {
        manhattan(self.a, self.b)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -- {} [{}]", self.a, self.b, self.weight)
    }
}
