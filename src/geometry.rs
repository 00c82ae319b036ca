//! Point and rectangle value types.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{KDIndexError, Result};
use crate::r#type::{sq_dist, IndexableNum};

/// An ordered, fixed-length tuple of coordinates.
///
/// Points compare structurally and sort lexicographically by coordinate.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub struct Point<N: IndexableNum> {
    coords: Vec<N>,
}

impl<N: IndexableNum> Point<N> {
    /// Create a point from its coordinates.
    pub fn new(coords: impl Into<Vec<N>>) -> Self {
        Self {
            coords: coords.into(),
        }
    }

    /// The number of coordinates of this point.
    #[inline]
    pub fn dim(&self) -> usize {
        self.coords.len()
    }

    /// The coordinates of this point.
    #[inline]
    pub fn coords(&self) -> &[N] {
        &self.coords
    }

    /// The coordinate on the given axis, if the point has that many dimensions.
    #[inline]
    pub fn get(&self, axis: usize) -> Option<N> {
        self.coords.get(axis).copied()
    }

    /// Euclidean distance to another point.
    ///
    /// Returns [`KDIndexError::DimensionMismatch`] if the points differ in dimensionality.
    pub fn distance(&self, other: &Self) -> Result<f64> {
        check_dim(self.dim(), other.dim())?;
        Ok(sq_dist(&self.coords, &other.coords).sqrt())
    }

    /// Consume this point, returning its coordinates.
    pub fn into_inner(self) -> Vec<N> {
        self.coords
    }
}

impl<N: IndexableNum> AsRef<[N]> for Point<N> {
    fn as_ref(&self) -> &[N] {
        &self.coords
    }
}

impl<N: IndexableNum> From<Vec<N>> for Point<N> {
    fn from(coords: Vec<N>) -> Self {
        Self { coords }
    }
}

impl<N: IndexableNum, const K: usize> From<[N; K]> for Point<N> {
    fn from(coords: [N; K]) -> Self {
        Self {
            coords: coords.to_vec(),
        }
    }
}

impl<N: IndexableNum> From<(N, N)> for Point<N> {
    fn from((x, y): (N, N)) -> Self {
        Self { coords: vec![x, y] }
    }
}

impl<N: IndexableNum> fmt::Display for Point<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Point(")?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str(")")
    }
}

/// An axis-aligned box defined by its lower and upper corners.
///
/// A `Rect` can only be constructed with `lower[i] <= upper[i]` on every axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Rect<N: IndexableNum> {
    lower: Point<N>,
    upper: Point<N>,
}

impl<N: IndexableNum> Rect<N> {
    /// Create a rectangle from its lower and upper corners.
    ///
    /// Fails with [`KDIndexError::DimensionMismatch`] if the corners differ in dimensionality and
    /// with [`KDIndexError::InvalidRectangle`] if a lower bound exceeds its upper bound (or
    /// either is NaN).
    pub fn try_new(lower: impl Into<Point<N>>, upper: impl Into<Point<N>>) -> Result<Self> {
        let lower = lower.into();
        let upper = upper.into();
        check_dim(lower.dim(), upper.dim())?;
        for (axis, (lo, hi)) in lower.coords.iter().zip(&upper.coords).enumerate() {
            if !matches!(lo.partial_cmp(hi), Some(Ordering::Less | Ordering::Equal)) {
                return Err(KDIndexError::InvalidRectangle { axis });
            }
        }
        Ok(Self { lower, upper })
    }

    /// The lower corner.
    pub fn lower(&self) -> &Point<N> {
        &self.lower
    }

    /// The upper corner.
    pub fn upper(&self) -> &Point<N> {
        &self.upper
    }

    /// The number of dimensions of this rectangle.
    #[inline]
    pub fn dim(&self) -> usize {
        self.lower.dim()
    }

    /// Whether the rectangle contains the point, boundary included.
    #[inline]
    pub fn contains(&self, point: &Point<N>) -> bool {
        point.dim() == self.dim() && self.contains_coords(&point.coords)
    }

    /// Containment test on raw coordinates. The caller guarantees the dimensionality matches.
    #[inline]
    pub(crate) fn contains_coords(&self, coords: &[N]) -> bool {
        coords
            .iter()
            .zip(self.lower.coords.iter().zip(&self.upper.coords))
            .all(|(c, (lo, hi))| lo <= c && c <= hi)
    }
}

impl<N: IndexableNum> fmt::Display for Rect<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rect({}, {})", self.lower, self.upper)
    }
}

#[inline]
pub(crate) fn check_dim(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(KDIndexError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn point_display() {
        assert_eq!(Point::from([7, 2]).to_string(), "Point(7, 2)");
        assert_eq!(Point::from([1.5, -2.0, 3.0]).to_string(), "Point(1.5, -2, 3)");
    }

    #[test]
    fn point_ordering_is_lexicographic() {
        let mut points: Vec<Point<i32>> = vec![[5, 4].into(), [2, 3].into(), [5, 1].into()];
        points.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let expected: Vec<Point<i32>> = vec![[2, 3].into(), [5, 1].into(), [5, 4].into()];
        assert_eq!(points, expected);
    }

    #[test]
    fn point_accessors() {
        let point = Point::from((3, -1));
        assert_eq!(point, Point::from([3, -1]));
        assert_eq!(point.get(1), Some(-1));
        assert_eq!(point.get(2), None);
        assert_eq!(point.into_inner(), vec![3, -1]);
    }

    #[test]
    fn point_distance() {
        let a = Point::from([0., 0., 0.]);
        let b = Point::from([2., 3., 6.]);
        assert_eq!(a.distance(&b).unwrap(), 7.);
        assert_eq!(
            a.distance(&Point::from([1., 1.])),
            Err(KDIndexError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn rect_rejects_inverted_bounds() {
        assert_eq!(
            Rect::try_new([0, 5], [6, 4]),
            Err(KDIndexError::InvalidRectangle { axis: 1 })
        );
        assert_eq!(
            Rect::try_new([0., f64::NAN], [1., 1.]),
            Err(KDIndexError::InvalidRectangle { axis: 1 })
        );
        assert_eq!(
            Rect::try_new([0, 0], [1, 1, 1]),
            Err(KDIndexError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn rect_contains_boundary() {
        let rect = Rect::try_new([0, 0], [6, 6]).unwrap();
        assert!(rect.contains(&Point::from([0, 6])));
        assert!(rect.contains(&Point::from([5, 4])));
        assert!(!rect.contains(&Point::from([7, 2])));
        assert!(!rect.contains(&Point::from([1, 1, 1])));
        assert_eq!(rect.to_string(), "Rect(Point(0, 0), Point(6, 6))");
    }

    #[test]
    fn degenerate_rect_is_valid() {
        let rect = Rect::try_new([3, 3], [3, 3]).unwrap();
        assert!(rect.contains(&Point::from([3, 3])));
    }
}
