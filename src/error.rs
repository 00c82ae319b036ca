use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KDIndexError {
    /// A point or rectangle does not have the dimensionality of the rest of the input.
    #[error("Dimension mismatch: expected {expected} coordinates, got {actual}")]
    DimensionMismatch {
        /// Dimensionality of the tree (or of the first point seen)
        expected: usize,
        /// Dimensionality of the offending point
        actual: usize,
    },

    /// The lower corner of a rectangle exceeds its upper corner on some axis.
    #[error("Invalid rectangle: lower bound exceeds upper bound on axis {axis}")]
    InvalidRectangle {
        /// The first axis on which the bounds are inverted
        axis: usize,
    },

    /// Points must have at least one coordinate.
    #[error("Points must have at least one coordinate")]
    ZeroDimension,

    /// A coordinate is not comparable with itself, such as a floating point NaN.
    #[error("Coordinate on axis {axis} is not comparable (NaN)")]
    InvalidCoordinate {
        /// Axis of the offending coordinate
        axis: usize,
    },

    /// A search radius was negative or NaN.
    #[error("Search radius must be a non-negative number")]
    InvalidRadius,

    /// Insertion ids are stored as `u32`.
    #[error("Too many items: {0} exceeds the u32 id space")]
    TooManyItems(usize),
}

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, KDIndexError>;
