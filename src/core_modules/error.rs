// THEORY:
// Every way a region-growing call can fail is a contract violation by the caller,
// detected before any scratch state exists. There are exactly two families:
// shape errors (an array has the wrong rank or extents for the chosen variant)
// and bounds errors (the seed lies outside the grid). Once inputs are validated
// the growth loop itself cannot fail, so nothing downstream returns `Result`.

/// Errors reported by the region-growing entry points.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FillError {
    /// An input array has the wrong number of dimensions for the variant.
    #[error("{array} must have {expected} dimensions, got {actual}")]
    RankMismatch {
        /// Which input was rejected.
        array: &'static str,
        /// Rank required by the variant.
        expected: usize,
        /// Rank that was supplied.
        actual: usize,
    },

    /// An input array's spatial extents differ from the field's.
    #[error("{array} shape {actual:?} does not match the field's spatial shape {expected:?}")]
    ShapeMismatch {
        /// Which input was rejected.
        array: &'static str,
        /// Spatial shape of the field.
        expected: Vec<usize>,
        /// Shape that was supplied.
        actual: Vec<usize>,
    },

    /// Footprint extents must be odd so the template has a center cell.
    #[error("footprint extent {extent} along axis {axis} must be odd")]
    EvenFootprintExtent {
        /// Offending axis.
        axis: usize,
        /// Extent along that axis.
        extent: usize,
    },

    /// The field's trailing channel axis is empty.
    #[error("field must carry at least one channel")]
    NoChannels,

    /// The seed has a different number of coordinates than the grid has axes.
    #[error("seed has {actual} coordinates, expected {expected}")]
    SeedRank {
        /// Number of spatial axes.
        expected: usize,
        /// Number of coordinates supplied.
        actual: usize,
    },

    /// The seed coordinate lies outside the grid extents.
    #[error("seed {seed:?} lies outside grid extents {extents:?}")]
    SeedOutOfBounds {
        /// The seed as supplied.
        seed: Vec<isize>,
        /// Spatial extents of the grid.
        extents: Vec<usize>,
    },

    /// An output or converted array could not be assembled from its buffer.
    #[error("array layout error: {0}")]
    Layout(#[from] ndarray::ShapeError),
}

impl FillError {
    /// True for every variant caused by an array of the wrong rank or extents.
    pub fn is_shape_error(&self) -> bool {
        !self.is_bounds_error()
    }

    /// True when the seed lies outside the grid.
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, FillError::SeedOutOfBounds { .. })
    }
}
