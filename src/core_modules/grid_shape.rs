// THEORY:
// `GridShape` is the index arithmetic shared by every other component. A grid of
// rank `N` is addressed by `[usize; N]` coordinates, laid out row-major (last axis
// fastest), so a coordinate maps to a single linear index into the flat field,
// mask and visited buffers. Relative moves are `[isize; N]` offsets; a move that
// would leave the grid yields `None` instead of wrapping.

use crate::core_modules::error::FillError;

/// Extents and row-major strides of an `N`-dimensional grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape<const N: usize> {
    dims: [usize; N],
    strides: [usize; N],
}

impl<const N: usize> GridShape<N> {
    pub fn new(dims: [usize; N]) -> Self {
        let mut strides = [1usize; N];
        for axis in (0..N.saturating_sub(1)).rev() {
            strides[axis] = strides[axis + 1] * dims[axis + 1];
        }
        Self { dims, strides }
    }

    pub fn dims(&self) -> [usize; N] {
        self.dims
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.dims.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Linear row-major index of an in-bounds coordinate.
    #[inline]
    pub fn index_of(&self, coord: [usize; N]) -> usize {
        coord
            .iter()
            .zip(self.strides.iter())
            .map(|(c, s)| c * s)
            .sum()
    }

    /// Moves `from` by `offset`, or `None` if the result leaves the grid.
    #[inline]
    pub fn step(&self, from: [usize; N], offset: [isize; N]) -> Option<[usize; N]> {
        let mut moved = [0usize; N];
        for axis in 0..N {
            let value = from[axis].checked_add_signed(offset[axis])?;
            if value >= self.dims[axis] {
                return None;
            }
            moved[axis] = value;
        }
        Some(moved)
    }

    /// Converts a caller-supplied seed into an in-bounds coordinate.
    pub fn locate_seed(&self, seed: &[isize]) -> Result<[usize; N], FillError> {
        if seed.len() != N {
            return Err(FillError::SeedRank {
                expected: N,
                actual: seed.len(),
            });
        }
        let mut coord = [0usize; N];
        for axis in 0..N {
            match usize::try_from(seed[axis]) {
                Ok(value) if value < self.dims[axis] => coord[axis] = value,
                _ => {
                    return Err(FillError::SeedOutOfBounds {
                        seed: seed.to_vec(),
                        extents: self.dims.to_vec(),
                    });
                }
            }
        }
        Ok(coord)
    }
}
