// THEORY:
// The footprint is a small boolean stencil that says which relative positions count
// as "neighbors" during growth. Walking the stencil for every frontier cell would
// re-derive the same offsets millions of times, so the template flattens it once
// into a list of relative offset vectors.
//
// Key architectural principles:
// 1.  **Center Alignment**: The offset origin is `extent / 2` on every axis, which is
//     why extents must be odd. The center cell itself (offset zero) may be part of the
//     stencil; it is harmless because the center is always already visited.
// 2.  **Fixed Enumeration Order**: Offsets are listed in the stencil's row-major
//     layout order. The per-neighbor policy updates the running mean between
//     neighbors, so this order is part of the result, not an implementation detail.
// 3.  **Built Once**: A template is computed at call entry and only read afterwards.

use crate::core_modules::error::FillError;
use ndarray::{ArrayD, ArrayViewD, IxDyn};

/// The flattened list of neighbor offsets derived from a footprint stencil.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborhoodTemplate<const N: usize> {
    offsets: Vec<[isize; N]>,
    center: [usize; N],
}

impl<const N: usize> NeighborhoodTemplate<N> {
    /// Validates the footprint's rank and odd extents, then flattens it.
    pub fn from_footprint(footprint: &ArrayViewD<'_, bool>) -> Result<Self, FillError> {
        if footprint.ndim() != N {
            return Err(FillError::RankMismatch {
                array: "footprint",
                expected: N,
                actual: footprint.ndim(),
            });
        }

        let mut center = [0usize; N];
        for (axis, &extent) in footprint.shape().iter().enumerate() {
            if extent % 2 == 0 {
                return Err(FillError::EvenFootprintExtent { axis, extent });
            }
            center[axis] = extent / 2;
        }

        // `indexed_iter` walks in logical row-major order regardless of memory layout.
        let offsets = footprint
            .indexed_iter()
            .filter(|(_, on)| **on)
            .map(|(index, _)| {
                let mut offset = [0isize; N];
                for (axis, slot) in offset.iter_mut().enumerate() {
                    *slot = index[axis] as isize - center[axis] as isize;
                }
                offset
            })
            .collect();

        Ok(Self { offsets, center })
    }

    /// Offsets in stencil layout order.
    pub fn offsets(&self) -> &[[isize; N]] {
        &self.offsets
    }

    /// Index of the stencil's center cell along each axis.
    pub fn center(&self) -> [usize; N] {
        self.center
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// A full square (2D) or cube (3D) footprint of extent `2 * radius + 1`.
///
/// With `radius = 1` this is 8-connectivity in 2D and 26-connectivity in 3D.
pub fn full_footprint<const N: usize>(radius: usize) -> ArrayD<bool> {
    ArrayD::from_elem(IxDyn(&[2 * radius + 1; N]), true)
}

/// An axis-aligned cross footprint of extent `2 * radius + 1`.
///
/// With `radius = 1` this is 4-connectivity in 2D and 6-connectivity in 3D.
pub fn orthogonal_footprint<const N: usize>(radius: usize) -> ArrayD<bool> {
    ArrayD::from_shape_fn(IxDyn(&[2 * radius + 1; N]), |index| {
        let off_center = (0..N).filter(|&axis| index[axis] != radius).count();
        off_center <= 1
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn offsets_follow_layout_order() {
        let stencil = array![[false, true, false], [true, false, true], [false, true, false]].into_dyn();
        let template = NeighborhoodTemplate::<2>::from_footprint(&stencil.view()).unwrap();
        assert_eq!(template.center(), [1, 1]);
        assert_eq!(template.offsets(), &[[-1, 0], [0, -1], [0, 1], [1, 0]]);
    }

    #[test]
    fn transposed_view_is_read_logically() {
        let stencil = array![[false, true, false], [false, false, false], [false, false, false]]
            .into_dyn();
        let transposed = stencil.t();
        let template = NeighborhoodTemplate::<2>::from_footprint(&transposed).unwrap();
        assert_eq!(template.offsets(), &[[0, -1]]);
    }

    #[test]
    fn non_square_stencils_center_per_axis() {
        let stencil = ArrayD::from_elem(IxDyn(&[1, 5]), true);
        let template = NeighborhoodTemplate::<2>::from_footprint(&stencil.view()).unwrap();
        assert_eq!(template.center(), [0, 2]);
        assert_eq!(template.offsets().first(), Some(&[0, -2]));
        assert_eq!(template.offsets().last(), Some(&[0, 2]));
    }

    #[test]
    fn even_extent_is_rejected() {
        let stencil = ArrayD::from_elem(IxDyn(&[3, 4]), true);
        let err = NeighborhoodTemplate::<2>::from_footprint(&stencil.view()).unwrap_err();
        assert!(matches!(err, FillError::EvenFootprintExtent { axis: 1, extent: 4 }));
    }

    #[test]
    fn rank_must_match_grid() {
        let stencil = full_footprint::<3>(1);
        let err = NeighborhoodTemplate::<2>::from_footprint(&stencil.view()).unwrap_err();
        assert!(matches!(err, FillError::RankMismatch { expected: 2, actual: 3, .. }));
    }

    #[test]
    fn builders_produce_expected_connectivity() {
        let cube = NeighborhoodTemplate::<3>::from_footprint(&full_footprint::<3>(1).view()).unwrap();
        assert_eq!(cube.len(), 27);

        let cross = NeighborhoodTemplate::<3>::from_footprint(&orthogonal_footprint::<3>(1).view())
            .unwrap();
        // Six face neighbors plus the center.
        assert_eq!(cross.len(), 7);

        let wide = NeighborhoodTemplate::<2>::from_footprint(&orthogonal_footprint::<2>(2).view())
            .unwrap();
        assert_eq!(wide.len(), 9);
    }
}
