// THEORY:
// `FieldGrid` is the bridge between caller-owned arrays and the growth loop. The
// caller hands over read-only views of any layout; the grid checks them against the
// variant's dimensionality and exposes them as flat row-major slices that the loop
// can index with a single linear offset.
//
// Key architectural principles:
// 1.  **Validate First**: Rank, spatial shape and channel count are checked on the
//     views themselves, before anything is copied or allocated.
// 2.  **Borrow When Possible**: Standard-layout views are borrowed as-is. Anything
//     else (transposed, sliced with steps) is copied once into row-major order.
// 3.  **Read-Only**: The field and mask are never written; the grid hands out shared
//     slices only.

use crate::core_modules::error::FillError;
use crate::core_modules::grid_shape::GridShape;
use ndarray::ArrayViewD;
use std::borrow::Cow;

/// Checks the field and mask ranks and shapes for an `N`-dimensional variant.
///
/// Returns the spatial grid shape and the channel count.
pub fn validate_field_and_mask<A, const N: usize>(
    field: &ArrayViewD<'_, A>,
    mask: &ArrayViewD<'_, bool>,
) -> Result<(GridShape<N>, usize), FillError> {
    if field.ndim() != N + 1 {
        return Err(FillError::RankMismatch {
            array: "field",
            expected: N + 1,
            actual: field.ndim(),
        });
    }
    if mask.ndim() != N {
        return Err(FillError::RankMismatch {
            array: "mask",
            expected: N,
            actual: mask.ndim(),
        });
    }

    let spatial = &field.shape()[..N];
    if mask.shape() != spatial {
        return Err(FillError::ShapeMismatch {
            array: "mask",
            expected: spatial.to_vec(),
            actual: mask.shape().to_vec(),
        });
    }

    let channels = field.shape()[N];
    if channels == 0 {
        return Err(FillError::NoChannels);
    }

    let mut dims = [0usize; N];
    dims.copy_from_slice(spatial);
    Ok((GridShape::new(dims), channels))
}

/// A validated field and eligibility mask in flat row-major form.
///
/// The field and mask come from independent views and keep independent lifetimes.
#[derive(Debug, Clone)]
pub struct FieldGrid<'f, 'm, A: Clone, const N: usize> {
    values: Cow<'f, [A]>,
    mask: Cow<'m, [bool]>,
    shape: GridShape<N>,
    channels: usize,
}

impl<'f, 'm, A, const N: usize> FieldGrid<'f, 'm, A, N>
where
    A: Copy + Into<f64>,
{
    /// Wraps views already checked by [`validate_field_and_mask`].
    pub fn new(
        field: ArrayViewD<'f, A>,
        mask: ArrayViewD<'m, bool>,
        shape: GridShape<N>,
        channels: usize,
    ) -> Self {
        Self {
            values: row_major(&field),
            mask: row_major(&mask),
            shape,
            channels,
        }
    }

    pub fn shape(&self) -> &GridShape<N> {
        &self.shape
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Channel vector of the cell at a linear index.
    #[inline]
    pub fn cell(&self, index: usize) -> &[A] {
        let start = index * self.channels;
        &self.values[start..start + self.channels]
    }

    /// Whether the mask allows growth into the cell at a linear index.
    #[inline]
    pub fn is_eligible(&self, index: usize) -> bool {
        self.mask[index]
    }
}

fn row_major<'a, T: Clone>(view: &ArrayViewD<'a, T>) -> Cow<'a, [T]> {
    match view.to_slice() {
        Some(slice) => Cow::Borrowed(slice),
        None => Cow::Owned(view.iter().cloned().collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, Array2, Array3};

    #[test]
    fn accepts_matching_shapes() {
        let field = Array3::<f32>::zeros((4, 5, 2)).into_dyn();
        let mask = Array2::from_elem((4, 5), true).into_dyn();
        let (shape, channels) = validate_field_and_mask::<_, 2>(&field.view(), &mask.view()).unwrap();
        assert_eq!(shape.dims(), [4, 5]);
        assert_eq!(channels, 2);
    }

    #[test]
    fn rejects_wrong_ranks() {
        let field = Array3::<f32>::zeros((4, 5, 2)).into_dyn();
        let mask = Array2::from_elem((4, 5), true).into_dyn();
        let err = validate_field_and_mask::<_, 3>(&field.view(), &mask.view()).unwrap_err();
        assert!(matches!(err, FillError::RankMismatch { array: "field", expected: 4, actual: 3 }));

        let flat_mask = Array::from_elem(20, true).into_dyn();
        let err = validate_field_and_mask::<_, 2>(&field.view(), &flat_mask.view()).unwrap_err();
        assert!(matches!(err, FillError::RankMismatch { array: "mask", .. }));
    }

    #[test]
    fn rejects_mask_with_other_extents() {
        let field = Array3::<f32>::zeros((4, 5, 1)).into_dyn();
        let mask = Array2::from_elem((5, 4), true).into_dyn();
        let err = validate_field_and_mask::<_, 2>(&field.view(), &mask.view()).unwrap_err();
        assert!(matches!(err, FillError::ShapeMismatch { .. }));
    }

    #[test]
    fn rejects_empty_channel_axis() {
        let field = Array3::<f32>::zeros((2, 2, 0)).into_dyn();
        let mask = Array2::from_elem((2, 2), true).into_dyn();
        let err = validate_field_and_mask::<_, 2>(&field.view(), &mask.view()).unwrap_err();
        assert!(matches!(err, FillError::NoChannels));
    }

    #[test]
    fn standard_layout_is_borrowed_and_others_are_copied() {
        let field = Array3::from_shape_fn((2, 3, 2), |(i, j, c)| (i * 100 + j * 10 + c) as f32);
        let mask = Array2::from_elem((2, 3), true);

        let dyn_field = field.view().into_dyn();
        let dyn_mask = mask.view().into_dyn();
        let (shape, channels) = validate_field_and_mask::<_, 2>(&dyn_field, &dyn_mask).unwrap();
        let grid = FieldGrid::new(dyn_field, dyn_mask, shape, channels);
        assert!(matches!(grid.values, Cow::Borrowed(_)));
        assert_eq!(grid.cell(shape.index_of([1, 2])), &[120.0, 121.0]);

        // Swap the spatial axes: the (3, 2) grid must still read logically.
        let mut swapped = field.view();
        swapped.swap_axes(0, 1);
        let swapped_mask = mask.t();
        let dyn_field = swapped.into_dyn();
        let dyn_mask = swapped_mask.into_dyn();
        let (shape, channels) = validate_field_and_mask::<_, 2>(&dyn_field, &dyn_mask).unwrap();
        let grid = FieldGrid::new(dyn_field, dyn_mask, shape, channels);
        assert!(matches!(grid.values, Cow::Owned(_)));
        assert_eq!(shape.dims(), [3, 2]);
        assert_eq!(grid.cell(shape.index_of([2, 1])), &[120.0, 121.0]);
        assert!(grid.is_eligible(shape.index_of([2, 1])));
    }

    fn grid_from<'f, 'm>(
        field: ArrayViewD<'f, f32>,
        mask: ArrayViewD<'m, bool>,
    ) -> FieldGrid<'f, 'm, f32, 2> {
        let (shape, channels) = validate_field_and_mask::<_, 2>(&field, &mask).unwrap();
        FieldGrid::new(field, mask, shape, channels)
    }

    #[test]
    fn field_and_mask_keep_separate_lifetimes() {
        let field = Array3::from_elem((2, 2, 1), 4.0f32);
        let corner = {
            let mask = Array2::from_shape_vec((2, 2), vec![true, false, true, true]).unwrap();
            let grid = grid_from(field.view().into_dyn(), mask.view().into_dyn());
            assert!(!grid.is_eligible(1));
            assert!(grid.is_eligible(2));
            grid.cell(3).to_vec()
        };
        assert_eq!(corner, vec![4.0]);
    }
}
