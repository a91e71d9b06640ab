// THEORY:
// The `RegionGrowth` record is what a caller gets back: the membership mask shaped
// like the field's spatial grid, the final per-channel mean, and a few counters that
// describe how the region came to be. It is a "dumb" data container. Assembly only
// moves the engine's scratch buffers into owned arrays; no further analysis happens
// here.

use crate::core_modules::error::FillError;
use crate::core_modules::growth_engine::{GrowthOutcome, GrowthSummary};
use ndarray::{Array, Array1, ArrayD, Dimension, IxDyn};

/// The grown region and its statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionGrowth {
    /// Region membership, same spatial shape as the field.
    pub mask: ArrayD<bool>,
    /// Final per-channel mean of the region; all zeros for an empty region.
    pub mean: Array1<f64>,
    /// Number of cells in the region.
    pub cell_count: usize,
    /// How the region was grown.
    pub summary: GrowthSummary,
}

impl RegionGrowth {
    /// The result for a seed the mask excludes: nothing grown, zero mean.
    pub fn empty(dims: &[usize], channels: usize) -> Self {
        Self {
            mask: ArrayD::from_elem(IxDyn(dims), false),
            mean: Array1::zeros(channels),
            cell_count: 0,
            summary: GrowthSummary::default(),
        }
    }

    /// Packages a finished growth run.
    pub fn assemble(dims: &[usize], outcome: GrowthOutcome) -> Result<Self, FillError> {
        let GrowthOutcome {
            visited,
            statistics,
            summary,
        } = outcome;
        let cell_count = statistics.count();
        Ok(Self {
            mask: Array::from_shape_vec(IxDyn(dims), visited)?,
            mean: Array1::from(statistics.into_mean()),
            cell_count,
            summary,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.cell_count == 0
    }

    /// Splits into a mask of fixed dimensionality and the mean vector.
    pub fn into_parts<D: Dimension>(self) -> Result<(Array<bool, D>, Array1<f64>), FillError> {
        Ok((self.mask.into_dimensionality::<D>()?, self.mean))
    }
}
