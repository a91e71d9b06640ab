// THEORY:
// The `region_fill` module is the top-level API of the crate. It takes caller-owned
// arrays plus a `FillConfig`, validates everything up front, and runs one growth
// from one seed. A call either fails before touching any state or runs to
// completion and returns a fresh `RegionGrowth`; nothing persists between calls, so
// independent calls may run on different threads without coordination.
//
// Two families of entry points are provided:
// 1.  **Dynamic views** (`grow_region`, `grow_region_2d`, `grow_region_3d`): arrays
//     arrive as `ArrayViewD` from a host boundary whose ranks are not known at
//     compile time, and rank mismatches surface as `FillError::RankMismatch`.
// 2.  **Typed views** (`flood_fill_*`): fixed-rank convenience wrappers that return
//     the `(mask, mean)` pair directly.

use crate::core_modules::error::FillError;
use crate::core_modules::field_grid::{FieldGrid, validate_field_and_mask};
use crate::core_modules::footprint::NeighborhoodTemplate;
use crate::core_modules::growth_engine::GrowthEngine;
use crate::core_modules::region_result::RegionGrowth;
use ndarray::{Array1, Array2, Array3, ArrayView2, ArrayView3, ArrayView4, ArrayViewD, Ix2, Ix3};
use tracing::debug;

/// Which reference mean the grouped policy compares candidates against within a step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BatchMean {
    /// The committed running mean, fixed for the whole step.
    #[default]
    Snapshot,
    /// The mean including the step's already-accepted candidates.
    Provisional,
}

/// How neighbors of a frontier cell are turned into region members.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GrowthPolicy {
    /// Each passing neighbor is committed immediately and updates the running mean
    /// before the next neighbor is tested.
    PerNeighbor,
    /// Passing neighbors are committed together, and only if their share of the
    /// eligible neighbors is strictly greater than `footprint_tolerance`.
    Grouped {
        footprint_tolerance: f64,
        batch_mean: BatchMean,
    },
}

/// Configuration for one region-growing call.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillConfig {
    /// Maximum mean-channel difference between a candidate and the cell it is reached from.
    pub local_tolerance: f64,
    /// Maximum mean-channel difference between a candidate and the region's running mean.
    pub global_tolerance: f64,
    pub policy: GrowthPolicy,
}

impl FillConfig {
    pub fn per_neighbor(local_tolerance: f64, global_tolerance: f64) -> Self {
        Self {
            local_tolerance,
            global_tolerance,
            policy: GrowthPolicy::PerNeighbor,
        }
    }

    pub fn grouped(local_tolerance: f64, global_tolerance: f64, footprint_tolerance: f64) -> Self {
        Self {
            local_tolerance,
            global_tolerance,
            policy: GrowthPolicy::Grouped {
                footprint_tolerance,
                batch_mean: BatchMean::Snapshot,
            },
        }
    }

    /// Selects the grouped policy's reference mean. Has no effect on `PerNeighbor`.
    pub fn with_batch_mean(mut self, mode: BatchMean) -> Self {
        if let GrowthPolicy::Grouped { batch_mean, .. } = &mut self.policy {
            *batch_mean = mode;
        }
        self
    }
}

/// Grows one region over an `N`-dimensional grid.
///
/// `field` has shape `spatial + (channels,)`; `footprint` and `mask` have rank `N`;
/// `seed` holds one coordinate per spatial axis. A seed outside the grid is an error.
/// A seed the mask excludes yields an empty region with a zero mean.
pub fn grow_region<A, const N: usize>(
    field: ArrayViewD<'_, A>,
    seed: &[isize],
    footprint: ArrayViewD<'_, bool>,
    mask: ArrayViewD<'_, bool>,
    config: &FillConfig,
) -> Result<RegionGrowth, FillError>
where
    A: Copy + Into<f64>,
{
    let (shape, channels) = validate_field_and_mask::<A, N>(&field, &mask)?;
    let template = NeighborhoodTemplate::<N>::from_footprint(&footprint)?;
    let seed = shape.locate_seed(seed)?;
    let dims = shape.dims();

    let grid = FieldGrid::new(field, mask, shape, channels);
    if !grid.is_eligible(shape.index_of(seed)) {
        debug!(?seed, "seed is masked out; returning empty region");
        return Ok(RegionGrowth::empty(&dims, channels));
    }

    debug!(
        rank = N,
        channels,
        cells = shape.len(),
        offsets = template.len(),
        policy = ?config.policy,
        "starting region growth"
    );
    let outcome = GrowthEngine::new(&grid, &template, config, seed).run();
    debug!(
        cells = outcome.statistics.count(),
        steps = outcome.summary.expansion_steps,
        committed = outcome.summary.committed_batches,
        rejected = outcome.summary.rejected_batches,
        "region growth finished"
    );

    RegionGrowth::assemble(&dims, outcome)
}

/// [`grow_region`] over a 2D grid: field `(H, W, C)`, footprint and mask `(h, w)`.
pub fn grow_region_2d<A>(
    field: ArrayViewD<'_, A>,
    seed: &[isize],
    footprint: ArrayViewD<'_, bool>,
    mask: ArrayViewD<'_, bool>,
    config: &FillConfig,
) -> Result<RegionGrowth, FillError>
where
    A: Copy + Into<f64>,
{
    grow_region::<A, 2>(field, seed, footprint, mask, config)
}

/// [`grow_region`] over a 3D grid: field `(Z, Y, X, C)`, footprint and mask `(z, y, x)`.
pub fn grow_region_3d<A>(
    field: ArrayViewD<'_, A>,
    seed: &[isize],
    footprint: ArrayViewD<'_, bool>,
    mask: ArrayViewD<'_, bool>,
    config: &FillConfig,
) -> Result<RegionGrowth, FillError>
where
    A: Copy + Into<f64>,
{
    grow_region::<A, 3>(field, seed, footprint, mask, config)
}

/// Multichannel 2D fill with the per-neighbor policy.
pub fn flood_fill_2d_multichannel<A>(
    field: ArrayView3<'_, A>,
    seed: (isize, isize),
    footprint: ArrayView2<'_, bool>,
    local_tolerance: f64,
    global_tolerance: f64,
    mask: ArrayView2<'_, bool>,
) -> Result<(Array2<bool>, Array1<f64>), FillError>
where
    A: Copy + Into<f64>,
{
    let config = FillConfig::per_neighbor(local_tolerance, global_tolerance);
    fill_2d(field, seed, footprint, mask, &config)
}

/// Multichannel 2D fill with the grouped footprint-tolerance policy.
pub fn flood_fill_2d_footprint_tolerance<A>(
    field: ArrayView3<'_, A>,
    seed: (isize, isize),
    footprint: ArrayView2<'_, bool>,
    local_tolerance: f64,
    global_tolerance: f64,
    footprint_tolerance: f64,
    mask: ArrayView2<'_, bool>,
) -> Result<(Array2<bool>, Array1<f64>), FillError>
where
    A: Copy + Into<f64>,
{
    let config = FillConfig::grouped(local_tolerance, global_tolerance, footprint_tolerance);
    fill_2d(field, seed, footprint, mask, &config)
}

/// Multichannel 3D fill with the per-neighbor policy.
pub fn flood_fill_3d_multichannel<A>(
    field: ArrayView4<'_, A>,
    seed: (isize, isize, isize),
    footprint: ArrayView3<'_, bool>,
    local_tolerance: f64,
    global_tolerance: f64,
    mask: ArrayView3<'_, bool>,
) -> Result<(Array3<bool>, Array1<f64>), FillError>
where
    A: Copy + Into<f64>,
{
    let config = FillConfig::per_neighbor(local_tolerance, global_tolerance);
    fill_3d(field, seed, footprint, mask, &config)
}

/// Multichannel 3D fill with the grouped footprint-tolerance policy.
pub fn flood_fill_3d_footprint_tolerance<A>(
    field: ArrayView4<'_, A>,
    seed: (isize, isize, isize),
    footprint: ArrayView3<'_, bool>,
    local_tolerance: f64,
    global_tolerance: f64,
    footprint_tolerance: f64,
    mask: ArrayView3<'_, bool>,
) -> Result<(Array3<bool>, Array1<f64>), FillError>
where
    A: Copy + Into<f64>,
{
    let config = FillConfig::grouped(local_tolerance, global_tolerance, footprint_tolerance);
    fill_3d(field, seed, footprint, mask, &config)
}

fn fill_2d<A>(
    field: ArrayView3<'_, A>,
    (i, j): (isize, isize),
    footprint: ArrayView2<'_, bool>,
    mask: ArrayView2<'_, bool>,
    config: &FillConfig,
) -> Result<(Array2<bool>, Array1<f64>), FillError>
where
    A: Copy + Into<f64>,
{
    grow_region_2d(field.into_dyn(), &[i, j], footprint.into_dyn(), mask.into_dyn(), config)?
        .into_parts::<Ix2>()
}

fn fill_3d<A>(
    field: ArrayView4<'_, A>,
    (i, j, k): (isize, isize, isize),
    footprint: ArrayView3<'_, bool>,
    mask: ArrayView3<'_, bool>,
    config: &FillConfig,
) -> Result<(Array3<bool>, Array1<f64>), FillError>
where
    A: Copy + Into<f64>,
{
    grow_region_3d(field.into_dyn(), &[i, j, k], footprint.into_dyn(), mask.into_dyn(), config)?
        .into_parts::<Ix3>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_mean_only_applies_to_grouped() {
        let grouped = FillConfig::grouped(1.0, 2.0, 0.5).with_batch_mean(BatchMean::Provisional);
        assert_eq!(
            grouped.policy,
            GrowthPolicy::Grouped {
                footprint_tolerance: 0.5,
                batch_mean: BatchMean::Provisional,
            }
        );

        let per_neighbor = FillConfig::per_neighbor(1.0, 2.0).with_batch_mean(BatchMean::Provisional);
        assert_eq!(per_neighbor.policy, GrowthPolicy::PerNeighbor);
    }

    #[test]
    fn grouped_defaults_to_snapshot_mean() {
        let config = FillConfig::grouped(0.1, 0.2, 0.9);
        assert!(matches!(
            config.policy,
            GrowthPolicy::Grouped {
                batch_mean: BatchMean::Snapshot,
                ..
            }
        ));
    }
}
