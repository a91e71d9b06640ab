// THEORY:
// This file is the entry point for the `tolerant_fill` library crate. The crate grows
// one connected region per call over a multi-channel scalar field on a 2D or 3D
// grid. Cells join the region while they stay close both to the cell they were
// reached from and to the region's running mean. A footprint stencil decides what
// counts as a neighbor, and a mask decides which cells may join at all.
//
// The `region_fill` module is the public face of the crate: configuration, the
// dynamic-rank `grow_region*` calls and the fixed-rank `flood_fill_*` wrappers. The
// `core_modules` hold the individual components (template, acceptance test, running
// statistics, growth loop, result assembly) and stay public for callers that want to
// drive them directly.

pub mod core_modules;
pub mod region_fill;

pub use crate::core_modules::error::FillError;
pub use crate::core_modules::footprint::{NeighborhoodTemplate, full_footprint, orthogonal_footprint};
pub use crate::core_modules::growth_engine::GrowthSummary;
pub use crate::core_modules::region_result::RegionGrowth;
pub use crate::core_modules::utils::image_field::{field_from_image, mask_to_image};
pub use crate::region_fill::{
    BatchMean, FillConfig, GrowthPolicy, flood_fill_2d_footprint_tolerance, flood_fill_2d_multichannel,
    flood_fill_3d_footprint_tolerance, flood_fill_3d_multichannel, grow_region, grow_region_2d,
    grow_region_3d,
};
