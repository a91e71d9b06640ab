pub mod acceptance;
pub mod candidate_batch;
pub mod error;
pub mod field_grid;
pub mod footprint;
pub mod grid_shape;
pub mod growth_engine;
pub mod region_result;
pub mod running_stats;
pub mod utils;
