// This file is an example of how to use the `tolerant_fill` library.
// It grows a region over a small synthetic field under both policies and prints
// the resulting masks.

use ndarray::{Array2, Array3};
use tolerant_fill::{FillConfig, full_footprint, grow_region_2d};

fn main() {
    println!("Tolerant Fill - Example Runner");

    // A flat 5x5 field of 1.0 with a 2x2 block of 100.0 in the bottom-right corner.
    let field = Array3::from_shape_fn((5, 5, 1), |(i, j, _)| if i >= 3 && j >= 3 { 100.0f32 } else { 1.0 });
    let mask = Array2::from_elem((5, 5), true);
    let footprint = full_footprint::<2>(1);

    let runs = [
        ("per-neighbor", FillConfig::per_neighbor(0.5, 0.5)),
        ("grouped (0.9)", FillConfig::grouped(0.5, 0.5, 0.9)),
        ("grouped (0.5)", FillConfig::grouped(0.5, 0.5, 0.5)),
    ];

    for (label, config) in runs {
        match grow_region_2d(
            field.view().into_dyn(),
            &[2, 2],
            footprint.view(),
            mask.view().into_dyn(),
            &config,
        ) {
            Ok(region) => {
                println!("\n{label}: {} cells, mean {:?}", region.cell_count, region.mean.to_vec());
                println!("  {:?}", region.summary);
                for row in region.mask.rows() {
                    let line: String = row.iter().map(|&v| if v { '#' } else { '.' }).collect();
                    println!("  {line}");
                }
            }
            Err(err) => println!("\n{label}: failed: {err}"),
        }
    }
}
