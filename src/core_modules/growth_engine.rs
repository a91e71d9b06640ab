// THEORY:
// The `GrowthEngine` is the frontier-driven expansion loop. It owns all of the
// call's mutable state: the visited grid, the FIFO frontier, the running statistics
// and the grouped policy's candidate batch. It borrows the validated field, mask and
// neighborhood template read-only.
//
// Key architectural principles:
// 1.  **Iterative Breadth-First Traversal**: Growth is a plain queue of coordinates,
//     never recursion, so grid size never translates into stack depth.
// 2.  **Mark-Then-Enqueue**: A cell is marked visited in the same step that pushes it
//     onto the frontier. A coordinate can therefore enter the queue at most once.
// 3.  **Commit-Only Statistics**: The running statistics change only when cells are
//     committed to the region, so they always describe exactly the visited set.
// 4.  **Two Policies, One Loop**: `PerNeighbor` commits each passing neighbor on the
//     spot and lets it shift the mean seen by the next neighbor in the same step.
//     `Grouped` judges the whole neighborhood against one reference mean and commits
//     the passing neighbors only if enough of the eligible ones passed.
// 5.  **Termination**: Every push marks a new cell and the grid is finite, so the
//     frontier always drains.

use crate::core_modules::acceptance::acceptance::AcceptanceTest;
use crate::core_modules::candidate_batch::CandidateBatch;
use crate::core_modules::field_grid::FieldGrid;
use crate::core_modules::footprint::NeighborhoodTemplate;
use crate::core_modules::running_stats::RunningStatistics;
use crate::region_fill::{BatchMean, FillConfig, GrowthPolicy};
use std::collections::VecDeque;
use tracing::trace;

/// Counters describing how a region was grown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrowthSummary {
    /// Number of coordinates popped from the frontier.
    pub expansion_steps: usize,
    /// Number of non-empty commits. Under `PerNeighbor` every accepted cell is one commit.
    pub committed_batches: usize,
    /// Number of grouped batches discarded for missing the footprint tolerance.
    pub rejected_batches: usize,
}

/// Terminal state of a growth run, ready for result assembly.
#[derive(Debug, Clone)]
pub struct GrowthOutcome {
    pub visited: Vec<bool>,
    pub statistics: RunningStatistics,
    pub summary: GrowthSummary,
}

pub struct GrowthEngine<'g, 'f, 'm, A: Clone, const N: usize> {
    grid: &'g FieldGrid<'f, 'm, A, N>,
    template: &'g NeighborhoodTemplate<N>,
    test: AcceptanceTest,
    policy: GrowthPolicy,
    visited: Vec<bool>,
    frontier: VecDeque<[usize; N]>,
    statistics: RunningStatistics,
    batch: CandidateBatch<N>,
    summary: GrowthSummary,
}

impl<'g, 'f, 'm, A, const N: usize> GrowthEngine<'g, 'f, 'm, A, N>
where
    A: Copy + Into<f64>,
{
    /// Seeds a new engine. The seed must be in bounds and mask-eligible.
    pub fn new(
        grid: &'g FieldGrid<'f, 'm, A, N>,
        template: &'g NeighborhoodTemplate<N>,
        config: &FillConfig,
        seed: [usize; N],
    ) -> Self {
        let seed_index = grid.shape().index_of(seed);
        let mut visited = vec![false; grid.shape().len()];
        visited[seed_index] = true;

        let mut frontier = VecDeque::new();
        frontier.push_back(seed);

        Self {
            grid,
            template,
            test: AcceptanceTest::new(config.local_tolerance, config.global_tolerance),
            policy: config.policy,
            visited,
            frontier,
            statistics: RunningStatistics::from_seed(grid.cell(seed_index)),
            batch: CandidateBatch::with_capacity(grid.channels(), template.len()),
            summary: GrowthSummary::default(),
        }
    }

    /// Drains the frontier and hands back the final state.
    pub fn run(mut self) -> GrowthOutcome {
        while let Some(center) = self.frontier.pop_front() {
            self.summary.expansion_steps += 1;
            match self.policy {
                GrowthPolicy::PerNeighbor => self.expand_per_neighbor(center),
                GrowthPolicy::Grouped {
                    footprint_tolerance,
                    batch_mean,
                } => self.expand_grouped(center, footprint_tolerance, batch_mean),
            }
        }

        GrowthOutcome {
            visited: self.visited,
            statistics: self.statistics,
            summary: self.summary,
        }
    }

    fn expand_per_neighbor(&mut self, center: [usize; N]) {
        let grid = self.grid;
        let shape = grid.shape();
        let center_values = grid.cell(shape.index_of(center));

        for &offset in self.template.offsets() {
            let Some(neighbor) = shape.step(center, offset) else {
                continue;
            };
            let index = shape.index_of(neighbor);
            if self.visited[index] || !grid.is_eligible(index) {
                continue;
            }

            let candidate = grid.cell(index);
            if self.test.passes(candidate, center_values, self.statistics.mean()) {
                self.visited[index] = true;
                self.frontier.push_back(neighbor);
                // Later neighbors in this same step see the updated mean.
                self.statistics.fold_cell(candidate);
                self.summary.committed_batches += 1;
            }
        }
    }

    fn expand_grouped(&mut self, center: [usize; N], footprint_tolerance: f64, batch_mean: BatchMean) {
        let grid = self.grid;
        let shape = grid.shape();
        let center_values = grid.cell(shape.index_of(center));

        self.batch.begin(self.statistics.mean());
        for &offset in self.template.offsets() {
            let Some(neighbor) = shape.step(center, offset) else {
                continue;
            };
            let index = shape.index_of(neighbor);
            if self.visited[index] || !grid.is_eligible(index) {
                continue;
            }
            self.batch.note_eligible();

            let candidate = grid.cell(index);
            if self.test.passes(candidate, center_values, self.batch.reference_mean()) {
                self.batch.push(neighbor, candidate);
                if batch_mean == BatchMean::Provisional {
                    self.batch.refresh_provisional_mean(&self.statistics);
                }
            }
        }

        if !self.batch.is_committable(footprint_tolerance) {
            trace!(
                ?center,
                accepted = self.batch.len(),
                eligible = self.batch.eligible(),
                "discarding candidate batch"
            );
            self.summary.rejected_batches += 1;
            return;
        }
        if self.batch.is_empty() {
            return;
        }

        for &member in self.batch.members() {
            self.visited[shape.index_of(member)] = true;
            self.frontier.push_back(member);
        }
        self.statistics.fold_batch(self.batch.sum(), self.batch.len());
        self.summary.committed_batches += 1;
    }
}
