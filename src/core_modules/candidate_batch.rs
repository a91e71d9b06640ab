// THEORY:
// A `CandidateBatch` is the scratch working set of one grouped expansion step. It
// collects every neighbor of the current center that individually passed the
// acceptance test, together with their provisional per-channel sum, and counts how
// many neighbors were eligible in the first place. Once the step has looked at the
// whole footprint, the batch is committed or discarded as a unit.
//
// The batch also owns the reference mean used for the step's global comparisons.
// In `Snapshot` mode that is the committed running mean, copied once when the step
// begins. In `Provisional` mode it is refreshed after every accepted candidate to the
// mean the region would have if the batch were committed now.
//
// One batch is allocated per call and reused across steps.

use crate::core_modules::running_stats::RunningStatistics;

#[derive(Debug, Clone)]
pub struct CandidateBatch<const N: usize> {
    members: Vec<[usize; N]>,
    sum: Vec<f64>,
    reference_mean: Vec<f64>,
    eligible: usize,
}

impl<const N: usize> CandidateBatch<N> {
    pub fn with_capacity(channels: usize, capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
            sum: vec![0.0; channels],
            reference_mean: vec![0.0; channels],
            eligible: 0,
        }
    }

    /// Clears the batch and snapshots the committed mean for a new step.
    pub fn begin(&mut self, committed_mean: &[f64]) {
        self.members.clear();
        self.sum.fill(0.0);
        self.reference_mean.copy_from_slice(committed_mean);
        self.eligible = 0;
    }

    /// Records a neighbor that was in bounds, unvisited and mask-eligible.
    pub fn note_eligible(&mut self) {
        self.eligible += 1;
    }

    /// Adds a neighbor that passed the acceptance test.
    pub fn push<A>(&mut self, coord: [usize; N], values: &[A])
    where
        A: Copy + Into<f64>,
    {
        self.members.push(coord);
        for (total, &v) in self.sum.iter_mut().zip(values) {
            *total += v.into();
        }
    }

    /// Recomputes the reference mean as if the batch were already committed.
    pub fn refresh_provisional_mean(&mut self, committed: &RunningStatistics) {
        let count = (committed.count() + self.members.len()) as f64;
        for ((mean, &batch), &total) in self
            .reference_mean
            .iter_mut()
            .zip(&self.sum)
            .zip(committed.sum())
        {
            *mean = (total + batch) / count;
        }
    }

    /// Whether the accepted fraction of eligible neighbors clears the threshold.
    ///
    /// A step with no eligible neighbors is vacuously committable; it has nothing to add.
    pub fn is_committable(&self, footprint_tolerance: f64) -> bool {
        self.eligible == 0 || self.accepted_fraction() > footprint_tolerance
    }

    pub fn accepted_fraction(&self) -> f64 {
        if self.eligible == 0 {
            return 0.0;
        }
        self.members.len() as f64 / self.eligible as f64
    }

    pub fn members(&self) -> &[[usize; N]] {
        &self.members
    }

    pub fn sum(&self) -> &[f64] {
        &self.sum
    }

    pub fn reference_mean(&self) -> &[f64] {
        &self.reference_mean
    }

    pub fn eligible(&self) -> usize {
        self.eligible
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
