// THEORY:
// `RunningStatistics` is the region's memory of what it has absorbed so far: the
// per-channel sum in `f64` and the number of cells. It always describes exactly the
// set of cells currently marked visited. The growth policies are the only writers,
// and they write only when cells are committed, never speculatively.

/// Cumulative per-channel sums and count over the committed region.
#[derive(Debug, Clone, PartialEq)]
pub struct RunningStatistics {
    sum: Vec<f64>,
    mean: Vec<f64>,
    count: usize,
}

impl RunningStatistics {
    /// Statistics of an empty region: zero sums, zero mean, zero count.
    pub fn empty(channels: usize) -> Self {
        Self {
            sum: vec![0.0; channels],
            mean: vec![0.0; channels],
            count: 0,
        }
    }

    /// Statistics of a region holding only the seed cell.
    pub fn from_seed<A>(values: &[A]) -> Self
    where
        A: Copy + Into<f64>,
    {
        let sum: Vec<f64> = values.iter().map(|&v| v.into()).collect();
        Self {
            mean: sum.clone(),
            sum,
            count: 1,
        }
    }

    /// Adds one committed cell.
    pub fn fold_cell<A>(&mut self, values: &[A])
    where
        A: Copy + Into<f64>,
    {
        for (total, &v) in self.sum.iter_mut().zip(values) {
            *total += v.into();
        }
        self.count += 1;
        self.refresh_mean();
    }

    /// Adds a committed batch described by its per-channel sum and size.
    pub fn fold_batch(&mut self, batch_sum: &[f64], batch_count: usize) {
        if batch_count == 0 {
            return;
        }
        for (total, &v) in self.sum.iter_mut().zip(batch_sum) {
            *total += v;
        }
        self.count += batch_count;
        self.refresh_mean();
    }

    fn refresh_mean(&mut self) {
        let count = self.count as f64;
        for (mean, &total) in self.mean.iter_mut().zip(&self.sum) {
            *mean = total / count;
        }
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn sum(&self) -> &[f64] {
        &self.sum
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn channels(&self) -> usize {
        self.sum.len()
    }

    pub fn into_mean(self) -> Vec<f64> {
        self.mean
    }
}
