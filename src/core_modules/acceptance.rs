// THEORY:
// The `AcceptanceTest` is the similarity judgement at the heart of region growing.
// A candidate cell is compared against two references at once:
//
// 1.  **Local**: the cell it is being reached from. This keeps growth from jumping
//     across sharp edges between adjacent cells.
// 2.  **Global**: the running mean of the region so far. This keeps slow gradients
//     from dragging the region far away from what it started as.
//
// Both comparisons use the same metric: the mean over channels of the absolute
// per-channel difference (an L1 distance divided by the channel count), computed in
// `f64` whatever the field's native precision. A candidate passes only if both
// metrics are strictly below their tolerances; a difference exactly equal to a
// tolerance is rejected. The test is a pure predicate with no side effects.

pub mod acceptance {
    /// Local and global tolerances applied to every candidate.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct AcceptanceTest {
        pub local_tolerance: f64,
        pub global_tolerance: f64,
    }

    impl AcceptanceTest {
        pub fn new(local_tolerance: f64, global_tolerance: f64) -> Self {
            Self {
                local_tolerance,
                global_tolerance,
            }
        }

        /// Whether `candidate` is close enough to both the cell it is reached from and
        /// the reference mean. The global metric is skipped once the local one fails.
        #[inline]
        pub fn passes<A>(&self, candidate: &[A], local: &[A], mean: &[f64]) -> bool
        where
            A: Copy + Into<f64>,
        {
            local_difference(candidate, local) < self.local_tolerance
                && global_difference(candidate, mean) < self.global_tolerance
        }
    }

    /// Mean absolute per-channel difference between two cells of the field.
    #[inline]
    pub fn local_difference<A>(candidate: &[A], local: &[A]) -> f64
    where
        A: Copy + Into<f64>,
    {
        let total: f64 = candidate
            .iter()
            .zip(local)
            .map(|(&c, &l)| (c.into() - l.into()).abs())
            .sum();
        total / candidate.len() as f64
    }

    /// Mean absolute per-channel difference between a cell and a mean vector.
    #[inline]
    pub fn global_difference<A>(candidate: &[A], mean: &[f64]) -> f64
    where
        A: Copy + Into<f64>,
    {
        let total: f64 = candidate
            .iter()
            .zip(mean)
            .map(|(&c, &m)| (c.into() - m).abs())
            .sum();
        total / candidate.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::acceptance::*;
    use approx::assert_relative_eq;

    #[test]
    fn metrics_average_over_channels() {
        let candidate = [1.0f32, 4.0, 2.0];
        let local = [2.0f32, 2.0, 2.0];
        let mean = [1.0f64, 1.0, 1.0];
        assert_relative_eq!(local_difference(&candidate, &local), 1.0);
        assert_relative_eq!(global_difference(&candidate, &mean), 4.0 / 3.0);
    }

    #[test]
    fn both_tolerances_must_hold() {
        let test = AcceptanceTest::new(1.0, 1.0);
        // Local difference 0.5 passes, global difference 2.0 does not.
        assert!(!test.passes(&[5.0f64], &[5.5], &[3.0]));
        assert!(!test.passes(&[5.0f64], &[3.0], &[5.5]));

        assert!(test.passes(&[5.0f64], &[5.5], &[5.25]));
    }

    #[test]
    fn equality_with_tolerance_is_rejected() {
        let test = AcceptanceTest::new(0.5, 10.0);
        assert!(!test.passes(&[1.5f32], &[1.0], &[1.0]));
        assert!(test.passes(&[1.25f32], &[1.0], &[1.0]));

        let test = AcceptanceTest::new(10.0, 0.25);
        assert!(!test.passes(&[1.25f32], &[1.0], &[1.0]));
    }

    #[test]
    fn zero_tolerance_rejects_even_identical_cells() {
        let test = AcceptanceTest::new(0.0, f64::INFINITY);
        assert!(!test.passes(&[2.0f32, 2.0], &[2.0, 2.0], &[2.0, 2.0]));
    }

    #[test]
    fn integer_fields_are_compared_in_double_precision() {
        let candidate = [200u8, 10];
        assert_relative_eq!(local_difference(&candidate, &[199, 12]), 1.5);
        assert_relative_eq!(global_difference(&candidate, &[200.5, 10.0]), 0.25);
        assert!(AcceptanceTest::new(2.0, 2.0).passes(&candidate, &[199, 12], &[200.5, 10.0]));
        assert!(!AcceptanceTest::new(1.5, 2.0).passes(&candidate, &[199, 12], &[200.5, 10.0]));
    }
}
