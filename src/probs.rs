//! Utilities for working with probabilities and samples.

pub trait SliceExt {
    fn sum(&self) -> f64;
    fn normalise(&mut self, target: f64) -> f64;
    fn scale(&mut self, factor: f64);
    fn sort_ascending(&mut self);
}
impl SliceExt for [f64] {
    fn sum(&self) -> f64 {
        self.iter().sum()
    }

    /// Scales the elements so that they add up to `target`, returning the sum prior to scaling.
    fn normalise(&mut self, target: f64) -> f64 {
        let sum = self.sum();
        self.scale(target / sum);
        sum
    }

    fn scale(&mut self, factor: f64) {
        for element in self {
            *element *= factor;
        }
    }

    fn sort_ascending(&mut self) {
        self.sort_by(f64::total_cmp);
    }
}

/// Nearest-rank percentile of an ascending `sorted` sample: the element at index
/// `floor((len - 1) × quantile)`. No interpolation is performed.
///
/// Returns `NaN` for an empty sample.
pub fn nearest_rank(sorted: &[f64], quantile: f64) -> f64 {
    debug_assert!((0.0..=1.0).contains(&quantile), "invalid quantile {quantile}");
    debug_assert!(
        sorted.windows(2).all(|pair| pair[0] <= pair[1]),
        "sample must be sorted"
    );
    if sorted.is_empty() {
        return f64::NAN;
    }
    let index = ((sorted.len() - 1) as f64 * quantile).floor() as usize;
    sorted[index]
}

/// The 5th, 50th and 95th nearest-rank percentiles of a sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Percentiles {
    pub p05: f64,
    pub p50: f64,
    pub p95: f64,
}
impl Percentiles {
    /// Sorts `sample` in place and extracts its percentiles.
    pub fn of(sample: &mut [f64]) -> Self {
        sample.sort_ascending();
        Self {
            p05: nearest_rank(sample, 0.05),
            p50: nearest_rank(sample, 0.5),
            p95: nearest_rank(sample, 0.95),
        }
    }
}
