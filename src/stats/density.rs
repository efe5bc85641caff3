//! Density Module
//! Equal-width histograms and Gaussian kernel density estimates.

use statrs::distribution::{Continuous, Normal};

use super::calculator::StatsCalculator;

/// Equal-width histogram. `edges` has one more entry than `counts`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin values into `bins` equal-width bins spanning `[min, max]`.
    ///
    /// The last bin is closed on the right. A single distinct value gets one
    /// unit-width bin centred on it.
    pub fn new(values: &[f64], bins: usize) -> Self {
        if values.is_empty() || bins == 0 {
            return Self::default();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if min == max {
            return Self {
                edges: vec![min - 0.5, min + 0.5],
                counts: vec![values.len()],
            };
        }

        let width = (max - min) / bins as f64;
        let edges = (0..=bins).map(|i| min + i as f64 * width).collect();
        let mut counts = vec![0; bins];
        for &v in values {
            let idx = (((v - min) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Self { edges, counts }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.get(1)) {
            (Some(lo), Some(hi)) => hi - lo,
            _ => 0.0,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(bin centre, count)` pairs.
    pub fn bars(&self) -> impl Iterator<Item = (f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(self.counts.iter())
            .map(|(edge, &count)| ((edge[0] + edge[1]) / 2.0, count))
    }
}

/// Gaussian kernel density estimate with Scott's rule bandwidth.
#[derive(Debug, Clone)]
pub struct GaussianKde {
    samples: Vec<f64>,
    bandwidth: f64,
    kernel: Normal,
}

impl GaussianKde {
    /// Needs at least two samples with non-zero spread.
    pub fn new(samples: &[f64]) -> Option<Self> {
        let n = samples.len();
        if n < 2 {
            return None;
        }

        let std = StatsCalculator::std_dev(samples);
        let bandwidth = std * (n as f64).powf(-0.2);
        if !(bandwidth > 0.0) || !bandwidth.is_finite() {
            return None;
        }

        let kernel = Normal::new(0.0, 1.0).ok()?;
        Some(Self {
            samples: samples.to_vec(),
            bandwidth,
            kernel,
        })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Probability density at `x`.
    pub fn density(&self, x: f64) -> f64 {
        let sum: f64 = self
            .samples
            .iter()
            .map(|&s| self.kernel.pdf((x - s) / self.bandwidth))
            .sum();
        sum / (self.samples.len() as f64 * self.bandwidth)
    }

    /// Data range widened by `cut` bandwidths on each side.
    pub fn support(&self, cut: f64) -> (f64, f64) {
        let min = self.samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (min - cut * self.bandwidth, max + cut * self.bandwidth)
    }

    /// Density sampled at `points` evenly spaced positions over `[lo, hi]`.
    pub fn curve(&self, lo: f64, hi: f64, points: usize) -> Vec<[f64; 2]> {
        if points < 2 {
            return Vec::new();
        }
        let step = (hi - lo) / (points - 1) as f64;
        (0..points)
            .map(|i| {
                let x = lo + i as f64 * step;
                [x, self.density(x)]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_counts_every_value() {
        let values = [10.0, 20.0, 20.0, 35.0, 49.0, 50.0];
        let hist = Histogram::new(&values, 4);

        assert_eq!(hist.edges.len(), 5);
        assert_eq!(hist.counts, vec![1, 2, 1, 2]);
        assert_eq!(hist.total(), values.len());
        assert_eq!(hist.bin_width(), 10.0);

        let centres: Vec<f64> = hist.bars().map(|(c, _)| c).collect();
        assert_eq!(centres, vec![15.0, 25.0, 35.0, 45.0]);
    }

    #[test]
    fn histogram_edge_cases() {
        assert!(Histogram::new(&[], 40).is_empty());
        assert!(Histogram::new(&[1.0], 0).is_empty());

        let single = Histogram::new(&[7.0, 7.0, 7.0], 40);
        assert_eq!(single.counts, vec![3]);
        assert_eq!(single.edges, vec![6.5, 7.5]);
    }

    #[test]
    fn kde_needs_spread() {
        assert!(GaussianKde::new(&[]).is_none());
        assert!(GaussianKde::new(&[5.0]).is_none());
        assert!(GaussianKde::new(&[5.0, 5.0, 5.0]).is_none());
    }

    #[test]
    fn kde_integrates_to_one() {
        let samples = [40.0, 55.0, 60.0, 62.0, 75.0, 90.0, 120.0];
        let kde = GaussianKde::new(&samples).unwrap();
        let (lo, hi) = kde.support(4.0);
        let curve = kde.curve(lo, hi, 2001);
        let step = (hi - lo) / 2000.0;
        let area: f64 = curve.iter().map(|p| p[1] * step).sum();

        assert!((area - 1.0).abs() < 0.01, "area = {area}");
        assert!(curve.iter().all(|p| p[1] >= 0.0));
    }

    #[test]
    fn kde_is_symmetric_for_symmetric_samples() {
        let kde = GaussianKde::new(&[-1.0, 0.0, 1.0]).unwrap();
        assert!((kde.density(0.5) - kde.density(-0.5)).abs() < 1e-12);
        assert!(kde.density(0.0) > kde.density(3.0));
    }
}
