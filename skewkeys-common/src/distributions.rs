//! Statistical distributions for key generation
//!
//! Provides the distributions used to produce skewed key sequences:
//! - Skew-normal (asymmetric bell curve placed inside the key domain)
//! - Zipfian (power law, hot-key pattern)
//!
//! plus a tabulated skew-normal inverse CDF for deterministic quantile sweeps.
//!
//! Distributions hold only their parameters. The random source is passed to
//! every `sample` call so that callers decide how streams are seeded and shared.

use rand::RngCore;
use rand_distr::{Distribution as RandDistribution, SkewNormal, Zipf};
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

/// Half-width, in standard deviations, of the grid the skew-normal CDF is tabulated on
const QUANTILE_Z_LIMIT: f64 = 12.0;

/// Trapezoid steps across the quantile grid
const QUANTILE_GRID_STEPS: usize = 1 << 14;

/// Trait for all distributions
pub trait Distribution {
    /// Sample a value from this distribution using the given random source
    fn sample(&self, rng: &mut dyn RngCore) -> f64;

    /// Get distribution name
    fn name(&self) -> &'static str;
}

/// Skew-normal distribution
///
/// A normal distribution bent by a shape parameter (alpha):
/// - alpha = 0.0: plain Normal(location, scale)
/// - alpha > 0.0: long tail to the right, mass piled left of the tail
/// - alpha < 0.0: mirror image, long tail to the left
///
/// Larger |alpha| concentrates the mass more tightly on one side of `location`.
#[derive(Debug, Clone)]
pub struct SkewNormalDistribution {
    location: f64,
    scale: f64,
    shape: f64,
    dist: SkewNormal<f64>,
}

impl SkewNormalDistribution {
    pub fn new(location: f64, scale: f64, shape: f64) -> anyhow::Result<Self> {
        if !location.is_finite() {
            anyhow::bail!("Skew-normal location must be finite");
        }
        if !(scale.is_finite() && scale > 0.0) {
            anyhow::bail!("Skew-normal scale must be > 0");
        }
        if !shape.is_finite() {
            anyhow::bail!("Skew-normal shape must be finite");
        }

        let dist = SkewNormal::new(location, scale, shape)
            .map_err(|e| anyhow::anyhow!("Invalid skew-normal parameters: {e}"))?;

        Ok(Self { location, scale, shape, dist })
    }

    pub fn location(&self) -> f64 {
        self.location
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Analytical mean: location + scale * delta * sqrt(2 / pi)
    pub fn mean(&self) -> f64 {
        let delta = self.shape / (1.0 + self.shape * self.shape).sqrt();
        self.location + self.scale * delta * (2.0 / std::f64::consts::PI).sqrt()
    }
}

impl Distribution for SkewNormalDistribution {
    fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        self.dist.sample(rng)
    }

    fn name(&self) -> &'static str {
        "SkewNormal"
    }
}

/// Zipfian distribution (power law, hot-key pattern)
///
/// The frequency of an item is inversely proportional to a power of its rank.
/// With exponent s (theta):
/// - s = 0.0: Uniform distribution
/// - s = 0.99: Typical database workload (YCSB default)
/// - s = 1.0: Classic Zipf (frequency proportional to 1/rank)
/// - s > 1.0: More skewed toward low-rank items
#[derive(Debug, Clone)]
pub struct ZipfianDistribution {
    /// Number of items (range: 0..n-1)
    n: u64,
    dist: Zipf<f64>,
}

impl ZipfianDistribution {
    pub fn new(n: u64, s: f64) -> anyhow::Result<Self> {
        if n == 0 {
            anyhow::bail!("Zipfian n must be > 0");
        }
        if !(s.is_finite() && s >= 0.0) {
            anyhow::bail!("Zipfian s (exponent) must be >= 0.0");
        }

        let dist = Zipf::new(n as f64, s)?;

        Ok(Self { n, dist })
    }

    /// Sample and return a 0-indexed rank (0..n-1), 0 being the hottest
    pub fn sample_rank(&self, rng: &mut dyn RngCore) -> u64 {
        let sample = self.dist.sample(rng);
        (sample as u64).saturating_sub(1).min(self.n - 1)
    }
}

/// Tabulated inverse CDF of a skew-normal distribution
///
/// The standardized CDF `F(z) = 2 * integral of phi(t) * Phi(alpha * t)` is
/// integrated with the trapezoid rule over `[-12, 12]` and inverted by linear
/// interpolation between grid points. Quantiles of 0.0 and 1.0 map to the
/// grid edges instead of infinity.
#[derive(Debug, Clone)]
pub struct SkewNormalQuantiles {
    location: f64,
    scale: f64,
    /// Cumulative probability at each grid point, normalized to end at 1.0
    cdf: Vec<f64>,
}

impl SkewNormalQuantiles {
    pub fn new(dist: &SkewNormalDistribution) -> anyhow::Result<Self> {
        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| anyhow::anyhow!("Failed to build standard normal: {e}"))?;
        let shape = dist.shape();
        let density = |z: f64| 2.0 * normal.pdf(z) * normal.cdf(shape * z);
        let step = Self::step();

        let mut cdf = Vec::with_capacity(QUANTILE_GRID_STEPS + 1);
        let mut acc = 0.0;
        let mut prev = density(-QUANTILE_Z_LIMIT);
        cdf.push(acc);
        for i in 1..=QUANTILE_GRID_STEPS {
            let cur = density(Self::grid_point(i));
            acc += 0.5 * (prev + cur) * step;
            cdf.push(acc);
            prev = cur;
        }

        if !(acc.is_finite() && acc > 0.0) {
            anyhow::bail!("Skew-normal CDF did not integrate to a positive mass (shape {shape})");
        }
        for value in &mut cdf {
            *value /= acc;
        }

        Ok(Self { location: dist.location(), scale: dist.scale(), cdf })
    }

    fn step() -> f64 {
        2.0 * QUANTILE_Z_LIMIT / QUANTILE_GRID_STEPS as f64
    }

    fn grid_point(i: usize) -> f64 {
        -QUANTILE_Z_LIMIT + i as f64 * Self::step()
    }

    /// Value below which a fraction `p` of the mass lies (`p` clamped to [0, 1])
    pub fn quantile(&self, p: f64) -> f64 {
        let p = if p.is_nan() { 0.5 } else { p.clamp(0.0, 1.0) };
        let last = self.cdf.len() - 1;
        let hi = self.cdf.partition_point(|&c| c < p).clamp(1, last);
        let lo = hi - 1;

        let (c_lo, c_hi) = (self.cdf[lo], self.cdf[hi]);
        let frac = if c_hi > c_lo { ((p - c_lo) / (c_hi - c_lo)).clamp(0.0, 1.0) } else { 0.0 };
        let z = Self::grid_point(lo) + frac * Self::step();

        self.location + self.scale * z
    }
}

impl Distribution for ZipfianDistribution {
    fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        self.dist.sample(rng)
    }

    fn name(&self) -> &'static str {
        "Zipfian"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_zipfian_basic() {
        let dist = ZipfianDistribution::new(100, 0.99).expect("Failed to create Zipfian");
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..1000 {
            let rank = dist.sample_rank(&mut rng);
            assert!(rank < 100, "Rank {} out of range [0, 100)", rank);
        }
    }

    #[test]
    fn test_zipfian_single_item() {
        let dist = ZipfianDistribution::new(1, 2.0).expect("Failed to create Zipfian");
        let mut rng = SmallRng::seed_from_u64(7);
        assert!((0..100).all(|_| dist.sample_rank(&mut rng) == 0));
    }

    #[test]
    fn test_zipfian_parameter_validation() {
        assert!(ZipfianDistribution::new(0, 0.99).is_err());
        assert!(ZipfianDistribution::new(100, -0.5).is_err());
        assert!(ZipfianDistribution::new(100, f64::NAN).is_err());
        assert!(ZipfianDistribution::new(100, 0.0).is_ok());
    }

    #[test]
    fn test_skew_normal_validation() {
        assert!(SkewNormalDistribution::new(0.0, 0.0, 1.0).is_err());
        assert!(SkewNormalDistribution::new(0.0, -1.0, 1.0).is_err());
        assert!(SkewNormalDistribution::new(0.0, 1.0, f64::INFINITY).is_err());
        assert!(SkewNormalDistribution::new(f64::NAN, 1.0, 1.0).is_err());
        assert!(SkewNormalDistribution::new(10.0, 2.0, -3.0).is_ok());
    }

    #[test]
    fn test_skew_normal_mean_follows_shape() {
        let mut rng = SmallRng::seed_from_u64(42);
        let right = SkewNormalDistribution::new(100.0, 10.0, 4.0).expect("valid");
        let left = SkewNormalDistribution::new(100.0, 10.0, -4.0).expect("valid");

        let n = 20_000;
        let right_mean = (0..n).map(|_| right.sample(&mut rng)).sum::<f64>() / n as f64;
        let left_mean = (0..n).map(|_| left.sample(&mut rng)).sum::<f64>() / n as f64;

        assert!(right_mean > 100.0 && left_mean < 100.0);
        assert!((right_mean - right.mean()).abs() < 0.5, "mean {} vs {}", right_mean, right.mean());
        assert!((left_mean - left.mean()).abs() < 0.5, "mean {} vs {}", left_mean, left.mean());
    }

    #[test]
    fn test_quantiles_of_plain_normal() {
        let dist = SkewNormalDistribution::new(100.0, 10.0, 0.0).expect("valid");
        let quantiles = SkewNormalQuantiles::new(&dist).expect("table");

        assert!((quantiles.quantile(0.5) - 100.0).abs() < 0.05);
        // Phi(1) = 0.841345, Phi(-2) = 0.022750
        assert!((quantiles.quantile(0.841345) - 110.0).abs() < 0.05);
        assert!((quantiles.quantile(0.022750) - 80.0).abs() < 0.05);
    }

    #[test]
    fn test_quantiles_monotonic_and_bounded() {
        let dist = SkewNormalDistribution::new(0.0, 1.0, 4.0).expect("valid");
        let quantiles = SkewNormalQuantiles::new(&dist).expect("table");

        let values: Vec<f64> = (0..=100).map(|i| quantiles.quantile(i as f64 / 100.0)).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert!(values.iter().all(|v| v.is_finite()));
        assert!(values[0] >= -QUANTILE_Z_LIMIT && values[100] <= QUANTILE_Z_LIMIT);
        assert_eq!(quantiles.quantile(-1.0), values[0]);
        assert_eq!(quantiles.quantile(2.0), values[100]);
    }

    #[test]
    fn test_quantiles_match_sampling() {
        let mut rng = SmallRng::seed_from_u64(5);
        for shape in [-3.0, 2.0, 8.0] {
            let dist = SkewNormalDistribution::new(50.0, 5.0, shape).expect("valid");
            let quantiles = SkewNormalQuantiles::new(&dist).expect("table");

            let n = 20_000;
            for p in [0.1, 0.5, 0.9] {
                let cut = quantiles.quantile(p);
                let below = (0..n).filter(|_| dist.sample(&mut rng) <= cut).count();
                let observed = below as f64 / n as f64;
                assert!(
                    (observed - p).abs() < 0.02,
                    "shape {}: {} of samples below the {} quantile",
                    shape,
                    observed,
                    p
                );
            }
        }
    }

    #[test]
    fn test_same_seed_same_samples() {
        let dist = SkewNormalDistribution::new(0.0, 1.0, 2.0).expect("valid");
        let mut rng1 = SmallRng::seed_from_u64(99);
        let mut rng2 = SmallRng::seed_from_u64(99);
        let a: Vec<f64> = (0..50).map(|_| dist.sample(&mut rng1)).collect();
        let b: Vec<f64> = (0..50).map(|_| dist.sample(&mut rng2)).collect();
        assert_eq!(a, b);
    }
}
