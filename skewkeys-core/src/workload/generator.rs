//! Key sequence generation

use super::policy::{SkewFamily, SkewPolicy, SkewSampling};
use crate::format::write_keys;
use crate::{Error, Result};
use rand::Rng;
use skewkeys_common::{
    Distribution, SkewNormalDistribution, SkewNormalQuantiles, ZipfianDistribution,
};
use std::path::Path;

/// Key sampling strategy over the domain [0, domain_size)
///
/// Holds validated parameters only; the random source is supplied per call.
#[derive(Debug, Clone)]
pub enum KeyGeneration {
    /// Uniform keys with replacement
    Uniform { domain_size: u64 },
    /// Skew-normal samples rounded and wrapped into the domain
    SkewNormal { domain_size: u64, dist: SkewNormalDistribution },
    /// Zipfian ranks shifted so the hottest rank lands on `offset`
    Zipfian { domain_size: u64, offset: u64, dist: ZipfianDistribution },
}

impl KeyGeneration {
    /// Create a uniform key generator
    pub fn uniform(domain_size: u64) -> Result<Self> {
        check_domain(domain_size)?;
        Ok(Self::Uniform { domain_size })
    }

    /// Create a skewed key generator following `policy`
    pub fn skewed(domain_size: u64, skewness: f64, policy: &SkewPolicy) -> Result<Self> {
        check_domain(domain_size)?;
        if !skewness.is_finite() {
            return Err(Error::InvalidParameter(format!("skewness must be finite, got {skewness}")));
        }
        policy.validate()?;

        match policy.family {
            SkewFamily::SkewNormal => {
                let dist = SkewNormalDistribution::new(
                    policy.center(domain_size),
                    policy.scale(domain_size),
                    skewness,
                )
                .map_err(|e| Error::InvalidParameter(e.to_string()))?;
                tracing::debug!("Skew-normal mean before wrapping: {:.2}", dist.mean());
                Ok(Self::SkewNormal { domain_size, dist })
            }
            SkewFamily::Zipfian => {
                if skewness < 0.0 {
                    return Err(Error::InvalidParameter(format!(
                        "zipfian skewness (exponent) must be >= 0.0, got {skewness}"
                    )));
                }
                let dist = ZipfianDistribution::new(domain_size, skewness)
                    .map_err(|e| Error::InvalidParameter(e.to_string()))?;
                let offset = reduce_into_domain(policy.center(domain_size), domain_size);
                Ok(Self::Zipfian { domain_size, offset, dist })
            }
        }
    }

    pub fn domain_size(&self) -> u64 {
        match self {
            Self::Uniform { domain_size }
            | Self::SkewNormal { domain_size, .. }
            | Self::Zipfian { domain_size, .. } => *domain_size,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Uniform { .. } => "Uniform",
            Self::SkewNormal { dist, .. } => dist.name(),
            Self::Zipfian { dist, .. } => dist.name(),
        }
    }

    /// Draw one key in [0, domain_size)
    pub fn sample_key<R: Rng>(&self, rng: &mut R) -> u64 {
        match self {
            Self::Uniform { domain_size } => rng.random_range(0..*domain_size),
            Self::SkewNormal { domain_size, dist } => {
                reduce_into_domain(dist.sample(rng), *domain_size)
            }
            Self::Zipfian { domain_size, offset, dist } => {
                let rank = dist.sample_rank(rng);
                ((u128::from(*offset) + u128::from(rank)) % u128::from(*domain_size)) as u64
            }
        }
    }

    /// Draw `count` keys in generation order
    pub fn sample_keys<R: Rng>(&self, rng: &mut R, count: usize) -> Vec<u64> {
        (0..count).map(|_| self.sample_key(rng)).collect()
    }

    /// Sweep the skew-normal inverse CDF: key `i` is the quantile at the
    /// midpoint probability `(i + 0.5) / count`, rounded and wrapped into the
    /// domain. No randomness is involved.
    pub fn quantile_keys(&self, count: usize) -> Result<Vec<u64>> {
        let Self::SkewNormal { domain_size, dist } = self else {
            return Err(Error::InvalidParameter(format!(
                "quantile sampling needs a skew-normal generator, not {}",
                self.name()
            )));
        };
        let quantiles =
            SkewNormalQuantiles::new(dist).map_err(|e| Error::InvalidParameter(e.to_string()))?;

        let n = count as f64;
        Ok((0..count)
            .map(|i| reduce_into_domain(quantiles.quantile((i as f64 + 0.5) / n), *domain_size))
            .collect())
    }
}

fn check_domain(domain_size: u64) -> Result<()> {
    if domain_size == 0 {
        return Err(Error::InvalidParameter("number_of_distinct_keys must be >= 1".to_string()));
    }
    Ok(())
}

/// Round to the nearest integer and wrap into [0, domain_size)
///
/// Negative samples wrap to the top of the domain (Euclidean modulo).
fn reduce_into_domain(sample: f64, domain_size: u64) -> u64 {
    let rounded = sample.round() as i128;
    rounded.rem_euclid(i128::from(domain_size)) as u64
}

/// Generate `count` keys drawn uniformly from [0, domain_size)
pub fn generate_uniform<R: Rng>(rng: &mut R, domain_size: u64, count: usize) -> Result<Vec<u64>> {
    let keygen = KeyGeneration::uniform(domain_size)?;
    tracing::debug!("Generating {} uniform keys over [0, {})", count, keygen.domain_size());
    Ok(keygen.sample_keys(rng, count))
}

/// Generate `count` keys concentrated according to `skewness` and `policy`
pub fn generate_skewed<R: Rng>(
    rng: &mut R,
    domain_size: u64,
    count: usize,
    skewness: f64,
    policy: &SkewPolicy,
) -> Result<Vec<u64>> {
    let keygen = KeyGeneration::skewed(domain_size, skewness, policy)?;
    tracing::debug!(
        "Generating {} {} keys over [0, {}) (skewness {}, center {:.2}, {} sampling)",
        count,
        policy.family.name(),
        domain_size,
        skewness,
        policy.center(domain_size),
        policy.sampling.name()
    );
    match policy.sampling {
        SkewSampling::Random => Ok(keygen.sample_keys(rng, count)),
        SkewSampling::Quantile => keygen.quantile_keys(count),
    }
}

/// Generate uniform keys and write them to `path`, returning the sequence
pub fn generate_uniform_to_file<R: Rng, P: AsRef<Path>>(
    rng: &mut R,
    domain_size: u64,
    count: usize,
    path: P,
) -> Result<Vec<u64>> {
    let keys = generate_uniform(rng, domain_size, count)?;
    write_keys(path, &keys)?;
    Ok(keys)
}

/// Generate skewed keys and write them to `path`, returning the sequence
pub fn generate_skewed_to_file<R: Rng, P: AsRef<Path>>(
    rng: &mut R,
    domain_size: u64,
    count: usize,
    skewness: f64,
    policy: &SkewPolicy,
    path: P,
) -> Result<Vec<u64>> {
    let keys = generate_skewed(rng, domain_size, count, skewness, policy)?;
    write_keys(path, &keys)?;
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::KeyFrequencies;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    #[test]
    fn test_uniform_count_and_range() {
        for domain_size in [1, 2, 7, 1024, 1 << 40] {
            let keys = generate_uniform(&mut rng(), domain_size, 5000).unwrap();
            assert_eq!(keys.len(), 5000);
            assert!(keys.iter().all(|&k| k < domain_size), "key out of [0, {})", domain_size);
        }
    }

    #[test]
    fn test_skewed_count_and_range() {
        let policies = [
            SkewPolicy::default(),
            SkewPolicy::skew_normal(0.5, 0.25),
            SkewPolicy::skew_normal(1.0, 2.0),
            SkewPolicy::zipfian(0.0),
            SkewPolicy::zipfian(0.9),
        ];
        for policy in &policies {
            for skewness in [0.0, 0.5, 2.0, 10.0] {
                for domain_size in [1, 3, 1024] {
                    let keys =
                        generate_skewed(&mut rng(), domain_size, 3000, skewness, policy).unwrap();
                    assert_eq!(keys.len(), 3000);
                    assert!(
                        keys.iter().all(|&k| k < domain_size),
                        "{:?} skewness {} produced key outside [0, {})",
                        policy.family,
                        skewness,
                        domain_size
                    );
                }
            }
        }
    }

    #[test]
    fn test_negative_skewness_skew_normal() {
        let keys = generate_skewed(&mut rng(), 1024, 2000, -5.0, &SkewPolicy::default()).unwrap();
        assert_eq!(keys.len(), 2000);
        assert!(keys.iter().all(|&k| k < 1024));
    }

    #[test]
    fn test_zero_count() {
        assert!(generate_uniform(&mut rng(), 1024, 0).unwrap().is_empty());
        assert!(generate_skewed(&mut rng(), 1024, 0, 2.0, &SkewPolicy::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_single_key_domain() {
        assert!(generate_uniform(&mut rng(), 1, 500).unwrap().iter().all(|&k| k == 0));
        assert!(generate_skewed(&mut rng(), 1, 500, 2.0, &SkewPolicy::default())
            .unwrap()
            .iter()
            .all(|&k| k == 0));
        assert!(generate_skewed(&mut rng(), 1, 500, 1.0, &SkewPolicy::zipfian(0.5))
            .unwrap()
            .iter()
            .all(|&k| k == 0));
    }

    #[test]
    fn test_deterministic_with_seed() {
        let policy = SkewPolicy::default();
        let a = generate_uniform(&mut SmallRng::seed_from_u64(7), 1024, 1000).unwrap();
        let b = generate_uniform(&mut SmallRng::seed_from_u64(7), 1024, 1000).unwrap();
        assert_eq!(a, b);

        let a = generate_skewed(&mut SmallRng::seed_from_u64(7), 1024, 1000, 2.0, &policy).unwrap();
        let b = generate_skewed(&mut SmallRng::seed_from_u64(7), 1024, 1000, 2.0, &policy).unwrap();
        assert_eq!(a, b);

        let c = generate_skewed(&mut SmallRng::seed_from_u64(8), 1024, 1000, 2.0, &policy).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(generate_uniform(&mut rng(), 0, 10), Err(Error::InvalidParameter(_))));
        assert!(matches!(
            generate_skewed(&mut rng(), 0, 10, 2.0, &SkewPolicy::default()),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            generate_skewed(&mut rng(), 10, 10, f64::NAN, &SkewPolicy::default()),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            generate_skewed(&mut rng(), 10, 10, -1.0, &SkewPolicy::zipfian(0.0)),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            generate_skewed(&mut rng(), 10, 10, 1.0, &SkewPolicy::skew_normal(2.0, 0.1)),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            generate_skewed(&mut rng(), 10, 10, 1.0, &SkewPolicy::skew_normal(0.5, 0.0)),
            Err(Error::InvalidParameter(_))
        ));
        let zipf_sweep = SkewPolicy::zipfian(0.5).with_sampling(SkewSampling::Quantile);
        assert!(matches!(
            generate_skewed(&mut rng(), 10, 10, 1.0, &zipf_sweep),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_quantile_sweep_is_deterministic() {
        let policy = SkewPolicy::default().with_sampling(SkewSampling::Quantile);
        let a = generate_skewed(&mut SmallRng::seed_from_u64(1), 1024, 4096, 2.0, &policy).unwrap();
        let b = generate_skewed(&mut SmallRng::seed_from_u64(2), 1024, 4096, 2.0, &policy).unwrap();
        assert_eq!(a, b, "quantile sweep must not depend on the random source");
        assert_eq!(a.len(), 4096);
        assert!(a.iter().all(|&k| k < 1024));
    }

    #[test]
    fn test_quantile_sweep_shape() {
        // Shape 0: plain normal centered on 512 with scale 64, far from both
        // domain edges, so no key wraps and the sweep stays sorted
        let policy = SkewPolicy::skew_normal(0.5, 1.0 / 16.0).with_sampling(SkewSampling::Quantile);
        let keys = generate_skewed(&mut rng(), 1024, 1001, 0.0, &policy).unwrap();
        assert!(keys.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(keys[500], 512);
        let plus_one_sigma = keys[841];
        assert!((575..=577).contains(&plus_one_sigma), "got {}", plus_one_sigma);

        let uniform = generate_uniform(&mut rng(), 1024, 4096).unwrap();
        let swept = generate_skewed(
            &mut rng(),
            1024,
            4096,
            2.0,
            &SkewPolicy::default().with_sampling(SkewSampling::Quantile),
        )
        .unwrap();
        assert!(
            KeyFrequencies::from_keys(1024, &swept).variance()
                > 2.0 * KeyFrequencies::from_keys(1024, &uniform).variance()
        );
    }

    #[test]
    fn test_quantile_keys_requires_skew_normal() {
        assert!(matches!(
            KeyGeneration::uniform(8).unwrap().quantile_keys(4),
            Err(Error::InvalidParameter(_))
        ));
        let keygen = KeyGeneration::skewed(1, 3.0, &SkewPolicy::default()).unwrap();
        assert_eq!(keygen.quantile_keys(5).unwrap(), vec![0; 5]);
        assert!(keygen.quantile_keys(0).unwrap().is_empty());
    }

    #[test]
    fn test_skewed_more_concentrated_than_uniform() {
        let domain_size = 1024;
        let count = 4096;

        let uniform = generate_uniform(&mut rng(), domain_size, count).unwrap();
        let uniform_var = KeyFrequencies::from_keys(domain_size, &uniform).variance();

        for policy in [SkewPolicy::default(), SkewPolicy::zipfian(1.0 / 7.0)] {
            let skewed = generate_skewed(&mut rng(), domain_size, count, 2.0, &policy).unwrap();
            let skewed_var = KeyFrequencies::from_keys(domain_size, &skewed).variance();
            assert!(
                skewed_var > 2.0 * uniform_var,
                "{:?}: skewed variance {} not materially above uniform {}",
                policy.family,
                skewed_var,
                uniform_var
            );
        }
    }

    #[test]
    fn test_zipfian_hottest_key_at_center() {
        let policy = SkewPolicy::zipfian(0.5);
        let keys = generate_skewed(&mut rng(), 1024, 20_000, 1.2, &policy).unwrap();
        let freqs = KeyFrequencies::from_keys(1024, &keys);
        assert_eq!(freqs.hottest_key(), Some(512));
    }

    #[test]
    fn test_reduce_into_domain() {
        assert_eq!(reduce_into_domain(-1.0, 10), 9);
        assert_eq!(reduce_into_domain(-0.4, 10), 0);
        assert_eq!(reduce_into_domain(9.6, 10), 0);
        assert_eq!(reduce_into_domain(4.4, 10), 4);
        assert_eq!(reduce_into_domain(-23.0, 10), 7);
        assert_eq!(reduce_into_domain(1e30, 1), 0);
    }

    #[test]
    fn test_keygen_accessors() {
        let keygen = KeyGeneration::skewed(100, 1.0, &SkewPolicy::zipfian(0.0)).unwrap();
        assert_eq!(keygen.domain_size(), 100);
        assert_eq!(keygen.name(), "Zipfian");
        assert_eq!(KeyGeneration::uniform(5).unwrap().name(), "Uniform");
    }
}
