//! Skew policy: which distribution shapes the skewed sequence and where its
//! mass sits inside the key domain.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Distribution family used for skewed keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum SkewFamily {
    /// Skew-normal bell placed at `center_fraction`, `skewness` is the shape (alpha)
    #[default]
    SkewNormal,
    /// Zipf power law with the hottest rank at `center_fraction`, `skewness` is the exponent
    Zipfian,
}

impl SkewFamily {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SkewNormal => "skew-normal",
            Self::Zipfian => "zipfian",
        }
    }
}

/// How skewed keys are drawn from their distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum SkewSampling {
    /// Independent draws from the random source
    #[default]
    Random,
    /// Deterministic sweep of the skew-normal inverse CDF at evenly spaced
    /// probabilities, producing keys in ascending quantile order
    Quantile,
}

impl SkewSampling {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Quantile => "quantile",
        }
    }
}

/// Placement and family of the skewed key distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct SkewPolicy {
    /// Distribution family
    #[serde(default)]
    pub family: SkewFamily,
    /// Center of the skewed mass as a fraction of the domain (0.0 to 1.0)
    #[serde(default = "default_center_fraction")]
    pub center_fraction: f64,
    /// Skew-normal scale as a fraction of the domain (ignored by zipfian)
    #[serde(default = "default_scale_fraction")]
    pub scale_fraction: f64,
    /// Random draws or a quantile sweep (skew-normal only)
    #[serde(default)]
    pub sampling: SkewSampling,
}

fn default_center_fraction() -> f64 {
    1.0 / 7.0
}

fn default_scale_fraction() -> f64 {
    1.0 / 6.0
}

impl Default for SkewPolicy {
    fn default() -> Self {
        Self {
            family: SkewFamily::default(),
            center_fraction: default_center_fraction(),
            scale_fraction: default_scale_fraction(),
            sampling: SkewSampling::default(),
        }
    }
}

impl SkewPolicy {
    pub fn skew_normal(center_fraction: f64, scale_fraction: f64) -> Self {
        Self { family: SkewFamily::SkewNormal, center_fraction, scale_fraction, ..Self::default() }
    }

    pub fn zipfian(center_fraction: f64) -> Self {
        Self { family: SkewFamily::Zipfian, center_fraction, ..Self::default() }
    }

    /// Same policy with a different sampling mode
    pub fn with_sampling(self, sampling: SkewSampling) -> Self {
        Self { sampling, ..self }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.center_fraction) {
            return Err(Error::InvalidParameter(format!(
                "center_fraction must be in range [0.0, 1.0], got {}",
                self.center_fraction
            )));
        }
        if self.family == SkewFamily::SkewNormal
            && !(self.scale_fraction.is_finite() && self.scale_fraction > 0.0)
        {
            return Err(Error::InvalidParameter(format!(
                "scale_fraction must be > 0, got {}",
                self.scale_fraction
            )));
        }
        if self.family == SkewFamily::Zipfian && self.sampling == SkewSampling::Quantile {
            return Err(Error::InvalidParameter(
                "quantile sampling is only supported for the skew-normal family".to_string(),
            ));
        }
        Ok(())
    }

    /// Center of the skewed mass for a domain of `domain_size` keys
    pub fn center(&self, domain_size: u64) -> f64 {
        domain_size as f64 * self.center_fraction
    }

    /// Skew-normal scale for a domain of `domain_size` keys
    pub fn scale(&self, domain_size: u64) -> f64 {
        domain_size as f64 * self.scale_fraction
    }
}
