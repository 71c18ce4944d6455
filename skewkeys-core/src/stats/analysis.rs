//! Per-key frequency analysis (variance, hot-key share, histograms)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::FrequencySummary;

/// Occurrence counts of each key of a sequence over its domain
///
/// Only keys that occur are stored; keys that never occur still count as
/// zero-frequency members of the domain in every statistic.
#[derive(Debug, Clone)]
pub struct KeyFrequencies {
    domain_size: u64,
    total: u64,
    counts: HashMap<u64, u64>,
}

/// One equal-width histogram bin covering keys [start, end)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: u64,
    pub end: u64,
    pub count: u64,
}

impl KeyFrequencies {
    pub fn from_keys(domain_size: u64, keys: &[u64]) -> Self {
        let mut counts = HashMap::new();
        for &key in keys {
            *counts.entry(key).or_insert(0) += 1;
        }
        Self { domain_size, total: keys.len() as u64, counts }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn count(&self, key: u64) -> u64 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    pub fn distinct_keys(&self) -> u64 {
        self.counts.len() as u64
    }

    pub fn max_frequency(&self) -> u64 {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// Most frequent key (smallest key wins ties)
    pub fn hottest_key(&self) -> Option<u64> {
        self.counts
            .iter()
            .max_by(|(ka, ca), (kb, cb)| ca.cmp(cb).then(kb.cmp(ka)))
            .map(|(key, _)| *key)
    }

    pub fn mean(&self) -> f64 {
        if self.domain_size == 0 {
            return 0.0;
        }
        self.total as f64 / self.domain_size as f64
    }

    /// Population variance of per-key counts over the whole domain
    pub fn variance(&self) -> f64 {
        if self.domain_size == 0 {
            return 0.0;
        }
        let sum_sq: f64 = self.counts.values().map(|&c| (c as f64) * (c as f64)).sum();
        let mean = self.mean();
        (sum_sq / self.domain_size as f64 - mean * mean).max(0.0)
    }

    /// Share of all keys that land on the hottest `fraction` of the domain
    ///
    /// At least one key is always considered hot.
    pub fn top_share(&self, fraction: f64) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let hot = ((self.domain_size as f64 * fraction.clamp(0.0, 1.0)).ceil() as u64).max(1);

        let mut sorted: Vec<u64> = self.counts.values().copied().collect();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        let hot_total: u64 = sorted.iter().take(hot.min(sorted.len() as u64) as usize).sum();

        hot_total as f64 / self.total as f64
    }

    /// Equal-width histogram over the domain
    ///
    /// Bins are capped at the domain size so that every bin covers at least one key.
    pub fn histogram(&self, bins: usize) -> Vec<HistogramBin> {
        if self.domain_size == 0 || bins == 0 {
            return Vec::new();
        }
        let bins = (bins as u64).min(self.domain_size);
        // ceil(i * domain / bins), so that key k falls in bin floor(k * bins / domain)
        let bound = |i: u64| {
            let (i, n, b) = (u128::from(i), u128::from(self.domain_size), u128::from(bins));
            ((i * n + b - 1) / b) as u64
        };

        let mut out: Vec<HistogramBin> = (0..bins)
            .map(|i| HistogramBin { start: bound(i), end: bound(i + 1), count: 0 })
            .collect();

        for (&key, &count) in &self.counts {
            let idx = (u128::from(key) * u128::from(bins) / u128::from(self.domain_size)) as usize;
            if let Some(bin) = out.get_mut(idx) {
                bin.count += count;
            }
        }

        out
    }

    pub fn summary(&self) -> FrequencySummary {
        FrequencySummary {
            domain_size: self.domain_size,
            total_keys: self.total,
            distinct_keys: self.distinct_keys(),
            hottest_key: self.hottest_key(),
            max_frequency: self.max_frequency(),
            mean_frequency: self.mean(),
            frequency_variance: self.variance(),
            top_1pct_share: self.top_share(0.01),
        }
    }
}
