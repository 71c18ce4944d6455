//! Statistics over generated key sequences

use serde::{Deserialize, Serialize};

pub mod analysis;

// Re-export main types
pub use analysis::{HistogramBin, KeyFrequencies};

/// Summary of one key sequence, suitable for reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencySummary {
    pub domain_size: u64,
    pub total_keys: u64,
    pub distinct_keys: u64,
    pub hottest_key: Option<u64>,
    pub max_frequency: u64,
    pub mean_frequency: f64,
    pub frequency_variance: f64,
    /// Share of all keys that fall on the hottest 1% of the domain
    pub top_1pct_share: f64,
}
