//! The `inspect` command: frequency statistics and text histograms of
//! existing key files. Reads only the files; it never touches generator state.

use anyhow::{bail, Context, Result};
use skewkeys_core::format::read_keys;
use skewkeys_core::stats::KeyFrequencies;
use std::path::{Path, PathBuf};

use crate::output::InspectReport;

/// Bin count used by the histograms unless overridden
pub const DEFAULT_BINS: usize = 50;

/// Analyze the key file at `path`
///
/// Without `domain_size` the domain is inferred as `max key + 1`.
pub fn inspect_file(path: &Path, domain_size: Option<u64>, bins: usize) -> Result<InspectReport> {
    let mut reports = inspect_files(&[path.to_path_buf()], domain_size, bins)?;
    reports.pop().context("no report produced")
}

/// Analyze several key files over one shared domain so their histogram bins
/// line up
///
/// Without `domain_size` the domain is inferred as `max key + 1` across all
/// files.
pub fn inspect_files(
    paths: &[PathBuf],
    domain_size: Option<u64>,
    bins: usize,
) -> Result<Vec<InspectReport>> {
    if bins == 0 {
        bail!("bins must be > 0");
    }
    if paths.is_empty() {
        bail!("no key files given");
    }

    let mut sequences = Vec::with_capacity(paths.len());
    for path in paths {
        let keys = read_keys(path)
            .with_context(|| format!("Failed to read key file: {}", path.display()))?;
        sequences.push((path, keys));
    }

    let domain_size = match domain_size {
        Some(0) => bail!("domain size must be >= 1"),
        Some(n) => {
            for (path, keys) in &sequences {
                if let Some(&key) = keys.iter().find(|&&key| key >= n) {
                    bail!("key {} in {} is outside the domain [0, {})", key, path.display(), n);
                }
            }
            n
        }
        None => infer_domain(&sequences)?,
    };

    Ok(sequences
        .iter()
        .map(|(path, keys)| {
            let freqs = KeyFrequencies::from_keys(domain_size, keys);
            tracing::debug!(
                "Inspected {} keys of {} over [0, {})",
                freqs.total(),
                path.display(),
                domain_size
            );
            InspectReport {
                file: path.to_path_buf(),
                frequencies: freqs.summary(),
                histogram: freqs.histogram(bins),
            }
        })
        .collect())
}

fn infer_domain(sequences: &[(&PathBuf, Vec<u64>)]) -> Result<u64> {
    let max = sequences.iter().filter_map(|(_, keys)| keys.iter().copied().max()).max();
    match max {
        None => Ok(1),
        Some(u64::MAX) => bail!(
            "key {} leaves no room for an inferred domain; pass --domain-size explicitly",
            u64::MAX
        ),
        Some(max) => Ok(max + 1),
    }
}
