//! The `generate` command: both key sequences, written to their files

use anyhow::{Context, Result};
use skewkeys_core::seed::{component_rng, components};
use skewkeys_core::stats::KeyFrequencies;
use skewkeys_core::workload::{generate_skewed_to_file, generate_uniform_to_file};

use crate::config::ProfileConfig;
use crate::output::{GenerationReport, SequenceReport};

/// Generate the uniform and the skewed sequence described by `config`, write
/// each to its output file and summarize both
///
/// The two sequences draw from independent random streams derived from the
/// profile's master seed (or from OS entropy when no seed is set).
pub fn run_generation(config: &ProfileConfig) -> Result<GenerationReport> {
    let domain_size = config.keys.number_of_distinct_keys;
    let count = usize::try_from(config.keys.nops).context("keys.nops does not fit in usize")?;
    let seed = config.experiment.seed;

    let mut uniform_rng = component_rng(seed, components::UNIFORM_KEYS);
    let uniform =
        generate_uniform_to_file(&mut uniform_rng, domain_size, count, &config.output.uniform_file)
            .with_context(|| {
                format!(
                    "Failed to generate uniform keys into {}",
                    config.output.uniform_file.display()
                )
            })?;

    let mut skewed_rng = component_rng(seed, components::SKEWED_KEYS);
    let skewed = generate_skewed_to_file(
        &mut skewed_rng,
        domain_size,
        count,
        config.keys.skewness,
        &config.skew,
        &config.output.skewed_file,
    )
    .with_context(|| {
        format!("Failed to generate skewed keys into {}", config.output.skewed_file.display())
    })?;

    Ok(GenerationReport {
        name: config.experiment.name.clone(),
        seed,
        number_of_distinct_keys: domain_size,
        nops: config.keys.nops,
        skewness: config.keys.skewness,
        skew_family: config.skew.family.name().to_string(),
        skew_sampling: config.skew.sampling.name().to_string(),
        skew_center: config.skew.center(domain_size),
        uniform: SequenceReport {
            file: config.output.uniform_file.clone(),
            frequencies: KeyFrequencies::from_keys(domain_size, &uniform).summary(),
        },
        skewed: SequenceReport {
            file: config.output.skewed_file.clone(),
            frequencies: KeyFrequencies::from_keys(domain_size, &skewed).summary(),
        },
    })
}
