//! Compare how concentrated each skew family is for the same parameters
//!
//! Prints per-key frequency statistics for a uniform sequence and for skewed
//! sequences at several skewness values, without writing any files.
//!
//!   cargo run -p skewkeys-core --example compare_skew

use rand::rngs::SmallRng;
use rand::SeedableRng;
use skewkeys_core::stats::KeyFrequencies;
use skewkeys_core::{generate_skewed, generate_uniform, SkewPolicy, SkewSampling};

const DOMAIN_SIZE: u64 = 1 << 10;
const NOPS: usize = 1 << 12;
const SEED: u64 = 42;

fn print_row(label: &str, keys: &[u64]) {
    let summary = KeyFrequencies::from_keys(DOMAIN_SIZE, keys).summary();
    println!(
        "{:<24} distinct {:>5}  max {:>5}  variance {:>9.2}  top1% {:>6.2}%",
        label,
        summary.distinct_keys,
        summary.max_frequency,
        summary.frequency_variance,
        summary.top_1pct_share * 100.0
    );
}

fn main() -> skewkeys_core::Result<()> {
    let uniform = generate_uniform(&mut SmallRng::seed_from_u64(SEED), DOMAIN_SIZE, NOPS)?;
    print_row("uniform", &uniform);

    let policies = [
        ("skew-normal", SkewPolicy::default()),
        ("skew-normal sweep", SkewPolicy::default().with_sampling(SkewSampling::Quantile)),
        ("zipfian", SkewPolicy::zipfian(0.0)),
    ];
    for (name, policy) in &policies {
        for skewness in [0.5, 1.0, 2.0, 4.0] {
            let mut rng = SmallRng::seed_from_u64(SEED);
            let keys = generate_skewed(&mut rng, DOMAIN_SIZE, NOPS, skewness, policy)?;
            print_row(&format!("{name} s={skewness}"), &keys);
        }
    }

    Ok(())
}
