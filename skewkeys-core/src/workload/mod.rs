//! Key workload generation
//!
//! Key types:
//! - `KeyGeneration` - Key sampling strategies (uniform, skew-normal, zipfian)
//! - `SkewPolicy` - Distribution family and placement for skewed keys
//!
//! Every generation call takes its random source explicitly; see
//! [`crate::seed`] for building reproducible sources from a master seed.

pub mod generator;
pub mod policy;

// Re-export distributions from skewkeys-common
pub use skewkeys_common::distributions;
pub use skewkeys_common::{
    Distribution, SkewNormalDistribution, SkewNormalQuantiles, ZipfianDistribution,
};

pub use generator::{
    generate_skewed, generate_skewed_to_file, generate_uniform, generate_uniform_to_file,
    KeyGeneration,
};
pub use policy::{SkewFamily, SkewPolicy, SkewSampling};
