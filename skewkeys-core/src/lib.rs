//! Skewkeys Core Library
//!
//! This crate provides the key generator: uniform and skewed key sequences over
//! a bounded domain, the line format they are persisted in, seed derivation for
//! reproducible runs, and per-key frequency analysis.

pub mod error;
pub mod format;
pub mod seed;
pub mod stats;
pub mod workload;

pub use error::{Error, Result};
pub use workload::{
    generate_skewed, generate_uniform, KeyGeneration, SkewFamily, SkewPolicy, SkewSampling,
};
