//! Common utilities for skewkeys
//!
//! This crate provides shared utilities used by multiple skewkeys crates:
//! - `distributions`: Statistical distributions for key sampling

pub mod distributions;

pub use distributions::{
    Distribution, SkewNormalDistribution, SkewNormalQuantiles, ZipfianDistribution,
};
