//! Skewkeys CLI library
//!
//! This library exposes the profile configuration, the generate and inspect
//! commands, and their report types for testing and potential reuse.

pub mod config;
pub mod generate;
pub mod inspect;
pub mod output;
