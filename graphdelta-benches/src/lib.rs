//! Benchmark support crate for graphdelta.
//!
//! Provides seeded synthetic graphs and parameter types used by the Criterion
//! benchmarks for edge-map churn, vertex removal and delta generation.

pub mod error;
pub mod params;
pub mod source;
