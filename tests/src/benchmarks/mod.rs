//! # Falcon Verifier Benchmarks
//!
//! Criterion groups shared by the bench harness.
