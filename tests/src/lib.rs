//! # Falcon Verifier Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── fixtures/         # KAT response files
//! └── src/
//!     ├── fixtures.rs   # Published vector and synthetic vector generator
//!     ├── benchmarks/   # Criterion benchmark bodies
//!     └── integration/  # End-to-end checks through the public API
//!         ├── contract_vectors.rs
//!         ├── kat.rs
//!         ├── parity.rs
//!         └── precompile.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p falcon-tests
//!
//! # By category
//! cargo test -p falcon-tests integration::kat
//! cargo test -p falcon-tests integration::parity
//!
//! # Benchmarks
//! cargo bench -p falcon-tests
//! ```

pub mod benchmarks;
pub mod fixtures;
