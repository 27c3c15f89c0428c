//! # Falcon Signature Verifier
//!
//! Strict format validation and verification dispatch for Falcon
//! (NIST PQC round 3) signatures, with a precompile transport and a
//! known-answer-test harness.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Parameter tables, header parsing, the
//!   format validator, codecs and lattice arithmetic. No I/O
//! - **Ports Layer** (`ports/`): Trait definitions for inbound/outbound interfaces
//! - **Service Layer** (`service.rs`): Wires the validator to a lattice primitive
//! - **Adapters** (`adapters/`): ABI codec, precompile, common interface, KAT files
//!
//! ## Status Codes
//!
//! Every verification returns `0` on success or one of the negative
//! `FALCON_ERR_*` codes. Structural problems are always reported before any
//! cryptographic work is done, so malformed input can never reach the
//! primitive.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::interface::{
    FalconBackend, FalconInterface, InterfaceError, PrecompiledBackend, PureBackend,
    PURE_BACKEND_ADDRESS,
};
pub use adapters::kat::{parse_kats, KatError, KatRecord};
pub use adapters::precompile::{
    execute_precompile, FalconPrecompile, Precompile, PrecompileError, PrecompileOutput,
};
pub use config::{BatchConfig, ConfigError, PrecompileConfig, VerifierConfig};
pub use domain::entities::{
    BatchVerificationResult, SignatureLayout, SignatureType, VerificationRequest,
    VerificationResult,
};
pub use domain::errors::{
    split_packed, status_name, FalconError, RejectReason, Rejection, Verdict, FALCON_ERR_BADARG,
    FALCON_ERR_BADSIG, FALCON_ERR_FORMAT, FALCON_ERR_INTERNAL, FALCON_ERR_RANDOM,
    FALCON_ERR_SIZE, FALCON_ERR_SUCCESS,
};
pub use domain::lattice::{NttLattice, SchoolbookLattice};
pub use domain::params::LogN;
pub use ports::inbound::FalconVerificationApi;
pub use ports::outbound::LatticePrimitive;
pub use service::FalconVerificationService;
