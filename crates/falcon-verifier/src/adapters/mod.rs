//! # Adapters Module
//!
//! Transports and harnesses built on top of the verification service.

pub mod abi;
pub mod interface;
pub mod kat;
pub mod precompile;
