//! # Domain Layer
//!
//! Pure Falcon verification logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod codec;
pub mod entities;
pub mod errors;
pub mod header;
pub mod lattice;
pub mod params;
pub mod validator;
