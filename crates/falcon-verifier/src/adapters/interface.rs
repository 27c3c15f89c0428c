//! # Common Interface
//!
//! One `verify(signature, pubkey, message, target)` entry point in front of
//! interchangeable verifier deployments. Each backend is registered under an
//! address; the caller picks the implementation by address and gets back a
//! plain accept/reject.

use super::abi::{self, VerifyCall};
use super::precompile::{FalconPrecompile, Precompile};
use crate::config::VerifierConfig;
use crate::domain::entities::SignatureType;
use crate::domain::errors::{FalconError, FALCON_ERR_SUCCESS};
use crate::domain::lattice::SchoolbookLattice;
use crate::ports::inbound::FalconVerificationApi;
use crate::service::FalconVerificationService;
use primitive_types::H160;
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

/// Address the in-process backend is registered under by default.
pub const PURE_BACKEND_ADDRESS: H160 = H160([
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x0F, 0xA1,
]);

/// Errors from the common interface.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("no Falcon backend registered at {0:?}")]
    UnknownBackend(H160),

    #[error("a Falcon backend is already registered at {0:?}")]
    AddressInUse(H160),
}

/// A verifier deployment reachable through the common interface.
pub trait FalconBackend: Send + Sync {
    /// Status code for a whole-buffer call.
    fn verify(&self, signature_type: u8, signature: &[u8], message: &[u8], public_key: &[u8])
        -> i32;

    fn name(&self) -> &'static str;
}

/// In-process verifier using schoolbook multiplication.
#[derive(Debug, Clone, Default)]
pub struct PureBackend {
    service: FalconVerificationService<SchoolbookLattice>,
}

impl PureBackend {
    pub fn new(config: &VerifierConfig) -> Self {
        Self {
            service: FalconVerificationService::with_config(
                SchoolbookLattice,
                config.batch.clone(),
            ),
        }
    }
}

impl FalconBackend for PureBackend {
    fn verify(
        &self,
        signature_type: u8,
        signature: &[u8],
        message: &[u8],
        public_key: &[u8],
    ) -> i32 {
        self.service.verify(
            signature_type,
            signature,
            signature.len(),
            message,
            message.len(),
            public_key,
            public_key.len(),
        )
    }

    fn name(&self) -> &'static str {
        "pure"
    }
}

/// Verifier reached through the ABI-encoded precompile call.
#[derive(Debug, Clone)]
pub struct PrecompiledBackend {
    precompile: FalconPrecompile,
    gas_limit: u64,
}

impl Default for PrecompiledBackend {
    fn default() -> Self {
        Self::new(&VerifierConfig::default())
    }
}

impl PrecompiledBackend {
    pub fn new(config: &VerifierConfig) -> Self {
        Self {
            precompile: FalconPrecompile::new(config),
            gas_limit: u64::MAX,
        }
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    pub fn address(&self) -> H160 {
        self.precompile.address()
    }
}

impl FalconBackend for PrecompiledBackend {
    /// Transport failures (gas, malformed output) surface as `INTERNAL`.
    fn verify(
        &self,
        signature_type: u8,
        signature: &[u8],
        message: &[u8],
        public_key: &[u8],
    ) -> i32 {
        let input = abi::encode_verify_args(&VerifyCall::new(
            signature_type,
            signature,
            message,
            public_key,
        ));
        let output = match self.precompile.execute(&input, self.gas_limit) {
            Ok(output) => output,
            Err(e) => {
                warn!(error = %e, "Falcon precompile call failed");
                return FalconError::Internal.code();
            }
        };
        abi::decode_int256(&output.output).unwrap_or_else(|e| {
            warn!(error = %e, "Falcon precompile returned a malformed status");
            FalconError::Internal.code()
        })
    }

    fn name(&self) -> &'static str {
        "precompiled"
    }
}

/// Address-routed front end over registered backends.
pub struct FalconInterface {
    backends: HashMap<H160, Box<dyn FalconBackend>>,
    signature_type: SignatureType,
}

impl Default for FalconInterface {
    fn default() -> Self {
        Self::with_default_backends(&VerifierConfig::default())
    }
}

impl FalconInterface {
    /// Interface with no backends, verifying compressed signatures.
    pub fn empty() -> Self {
        Self {
            backends: HashMap::new(),
            signature_type: SignatureType::Compressed,
        }
    }

    /// Pure backend at [`PURE_BACKEND_ADDRESS`], precompiled backend at the
    /// configured precompile address.
    pub fn with_default_backends(config: &VerifierConfig) -> Self {
        let mut interface = Self::empty();
        let precompiled = PrecompiledBackend::new(config);
        interface
            .backends
            .insert(precompiled.address(), Box::new(precompiled));
        interface
            .backends
            .entry(PURE_BACKEND_ADDRESS)
            .or_insert_with(|| Box::new(PureBackend::new(config)));
        interface
    }

    /// Signature type passed to every backend.
    pub fn with_signature_type(mut self, signature_type: SignatureType) -> Self {
        self.signature_type = signature_type;
        self
    }

    pub fn register(
        &mut self,
        address: H160,
        backend: Box<dyn FalconBackend>,
    ) -> Result<(), InterfaceError> {
        if self.backends.contains_key(&address) {
            return Err(InterfaceError::AddressInUse(address));
        }
        self.backends.insert(address, backend);
        Ok(())
    }

    pub fn backend(&self, address: &H160) -> Option<&dyn FalconBackend> {
        self.backends.get(address).map(|b| b.as_ref())
    }

    /// Raw status from the backend at `target`.
    pub fn verify_status(
        &self,
        signature: &[u8],
        public_key: &[u8],
        message: &[u8],
        target: H160,
    ) -> Result<i32, InterfaceError> {
        let backend = self
            .backends
            .get(&target)
            .ok_or(InterfaceError::UnknownBackend(target))?;
        Ok(backend.verify(self.signature_type.code(), signature, message, public_key))
    }

    /// `true` iff the backend at `target` reports success.
    pub fn verify(
        &self,
        signature: &[u8],
        public_key: &[u8],
        message: &[u8],
        target: H160,
    ) -> Result<bool, InterfaceError> {
        Ok(self.verify_status(signature, public_key, message, target)? == FALCON_ERR_SUCCESS)
    }
}
