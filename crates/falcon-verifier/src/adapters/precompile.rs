//! # Falcon Precompile
//!
//! Exposes the verifier as a precompiled contract. The input is the
//! selector-less ABI encoding of the `verify` arguments; the output is the
//! status as a single `int256` word.
//!
//! Gas: `base_gas + word_gas * ceil(len(input) / 32)`, charged before the
//! input is decoded.

use super::abi::{self, AbiError};
use crate::config::{PrecompileConfig, VerifierConfig};
use crate::domain::lattice::NttLattice;
use crate::ports::inbound::FalconVerificationApi;
use crate::service::FalconVerificationService;
use primitive_types::H160;
use thiserror::Error;
use tracing::debug;

/// Output of a precompile call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecompileOutput {
    /// Gas used by the precompile.
    pub gas_used: u64,
    /// Output data.
    pub output: Vec<u8>,
}

/// Precompile execution errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrecompileError {
    /// Out of gas during precompile execution.
    #[error("precompile out of gas: need {required}, limit {limit}")]
    OutOfGas { required: u64, limit: u64 },

    /// Input is not a valid ABI encoding.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] AbiError),
}

/// Trait for precompiled contracts.
pub trait Precompile: Send + Sync {
    /// Execute the precompile with given input.
    ///
    /// # Arguments
    ///
    /// * `input` - Input data
    /// * `gas_limit` - Maximum gas available
    fn execute(&self, input: &[u8], gas_limit: u64) -> Result<PrecompileOutput, PrecompileError>;

    /// Get the address of this precompile.
    fn address(&self) -> H160;
}

/// Falcon verification precompile, backed by the NTT multiplier.
#[derive(Debug, Clone, Default)]
pub struct FalconPrecompile {
    service: FalconVerificationService<NttLattice>,
    config: PrecompileConfig,
}

impl FalconPrecompile {
    pub fn new(config: &VerifierConfig) -> Self {
        Self {
            service: FalconVerificationService::with_config(NttLattice, config.batch.clone()),
            config: config.precompile.clone(),
        }
    }

    pub fn gas_cost(&self, input_len: usize) -> u64 {
        self.config.gas_cost(input_len)
    }
}

impl Precompile for FalconPrecompile {
    fn execute(&self, input: &[u8], gas_limit: u64) -> Result<PrecompileOutput, PrecompileError> {
        let required = self.gas_cost(input.len());
        if required > gas_limit {
            return Err(PrecompileError::OutOfGas {
                required,
                limit: gas_limit,
            });
        }

        let call = abi::decode_verify_args(input).inspect_err(|e| {
            debug!(error = %e, "Rejecting malformed Falcon precompile input");
        })?;

        let status = self.service.verify(
            call.signature_type,
            &call.signature,
            abi::declared_len(call.signature_len),
            &call.message,
            abi::declared_len(call.message_len),
            &call.public_key,
            abi::declared_len(call.public_key_len),
        );

        Ok(PrecompileOutput {
            gas_used: required,
            output: abi::encode_int256(status).to_vec(),
        })
    }

    fn address(&self) -> H160 {
        self.config.address
    }
}

/// Execute the Falcon precompile if `address` is its default address.
#[must_use]
pub fn execute_precompile(
    address: H160,
    input: &[u8],
    gas_limit: u64,
) -> Option<Result<PrecompileOutput, PrecompileError>> {
    let precompile = FalconPrecompile::default();
    if address != precompile.address() {
        return None;
    }
    Some(precompile.execute(input, gas_limit))
}
