//! Verifier configuration with environment overrides.

use primitive_types::H160;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use tracing::warn;

/// Conventional address of the Falcon precompile (`0x...0065`).
pub const DEFAULT_PRECOMPILE_ADDRESS: H160 = H160([
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x65,
]);

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("precompile address must not be zero")]
    ZeroPrecompileAddress,

    #[error("precompile base gas must be positive")]
    ZeroBaseGas,

    #[error("batch parallel threshold must be at least 1")]
    ZeroParallelThreshold,
}

/// Precompile transport settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrecompileConfig {
    /// Address the precompile answers on
    pub address: H160,
    /// Flat cost charged per call
    pub base_gas: u64,
    /// Cost per 32-byte word of input
    pub word_gas: u64,
}

impl Default for PrecompileConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_PRECOMPILE_ADDRESS,
            base_gas: 3_000,
            word_gas: 12,
        }
    }
}

impl PrecompileConfig {
    /// `base_gas + word_gas * ceil(input_len / 32)`, saturating.
    pub fn gas_cost(&self, input_len: usize) -> u64 {
        let words = (input_len as u64).div_ceil(32);
        self.base_gas.saturating_add(self.word_gas.saturating_mul(words))
    }
}

/// Batch verification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Batches at least this large are verified on the rayon pool
    pub parallel_threshold: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 8,
        }
    }
}

/// Top-level verifier configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    pub precompile: PrecompileConfig,
    pub batch: BatchConfig,
}

impl VerifierConfig {
    /// Check invariants that `Default` guarantees but overrides may break.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.precompile.address.is_zero() {
            return Err(ConfigError::ZeroPrecompileAddress);
        }
        if self.precompile.base_gas == 0 {
            return Err(ConfigError::ZeroBaseGas);
        }
        if self.batch.parallel_threshold == 0 {
            return Err(ConfigError::ZeroParallelThreshold);
        }
        Ok(())
    }

    /// Defaults overridden from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `FALCON_PRECOMPILE_ADDRESS`: 20-byte hex address (default: 0x...65)
    /// - `FALCON_PRECOMPILE_BASE_GAS`: flat gas per call (default: 3000)
    /// - `FALCON_PRECOMPILE_WORD_GAS`: gas per input word (default: 12)
    /// - `FALCON_BATCH_PARALLEL_THRESHOLD`: minimum parallel batch (default: 8)
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("FALCON_PRECOMPILE_ADDRESS") {
            match parse_address(&raw) {
                Some(address) => config.precompile.address = address,
                None => warn!("FALCON_PRECOMPILE_ADDRESS must be 20 bytes of hex, got {raw:?}"),
            }
        }
        override_number(&lookup, "FALCON_PRECOMPILE_BASE_GAS", &mut config.precompile.base_gas);
        override_number(&lookup, "FALCON_PRECOMPILE_WORD_GAS", &mut config.precompile.word_gas);
        override_number(
            &lookup,
            "FALCON_BATCH_PARALLEL_THRESHOLD",
            &mut config.batch.parallel_threshold,
        );

        if let Err(e) = config.validate() {
            warn!("Invalid configuration from environment ({e}), using defaults");
            return Self::default();
        }
        config
    }
}

fn override_number<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    slot: &mut T,
) {
    if let Some(raw) = lookup(key) {
        match raw.trim().parse() {
            Ok(value) => *slot = value,
            Err(_) => warn!("{key} must be a non-negative integer, got {raw:?}"),
        }
    }
}

fn parse_address(raw: &str) -> Option<H160> {
    let raw = raw.trim();
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);
    let bytes = hex::decode(digits).ok()?;
    (bytes.len() == 20).then(|| H160::from_slice(&bytes))
}
