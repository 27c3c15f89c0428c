//! # Domain Entities
//!
//! Core data structures for Falcon verification.

use super::errors::{FalconError, RejectReason, Verdict};
use super::header::PayloadEncoding;
use super::params::{LogN, NONCE_LEN};
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};

/// First signature-type code outside the declared domain.
pub const SIGNATURE_TYPE_INVALID: u8 = 4;

// =============================================================================
// Signature Types
// =============================================================================

/// Caller-declared signature type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SignatureType {
    /// Derive the layout from the header byte.
    Inferred = 0,
    /// Variable-length compressed signature.
    Compressed = 1,
    /// Compressed signature zero padded to a fixed size.
    Padded = 2,
    /// Fixed-width constant-time encoding.
    ConstantTime = 3,
}

impl SignatureType {
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// `None` for any code outside `0..=3`.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(SignatureType::Inferred),
            1 => Some(SignatureType::Compressed),
            2 => Some(SignatureType::Padded),
            3 => Some(SignatureType::ConstantTime),
            _ => None,
        }
    }
}

impl From<SignatureType> for u8 {
    fn from(t: SignatureType) -> Self {
        t.code()
    }
}

/// Concrete signature layout after `Inferred` has been resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureLayout {
    Compressed,
    Padded,
    ConstantTime,
}

impl SignatureLayout {
    pub const fn encoding(self) -> PayloadEncoding {
        match self {
            SignatureLayout::Compressed | SignatureLayout::Padded => PayloadEncoding::Compressed,
            SignatureLayout::ConstantTime => PayloadEncoding::ConstantTime,
        }
    }

    /// Whether zero bytes may follow the encoded payload.
    pub const fn allows_padding(self) -> bool {
        matches!(self, SignatureLayout::Padded)
    }
}

// =============================================================================
// Validated Call
// =============================================================================

/// Borrowed view of a call that passed every structural check.
#[derive(Clone, Copy, Debug)]
pub struct ValidatedCall<'a> {
    pub logn: LogN,
    pub layout: SignatureLayout,
    pub nonce: &'a [u8; NONCE_LEN],
    /// Encoded `s2`, including any padding.
    pub payload: &'a [u8],
    /// Public-key coefficient bytes, header stripped.
    pub public_key: &'a [u8],
    pub message: &'a [u8],
}

/// Output of payload decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedSignature {
    /// `s2` coefficients, each in `[-2047, 2047]`.
    pub coefficients: Vec<i16>,
    /// Payload bytes consumed by the encoding.
    pub consumed: usize,
}

// =============================================================================
// Verification Request/Result Types
// =============================================================================

/// Owned verification request.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    /// Raw type code; out-of-range values are reported as `BADARG`.
    pub signature_type: u8,
    #[serde_as(as = "Hex")]
    pub signature: Vec<u8>,
    #[serde_as(as = "Hex")]
    pub message: Vec<u8>,
    #[serde_as(as = "Hex")]
    pub public_key: Vec<u8>,
}

impl VerificationRequest {
    pub fn new(
        signature_type: SignatureType,
        signature: impl Into<Vec<u8>>,
        message: impl Into<Vec<u8>>,
        public_key: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            signature_type: signature_type.code(),
            signature: signature.into(),
            message: message.into(),
            public_key: public_key.into(),
        }
    }
}

/// Result of a single verification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Whether the signature is valid
    pub valid: bool,
    /// Signed status code
    pub status: i32,
    /// Check that decided the outcome
    pub reason: RejectReason,
    /// Error details (if verification failed)
    pub error: Option<FalconError>,
}

impl VerificationResult {
    pub fn from_verdict(verdict: Verdict) -> Self {
        Self {
            valid: verdict.is_success(),
            status: verdict.status,
            reason: verdict.reason,
            error: verdict.error(),
        }
    }

    pub fn verdict(&self) -> Verdict {
        Verdict {
            status: self.status,
            reason: self.reason,
        }
    }
}

/// Result of batch verification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchVerificationResult {
    /// Individual results, in request order
    pub results: Vec<VerificationResult>,
    /// Whether all verifications passed
    pub all_valid: bool,
    /// Count of valid signatures
    pub valid_count: usize,
    /// Count of invalid signatures
    pub invalid_count: usize,
}

impl BatchVerificationResult {
    /// Create a batch result from individual results.
    pub fn from_results(results: Vec<VerificationResult>) -> Self {
        let valid_count = results.iter().filter(|r| r.valid).count();
        let invalid_count = results.len() - valid_count;
        let all_valid = invalid_count == 0;

        Self {
            results,
            all_valid,
            valid_count,
            invalid_count,
        }
    }
}
