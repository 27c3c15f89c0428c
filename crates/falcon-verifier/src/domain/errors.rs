//! # Falcon Errors
//!
//! The stable status-code contract of `verify`, plus the reject reasons used
//! for diagnostics.
//!
//! Codes are part of the external interface: values matter, not just
//! categories. Callers must tolerate codes they do not know, which surface as
//! [`FalconError::Unrecognized`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Signature valid for message and key.
pub const FALCON_ERR_SUCCESS: i32 = 0;
/// Randomness source unavailable (primitive passthrough).
pub const FALCON_ERR_RANDOM: i32 = -1;
/// A length invariant is violated.
pub const FALCON_ERR_SIZE: i32 = -2;
/// Structural decode failure.
pub const FALCON_ERR_FORMAT: i32 = -3;
/// Well-formed inputs, cryptographic check failed.
pub const FALCON_ERR_BADSIG: i32 = -4;
/// Caller-supplied parameter outside its domain.
pub const FALCON_ERR_BADARG: i32 = -5;
/// Unexpected internal fault.
pub const FALCON_ERR_INTERNAL: i32 = -6;

/// Failure outcomes of a Falcon verification call.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FalconError {
    /// The primitive needed randomness and none was available
    #[error("randomness source unavailable or failed")]
    Random,

    /// A declared or actual buffer length violates a length invariant
    #[error("buffer length violates a length invariant")]
    Size,

    /// Header bits, coefficient encoding or padding are malformed
    #[error("malformed public key or signature encoding")]
    Format,

    /// The signature is well formed but does not verify
    #[error("signature does not match message and public key")]
    BadSignature,

    /// A caller-supplied parameter is outside its declared range
    #[error("parameter outside its declared range")]
    BadArgument,

    /// Unexpected fault inside the primitive
    #[error("internal computation failure")]
    Internal,

    /// A negative status code this library does not know about
    #[error("unrecognized status code {0}")]
    Unrecognized(i32),
}

impl FalconError {
    /// Signed status code as returned by `verify`.
    pub const fn code(self) -> i32 {
        match self {
            FalconError::Random => FALCON_ERR_RANDOM,
            FalconError::Size => FALCON_ERR_SIZE,
            FalconError::Format => FALCON_ERR_FORMAT,
            FalconError::BadSignature => FALCON_ERR_BADSIG,
            FalconError::BadArgument => FALCON_ERR_BADARG,
            FalconError::Internal => FALCON_ERR_INTERNAL,
            FalconError::Unrecognized(code) => code,
        }
    }

    /// Map a status code back to an error. `0` is success and yields `None`.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            FALCON_ERR_SUCCESS => None,
            FALCON_ERR_RANDOM => Some(FalconError::Random),
            FALCON_ERR_SIZE => Some(FalconError::Size),
            FALCON_ERR_FORMAT => Some(FalconError::Format),
            FALCON_ERR_BADSIG => Some(FalconError::BadSignature),
            FALCON_ERR_BADARG => Some(FalconError::BadArgument),
            FALCON_ERR_INTERNAL => Some(FalconError::Internal),
            other => Some(FalconError::Unrecognized(other)),
        }
    }

    /// Symbolic name, e.g. `FALCON_ERR_FORMAT`.
    pub const fn name(self) -> &'static str {
        match self {
            FalconError::Random => "FALCON_ERR_RANDOM",
            FalconError::Size => "FALCON_ERR_SIZE",
            FalconError::Format => "FALCON_ERR_FORMAT",
            FalconError::BadSignature => "FALCON_ERR_BADSIG",
            FalconError::BadArgument => "FALCON_ERR_BADARG",
            FalconError::Internal => "FALCON_ERR_INTERNAL",
            FalconError::Unrecognized(_) => "FALCON_ERR_UNRECOGNIZED",
        }
    }
}

/// Collapse an outcome into its signed status code.
pub fn status_code(outcome: Result<(), FalconError>) -> i32 {
    match outcome {
        Ok(()) => FALCON_ERR_SUCCESS,
        Err(e) => e.code(),
    }
}

/// Inverse of [`status_code`].
pub fn outcome_from_code(code: i32) -> Result<(), FalconError> {
    match FalconError::from_code(code) {
        None => Ok(()),
        Some(e) => Err(e),
    }
}

/// Symbolic name of any status code, success included.
pub fn status_name(code: i32) -> &'static str {
    match FalconError::from_code(code) {
        None => "FALCON_ERR_SUCCESS",
        Some(e) => e.name(),
    }
}

// =============================================================================
// REJECT REASONS
// =============================================================================

/// Which check decided the outcome of a call.
///
/// Values are stable; they are packed into the diagnostic status
/// `±(reason * 10 + |status|)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RejectReason {
    /// Nothing was rejected.
    None = 0,
    DeclaredLengthExceedsBuffer = 1,
    PublicKeyEmpty = 2,
    PublicKeyHeader = 3,
    SignatureTooShort = 4,
    SignatureHeader = 5,
    DegreeMismatch = 6,
    SignatureTypeOutOfRange = 7,
    UnknownEncoding = 8,
    EncodingTypeMismatch = 9,
    SignatureLength = 10,
    PublicKeyLength = 11,
    MessageEmpty = 12,
    PublicKeyDecode = 13,
    PayloadDecode = 14,
    NonCanonicalPadding = 15,
    /// The lattice check itself failed.
    CryptoRejected = 16,
    /// The primitive reported `RANDOM`, `INTERNAL` or an unknown code.
    PrimitiveFault = 17,
}

impl RejectReason {
    const ALL: [RejectReason; 18] = [
        RejectReason::None,
        RejectReason::DeclaredLengthExceedsBuffer,
        RejectReason::PublicKeyEmpty,
        RejectReason::PublicKeyHeader,
        RejectReason::SignatureTooShort,
        RejectReason::SignatureHeader,
        RejectReason::DegreeMismatch,
        RejectReason::SignatureTypeOutOfRange,
        RejectReason::UnknownEncoding,
        RejectReason::EncodingTypeMismatch,
        RejectReason::SignatureLength,
        RejectReason::PublicKeyLength,
        RejectReason::MessageEmpty,
        RejectReason::PublicKeyDecode,
        RejectReason::PayloadDecode,
        RejectReason::NonCanonicalPadding,
        RejectReason::CryptoRejected,
        RejectReason::PrimitiveFault,
    ];

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    pub const fn describe(self) -> &'static str {
        match self {
            RejectReason::None => "accepted",
            RejectReason::DeclaredLengthExceedsBuffer => "declared length exceeds buffer",
            RejectReason::PublicKeyEmpty => "public key is empty",
            RejectReason::PublicKeyHeader => "public key header is invalid",
            RejectReason::SignatureTooShort => "signature shorter than header, nonce and payload",
            RejectReason::SignatureHeader => "signature header is invalid",
            RejectReason::DegreeMismatch => "signature and public key degrees differ",
            RejectReason::SignatureTypeOutOfRange => "signature type out of range",
            RejectReason::UnknownEncoding => "header encoding bits are undefined",
            RejectReason::EncodingTypeMismatch => "header encoding does not match signature type",
            RejectReason::SignatureLength => "signature length does not match its type",
            RejectReason::PublicKeyLength => "public key length does not match its degree",
            RejectReason::MessageEmpty => "message is empty",
            RejectReason::PublicKeyDecode => "public key coefficients are malformed",
            RejectReason::PayloadDecode => "signature payload is malformed",
            RejectReason::NonCanonicalPadding => "signature padding is not canonical",
            RejectReason::CryptoRejected => "lattice check failed",
            RejectReason::PrimitiveFault => "primitive reported a fault",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// A rejection raised by the validator or the dispatcher.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("{error} ({reason})")]
pub struct Rejection {
    pub error: FalconError,
    pub reason: RejectReason,
}

impl Rejection {
    pub const fn new(error: FalconError, reason: RejectReason) -> Self {
        Self { error, reason }
    }
}

// =============================================================================
// VERDICT
// =============================================================================

/// Status code together with the check that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Signed status code.
    pub status: i32,
    /// Deciding check.
    pub reason: RejectReason,
}

impl Verdict {
    pub const fn accepted() -> Self {
        Self {
            status: FALCON_ERR_SUCCESS,
            reason: RejectReason::None,
        }
    }

    pub const fn rejected(rejection: Rejection) -> Self {
        Self {
            status: rejection.error.code(),
            reason: rejection.reason,
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status == FALCON_ERR_SUCCESS
    }

    pub const fn error(&self) -> Option<FalconError> {
        FalconError::from_code(self.status)
    }

    /// Diagnostic status `±(reason * 10 + |status|)`.
    ///
    /// Codes whose magnitude does not fit in a single decimal digit cannot be
    /// packed and are returned unchanged.
    pub fn packed(&self) -> i32 {
        let magnitude = self.status.unsigned_abs();
        if magnitude >= 10 {
            return self.status;
        }
        let packed = i32::from(self.reason.code()) * 10 + magnitude as i32;
        if self.status < 0 {
            -packed
        } else {
            packed
        }
    }
}

impl From<Rejection> for Verdict {
    fn from(rejection: Rejection) -> Self {
        Verdict::rejected(rejection)
    }
}

/// Split a packed diagnostic status into `(status, reason)`.
///
/// `reason` keeps the sign and the factor of ten, e.g. `-63` splits into
/// `(-3, -60)`.
pub fn split_packed(packed: i32) -> (i32, i32) {
    let magnitude = packed.unsigned_abs();
    let status = (magnitude % 10) as i32;
    let reason = (magnitude - magnitude % 10) as i32;
    if packed < 0 {
        (-status, -reason)
    } else {
        (status, reason)
    }
}

// =============================================================================
// TESTS
// =============================================================================
