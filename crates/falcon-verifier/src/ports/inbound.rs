//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of the verifier.

use crate::domain::entities::{
    BatchVerificationResult, SignatureType, VerificationRequest, VerificationResult,
};
use crate::domain::errors::Verdict;

/// Primary Falcon Verification API.
///
/// Every entry point returns a status code rather than an error: success is
/// `0`, every failure is one of the negative `FALCON_ERR_*` codes.
/// Implementations must be thread-safe (`Send + Sync`).
pub trait FalconVerificationApi: Send + Sync {
    // =========================================================================
    // Single Verification
    // =========================================================================

    /// Verify with caller-declared lengths.
    ///
    /// A declared length larger than its buffer yields `FALCON_ERR_SIZE`.
    /// Only `signature_type` values `0..=3` are meaningful; anything else
    /// yields `FALCON_ERR_BADARG` once the headers have been checked.
    #[allow(clippy::too_many_arguments)]
    fn verify(
        &self,
        signature_type: u8,
        signature: &[u8],
        signature_len: usize,
        message: &[u8],
        message_len: usize,
        public_key: &[u8],
        public_key_len: usize,
    ) -> i32 {
        self.verify_detailed(
            signature_type,
            signature,
            signature_len,
            message,
            message_len,
            public_key,
            public_key_len,
        )
        .status
    }

    /// Same as [`verify`](Self::verify) but also reports the deciding check.
    #[allow(clippy::too_many_arguments)]
    fn verify_detailed(
        &self,
        signature_type: u8,
        signature: &[u8],
        signature_len: usize,
        message: &[u8],
        message_len: usize,
        public_key: &[u8],
        public_key_len: usize,
    ) -> Verdict;

    /// Verify whole buffers with a typed signature type.
    fn verify_typed(
        &self,
        signature_type: SignatureType,
        signature: &[u8],
        message: &[u8],
        public_key: &[u8],
    ) -> VerificationResult {
        VerificationResult::from_verdict(self.verify_detailed(
            signature_type.code(),
            signature,
            signature.len(),
            message,
            message.len(),
            public_key,
            public_key.len(),
        ))
    }

    // =========================================================================
    // Batch Verification
    // =========================================================================

    /// Verify many independent requests. Results keep request order.
    fn batch_verify(&self, requests: &[VerificationRequest]) -> BatchVerificationResult;
}
