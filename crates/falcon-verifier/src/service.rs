//! # Falcon Verification Service
//!
//! Application service layer that implements the `FalconVerificationApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`FalconVerificationApi`)
//! - Runs the format validator from the domain layer
//! - Delegates decoding and the norm test to the outbound port
//!   (`LatticePrimitive`) only after validation succeeds

use crate::config::BatchConfig;
use crate::domain::entities::{
    BatchVerificationResult, ValidatedCall, VerificationRequest, VerificationResult,
};
use crate::domain::errors::{FalconError, RejectReason, Rejection, Verdict};
use crate::domain::validator;
use crate::ports::inbound::FalconVerificationApi;
use crate::ports::outbound::LatticePrimitive;
use rayon::prelude::*;
use tracing::{debug, trace};

/// Falcon Verification Service.
///
/// Generic over the lattice primitive so tests can inject mocks and the two
/// production multipliers can run behind the same dispatcher.
#[derive(Debug, Clone, Default)]
pub struct FalconVerificationService<P: LatticePrimitive> {
    primitive: P,
    batch: BatchConfig,
}

impl<P: LatticePrimitive> FalconVerificationService<P> {
    /// Create a service with the default batch settings.
    pub fn new(primitive: P) -> Self {
        Self::with_config(primitive, BatchConfig::default())
    }

    pub fn with_config(primitive: P, batch: BatchConfig) -> Self {
        Self { primitive, batch }
    }

    pub fn primitive(&self) -> &P {
        &self.primitive
    }

    /// Decode a validated call and run the norm test.
    fn dispatch(&self, call: &ValidatedCall<'_>) -> Result<(), Rejection> {
        let h = self
            .primitive
            .decode_public_key(call.public_key, call.logn)
            .map_err(|_| Rejection::new(FalconError::Format, RejectReason::PublicKeyDecode))?;

        let decoded = self
            .primitive
            .decompress_s(call.layout.encoding(), call.payload, call.logn)
            .map_err(|_| Rejection::new(FalconError::Format, RejectReason::PayloadDecode))?;

        let trailing = call.payload.get(decoded.consumed..).unwrap_or_default();
        if !trailing.is_empty() && !(call.layout.allows_padding() && is_zero(trailing)) {
            return Err(Rejection::new(
                FalconError::Format,
                RejectReason::NonCanonicalPadding,
            ));
        }

        match self.primitive.crypto_verify(
            call.logn,
            call.nonce,
            &decoded.coefficients,
            call.message,
            &h,
        ) {
            Ok(true) => Ok(()),
            Ok(false) => Err(Rejection::new(
                FalconError::BadSignature,
                RejectReason::CryptoRejected,
            )),
            Err(e) => Err(Rejection::new(e, RejectReason::PrimitiveFault)),
        }
    }

    fn verify_request(&self, request: &VerificationRequest) -> VerificationResult {
        VerificationResult::from_verdict(self.verify_detailed(
            request.signature_type,
            &request.signature,
            request.signature.len(),
            &request.message,
            request.message.len(),
            &request.public_key,
            request.public_key.len(),
        ))
    }
}

impl<P: LatticePrimitive> FalconVerificationApi for FalconVerificationService<P> {
    fn verify_detailed(
        &self,
        signature_type: u8,
        signature: &[u8],
        signature_len: usize,
        message: &[u8],
        message_len: usize,
        public_key: &[u8],
        public_key_len: usize,
    ) -> Verdict {
        let outcome = validator::validate_declared(
            signature_type,
            signature,
            signature_len,
            message,
            message_len,
            public_key,
            public_key_len,
        )
        .and_then(|call| {
            self.dispatch(&call)?;
            Ok(call)
        });

        match outcome {
            Ok(call) => {
                trace!(
                    primitive = self.primitive.name(),
                    logn = call.logn.get(),
                    layout = ?call.layout,
                    "Falcon signature accepted"
                );
                Verdict::accepted()
            }
            Err(rejection) => {
                debug!(
                    primitive = self.primitive.name(),
                    signature_type,
                    status = rejection.error.code(),
                    reason = %rejection.reason,
                    "Falcon signature rejected"
                );
                Verdict::rejected(rejection)
            }
        }
    }

    /// Verify a batch, in parallel once it reaches the configured threshold.
    fn batch_verify(&self, requests: &[VerificationRequest]) -> BatchVerificationResult {
        let results: Vec<VerificationResult> = if requests.len() >= self.batch.parallel_threshold
        {
            requests
                .par_iter()
                .map(|req| self.verify_request(req))
                .collect()
        } else {
            requests.iter().map(|req| self.verify_request(req)).collect()
        };

        BatchVerificationResult::from_results(results)
    }
}

fn is_zero(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| b == 0)
}

// =============================================================================
// TESTS
// =============================================================================
