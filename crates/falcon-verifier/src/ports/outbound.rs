//! # Outbound Ports (Driven Ports / SPI)
//!
//! The lattice primitive the dispatcher delegates to once a call has passed
//! format validation.

use crate::domain::entities::DecodedSignature;
use crate::domain::errors::FalconError;
use crate::domain::header::PayloadEncoding;
use crate::domain::params::{LogN, NONCE_LEN};

/// Decoding and acceptance test over `Z_q[x] / (x^n + 1)`.
///
/// Implementations must be thread-safe (`Send + Sync`) because batch
/// verification fans out over a rayon pool.
pub trait LatticePrimitive: Send + Sync {
    /// Decode the public-key body (header byte already stripped) into `h`.
    ///
    /// # Errors
    /// * `FalconError::Format` - wrong length, a coefficient `>= q`, or
    ///   nonzero padding bits
    fn decode_public_key(&self, body: &[u8], logn: LogN) -> Result<Vec<u16>, FalconError>;

    /// Decode the signature payload into `s2`.
    ///
    /// The returned `consumed` count lets the caller inspect trailing bytes.
    fn decompress_s(
        &self,
        encoding: PayloadEncoding,
        payload: &[u8],
        logn: LogN,
    ) -> Result<DecodedSignature, FalconError>;

    /// Run the norm test.
    ///
    /// `Ok(false)` means a well-formed signature that does not verify.
    /// Any `Err` is passed through to the caller unchanged.
    fn crypto_verify(
        &self,
        logn: LogN,
        nonce: &[u8; NONCE_LEN],
        s2: &[i16],
        message: &[u8],
        h: &[u16],
    ) -> Result<bool, FalconError>;

    /// Short label used in logs.
    fn name(&self) -> &'static str {
        "lattice"
    }
}

impl<P: LatticePrimitive + ?Sized> LatticePrimitive for &P {
    fn decode_public_key(&self, body: &[u8], logn: LogN) -> Result<Vec<u16>, FalconError> {
        (**self).decode_public_key(body, logn)
    }

    fn decompress_s(
        &self,
        encoding: PayloadEncoding,
        payload: &[u8],
        logn: LogN,
    ) -> Result<DecodedSignature, FalconError> {
        (**self).decompress_s(encoding, payload, logn)
    }

    fn crypto_verify(
        &self,
        logn: LogN,
        nonce: &[u8; NONCE_LEN],
        s2: &[i16],
        message: &[u8],
        h: &[u16],
    ) -> Result<bool, FalconError> {
        (**self).crypto_verify(logn, nonce, s2, message, h)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
