//! # Header Parsing
//!
//! Signature header layout, most significant bit first:
//!
//! ```text
//! 0 c c 1 n n n n
//! ```
//!
//! Bit 7 is zero, bit 4 is the fixed one, `cc` selects the payload encoding
//! and `nnnn` is `logn`. Public keys use `0 0 0 0 n n n n`.

use super::errors::{FalconError, RejectReason, Rejection};
use super::params::LogN;
use serde::{Deserialize, Serialize};

const SIG_RESERVED_MASK: u8 = 0x80;
const SIG_FIXED_BIT: u8 = 0x10;
const ENCODING_SHIFT: u8 = 5;
const ENCODING_MASK: u8 = 0x03;
const LOGN_MASK: u8 = 0x0F;

/// Payload encoding selected by the header `cc` bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayloadEncoding {
    /// `cc = 01`: Golomb-Rice style compression, optionally zero padded.
    Compressed,
    /// `cc = 10`: fixed-width two's complement coefficients.
    ConstantTime,
}

impl PayloadEncoding {
    /// Total mapping over the 2-bit `cc` field. `00` and `11` are undefined.
    pub const fn from_bits(cc: u8) -> Option<Self> {
        match cc & ENCODING_MASK {
            0b01 => Some(PayloadEncoding::Compressed),
            0b10 => Some(PayloadEncoding::ConstantTime),
            _ => None,
        }
    }

    pub const fn bits(self) -> u8 {
        match self {
            PayloadEncoding::Compressed => 0b01,
            PayloadEncoding::ConstantTime => 0b10,
        }
    }
}

/// Parsed signature header byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignatureHeader {
    pub logn: LogN,
    /// Raw `cc` bits; interpreted by the validator.
    pub encoding_bits: u8,
}

impl SignatureHeader {
    /// Parse the first signature byte.
    ///
    /// Only the static bit pattern and the `logn` range are checked here.
    pub fn parse(byte: u8) -> Result<Self, Rejection> {
        let reject = Rejection::new(FalconError::Format, RejectReason::SignatureHeader);
        if byte & SIG_RESERVED_MASK != 0 || byte & SIG_FIXED_BIT == 0 {
            return Err(reject);
        }
        let logn = LogN::new(byte & LOGN_MASK).ok_or(reject)?;
        Ok(Self {
            logn,
            encoding_bits: (byte >> ENCODING_SHIFT) & ENCODING_MASK,
        })
    }

    pub const fn encoding(&self) -> Option<PayloadEncoding> {
        PayloadEncoding::from_bits(self.encoding_bits)
    }
}

/// Build a signature header byte.
pub const fn signature_header_byte(encoding: PayloadEncoding, logn: LogN) -> u8 {
    (encoding.bits() << ENCODING_SHIFT) | SIG_FIXED_BIT | logn.get()
}

/// Parse a public-key header byte (`0000nnnn`).
pub fn parse_public_key_header(byte: u8) -> Result<LogN, Rejection> {
    let reject = Rejection::new(FalconError::Format, RejectReason::PublicKeyHeader);
    if byte & !LOGN_MASK != 0 {
        return Err(reject);
    }
    LogN::new(byte).ok_or(reject)
}

/// Build a public-key header byte.
pub const fn public_key_header_byte(logn: LogN) -> u8 {
    logn.get()
}
