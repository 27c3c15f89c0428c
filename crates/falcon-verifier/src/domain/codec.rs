//! # Coefficient Codecs
//!
//! Bit-level encodings of Falcon polynomials:
//!
//! - public key `h`: 14 bits per coefficient, each `< q`
//! - compressed `s2`: sign bit, 7 low bits, unary high part
//! - constant-time `s2`: fixed-width two's complement
//!
//! All packings are big-endian at the bit level. Decoders reject any
//! non-canonical input (out-of-range values, `-0`, non-zero pad bits) with
//! [`FalconError::Format`].

use super::entities::DecodedSignature;
use super::errors::FalconError;
use super::header::{public_key_header_byte, PayloadEncoding};
use super::params::{LogN, Q};

const PUBKEY_COEFFICIENT_BITS: u32 = 14;
const MAX_COMPRESSED_MAGNITUDE: u32 = 2047;

// =============================================================================
// PUBLIC KEY
// =============================================================================

/// Decode public-key coefficients from the bytes following the header.
pub fn decode_public_key(body: &[u8], logn: LogN) -> Result<Vec<u16>, FalconError> {
    let n = logn.degree();
    let expected = (n * PUBKEY_COEFFICIENT_BITS as usize + 7) / 8;
    if body.len() != expected {
        return Err(FalconError::Format);
    }

    let mut h = Vec::with_capacity(n);
    let mut acc: u32 = 0;
    let mut acc_len: u32 = 0;
    for &byte in body {
        acc = (acc << 8) | u32::from(byte);
        acc_len += 8;
        if acc_len >= PUBKEY_COEFFICIENT_BITS && h.len() < n {
            acc_len -= PUBKEY_COEFFICIENT_BITS;
            let w = (acc >> acc_len) & 0x3FFF;
            if w >= Q {
                return Err(FalconError::Format);
            }
            h.push(w as u16);
        }
    }
    if h.len() != n || acc & ((1 << acc_len) - 1) != 0 {
        return Err(FalconError::Format);
    }
    Ok(h)
}

/// Encode public-key coefficients, header byte included.
pub fn encode_public_key(h: &[u16], logn: LogN) -> Result<Vec<u8>, FalconError> {
    if h.len() != logn.degree() {
        return Err(FalconError::BadArgument);
    }
    let mut out = Vec::with_capacity(logn.pubkey_size());
    out.push(public_key_header_byte(logn));

    let mut acc: u32 = 0;
    let mut acc_len: u32 = 0;
    for &x in h {
        if u32::from(x) >= Q {
            return Err(FalconError::BadArgument);
        }
        acc = (acc << PUBKEY_COEFFICIENT_BITS) | u32::from(x);
        acc_len += PUBKEY_COEFFICIENT_BITS;
        while acc_len >= 8 {
            acc_len -= 8;
            out.push((acc >> acc_len) as u8);
        }
    }
    if acc_len > 0 {
        out.push((acc << (8 - acc_len)) as u8);
    }
    Ok(out)
}

// =============================================================================
// SIGNATURE PAYLOAD
// =============================================================================

/// Decode a payload with the given encoding.
pub fn decode_payload(
    encoding: PayloadEncoding,
    payload: &[u8],
    logn: LogN,
) -> Result<DecodedSignature, FalconError> {
    match encoding {
        PayloadEncoding::Compressed => decompress(payload, logn),
        PayloadEncoding::ConstantTime => decode_constant_time(payload, logn),
    }
}

/// Decode a compressed `s2`.
///
/// Trailing bytes after the last coefficient are not consumed; the caller
/// decides whether they are acceptable padding.
pub fn decompress(payload: &[u8], logn: LogN) -> Result<DecodedSignature, FalconError> {
    let n = logn.degree();
    let mut coefficients = Vec::with_capacity(n);
    let mut bytes = payload.iter();
    let mut acc: u32 = 0;
    let mut acc_len: u32 = 0;

    for _ in 0..n {
        let &byte = bytes.next().ok_or(FalconError::Format)?;
        acc = (acc << 8) | u32::from(byte);
        let b = acc >> acc_len;
        let negative = b & 0x80 != 0;
        let mut m = b & 0x7F;

        loop {
            if acc_len == 0 {
                let &byte = bytes.next().ok_or(FalconError::Format)?;
                acc = (acc << 8) | u32::from(byte);
                acc_len = 8;
            }
            acc_len -= 1;
            if (acc >> acc_len) & 1 != 0 {
                break;
            }
            m += 128;
            if m > MAX_COMPRESSED_MAGNITUDE {
                return Err(FalconError::Format);
            }
        }

        // -0 has a unique encoding as +0
        if negative && m == 0 {
            return Err(FalconError::Format);
        }
        let value = m as i16;
        coefficients.push(if negative { -value } else { value });
    }

    if acc & ((1 << acc_len) - 1) != 0 {
        return Err(FalconError::Format);
    }

    Ok(DecodedSignature {
        coefficients,
        consumed: payload.len() - bytes.len(),
    })
}

/// Compress `s2`. Coefficients must lie in `[-2047, 2047]`.
pub fn compress(s: &[i16], logn: LogN) -> Result<Vec<u8>, FalconError> {
    if s.len() != logn.degree() {
        return Err(FalconError::BadArgument);
    }
    let mut out = Vec::new();
    let mut acc: u32 = 0;
    let mut acc_len: u32 = 0;

    for &x in s {
        let magnitude = u32::from(x.unsigned_abs());
        if magnitude > MAX_COMPRESSED_MAGNITUDE {
            return Err(FalconError::BadArgument);
        }
        acc = (acc << 1) | u32::from(x < 0);
        acc = (acc << 7) | (magnitude & 0x7F);
        acc_len += 8;

        let high = magnitude >> 7;
        acc = (acc << (high + 1)) | 1;
        acc_len += high + 1;

        while acc_len >= 8 {
            acc_len -= 8;
            out.push((acc >> acc_len) as u8);
        }
    }
    if acc_len > 0 {
        out.push((acc << (8 - acc_len)) as u8);
    }
    Ok(out)
}

/// Decode a constant-time `s2`; the payload length must be exact.
pub fn decode_constant_time(payload: &[u8], logn: LogN) -> Result<DecodedSignature, FalconError> {
    let n = logn.degree();
    let bits = logn.ct_coefficient_bits();
    let expected = (n * bits as usize + 7) / 8;
    if payload.len() != expected {
        return Err(FalconError::Format);
    }

    let mask = (1u32 << bits) - 1;
    let sign = 1u32 << (bits - 1);
    let forbidden = -(sign as i32);

    let mut coefficients = Vec::with_capacity(n);
    let mut acc: u32 = 0;
    let mut acc_len: u32 = 0;
    for &byte in payload {
        acc = (acc << 8) | u32::from(byte);
        acc_len += 8;
        while acc_len >= bits && coefficients.len() < n {
            acc_len -= bits;
            let raw = (acc >> acc_len) & mask;
            let value = if raw & sign != 0 {
                raw as i32 - (1i32 << bits)
            } else {
                raw as i32
            };
            if value == forbidden {
                return Err(FalconError::Format);
            }
            coefficients.push(value as i16);
        }
    }
    if coefficients.len() != n || acc & ((1 << acc_len) - 1) != 0 {
        return Err(FalconError::Format);
    }

    Ok(DecodedSignature {
        coefficients,
        consumed: expected,
    })
}

/// Encode `s2` in the constant-time layout.
pub fn encode_constant_time(s: &[i16], logn: LogN) -> Result<Vec<u8>, FalconError> {
    if s.len() != logn.degree() {
        return Err(FalconError::BadArgument);
    }
    let bits = logn.ct_coefficient_bits();
    let limit = (1i32 << (bits - 1)) - 1;
    let mask = (1u32 << bits) - 1;

    let mut out = Vec::with_capacity(logn.sig_ct_size());
    let mut acc: u32 = 0;
    let mut acc_len: u32 = 0;
    for &x in s {
        let x = i32::from(x);
        if x < -limit || x > limit {
            return Err(FalconError::BadArgument);
        }
        acc = (acc << bits) | (x as u32 & mask);
        acc_len += bits;
        while acc_len >= 8 {
            acc_len -= 8;
            out.push((acc >> acc_len) as u8);
        }
    }
    if acc_len > 0 {
        out.push((acc << (8 - acc_len)) as u8);
    }
    Ok(out)
}

// =============================================================================
// TESTS
// =============================================================================
