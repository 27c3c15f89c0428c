//! # ABI Codec
//!
//! Solidity ABI encoding of the verifier call
//!
//! ```text
//! verify(uint8 signatureType, bytes signature, uint256 signatureLen,
//!        bytes message, uint256 messageLen, bytes pubKey, uint256 pubKeyLen)
//! ```
//!
//! and of its `int256` return value. The precompile consumes the arguments
//! without a selector; contract calldata carries the 4-byte selector.

use primitive_types::U256;
use sha3::{Digest, Keccak256};
use thiserror::Error;

/// Canonical signature of the verifier entry point.
pub const VERIFY_SIGNATURE: &str = "verify(uint8,bytes,uint256,bytes,uint256,bytes,uint256)";

const WORD: usize = 32;
const HEAD_WORDS: usize = 7;

/// ABI decoding errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AbiError {
    #[error("input too short: expected at least {expected} bytes, got {actual}")]
    InputTooShort { expected: usize, actual: usize },

    #[error("{field} offset points outside the input")]
    OffsetOutOfBounds { field: &'static str },

    #[error("{field} data is truncated")]
    TruncatedBytes { field: &'static str },

    #[error("{field} does not fit its declared type")]
    ValueOutOfRange { field: &'static str },

    #[error("unknown selector 0x{0}")]
    UnknownSelector(String),
}

/// Decoded `verify` arguments.
///
/// The `*_len` words are kept as sent; they are compared with the buffer
/// lengths by the verifier, not by the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCall {
    pub signature_type: u8,
    pub signature: Vec<u8>,
    pub signature_len: U256,
    pub message: Vec<u8>,
    pub message_len: U256,
    pub public_key: Vec<u8>,
    pub public_key_len: U256,
}

impl VerifyCall {
    /// Call whose declared lengths equal the buffer lengths.
    pub fn new(
        signature_type: u8,
        signature: impl Into<Vec<u8>>,
        message: impl Into<Vec<u8>>,
        public_key: impl Into<Vec<u8>>,
    ) -> Self {
        let signature = signature.into();
        let message = message.into();
        let public_key = public_key.into();
        Self {
            signature_type,
            signature_len: U256::from(signature.len()),
            message_len: U256::from(message.len()),
            public_key_len: U256::from(public_key.len()),
            signature,
            message,
            public_key,
        }
    }
}

/// Declared length as `usize`, saturating.
///
/// A saturated length always exceeds its buffer and is rejected as `SIZE`.
pub fn declared_len(value: U256) -> usize {
    if value > U256::from(usize::MAX) {
        usize::MAX
    } else {
        value.as_usize()
    }
}

/// First four bytes of `keccak256(VERIFY_SIGNATURE)`.
pub fn verify_selector() -> [u8; 4] {
    let digest = Keccak256::digest(VERIFY_SIGNATURE.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

// =============================================================================
// ENCODING
// =============================================================================

fn push_word(out: &mut Vec<u8>, value: U256) {
    let mut word = [0u8; WORD];
    value.to_big_endian(&mut word);
    out.extend_from_slice(&word);
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD) * WORD
}

/// Encode the arguments without a selector.
pub fn encode_verify_args(call: &VerifyCall) -> Vec<u8> {
    let head = HEAD_WORDS * WORD;
    let sig_offset = head;
    let msg_offset = sig_offset + WORD + padded_len(call.signature.len());
    let pk_offset = msg_offset + WORD + padded_len(call.message.len());

    let mut out = Vec::with_capacity(pk_offset + WORD + padded_len(call.public_key.len()));
    push_word(&mut out, U256::from(call.signature_type));
    push_word(&mut out, U256::from(sig_offset));
    push_word(&mut out, call.signature_len);
    push_word(&mut out, U256::from(msg_offset));
    push_word(&mut out, call.message_len);
    push_word(&mut out, U256::from(pk_offset));
    push_word(&mut out, call.public_key_len);

    for bytes in [&call.signature, &call.message, &call.public_key] {
        push_word(&mut out, U256::from(bytes.len()));
        out.extend_from_slice(bytes);
        out.resize(out.len() + padded_len(bytes.len()) - bytes.len(), 0);
    }
    out
}

/// Encode contract calldata: selector followed by the arguments.
pub fn encode_verify_call(call: &VerifyCall) -> Vec<u8> {
    let mut out = verify_selector().to_vec();
    out.extend(encode_verify_args(call));
    out
}

/// Encode a status as a 32-byte two's-complement `int256`.
pub fn encode_int256(value: i32) -> [u8; WORD] {
    let fill = if value < 0 { 0xFF } else { 0x00 };
    let mut word = [fill; WORD];
    word[WORD - 4..].copy_from_slice(&value.to_be_bytes());
    word
}

// =============================================================================
// DECODING
// =============================================================================

fn read_word(data: &[u8], offset: usize) -> Option<U256> {
    let end = offset.checked_add(WORD)?;
    data.get(offset..end).map(U256::from_big_endian)
}

fn read_bytes(data: &[u8], head_index: usize, field: &'static str) -> Result<Vec<u8>, AbiError> {
    let offset = read_word(data, head_index * WORD).ok_or(AbiError::InputTooShort {
        expected: HEAD_WORDS * WORD,
        actual: data.len(),
    })?;
    if offset > U256::from(data.len()) {
        return Err(AbiError::OffsetOutOfBounds { field });
    }
    let offset = offset.as_usize();
    let len = read_word(data, offset).ok_or(AbiError::OffsetOutOfBounds { field })?;
    if len > U256::from(data.len()) {
        return Err(AbiError::TruncatedBytes { field });
    }
    let start = offset + WORD;
    data.get(start..start + len.as_usize())
        .map(<[u8]>::to_vec)
        .ok_or(AbiError::TruncatedBytes { field })
}

/// Decode selector-less arguments.
pub fn decode_verify_args(data: &[u8]) -> Result<VerifyCall, AbiError> {
    let head = HEAD_WORDS * WORD;
    if data.len() < head {
        return Err(AbiError::InputTooShort {
            expected: head,
            actual: data.len(),
        });
    }
    let word = |index: usize| U256::from_big_endian(&data[index * WORD..(index + 1) * WORD]);

    let raw_type = word(0);
    if raw_type > U256::from(u8::MAX) {
        return Err(AbiError::ValueOutOfRange {
            field: "signatureType",
        });
    }

    Ok(VerifyCall {
        signature_type: raw_type.low_u32() as u8,
        signature: read_bytes(data, 1, "signature")?,
        signature_len: word(2),
        message: read_bytes(data, 3, "message")?,
        message_len: word(4),
        public_key: read_bytes(data, 5, "pubKey")?,
        public_key_len: word(6),
    })
}

/// Decode contract calldata, checking the selector.
pub fn decode_verify_call(data: &[u8]) -> Result<VerifyCall, AbiError> {
    let Some((selector, args)) = data.split_first_chunk::<4>() else {
        return Err(AbiError::InputTooShort {
            expected: 4,
            actual: data.len(),
        });
    };
    if *selector != verify_selector() {
        return Err(AbiError::UnknownSelector(hex::encode(selector)));
    }
    decode_verify_args(args)
}

/// Decode an `int256` return word that must fit in `i32`.
pub fn decode_int256(data: &[u8]) -> Result<i32, AbiError> {
    let word: &[u8; WORD] = data
        .get(..WORD)
        .and_then(|w| w.try_into().ok())
        .ok_or(AbiError::InputTooShort {
            expected: WORD,
            actual: data.len(),
        })?;
    let value = i32::from_be_bytes([word[28], word[29], word[30], word[31]]);
    if encode_int256(value) != *word {
        return Err(AbiError::ValueOutOfRange { field: "int256" });
    }
    Ok(value)
}
