//! # Format Validator
//!
//! Every structural check that runs before any cryptographic work.
//!
//! The order of checks is part of the external contract: callers assert
//! specific codes for specific malformations, so the first failing check
//! decides the result.
//!
//! 1. public key non-empty (`SIZE`)
//! 2. public key header (`FORMAT`)
//! 3. signature at least 42 bytes (`SIZE`)
//! 4. signature header (`FORMAT`)
//! 5. signature and key degrees agree (`BADARG`)
//! 6. signature type in range (`BADARG`), `cc` bits defined and consistent
//!    with the type (`FORMAT`)
//! 7. signature and key lengths match the tables (`SIZE`)
//! 8. message non-empty (`SIZE`)

use super::entities::{SignatureLayout, SignatureType, ValidatedCall};
use super::errors::{FalconError, RejectReason, Rejection};
use super::header::{parse_public_key_header, PayloadEncoding, SignatureHeader};
use super::params::{LogN, MIN_SIGNATURE_LEN, NONCE_LEN, SIGNATURE_PREFIX_LEN};

/// Validate a call whose declared lengths may be shorter than the buffers.
///
/// A declared length larger than its buffer is a `SIZE` error; otherwise only
/// the declared prefix of each buffer is looked at.
#[allow(clippy::too_many_arguments)]
pub fn validate_declared<'a>(
    signature_type: u8,
    signature: &'a [u8],
    signature_len: usize,
    message: &'a [u8],
    message_len: usize,
    public_key: &'a [u8],
    public_key_len: usize,
) -> Result<ValidatedCall<'a>, Rejection> {
    let signature = declared_prefix(signature, signature_len)?;
    let message = declared_prefix(message, message_len)?;
    let public_key = declared_prefix(public_key, public_key_len)?;
    validate(signature_type, signature, message, public_key)
}

/// Validate a call where each buffer length is its declared length.
pub fn validate<'a>(
    signature_type: u8,
    signature: &'a [u8],
    message: &'a [u8],
    public_key: &'a [u8],
) -> Result<ValidatedCall<'a>, Rejection> {
    // 1-2. Public key header
    let Some(&pk_header) = public_key.first() else {
        return Err(Rejection::new(FalconError::Size, RejectReason::PublicKeyEmpty));
    };
    let pk_logn = parse_public_key_header(pk_header)?;

    // 3-4. Signature header
    if signature.len() < MIN_SIGNATURE_LEN {
        return Err(Rejection::new(
            FalconError::Size,
            RejectReason::SignatureTooShort,
        ));
    }
    let header = SignatureHeader::parse(signature[0])?;

    // 5. Degree agreement
    if header.logn != pk_logn {
        return Err(Rejection::new(
            FalconError::BadArgument,
            RejectReason::DegreeMismatch,
        ));
    }
    let logn = header.logn;

    // 6. Type resolution
    let layout = resolve_layout(signature_type, &header, signature.len())?;

    // 7. Length tables
    if !signature_length_matches(layout, logn, signature.len()) {
        return Err(Rejection::new(FalconError::Size, RejectReason::SignatureLength));
    }
    if public_key.len() != logn.pubkey_size() {
        return Err(Rejection::new(
            FalconError::Size,
            RejectReason::PublicKeyLength,
        ));
    }

    // 8. Message
    if message.is_empty() {
        return Err(Rejection::new(FalconError::Size, RejectReason::MessageEmpty));
    }

    let nonce: &[u8; NONCE_LEN] = signature[1..SIGNATURE_PREFIX_LEN]
        .try_into()
        .map_err(|_| Rejection::new(FalconError::Size, RejectReason::SignatureTooShort))?;

    Ok(ValidatedCall {
        logn,
        layout,
        nonce,
        payload: &signature[SIGNATURE_PREFIX_LEN..],
        public_key: &public_key[1..],
        message,
    })
}

/// Resolve the declared type against the header `cc` bits.
///
/// An inferred compressed signature whose length equals the padded size is
/// treated as padded, so trailing zero bytes are accepted for it.
pub fn resolve_layout(
    signature_type: u8,
    header: &SignatureHeader,
    signature_len: usize,
) -> Result<SignatureLayout, Rejection> {
    let declared = SignatureType::from_code(signature_type).ok_or(Rejection::new(
        FalconError::BadArgument,
        RejectReason::SignatureTypeOutOfRange,
    ))?;
    let encoding = header.encoding().ok_or(Rejection::new(
        FalconError::Format,
        RejectReason::UnknownEncoding,
    ))?;

    use PayloadEncoding as E;
    use SignatureType as T;
    let layout = match (declared, encoding) {
        (T::Inferred, E::Compressed) if signature_len == header.logn.sig_padded_size() => {
            SignatureLayout::Padded
        }
        (T::Inferred | T::Compressed, E::Compressed) => SignatureLayout::Compressed,
        (T::Padded, E::Compressed) => SignatureLayout::Padded,
        (T::Inferred | T::ConstantTime, E::ConstantTime) => SignatureLayout::ConstantTime,
        (T::Compressed | T::Padded, E::ConstantTime) | (T::ConstantTime, E::Compressed) => {
            return Err(Rejection::new(
                FalconError::Format,
                RejectReason::EncodingTypeMismatch,
            ))
        }
    };
    Ok(layout)
}

fn signature_length_matches(layout: SignatureLayout, logn: LogN, len: usize) -> bool {
    match layout {
        SignatureLayout::Compressed => len <= logn.sig_compressed_maxsize(),
        SignatureLayout::Padded => len == logn.sig_padded_size(),
        SignatureLayout::ConstantTime => len == logn.sig_ct_size(),
    }
}

fn declared_prefix(buf: &[u8], len: usize) -> Result<&[u8], Rejection> {
    buf.get(..len).ok_or(Rejection::new(
        FalconError::Size,
        RejectReason::DeclaredLengthExceedsBuffer,
    ))
}

// =============================================================================
// TESTS
// =============================================================================
