//! # Known-Answer Test Records
//!
//! Parser for NIST `.rsp` response files and the conversion from the NIST
//! signed-message layout to the signature layout the verifier accepts.
//!
//! ```text
//! sm        = [sig_len: u16 BE][nonce: 40][message: mlen][0x2n][s]
//! signature = [0x3n][nonce: 40][s]
//! ```
//!
//! `sig_len` counts the `0x2n` header byte and `s`.

use crate::domain::header::{signature_header_byte, PayloadEncoding};
use crate::domain::params::{LogN, NONCE_LEN};
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use std::collections::BTreeMap;
use std::io::BufRead;
use thiserror::Error;

const SM_LENGTH_PREFIX: usize = 2;
const NIST_HEADER_HIGH: u8 = 0x20;

/// Errors from parsing or repacking KAT records.
#[derive(Debug, Error)]
pub enum KatError {
    #[error("I/O error reading KAT file: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected `key = value`")]
    MalformedLine { line: usize },

    #[error("record ending at line {line}: missing field `{field}`")]
    MissingField { line: usize, field: &'static str },

    #[error("record ending at line {line}: field `{field}` is not valid hex: {source}")]
    InvalidHex {
        line: usize,
        field: &'static str,
        source: hex::FromHexError,
    },

    #[error("record ending at line {line}: field `{field}` is not a number: {value:?}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("{field} is {actual} bytes but the record declares {declared}")]
    LengthMismatch {
        field: &'static str,
        declared: usize,
        actual: usize,
    },

    #[error("sm is too short to hold a signature for a {mlen}-byte message")]
    SignedMessageTooShort { mlen: usize },

    #[error("message embedded in sm differs from msg")]
    MessageMismatch,

    #[error("unexpected signed-message header byte 0x{0:02x}")]
    BadHeader(u8),
}

/// One record of a `.rsp` file.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KatRecord {
    pub count: usize,
    #[serde_as(as = "Hex")]
    pub seed: Vec<u8>,
    pub mlen: usize,
    #[serde_as(as = "Hex")]
    pub msg: Vec<u8>,
    #[serde_as(as = "Hex")]
    pub pk: Vec<u8>,
    #[serde_as(as = "Hex")]
    pub sk: Vec<u8>,
    pub smlen: usize,
    #[serde_as(as = "Hex")]
    pub sm: Vec<u8>,
    /// Keys this parser does not interpret.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl KatRecord {
    /// Split `sm` and rebuild the signature in verifier layout.
    pub fn repack_signature(&self) -> Result<Vec<u8>, KatError> {
        check_len("sm", self.smlen, self.sm.len())?;
        check_len("msg", self.mlen, self.msg.len())?;

        let body_start = SM_LENGTH_PREFIX + NONCE_LEN + self.mlen;
        let (prefix, rest) = self
            .sm
            .split_first_chunk::<SM_LENGTH_PREFIX>()
            .ok_or(KatError::SignedMessageTooShort { mlen: self.mlen })?;
        if self.sm.len() <= body_start {
            return Err(KatError::SignedMessageTooShort { mlen: self.mlen });
        }
        let sig_len = usize::from(u16::from_be_bytes(*prefix));
        check_len("signature", sig_len, self.sm.len() - body_start)?;

        let (nonce, rest) = rest.split_at(NONCE_LEN);
        let (embedded, signature) = rest.split_at(self.mlen);
        if embedded != self.msg.as_slice() {
            return Err(KatError::MessageMismatch);
        }

        let (&header, s) = signature
            .split_first()
            .ok_or(KatError::SignedMessageTooShort { mlen: self.mlen })?;
        let logn = nist_header_logn(header).ok_or(KatError::BadHeader(header))?;

        let mut out = Vec::with_capacity(1 + NONCE_LEN + s.len());
        out.push(signature_header_byte(PayloadEncoding::Compressed, logn));
        out.extend_from_slice(nonce);
        out.extend_from_slice(s);
        Ok(out)
    }
}

fn check_len(field: &'static str, declared: usize, actual: usize) -> Result<(), KatError> {
    if declared != actual {
        return Err(KatError::LengthMismatch {
            field,
            declared,
            actual,
        });
    }
    Ok(())
}

fn nist_header_logn(header: u8) -> Option<LogN> {
    if header & 0xF0 != NIST_HEADER_HIGH {
        return None;
    }
    LogN::new(header & 0x0F)
}

// =============================================================================
// PARSER
// =============================================================================

/// Parse every record of a `.rsp` stream.
///
/// `#` lines are comments, a blank line ends a record and the last record
/// may end at end of input.
pub fn parse_kats(reader: impl BufRead) -> Result<Vec<KatRecord>, KatError> {
    let mut records = Vec::new();
    let mut fields: BTreeMap<String, String> = BTreeMap::new();
    let mut line_no = 0;

    for line in reader.lines() {
        line_no += 1;
        let line = line?;
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }
        if line.is_empty() {
            if !fields.is_empty() {
                records.push(build_record(std::mem::take(&mut fields), line_no)?);
            }
            continue;
        }
        let (key, value) = line
            .split_once('=')
            .ok_or(KatError::MalformedLine { line: line_no })?;
        fields.insert(key.trim().to_string(), value.trim().to_string());
    }
    if !fields.is_empty() {
        records.push(build_record(fields, line_no)?);
    }
    Ok(records)
}

fn build_record(mut fields: BTreeMap<String, String>, line: usize) -> Result<KatRecord, KatError> {
    let mut take = |field: &'static str| {
        fields
            .remove(field)
            .ok_or(KatError::MissingField { line, field })
    };
    let number = |field: &'static str, value: String| -> Result<usize, KatError> {
        value
            .trim()
            .parse()
            .map_err(|_| KatError::InvalidNumber { line, field, value })
    };
    let bytes = |field: &'static str, value: String| {
        hex::decode(&value).map_err(|source| KatError::InvalidHex {
            line,
            field,
            source,
        })
    };

    let count = number("count", take("count")?)?;
    let mlen = number("mlen", take("mlen")?)?;
    let smlen = number("smlen", take("smlen")?)?;
    let msg = bytes("msg", take("msg")?)?;
    let pk = bytes("pk", take("pk")?)?;
    let sm = bytes("sm", take("sm")?)?;
    // seed and sk are informational and often omitted from trimmed files
    let seed = bytes("seed", take("seed").unwrap_or_default())?;
    let sk = bytes("sk", take("sk").unwrap_or_default())?;

    Ok(KatRecord {
        count,
        seed,
        mlen,
        msg,
        pk,
        sk,
        smlen,
        sm,
        extra: fields,
    })
}
