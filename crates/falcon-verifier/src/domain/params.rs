//! # Falcon Parameter Tables
//!
//! Static per-degree constants, indexed by `logn`.
//!
//! All lookups go through [`LogN`], which can only be constructed for
//! `1..=10`. Raw header nibbles never index a table directly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Falcon modulus.
pub const Q: u32 = 12289;

/// Length of the signature nonce `r`.
pub const NONCE_LEN: usize = 40;

/// Header byte plus nonce.
pub const SIGNATURE_PREFIX_LEN: usize = 1 + NONCE_LEN;

/// Header, nonce and at least one payload byte.
pub const MIN_SIGNATURE_LEN: usize = SIGNATURE_PREFIX_LEN + 1;

// =============================================================================
// LENGTH TABLES (index 0 is never reachable through LogN)
// =============================================================================

const PUBKEY_SIZE: [usize; 11] = [5, 5, 8, 15, 29, 57, 113, 225, 449, 897, 1793];

const SIG_COMPRESSED_MAXSIZE: [usize; 11] = [43, 44, 47, 52, 64, 86, 130, 219, 397, 752, 1462];

const SIG_PADDED_SIZE: [usize; 11] = [44, 44, 47, 52, 63, 82, 122, 200, 356, 666, 1280];

const SIG_CT_SIZE: [usize; 11] = [41, 44, 47, 52, 65, 89, 137, 233, 425, 809, 1577];

/// Acceptance bound on the squared norm of `(s1, s2)`.
const L2_BOUND: [u64; 11] = [
    0, 101_498, 208_714, 428_865, 892_039, 1_852_696, 3_842_630, 7_959_734, 16_468_416,
    34_034_726, 70_265_242,
];

/// Bits per coefficient in the constant-time encoding.
const CT_COEFFICIENT_BITS: [u32; 11] = [0, 10, 11, 11, 12, 12, 12, 12, 12, 12, 12];

/// `logn` outside the supported `1..=10` range.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("logn {0} is outside the supported range 1..=10")]
pub struct InvalidLogN(pub u8);

/// Base-2 logarithm of the ring degree, guaranteed to lie in `1..=10`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LogN(u8);

impl LogN {
    /// Smallest supported value.
    pub const MIN: u8 = 1;
    /// Largest supported value.
    pub const MAX: u8 = 10;
    /// Falcon-512.
    pub const FALCON_512: LogN = LogN(9);
    /// Falcon-1024.
    pub const FALCON_1024: LogN = LogN(10);

    /// Range-checked constructor.
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Ring degree `n = 2^logn`.
    pub const fn degree(self) -> usize {
        1usize << self.0
    }

    const fn index(self) -> usize {
        self.0 as usize
    }

    /// Exact encoded public-key length, header included.
    pub const fn pubkey_size(self) -> usize {
        PUBKEY_SIZE[self.index()]
    }

    /// Upper bound on an unpadded compressed signature.
    pub const fn sig_compressed_maxsize(self) -> usize {
        SIG_COMPRESSED_MAXSIZE[self.index()]
    }

    /// Exact length of a padded signature.
    pub const fn sig_padded_size(self) -> usize {
        SIG_PADDED_SIZE[self.index()]
    }

    /// Exact length of a constant-time signature.
    pub const fn sig_ct_size(self) -> usize {
        SIG_CT_SIZE[self.index()]
    }

    pub const fn l2_bound(self) -> u64 {
        L2_BOUND[self.index()]
    }

    pub const fn ct_coefficient_bits(self) -> u32 {
        CT_COEFFICIENT_BITS[self.index()]
    }
}

impl TryFrom<u8> for LogN {
    type Error = InvalidLogN;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        LogN::new(value).ok_or(InvalidLogN(value))
    }
}

impl From<LogN> for u8 {
    fn from(logn: LogN) -> Self {
        logn.0
    }
}

impl std::fmt::Display for LogN {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// TESTS
// =============================================================================
