//! # Lattice Verification
//!
//! Pure arithmetic behind the Falcon acceptance test, over
//! `Z_q[x] / (x^n + 1)` with `q = 12289`:
//!
//! ```text
//! c   = HashToPoint(nonce || message)
//! -s1 = s2 * h - c
//! accept iff ||s1||^2 + ||s2||^2 <= bound[logn]
//! ```
//!
//! Two multipliers are provided. [`SchoolbookLattice`] is the direct O(n^2)
//! negacyclic convolution; [`NttLattice`] uses a twisted number-theoretic
//! transform. Both implement [`LatticePrimitive`] and must agree bit for bit.

use super::codec;
use super::entities::DecodedSignature;
use super::errors::FalconError;
use super::header::PayloadEncoding;
use super::params::{LogN, NONCE_LEN, Q};
use crate::ports::outbound::LatticePrimitive;
use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Shake256,
};

/// Rejection-sampling bound: the largest multiple of `q` below `2^16`.
const HASH_SAMPLE_BOUND: u32 = 5 * Q;

// =============================================================================
// HASH TO POINT
// =============================================================================

/// Hash `nonce || message` to a polynomial with coefficients in `[0, q)`.
///
/// SHAKE256 output is read as 16-bit big-endian words; words at or above
/// `5q` are discarded so the reduction mod `q` stays uniform.
pub fn hash_to_point(nonce: &[u8; NONCE_LEN], message: &[u8], logn: LogN) -> Vec<u16> {
    let n = logn.degree();
    let mut hasher = Shake256::default();
    hasher.update(nonce);
    hasher.update(message);
    let mut reader = hasher.finalize_xof();

    let mut c = Vec::with_capacity(n);
    let mut word = [0u8; 2];
    while c.len() < n {
        reader.read(&mut word);
        let w = u32::from(u16::from_be_bytes(word));
        if w < HASH_SAMPLE_BOUND {
            c.push((w % Q) as u16);
        }
    }
    c
}

// =============================================================================
// POLYNOMIAL ARITHMETIC
// =============================================================================

fn mod_q(x: i32) -> u32 {
    x.rem_euclid(Q as i32) as u32
}

fn mul_mod(a: u32, b: u32) -> u32 {
    (a * b) % Q
}

fn pow_mod(mut base: u32, mut exp: u32) -> u32 {
    let mut result = 1;
    base %= Q;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base);
        }
        base = mul_mod(base, base);
        exp >>= 1;
    }
    result
}

fn inv_mod(a: u32) -> u32 {
    pow_mod(a, Q - 2)
}

/// Negacyclic product by direct convolution.
pub fn negacyclic_mul_schoolbook(a: &[u32], b: &[u32]) -> Vec<u32> {
    let n = a.len();
    let mut c = vec![0u32; n];
    for (i, &ai) in a.iter().enumerate() {
        if ai == 0 {
            continue;
        }
        for (j, &bj) in b.iter().enumerate() {
            let p = mul_mod(ai, bj);
            let k = i + j;
            if k < n {
                c[k] = (c[k] + p) % Q;
            } else {
                // x^n = -1
                c[k - n] = (c[k - n] + Q - p) % Q;
            }
        }
    }
    c
}

/// Primitive `order`-th root of unity mod `q`, `order` a power of two
/// dividing `q - 1`.
///
/// Found by search; `r` has order exactly `order` iff `r^(order/2) = -1`.
pub fn root_of_unity(order: u32) -> u32 {
    let cofactor = (Q - 1) / order;
    (2..Q)
        .map(|g| pow_mod(g, cofactor))
        .find(|&r| pow_mod(r, order / 2) == Q - 1)
        .unwrap_or(1)
}

fn bit_reverse_permute(a: &mut [u32]) {
    let n = a.len();
    let mut j = 0;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        if i < j {
            a.swap(i, j);
        }
    }
}

/// In-place cyclic NTT with primitive `n`-th root `omega`.
fn ntt(a: &mut [u32], omega: u32) {
    let n = a.len();
    bit_reverse_permute(a);
    let mut len = 2;
    while len <= n {
        let step = pow_mod(omega, (n / len) as u32);
        let half = len / 2;
        for start in (0..n).step_by(len) {
            let mut w = 1;
            for k in 0..half {
                let u = a[start + k];
                let v = mul_mod(a[start + k + half], w);
                a[start + k] = (u + v) % Q;
                a[start + k + half] = (u + Q - v) % Q;
                w = mul_mod(w, step);
            }
        }
        len <<= 1;
    }
}

/// Negacyclic product through a psi-twisted NTT.
///
/// With `psi` a primitive `2n`-th root, scaling coefficient `i` by `psi^i`
/// turns the negacyclic product into a cyclic one of length `n`.
pub fn negacyclic_mul_ntt(a: &[u32], b: &[u32]) -> Vec<u32> {
    let n = a.len();
    if n < 2 {
        return negacyclic_mul_schoolbook(a, b);
    }
    let psi = root_of_unity(2 * n as u32);
    let omega = mul_mod(psi, psi);

    let mut twist = Vec::with_capacity(n);
    let mut t = 1;
    for _ in 0..n {
        twist.push(t);
        t = mul_mod(t, psi);
    }

    let mut fa: Vec<u32> = a.iter().zip(&twist).map(|(&x, &w)| mul_mod(x, w)).collect();
    let mut fb: Vec<u32> = b.iter().zip(&twist).map(|(&x, &w)| mul_mod(x, w)).collect();
    ntt(&mut fa, omega);
    ntt(&mut fb, omega);

    let mut fc: Vec<u32> = fa.iter().zip(&fb).map(|(&x, &y)| mul_mod(x, y)).collect();
    ntt(&mut fc, inv_mod(omega));

    let n_inv = inv_mod(n as u32);
    let psi_inv = inv_mod(psi);
    let mut untwist = n_inv;
    for c in fc.iter_mut() {
        *c = mul_mod(*c, untwist);
        untwist = mul_mod(untwist, psi_inv);
    }
    fc
}

// =============================================================================
// ACCEPTANCE TEST
// =============================================================================

/// Squared-norm acceptance test for a decoded signature.
///
/// `multiply` computes the negacyclic product of two polynomials reduced
/// mod `q`.
pub fn verify_with(
    logn: LogN,
    nonce: &[u8; NONCE_LEN],
    s2: &[i16],
    message: &[u8],
    h: &[u16],
    multiply: impl Fn(&[u32], &[u32]) -> Vec<u32>,
) -> Result<bool, FalconError> {
    let n = logn.degree();
    if s2.len() != n || h.len() != n {
        return Err(FalconError::Internal);
    }

    let c = hash_to_point(nonce, message, logn);
    let s2_mod: Vec<u32> = s2.iter().map(|&x| mod_q(i32::from(x))).collect();
    let h_mod: Vec<u32> = h.iter().map(|&x| u32::from(x)).collect();
    let product = multiply(&s2_mod, &h_mod);
    if product.len() != n {
        return Err(FalconError::Internal);
    }

    let half_q = (Q / 2) as i64;
    let mut norm: u64 = 0;
    for ((&t, &ci), &s) in product.iter().zip(&c).zip(s2) {
        // -s1 = s2*h - c, centred into [-q/2, q/2]
        let mut w = i64::from((t + Q - u32::from(ci)) % Q);
        if w > half_q {
            w -= i64::from(Q);
        }
        norm += (w * w) as u64;
        norm += (i64::from(s) * i64::from(s)) as u64;
    }
    Ok(norm <= logn.l2_bound())
}

// =============================================================================
// PRIMITIVES
// =============================================================================

/// Schoolbook-multiplication primitive.
#[derive(Clone, Copy, Debug, Default)]
pub struct SchoolbookLattice;

/// NTT-multiplication primitive.
#[derive(Clone, Copy, Debug, Default)]
pub struct NttLattice;

impl LatticePrimitive for SchoolbookLattice {
    fn decode_public_key(&self, body: &[u8], logn: LogN) -> Result<Vec<u16>, FalconError> {
        codec::decode_public_key(body, logn)
    }

    fn decompress_s(
        &self,
        encoding: PayloadEncoding,
        payload: &[u8],
        logn: LogN,
    ) -> Result<DecodedSignature, FalconError> {
        codec::decode_payload(encoding, payload, logn)
    }

    fn crypto_verify(
        &self,
        logn: LogN,
        nonce: &[u8; NONCE_LEN],
        s2: &[i16],
        message: &[u8],
        h: &[u16],
    ) -> Result<bool, FalconError> {
        verify_with(logn, nonce, s2, message, h, negacyclic_mul_schoolbook)
    }

    fn name(&self) -> &'static str {
        "schoolbook"
    }
}

impl LatticePrimitive for NttLattice {
    fn decode_public_key(&self, body: &[u8], logn: LogN) -> Result<Vec<u16>, FalconError> {
        codec::decode_public_key(body, logn)
    }

    fn decompress_s(
        &self,
        encoding: PayloadEncoding,
        payload: &[u8],
        logn: LogN,
    ) -> Result<DecodedSignature, FalconError> {
        codec::decode_payload(encoding, payload, logn)
    }

    fn crypto_verify(
        &self,
        logn: LogN,
        nonce: &[u8; NONCE_LEN],
        s2: &[i16],
        message: &[u8],
        h: &[u16],
    ) -> Result<bool, FalconError> {
        verify_with(logn, nonce, s2, message, h, negacyclic_mul_ntt)
    }

    fn name(&self) -> &'static str {
        "ntt"
    }
}

// =============================================================================
// TESTS
// =============================================================================
