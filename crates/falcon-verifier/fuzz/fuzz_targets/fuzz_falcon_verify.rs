//! Fuzz target for Falcon verification.
//!
//! Feeds arbitrary buffers, declared lengths and type codes through both
//! multipliers and checks that neither panics and both agree.
//!
//! ## Running
//!
//! ```bash
//! cd crates/falcon-verifier
//! cargo +nightly fuzz run fuzz_falcon_verify
//! ```

#![no_main]

use falcon_verifier::{
    FalconVerificationApi, FalconVerificationService, NttLattice, SchoolbookLattice,
    FALCON_ERR_SUCCESS,
};
use libfuzzer_sys::fuzz_target;

/// Fuzz input structure for a verifier call.
#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    signature_type: u8,
    /// Forced into the signature header slot when set
    header: Option<u8>,
    signature: Vec<u8>,
    message: Vec<u8>,
    public_key: Vec<u8>,
    /// Declared lengths are buffer lengths minus these (saturating)
    sig_shrink: u8,
    msg_shrink: u8,
    pk_shrink: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut signature = input.signature;
    if let (Some(header), Some(first)) = (input.header, signature.first_mut()) {
        *first = header;
    }
    let sig_len = signature.len().saturating_sub(usize::from(input.sig_shrink));
    let msg_len = input.message.len().saturating_sub(usize::from(input.msg_shrink));
    let pk_len = input.public_key.len().saturating_sub(usize::from(input.pk_shrink));

    let pure = FalconVerificationService::new(SchoolbookLattice);
    let ntt = FalconVerificationService::new(NttLattice);

    let call = |service: &dyn FalconVerificationApi| {
        service.verify_detailed(
            input.signature_type,
            &signature,
            sig_len,
            &input.message,
            msg_len,
            &input.public_key,
            pk_len,
        )
    };

    let a = call(&pure);
    let b = call(&ntt);

    // 1. Both multipliers must agree, including the deciding check
    assert_eq!(a, b);

    // 2. Result should be deterministic
    assert_eq!(a, call(&pure));

    // 3. Status is always one of the defined codes
    assert!((-6..=0).contains(&a.status));

    // 4. A success needs a non-empty message and a key
    if a.status == FALCON_ERR_SUCCESS {
        assert!(msg_len > 0 && pk_len > 0);
    }
});
