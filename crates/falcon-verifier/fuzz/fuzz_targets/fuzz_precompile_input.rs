//! Fuzz target for the precompile ABI decoder.
//!
//! ## Running
//!
//! ```bash
//! cd crates/falcon-verifier
//! cargo +nightly fuzz run fuzz_precompile_input
//! ```

#![no_main]

use falcon_verifier::adapters::abi;
use falcon_verifier::{FalconPrecompile, Precompile};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let precompile = FalconPrecompile::default();

    // Must never panic, and a successful call always yields one status word
    if let Ok(output) = precompile.execute(data, u64::MAX) {
        assert_eq!(output.output.len(), 32);
        let status = abi::decode_int256(&output.output).expect("status word");
        assert!((-6..=0).contains(&status));
    }
});
