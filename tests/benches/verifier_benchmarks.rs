//! # Falcon Verifier Benchmarks
//!
//! | Path | Expectation |
//! |------|-------------|
//! | Structural rejection | no decoding or hashing |
//! | NTT multiply | well below schoolbook from n = 256 |
//! | Falcon-512 verify | < 1ms with NTT |
//! | Batch verify | scales with the rayon pool |

use criterion::{criterion_group, criterion_main};
use falcon_tests::benchmarks::verifier::{
    bench_batch_verify, bench_hash_to_point, bench_polynomial_multiplication,
    bench_single_verify, bench_structural_rejection,
};

criterion_group!(
    benches,
    bench_structural_rejection,
    bench_polynomial_multiplication,
    bench_hash_to_point,
    bench_single_verify,
    bench_batch_verify,
);

criterion_main!(benches);
