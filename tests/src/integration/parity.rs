//! # Backend Parity
//!
//! The schoolbook and NTT multipliers, and the in-process and precompiled
//! deployments, must return identical statuses for identical inputs. Valid
//! synthetic vectors cover every degree and layout; seeded mutations cover
//! the reject paths.

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        all_logn, falcon512_message, falcon512_public_key, falcon512_signature, synthesize,
        SyntheticVector,
    };
    use falcon_verifier::{
        FalconBackend, FalconVerificationApi, FalconVerificationService, NttLattice,
        PrecompiledBackend, PureBackend, SchoolbookLattice, SignatureLayout, SignatureType,
        VerificationRequest, FALCON_ERR_BADSIG, FALCON_ERR_SUCCESS,
    };
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const LAYOUTS: [SignatureLayout; 3] = [
        SignatureLayout::Compressed,
        SignatureLayout::Padded,
        SignatureLayout::ConstantTime,
    ];

    fn declared_type(layout: SignatureLayout) -> SignatureType {
        match layout {
            SignatureLayout::Compressed => SignatureType::Compressed,
            SignatureLayout::Padded => SignatureType::Padded,
            SignatureLayout::ConstantTime => SignatureType::ConstantTime,
        }
    }

    fn vectors() -> Vec<SyntheticVector> {
        let mut out = Vec::new();
        for logn in all_logn() {
            for (i, layout) in LAYOUTS.into_iter().enumerate() {
                let seed = u64::from(logn.get()) * 10 + i as u64;
                out.push(synthesize(logn, layout, seed));
            }
        }
        out
    }

    /// Test: every degree and layout verifies on every backend
    #[test]
    fn test_synthetic_vectors_verify_everywhere() {
        let pure = PureBackend::default();
        let precompiled = PrecompiledBackend::default();
        let backends: [&dyn FalconBackend; 2] = [&pure, &precompiled];

        for v in vectors() {
            for signature_type in [declared_type(v.layout), SignatureType::Inferred] {
                for backend in backends {
                    assert_eq!(
                        backend.verify(
                            signature_type.code(),
                            &v.signature,
                            &v.message,
                            &v.public_key
                        ),
                        FALCON_ERR_SUCCESS,
                        "logn {} {:?} as {:?} on {}",
                        v.logn.get(),
                        v.layout,
                        signature_type,
                        backend.name()
                    );
                }
            }
        }
    }

    #[test]
    fn test_synthetic_vectors_reject_other_messages() {
        let service = FalconVerificationService::new(NttLattice);
        for v in vectors() {
            let mut message = v.message.clone();
            message.push(0);
            let verdict = service.verify_typed(
                declared_type(v.layout),
                &v.signature,
                &message,
                &v.public_key,
            );
            assert_eq!(verdict.status, FALCON_ERR_BADSIG, "logn {}", v.logn.get());
        }
    }

    /// Test: random corruptions give the same verdict on both multipliers
    #[test]
    fn test_multipliers_agree_on_mutations() {
        let pure = FalconVerificationService::new(SchoolbookLattice);
        let ntt = FalconVerificationService::new(NttLattice);
        let mut rng = StdRng::seed_from_u64(0xFA1C);

        let mut inputs: Vec<(Vec<u8>, Vec<u8>, Vec<u8>)> = vectors()
            .into_iter()
            .map(|v| (v.signature, v.message, v.public_key))
            .collect();
        inputs.push((
            falcon512_signature(),
            falcon512_message(),
            falcon512_public_key(),
        ));

        for (signature, message, public_key) in inputs {
            for _ in 0..8 {
                let (mut sig, mut msg, mut pk) =
                    (signature.clone(), message.clone(), public_key.clone());
                match rng.gen_range(0..3) {
                    0 => {
                        let i = rng.gen_range(0..sig.len());
                        sig[i] ^= 1 << rng.gen_range(0..8);
                    }
                    1 => {
                        let i = rng.gen_range(0..msg.len());
                        msg[i] = msg[i].wrapping_add(1);
                    }
                    _ => {
                        let i = rng.gen_range(1..pk.len());
                        pk[i] ^= 1 << rng.gen_range(0..8);
                    }
                }
                let signature_type = rng.gen_range(0..4u8);
                let a = pure.verify_detailed(
                    signature_type,
                    &sig,
                    sig.len(),
                    &msg,
                    msg.len(),
                    &pk,
                    pk.len(),
                );
                let b = ntt.verify_detailed(
                    signature_type,
                    &sig,
                    sig.len(),
                    &msg,
                    msg.len(),
                    &pk,
                    pk.len(),
                );
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_batch_preserves_order_and_counts() {
        let mut requests: Vec<VerificationRequest> = vectors()
            .into_iter()
            .map(|v| {
                VerificationRequest::new(
                    declared_type(v.layout),
                    v.signature,
                    v.message,
                    v.public_key,
                )
            })
            .collect();
        let valid = requests.len();

        let mut forged = requests[0].clone();
        forged.message.push(0xFF);
        requests.insert(3, forged);
        let mut bad_type = requests[5].clone();
        bad_type.signature_type = 9;
        requests.push(bad_type);

        for service in [
            &FalconVerificationService::new(SchoolbookLattice) as &dyn FalconVerificationApi,
            &FalconVerificationService::new(NttLattice),
        ] {
            let batch = service.batch_verify(&requests);
            assert_eq!(batch.results.len(), requests.len());
            assert_eq!(batch.valid_count, valid);
            assert_eq!(batch.invalid_count, 2);
            assert!(!batch.all_valid);
            assert!(!batch.results[3].valid);
            assert!(!batch.results[requests.len() - 1].valid);
            assert!(batch.results[4].valid);
        }
    }
}
