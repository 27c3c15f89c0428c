//! # KAT Replay
//!
//! Parses the shipped Falcon-512 response file and verifies every record
//! through each deployment.

#[cfg(test)]
mod tests {
    use crate::fixtures::{falcon512_message, falcon512_public_key, falcon512_signature, kat_file};
    use falcon_verifier::config::DEFAULT_PRECOMPILE_ADDRESS;
    use falcon_verifier::{
        parse_kats, FalconBackend, FalconInterface, KatRecord, PrecompiledBackend, PureBackend,
        SignatureType, FALCON_ERR_BADSIG, FALCON_ERR_SUCCESS, PURE_BACKEND_ADDRESS,
    };
    use std::fs::File;
    use std::io::BufReader;

    fn load() -> Vec<KatRecord> {
        let file = File::open(kat_file()).expect("KAT fixture present");
        parse_kats(BufReader::new(file)).expect("KAT fixture parses")
    }

    #[test]
    fn test_fixture_parses() {
        let records = load();
        assert_eq!(records.len(), 5);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.count, i);
            assert_eq!(record.msg.len(), record.mlen);
            assert_eq!(record.sm.len(), record.smlen);
            assert_eq!(record.pk.len(), 897);
            assert_eq!(record.pk[0], 0x09);
        }
    }

    /// Test: record 0 is the published vector in signed-message form
    #[test]
    fn test_first_record_repacks_to_published_signature() {
        let records = load();
        let record = &records[0];
        assert_eq!(record.repack_signature().unwrap(), falcon512_signature());
        assert_eq!(record.msg, falcon512_message());
        assert_eq!(record.pk, falcon512_public_key());
    }

    #[test]
    fn test_every_record_verifies_on_both_backends() {
        let pure = PureBackend::default();
        let precompiled = PrecompiledBackend::default();
        let backends: [&dyn FalconBackend; 2] = [&pure, &precompiled];

        for record in load() {
            let signature = record.repack_signature().unwrap();
            for backend in backends {
                for signature_type in [SignatureType::Inferred, SignatureType::Compressed] {
                    assert_eq!(
                        backend.verify(signature_type.code(), &signature, &record.msg, &record.pk),
                        FALCON_ERR_SUCCESS,
                        "record {} on {}",
                        record.count,
                        backend.name()
                    );
                }
            }
        }
    }

    /// Test: signatures are bound to their own record
    #[test]
    fn test_records_do_not_cross_verify() {
        let records = load();
        let pure = PureBackend::default();
        for pair in records.windows(2) {
            let signature = pair[0].repack_signature().unwrap();
            let status = pure.verify(
                SignatureType::Compressed.code(),
                &signature,
                &pair[1].msg,
                &pair[1].pk,
            );
            assert_ne!(status, FALCON_ERR_SUCCESS);
        }
    }

    #[test]
    fn test_records_through_common_interface() {
        let interface = FalconInterface::default();
        for record in load() {
            let signature = record.repack_signature().unwrap();
            for target in [PURE_BACKEND_ADDRESS, DEFAULT_PRECOMPILE_ADDRESS] {
                assert_eq!(
                    interface.verify(&signature, &record.pk, &record.msg, target),
                    Ok(true)
                );
            }

            let mut message = record.msg.clone();
            message[0] ^= 0x01;
            assert_eq!(
                interface.verify_status(&signature, &record.pk, &message, PURE_BACKEND_ADDRESS),
                Ok(FALCON_ERR_BADSIG)
            );
        }
    }

    #[test]
    fn test_record_serializes_as_hex() {
        let records = load();
        let json = serde_json::to_value(&records[1]).unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["mlen"], 33);
        assert_eq!(
            json["msg"].as_str().unwrap(),
            hex::encode(&records[1].msg)
        );
        let back: KatRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, records[1]);
    }
}
