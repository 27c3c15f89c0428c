//! # Precompile Transport
//!
//! End-to-end calls through the ABI codec and the precompile entry point.

#[cfg(test)]
mod tests {
    use crate::fixtures::{falcon512_message, falcon512_public_key, falcon512_signature};
    use falcon_verifier::adapters::abi::{self, VerifyCall};
    use falcon_verifier::config::DEFAULT_PRECOMPILE_ADDRESS;
    use falcon_verifier::{
        execute_precompile, FalconPrecompile, Precompile, PrecompileConfig, PrecompileError,
        PrecompileOutput, VerifierConfig, FALCON_ERR_BADSIG, FALCON_ERR_FORMAT, FALCON_ERR_SIZE,
        FALCON_ERR_SUCCESS,
    };
    use primitive_types::{H160, U256};

    fn published_call(signature_type: u8) -> VerifyCall {
        VerifyCall::new(
            signature_type,
            falcon512_signature(),
            falcon512_message(),
            falcon512_public_key(),
        )
    }

    fn call(input: &[u8]) -> PrecompileOutput {
        execute_precompile(DEFAULT_PRECOMPILE_ADDRESS, input, u64::MAX)
            .expect("default address answers")
            .expect("well-formed input")
    }

    fn status(output: &PrecompileOutput) -> i32 {
        abi::decode_int256(&output.output).unwrap()
    }

    #[test]
    fn test_published_vector_through_precompile() {
        let input = abi::encode_verify_args(&published_call(1));
        let output = call(&input);
        assert_eq!(status(&output), FALCON_ERR_SUCCESS);
        assert_eq!(output.output, vec![0u8; 32]);
    }

    #[test]
    fn test_negative_status_is_sign_extended() {
        let mut c = published_call(1);
        c.message[0] ^= 0xFF;
        let output = call(&abi::encode_verify_args(&c));
        assert_eq!(status(&output), FALCON_ERR_BADSIG);
        assert!(output.output[..28].iter().all(|&b| b == 0xFF));
    }

    /// Test: gas is linear in the input word count
    #[test]
    fn test_gas_accounting() {
        let input = abi::encode_verify_args(&published_call(1));
        assert_eq!(input.len() % 32, 0);
        let words = (input.len() / 32) as u64;

        let output = call(&input);
        assert_eq!(output.gas_used, 3_000 + 12 * words);

        let precompile = FalconPrecompile::default();
        let required = precompile.gas_cost(input.len());
        assert!(precompile.execute(&input, required).is_ok());
        assert_eq!(
            precompile.execute(&input, required - 1),
            Err(PrecompileError::OutOfGas {
                required,
                limit: required - 1
            })
        );
    }

    #[test]
    fn test_configured_precompile() {
        let config = VerifierConfig {
            precompile: PrecompileConfig {
                address: H160::from_low_u64_be(0x0100),
                base_gas: 50_000,
                word_gas: 0,
            },
            ..Default::default()
        };
        let precompile = FalconPrecompile::new(&config);
        assert_eq!(precompile.address(), H160::from_low_u64_be(0x0100));

        let input = abi::encode_verify_args(&published_call(0));
        let output = precompile.execute(&input, 50_000).unwrap();
        assert_eq!(output.gas_used, 50_000);
        assert_eq!(status(&output), FALCON_ERR_SUCCESS);

        // Only the default address is answered by the free function
        assert!(execute_precompile(H160::from_low_u64_be(0x0100), &input, u64::MAX).is_none());
    }

    /// Test: declared lengths shorter than the buffers select a prefix
    #[test]
    fn test_declared_lengths_select_prefix() {
        let mut c = published_call(1);
        c.signature.extend_from_slice(&[0xAB; 40]);
        c.message.extend_from_slice(b"ignored suffix");
        let output = call(&abi::encode_verify_args(&c));
        assert_eq!(status(&output), FALCON_ERR_SUCCESS);

        // Declaring the longer signature exposes non-zero trailing bytes
        c.signature_len = U256::from(c.signature.len());
        let output = call(&abi::encode_verify_args(&c));
        assert_eq!(status(&output), FALCON_ERR_FORMAT);
    }

    #[test]
    fn test_declared_lengths_beyond_buffers() {
        for field in 0..3 {
            let mut c = published_call(1);
            let huge = U256::MAX;
            match field {
                0 => c.signature_len = huge,
                1 => c.message_len = huge,
                _ => c.public_key_len = U256::from(898),
            }
            let output = call(&abi::encode_verify_args(&c));
            assert_eq!(status(&output), FALCON_ERR_SIZE, "field {field}");
        }
    }

    #[test]
    fn test_calldata_with_selector_round_trips() {
        let c = published_call(2);
        let calldata = abi::encode_verify_call(&c);
        assert_eq!(&calldata[..4], &abi::verify_selector());
        assert_eq!(abi::decode_verify_call(&calldata).unwrap(), c);

        // 658 bytes is not the padded size
        let output = call(&calldata[4..]);
        assert_eq!(status(&output), FALCON_ERR_SIZE);
    }

    #[test]
    fn test_malformed_abi_is_an_error_not_a_status() {
        let input = abi::encode_verify_args(&published_call(1));

        let truncated = &input[..input.len() - 64];
        let result = execute_precompile(DEFAULT_PRECOMPILE_ADDRESS, truncated, u64::MAX);
        assert!(matches!(result, Some(Err(PrecompileError::InvalidInput(_)))));

        let mut wide_type = input.clone();
        wide_type[30] = 0x01;
        let result = execute_precompile(DEFAULT_PRECOMPILE_ADDRESS, &wide_type, u64::MAX);
        assert!(matches!(result, Some(Err(PrecompileError::InvalidInput(_)))));
    }
}
