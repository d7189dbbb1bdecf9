use proptest::prelude::*;

use keyscript_primitives::ec::{PrivateKey, PublicKey};
use keyscript_script::{ParseMode, RedeemScript, ScriptError, MAX_MULTISIG_KEYS};

/// Distinct keys from distinct scalar bytes, each in the requested form.
fn public_keys(seeds: &[(u8, bool)]) -> Vec<PublicKey> {
    seeds
        .iter()
        .map(|&(b, compressed)| {
            PrivateKey::from_bytes(&[b; 32])
                .unwrap()
                .with_compression(compressed)
                .pub_key()
        })
        .collect()
}

fn distinct_seeds(max: usize) -> impl Strategy<Value = Vec<(u8, bool)>> {
    prop::collection::btree_map(1u8..=200, any::<bool>(), 1..=max)
        .prop_map(|m| m.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn redeem_script_roundtrip(
        seeds in distinct_seeds(MAX_MULTISIG_KEYS),
        m_seed in any::<usize>(),
    ) {
        let keys = public_keys(&seeds);
        let m = 1 + m_seed % keys.len();
        let redeem = RedeemScript::new(m, keys.clone()).unwrap();

        for mode in [ParseMode::Strict, ParseMode::Lenient] {
            let parsed = RedeemScript::from_script_with_mode(redeem.script(), mode).unwrap();
            prop_assert_eq!(parsed.required_signatures(), m);
            prop_assert_eq!(parsed.keys(), &keys[..]);
            prop_assert_eq!(parsed.to_bytes(), redeem.to_bytes());
        }
    }

    #[test]
    fn threshold_above_key_count_rejected(
        seeds in distinct_seeds(MAX_MULTISIG_KEYS),
        extra in 1usize..8,
    ) {
        let keys = public_keys(&seeds);
        let n = keys.len();
        let result = RedeemScript::new(n + extra, keys);
        let is_expected = matches!(
            result,
            Err(ScriptError::ThresholdExceedsKeyCount { required, keys }) if required == n + extra && keys == n
        );
        prop_assert!(is_expected);
    }

    #[test]
    fn output_script_commits_to_script_hash(seeds in distinct_seeds(4)) {
        let redeem = RedeemScript::new(1, public_keys(&seeds)).unwrap();
        let output = redeem.output_script();
        prop_assert!(output.is_p2sh());
        prop_assert_eq!(&output.to_bytes()[2..22], &redeem.script_hash()[..]);
    }
}
