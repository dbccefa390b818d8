use voter_allowlist_merkle::{
    match_strategy, normalize_batch, parse_digest, AllowlistTree, InvalidAddressPolicy,
    MatchOutcome, Strategy, DEFAULT_CANDIDATES,
};

const VOTERS: [&str; 5] = [
    "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
    "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
    "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
    "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    "0x52908400098527886e0f7030069857d2e4169ee7",
];

#[test]
fn test_matcher_recovers_each_strategy_from_checksummed_input() {
    let batch = normalize_batch(&VOTERS, InvalidAddressPolicy::Strict).unwrap();

    for strategy in DEFAULT_CANDIDATES {
        let published = AllowlistTree::build(&batch.addresses, strategy)
            .unwrap()
            .root();

        // the root arrives as text from a previous deployment
        let target = parse_digest(&voter_allowlist_merkle::digest_to_hex(&published)).unwrap();

        match match_strategy(&batch.addresses, &target, &DEFAULT_CANDIDATES) {
            MatchOutcome::Matched { strategy: found, tree } => {
                assert_eq!(found, strategy);
                for address in &batch.addresses {
                    let proof = tree.proof_for(address).unwrap();
                    assert_eq!(tree.verify_proof(address, &proof), Ok(true));
                }
            }
            MatchOutcome::NoMatch { .. } => panic!("{} should have matched", strategy),
        }
    }
}

#[test]
fn test_casing_does_not_change_root() {
    let checksummed = normalize_batch(&VOTERS, InvalidAddressPolicy::Strict).unwrap();
    let lowered: Vec<String> = VOTERS.iter().map(|raw| raw.to_lowercase()).collect();
    let lowered = normalize_batch(&lowered, InvalidAddressPolicy::Strict).unwrap();

    let a = AllowlistTree::build(&checksummed.addresses, Strategy::standard()).unwrap();
    let b = AllowlistTree::build(&lowered.addresses, Strategy::standard()).unwrap();
    assert_eq!(a.root(), b.root());
}

#[test]
fn test_narrowed_candidates_report_no_match() {
    let batch = normalize_batch(&VOTERS, InvalidAddressPolicy::Strict).unwrap();
    let target = AllowlistTree::build(&batch.addresses, Strategy::standard())
        .unwrap()
        .root();

    let without_standard: Vec<Strategy> = DEFAULT_CANDIDATES[1..].to_vec();
    let outcome = match_strategy(&batch.addresses, &target, &without_standard);
    assert!(matches!(
        outcome,
        MatchOutcome::NoMatch { candidates_tried: 7 }
    ));

    // broadening the list again finds it without any code change
    let outcome = match_strategy(&batch.addresses, &target, &DEFAULT_CANDIDATES);
    assert_eq!(outcome.strategy(), Some(Strategy::standard()));
}

#[test]
fn test_changed_address_set_does_not_match() {
    let batch = normalize_batch(&VOTERS, InvalidAddressPolicy::Strict).unwrap();
    let target = AllowlistTree::build(&batch.addresses, Strategy::standard())
        .unwrap()
        .root();

    let fewer = &batch.addresses[..4];
    assert!(!match_strategy(fewer, &target, &DEFAULT_CANDIDATES).is_match());
}
