//! Merkle proofs over populated beacon objects

use beacon_ssz::merkle::length_chunk;
use beacon_ssz::schema::{ContainerSchema, Field, SszType};
use beacon_ssz::{
    concat_gindices, field_generalized_index, generalized_index, prove, prove_field, verify_proof, Container,
    DataVersion, PathElement, ProofBundle, TreeError, Value,
};
use integration_tests::{beacon_state, blind, root_hex, signed_block, BLOCK_HASH};
use proptest::prelude::*;
use std::sync::Arc;

#[test]
fn test_every_state_field_proves() {
    let state = beacon_state(DataVersion::Electra, 3).unwrap();
    let root = state.hash_tree_root().unwrap();
    let tree = state.get_tree().unwrap();
    assert_eq!(tree.root().unwrap(), root);

    for (field, _) in state.fields() {
        let gindex = field_generalized_index(state.schema(), field.name).unwrap();
        let bundle = tree.proof_bundle(gindex).unwrap();

        assert_eq!(bundle.root, root);
        assert_eq!(bundle.leaf, state.field_root(field.name).unwrap(), "{}", field.name);
        assert_eq!(bundle.branch.len(), 6, "37 fields pad to a depth-6 tree");
        assert!(bundle.verify(), "proof for {} must verify", field.name);
    }
}

#[test]
fn test_prove_field_matches_tree_walk() {
    let block = signed_block(DataVersion::Deneb, 55, 0).unwrap();
    let bundle = prove_field(&block, "signature").unwrap();
    assert_eq!(bundle.gindex, 3);
    assert_eq!(bundle.root, block.hash_tree_root().unwrap());
    assert_eq!(bundle.branch, vec![block.field_root("message").unwrap()]);
    assert!(bundle.verify());

    assert!(matches!(
        prove_field(&block, "signatures"),
        Err(TreeError::FieldNotFound { .. })
    ));
}

#[test]
fn test_validator_credentials_proof() {
    let state = beacon_state(DataVersion::Electra, 3).unwrap();
    let path: Vec<PathElement> = vec!["validators".into(), 1usize.into(), "withdrawal_credentials".into()];
    let bundle = state.prove_path(&path).unwrap();

    let mut credentials = [0u8; 32];
    credentials[0] = 0x02;
    credentials[12..].fill(1);
    assert_eq!(bundle.leaf, credentials);

    // Electra state field 11, list data subtree of depth 40, validator field 1 of 8
    let expected = concat_gindices(&[64 + 11, (1 << 41) + 1, 8 + 1]);
    assert_eq!(bundle.gindex, expected);
    assert_eq!(bundle.branch.len(), 6 + 41 + 3);
    assert!(bundle.verify());
}

#[test]
fn test_list_length_proof() {
    let state = beacon_state(DataVersion::Capella, 5).unwrap();
    let bundle = state
        .prove_path(&["validators".into(), PathElement::Length])
        .unwrap();
    assert_eq!(bundle.leaf, length_chunk(5));
    assert_eq!(bundle.gindex % 2, 1);
    assert!(bundle.verify());
}

#[test]
fn test_packed_balance_proof() {
    let state = beacon_state(DataVersion::Bellatrix, 6).unwrap();
    // Four balances share a chunk; index 5 lives in the second one
    let bundle = state.prove_path(&["balances".into(), 5usize.into()]).unwrap();
    let expected: Vec<u8> = (4..6u64)
        .flat_map(|i| (32_000_000_000 + i).to_le_bytes())
        .chain([0u8; 16])
        .collect();
    assert_eq!(bundle.leaf.as_slice(), expected.as_slice());
    assert!(bundle.verify());

    let sibling = state.prove_path(&["balances".into(), 4usize.into()]).unwrap();
    assert_eq!(sibling.gindex, bundle.gindex);
}

#[test]
fn test_full_and_blinded_blocks_share_proofs() {
    for version in DataVersion::ALL.into_iter().filter(|v| v.has_execution_payload()) {
        let full = signed_block(version, 99, 1).unwrap();
        let blinded = blind(version, &full).unwrap();
        assert_eq!(
            root_hex(&full.hash_tree_root().unwrap()),
            root_hex(&blinded.hash_tree_root().unwrap()),
            "{version}"
        );

        let full_proof = full
            .prove_path(&["message".into(), "body".into(), "execution_payload".into(), "block_hash".into()])
            .unwrap();
        let blinded_proof = blinded
            .prove_path(&[
                "message".into(),
                "body".into(),
                "execution_payload_header".into(),
                "block_hash".into(),
            ])
            .unwrap();
        assert_eq!(full_proof.leaf, BLOCK_HASH);
        assert_eq!(full_proof, blinded_proof, "{version}");
    }
}

#[test]
fn test_tampering_breaks_proof() {
    let block = signed_block(DataVersion::Electra, 12, 2).unwrap();
    let bundle = block
        .prove_path(&[
            "message".into(),
            "body".into(),
            "execution_requests".into(),
            "consolidations".into(),
            1usize.into(),
        ])
        .unwrap();
    assert!(bundle.verify());

    for i in 0..bundle.branch.len() {
        let mut tampered = bundle.clone();
        tampered.branch[i][0] ^= 1;
        assert!(!tampered.verify(), "flipped sibling {i} still verifies");
    }

    let mut wrong_leaf = bundle.clone();
    wrong_leaf.leaf[31] ^= 0x80;
    assert!(!wrong_leaf.verify());

    assert!(!verify_proof(&bundle.root, &bundle.leaf, bundle.gindex ^ 1, &bundle.branch));
    assert!(!verify_proof(&bundle.root, &bundle.leaf, bundle.gindex, &bundle.branch[1..]));
    assert!(!verify_proof(&bundle.root, &bundle.leaf, 0, &[]));
}

#[test]
fn test_out_of_range_element_rejected() {
    let block = signed_block(DataVersion::Electra, 12, 0).unwrap();
    let ty = block.as_type();
    let path: Vec<PathElement> = vec![
        "message".into(),
        "body".into(),
        "execution_requests".into(),
        "consolidations".into(),
        2usize.into(),
    ];
    assert!(matches!(
        generalized_index(&ty, &path),
        Err(TreeError::ElementOutOfRange { index: 2, limit: 2 })
    ));
}

#[test]
fn test_bundle_json_round_trip() {
    let state = beacon_state(DataVersion::Altair, 2).unwrap();
    let bundle = prove_field(&state, "slot").unwrap();

    let json = serde_json::to_value(&bundle).unwrap();
    assert_eq!(json["root"], serde_json::Value::String(root_hex(&bundle.root)));
    assert_eq!(json["branch"].as_array().map(Vec::len), Some(bundle.branch.len()));

    let parsed: ProofBundle = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, bundle);
    assert!(parsed.verify());
}

fn registry() -> Arc<ContainerSchema> {
    ContainerSchema::new(
        "Registry",
        vec![
            Field::new("epoch", SszType::U64),
            Field::new("balances", SszType::list(SszType::U64, 1024)),
        ],
    )
}

proptest! {
    #[test]
    fn prop_every_balance_proves(balances in prop::collection::vec(any::<u64>(), 1..64), pick in any::<prop::sample::Index>()) {
        let schema = registry();
        let registry = Container::new(
            &schema,
            vec![
                7u64.into(),
                Value::List(balances.iter().copied().map(Value::Uint64).collect()),
            ],
        )
        .unwrap();
        let index = pick.index(balances.len());

        let bundle = prove(
            &Value::Container(registry.clone()),
            &registry.as_type(),
            &["balances".into(), index.into()],
        )
        .unwrap();
        prop_assert!(bundle.verify());
        prop_assert_eq!(bundle.root, registry.hash_tree_root().unwrap());

        let offset = (index % 4) * 8;
        prop_assert_eq!(&bundle.leaf[offset..offset + 8], &balances[index].to_le_bytes()[..]);
    }
}
