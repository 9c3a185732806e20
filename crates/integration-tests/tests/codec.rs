//! Wire format and hash tree root behavior through the public API

use beacon_ssz::schema::{ContainerSchema, Field, SszType};
use beacon_ssz::{codec, decode, encode, hash_tree_root, size_ssz, types, Container, DataVersion, SszError, Value};
use integration_tests::{beacon_state, consolidation_request, signed_block};
use proptest::prelude::*;
use sha2::{Digest, Sha256};
use std::sync::Arc;

fn sha256(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

fn chunk(value: u64) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[..8].copy_from_slice(&value.to_le_bytes());
    out
}

fn triple_schema() -> Arc<ContainerSchema> {
    ContainerSchema::new(
        "Triple",
        vec![
            Field::new("a", SszType::U64),
            Field::new("b", SszType::U64),
            Field::new("c", SszType::U64),
        ],
    )
}

#[test]
fn test_three_uint64_container() {
    let triple = Container::new(&triple_schema(), vec![1u64.into(), 2u64.into(), 3u64.into()]).unwrap();

    let bytes = triple.to_ssz().unwrap();
    assert_eq!(bytes.len(), 24);
    assert_eq!(
        hex::encode(&bytes),
        "010000000000000002000000000000000300000000000000"
    );

    // Three leaves padded to four
    let expected = sha256(&sha256(&chunk(1), &chunk(2)), &sha256(&chunk(3), &[0u8; 32]));
    assert_eq!(triple.hash_tree_root().unwrap(), expected);

    assert_eq!(Container::from_ssz(&triple_schema(), &bytes).unwrap(), triple);
}

#[test]
fn test_consolidation_request_fixed_size() {
    let request = consolidation_request(9).unwrap();
    let bytes = request.to_ssz().unwrap();
    assert_eq!(bytes.len(), 116);
    assert_eq!(&bytes[..20], &[9u8; 20]);
    assert_eq!(&bytes[20..68], &[9u8; 48]);
    assert_eq!(&bytes[68..], &[10u8; 48]);

    let schema = &types::common().consolidation_request;
    assert_eq!(Container::from_ssz(schema, &bytes).unwrap(), request);

    for len in [0, 115, 117, 232] {
        let mut resized = bytes.clone();
        resized.resize(len, 0);
        assert!(
            matches!(
                Container::from_ssz(schema, &resized),
                Err(SszError::Size { expected: 116, .. })
            ),
            "{len} bytes must be rejected"
        );
    }
}

#[test]
fn test_list_limit_enforced_on_encode() {
    let ty = SszType::list(SszType::U64, 2);
    let value = Value::List(vec![1u64.into(), 2u64.into(), 3u64.into()]);
    assert_eq!(encode(&value, &ty), Err(SszError::ListTooBig { len: 3, max: 2 }));
    assert!(hash_tree_root(&value, &ty).is_err());

    let bits = SszType::Bitlist(8);
    assert_eq!(
        encode(&Value::Bits(vec![true; 9]), &bits),
        Err(SszError::ListTooBig { len: 9, max: 8 })
    );
}

#[test]
fn test_list_limit_enforced_on_decode() {
    let bytes: Vec<u8> = [1u64, 2, 3].iter().flat_map(|v| v.to_le_bytes()).collect();
    assert_eq!(
        decode(&bytes, &SszType::list(SszType::U64, 2)),
        Err(SszError::IncorrectListSize { len: 3, max: 2 })
    );
    assert_eq!(
        decode(&bytes[..20], &SszType::list(SszType::U64, 8)),
        Err(SszError::UnalignedListSegment {
            segment: 20,
            element: 8
        })
    );
}

#[test]
fn test_first_offset_must_match_fixed_part() {
    let schema = ContainerSchema::new(
        "Offsets",
        vec![
            Field::new("a", SszType::U64),
            Field::new("data", SszType::ByteList(16)),
        ],
    );
    let value = Container::default_for(&schema)
        .with("a", 5u64)
        .unwrap()
        .with("data", Value::bytes(vec![1, 2, 3]))
        .unwrap();
    let mut bytes = value.to_ssz().unwrap();
    assert_eq!(&bytes[8..12], &12u32.to_le_bytes());

    bytes[8] = 11;
    assert!(matches!(
        codec::decode_container(&bytes, &schema),
        Err(SszError::Offset { offset: 11, .. })
    ));
}

#[test]
fn test_bitlist_encoding() {
    let ty = SszType::Bitlist(16);
    let value = Value::Bits(vec![true, false, true]);
    assert_eq!(encode(&value, &ty).unwrap(), vec![0b0000_1101]);

    // Sentinel of a full byte spills into a new byte
    let full = Value::Bits(vec![true; 8]);
    assert_eq!(encode(&full, &ty).unwrap(), vec![0xff, 0x01]);

    assert!(matches!(decode(&[0x00], &ty), Err(SszError::InvalidBitfield(_))));
    assert!(matches!(decode(&[], &ty), Err(SszError::InvalidBitfield(_))));
}

#[test]
fn test_block_round_trip_every_fork() {
    for version in DataVersion::ALL {
        let block = signed_block(version, 123, 2).unwrap();
        let bytes = block.to_ssz().unwrap();
        assert_eq!(bytes.len(), block.size_ssz().unwrap(), "{version}");

        let decoded = Container::from_ssz(block.schema(), &bytes).unwrap();
        assert_eq!(decoded, block, "{version}");
        assert_eq!(decoded.hash_tree_root().unwrap(), block.hash_tree_root().unwrap());
    }
}

#[test]
fn test_state_round_trip_every_fork() {
    for version in DataVersion::ALL {
        let state = beacon_state(version, 3).unwrap();
        let bytes = state.to_ssz().unwrap();
        let decoded = Container::from_ssz(state.schema(), &bytes).unwrap();
        assert_eq!(decoded, state, "{version}");
    }
}

#[test]
fn test_truncated_block_rejected() {
    let block = signed_block(DataVersion::Electra, 1, 1).unwrap();
    let bytes = block.to_ssz().unwrap();
    for cut in [0, 4, 100, bytes.len() - 1] {
        assert!(
            Container::from_ssz(block.schema(), &bytes[..cut]).is_err(),
            "block truncated to {cut} bytes must not decode"
        );
    }
}

// ============================================================================
// Property tests
// ============================================================================

fn mixed_schema() -> Arc<ContainerSchema> {
    ContainerSchema::new(
        "Mixed",
        vec![
            Field::new("number", SszType::U64),
            Field::new("flag", SszType::BOOL),
            Field::new("extra", SszType::ByteList(32)),
            Field::new("items", SszType::list(SszType::U32, 16)),
            Field::new("bits", SszType::Bitlist(20)),
            Field::new("root", SszType::ByteVector(32)),
            Field::new("nested", SszType::list(SszType::ByteList(8), 4)),
        ],
    )
}

fn mixed_value() -> impl Strategy<Value = Container> {
    (
        any::<u64>(),
        any::<bool>(),
        prop::collection::vec(any::<u8>(), 0..=32),
        prop::collection::vec(any::<u32>(), 0..=16),
        prop::collection::vec(any::<bool>(), 0..=20),
        any::<[u8; 32]>(),
        prop::collection::vec(prop::collection::vec(any::<u8>(), 0..=8), 0..=4),
    )
        .prop_map(|(number, flag, extra, items, bits, root, nested)| {
            Container::new(
                &mixed_schema(),
                vec![
                    number.into(),
                    flag.into(),
                    Value::Bytes(extra),
                    Value::List(items.into_iter().map(Value::Uint32).collect()),
                    Value::Bits(bits),
                    root.into(),
                    Value::List(nested.into_iter().map(Value::Bytes).collect()),
                ],
            )
            .unwrap()
        })
}

proptest! {
    #[test]
    fn prop_decode_inverts_encode(value in mixed_value()) {
        let bytes = value.to_ssz().unwrap();
        prop_assert_eq!(bytes.len(), value.size_ssz().unwrap());
        prop_assert_eq!(bytes.len(), size_ssz(&Value::Container(value.clone()), &value.as_type()).unwrap());

        let decoded = Container::from_ssz(&mixed_schema(), &bytes).unwrap();
        prop_assert_eq!(decoded.hash_tree_root().unwrap(), value.hash_tree_root().unwrap());
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn prop_accepted_bytes_are_canonical(bytes in prop::collection::vec(any::<u8>(), 0..160)) {
        if let Ok(decoded) = Container::from_ssz(&mixed_schema(), &bytes) {
            prop_assert_eq!(decoded.to_ssz().unwrap(), bytes);
        }
    }

    #[test]
    fn prop_encoding_is_canonical(value in mixed_value()) {
        let bytes = value.to_ssz().unwrap();
        let again = Container::from_ssz(&mixed_schema(), &bytes).unwrap().to_ssz().unwrap();
        prop_assert_eq!(again, bytes);
    }
}
