//! Fork-tagged wrappers over real block, state and attestation fixtures

use beacon_ssz::types::{self, preset};
use beacon_ssz::{
    DataVersion, VersionError, VersionedAttestation, VersionedBeaconState, VersionedProposal,
    VersionedSignedBeaconBlock, VersionedSignedBlindedBeaconBlock,
};
use integration_tests::{
    attestation, beacon_state, blind, signed_block, u256_be, BLOCK_HASH, BLOCK_NUMBER, FEE_RECIPIENT,
    PARENT_ROOT, PROPOSER_INDEX, SIGNATURE, STATE_ROOT,
};
use std::thread;

#[test]
fn test_electra_block_answers_every_projection() {
    let block = VersionedSignedBeaconBlock::new(DataVersion::Electra, signed_block(DataVersion::Electra, 4_000, 2).unwrap())
        .unwrap();

    assert_eq!(block.slot().unwrap(), 4_000);
    assert_eq!(block.proposer_index().unwrap(), PROPOSER_INDEX);
    assert_eq!(block.parent_root().unwrap(), PARENT_ROOT);
    assert_eq!(block.state_root().unwrap(), STATE_ROOT);
    assert_eq!(block.signature().unwrap(), SIGNATURE);
    assert_eq!(block.execution_block_hash().unwrap(), BLOCK_HASH);
    assert_eq!(block.execution_block_number().unwrap(), BLOCK_NUMBER);
    assert_eq!(block.fee_recipient().unwrap(), FEE_RECIPIENT);
    assert_eq!(block.base_fee_per_gas().unwrap(), u256_be(7));
    assert_eq!(block.withdrawals().unwrap().len(), 1);
    assert_eq!(block.transactions().unwrap().len(), 1);
    assert_eq!(block.blob_kzg_commitments().unwrap(), vec![[0xc0; 48]]);
    assert_eq!(block.consolidation_requests().unwrap().len(), 2);
    assert!(block.attestations().unwrap().is_empty());

    let header = block.header().unwrap();
    assert_eq!(header.hash_tree_root().unwrap(), block.block_root().unwrap());
    assert_eq!(block.body_root().unwrap(), block.body().unwrap().hash_tree_root().unwrap());
}

#[test]
fn test_later_fork_fields_missing_on_earlier_blocks() {
    let cases = [
        (DataVersion::Phase0, "execution_payload"),
        (DataVersion::Altair, "execution_payload"),
        (DataVersion::Bellatrix, "withdrawals"),
        (DataVersion::Capella, "blob_kzg_commitments"),
        (DataVersion::Deneb, "execution_requests"),
    ];
    for (version, field) in cases {
        let block = VersionedSignedBeaconBlock::new(version, signed_block(version, 1, 0).unwrap()).unwrap();
        assert_eq!(block.slot().unwrap(), 1);

        let missing = match field {
            "execution_payload" => block.execution_block_hash().map(|_| ()),
            "withdrawals" => block.withdrawals().map(|_| ()),
            "blob_kzg_commitments" => block.blob_kzg_commitments().map(|_| ()),
            _ => block.consolidation_requests().map(|_| ()),
        };
        assert_eq!(missing, Err(VersionError::DataMissing(field)), "{version}");
    }
}

#[test]
fn test_blinded_block_projections() {
    let full = signed_block(DataVersion::Deneb, 77, 0).unwrap();
    let blinded =
        VersionedSignedBlindedBeaconBlock::new(DataVersion::Deneb, blind(DataVersion::Deneb, &full).unwrap()).unwrap();
    let full = VersionedSignedBeaconBlock::new(DataVersion::Deneb, full).unwrap();

    assert_eq!(blinded.execution_block_hash().unwrap(), BLOCK_HASH);
    assert_eq!(blinded.block_root().unwrap(), full.block_root().unwrap());

    let payload = full.body().unwrap().get("execution_payload").and_then(|v| v.as_container()).unwrap();
    assert_eq!(blinded.transactions_root().unwrap(), payload.field_root("transactions").unwrap());
    assert_eq!(blinded.withdrawals_root().unwrap(), payload.field_root("withdrawals").unwrap());

    assert_eq!(
        blinded.transactions().map(|_| ()),
        Err(VersionError::BlindedMismatch {
            field: "transactions",
            blinded: true
        })
    );
    assert_eq!(
        full.withdrawals_root(),
        Err(VersionError::BlindedMismatch {
            field: "withdrawals_root",
            blinded: false
        })
    );
}

#[test]
fn test_blinded_blocks_unsupported_before_bellatrix() {
    let err = VersionedSignedBlindedBeaconBlock::from_ssz(DataVersion::Altair, &[]).unwrap_err();
    assert!(matches!(err, VersionError::UnsupportedVersion { .. }));
    assert!(types::signed_blinded_beacon_block(DataVersion::Altair).is_none());
}

#[test]
fn test_unknown_and_empty_wrappers() {
    let unknown = VersionedSignedBeaconBlock::default();
    assert!(unknown.is_empty());
    assert!(matches!(unknown.slot(), Err(VersionError::UnsupportedVersion { .. })));

    let empty = VersionedBeaconState::empty(DataVersion::Capella);
    assert!(empty.is_empty());
    assert_eq!(empty.version(), DataVersion::Capella);
    assert!(matches!(empty.slot(), Err(VersionError::DataMissing(_))));

    let proposal = VersionedProposal::default();
    assert!(proposal.is_empty());
    assert!(!proposal.is_blinded());
}

#[test]
fn test_schema_mismatch_rejected() {
    let deneb = signed_block(DataVersion::Deneb, 1, 0).unwrap();
    let err = VersionedSignedBeaconBlock::new(DataVersion::Electra, deneb).unwrap_err();
    assert_eq!(
        err,
        VersionError::SchemaMismatch {
            expected: "ElectraSignedBeaconBlock".to_string(),
            got: "DenebSignedBeaconBlock".to_string(),
        }
    );
}

#[test]
fn test_proposal_decodes_by_blindedness() {
    let full = signed_block(DataVersion::Capella, 321, 0).unwrap();
    let message = full.get("message").and_then(|v| v.as_container()).unwrap();
    let bytes = message.to_ssz().unwrap();

    let proposal = VersionedProposal::from_ssz(DataVersion::Capella, false, &bytes).unwrap();
    assert!(!proposal.is_blinded());
    assert_eq!(proposal.version(), DataVersion::Capella);
    assert_eq!(proposal.slot().unwrap(), 321);
    assert_eq!(proposal.to_ssz().unwrap(), bytes);

    // The full encoding does not parse as a blinded block
    assert!(VersionedProposal::from_ssz(DataVersion::Capella, true, &bytes).is_err());
}

#[test]
fn test_state_projections_across_forks() {
    for version in DataVersion::ALL {
        let state = VersionedBeaconState::new(version, beacon_state(version, 4).unwrap()).unwrap();
        assert_eq!(state.slot().unwrap(), 8_000_000);
        assert_eq!(state.validators().unwrap().len(), 4);
        assert_eq!(state.balances().unwrap()[3], 32_000_000_003);
        assert_eq!(state.genesis_validators_root().unwrap(), [0x4b; 32]);

        match state.latest_execution_payload_header() {
            Ok(header) => {
                assert!(version.has_execution_payload());
                assert_eq!(header.get("block_number").and_then(|v| v.as_u64()), Some(BLOCK_NUMBER));
            }
            Err(err) => assert_eq!(err, VersionError::DataMissing("latest_execution_payload_header")),
        }

        let consolidations = state.pending_consolidations();
        if version.is_at_least(DataVersion::Electra) {
            assert_eq!(consolidations.unwrap().len(), 1);
        } else {
            assert!(consolidations.is_err());
        }

        let lookahead = state.proposer_lookahead();
        if version == DataVersion::Fulu {
            let lookahead = lookahead.unwrap();
            assert_eq!(lookahead.len(), preset::PROPOSER_LOOKAHEAD_SIZE);
            assert_eq!(lookahead[5], 1);
        } else {
            assert_eq!(lookahead, Err(VersionError::DataMissing("proposer_lookahead")));
        }
    }
}

#[test]
fn test_attestation_committee_index() {
    for version in DataVersion::ALL {
        let wrapped = VersionedAttestation::new(version, attestation(version, 64, 3).unwrap()).unwrap();
        assert_eq!(wrapped.committee_index().unwrap(), 3, "{version}");
        assert_eq!(wrapped.slot().unwrap(), 64);
        assert_eq!(wrapped.aggregation_bits().unwrap(), &[true, false, true, true]);
        assert_eq!(
            wrapped.committee_bits().is_ok(),
            version.is_at_least(DataVersion::Electra)
        );
    }
}

#[test]
fn test_wrappers_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<VersionedSignedBeaconBlock>();
    assert_send_sync::<VersionedBeaconState>();
    assert_send_sync::<VersionedProposal>();

    let block = VersionedSignedBeaconBlock::new(DataVersion::Electra, signed_block(DataVersion::Electra, 5, 1).unwrap())
        .unwrap();
    let expected = block.block_root().unwrap();

    let roots: Vec<[u8; 32]> = thread::scope(|scope| {
        let handles: Vec<_> = DataVersion::ALL
            .into_iter()
            .map(|version| {
                let block = &block;
                scope.spawn(move || {
                    // Schema construction races with the other threads
                    assert!(types::beacon_state(version).is_some());
                    block.block_root().unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(roots.iter().all(|root| *root == expected));
}
