//! Container Schemas
//!
//! Builds the fork-independent containers (validators, checkpoints, requests)
//! once, then derives each fork's block, body, payload and state layouts from
//! them. Both tables live behind `LazyLock` and are handed out as shared `Arc`s.

use super::preset::*;
use super::{
    BLS_PUBKEY, BLS_SIGNATURE, EXECUTION_ADDRESS, EXTRA_DATA, KZG_COMMITMENT, LOGS_BLOOM,
    PARTICIPATION_FLAGS, ROOT, TRANSACTION, UINT64, VERSION,
};
use crate::fork::DataVersion;
use crate::schema::{ContainerSchema, Field, SszType};
use std::sync::{Arc, LazyLock};

/// Containers whose layout is the same in every fork
#[derive(Debug)]
pub struct CommonSchemas {
    pub fork: Arc<ContainerSchema>,
    pub checkpoint: Arc<ContainerSchema>,
    pub validator: Arc<ContainerSchema>,
    pub attestation_data: Arc<ContainerSchema>,
    pub pending_attestation: Arc<ContainerSchema>,
    pub eth1_data: Arc<ContainerSchema>,
    pub deposit_data: Arc<ContainerSchema>,
    pub deposit: Arc<ContainerSchema>,
    pub beacon_block_header: Arc<ContainerSchema>,
    pub signed_beacon_block_header: Arc<ContainerSchema>,
    pub proposer_slashing: Arc<ContainerSchema>,
    pub voluntary_exit: Arc<ContainerSchema>,
    pub signed_voluntary_exit: Arc<ContainerSchema>,
    pub sync_aggregate: Arc<ContainerSchema>,
    pub sync_committee: Arc<ContainerSchema>,
    pub withdrawal: Arc<ContainerSchema>,
    pub bls_to_execution_change: Arc<ContainerSchema>,
    pub signed_bls_to_execution_change: Arc<ContainerSchema>,
    pub historical_summary: Arc<ContainerSchema>,
    pub deposit_request: Arc<ContainerSchema>,
    pub withdrawal_request: Arc<ContainerSchema>,
    pub consolidation_request: Arc<ContainerSchema>,
    pub pending_deposit: Arc<ContainerSchema>,
    pub pending_partial_withdrawal: Arc<ContainerSchema>,
    pub pending_consolidation: Arc<ContainerSchema>,
}

/// Containers that changed at least once across forks, for one fork.
///
/// Execution-layer and blinded schemas are `None` before Bellatrix;
/// `execution_requests` is `None` before Electra.
#[derive(Debug)]
pub struct ForkSchemas {
    pub version: DataVersion,
    pub attestation: Arc<ContainerSchema>,
    pub indexed_attestation: Arc<ContainerSchema>,
    pub attester_slashing: Arc<ContainerSchema>,
    pub execution_payload: Option<Arc<ContainerSchema>>,
    pub execution_payload_header: Option<Arc<ContainerSchema>>,
    pub execution_requests: Option<Arc<ContainerSchema>>,
    pub beacon_block_body: Arc<ContainerSchema>,
    pub beacon_block: Arc<ContainerSchema>,
    pub signed_beacon_block: Arc<ContainerSchema>,
    pub blinded_beacon_block_body: Option<Arc<ContainerSchema>>,
    pub blinded_beacon_block: Option<Arc<ContainerSchema>>,
    pub signed_blinded_beacon_block: Option<Arc<ContainerSchema>>,
    pub beacon_state: Arc<ContainerSchema>,
}

static COMMON: LazyLock<CommonSchemas> = LazyLock::new(CommonSchemas::build);

static FORKS: LazyLock<Vec<ForkSchemas>> =
    LazyLock::new(|| DataVersion::ALL.into_iter().map(ForkSchemas::build).collect());

/// Fork-independent schemas
#[must_use]
pub fn common() -> &'static CommonSchemas {
    &COMMON
}

/// Schemas of one fork; `None` for `DataVersion::Unknown`
#[must_use]
pub fn fork_schemas(version: DataVersion) -> Option<&'static ForkSchemas> {
    FORKS.iter().find(|schemas| schemas.version == version)
}

fn container(schema: &Arc<ContainerSchema>) -> SszType {
    SszType::container(schema)
}

impl CommonSchemas {
    fn build() -> Self {
        let fork = ContainerSchema::new(
            "Fork",
            vec![
                Field::new("previous_version", VERSION),
                Field::new("current_version", VERSION),
                Field::new("epoch", UINT64),
            ],
        );
        let checkpoint = ContainerSchema::new(
            "Checkpoint",
            vec![Field::new("epoch", UINT64), Field::new("root", ROOT)],
        );
        let validator = ContainerSchema::new(
            "Validator",
            vec![
                Field::new("pubkey", BLS_PUBKEY),
                Field::new("withdrawal_credentials", ROOT),
                Field::new("effective_balance", UINT64),
                Field::new("slashed", SszType::BOOL),
                Field::new("activation_eligibility_epoch", UINT64),
                Field::new("activation_epoch", UINT64),
                Field::new("exit_epoch", UINT64),
                Field::new("withdrawable_epoch", UINT64),
            ],
        );
        let attestation_data = ContainerSchema::new(
            "AttestationData",
            vec![
                Field::new("slot", UINT64),
                Field::new("index", UINT64),
                Field::new("beacon_block_root", ROOT),
                Field::new("source", container(&checkpoint)),
                Field::new("target", container(&checkpoint)),
            ],
        );
        let pending_attestation = ContainerSchema::new(
            "PendingAttestation",
            vec![
                Field::new("aggregation_bits", SszType::Bitlist(MAX_VALIDATORS_PER_COMMITTEE)),
                Field::new("data", container(&attestation_data)),
                Field::new("inclusion_delay", UINT64),
                Field::new("proposer_index", UINT64),
            ],
        );
        let eth1_data = ContainerSchema::new(
            "Eth1Data",
            vec![
                Field::new("deposit_root", ROOT),
                Field::new("deposit_count", UINT64),
                Field::new("block_hash", ROOT),
            ],
        );
        let deposit_data = ContainerSchema::new(
            "DepositData",
            vec![
                Field::new("pubkey", BLS_PUBKEY),
                Field::new("withdrawal_credentials", ROOT),
                Field::new("amount", UINT64),
                Field::new("signature", BLS_SIGNATURE),
            ],
        );
        let deposit = ContainerSchema::new(
            "Deposit",
            vec![
                Field::new("proof", SszType::vector(ROOT, DEPOSIT_CONTRACT_TREE_DEPTH + 1)),
                Field::new("data", container(&deposit_data)),
            ],
        );
        let beacon_block_header = ContainerSchema::new(
            "BeaconBlockHeader",
            vec![
                Field::new("slot", UINT64),
                Field::new("proposer_index", UINT64),
                Field::new("parent_root", ROOT),
                Field::new("state_root", ROOT),
                Field::new("body_root", ROOT),
            ],
        );
        let signed_beacon_block_header = ContainerSchema::new(
            "SignedBeaconBlockHeader",
            vec![
                Field::new("message", container(&beacon_block_header)),
                Field::new("signature", BLS_SIGNATURE),
            ],
        );
        let proposer_slashing = ContainerSchema::new(
            "ProposerSlashing",
            vec![
                Field::new("signed_header_1", container(&signed_beacon_block_header)),
                Field::new("signed_header_2", container(&signed_beacon_block_header)),
            ],
        );
        let voluntary_exit = ContainerSchema::new(
            "VoluntaryExit",
            vec![Field::new("epoch", UINT64), Field::new("validator_index", UINT64)],
        );
        let signed_voluntary_exit = ContainerSchema::new(
            "SignedVoluntaryExit",
            vec![
                Field::new("message", container(&voluntary_exit)),
                Field::new("signature", BLS_SIGNATURE),
            ],
        );
        let sync_aggregate = ContainerSchema::new(
            "SyncAggregate",
            vec![
                Field::new("sync_committee_bits", SszType::Bitvector(SYNC_COMMITTEE_SIZE)),
                Field::new("sync_committee_signature", BLS_SIGNATURE),
            ],
        );
        let sync_committee = ContainerSchema::new(
            "SyncCommittee",
            vec![
                Field::new("pubkeys", SszType::vector(BLS_PUBKEY, SYNC_COMMITTEE_SIZE)),
                Field::new("aggregate_pubkey", BLS_PUBKEY),
            ],
        );
        let withdrawal = ContainerSchema::new(
            "Withdrawal",
            vec![
                Field::new("index", UINT64),
                Field::new("validator_index", UINT64),
                Field::new("address", EXECUTION_ADDRESS),
                Field::new("amount", UINT64),
            ],
        );
        let bls_to_execution_change = ContainerSchema::new(
            "BLSToExecutionChange",
            vec![
                Field::new("validator_index", UINT64),
                Field::new("from_bls_pubkey", BLS_PUBKEY),
                Field::new("to_execution_address", EXECUTION_ADDRESS),
            ],
        );
        let signed_bls_to_execution_change = ContainerSchema::new(
            "SignedBLSToExecutionChange",
            vec![
                Field::new("message", container(&bls_to_execution_change)),
                Field::new("signature", BLS_SIGNATURE),
            ],
        );
        let historical_summary = ContainerSchema::new(
            "HistoricalSummary",
            vec![
                Field::new("block_summary_root", ROOT),
                Field::new("state_summary_root", ROOT),
            ],
        );
        let deposit_request = ContainerSchema::new(
            "DepositRequest",
            vec![
                Field::new("pubkey", BLS_PUBKEY),
                Field::new("withdrawal_credentials", ROOT),
                Field::new("amount", UINT64),
                Field::new("signature", BLS_SIGNATURE),
                Field::new("index", UINT64),
            ],
        );
        let withdrawal_request = ContainerSchema::new(
            "WithdrawalRequest",
            vec![
                Field::new("source_address", EXECUTION_ADDRESS),
                Field::new("validator_pubkey", BLS_PUBKEY),
                Field::new("amount", UINT64),
            ],
        );
        let consolidation_request = ContainerSchema::new(
            "ConsolidationRequest",
            vec![
                Field::new("source_address", EXECUTION_ADDRESS),
                Field::new("source_pubkey", BLS_PUBKEY),
                Field::new("target_pubkey", BLS_PUBKEY),
            ],
        );
        let pending_deposit = ContainerSchema::new(
            "PendingDeposit",
            vec![
                Field::new("pubkey", BLS_PUBKEY),
                Field::new("withdrawal_credentials", ROOT),
                Field::new("amount", UINT64),
                Field::new("signature", BLS_SIGNATURE),
                Field::new("slot", UINT64),
            ],
        );
        let pending_partial_withdrawal = ContainerSchema::new(
            "PendingPartialWithdrawal",
            vec![
                Field::new("validator_index", UINT64),
                Field::new("amount", UINT64),
                Field::new("withdrawable_epoch", UINT64),
            ],
        );
        let pending_consolidation = ContainerSchema::new(
            "PendingConsolidation",
            vec![
                Field::new("source_index", UINT64),
                Field::new("target_index", UINT64),
            ],
        );

        Self {
            fork,
            checkpoint,
            validator,
            attestation_data,
            pending_attestation,
            eth1_data,
            deposit_data,
            deposit,
            beacon_block_header,
            signed_beacon_block_header,
            proposer_slashing,
            voluntary_exit,
            signed_voluntary_exit,
            sync_aggregate,
            sync_committee,
            withdrawal,
            bls_to_execution_change,
            signed_bls_to_execution_change,
            historical_summary,
            deposit_request,
            withdrawal_request,
            consolidation_request,
            pending_deposit,
            pending_partial_withdrawal,
            pending_consolidation,
        }
    }
}

impl ForkSchemas {
    fn build(version: DataVersion) -> Self {
        let common = common();
        let named = |name: &str| format!("{}{name}", version.title());
        let electra = version.is_at_least(DataVersion::Electra);

        let (aggregation_bits, attesting_indices) = if electra {
            let limit = MAX_VALIDATORS_PER_COMMITTEE * MAX_COMMITTEES_PER_SLOT;
            (SszType::Bitlist(limit), SszType::list(UINT64, limit))
        } else {
            (
                SszType::Bitlist(MAX_VALIDATORS_PER_COMMITTEE),
                SszType::list(UINT64, MAX_VALIDATORS_PER_COMMITTEE),
            )
        };

        let mut attestation_fields = vec![
            Field::new("aggregation_bits", aggregation_bits),
            Field::new("data", container(&common.attestation_data)),
            Field::new("signature", BLS_SIGNATURE),
        ];
        if electra {
            attestation_fields.push(Field::new("committee_bits", SszType::Bitvector(MAX_COMMITTEES_PER_SLOT)));
        }
        let attestation = ContainerSchema::new(named("Attestation"), attestation_fields);

        let indexed_attestation = ContainerSchema::new(
            named("IndexedAttestation"),
            vec![
                Field::new("attesting_indices", attesting_indices),
                Field::new("data", container(&common.attestation_data)),
                Field::new("signature", BLS_SIGNATURE),
            ],
        );
        let attester_slashing = ContainerSchema::new(
            named("AttesterSlashing"),
            vec![
                Field::new("attestation_1", container(&indexed_attestation)),
                Field::new("attestation_2", container(&indexed_attestation)),
            ],
        );

        let execution_payload = version.has_execution_payload().then(|| {
            ContainerSchema::new(named("ExecutionPayload"), execution_payload_fields(version, false))
        });
        let execution_payload_header = version.has_execution_payload().then(|| {
            ContainerSchema::new(
                named("ExecutionPayloadHeader"),
                execution_payload_fields(version, true),
            )
        });
        let execution_requests = electra.then(|| {
            ContainerSchema::new(
                named("ExecutionRequests"),
                vec![
                    Field::new(
                        "deposits",
                        SszType::list(container(&common.deposit_request), MAX_DEPOSIT_REQUESTS_PER_PAYLOAD),
                    ),
                    Field::new(
                        "withdrawals",
                        SszType::list(
                            container(&common.withdrawal_request),
                            MAX_WITHDRAWAL_REQUESTS_PER_PAYLOAD,
                        ),
                    ),
                    Field::new(
                        "consolidations",
                        SszType::list(
                            container(&common.consolidation_request),
                            MAX_CONSOLIDATION_REQUESTS_PER_PAYLOAD,
                        ),
                    ),
                ],
            )
        });

        let body_parts = BodyParts {
            version,
            attestation: &attestation,
            attester_slashing: &attester_slashing,
            execution_requests: execution_requests.as_ref(),
        };
        let beacon_block_body = ContainerSchema::new(
            named("BeaconBlockBody"),
            body_parts.fields(execution_payload.as_ref().map(|payload| Field::new("execution_payload", container(payload)))),
        );
        let blinded_beacon_block_body = execution_payload_header.as_ref().map(|header| {
            ContainerSchema::new(
                named("BlindedBeaconBlockBody"),
                body_parts.fields(Some(Field::new("execution_payload_header", container(header)))),
            )
        });

        let beacon_block = block_schema(&named("BeaconBlock"), &beacon_block_body);
        let signed_beacon_block = signed_schema(&named("SignedBeaconBlock"), &beacon_block);
        let blinded_beacon_block = blinded_beacon_block_body
            .as_ref()
            .map(|body| block_schema(&named("BlindedBeaconBlock"), body));
        let signed_blinded_beacon_block = blinded_beacon_block
            .as_ref()
            .map(|block| signed_schema(&named("SignedBlindedBeaconBlock"), block));

        let beacon_state = ContainerSchema::new(
            named("BeaconState"),
            beacon_state_fields(version, execution_payload_header.as_ref()),
        );

        Self {
            version,
            attestation,
            indexed_attestation,
            attester_slashing,
            execution_payload,
            execution_payload_header,
            execution_requests,
            beacon_block_body,
            beacon_block,
            signed_beacon_block,
            blinded_beacon_block_body,
            blinded_beacon_block,
            signed_blinded_beacon_block,
            beacon_state,
        }
    }
}

/// Execution payload fields; the header form replaces the lists by their roots
fn execution_payload_fields(version: DataVersion, header: bool) -> Vec<Field> {
    let mut fields = vec![
        Field::new("parent_hash", ROOT),
        Field::new("fee_recipient", EXECUTION_ADDRESS),
        Field::new("state_root", ROOT),
        Field::new("receipts_root", ROOT),
        Field::new("logs_bloom", LOGS_BLOOM),
        Field::new("prev_randao", ROOT),
        Field::new("block_number", UINT64),
        Field::new("gas_limit", UINT64),
        Field::new("gas_used", UINT64),
        Field::new("timestamp", UINT64),
        Field::new("extra_data", EXTRA_DATA),
        Field::new("base_fee_per_gas", SszType::U256),
        Field::new("block_hash", ROOT),
    ];
    if header {
        fields.push(Field::new("transactions_root", ROOT));
    } else {
        fields.push(Field::new(
            "transactions",
            SszType::list(TRANSACTION, MAX_TRANSACTIONS_PER_PAYLOAD),
        ));
    }
    if version.is_at_least(DataVersion::Capella) {
        if header {
            fields.push(Field::new("withdrawals_root", ROOT));
        } else {
            fields.push(Field::new(
                "withdrawals",
                SszType::list(container(&common().withdrawal), MAX_WITHDRAWALS_PER_PAYLOAD),
            ));
        }
    }
    if version.is_at_least(DataVersion::Deneb) {
        fields.push(Field::new("blob_gas_used", UINT64));
        fields.push(Field::new("excess_blob_gas", UINT64));
    }
    fields
}

/// Fork-specific pieces of a block body
struct BodyParts<'a> {
    version: DataVersion,
    attestation: &'a Arc<ContainerSchema>,
    attester_slashing: &'a Arc<ContainerSchema>,
    execution_requests: Option<&'a Arc<ContainerSchema>>,
}

impl BodyParts<'_> {
    /// Body fields with `execution` (full payload or header) in its slot
    fn fields(&self, execution: Option<Field>) -> Vec<Field> {
        let common = common();
        let (max_attester_slashings, max_attestations) = if self.version.is_at_least(DataVersion::Electra) {
            (MAX_ATTESTER_SLASHINGS_ELECTRA, MAX_ATTESTATIONS_ELECTRA)
        } else {
            (MAX_ATTESTER_SLASHINGS, MAX_ATTESTATIONS)
        };

        let mut fields = vec![
            Field::new("randao_reveal", BLS_SIGNATURE),
            Field::new("eth1_data", container(&common.eth1_data)),
            Field::new("graffiti", ROOT),
            Field::new(
                "proposer_slashings",
                SszType::list(container(&common.proposer_slashing), MAX_PROPOSER_SLASHINGS),
            ),
            Field::new(
                "attester_slashings",
                SszType::list(container(self.attester_slashing), max_attester_slashings),
            ),
            Field::new("attestations", SszType::list(container(self.attestation), max_attestations)),
            Field::new("deposits", SszType::list(container(&common.deposit), MAX_DEPOSITS)),
            Field::new(
                "voluntary_exits",
                SszType::list(container(&common.signed_voluntary_exit), MAX_VOLUNTARY_EXITS),
            ),
        ];
        if self.version.is_at_least(DataVersion::Altair) {
            fields.push(Field::new("sync_aggregate", container(&common.sync_aggregate)));
        }
        fields.extend(execution);
        if self.version.is_at_least(DataVersion::Capella) {
            fields.push(Field::new(
                "bls_to_execution_changes",
                SszType::list(
                    container(&common.signed_bls_to_execution_change),
                    MAX_BLS_TO_EXECUTION_CHANGES,
                ),
            ));
        }
        if self.version.is_at_least(DataVersion::Deneb) {
            fields.push(Field::new(
                "blob_kzg_commitments",
                SszType::list(KZG_COMMITMENT, MAX_BLOB_COMMITMENTS_PER_BLOCK),
            ));
        }
        if let Some(requests) = self.execution_requests {
            fields.push(Field::new("execution_requests", container(requests)));
        }
        fields
    }
}

fn block_schema(name: &str, body: &Arc<ContainerSchema>) -> Arc<ContainerSchema> {
    ContainerSchema::new(
        name,
        vec![
            Field::new("slot", UINT64),
            Field::new("proposer_index", UINT64),
            Field::new("parent_root", ROOT),
            Field::new("state_root", ROOT),
            Field::new("body", container(body)),
        ],
    )
}

fn signed_schema(name: &str, message: &Arc<ContainerSchema>) -> Arc<ContainerSchema> {
    ContainerSchema::new(
        name,
        vec![
            Field::new("message", container(message)),
            Field::new("signature", BLS_SIGNATURE),
        ],
    )
}

fn beacon_state_fields(version: DataVersion, payload_header: Option<&Arc<ContainerSchema>>) -> Vec<Field> {
    let common = common();
    let mut fields = vec![
        Field::new("genesis_time", UINT64),
        Field::new("genesis_validators_root", ROOT),
        Field::new("slot", UINT64),
        Field::new("fork", container(&common.fork)),
        Field::new("latest_block_header", container(&common.beacon_block_header)),
        Field::new("block_roots", SszType::vector(ROOT, SLOTS_PER_HISTORICAL_ROOT)),
        Field::new("state_roots", SszType::vector(ROOT, SLOTS_PER_HISTORICAL_ROOT)),
        Field::new("historical_roots", SszType::list(ROOT, HISTORICAL_ROOTS_LIMIT)),
        Field::new("eth1_data", container(&common.eth1_data)),
        Field::new(
            "eth1_data_votes",
            SszType::list(container(&common.eth1_data), ETH1_DATA_VOTES_LIMIT),
        ),
        Field::new("eth1_deposit_index", UINT64),
        Field::new(
            "validators",
            SszType::list(container(&common.validator), VALIDATOR_REGISTRY_LIMIT),
        ),
        Field::new("balances", SszType::list(UINT64, VALIDATOR_REGISTRY_LIMIT)),
        Field::new("randao_mixes", SszType::vector(ROOT, EPOCHS_PER_HISTORICAL_VECTOR)),
        Field::new("slashings", SszType::vector(UINT64, EPOCHS_PER_SLASHINGS_VECTOR)),
    ];

    if version.is_at_least(DataVersion::Altair) {
        let participation = SszType::list(PARTICIPATION_FLAGS, VALIDATOR_REGISTRY_LIMIT);
        fields.push(Field::new("previous_epoch_participation", participation.clone()));
        fields.push(Field::new("current_epoch_participation", participation));
    } else {
        let attestations = SszType::list(
            container(&common.pending_attestation),
            MAX_ATTESTATIONS * SLOTS_PER_EPOCH,
        );
        fields.push(Field::new("previous_epoch_attestations", attestations.clone()));
        fields.push(Field::new("current_epoch_attestations", attestations));
    }

    fields.extend([
        Field::new("justification_bits", SszType::Bitvector(JUSTIFICATION_BITS_LENGTH)),
        Field::new("previous_justified_checkpoint", container(&common.checkpoint)),
        Field::new("current_justified_checkpoint", container(&common.checkpoint)),
        Field::new("finalized_checkpoint", container(&common.checkpoint)),
    ]);

    if version.is_at_least(DataVersion::Altair) {
        fields.extend([
            Field::new("inactivity_scores", SszType::list(UINT64, VALIDATOR_REGISTRY_LIMIT)),
            Field::new("current_sync_committee", container(&common.sync_committee)),
            Field::new("next_sync_committee", container(&common.sync_committee)),
        ]);
    }
    if let Some(header) = payload_header {
        fields.push(Field::new("latest_execution_payload_header", container(header)));
    }
    if version.is_at_least(DataVersion::Capella) {
        fields.extend([
            Field::new("next_withdrawal_index", UINT64),
            Field::new("next_withdrawal_validator_index", UINT64),
            Field::new(
                "historical_summaries",
                SszType::list(container(&common.historical_summary), HISTORICAL_ROOTS_LIMIT),
            ),
        ]);
    }
    if version.is_at_least(DataVersion::Electra) {
        fields.extend([
            Field::new("deposit_requests_start_index", UINT64),
            Field::new("deposit_balance_to_consume", UINT64),
            Field::new("exit_balance_to_consume", UINT64),
            Field::new("earliest_exit_epoch", UINT64),
            Field::new("consolidation_balance_to_consume", UINT64),
            Field::new("earliest_consolidation_epoch", UINT64),
            Field::new(
                "pending_deposits",
                SszType::list(container(&common.pending_deposit), PENDING_DEPOSITS_LIMIT),
            ),
            Field::new(
                "pending_partial_withdrawals",
                SszType::list(
                    container(&common.pending_partial_withdrawal),
                    PENDING_PARTIAL_WITHDRAWALS_LIMIT,
                ),
            ),
            Field::new(
                "pending_consolidations",
                SszType::list(
                    container(&common.pending_consolidation),
                    PENDING_CONSOLIDATIONS_LIMIT,
                ),
            ),
        ]);
    }
    if version.is_at_least(DataVersion::Fulu) {
        fields.push(Field::new(
            "proposer_lookahead",
            SszType::vector(UINT64, PROPOSER_LOOKAHEAD_SIZE),
        ));
    }
    fields
}

fn select(
    version: DataVersion,
    pick: impl FnOnce(&'static ForkSchemas) -> Option<&'static Arc<ContainerSchema>>,
) -> Option<Arc<ContainerSchema>> {
    fork_schemas(version).and_then(pick).map(Arc::clone)
}

#[must_use]
pub fn attestation(version: DataVersion) -> Option<Arc<ContainerSchema>> {
    select(version, |schemas| Some(&schemas.attestation))
}

#[must_use]
pub fn execution_payload(version: DataVersion) -> Option<Arc<ContainerSchema>> {
    select(version, |schemas| schemas.execution_payload.as_ref())
}

#[must_use]
pub fn execution_payload_header(version: DataVersion) -> Option<Arc<ContainerSchema>> {
    select(version, |schemas| schemas.execution_payload_header.as_ref())
}

#[must_use]
pub fn beacon_block_body(version: DataVersion) -> Option<Arc<ContainerSchema>> {
    select(version, |schemas| Some(&schemas.beacon_block_body))
}

#[must_use]
pub fn blinded_beacon_block_body(version: DataVersion) -> Option<Arc<ContainerSchema>> {
    select(version, |schemas| schemas.blinded_beacon_block_body.as_ref())
}

#[must_use]
pub fn beacon_block(version: DataVersion) -> Option<Arc<ContainerSchema>> {
    select(version, |schemas| Some(&schemas.beacon_block))
}

#[must_use]
pub fn blinded_beacon_block(version: DataVersion) -> Option<Arc<ContainerSchema>> {
    select(version, |schemas| schemas.blinded_beacon_block.as_ref())
}

#[must_use]
pub fn signed_beacon_block(version: DataVersion) -> Option<Arc<ContainerSchema>> {
    select(version, |schemas| Some(&schemas.signed_beacon_block))
}

#[must_use]
pub fn signed_blinded_beacon_block(version: DataVersion) -> Option<Arc<ContainerSchema>> {
    select(version, |schemas| schemas.signed_blinded_beacon_block.as_ref())
}

#[must_use]
pub fn beacon_state(version: DataVersion) -> Option<Arc<ContainerSchema>> {
    select(version, |schemas| Some(&schemas.beacon_state))
}
