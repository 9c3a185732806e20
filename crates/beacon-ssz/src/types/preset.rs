//! Preset constants - only one of `mainnet` and `minimal` should be active

#[cfg(feature = "minimal")]
mod values {
    /// Slots per epoch in minimal preset
    pub const SLOTS_PER_EPOCH: usize = 8;
    pub const SLOTS_PER_HISTORICAL_ROOT: usize = 64;
    pub const EPOCHS_PER_HISTORICAL_VECTOR: usize = 64;
    pub const EPOCHS_PER_SLASHINGS_VECTOR: usize = 64;
    pub const EPOCHS_PER_ETH1_VOTING_PERIOD: usize = 4;
    pub const MAX_COMMITTEES_PER_SLOT: usize = 4;
    pub const SYNC_COMMITTEE_SIZE: usize = 32;
    pub const MAX_WITHDRAWALS_PER_PAYLOAD: usize = 4;
    pub const MAX_BLOB_COMMITMENTS_PER_BLOCK: usize = 32;
    pub const PENDING_PARTIAL_WITHDRAWALS_LIMIT: usize = 64;
    /// Pending consolidations limit for minimal preset (2^6 = 64)
    pub const PENDING_CONSOLIDATIONS_LIMIT: usize = 64;
    pub const MAX_DEPOSIT_REQUESTS_PER_PAYLOAD: usize = 4;
    pub const MAX_WITHDRAWAL_REQUESTS_PER_PAYLOAD: usize = 2;
}

#[cfg(not(feature = "minimal"))]
mod values {
    /// Slots per epoch on mainnet
    pub const SLOTS_PER_EPOCH: usize = 32;
    pub const SLOTS_PER_HISTORICAL_ROOT: usize = 8192;
    pub const EPOCHS_PER_HISTORICAL_VECTOR: usize = 65_536;
    pub const EPOCHS_PER_SLASHINGS_VECTOR: usize = 8192;
    pub const EPOCHS_PER_ETH1_VOTING_PERIOD: usize = 64;
    pub const MAX_COMMITTEES_PER_SLOT: usize = 64;
    pub const SYNC_COMMITTEE_SIZE: usize = 512;
    pub const MAX_WITHDRAWALS_PER_PAYLOAD: usize = 16;
    pub const MAX_BLOB_COMMITMENTS_PER_BLOCK: usize = 4096;
    /// Pending partial withdrawals (2^27)
    pub const PENDING_PARTIAL_WITHDRAWALS_LIMIT: usize = 134_217_728;
    /// Maximum pending consolidations (2^18)
    pub const PENDING_CONSOLIDATIONS_LIMIT: usize = 262_144;
    pub const MAX_DEPOSIT_REQUESTS_PER_PAYLOAD: usize = 8192;
    pub const MAX_WITHDRAWAL_REQUESTS_PER_PAYLOAD: usize = 16;
}

pub use values::*;

/// Maximum number of validators (2^40)
pub const VALIDATOR_REGISTRY_LIMIT: usize = 1_099_511_627_776;
/// 2^24
pub const HISTORICAL_ROOTS_LIMIT: usize = 16_777_216;
pub const MAX_VALIDATORS_PER_COMMITTEE: usize = 2048;
pub const DEPOSIT_CONTRACT_TREE_DEPTH: usize = 32;
pub const JUSTIFICATION_BITS_LENGTH: usize = 4;
pub const MIN_SEED_LOOKAHEAD: usize = 1;

pub const MAX_PROPOSER_SLASHINGS: usize = 16;
pub const MAX_ATTESTER_SLASHINGS: usize = 2;
pub const MAX_ATTESTATIONS: usize = 128;
pub const MAX_DEPOSITS: usize = 16;
pub const MAX_VOLUNTARY_EXITS: usize = 16;
pub const MAX_BLS_TO_EXECUTION_CHANGES: usize = 16;
pub const MAX_ATTESTER_SLASHINGS_ELECTRA: usize = 1;
pub const MAX_ATTESTATIONS_ELECTRA: usize = 8;

pub const BYTES_PER_LOGS_BLOOM: usize = 256;
pub const MAX_EXTRA_DATA_BYTES: usize = 32;
/// 2^30
pub const MAX_BYTES_PER_TRANSACTION: usize = 1_073_741_824;
/// 2^20
pub const MAX_TRANSACTIONS_PER_PAYLOAD: usize = 1_048_576;

/// 2^27
pub const PENDING_DEPOSITS_LIMIT: usize = 134_217_728;
pub const MAX_CONSOLIDATION_REQUESTS_PER_PAYLOAD: usize = 2;

/// Length of `eth1_data_votes`
pub const ETH1_DATA_VOTES_LIMIT: usize = EPOCHS_PER_ETH1_VOTING_PERIOD * SLOTS_PER_EPOCH;
/// Length of a Fulu `proposer_lookahead`
pub const PROPOSER_LOOKAHEAD_SIZE: usize = (MIN_SEED_LOOKAHEAD + 1) * SLOTS_PER_EPOCH;
