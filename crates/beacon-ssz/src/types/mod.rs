//! Beacon Chain Schemas
//!
//! Field layouts of the consensus-layer containers for every supported fork.
//! Schemas are built once on first use and shared for the rest of the process.

mod containers;
pub mod preset;

pub use containers::*;

use crate::schema::SszType;

/// `Root`, `Hash32`, `Bytes32`
pub const ROOT: SszType = SszType::ByteVector(32);
/// `BLSPubkey`
pub const BLS_PUBKEY: SszType = SszType::ByteVector(48);
/// `BLSSignature`
pub const BLS_SIGNATURE: SszType = SszType::ByteVector(96);
/// `ExecutionAddress`
pub const EXECUTION_ADDRESS: SszType = SszType::ByteVector(20);
/// `KZGCommitment`
pub const KZG_COMMITMENT: SszType = SszType::ByteVector(48);
/// `Version`
pub const VERSION: SszType = SszType::ByteVector(4);
/// `Slot`, `Epoch`, `ValidatorIndex`, `Gwei`, `CommitteeIndex`
pub const UINT64: SszType = SszType::U64;
/// `ParticipationFlags`
pub const PARTICIPATION_FLAGS: SszType = SszType::U8;
pub const LOGS_BLOOM: SszType = SszType::ByteVector(preset::BYTES_PER_LOGS_BLOOM);
pub const EXTRA_DATA: SszType = SszType::ByteList(preset::MAX_EXTRA_DATA_BYTES);
pub const TRANSACTION: SszType = SszType::ByteList(preset::MAX_BYTES_PER_TRANSACTION);
