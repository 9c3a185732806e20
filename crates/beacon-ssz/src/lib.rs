//! # Beacon SSZ
//!
//! SimpleSerialize (SSZ) encoding, Merkleization and Merkle proofs for
//! Ethereum consensus-layer objects across forks:
//! - schema-driven codec for containers, lists, vectors and bitfields
//! - hash tree roots with virtual zero-subtree padding
//! - retained Merkle trees and proofs by generalized index
//! - per-fork beacon schemas and versioned wrappers with fork-aware projections

pub mod codec;
pub mod fork;
pub mod gindex;
pub mod merkle;
pub mod proof;
pub mod schema;
pub mod tree;
pub mod types;
pub mod value;
pub mod versioned;

pub use codec::{decode, encode, size_ssz, SszError};
pub use fork::DataVersion;
pub use gindex::{concat_gindices, field_generalized_index, generalized_index, GeneralizedIndex, PathElement};
pub use merkle::hash_tree_root;
pub use proof::{prove, prove_field, verify_proof, Proof, ProofBundle};
pub use schema::{ContainerSchema, Field, SszType};
pub use tree::{Tree, TreeError};
pub use value::{Container, Value};
pub use versioned::{
    VersionError, Versioned, VersionedAttestation, VersionedBeaconBlock, VersionedBeaconState,
    VersionedBlindedBeaconBlock, VersionedProposal, VersionedSignedBeaconBlock,
    VersionedSignedBlindedBeaconBlock,
};
