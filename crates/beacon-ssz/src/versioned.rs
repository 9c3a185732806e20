//! Versioned Beacon Objects
//!
//! A versioned wrapper pairs a [`DataVersion`] tag with at most one container
//! whose schema is the tag's schema for that kind of object. Projections such
//! as [`Versioned::slot`] resolve the tag first and then read the field from
//! the per-fork container, so callers never match on the fork themselves.
//!
//! Lookups fail instead of returning zero values:
//! - `UnsupportedVersion` when the kind has no schema for the tag
//! - `DataMissing` when the payload is absent or the fork predates the field
//! - `BlindedMismatch` when a field only exists on the other blinded variant

use crate::codec::SszError;
use crate::fork::DataVersion;
use crate::schema::ContainerSchema;
use crate::types;
use crate::value::{Container, Value};
use std::marker::PhantomData;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors from versioned dispatch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("{kind} has no schema for version {version}")]
    UnsupportedVersion { kind: &'static str, version: DataVersion },

    #[error("Data missing: {0}")]
    DataMissing(&'static str),

    #[error("{field} is not available on a {} block", axis(*.blinded))]
    BlindedMismatch { field: &'static str, blinded: bool },

    #[error("Schema mismatch: expected {expected}, got {got}")]
    SchemaMismatch { expected: String, got: String },

    #[error(transparent)]
    Ssz(#[from] SszError),
}

fn axis(blinded: bool) -> &'static str {
    if blinded {
        "blinded"
    } else {
        "full"
    }
}

/// A kind of beacon object that has one schema per supported fork
pub trait VersionedKind {
    const NAME: &'static str;

    /// Schema for `version`, `None` if the kind did not exist at that fork
    fn schema(version: DataVersion) -> Option<Arc<ContainerSchema>>;
}

/// Beacon block kinds, along the signed and blinded axes
pub trait BlockKind: VersionedKind {
    const SIGNED: bool;
    const BLINDED: bool;
}

macro_rules! block_kind {
    ($kind:ident, $name:literal, $schema:path, signed: $signed:literal, blinded: $blinded:literal) => {
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $kind;

        impl VersionedKind for $kind {
            const NAME: &'static str = $name;

            fn schema(version: DataVersion) -> Option<Arc<ContainerSchema>> {
                $schema(version)
            }
        }

        impl BlockKind for $kind {
            const SIGNED: bool = $signed;
            const BLINDED: bool = $blinded;
        }
    };
}

block_kind!(SignedBeaconBlockKind, "SignedBeaconBlock", types::signed_beacon_block, signed: true, blinded: false);
block_kind!(
    SignedBlindedBeaconBlockKind,
    "SignedBlindedBeaconBlock",
    types::signed_blinded_beacon_block,
    signed: true,
    blinded: true
);
block_kind!(BeaconBlockKind, "BeaconBlock", types::beacon_block, signed: false, blinded: false);
block_kind!(BlindedBeaconBlockKind, "BlindedBeaconBlock", types::blinded_beacon_block, signed: false, blinded: true);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BeaconStateKind;

impl VersionedKind for BeaconStateKind {
    const NAME: &'static str = "BeaconState";

    fn schema(version: DataVersion) -> Option<Arc<ContainerSchema>> {
        types::beacon_state(version)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttestationKind;

impl VersionedKind for AttestationKind {
    const NAME: &'static str = "Attestation";

    fn schema(version: DataVersion) -> Option<Arc<ContainerSchema>> {
        types::attestation(version)
    }
}

pub type VersionedSignedBeaconBlock = Versioned<SignedBeaconBlockKind>;
pub type VersionedSignedBlindedBeaconBlock = Versioned<SignedBlindedBeaconBlockKind>;
pub type VersionedBeaconBlock = Versioned<BeaconBlockKind>;
pub type VersionedBlindedBeaconBlock = Versioned<BlindedBeaconBlockKind>;
pub type VersionedBeaconState = Versioned<BeaconStateKind>;
pub type VersionedAttestation = Versioned<AttestationKind>;

/// A version tag and at most one payload of that version's schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<K> {
    version: DataVersion,
    data: Option<Container>,
    kind: PhantomData<K>,
}

impl<K> Default for Versioned<K> {
    fn default() -> Self {
        Self {
            version: DataVersion::Unknown,
            data: None,
            kind: PhantomData,
        }
    }
}

// Field access shared by every projection

fn field<'a>(container: &'a Container, name: &'static str) -> Result<&'a Value, VersionError> {
    container.get(name).ok_or(VersionError::DataMissing(name))
}

fn child<'a>(container: &'a Container, name: &'static str) -> Result<&'a Container, VersionError> {
    field(container, name)?
        .as_container()
        .ok_or(VersionError::DataMissing(name))
}

fn uint(container: &Container, name: &'static str) -> Result<u64, VersionError> {
    field(container, name)?.as_u64().ok_or(VersionError::DataMissing(name))
}

fn bytes<const N: usize>(container: &Container, name: &'static str) -> Result<[u8; N], VersionError> {
    field(container, name)?
        .as_byte_array::<N>()
        .ok_or(VersionError::DataMissing(name))
}

fn list<'a>(container: &'a Container, name: &'static str) -> Result<&'a [Value], VersionError> {
    field(container, name)?.as_list().ok_or(VersionError::DataMissing(name))
}

fn bits<'a>(container: &'a Container, name: &'static str) -> Result<&'a [bool], VersionError> {
    field(container, name)?.as_bits().ok_or(VersionError::DataMissing(name))
}

fn uints(container: &Container, name: &'static str) -> Result<Vec<u64>, VersionError> {
    list(container, name)?
        .iter()
        .map(|value| value.as_u64().ok_or(VersionError::DataMissing(name)))
        .collect()
}

impl<K: VersionedKind> Versioned<K> {
    fn schema_for(version: DataVersion) -> Result<Arc<ContainerSchema>, VersionError> {
        K::schema(version).ok_or(VersionError::UnsupportedVersion {
            kind: K::NAME,
            version,
        })
    }

    /// Wrap a container, checking its schema is the one `version` defines
    ///
    /// # Errors
    /// Returns `UnsupportedVersion` or `SchemaMismatch`.
    pub fn new(version: DataVersion, data: Container) -> Result<Self, VersionError> {
        let schema = Self::schema_for(version)?;
        if data.schema() != &schema {
            return Err(VersionError::SchemaMismatch {
                expected: schema.name().to_string(),
                got: data.name().to_string(),
            });
        }
        Ok(Self {
            version,
            data: Some(data),
            kind: PhantomData,
        })
    }

    /// A tagged wrapper without payload
    #[must_use]
    pub fn empty(version: DataVersion) -> Self {
        Self {
            version,
            data: None,
            kind: PhantomData,
        }
    }

    /// Decode the SSZ bytes of the given fork's variant
    ///
    /// # Errors
    /// Returns `UnsupportedVersion` or the decode error.
    #[instrument(level = "debug", skip(bytes), fields(kind = K::NAME, len = bytes.len()))]
    pub fn from_ssz(version: DataVersion, bytes: &[u8]) -> Result<Self, VersionError> {
        let schema = Self::schema_for(version)?;
        let data = Container::from_ssz(&schema, bytes).map_err(|e| {
            debug!(error = %e, "rejected versioned decode");
            e
        })?;
        Ok(Self {
            version,
            data: Some(data),
            kind: PhantomData,
        })
    }

    #[must_use]
    pub fn version(&self) -> DataVersion {
        self.version
    }

    /// True iff no payload is populated, whatever the tag
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }

    /// The payload, after checking the tag is supported
    ///
    /// # Errors
    /// Returns `UnsupportedVersion` or `DataMissing`.
    pub fn data(&self) -> Result<&Container, VersionError> {
        Self::schema_for(self.version)?;
        self.data.as_ref().ok_or(VersionError::DataMissing(K::NAME))
    }

    #[must_use]
    pub fn into_data(self) -> Option<Container> {
        self.data
    }

    /// # Errors
    /// Fails if the wrapper is empty or unsupported.
    pub fn to_ssz(&self) -> Result<Vec<u8>, VersionError> {
        Ok(self.data()?.to_ssz()?)
    }

    /// # Errors
    /// Fails if the wrapper is empty or unsupported.
    pub fn hash_tree_root(&self) -> Result<[u8; 32], VersionError> {
        Ok(self.data()?.hash_tree_root()?)
    }
}

impl<K: BlockKind> Versioned<K> {
    /// The unsigned block
    ///
    /// # Errors
    /// Fails if the wrapper is empty or unsupported.
    pub fn message(&self) -> Result<&Container, VersionError> {
        let data = self.data()?;
        if K::SIGNED {
            child(data, "message")
        } else {
            Ok(data)
        }
    }

    /// # Errors
    /// Fails if the wrapper is empty or unsupported.
    pub fn body(&self) -> Result<&Container, VersionError> {
        child(self.message()?, "body")
    }

    /// Execution payload of a full block, or its header for a blinded one
    fn execution(&self) -> Result<&Container, VersionError> {
        let name = if K::BLINDED {
            "execution_payload_header"
        } else {
            "execution_payload"
        };
        child(self.body()?, name)
    }

    fn require_full(field: &'static str) -> Result<(), VersionError> {
        if K::BLINDED {
            Err(VersionError::BlindedMismatch { field, blinded: true })
        } else {
            Ok(())
        }
    }

    fn require_blinded(field: &'static str) -> Result<(), VersionError> {
        if K::BLINDED {
            Ok(())
        } else {
            Err(VersionError::BlindedMismatch { field, blinded: false })
        }
    }

    /// # Errors
    /// Fails if the wrapper is empty or unsupported.
    pub fn slot(&self) -> Result<u64, VersionError> {
        uint(self.message()?, "slot")
    }

    /// # Errors
    /// Fails if the wrapper is empty or unsupported.
    pub fn proposer_index(&self) -> Result<u64, VersionError> {
        uint(self.message()?, "proposer_index")
    }

    /// # Errors
    /// Fails if the wrapper is empty or unsupported.
    pub fn parent_root(&self) -> Result<[u8; 32], VersionError> {
        bytes(self.message()?, "parent_root")
    }

    /// # Errors
    /// Fails if the wrapper is empty or unsupported.
    pub fn state_root(&self) -> Result<[u8; 32], VersionError> {
        bytes(self.message()?, "state_root")
    }

    /// # Errors
    /// Fails if the wrapper is empty or unsupported.
    pub fn body_root(&self) -> Result<[u8; 32], VersionError> {
        Ok(self.body()?.hash_tree_root()?)
    }

    /// Root of the unsigned block, which a blinded block shares with its full form
    ///
    /// # Errors
    /// Fails if the wrapper is empty or unsupported.
    pub fn block_root(&self) -> Result<[u8; 32], VersionError> {
        Ok(self.message()?.hash_tree_root()?)
    }

    /// # Errors
    /// Returns `DataMissing` for an unsigned block.
    pub fn signature(&self) -> Result<[u8; 96], VersionError> {
        if !K::SIGNED {
            return Err(VersionError::DataMissing("signature"));
        }
        bytes(self.data()?, "signature")
    }

    /// The `BeaconBlockHeader` committing to this block
    ///
    /// # Errors
    /// Fails if the wrapper is empty or unsupported.
    pub fn header(&self) -> Result<Container, VersionError> {
        let message = self.message()?;
        let values = vec![
            field(message, "slot")?.clone(),
            field(message, "proposer_index")?.clone(),
            field(message, "parent_root")?.clone(),
            field(message, "state_root")?.clone(),
            Value::from(self.body_root()?),
        ];
        Ok(Container::new(&types::common().beacon_block_header, values)?)
    }

    /// # Errors
    /// Returns `DataMissing` before Bellatrix.
    pub fn execution_block_hash(&self) -> Result<[u8; 32], VersionError> {
        bytes(self.execution()?, "block_hash")
    }

    /// # Errors
    /// Returns `DataMissing` before Bellatrix.
    pub fn execution_block_number(&self) -> Result<u64, VersionError> {
        uint(self.execution()?, "block_number")
    }

    /// # Errors
    /// Returns `DataMissing` before Bellatrix.
    pub fn fee_recipient(&self) -> Result<[u8; 20], VersionError> {
        bytes(self.execution()?, "fee_recipient")
    }

    /// Base fee per gas as a big-endian uint256
    ///
    /// # Errors
    /// Returns `DataMissing` before Bellatrix.
    pub fn base_fee_per_gas(&self) -> Result<[u8; 32], VersionError> {
        field(self.execution()?, "base_fee_per_gas")?
            .u256_to_be_bytes()
            .ok_or(VersionError::DataMissing("base_fee_per_gas"))
    }

    /// # Errors
    /// Fails if the wrapper is empty or unsupported.
    pub fn attestations(&self) -> Result<&[Value], VersionError> {
        list(self.body()?, "attestations")
    }

    /// # Errors
    /// Returns `BlindedMismatch` on a blinded block, `DataMissing` before Capella.
    pub fn withdrawals(&self) -> Result<&[Value], VersionError> {
        Self::require_full("withdrawals")?;
        list(self.execution()?, "withdrawals")
    }

    /// # Errors
    /// Returns `BlindedMismatch` on a full block, `DataMissing` before Capella.
    pub fn withdrawals_root(&self) -> Result<[u8; 32], VersionError> {
        Self::require_blinded("withdrawals_root")?;
        bytes(self.execution()?, "withdrawals_root")
    }

    /// # Errors
    /// Returns `DataMissing` before Deneb.
    pub fn blob_kzg_commitments(&self) -> Result<Vec<[u8; 48]>, VersionError> {
        list(self.body()?, "blob_kzg_commitments")?
            .iter()
            .map(|commitment| {
                commitment
                    .as_byte_array::<48>()
                    .ok_or(VersionError::DataMissing("blob_kzg_commitments"))
            })
            .collect()
    }

    /// # Errors
    /// Returns `DataMissing` before Electra.
    pub fn execution_requests(&self) -> Result<&Container, VersionError> {
        child(self.body()?, "execution_requests")
    }

    /// # Errors
    /// Returns `DataMissing` before Electra.
    pub fn consolidation_requests(&self) -> Result<&[Value], VersionError> {
        list(self.execution_requests()?, "consolidations")
    }

    /// # Errors
    /// Returns `BlindedMismatch` on a blinded block, `DataMissing` before Bellatrix.
    pub fn transactions(&self) -> Result<&[Value], VersionError> {
        Self::require_full("transactions")?;
        list(self.execution()?, "transactions")
    }

    /// # Errors
    /// Returns `BlindedMismatch` on a full block, `DataMissing` before Bellatrix.
    pub fn transactions_root(&self) -> Result<[u8; 32], VersionError> {
        Self::require_blinded("transactions_root")?;
        bytes(self.execution()?, "transactions_root")
    }
}

impl Versioned<BeaconStateKind> {
    /// # Errors
    /// Fails if the wrapper is empty or unsupported.
    pub fn slot(&self) -> Result<u64, VersionError> {
        uint(self.data()?, "slot")
    }

    /// # Errors
    /// Fails if the wrapper is empty or unsupported.
    pub fn genesis_validators_root(&self) -> Result<[u8; 32], VersionError> {
        bytes(self.data()?, "genesis_validators_root")
    }

    /// # Errors
    /// Fails if the wrapper is empty or unsupported.
    pub fn fork(&self) -> Result<&Container, VersionError> {
        child(self.data()?, "fork")
    }

    /// # Errors
    /// Fails if the wrapper is empty or unsupported.
    pub fn latest_block_header(&self) -> Result<&Container, VersionError> {
        child(self.data()?, "latest_block_header")
    }

    /// # Errors
    /// Fails if the wrapper is empty or unsupported.
    pub fn finalized_checkpoint(&self) -> Result<&Container, VersionError> {
        child(self.data()?, "finalized_checkpoint")
    }

    /// # Errors
    /// Fails if the wrapper is empty or unsupported.
    pub fn validators(&self) -> Result<&[Value], VersionError> {
        list(self.data()?, "validators")
    }

    /// # Errors
    /// Fails if the wrapper is empty or unsupported.
    pub fn balances(&self) -> Result<Vec<u64>, VersionError> {
        uints(self.data()?, "balances")
    }

    /// # Errors
    /// Returns `DataMissing` before Bellatrix.
    pub fn latest_execution_payload_header(&self) -> Result<&Container, VersionError> {
        child(self.data()?, "latest_execution_payload_header")
    }

    /// # Errors
    /// Returns `DataMissing` before Capella.
    pub fn next_withdrawal_index(&self) -> Result<u64, VersionError> {
        uint(self.data()?, "next_withdrawal_index")
    }

    /// # Errors
    /// Returns `DataMissing` before Electra.
    pub fn pending_consolidations(&self) -> Result<&[Value], VersionError> {
        list(self.data()?, "pending_consolidations")
    }

    /// # Errors
    /// Returns `DataMissing` before Fulu.
    pub fn proposer_lookahead(&self) -> Result<Vec<u64>, VersionError> {
        uints(self.data()?, "proposer_lookahead")
    }
}

impl Versioned<AttestationKind> {
    /// # Errors
    /// Fails if the wrapper is empty or unsupported.
    pub fn data_field(&self) -> Result<&Container, VersionError> {
        child(self.data()?, "data")
    }

    /// # Errors
    /// Fails if the wrapper is empty or unsupported.
    pub fn aggregation_bits(&self) -> Result<&[bool], VersionError> {
        bits(self.data()?, "aggregation_bits")
    }

    /// # Errors
    /// Returns `DataMissing` before Electra.
    pub fn committee_bits(&self) -> Result<&[bool], VersionError> {
        bits(self.data()?, "committee_bits")
    }

    /// Committee of the attestation: `data.index` before Electra, the first
    /// set committee bit from Electra on
    ///
    /// # Errors
    /// Returns `DataMissing` if no committee bit is set.
    pub fn committee_index(&self) -> Result<u64, VersionError> {
        if self.version.is_at_least(DataVersion::Electra) {
            self.committee_bits()?
                .iter()
                .position(|bit| *bit)
                .map(|index| index as u64)
                .ok_or(VersionError::DataMissing("committee_bits"))
        } else {
            uint(self.data_field()?, "index")
        }
    }

    /// # Errors
    /// Fails if the wrapper is empty or unsupported.
    pub fn slot(&self) -> Result<u64, VersionError> {
        uint(self.data_field()?, "slot")
    }
}

/// A block proposal, full or blinded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionedProposal {
    Full(VersionedBeaconBlock),
    Blinded(VersionedBlindedBeaconBlock),
}

impl Default for VersionedProposal {
    fn default() -> Self {
        Self::Full(Versioned::default())
    }
}

/// Forward a projection to whichever variant is populated
macro_rules! delegate {
    ($($(#[$doc:meta])* $name:ident -> $ret:ty;)*) => {
        $(
            $(#[$doc])*
            ///
            /// # Errors
            /// See the method of the same name on [`Versioned`].
            pub fn $name(&self) -> Result<$ret, VersionError> {
                match self {
                    Self::Full(block) => block.$name(),
                    Self::Blinded(block) => block.$name(),
                }
            }
        )*
    };
}

impl VersionedProposal {
    /// Decode a proposal of the given fork and blindedness
    ///
    /// # Errors
    /// Returns `UnsupportedVersion` or the decode error.
    pub fn from_ssz(version: DataVersion, blinded: bool, bytes: &[u8]) -> Result<Self, VersionError> {
        if blinded {
            Ok(Self::Blinded(Versioned::from_ssz(version, bytes)?))
        } else {
            Ok(Self::Full(Versioned::from_ssz(version, bytes)?))
        }
    }

    #[must_use]
    pub fn version(&self) -> DataVersion {
        match self {
            Self::Full(block) => block.version(),
            Self::Blinded(block) => block.version(),
        }
    }

    #[must_use]
    pub fn is_blinded(&self) -> bool {
        matches!(self, Self::Blinded(_))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Full(block) => block.is_empty(),
            Self::Blinded(block) => block.is_empty(),
        }
    }

    /// # Errors
    /// Fails if the proposal is empty or unsupported.
    pub fn to_ssz(&self) -> Result<Vec<u8>, VersionError> {
        match self {
            Self::Full(block) => block.to_ssz(),
            Self::Blinded(block) => block.to_ssz(),
        }
    }

    delegate! {
        slot -> u64;
        proposer_index -> u64;
        parent_root -> [u8; 32];
        state_root -> [u8; 32];
        body_root -> [u8; 32];
        block_root -> [u8; 32];
        execution_block_hash -> [u8; 32];
        execution_block_number -> u64;
        fee_recipient -> [u8; 20];
        blob_kzg_commitments -> Vec<[u8; 48]>;
        header -> Container;
        /// Only available on a full proposal
        transactions -> &[Value];
        /// Only available on a blinded proposal
        transactions_root -> [u8; 32];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn electra_block() -> Container {
        let schema = types::signed_beacon_block(DataVersion::Electra).unwrap();
        let mut block = Container::default_for(&schema);
        block
            .update("message", |message| {
                if let Value::Container(message) = message {
                    message.set("slot", 123_u64).unwrap();
                    message.set("proposer_index", 9_u64).unwrap();
                }
            })
            .unwrap();
        block
    }

    #[test]
    fn test_new_checks_schema() {
        let block = electra_block();
        assert!(VersionedSignedBeaconBlock::new(DataVersion::Electra, block.clone()).is_ok());
        let err = VersionedSignedBeaconBlock::new(DataVersion::Deneb, block).unwrap_err();
        assert!(matches!(err, VersionError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_electra_projections() {
        let versioned = VersionedSignedBeaconBlock::new(DataVersion::Electra, electra_block()).unwrap();
        assert_eq!(versioned.slot().unwrap(), 123);
        assert_eq!(versioned.proposer_index().unwrap(), 9);
        assert_eq!(versioned.execution_block_number().unwrap(), 0);
        assert!(versioned.withdrawals().unwrap().is_empty());
        assert!(versioned.consolidation_requests().unwrap().is_empty());
        assert!(versioned.blob_kzg_commitments().unwrap().is_empty());
        assert_eq!(versioned.base_fee_per_gas().unwrap(), [0u8; 32]);

        let header = versioned.header().unwrap();
        assert_eq!(header.hash_tree_root().unwrap(), versioned.block_root().unwrap());
    }

    #[test]
    fn test_unsupported_and_missing() {
        let unknown = VersionedSignedBeaconBlock::empty(DataVersion::Unknown);
        assert!(unknown.is_empty());
        assert!(matches!(
            unknown.slot(),
            Err(VersionError::UnsupportedVersion { version: DataVersion::Unknown, .. })
        ));

        let empty = VersionedSignedBeaconBlock::empty(DataVersion::Capella);
        assert_eq!(empty.slot(), Err(VersionError::DataMissing("SignedBeaconBlock")));

        let blinded = VersionedSignedBlindedBeaconBlock::empty(DataVersion::Altair);
        assert!(matches!(blinded.slot(), Err(VersionError::UnsupportedVersion { .. })));
    }

    #[test]
    fn test_blinded_axis() {
        let schema = types::blinded_beacon_block(DataVersion::Deneb).unwrap();
        let blinded = VersionedBlindedBeaconBlock::new(DataVersion::Deneb, Container::default_for(&schema)).unwrap();
        let proposal = VersionedProposal::Blinded(blinded);
        assert!(proposal.is_blinded());
        assert_eq!(
            proposal.transactions(),
            Err(VersionError::BlindedMismatch { field: "transactions", blinded: true })
        );
        assert_eq!(proposal.transactions_root().unwrap(), [0u8; 32]);

        let schema = types::beacon_block(DataVersion::Deneb).unwrap();
        let full = VersionedProposal::Full(
            VersionedBeaconBlock::new(DataVersion::Deneb, Container::default_for(&schema)).unwrap(),
        );
        assert!(full.transactions().unwrap().is_empty());
        assert!(matches!(full.transactions_root(), Err(VersionError::BlindedMismatch { .. })));
    }

    #[test]
    fn test_attestation_committee_index() {
        let schema = types::attestation(DataVersion::Electra).unwrap();
        let mut attestation = Container::default_for(&schema);
        attestation
            .update("committee_bits", |bits| {
                if let Value::Bits(bits) = bits {
                    bits[3] = true;
                }
            })
            .unwrap();
        let versioned = VersionedAttestation::new(DataVersion::Electra, attestation).unwrap();
        assert_eq!(versioned.committee_index().unwrap(), 3);

        let schema = types::attestation(DataVersion::Deneb).unwrap();
        let deneb = VersionedAttestation::new(DataVersion::Deneb, Container::default_for(&schema)).unwrap();
        assert_eq!(deneb.committee_bits(), Err(VersionError::DataMissing("committee_bits")));
        assert_eq!(deneb.committee_index().unwrap(), 0);
    }
}
