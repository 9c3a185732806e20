//! Merkle Proofs
//!
//! Single-leaf proofs against hash tree roots, addressed by generalized index.
//! A proof is the list of sibling hashes from the leaf up to the root; its
//! length always equals the depth of the generalized index.

use crate::gindex::{field_generalized_index, generalized_index, gindex_depth, GeneralizedIndex, PathElement};
use crate::merkle::hash_pair;
use crate::schema::SszType;
use crate::tree::{Tree, TreeError};
use crate::value::{Container, Value};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sibling hashes ordered leaf to root
pub type Proof = Vec<[u8; 32]>;

/// Recompute the root implied by a leaf, its gindex and its branch
#[must_use]
pub fn compute_root(leaf: &[u8; 32], gindex: GeneralizedIndex, proof: &[[u8; 32]]) -> [u8; 32] {
    let mut current = *leaf;
    let mut index = gindex;
    for sibling in proof {
        current = if index & 1 == 1 {
            hash_pair(sibling, &current)
        } else {
            hash_pair(&current, sibling)
        };
        index >>= 1;
    }
    current
}

/// Verify a Merkle proof.
///
/// Returns `false` for gindex 0 or when the proof length differs from the
/// depth of `gindex`.
#[must_use]
pub fn verify_proof(root: &[u8; 32], leaf: &[u8; 32], gindex: GeneralizedIndex, proof: &[[u8; 32]]) -> bool {
    if gindex == 0 || proof.len() != gindex_depth(gindex) as usize {
        return false;
    }
    compute_root(leaf, gindex, proof) == *root
}

/// A self-contained proof: everything a verifier needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofBundle {
    pub gindex: GeneralizedIndex,
    #[serde(with = "hex_bytes32")]
    pub leaf: [u8; 32],
    #[serde(with = "proof_vec_serde")]
    pub branch: Proof,
    #[serde(with = "hex_bytes32")]
    pub root: [u8; 32],
}

impl ProofBundle {
    #[must_use]
    pub fn verify(&self) -> bool {
        verify_proof(&self.root, &self.leaf, self.gindex, &self.branch)
    }
}

/// Prove the node reached by `path` inside `value`
///
/// # Errors
/// Returns an error if the path does not match the type or the value does not
/// match the type.
pub fn prove(value: &Value, ty: &SszType, path: &[PathElement]) -> Result<ProofBundle, TreeError> {
    let gindex = generalized_index(ty, path)?;
    let bundle = Tree::build(value, ty)?.proof_bundle(gindex)?;
    debug!(ty = %ty, gindex, depth = bundle.branch.len(), "generated proof");
    Ok(bundle)
}

/// Prove a top-level field of a container
///
/// # Errors
/// Returns `FieldNotFound` for an unknown field.
pub fn prove_field(container: &Container, field: &str) -> Result<ProofBundle, TreeError> {
    let gindex = field_generalized_index(container.schema(), field)?;
    Tree::from_container(container)?.proof_bundle(gindex)
}

impl Container {
    /// Prove the node reached by `path` from this container's root
    ///
    /// # Errors
    /// Returns an error if the path does not match the schema.
    pub fn prove_path(&self, path: &[PathElement]) -> Result<ProofBundle, TreeError> {
        let gindex = generalized_index(&self.as_type(), path)?;
        Tree::from_container(self)?.proof_bundle(gindex)
    }
}

mod hex_bytes32 {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 32], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let s = s.strip_prefix("0x").unwrap_or(&s);
        let bytes = hex::decode(s).map_err(serde::de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("expected 32 bytes"))
    }
}

mod proof_vec_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[allow(clippy::ptr_arg)]
    pub fn serialize<S>(data: &Vec<[u8; 32]>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let hex_strings: Vec<String> = data.iter().map(|h| format!("0x{}", hex::encode(h))).collect();
        hex_strings.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<[u8; 32]>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_strings: Vec<String> = Vec::deserialize(deserializer)?;
        hex_strings
            .into_iter()
            .map(|s| {
                let s = s.strip_prefix("0x").unwrap_or(&s);
                let bytes = hex::decode(s).map_err(serde::de::Error::custom)?;
                bytes
                    .try_into()
                    .map_err(|_| serde::de::Error::custom("expected 32 bytes"))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ContainerSchema, Field};
    use proptest::prelude::*;

    fn sample() -> Container {
        let schema = ContainerSchema::new(
            "Sample",
            vec![
                Field::new("slot", SszType::U64),
                Field::new("roots", SszType::list(SszType::ByteVector(32), 64)),
                Field::new("flags", SszType::Bitvector(4)),
            ],
        );
        let mut container = Container::default_for(&schema);
        container.set("slot", 12_345_u64).unwrap();
        for i in 0..5u8 {
            container.push("roots", [i; 32]).unwrap();
        }
        container
    }

    #[test]
    fn test_verify_rejects_wrong_length() {
        let leaf = [1u8; 32];
        let sibling = [2u8; 32];
        let root = hash_pair(&leaf, &sibling);
        assert!(verify_proof(&root, &leaf, 2, &[sibling]));
        assert!(!verify_proof(&root, &leaf, 2, &[]));
        assert!(!verify_proof(&root, &leaf, 2, &[sibling, sibling]));
        assert!(!verify_proof(&root, &leaf, 0, &[]));
        // gindex 1: the leaf is the root
        assert!(verify_proof(&leaf, &leaf, 1, &[]));
    }

    #[test]
    fn test_prove_field() {
        let container = sample();
        let bundle = prove_field(&container, "slot").unwrap();
        assert_eq!(bundle.gindex, 4);
        assert_eq!(bundle.root, container.hash_tree_root().unwrap());
        assert_eq!(&bundle.leaf[..8], &12_345_u64.to_le_bytes());
        assert!(bundle.verify());

        assert!(matches!(
            prove_field(&container, "missing"),
            Err(TreeError::FieldNotFound { .. })
        ));
    }

    #[test]
    fn test_prove_list_element_and_length() {
        let container = sample();
        let value = Value::Container(container.clone());
        let ty = container.as_type();

        let element = prove(&value, &ty, &["roots".into(), 3usize.into()]).unwrap();
        assert_eq!(element.leaf, [3u8; 32]);
        assert_eq!(element.branch.len(), 2 + 1 + 6);
        assert!(element.verify());

        let length = prove(&value, &ty, &["roots".into(), PathElement::Length]).unwrap();
        assert_eq!(&length.leaf[..8], &5u64.to_le_bytes());
        assert!(length.verify());
    }

    #[test]
    fn test_bundle_json_format() {
        let bundle = prove_field(&sample(), "flags").unwrap();
        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(json["gindex"], 6);
        assert!(json["leaf"].as_str().unwrap().starts_with("0x"));
        assert_eq!(json["branch"].as_array().unwrap().len(), 2);

        let decoded: ProofBundle = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, bundle);
    }

    proptest! {
        #[test]
        fn prop_proofs_verify_and_detect_tampering(
            count in 1usize..40,
            pick in 0usize..40,
            flip in 0usize..32,
        ) {
            let ty = SszType::list(SszType::ByteVector(32), 64);
            let items: Vec<Value> = (0..count).map(|i| Value::Bytes(vec![i as u8 + 1; 32])).collect();
            let value = Value::List(items);
            let index = pick % count;

            let bundle = prove(&value, &ty, &[index.into()]).unwrap();
            prop_assert!(bundle.verify());

            let mut tampered = bundle.clone();
            tampered.leaf[flip] ^= 0x01;
            prop_assert!(!tampered.verify());

            let mut wrong_index = bundle.clone();
            wrong_index.gindex ^= 1;
            prop_assert!(!wrong_index.verify());
        }
    }
}
