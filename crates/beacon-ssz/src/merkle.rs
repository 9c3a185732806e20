//! SSZ Merkleization
//!
//! Computes hash tree roots without allocating full trees for large lists.
//! Leaves beyond the actual data are never materialized: an all-zero subtree
//! of depth `d` is replaced by the precomputed zero hash `ZERO_HASHES[d]`, so
//! a `List[Validator, 2^40]` costs only as much as its populated elements.

use crate::codec::{self, SszError};
use crate::schema::{ceil_log2, SszType, BYTES_PER_CHUNK};
use crate::value::{Container, Value};
use sha2::{Digest, Sha256};
use std::sync::LazyLock;

/// Maximum supported tree depth
pub const MAX_DEPTH: usize = 64;

/// `ZERO_HASHES[0]` is the zero chunk, `ZERO_HASHES[i] = hash(ZERO_HASHES[i-1], ZERO_HASHES[i-1])`
static ZERO_HASHES: LazyLock<Vec<[u8; 32]>> = LazyLock::new(|| {
    let mut hashes = vec![[0u8; 32]; MAX_DEPTH + 1];
    let mut hasher = Sha256::new();
    for i in 1..=MAX_DEPTH {
        hasher.update(hashes[i - 1]);
        hasher.update(hashes[i - 1]);
        hashes[i] = hasher.finalize_reset().into();
    }
    hashes
});

/// Root of an all-zero subtree of the given depth
#[must_use]
pub fn zero_hash(depth: usize) -> [u8; 32] {
    ZERO_HASHES[depth.min(MAX_DEPTH)]
}

/// SHA-256 hash of two 32-byte nodes
#[must_use]
pub fn hash_pair(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// The length chunk of a list: little-endian length in the first 8 bytes
#[must_use]
pub fn length_chunk(length: usize) -> [u8; 32] {
    let mut length_bytes = [0u8; 32];
    length_bytes[..8].copy_from_slice(&(length as u64).to_le_bytes());
    length_bytes
}

/// Mix in the length for a List's Merkle root.
/// `list_root = hash(data_root, length_as_le_bytes32)`
#[must_use]
pub fn mix_in_length(data_root: [u8; 32], length: usize) -> [u8; 32] {
    hash_pair(&data_root, &length_chunk(length))
}

/// Split bytes into 32-byte chunks, zero-padding the last one
#[must_use]
pub fn pack_bytes(bytes: &[u8]) -> Vec<[u8; 32]> {
    bytes
        .chunks(BYTES_PER_CHUNK)
        .map(|chunk| {
            let mut out = [0u8; 32];
            out[..chunk.len()].copy_from_slice(chunk);
            out
        })
        .collect()
}

/// Merkleize `chunks` as the first leaves of a tree with `limit` leaf slots.
///
/// The tree has `2^ceil(log2(limit))` leaves; missing ones are zero chunks.
///
/// # Errors
/// Returns `ListTooBig` if there are more chunks than the limit allows.
pub fn merkleize(chunks: &[[u8; 32]], limit: usize) -> Result<[u8; 32], SszError> {
    if chunks.len() > limit {
        return Err(SszError::ListTooBig {
            len: chunks.len(),
            max: limit,
        });
    }
    let depth = ceil_log2(limit) as usize;
    if chunks.is_empty() {
        return Ok(zero_hash(depth));
    }

    let mut layer = chunks.to_vec();
    for level in 0..depth {
        if layer.len() % 2 == 1 {
            layer.push(zero_hash(level));
        }
        layer = layer
            .chunks_exact(2)
            .map(|pair| hash_pair(&pair[0], &pair[1]))
            .collect();
    }
    Ok(layer[0])
}

/// Leaf chunks of a value's contents tree, before padding and before any
/// length mix-in. Basic values and byte/bit sequences are packed; composite
/// elements and container fields contribute their own roots.
///
/// # Errors
/// Returns an error if the value does not match the type.
pub fn content_chunks(value: &Value, ty: &SszType) -> Result<Vec<[u8; 32]>, SszError> {
    codec::validate_shallow(value, ty)?;
    match (ty, value) {
        (SszType::Bool | SszType::Uint(_), _) => {
            let mut bytes = Vec::with_capacity(BYTES_PER_CHUNK);
            codec::write_value(value, ty, &mut bytes)?;
            Ok(pack_bytes(&bytes))
        }
        (SszType::ByteVector(_) | SszType::ByteList(_), Value::Bytes(bytes)) => Ok(pack_bytes(bytes)),
        (SszType::Bitvector(_) | SszType::Bitlist(_), Value::Bits(bits)) => {
            Ok(pack_bytes(&codec::pack_bits(bits, false)))
        }
        (SszType::Vector(elem, _) | SszType::List(elem, _), Value::List(items)) => {
            if elem.is_basic() {
                let mut bytes = Vec::new();
                for item in items {
                    codec::validate(item, elem)?;
                    codec::write_value(item, elem, &mut bytes)?;
                }
                Ok(pack_bytes(&bytes))
            } else {
                items.iter().map(|item| hash_tree_root(item, elem)).collect()
            }
        }
        (SszType::Container(_), Value::Container(container)) => container
            .fields()
            .map(|(field, value)| hash_tree_root(value, &field.ty))
            .collect(),
        (ty, value) => Err(SszError::TypeMismatch {
            expected: ty.to_string(),
            got: value.kind(),
        }),
    }
}

/// Number of elements a list value holds, for the length mix-in
pub(crate) fn list_length(value: &Value) -> usize {
    match value {
        Value::Bytes(bytes) => bytes.len(),
        Value::Bits(bits) => bits.len(),
        Value::List(items) => items.len(),
        _ => 0,
    }
}

/// Hash tree root of a value of the given type.
///
/// # Errors
/// Returns an error if the value does not match the type or exceeds a bound.
pub fn hash_tree_root(value: &Value, ty: &SszType) -> Result<[u8; 32], SszError> {
    let chunks = content_chunks(value, ty)?;
    let root = merkleize(&chunks, ty.chunk_count())?;
    if ty.is_list() {
        Ok(mix_in_length(root, list_length(value)))
    } else {
        Ok(root)
    }
}

/// Hash tree root of a container: merkleize one leaf per field
pub(crate) fn container_root(container: &Container) -> Result<[u8; 32], SszError> {
    let chunks = container
        .fields()
        .map(|(field, value)| hash_tree_root(value, &field.ty))
        .collect::<Result<Vec<_>, _>>()?;
    merkleize(&chunks, container.schema().field_count())
}
