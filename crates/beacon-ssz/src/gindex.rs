//! Generalized Index Computation
//!
//! Computes generalized indices (gindices) addressing nodes of an SSZ value's
//! Merkle tree: the root is 1 and the children of `n` are `2n` and `2n + 1`.
//! Paths through containers, vectors and lists are resolved against the
//! schema, so no value is needed to compute an index.

use crate::schema::{ContainerSchema, SszType, BYTES_PER_CHUNK};
use crate::tree::TreeError;
use std::fmt;

/// Integer ≥ 1 addressing a node of the conceptual complete binary tree
pub type GeneralizedIndex = u64;

/// One step of a path into an SSZ value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    /// Field of a container
    Field(String),
    /// Element of a vector or list, or byte/bit of a byte or bit sequence
    Index(usize),
    /// Length mix-in of a list
    Length,
}

impl From<&str> for PathElement {
    fn from(name: &str) -> Self {
        Self::Field(name.to_string())
    }
}

impl From<String> for PathElement {
    fn from(name: String) -> Self {
        Self::Field(name)
    }
}

impl From<usize> for PathElement {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => write!(f, "{name}"),
            Self::Index(index) => write!(f, "[{index}]"),
            Self::Length => write!(f, "__len__"),
        }
    }
}

/// Compute the depth (number of proof elements) for a given gindex
#[must_use]
pub const fn gindex_depth(gindex: GeneralizedIndex) -> u32 {
    63 - gindex.leading_zeros()
}

/// Concatenate generalized indices along a path
///
/// Given a sequence of gindices representing a path through nested structures,
/// compute the final gindex from the outermost root.
#[must_use]
pub fn concat_gindices(gindices: &[GeneralizedIndex]) -> GeneralizedIndex {
    let mut result = 1_u64; // Start at root

    for &gindex in gindices {
        let depth = gindex_depth(gindex);
        result = (result << depth) | (gindex ^ (1_u64 << depth));
    }

    result
}

/// Generalized index of a container field relative to the container root:
/// `2^ceil(log2(field_count)) + field_index`.
///
/// # Errors
/// Returns `FieldNotFound` for an unknown field name.
pub fn field_generalized_index(
    schema: &ContainerSchema,
    field: &str,
) -> Result<GeneralizedIndex, TreeError> {
    let index = schema
        .field_index(field)
        .ok_or_else(|| TreeError::FieldNotFound {
            container: schema.name().to_string(),
            field: field.to_string(),
        })?;
    Ok((1_u64 << schema.depth()) + index as u64)
}

/// Append a local gindex below `gindex`, checking the result still fits
fn append(gindex: GeneralizedIndex, local: GeneralizedIndex) -> Result<GeneralizedIndex, TreeError> {
    let depth = gindex_depth(local);
    if gindex_depth(gindex) + depth > 63 {
        return Err(TreeError::GindexOverflow);
    }
    Ok((gindex << depth) | (local ^ (1_u64 << depth)))
}

/// Generalized index of the node reached by following `path` from the root
/// of a value of type `ty`.
///
/// Lists contribute their data subtree (left child, `2`) before the element
/// position; `PathElement::Length` addresses the length chunk (`3`). Basic
/// elements resolve to the chunk that packs them, which ends the path.
///
/// # Errors
/// Returns `FieldNotFound`, `ElementOutOfRange` or `InvalidPath` when the path
/// does not match the type.
pub fn generalized_index(ty: &SszType, path: &[PathElement]) -> Result<GeneralizedIndex, TreeError> {
    let mut gindex = 1_u64;
    let mut current = Some(ty);

    for element in path {
        let Some(ty) = current else {
            return Err(TreeError::InvalidPath {
                element: element.to_string(),
                ty: "packed chunk".to_string(),
            });
        };

        let (local, next) = match (ty, element) {
            (SszType::Container(schema), PathElement::Field(name)) => {
                let local = field_generalized_index(schema, name)?;
                let index = (local - (1_u64 << schema.depth())) as usize;
                (local, Some(&schema.fields()[index].ty))
            }
            (SszType::List(..) | SszType::ByteList(_) | SszType::Bitlist(_), PathElement::Length) => {
                (3, None)
            }
            (SszType::Vector(elem, limit) | SszType::List(elem, limit), PathElement::Index(index)) => {
                check_element(*index, *limit)?;
                let (position, next) = match elem.fixed_size() {
                    Some(size) if elem.is_basic() => (index * size / BYTES_PER_CHUNK, None),
                    _ => (*index, Some(&**elem)),
                };
                (chunk_gindex(ty, position)?, next)
            }
            (SszType::ByteVector(limit) | SszType::ByteList(limit), PathElement::Index(index)) => {
                check_element(*index, *limit)?;
                (chunk_gindex(ty, index / BYTES_PER_CHUNK)?, None)
            }
            (SszType::Bitvector(limit) | SszType::Bitlist(limit), PathElement::Index(index)) => {
                check_element(*index, *limit)?;
                (chunk_gindex(ty, index / (BYTES_PER_CHUNK * 8))?, None)
            }
            (ty, element) => {
                return Err(TreeError::InvalidPath {
                    element: element.to_string(),
                    ty: ty.to_string(),
                })
            }
        };

        gindex = append(gindex, local)?;
        current = next;
    }

    Ok(gindex)
}

fn check_element(index: usize, limit: usize) -> Result<(), TreeError> {
    if index < limit {
        Ok(())
    } else {
        Err(TreeError::ElementOutOfRange { index, limit })
    }
}

/// Local gindex of chunk `position` within the contents tree of `ty`,
/// routed through the data subtree for lists.
fn chunk_gindex(ty: &SszType, position: usize) -> Result<GeneralizedIndex, TreeError> {
    let depth = ty.tree_depth();
    let within = (1_u64 << depth) + position as u64;
    if ty.is_list() {
        append(2, within)
    } else {
        Ok(within)
    }
}
