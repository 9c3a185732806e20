//! SSZ Type Model
//!
//! Schema descriptors for every SSZ type used by the beacon chain objects.
//! A schema is immutable once built; containers are shared behind `Arc` so the
//! per-fork schemas in [`crate::types`] can reuse their sub-containers.

use std::fmt;
use std::sync::Arc;

/// Size of a Merkleization chunk in bytes
pub const BYTES_PER_CHUNK: usize = 32;

/// Size of a variable-length offset in bytes
pub const BYTES_PER_LENGTH_OFFSET: usize = 4;

/// Width of an unsigned integer type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UintSize {
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
}

impl UintSize {
    /// Number of bytes in the serialized integer
    #[must_use]
    pub const fn byte_len(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
            Self::U64 => 8,
            Self::U128 => 16,
            Self::U256 => 32,
        }
    }
}

/// An SSZ type descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SszType {
    /// `boolean`
    Bool,
    /// `uintN`
    Uint(UintSize),
    /// `Vector[byte, N]`, e.g. roots, public keys, signatures
    ByteVector(usize),
    /// `List[byte, N]`, e.g. extra data, transactions
    ByteList(usize),
    /// `Vector[T, N]`
    Vector(Arc<SszType>, usize),
    /// `List[T, N]`
    List(Arc<SszType>, usize),
    /// `Bitvector[N]`
    Bitvector(usize),
    /// `Bitlist[N]`
    Bitlist(usize),
    /// A named container
    Container(Arc<ContainerSchema>),
}

impl SszType {
    pub const BOOL: Self = Self::Bool;
    pub const U8: Self = Self::Uint(UintSize::U8);
    pub const U16: Self = Self::Uint(UintSize::U16);
    pub const U32: Self = Self::Uint(UintSize::U32);
    pub const U64: Self = Self::Uint(UintSize::U64);
    pub const U128: Self = Self::Uint(UintSize::U128);
    pub const U256: Self = Self::Uint(UintSize::U256);

    /// `Vector[elem, len]`
    #[must_use]
    pub fn vector(elem: SszType, len: usize) -> Self {
        Self::Vector(Arc::new(elem), len)
    }

    /// `List[elem, limit]`
    #[must_use]
    pub fn list(elem: SszType, limit: usize) -> Self {
        Self::List(Arc::new(elem), limit)
    }

    /// Nested container
    #[must_use]
    pub fn container(schema: &Arc<ContainerSchema>) -> Self {
        Self::Container(Arc::clone(schema))
    }

    /// Basic types are packed into chunks and have no sub-tree of their own
    #[must_use]
    pub fn is_basic(&self) -> bool {
        matches!(self, Self::Bool | Self::Uint(_))
    }

    /// Lists carry a length mix-in and a variable element count
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::ByteList(_) | Self::List(..) | Self::Bitlist(_))
    }

    /// Serialized size when every value of this type has the same length
    #[must_use]
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            Self::Bool => Some(1),
            Self::Uint(size) => Some(size.byte_len()),
            Self::ByteVector(len) => Some(*len),
            Self::Vector(elem, len) => elem.fixed_size().map(|size| size * len),
            Self::Bitvector(bits) => Some(bits.div_ceil(8)),
            Self::Container(schema) => schema.fixed_size(),
            Self::ByteList(_) | Self::List(..) | Self::Bitlist(_) => None,
        }
    }

    #[must_use]
    pub fn is_fixed_size(&self) -> bool {
        self.fixed_size().is_some()
    }

    /// Bytes this type occupies in the fixed part of an enclosing composite
    #[must_use]
    pub fn fixed_part_size(&self) -> usize {
        self.fixed_size().unwrap_or(BYTES_PER_LENGTH_OFFSET)
    }

    /// Maximum number of Merkleization chunks (the padding limit)
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        match self {
            Self::Bool | Self::Uint(_) => 1,
            Self::ByteVector(len) | Self::ByteList(len) => len.div_ceil(BYTES_PER_CHUNK),
            Self::Vector(elem, len) | Self::List(elem, len) => match elem.fixed_size() {
                Some(size) if elem.is_basic() => (len * size).div_ceil(BYTES_PER_CHUNK),
                _ => *len,
            },
            Self::Bitvector(bits) | Self::Bitlist(bits) => bits.div_ceil(BYTES_PER_CHUNK * 8),
            Self::Container(schema) => schema.field_count(),
        }
    }

    /// Depth of the contents tree, `ceil(log2(chunk_count))`
    #[must_use]
    pub fn tree_depth(&self) -> u32 {
        ceil_log2(self.chunk_count())
    }

    /// Element type of a vector or list
    #[must_use]
    pub fn element_type(&self) -> Option<&SszType> {
        match self {
            Self::Vector(elem, _) | Self::List(elem, _) => Some(elem),
            _ => None,
        }
    }
}

impl fmt::Display for SszType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "boolean"),
            Self::Uint(size) => write!(f, "uint{}", size.byte_len() * 8),
            Self::ByteVector(len) => write!(f, "ByteVector[{len}]"),
            Self::ByteList(len) => write!(f, "ByteList[{len}]"),
            Self::Vector(elem, len) => write!(f, "Vector[{elem}, {len}]"),
            Self::List(elem, len) => write!(f, "List[{elem}, {len}]"),
            Self::Bitvector(len) => write!(f, "Bitvector[{len}]"),
            Self::Bitlist(len) => write!(f, "Bitlist[{len}]"),
            Self::Container(schema) => write!(f, "{}", schema.name()),
        }
    }
}

/// A named field of a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub ty: SszType,
}

impl Field {
    #[must_use]
    pub fn new(name: &'static str, ty: SszType) -> Self {
        Self { name, ty }
    }
}

/// Ordered field list of an SSZ container.
///
/// Field order is both the wire order and the Merkleization leaf order.
#[derive(Debug, PartialEq, Eq)]
pub struct ContainerSchema {
    name: String,
    fields: Vec<Field>,
}

impl ContainerSchema {
    #[must_use]
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            fields,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// 0-based declared position of a field
    #[must_use]
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Serialized size if every field is fixed-size
    #[must_use]
    pub fn fixed_size(&self) -> Option<usize> {
        self.fields.iter().map(|field| field.ty.fixed_size()).sum()
    }

    /// Length of the fixed part: fixed fields inline plus one offset per variable field
    #[must_use]
    pub fn fixed_part_size(&self) -> usize {
        self.fields.iter().map(|field| field.ty.fixed_part_size()).sum()
    }

    /// Depth of the field tree, `ceil(log2(field_count))`
    #[must_use]
    pub fn depth(&self) -> u32 {
        ceil_log2(self.fields.len())
    }
}

/// `ceil(log2(n))`, with 0 and 1 both mapping to depth 0
#[must_use]
pub fn ceil_log2(n: usize) -> u32 {
    n.max(1).next_power_of_two().trailing_zeros()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_u64() -> Arc<ContainerSchema> {
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
    fn test_ceil_log2() {
        assert_eq!(ceil_log2(0), 0);
        assert_eq!(ceil_log2(1), 0);
        assert_eq!(ceil_log2(2), 1);
        assert_eq!(ceil_log2(3), 2);
        assert_eq!(ceil_log2(5), 3);
        assert_eq!(ceil_log2(37), 6);
        assert_eq!(ceil_log2(1 << 40), 40);
    }

    #[test]
    fn test_fixed_container_size() {
        let schema = three_u64();
        assert_eq!(schema.fixed_size(), Some(24));
        assert_eq!(schema.fixed_part_size(), 24);
        assert_eq!(schema.depth(), 2);
    }

    #[test]
    fn test_variable_container_fixed_part() {
        let schema = ContainerSchema::new(
            "Mixed",
            vec![
                Field::new("slot", SszType::U64),
                Field::new("extra", SszType::ByteList(32)),
                Field::new("bits", SszType::Bitlist(16)),
            ],
        );
        assert_eq!(schema.fixed_size(), None);
        assert_eq!(schema.fixed_part_size(), 8 + 4 + 4);
    }

    #[test]
    fn test_chunk_counts() {
        assert_eq!(SszType::U64.chunk_count(), 1);
        assert_eq!(SszType::ByteVector(48).chunk_count(), 2);
        assert_eq!(SszType::list(SszType::U64, 1024).chunk_count(), 256);
        assert_eq!(SszType::Bitlist(2048).chunk_count(), 8);
        assert_eq!(SszType::Bitvector(4).chunk_count(), 1);
        let roots = SszType::vector(SszType::ByteVector(32), 8);
        assert_eq!(roots.chunk_count(), 8);
        assert_eq!(SszType::container(&three_u64()).chunk_count(), 3);
    }

    #[test]
    fn test_display() {
        let ty = SszType::list(SszType::container(&three_u64()), 16);
        assert_eq!(ty.to_string(), "List[Triple, 16]");
        assert_eq!(SszType::U256.to_string(), "uint256");
    }
}
