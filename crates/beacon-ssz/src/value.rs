//! SSZ Values
//!
//! Dynamic value tree described by the schemas in [`crate::schema`]. A
//! [`Container`] value always carries the schema it was built for, so the codec
//! and the Merkleizer can walk a value without any per-type code.

use crate::codec::{self, SszError};
use crate::merkle;
use crate::schema::{ContainerSchema, Field, SszType, UintSize};
use std::sync::Arc;

/// A value of some SSZ type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Uint128(u128),
    /// uint256 in its canonical little-endian byte order
    Uint256([u8; 32]),
    /// Byte vector or byte list
    Bytes(Vec<u8>),
    /// Bitvector or bitlist
    Bits(Vec<bool>),
    /// Elements of a vector or list
    List(Vec<Value>),
    Container(Container),
}

impl Value {
    /// The all-zero value of a type; empty for lists
    #[must_use]
    pub fn default_for(ty: &SszType) -> Self {
        match ty {
            SszType::Bool => Self::Bool(false),
            SszType::Uint(size) => match size {
                UintSize::U8 => Self::Uint8(0),
                UintSize::U16 => Self::Uint16(0),
                UintSize::U32 => Self::Uint32(0),
                UintSize::U64 => Self::Uint64(0),
                UintSize::U128 => Self::Uint128(0),
                UintSize::U256 => Self::Uint256([0u8; 32]),
            },
            SszType::ByteVector(len) => Self::Bytes(vec![0u8; *len]),
            SszType::ByteList(_) => Self::Bytes(Vec::new()),
            SszType::Vector(elem, len) => Self::List(vec![Self::default_for(elem); *len]),
            SszType::List(..) => Self::List(Vec::new()),
            SszType::Bitvector(len) => Self::Bits(vec![false; *len]),
            SszType::Bitlist(_) => Self::Bits(Vec::new()),
            SszType::Container(schema) => Self::Container(Container::default_for(schema)),
        }
    }

    /// Short name of the variant, used in type mismatch errors
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Uint8(_) => "uint8",
            Self::Uint16(_) => "uint16",
            Self::Uint32(_) => "uint32",
            Self::Uint64(_) => "uint64",
            Self::Uint128(_) => "uint128",
            Self::Uint256(_) => "uint256",
            Self::Bytes(_) => "bytes",
            Self::Bits(_) => "bits",
            Self::List(_) => "list",
            Self::Container(_) => "container",
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Any unsigned integer of at most 64 bits
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Uint8(v) => Some(u64::from(*v)),
            Self::Uint16(v) => Some(u64::from(*v)),
            Self::Uint32(v) => Some(u64::from(*v)),
            Self::Uint64(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Fixed-length byte array, e.g. a root (`N = 32`) or a signature (`N = 96`)
    #[must_use]
    pub fn as_byte_array<const N: usize>(&self) -> Option<[u8; N]> {
        self.as_bytes().and_then(|bytes| bytes.try_into().ok())
    }

    #[must_use]
    pub fn as_bits(&self) -> Option<&[bool]> {
        match self {
            Self::Bits(bits) => Some(bits),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Self::Container(container) => Some(container),
            _ => None,
        }
    }

    /// Little-endian bytes of a uint256
    #[must_use]
    pub fn as_u256_le(&self) -> Option<[u8; 32]> {
        match self {
            Self::Uint256(bytes) => Some(*bytes),
            _ => None,
        }
    }

    /// uint256 from its big-endian representation
    #[must_use]
    pub fn u256_from_be_bytes(mut be: [u8; 32]) -> Self {
        be.reverse();
        Self::Uint256(be)
    }

    /// Big-endian bytes of a uint256, for callers doing big-integer arithmetic
    #[must_use]
    pub fn u256_to_be_bytes(&self) -> Option<[u8; 32]> {
        self.as_u256_le().map(|mut le| {
            le.reverse();
            le
        })
    }

    /// A byte value, typically a root or fixed-size key
    #[must_use]
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(bytes.into())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Self::Uint8(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Uint64(value)
    }
}

impl<const N: usize> From<[u8; N]> for Value {
    fn from(value: [u8; N]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<Container> for Value {
    fn from(value: Container) -> Self {
        Self::Container(value)
    }
}

/// A container value bound to its schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    schema: Arc<ContainerSchema>,
    values: Vec<Value>,
}

impl Container {
    /// Container with every field at its default value
    #[must_use]
    pub fn default_for(schema: &Arc<ContainerSchema>) -> Self {
        Self {
            schema: Arc::clone(schema),
            values: schema
                .fields()
                .iter()
                .map(|field| Value::default_for(&field.ty))
                .collect(),
        }
    }

    /// Build a container from one value per field, in declared order.
    ///
    /// # Errors
    /// Returns an error if the field count differs or a value does not match
    /// its field type.
    pub fn new(schema: &Arc<ContainerSchema>, values: Vec<Value>) -> Result<Self, SszError> {
        if values.len() != schema.field_count() {
            return Err(SszError::FieldCount {
                container: schema.name().to_string(),
                expected: schema.field_count(),
                got: values.len(),
            });
        }
        for (field, value) in schema.fields().iter().zip(&values) {
            codec::validate(value, &field.ty)?;
        }
        Ok(Self {
            schema: Arc::clone(schema),
            values,
        })
    }

    /// Assemble a container whose values were already checked by the decoder
    pub(crate) fn from_parts(schema: Arc<ContainerSchema>, values: Vec<Value>) -> Self {
        Self { schema, values }
    }

    #[must_use]
    pub fn schema(&self) -> &Arc<ContainerSchema> {
        &self.schema
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.schema.name()
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Fields paired with their values, in declared order
    pub fn fields(&self) -> impl Iterator<Item = (&Field, &Value)> {
        self.schema.fields().iter().zip(&self.values)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema.field_index(name).map(|index| &self.values[index])
    }

    /// Follow a path of field names through nested containers
    #[must_use]
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let value = self.get(first)?;
        if rest.is_empty() {
            Some(value)
        } else {
            value.as_container()?.get_path(rest)
        }
    }

    /// Replace a field value.
    ///
    /// # Errors
    /// Returns an error if the field does not exist or the value does not
    /// match the field type.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), SszError> {
        let index = self.index_of(name)?;
        let value = value.into();
        codec::validate(&value, &self.schema.fields()[index].ty)?;
        self.values[index] = value;
        Ok(())
    }

    /// Builder form of [`Container::set`]
    ///
    /// # Errors
    /// See [`Container::set`].
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Result<Self, SszError> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Modify a field in place; the result is re-validated before it is stored.
    ///
    /// # Errors
    /// Returns an error if the field does not exist or the modified value no
    /// longer matches the field type (the field is left unchanged).
    pub fn update<F>(&mut self, name: &str, f: F) -> Result<(), SszError>
    where
        F: FnOnce(&mut Value),
    {
        let index = self.index_of(name)?;
        let mut value = self.values[index].clone();
        f(&mut value);
        codec::validate(&value, &self.schema.fields()[index].ty)?;
        self.values[index] = value;
        Ok(())
    }

    /// Append an element to a list field
    ///
    /// # Errors
    /// Returns an error if the field is not a list or would exceed its limit.
    pub fn push(&mut self, name: &str, element: impl Into<Value>) -> Result<(), SszError> {
        let element = element.into();
        let index = self.index_of(name)?;
        if !matches!(self.values[index], Value::List(_)) {
            return Err(SszError::TypeMismatch {
                expected: self.schema.fields()[index].ty.to_string(),
                got: self.values[index].kind(),
            });
        }
        self.update(name, |value| {
            if let Value::List(items) = value {
                items.push(element);
            }
        })
    }

    /// SSZ encoding of this container
    ///
    /// # Errors
    /// Returns an error if a list exceeds its limit.
    pub fn to_ssz(&self) -> Result<Vec<u8>, SszError> {
        codec::encode_container(self)
    }

    /// Decode a container of the given schema
    ///
    /// # Errors
    /// Returns an error if the bytes are not a valid encoding.
    pub fn from_ssz(schema: &Arc<ContainerSchema>, bytes: &[u8]) -> Result<Self, SszError> {
        codec::decode_container(bytes, schema)
    }

    /// Encoded length in bytes
    ///
    /// # Errors
    /// Returns an error if a field value does not match its field type.
    pub fn size_ssz(&self) -> Result<usize, SszError> {
        codec::container_size(self)
    }

    /// Hash tree root of this container
    ///
    /// # Errors
    /// Returns an error if a value does not match its field type.
    pub fn hash_tree_root(&self) -> Result<[u8; 32], SszError> {
        merkle::container_root(self)
    }

    /// Hash tree root of a single field, i.e. its leaf in the container tree
    ///
    /// # Errors
    /// Returns an error if the field does not exist.
    pub fn field_root(&self, name: &str) -> Result<[u8; 32], SszError> {
        let index = self.index_of(name)?;
        merkle::hash_tree_root(&self.values[index], &self.schema.fields()[index].ty)
    }

    /// The SSZ type of this container
    #[must_use]
    pub fn as_type(&self) -> SszType {
        SszType::container(&self.schema)
    }

    fn index_of(&self, name: &str) -> Result<usize, SszError> {
        self.schema
            .field_index(name)
            .ok_or_else(|| SszError::UnknownField {
                container: self.schema.name().to_string(),
                field: name.to_string(),
            })
    }
}
