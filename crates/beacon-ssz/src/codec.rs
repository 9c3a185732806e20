//! SSZ Encoder / Decoder
//!
//! Schema-driven implementation of the SimpleSerialize wire format: fixed-size
//! parts inline, variable-size parts behind 4-byte little-endian offsets and
//! appended after the fixed part in field order.

use crate::schema::{ContainerSchema, SszType, UintSize, BYTES_PER_LENGTH_OFFSET};
use crate::value::{Container, Value};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while encoding, decoding or validating SSZ values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SszError {
    #[error("Incorrect size: expected {expected} bytes, got {got}")]
    Size { expected: usize, got: usize },

    #[error("Invalid offset {offset}: {reason}")]
    Offset { offset: usize, reason: &'static str },

    #[error("Incorrect list size: {len} elements exceeds limit {max}")]
    IncorrectListSize { len: usize, max: usize },

    #[error("Incorrect list size: segment of {segment} bytes is not a multiple of element size {element}")]
    UnalignedListSegment { segment: usize, element: usize },

    #[error("List too big: {len} elements exceeds limit {max}")]
    ListTooBig { len: usize, max: usize },

    #[error("Vector length mismatch: expected {expected} elements, got {got}")]
    VectorLength { expected: usize, got: usize },

    #[error("Element type {0} has zero encoded size")]
    ZeroSizedElement(String),

    #[error("Invalid boolean byte {0:#04x}")]
    InvalidBool(u8),

    #[error("Invalid bitfield: {0}")]
    InvalidBitfield(&'static str),

    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: &'static str },

    #[error("Field {field} not found in {container}")]
    UnknownField { container: String, field: String },

    #[error("{container} has {expected} fields, got {got} values")]
    FieldCount {
        container: String,
        expected: usize,
        got: usize,
    },
}

/// Check that a value conforms to a type, including every list bound.
///
/// # Errors
/// Returns the first violation found, walking fields in declared order.
pub fn validate(value: &Value, ty: &SszType) -> Result<(), SszError> {
    match (ty, value) {
        (SszType::Bool, Value::Bool(_))
        | (SszType::Uint(UintSize::U8), Value::Uint8(_))
        | (SszType::Uint(UintSize::U16), Value::Uint16(_))
        | (SszType::Uint(UintSize::U32), Value::Uint32(_))
        | (SszType::Uint(UintSize::U64), Value::Uint64(_))
        | (SszType::Uint(UintSize::U128), Value::Uint128(_))
        | (SszType::Uint(UintSize::U256), Value::Uint256(_)) => Ok(()),
        (SszType::ByteVector(len), Value::Bytes(bytes)) => {
            check_exact_bytes(*len, bytes.len())
        }
        (SszType::ByteList(max), Value::Bytes(bytes)) => check_bound(bytes.len(), *max),
        (SszType::Bitvector(len), Value::Bits(bits)) => check_vector_len(*len, bits.len()),
        (SszType::Bitlist(max), Value::Bits(bits)) => check_bound(bits.len(), *max),
        (SszType::Vector(elem, len), Value::List(items)) => {
            check_vector_len(*len, items.len())?;
            items.iter().try_for_each(|item| validate(item, elem))
        }
        (SszType::List(elem, max), Value::List(items)) => {
            check_bound(items.len(), *max)?;
            items.iter().try_for_each(|item| validate(item, elem))
        }
        (SszType::Container(schema), Value::Container(container)) => {
            if container.schema() != schema {
                return Err(SszError::TypeMismatch {
                    expected: schema.name().to_string(),
                    got: "container",
                });
            }
            container
                .fields()
                .try_for_each(|(field, value)| validate(value, &field.ty))
        }
        (ty, value) => Err(SszError::TypeMismatch {
            expected: ty.to_string(),
            got: value.kind(),
        }),
    }
}

/// Check the outer shape of a value (variant, length, schema) without
/// descending into elements or fields.
pub(crate) fn validate_shallow(value: &Value, ty: &SszType) -> Result<(), SszError> {
    match (ty, value) {
        (SszType::Vector(_, len), Value::List(items)) => check_vector_len(*len, items.len()),
        (SszType::List(_, max), Value::List(items)) => check_bound(items.len(), *max),
        (SszType::Container(schema), Value::Container(container)) => {
            if container.schema() == schema {
                Ok(())
            } else {
                Err(SszError::TypeMismatch {
                    expected: schema.name().to_string(),
                    got: "container",
                })
            }
        }
        _ => validate(value, ty),
    }
}

fn check_exact_bytes(expected: usize, got: usize) -> Result<(), SszError> {
    if expected == got {
        Ok(())
    } else {
        Err(SszError::Size { expected, got })
    }
}

fn check_vector_len(expected: usize, got: usize) -> Result<(), SszError> {
    if expected == got {
        Ok(())
    } else {
        Err(SszError::VectorLength { expected, got })
    }
}

fn check_bound(len: usize, max: usize) -> Result<(), SszError> {
    if len > max {
        Err(SszError::ListTooBig { len, max })
    } else {
        Ok(())
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// Serialize a value of the given type.
///
/// The value is validated first, so a bound violation fails before any byte
/// is produced.
///
/// # Errors
/// Returns `ListTooBig` if a list or bitlist exceeds its limit, or a type
/// error if the value does not match the type.
pub fn encode(value: &Value, ty: &SszType) -> Result<Vec<u8>, SszError> {
    validate(value, ty)?;
    let mut out = Vec::with_capacity(size_ssz(value, ty)?);
    write_value(value, ty, &mut out)?;
    Ok(out)
}

/// Serialize a container without wrapping it in a [`Value`]
pub(crate) fn encode_container(container: &Container) -> Result<Vec<u8>, SszError> {
    let parts: Vec<(&Value, &SszType)> = container
        .fields()
        .map(|(field, value)| (value, &field.ty))
        .collect();
    for (value, ty) in &parts {
        validate(value, ty)?;
    }
    let mut out = Vec::with_capacity(container_size(container)?);
    write_parts(&parts, &mut out)?;
    Ok(out)
}

/// Write an already validated value
pub(crate) fn write_value(value: &Value, ty: &SszType, out: &mut Vec<u8>) -> Result<(), SszError> {
    match value {
        Value::Bool(b) => out.push(u8::from(*b)),
        Value::Uint8(v) => out.push(*v),
        Value::Uint16(v) => out.extend_from_slice(&v.to_le_bytes()),
        Value::Uint32(v) => out.extend_from_slice(&v.to_le_bytes()),
        Value::Uint64(v) => out.extend_from_slice(&v.to_le_bytes()),
        Value::Uint128(v) => out.extend_from_slice(&v.to_le_bytes()),
        Value::Uint256(le) => out.extend_from_slice(le),
        Value::Bytes(bytes) => out.extend_from_slice(bytes),
        Value::Bits(bits) => {
            let sentinel = matches!(ty, SszType::Bitlist(_));
            out.extend_from_slice(&pack_bits(bits, sentinel));
        }
        Value::List(items) => {
            let elem = ty.element_type().ok_or_else(|| SszError::TypeMismatch {
                expected: ty.to_string(),
                got: value.kind(),
            })?;
            let parts: Vec<(&Value, &SszType)> = items.iter().map(|item| (item, elem)).collect();
            write_parts(&parts, out)?;
        }
        Value::Container(container) => {
            let parts: Vec<(&Value, &SszType)> = container
                .fields()
                .map(|(field, value)| (value, &field.ty))
                .collect();
            write_parts(&parts, out)?;
        }
    }
    Ok(())
}

/// Write a sequence of values as one composite: fixed parts and offsets
/// first, then the variable parts in order.
fn write_parts(parts: &[(&Value, &SszType)], out: &mut Vec<u8>) -> Result<(), SszError> {
    let start = out.len();
    let mut placeholders = Vec::new();

    for (value, ty) in parts {
        if ty.is_fixed_size() {
            write_value(value, ty, out)?;
        } else {
            placeholders.push(out.len());
            out.extend_from_slice(&[0u8; BYTES_PER_LENGTH_OFFSET]);
        }
    }

    let variable = parts.iter().filter(|(_, ty)| !ty.is_fixed_size());
    for (placeholder, (value, ty)) in placeholders.into_iter().zip(variable) {
        let offset = out.len() - start;
        let encoded = u32::try_from(offset).map_err(|_| SszError::Offset {
            offset,
            reason: "offset does not fit in 4 bytes",
        })?;
        out[placeholder..placeholder + BYTES_PER_LENGTH_OFFSET]
            .copy_from_slice(&encoded.to_le_bytes());
        write_value(value, ty, out)?;
    }
    Ok(())
}

/// Pack bits little-endian within each byte, optionally adding the bitlist
/// length sentinel after the last bit.
pub(crate) fn pack_bits(bits: &[bool], sentinel: bool) -> Vec<u8> {
    let total = bits.len() + usize::from(sentinel);
    let mut bytes = vec![0u8; total.div_ceil(8)];
    for (i, _) in bits.iter().enumerate().filter(|(_, bit)| **bit) {
        bytes[i / 8] |= 1 << (i % 8);
    }
    if sentinel {
        let i = bits.len();
        bytes[i / 8] |= 1 << (i % 8);
    }
    bytes
}

/// Encoded length of a value without encoding it
///
/// # Errors
/// Returns a type error if the value's shape does not match the type.
pub fn size_ssz(value: &Value, ty: &SszType) -> Result<usize, SszError> {
    validate_shallow(value, ty)?;
    if let Some(size) = ty.fixed_size() {
        return Ok(size);
    }
    match (value, ty) {
        (Value::Bytes(bytes), _) => Ok(bytes.len()),
        (Value::Bits(bits), _) => Ok(bits.len() / 8 + 1),
        (Value::List(items), SszType::List(elem, _) | SszType::Vector(elem, _)) => {
            let body = items
                .iter()
                .map(|item| size_ssz(item, elem))
                .sum::<Result<usize, _>>()?;
            if elem.is_fixed_size() {
                Ok(body)
            } else {
                Ok(body + items.len() * BYTES_PER_LENGTH_OFFSET)
            }
        }
        (Value::Container(container), _) => container_size(container),
        (value, ty) => Err(SszError::TypeMismatch {
            expected: ty.to_string(),
            got: value.kind(),
        }),
    }
}

pub(crate) fn container_size(container: &Container) -> Result<usize, SszError> {
    container
        .fields()
        .map(|(field, value)| match field.ty.fixed_size() {
            Some(size) => Ok(size),
            None => Ok(BYTES_PER_LENGTH_OFFSET + size_ssz(value, &field.ty)?),
        })
        .sum()
}

// ============================================================================
// Decoding
// ============================================================================

/// Deserialize bytes as a value of the given type.
///
/// # Errors
/// Returns `Size` for a fixed-size type given the wrong number of bytes,
/// `Offset` for out-of-range or decreasing offsets, and `IncorrectListSize`
/// or `UnalignedListSegment` when a list segment implies an invalid count.
/// Sequences of zero-size elements fail with `ZeroSizedElement`.
pub fn decode(bytes: &[u8], ty: &SszType) -> Result<Value, SszError> {
    match ty {
        SszType::Bool => {
            check_exact_bytes(1, bytes.len())?;
            match bytes[0] {
                0 => Ok(Value::Bool(false)),
                1 => Ok(Value::Bool(true)),
                other => Err(SszError::InvalidBool(other)),
            }
        }
        SszType::Uint(size) => decode_uint(bytes, *size),
        SszType::ByteVector(len) => {
            check_exact_bytes(*len, bytes.len())?;
            Ok(Value::Bytes(bytes.to_vec()))
        }
        SszType::ByteList(max) => {
            if bytes.len() > *max {
                return Err(SszError::IncorrectListSize {
                    len: bytes.len(),
                    max: *max,
                });
            }
            Ok(Value::Bytes(bytes.to_vec()))
        }
        SszType::Bitvector(len) => decode_bitvector(bytes, *len),
        SszType::Bitlist(max) => decode_bitlist(bytes, *max),
        SszType::Vector(elem, len) => {
            let items = match element_size(elem)? {
                Some(size) => {
                    check_exact_bytes(size * len, bytes.len())?;
                    decode_fixed_elements(bytes, elem, size)?
                }
                None => {
                    let count = variable_element_count(bytes)?;
                    check_vector_len(*len, count)?;
                    decode_variable_elements(bytes, elem, count)?
                }
            };
            Ok(Value::List(items))
        }
        SszType::List(elem, max) => {
            let items = match element_size(elem)? {
                Some(size) => {
                    if bytes.len() % size != 0 {
                        return Err(SszError::UnalignedListSegment {
                            segment: bytes.len(),
                            element: size,
                        });
                    }
                    let count = bytes.len() / size;
                    if count > *max {
                        return Err(SszError::IncorrectListSize { len: count, max: *max });
                    }
                    decode_fixed_elements(bytes, elem, size)?
                }
                None => {
                    let count = variable_element_count(bytes)?;
                    if count > *max {
                        return Err(SszError::IncorrectListSize { len: count, max: *max });
                    }
                    decode_variable_elements(bytes, elem, count)?
                }
            };
            Ok(Value::List(items))
        }
        SszType::Container(schema) => decode_container(bytes, schema).map(Value::Container),
    }
}

fn decode_uint(bytes: &[u8], size: UintSize) -> Result<Value, SszError> {
    check_exact_bytes(size.byte_len(), bytes.len())?;
    let value = match size {
        UintSize::U8 => Value::Uint8(bytes[0]),
        UintSize::U16 => Value::Uint16(u16::from_le_bytes(to_array(bytes))),
        UintSize::U32 => Value::Uint32(u32::from_le_bytes(to_array(bytes))),
        UintSize::U64 => Value::Uint64(u64::from_le_bytes(to_array(bytes))),
        UintSize::U128 => Value::Uint128(u128::from_le_bytes(to_array(bytes))),
        UintSize::U256 => Value::Uint256(to_array(bytes)),
    };
    Ok(value)
}

/// Copy a slice whose length was already checked into an array
fn to_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[..N]);
    out
}

fn decode_bitvector(bytes: &[u8], len: usize) -> Result<Value, SszError> {
    check_exact_bytes(len.div_ceil(8), bytes.len())?;
    let bits = unpack_bits(bytes, len);
    if len % 8 != 0 {
        let last = bytes[bytes.len() - 1];
        if last >> (len % 8) != 0 {
            return Err(SszError::InvalidBitfield("bitvector padding bits set"));
        }
    }
    Ok(Value::Bits(bits))
}

fn decode_bitlist(bytes: &[u8], max: usize) -> Result<Value, SszError> {
    let Some(&last) = bytes.last() else {
        return Err(SszError::InvalidBitfield("bitlist is empty, missing sentinel"));
    };
    if last == 0 {
        return Err(SszError::InvalidBitfield("bitlist last byte has no sentinel bit"));
    }
    let sentinel = 7 - last.leading_zeros() as usize;
    let len = (bytes.len() - 1) * 8 + sentinel;
    if len > max {
        return Err(SszError::IncorrectListSize { len, max });
    }
    Ok(Value::Bits(unpack_bits(bytes, len)))
}

fn unpack_bits(bytes: &[u8], len: usize) -> Vec<bool> {
    (0..len).map(|i| bytes[i / 8] >> (i % 8) & 1 == 1).collect()
}

/// Encoded size of a sequence element, `None` when variable
fn element_size(elem: &SszType) -> Result<Option<usize>, SszError> {
    match elem.fixed_size() {
        Some(0) => Err(SszError::ZeroSizedElement(elem.to_string())),
        size => Ok(size),
    }
}

fn decode_fixed_elements(bytes: &[u8], elem: &SszType, size: usize) -> Result<Vec<Value>, SszError> {
    bytes.chunks_exact(size).map(|chunk| decode(chunk, elem)).collect()
}

fn read_offset(bytes: &[u8], at: usize) -> Result<usize, SszError> {
    let slice = bytes
        .get(at..at + BYTES_PER_LENGTH_OFFSET)
        .ok_or(SszError::Size {
            expected: at + BYTES_PER_LENGTH_OFFSET,
            got: bytes.len(),
        })?;
    Ok(u32::from_le_bytes(to_array(slice)) as usize)
}

/// Number of variable-size elements, read from the first entry of the
/// offset table that heads the encoding.
fn variable_element_count(bytes: &[u8]) -> Result<usize, SszError> {
    if bytes.is_empty() {
        return Ok(0);
    }
    let first = read_offset(bytes, 0)?;
    if first == 0 || first % BYTES_PER_LENGTH_OFFSET != 0 {
        return Err(SszError::Offset {
            offset: first,
            reason: "first offset is not a multiple of the offset size",
        });
    }
    if first > bytes.len() {
        return Err(SszError::Offset {
            offset: first,
            reason: "offset beyond end of buffer",
        });
    }
    Ok(first / BYTES_PER_LENGTH_OFFSET)
}

/// Elements of a variable-size vector or list: `count` offsets followed by
/// the element bodies.
fn decode_variable_elements(bytes: &[u8], elem: &SszType, count: usize) -> Result<Vec<Value>, SszError> {
    if count == 0 {
        return Ok(Vec::new());
    }
    let first = count * BYTES_PER_LENGTH_OFFSET;
    let offsets = (0..count)
        .map(|i| read_offset(bytes, i * BYTES_PER_LENGTH_OFFSET))
        .collect::<Result<Vec<_>, _>>()?;
    check_offsets(&offsets, first, bytes.len())?;

    segments(&offsets, bytes.len())
        .map(|(start, end)| decode(&bytes[start..end], elem))
        .collect()
}

/// Offsets must start at the end of the fixed part, never decrease and never
/// point past the end of the buffer.
fn check_offsets(offsets: &[usize], fixed_part: usize, len: usize) -> Result<(), SszError> {
    let mut previous = fixed_part;
    for (i, &offset) in offsets.iter().enumerate() {
        if i == 0 && offset != fixed_part {
            return Err(SszError::Offset {
                offset,
                reason: "first offset does not match the fixed part size",
            });
        }
        if offset < previous {
            return Err(SszError::Offset {
                offset,
                reason: "offsets are decreasing",
            });
        }
        if offset > len {
            return Err(SszError::Offset {
                offset,
                reason: "offset beyond end of buffer",
            });
        }
        previous = offset;
    }
    Ok(())
}

/// `(start, end)` byte ranges delimited by consecutive offsets
fn segments(offsets: &[usize], len: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
    offsets.iter().enumerate().map(move |(i, &start)| {
        let end = offsets.get(i + 1).copied().unwrap_or(len);
        (start, end)
    })
}

/// Decode a container of the given schema.
///
/// # Errors
/// See [`decode`].
pub fn decode_container(bytes: &[u8], schema: &Arc<ContainerSchema>) -> Result<Container, SszError> {
    let fixed_part = schema.fixed_part_size();
    if schema.fixed_size().is_some() {
        check_exact_bytes(fixed_part, bytes.len())?;
    } else if bytes.len() < fixed_part {
        return Err(SszError::Size {
            expected: fixed_part,
            got: bytes.len(),
        });
    }

    // First pass: fixed fields and the offset table
    let mut values: Vec<Option<Value>> = Vec::with_capacity(schema.field_count());
    let mut variable = Vec::new();
    let mut offsets = Vec::new();
    let mut pos = 0;
    for (index, field) in schema.fields().iter().enumerate() {
        match field.ty.fixed_size() {
            Some(size) => {
                values.push(Some(decode(&bytes[pos..pos + size], &field.ty)?));
                pos += size;
            }
            None => {
                offsets.push(read_offset(bytes, pos)?);
                variable.push(index);
                values.push(None);
                pos += BYTES_PER_LENGTH_OFFSET;
            }
        }
    }
    check_offsets(&offsets, fixed_part, bytes.len())?;

    // Second pass: variable fields, each bounded by the next offset
    for (&index, (start, end)) in variable.iter().zip(segments(&offsets, bytes.len())) {
        let field = &schema.fields()[index];
        values[index] = Some(decode(&bytes[start..end], &field.ty)?);
    }

    let values = values
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or(SszError::Offset {
            offset: bytes.len(),
            reason: "variable field without an offset",
        })?;
    Ok(Container::from_parts(Arc::clone(schema), values))
}
