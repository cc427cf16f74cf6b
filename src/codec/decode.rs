//! Structural decoding of canonical call data.
//!
//! Decoding is driven by declared [`AbiType`]s and checks structure only:
//! every offset and length must land inside the buffer. Unused high bits
//! of narrow integers are not rejected; width enforcement is an
//! encode-side concern.

use alloy::primitives::{Address, B256, I256, U256};

use crate::codec::types::{AbiType, AbiValue, CodecError, CodecResult};

/// Decode a list of argument values according to their declared types.
pub fn decode(types: &[AbiType], data: &[u8]) -> CodecResult<Vec<AbiValue>> {
    decode_section(types, data)
}

fn decode_section(types: &[AbiType], section: &[u8]) -> CodecResult<Vec<AbiValue>> {
    let mut values = Vec::with_capacity(types.len());
    let mut cursor = 0usize;
    for ty in types {
        let (value, used) = decode_value(ty, section, cursor)?;
        values.push(value);
        cursor += used;
    }
    Ok(values)
}

fn decode_value(ty: &AbiType, section: &[u8], at: usize) -> CodecResult<(AbiValue, usize)> {
    if ty.is_dynamic() {
        let offset = read_offset(section, at)?;
        let value = decode_tail(ty, &section[offset..])?;
        return Ok((value, 32));
    }

    match ty {
        AbiType::Uint(bits) => Ok((AbiValue::Uint(read_word(section, at)?, *bits), 32)),
        AbiType::Int(bits) => Ok((
            AbiValue::Int(I256::from_raw(read_word(section, at)?), *bits),
            32,
        )),
        AbiType::Address => {
            let word = read_word(section, at)?;
            Ok((AbiValue::Address(Address::from_word(B256::from(word))), 32))
        }
        AbiType::Bool => {
            let word = read_word(section, at)?;
            if word == U256::ZERO {
                Ok((AbiValue::Bool(false), 32))
            } else if word == U256::ONE {
                Ok((AbiValue::Bool(true), 32))
            } else {
                Err(CodecError::InvalidBoolean)
            }
        }
        AbiType::Tuple(fields) => {
            // Static tuple: fields sit inline at the cursor.
            let mut values = Vec::with_capacity(fields.len());
            let mut used = 0usize;
            for field in fields {
                let (value, width) = decode_value(field, section, at + used)?;
                values.push(value);
                used += width;
            }
            Ok((AbiValue::Tuple(values), used))
        }
        AbiType::Bytes | AbiType::String | AbiType::Array(_) => {
            // Unreachable through the dynamic dispatch above; decode in
            // place for consistency.
            decode_tail(ty, &section[at.min(section.len())..]).map(|v| (v, 32))
        }
    }
}

fn decode_tail(ty: &AbiType, tail: &[u8]) -> CodecResult<AbiValue> {
    match ty {
        AbiType::Bytes => Ok(AbiValue::Bytes(read_byte_payload(tail)?)),
        AbiType::String => {
            let bytes = read_byte_payload(tail)?;
            String::from_utf8(bytes)
                .map(AbiValue::String)
                .map_err(|_| CodecError::InvalidUtf8)
        }
        AbiType::Array(elem) => {
            let length = read_length(tail, 0, 32)?;
            let elem_types = vec![elem.as_ref().clone(); length];
            Ok(AbiValue::Array(decode_section(&elem_types, &tail[32..])?))
        }
        AbiType::Tuple(fields) => Ok(AbiValue::Tuple(decode_section(fields, tail)?)),
        _ => decode_value(ty, tail, 0).map(|(value, _)| value),
    }
}

fn read_word(section: &[u8], at: usize) -> CodecResult<U256> {
    match section.get(at..at + 32) {
        Some(bytes) => Ok(U256::from_be_slice(bytes)),
        None => Err(CodecError::Truncated {
            at,
            needed: (at + 32).saturating_sub(section.len()),
        }),
    }
}

fn read_offset(section: &[u8], at: usize) -> CodecResult<usize> {
    let word = read_word(section, at)?;
    match u64::try_from(word).ok().and_then(|o| usize::try_from(o).ok()) {
        Some(offset) if offset <= section.len() => Ok(offset),
        Some(offset) => Err(CodecError::OffsetOutOfBounds {
            offset,
            len: section.len(),
        }),
        None => Err(CodecError::OffsetOutOfBounds {
            offset: usize::MAX,
            len: section.len(),
        }),
    }
}

/// Read a length word at `at` and check that `length * unit` more bytes
/// actually exist past it. `unit` is 1 for byte payloads and 32 for array
/// elements (one head word each), which also bounds allocations by the
/// buffer size.
fn read_length(section: &[u8], at: usize, unit: usize) -> CodecResult<usize> {
    let word = read_word(section, at)?;
    let remaining = section.len() - (at + 32);
    let length = u64::try_from(word)
        .ok()
        .and_then(|l| usize::try_from(l).ok())
        .ok_or(CodecError::LengthOutOfBounds {
            length: usize::MAX,
            remaining,
        })?;
    let span = length
        .checked_mul(unit)
        .ok_or(CodecError::LengthOutOfBounds { length, remaining })?;
    if span > remaining {
        return Err(CodecError::LengthOutOfBounds { length, remaining });
    }
    Ok(length)
}

fn read_byte_payload(tail: &[u8]) -> CodecResult<Vec<u8>> {
    let length = read_length(tail, 0, 1)?;
    Ok(tail[32..32 + length].to_vec())
}
