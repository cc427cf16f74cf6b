//! Value and type model for canonical call-data encoding.

use alloy::primitives::{Address, I256, U256};
use thiserror::Error;

/// Errors raised while encoding or decoding canonical call data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Buffer ended before the declared layout was satisfied.
    #[error("malformed encoding: buffer truncated at byte {at}, need {needed} more")]
    Truncated { at: usize, needed: usize },

    /// A tail offset points outside the buffer.
    #[error("malformed encoding: offset {offset} outside section of {len} bytes")]
    OffsetOutOfBounds { offset: usize, len: usize },

    /// A declared byte/element count exceeds the remaining buffer.
    #[error("malformed encoding: length {length} exceeds remaining {remaining} bytes")]
    LengthOutOfBounds { length: usize, remaining: usize },

    /// A word declared as boolean holds something other than 0 or 1.
    #[error("malformed encoding: invalid boolean word")]
    InvalidBoolean,

    /// A string payload is not valid UTF-8.
    #[error("malformed encoding: string payload is not valid utf-8")]
    InvalidUtf8,

    /// A value does not fit its declared bit width.
    #[error("value does not fit {bits}-bit {kind}")]
    ValueOutOfRange { kind: &'static str, bits: usize },

    /// Array elements do not share a single type.
    #[error("array elements must share one type")]
    MixedArray,
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Declared type of an encoded field, used to drive decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiType {
    /// Unsigned integer of the given bit width (8..=256).
    Uint(usize),
    /// Signed two's-complement integer of the given bit width.
    Int(usize),
    Address,
    Bool,
    /// Variable-length byte string.
    Bytes,
    /// UTF-8 string.
    String,
    /// Dynamic array of one element type.
    Array(Box<AbiType>),
    /// Tuple of field types.
    Tuple(Vec<AbiType>),
}

impl AbiType {
    /// Whether values of this type live in the tail section.
    ///
    /// Bytes, strings, and arrays are always dynamic; a tuple is dynamic
    /// exactly when any of its fields is.
    pub fn is_dynamic(&self) -> bool {
        match self {
            AbiType::Uint(_) | AbiType::Int(_) | AbiType::Address | AbiType::Bool => false,
            AbiType::Bytes | AbiType::String | AbiType::Array(_) => true,
            AbiType::Tuple(fields) => fields.iter().any(AbiType::is_dynamic),
        }
    }

    /// Bytes this type occupies in the head section.
    ///
    /// Dynamic fields occupy one offset word. Static tuples are laid out
    /// inline, so their head size is the sum of their fields'.
    pub fn head_size(&self) -> usize {
        match self {
            AbiType::Tuple(fields) if !self.is_dynamic() => {
                fields.iter().map(AbiType::head_size).sum()
            }
            _ => 32,
        }
    }
}

/// A value to encode, mirroring [`AbiType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    /// Unsigned integer with its declared bit width.
    Uint(U256, usize),
    /// Signed integer with its declared bit width.
    Int(I256, usize),
    Address(Address),
    Bool(bool),
    Bytes(Vec<u8>),
    String(String),
    Array(Vec<AbiValue>),
    Tuple(Vec<AbiValue>),
}

impl AbiValue {
    /// Whether this value is encoded in the tail section.
    pub fn is_dynamic(&self) -> bool {
        match self {
            AbiValue::Uint(..) | AbiValue::Int(..) | AbiValue::Address(_) | AbiValue::Bool(_) => {
                false
            }
            AbiValue::Bytes(_) | AbiValue::String(_) | AbiValue::Array(_) => true,
            AbiValue::Tuple(fields) => fields.iter().any(AbiValue::is_dynamic),
        }
    }

    /// Bytes this value occupies in the head section.
    pub fn head_size(&self) -> usize {
        match self {
            AbiValue::Tuple(fields) if !self.is_dynamic() => {
                fields.iter().map(AbiValue::head_size).sum()
            }
            _ => 32,
        }
    }
}
