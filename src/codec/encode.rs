//! Two-pass head/tail encoding of call-data tuples.
//!
//! Pass one sizes the head from each field's static/dynamic
//! classification; pass two emits inline words and tail offsets in
//! declaration order. Offsets are relative to the start of the enclosing
//! section, so a composite payload must be produced by a single [`encode`]
//! call over its full outer shape. Concatenating two independently encoded
//! fragments leaves the second fragment's offsets pointing at the wrong
//! bytes.

use alloy::primitives::{I256, U256};

use crate::codec::types::{AbiValue, CodecError, CodecResult};

/// Encode a list of argument values in canonical head/tail form.
///
/// This is the layout used for function arguments: heads start at byte 0
/// with no outer offset word.
pub fn encode(values: &[AbiValue]) -> CodecResult<Vec<u8>> {
    let mut out = Vec::new();
    encode_section(values, &mut out)?;
    Ok(out)
}

fn encode_section(values: &[AbiValue], out: &mut Vec<u8>) -> CodecResult<()> {
    let head_size: usize = values.iter().map(AbiValue::head_size).sum();
    let mut tail: Vec<u8> = Vec::new();

    for value in values {
        match value {
            AbiValue::Uint(v, bits) => {
                if *bits < 256 && v.bit_len() > *bits {
                    return Err(CodecError::ValueOutOfRange { kind: "uint", bits: *bits });
                }
                push_word(out, *v);
            }
            AbiValue::Int(v, bits) => {
                if !int_fits(*v, *bits) {
                    return Err(CodecError::ValueOutOfRange { kind: "int", bits: *bits });
                }
                out.extend_from_slice(&v.to_be_bytes::<32>());
            }
            AbiValue::Address(addr) => {
                out.extend_from_slice(&[0u8; 12]);
                out.extend_from_slice(addr.as_slice());
            }
            AbiValue::Bool(b) => {
                let mut word = [0u8; 32];
                word[31] = u8::from(*b);
                out.extend_from_slice(&word);
            }
            AbiValue::Tuple(fields) if !value.is_dynamic() => {
                // Static tuples are laid out inline in the head.
                encode_section(fields, out)?;
            }
            AbiValue::Bytes(bytes) => {
                push_word(out, U256::from(head_size + tail.len()));
                write_byte_payload(bytes, &mut tail);
            }
            AbiValue::String(s) => {
                push_word(out, U256::from(head_size + tail.len()));
                write_byte_payload(s.as_bytes(), &mut tail);
            }
            AbiValue::Array(elems) => {
                ensure_homogeneous(elems)?;
                push_word(out, U256::from(head_size + tail.len()));
                push_word(&mut tail, U256::from(elems.len()));
                // Element offsets are relative to the byte after the length
                // word, which is exactly a fresh section start.
                encode_section(elems, &mut tail)?;
            }
            AbiValue::Tuple(fields) => {
                push_word(out, U256::from(head_size + tail.len()));
                encode_section(fields, &mut tail)?;
            }
        }
    }

    out.extend_from_slice(&tail);
    Ok(())
}

fn push_word(out: &mut Vec<u8>, word: U256) {
    out.extend_from_slice(&word.to_be_bytes::<32>());
}

fn write_byte_payload(bytes: &[u8], tail: &mut Vec<u8>) {
    push_word(tail, U256::from(bytes.len()));
    tail.extend_from_slice(bytes);
    let rem = bytes.len() % 32;
    if rem != 0 {
        tail.resize(tail.len() + (32 - rem), 0);
    }
}

fn int_fits(value: I256, bits: usize) -> bool {
    if bits == 0 {
        return false;
    }
    if bits >= 256 {
        return true;
    }
    let half = U256::ONE << (bits - 1);
    let max = I256::from_raw(half - U256::ONE);
    let min = I256::from_raw(half).wrapping_neg();
    value >= min && value <= max
}

// Discriminant check only; per-element widths are validated as the
// elements themselves are encoded.
fn ensure_homogeneous(elems: &[AbiValue]) -> CodecResult<()> {
    let mut kinds = elems.iter().map(std::mem::discriminant);
    if let Some(first) = kinds.next() {
        if kinds.any(|kind| kind != first) {
            return Err(CodecError::MixedArray);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;

    fn word_at(out: &[u8], index: usize) -> U256 {
        U256::from_be_slice(&out[index * 32..(index + 1) * 32])
    }

    #[test]
    fn test_static_scalars_one_word_each() {
        let addr = Address::repeat_byte(0x11);
        let out = encode(&[
            AbiValue::Uint(U256::from(1), 256),
            AbiValue::Address(addr),
            AbiValue::Bool(true),
        ])
        .unwrap();

        assert_eq!(out.len(), 96);
        assert_eq!(word_at(&out, 0), U256::from(1));
        // Address sits in the low 20 bytes of its word.
        assert_eq!(&out[32..44], &[0u8; 12]);
        assert_eq!(&out[44..64], addr.as_slice());
        assert_eq!(word_at(&out, 2), U256::from(1));
    }

    #[test]
    fn test_negative_int_sign_extends() {
        let out = encode(&[AbiValue::Int(I256::MINUS_ONE, 256)]).unwrap();
        assert_eq!(out, vec![0xffu8; 32]);
    }

    #[test]
    fn test_bytes_payload_layout() {
        let out = encode(&[AbiValue::Bytes(vec![0xde, 0xad, 0xbe, 0xef])]).unwrap();

        assert_eq!(out.len(), 96);
        assert_eq!(word_at(&out, 0), U256::from(0x20));
        assert_eq!(word_at(&out, 1), U256::from(4));
        assert_eq!(&out[64..68], &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(&out[68..96], &[0u8; 28]);
    }

    #[test]
    fn test_static_tuple_inlines_without_offset() {
        let pool_key = AbiValue::Tuple(vec![
            AbiValue::Address(Address::repeat_byte(0x01)),
            AbiValue::Address(Address::repeat_byte(0x02)),
            AbiValue::Uint(U256::from(3000), 24),
            AbiValue::Int(I256::try_from(60).unwrap(), 24),
            AbiValue::Address(Address::ZERO),
        ]);
        let out = encode(&[pool_key]).unwrap();

        // Five inline words, no offset word anywhere.
        assert_eq!(out.len(), 160);
        assert_eq!(word_at(&out, 2), U256::from(3000));
        assert_eq!(word_at(&out, 3), U256::from(60));
    }

    #[test]
    fn test_dynamic_tuple_layout() {
        // Shape of a multi-signer approval: (string, uint256, address[], bytes[]).
        let tuple = AbiValue::Tuple(vec![
            AbiValue::String("t-1".to_string()),
            AbiValue::Uint(U256::from(100), 256),
            AbiValue::Array(vec![AbiValue::Address(Address::repeat_byte(0xaa))]),
            AbiValue::Array(vec![AbiValue::Bytes(vec![0u8; 65])]),
        ]);
        let out = encode(&[tuple]).unwrap();

        assert_eq!(out.len(), 480);
        // One offset word to the tuple body.
        assert_eq!(word_at(&out, 0), U256::from(0x20));
        // Body head: string offset, inline uint, two array offsets.
        assert_eq!(word_at(&out, 1), U256::from(0x80));
        assert_eq!(word_at(&out, 2), U256::from(100));
        assert_eq!(word_at(&out, 3), U256::from(0xc0));
        assert_eq!(word_at(&out, 4), U256::from(0x100));
        // String tail: length then padded payload.
        assert_eq!(word_at(&out, 5), U256::from(3));
        assert_eq!(&out[192..195], b"t-1");
        // Signer array: length one, inline address.
        assert_eq!(word_at(&out, 7), U256::from(1));
        // Signature array: length, element offset, element length.
        assert_eq!(word_at(&out, 9), U256::from(1));
        assert_eq!(word_at(&out, 10), U256::from(0x20));
        assert_eq!(word_at(&out, 11), U256::from(65));
    }

    #[test]
    fn test_empty_array() {
        let out = encode(&[AbiValue::Array(vec![])]).unwrap();
        assert_eq!(out.len(), 64);
        assert_eq!(word_at(&out, 0), U256::from(0x20));
        assert_eq!(word_at(&out, 1), U256::ZERO);
    }

    #[test]
    fn test_uint_width_enforced() {
        let ok = encode(&[AbiValue::Uint(U256::from((1u64 << 24) - 1), 24)]);
        assert!(ok.is_ok());

        let err = encode(&[AbiValue::Uint(U256::from(1u64 << 24), 24)]).unwrap_err();
        assert_eq!(err, CodecError::ValueOutOfRange { kind: "uint", bits: 24 });
    }

    #[test]
    fn test_int_width_enforced() {
        let max = I256::try_from((1i64 << 23) - 1).unwrap();
        let min = I256::try_from(-(1i64 << 23)).unwrap();
        assert!(encode(&[AbiValue::Int(max, 24)]).is_ok());
        assert!(encode(&[AbiValue::Int(min, 24)]).is_ok());

        let over = I256::try_from(1i64 << 23).unwrap();
        let err = encode(&[AbiValue::Int(over, 24)]).unwrap_err();
        assert_eq!(err, CodecError::ValueOutOfRange { kind: "int", bits: 24 });

        let under = I256::try_from(-(1i64 << 23) - 1).unwrap();
        assert!(encode(&[AbiValue::Int(under, 24)]).is_err());
    }

    #[test]
    fn test_mixed_array_rejected() {
        let err = encode(&[AbiValue::Array(vec![
            AbiValue::Address(Address::ZERO),
            AbiValue::Bool(true),
        ])])
        .unwrap_err();
        assert_eq!(err, CodecError::MixedArray);
    }

    #[test]
    fn test_array_of_bytes_offsets_relative_to_element_section() {
        let out = encode(&[AbiValue::Array(vec![AbiValue::Bytes(vec![0xab; 65])])]).unwrap();

        assert_eq!(out.len(), 224);
        assert_eq!(word_at(&out, 0), U256::from(0x20));
        assert_eq!(word_at(&out, 1), U256::from(1));
        // Element offset counts from just past the length word.
        assert_eq!(word_at(&out, 2), U256::from(0x20));
        assert_eq!(word_at(&out, 3), U256::from(65));
    }
}
