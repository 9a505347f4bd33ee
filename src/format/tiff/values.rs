//! Materialize IFD entry values.
//!
//! By the time bytes reach this module their length has been validated
//! against the entry's count and element size, so decoding is infallible.

use crate::io::ByteOrder;
use crate::metadata::{Rational, TypeId, Value};

/// Decode the value bytes of one entry.
///
/// Trailing bytes that do not form a whole element are ignored.
pub fn decode_value(type_id: TypeId, bytes: &[u8], order: ByteOrder) -> Value {
    let size = type_id.element_size() as usize;
    let elements = bytes.chunks_exact(size);

    match type_id {
        TypeId::Ascii => Value::Ascii(ascii(bytes)),
        TypeId::Short => Value::Unsigned(elements.map(|c| order.read_u16(c) as u32).collect()),
        TypeId::Long | TypeId::Ifd => Value::Unsigned(elements.map(|c| order.read_u32(c)).collect()),
        TypeId::SShort => Value::Signed(elements.map(|c| order.read_u16(c) as i16 as i32).collect()),
        TypeId::SLong => Value::Signed(elements.map(|c| order.read_u32(c) as i32).collect()),
        TypeId::Rational => Value::URational(
            elements
                .map(|c| Rational {
                    num: order.read_u32(&c[0..4]),
                    den: order.read_u32(&c[4..8]),
                })
                .collect(),
        ),
        TypeId::SRational => Value::SRational(
            elements
                .map(|c| Rational {
                    num: order.read_u32(&c[0..4]) as i32,
                    den: order.read_u32(&c[4..8]) as i32,
                })
                .collect(),
        ),
        TypeId::Float => Value::Float(
            elements
                .map(|c| f32::from_bits(order.read_u32(c)) as f64)
                .collect(),
        ),
        TypeId::Double => Value::Float(elements.map(|c| f64::from_bits(order.read_u64(c))).collect()),
        _ => Value::Bytes(bytes.to_vec()),
    }
}

/// ASCII text up to the first NUL.
fn ascii(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

// =============================================================================
// Tests
// =============================================================================
