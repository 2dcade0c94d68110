//! Domain name decoding with compression pointer support (RFC 1035 4.1.4).
//!
//! Names are returned in presentation form: labels joined by `.`, no
//! trailing dot, and the root name as the empty string. Label bytes that
//! are not printable ASCII, as well as literal dots and backslashes, are
//! escaped so that the dotted form stays unambiguous.

use std::fmt::Write;

use super::cursor::ByteCursor;
use super::error::{DecodeError, DecodeResult};

/// Upper bound on pointer jumps for a single name.
pub const MAX_POINTER_JUMPS: usize = 128;

/// Longest wire encoding of a name, pointers resolved (RFC 1035 2.3.4).
pub const MAX_NAME_LEN: usize = 255;

const POINTER_MASK: u8 = 0xC0;

/// Decodes the name at the cursor's position.
///
/// On success the cursor sits right after the name's own encoding: after
/// the terminating zero octet, or after the two pointer octets if the name
/// ends in a compression pointer. Pointer targets are read through a
/// separate cursor and never move the caller's position.
///
/// Length and root octets are counted across every hop; a name whose
/// resolved encoding passes [`MAX_NAME_LEN`] fails with `NameTooLong`.
pub fn decode_name(cursor: &mut ByteCursor<'_>) -> DecodeResult<String> {
    let mut name = String::new();
    let mut wire_len = 0;

    let Some(mut jump) = read_labels(cursor, &mut name, &mut wire_len)? else {
        return Ok(name);
    };

    let data = cursor.data();
    let mut chain = ByteCursor::new(data);
    let mut visited: Vec<usize> = Vec::new();

    loop {
        let Jump { at, target } = jump;
        if target >= data.len() || visited.contains(&target) || visited.len() >= MAX_POINTER_JUMPS {
            return Err(DecodeError::malformed_pointer(at, target));
        }
        visited.push(target);

        chain.set_position(target)?;
        match read_labels(&mut chain, &mut name, &mut wire_len)? {
            Some(next) => jump = next,
            None => return Ok(name),
        }
    }
} // decode_name

/// Decodes a name starting at `offset` of `data`.
///
/// Returns the name and the offset right after its own encoding.
pub fn decode_name_at(data: &[u8], offset: usize) -> DecodeResult<(String, usize)> {
    let mut cursor = ByteCursor::new(data);
    cursor.set_position(offset)?;
    let name = decode_name(&mut cursor)?;
    Ok((name, cursor.position()))
}

/// A compression pointer found at `at`, referring to `target`.
#[derive(Debug, Clone, Copy)]
struct Jump {
    at: usize,
    target: usize,
}

/// Appends labels to `name` until the root label or a pointer.
///
/// Returns `None` when the root label ended the run, or the pointer that
/// did. `wire_len` accumulates the octets the name occupies once resolved.
fn read_labels(
    cursor: &mut ByteCursor<'_>,
    name: &mut String,
    wire_len: &mut usize,
) -> DecodeResult<Option<Jump>> {
    loop {
        let at = cursor.position();
        let octet = cursor.read_u8()?;

        match octet & POINTER_MASK {
            POINTER_MASK => {
                let low = cursor.read_u8()?;
                let target = (usize::from(octet & !POINTER_MASK) << 8) | usize::from(low);
                return Ok(Some(Jump { at, target }));
            }
            0 if octet == 0 => {
                count_octets(wire_len, 1, at)?;
                return Ok(None);
            }
            0 => {
                count_octets(wire_len, 1 + usize::from(octet), at)?;
                let label = cursor.read_bytes(usize::from(octet))?;
                push_label(name, label);
            }
            _ => return Err(DecodeError::InvalidLabelType { offset: at, octet }),
        }
    }
}

fn count_octets(wire_len: &mut usize, octets: usize, at: usize) -> DecodeResult<()> {
    *wire_len += octets;
    if *wire_len > MAX_NAME_LEN {
        return Err(DecodeError::NameTooLong { offset: at, length: *wire_len });
    }
    Ok(())
}

fn push_label(name: &mut String, label: &[u8]) {
    if !name.is_empty() {
        name.push('.');
    }
    for &byte in label {
        match byte {
            b'.' | b'\\' => {
                name.push('\\');
                name.push(char::from(byte));
            }
            0x21..=0x7e => name.push(char::from(byte)),
            // writing into a String cannot fail
            _ => {
                let _ = write!(name, "\\{byte:03}");
            }
        }
    }
}
