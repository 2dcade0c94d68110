//! Type-specific interpretation of record data.

use std::fmt::{self, Write};
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::dns::{ByteCursor, DecodeResult, RecordType, ResourceRecord, decode_name};

/// Record data interpreted according to the record type.
///
/// Anything the renderer does not understand, or that fails to parse,
/// ends up as `Opaque`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Ns(String),
    Cname(String),
    Ptr(String),
    Mx {
        preference: u16,
        exchange: String,
    },
    Txt(Vec<Vec<u8>>),
    Soa {
        mname: String,
        rname: String,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    },
    Srv {
        priority: u16,
        weight: u16,
        port: u16,
        target: String,
    },
    Opaque(Vec<u8>),
}

impl RData {
    /// Interprets the data of `record`.
    ///
    /// When `wire` is the message the record was decoded from, compressed
    /// names inside the data are resolved against it. Without it, names
    /// can only be read if they are not compressed.
    pub fn interpret(record: &ResourceRecord, wire: Option<&[u8]>) -> RData {
        let data = &record.rdata;
        let cursor = wire
            .and_then(|wire| rdata_cursor(wire, record.rdata_offset, data))
            .unwrap_or_else(|| ByteCursor::new(data));

        parse(record.rtype, cursor).unwrap_or_else(|| RData::Opaque(data.clone()))
    }
}

/// A cursor over `wire` that starts at the record data and ends with it, so
/// pointers can still reach back into the message.
fn rdata_cursor<'a>(wire: &'a [u8], offset: usize, rdata: &[u8]) -> Option<ByteCursor<'a>> {
    let end = offset.checked_add(rdata.len())?;
    if wire.get(offset..end)? != rdata {
        return None;
    }
    let mut cursor = ByteCursor::new(&wire[..end]);
    cursor.set_position(offset).ok()?;
    Some(cursor)
}

fn parse(rtype: RecordType, mut cursor: ByteCursor<'_>) -> Option<RData> {
    let rdata = match rtype {
        RecordType::A => {
            let bytes: [u8; 4] = cursor.read_bytes(4).ok()?.try_into().ok()?;
            RData::A(Ipv4Addr::from(bytes))
        }
        RecordType::AAAA => {
            let bytes: [u8; 16] = cursor.read_bytes(16).ok()?.try_into().ok()?;
            RData::Aaaa(Ipv6Addr::from(bytes))
        }
        RecordType::NS => RData::Ns(decode_name(&mut cursor).ok()?),
        RecordType::CNAME => RData::Cname(decode_name(&mut cursor).ok()?),
        RecordType::PTR => RData::Ptr(decode_name(&mut cursor).ok()?),
        RecordType::MX => RData::Mx {
            preference: cursor.read_u16_be().ok()?,
            exchange: decode_name(&mut cursor).ok()?,
        },
        RecordType::TXT => RData::Txt(character_strings(&mut cursor).ok()?),
        RecordType::SOA => RData::Soa {
            mname: decode_name(&mut cursor).ok()?,
            rname: decode_name(&mut cursor).ok()?,
            serial: cursor.read_u32_be().ok()?,
            refresh: cursor.read_u32_be().ok()?,
            retry: cursor.read_u32_be().ok()?,
            expire: cursor.read_u32_be().ok()?,
            minimum: cursor.read_u32_be().ok()?,
        },
        RecordType::SRV => RData::Srv {
            priority: cursor.read_u16_be().ok()?,
            weight: cursor.read_u16_be().ok()?,
            port: cursor.read_u16_be().ok()?,
            target: decode_name(&mut cursor).ok()?,
        },
        _ => return None,
    };

    // leftover bytes mean we misread the data
    (cursor.remaining() == 0).then_some(rdata)
}

fn character_strings(cursor: &mut ByteCursor<'_>) -> DecodeResult<Vec<Vec<u8>>> {
    let mut strings = Vec::new();
    while cursor.remaining() > 0 {
        let len = cursor.read_u8()?;
        strings.push(cursor.read_bytes(usize::from(len))?.to_vec());
    }
    Ok(strings)
}

/// Quoted presentation form of a character-string.
pub fn quote_text(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 2);
    out.push('"');
    for &byte in bytes {
        match byte {
            b'"' | b'\\' => {
                out.push('\\');
                out.push(char::from(byte));
            }
            0x20..=0x7e => out.push(char::from(byte)),
            _ => {
                let _ = write!(out, "\\{byte:03}");
            }
        }
    }
    out.push('"');
    out
}

/// Space separated lowercase hex, e.g. `5d b8 d8 22`.
pub fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `<root>` stands in for the empty root name.
pub fn display_name(name: &str) -> &str {
    if name.is_empty() { "<root>" } else { name }
}

impl fmt::Display for RData {
    /// Zone-file style one-liner.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RData::A(addr) => write!(f, "{}", addr),
            RData::Aaaa(addr) => write!(f, "{}", addr),
            RData::Ns(name) | RData::Cname(name) | RData::Ptr(name) => {
                write!(f, "{}", display_name(name))
            }
            RData::Mx { preference, exchange } => {
                write!(f, "{} {}", preference, display_name(exchange))
            }
            RData::Txt(strings) => {
                let quoted: Vec<String> = strings.iter().map(|s| quote_text(s)).collect();
                write!(f, "{}", quoted.join(" "))
            }
            RData::Soa { mname, rname, serial, refresh, retry, expire, minimum } => write!(
                f,
                "{} {} {} {} {} {} {}",
                display_name(mname),
                display_name(rname),
                serial,
                refresh,
                retry,
                expire,
                minimum
            ),
            RData::Srv { priority, weight, port, target } => {
                write!(f, "{} {} {} {}", priority, weight, port, display_name(target))
            }
            // RFC 3597 generic form
            RData::Opaque(bytes) if bytes.is_empty() => write!(f, "\\# 0"),
            RData::Opaque(bytes) => {
                let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
                write!(f, "\\# {} {}", bytes.len(), hex)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::RecordClass;

    fn record(rtype: RecordType, rdata: &[u8], rdata_offset: usize) -> ResourceRecord {
        ResourceRecord {
            name: "example.com".into(),
            rtype,
            class: RecordClass::IN,
            ttl: 300,
            rdata: rdata.to_vec(),
            rdata_offset,
        }
    }

    #[test]
    fn a_and_aaaa() {
        let a = record(RecordType::A, &[93, 184, 216, 34], 0);
        assert_eq!(RData::interpret(&a, None), RData::A(Ipv4Addr::new(93, 184, 216, 34)));

        let mut v6 = [0u8; 16];
        v6[0] = 0x20;
        v6[1] = 0x01;
        v6[2] = 0x0d;
        v6[3] = 0xb8;
        v6[15] = 1;
        let aaaa = record(RecordType::AAAA, &v6, 0);
        assert_eq!(RData::interpret(&aaaa, None).to_string(), "2001:db8::1");
    }

    #[test]
    fn wrong_length_address_is_opaque() {
        let a = record(RecordType::A, &[1, 2, 3], 0);
        assert_eq!(RData::interpret(&a, None), RData::Opaque(vec![1, 2, 3]));
    }

    #[test]
    fn mx_with_plain_name() {
        let mx = record(RecordType::MX, b"\x00\x0a\x04mail\x07example\x03com\x00", 0);
        assert_eq!(
            RData::interpret(&mx, None),
            RData::Mx { preference: 10, exchange: "mail.example.com".into() }
        );
    }

    #[test]
    fn compressed_cname_needs_wire() {
        // name "example.com" at offset 0, then CNAME rdata "www" + pointer to 0
        let mut wire = b"\x07example\x03com\x00".to_vec();
        let offset = wire.len();
        wire.extend_from_slice(b"\x03www\xc0\x00");
        let cname = record(RecordType::CNAME, &wire[offset..], offset);

        assert_eq!(
            RData::interpret(&cname, Some(wire.as_slice())),
            RData::Cname("www.example.com".into())
        );
        assert!(matches!(RData::interpret(&cname, None), RData::Opaque(_)));
    }

    #[test]
    fn mismatched_wire_is_not_trusted() {
        let wire = [0u8; 8];
        let ns = record(RecordType::NS, b"\x02ns\x00", 2);
        assert_eq!(RData::interpret(&ns, Some(&wire[..])), RData::Ns("ns".into()));
    }

    #[test]
    fn txt_strings() {
        let txt = record(RecordType::TXT, b"\x05hello\x0bv=spf1 -all\x00", 0);
        let rdata = RData::interpret(&txt, None);
        assert_eq!(rdata.to_string(), "\"hello\" \"v=spf1 -all\" \"\"");
    }

    #[test]
    fn soa_and_srv() {
        let soa = record(
            RecordType::SOA,
            b"\x02ns\x00\x05admin\x00\x00\x00\x00\x01\x00\x00\x0e\x10\x00\x00\x03\x84\x00\x09\x3a\x80\x00\x00\x01\x2c",
            0,
        );
        assert_eq!(
            RData::interpret(&soa, None).to_string(),
            "ns admin 1 3600 900 604800 300"
        );

        let srv = record(RecordType::SRV, b"\x00\x01\x00\x05\x14\x66\x03sip\x00", 0);
        assert_eq!(RData::interpret(&srv, None).to_string(), "1 5 5222 sip");
    }

    #[test]
    fn trailing_garbage_is_opaque() {
        let ptr = record(RecordType::PTR, b"\x01a\x00\xff", 0);
        assert_eq!(RData::interpret(&ptr, None).to_string(), "\\# 4 016100ff");
    }

    #[test]
    fn unknown_types_are_opaque() {
        let unknown = record(RecordType::Unknown(99), &[0xde, 0xad], 0);
        let rdata = RData::interpret(&unknown, None);
        assert_eq!(rdata.to_string(), "\\# 2 dead");
        assert_eq!(RData::Opaque(Vec::new()).to_string(), "\\# 0");
    }

    #[test]
    fn helpers() {
        assert_eq!(hex_bytes(&[0x5d, 0xb8, 0x0a]), "5d b8 0a");
        assert_eq!(quote_text(b"a\"b\x01"), "\"a\\\"b\\001\"");
        assert_eq!(display_name(""), "<root>");
        assert_eq!(display_name("a.b"), "a.b");
    }
}
