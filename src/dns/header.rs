use std::fmt;

use super::cursor::ByteCursor;
use super::error::DecodeResult;

/// Size of the fixed DNS header.
pub const HEADER_LEN: usize = 12;

/// The fixed 12-byte DNS message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub flags: Flags,
    pub question_count: u16,
    pub answer_count: u16,
    pub authority_count: u16,
    pub additional_count: u16,
}

impl Header {
    /// Reads the six big-endian header fields.
    ///
    /// Fails with `Truncated` if fewer than 12 bytes remain.
    pub fn decode(cursor: &mut ByteCursor<'_>) -> DecodeResult<Self> {
        cursor.ensure(HEADER_LEN)?;

        Ok(Header {
            id: cursor.read_u16_be()?,
            flags: Flags(cursor.read_u16_be()?),
            question_count: cursor.read_u16_be()?,
            answer_count: cursor.read_u16_be()?,
            authority_count: cursor.read_u16_be()?,
            additional_count: cursor.read_u16_be()?,
        })
    }
}

/// The packed flags word of the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(pub u16);

impl Flags {
    pub const QR: u16 = 0x8000;
    pub const AA: u16 = 0x0400;
    pub const TC: u16 = 0x0200;
    pub const RD: u16 = 0x0100;
    pub const RA: u16 = 0x0080;
    pub const Z: u16 = 0x0040;
    pub const AD: u16 = 0x0020;
    pub const CD: u16 = 0x0010;

    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[inline]
    const fn has(self, bit: u16) -> bool {
        self.0 & bit != 0
    }

    /// QR bit: set on responses.
    pub const fn is_response(self) -> bool {
        self.has(Self::QR)
    }

    pub const fn opcode(self) -> Opcode {
        Opcode::from_u8(((self.0 >> 11) & 0x0f) as u8)
    }

    pub const fn authoritative(self) -> bool {
        self.has(Self::AA)
    }

    pub const fn truncated(self) -> bool {
        self.has(Self::TC)
    }

    pub const fn recursion_desired(self) -> bool {
        self.has(Self::RD)
    }

    pub const fn recursion_available(self) -> bool {
        self.has(Self::RA)
    }

    pub const fn authentic_data(self) -> bool {
        self.has(Self::AD)
    }

    pub const fn checking_disabled(self) -> bool {
        self.has(Self::CD)
    }

    pub const fn rcode(self) -> Rcode {
        Rcode::from_u8((self.0 & 0x000f) as u8)
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

/// Header opcode (4 bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Query,
    IQuery,
    Status,
    Notify,
    Update,
    Other(u8),
}

impl Opcode {
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => Opcode::Query,
            1 => Opcode::IQuery,
            2 => Opcode::Status,
            4 => Opcode::Notify,
            5 => Opcode::Update,
            other => Opcode::Other(other),
        }
    }

    pub const fn to_u8(self) -> u8 {
        match self {
            Opcode::Query => 0,
            Opcode::IQuery => 1,
            Opcode::Status => 2,
            Opcode::Notify => 4,
            Opcode::Update => 5,
            Opcode::Other(v) => v,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opcode::Query => write!(f, "QUERY"),
            Opcode::IQuery => write!(f, "IQUERY"),
            Opcode::Status => write!(f, "STATUS"),
            Opcode::Notify => write!(f, "NOTIFY"),
            Opcode::Update => write!(f, "UPDATE"),
            Opcode::Other(v) => write!(f, "OPCODE{}", v),
        }
    }
}

/// Header response code (low 4 bits, no EDNS extension).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rcode {
    NoError,
    FormErr,
    ServFail,
    NxDomain,
    NotImp,
    Refused,
    Other(u8),
}

impl Rcode {
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => Rcode::NoError,
            1 => Rcode::FormErr,
            2 => Rcode::ServFail,
            3 => Rcode::NxDomain,
            4 => Rcode::NotImp,
            5 => Rcode::Refused,
            other => Rcode::Other(other),
        }
    }

    pub const fn to_u8(self) -> u8 {
        match self {
            Rcode::NoError => 0,
            Rcode::FormErr => 1,
            Rcode::ServFail => 2,
            Rcode::NxDomain => 3,
            Rcode::NotImp => 4,
            Rcode::Refused => 5,
            Rcode::Other(v) => v,
        }
    }
}

impl fmt::Display for Rcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rcode::NoError => write!(f, "NOERROR"),
            Rcode::FormErr => write!(f, "FORMERR"),
            Rcode::ServFail => write!(f, "SERVFAIL"),
            Rcode::NxDomain => write!(f, "NXDOMAIN"),
            Rcode::NotImp => write!(f, "NOTIMP"),
            Rcode::Refused => write!(f, "REFUSED"),
            Rcode::Other(v) => write!(f, "RCODE{}", v),
        }
    }
}
