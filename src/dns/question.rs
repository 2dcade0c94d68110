use super::cursor::ByteCursor;
use super::error::DecodeResult;
use super::name::decode_name;
use super::types::{RecordClass, RecordType};

/// One entry of the question section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    pub qtype: RecordType,
    pub qclass: RecordClass,
}

impl Question {
    /// Reads a name followed by the 2-byte type and 2-byte class.
    pub fn decode(cursor: &mut ByteCursor<'_>) -> DecodeResult<Self> {
        let name = decode_name(cursor)?;
        cursor.ensure(4)?;

        Ok(Question {
            name,
            qtype: RecordType::from_u16(cursor.read_u16_be()?),
            qclass: RecordClass::from_u16(cursor.read_u16_be()?),
        })
    }
}
