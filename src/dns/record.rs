use super::cursor::ByteCursor;
use super::error::DecodeResult;
use super::name::decode_name;
use super::types::{RecordClass, RecordType};

/// A resource record from the answer, authority or additional section.
///
/// The record data is kept as raw bytes; interpreting it per type is left
/// to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,
    pub rtype: RecordType,
    pub class: RecordClass,
    pub ttl: u32,
    pub rdata: Vec<u8>,
    /// Absolute offset of `rdata` within the message it was decoded from.
    pub rdata_offset: usize,
}

impl ResourceRecord {
    /// Reads name, type, class, TTL, rdlength and exactly rdlength bytes
    /// of data.
    pub fn decode(cursor: &mut ByteCursor<'_>) -> DecodeResult<Self> {
        let name = decode_name(cursor)?;
        cursor.ensure(10)?;

        let rtype = RecordType::from_u16(cursor.read_u16_be()?);
        let class = RecordClass::from_u16(cursor.read_u16_be()?);
        let ttl = cursor.read_u32_be()?;
        let rdlength = cursor.read_u16_be()?;

        let rdata_offset = cursor.position();
        let rdata = cursor.read_bytes(usize::from(rdlength))?.to_vec();

        Ok(ResourceRecord {
            name,
            rtype,
            class,
            ttl,
            rdata,
            rdata_offset,
        })
    }

    /// Declared length of the record data.
    pub fn rdlength(&self) -> u16 {
        // rdata was read from a u16 length
        self.rdata.len() as u16
    }
}
