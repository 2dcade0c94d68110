use std::fmt;

use super::cursor::ByteCursor;
use super::error::DecodeResult;
use super::header::Header;
use super::question::Question;
use super::record::ResourceRecord;

/// Which side of an exchange a message came from.
///
/// Supplied by whoever hands the bytes to the decoder; the decoder does
/// not look at the QR bit to decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Query,
    Response,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Query => write!(f, "Query"),
            Role::Response => write!(f, "Response"),
        }
    }
}

/// A fully decoded DNS message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}

impl Message {
    /// Decodes `buf` according to `role`.
    pub fn decode(buf: &[u8], role: Role) -> DecodeResult<Self> {
        match role {
            Role::Query => Self::decode_query(buf),
            Role::Response => Self::decode_response(buf),
        }
    }

    /// Decodes the header and the question section only.
    ///
    /// Record sections are not read for queries, whatever the header
    /// counts claim, so `answers`, `authorities` and `additionals` are
    /// always empty.
    pub fn decode_query(buf: &[u8]) -> DecodeResult<Self> {
        let mut cursor = ByteCursor::new(buf);
        let header = Header::decode(&mut cursor)?;
        let questions = decode_questions(&mut cursor, header.question_count)?;

        Ok(Message {
            header,
            questions,
            answers: Vec::new(),
            authorities: Vec::new(),
            additionals: Vec::new(),
        })
    }

    /// Decodes the header, the questions and all three record sections,
    /// in wire order.
    pub fn decode_response(buf: &[u8]) -> DecodeResult<Self> {
        let mut cursor = ByteCursor::new(buf);
        let header = Header::decode(&mut cursor)?;
        let questions = decode_questions(&mut cursor, header.question_count)?;
        let answers = decode_records(&mut cursor, header.answer_count)?;
        let authorities = decode_records(&mut cursor, header.authority_count)?;
        let additionals = decode_records(&mut cursor, header.additional_count)?;

        Ok(Message {
            header,
            questions,
            answers,
            authorities,
            additionals,
        })
    }

    /// All records of the three sections, in wire order.
    pub fn records(&self) -> impl Iterator<Item = &ResourceRecord> {
        self.answers
            .iter()
            .chain(self.authorities.iter())
            .chain(self.additionals.iter())
    }
}

fn decode_questions(cursor: &mut ByteCursor<'_>, count: u16) -> DecodeResult<Vec<Question>> {
    // counts come from the wire, so don't trust them for preallocation
    let mut questions = Vec::with_capacity(usize::from(count).min(16));
    for _ in 0..count {
        questions.push(Question::decode(cursor)?);
    }
    Ok(questions)
}

fn decode_records(cursor: &mut ByteCursor<'_>, count: u16) -> DecodeResult<Vec<ResourceRecord>> {
    let mut records = Vec::with_capacity(usize::from(count).min(16));
    for _ in 0..count {
        records.push(ResourceRecord::decode(cursor)?);
    }
    Ok(records)
}
