//! Human-readable reports for decoded messages.
//!
//! Rendering consumes a [`Message`] that decoded successfully; it never
//! fails and never logs.

mod rdata;

use std::fmt::Write;

pub use rdata::{RData, display_name, hex_bytes, quote_text};

use crate::dns::{Header, Message, Question, RecordClass, RecordType, ResourceRecord, Role};

/// Answers listed in a one-line summary before the rest is elided.
const SUMMARY_ANSWERS: usize = 3;

/// Renders messages, optionally with access to the wire bytes they were
/// decoded from (needed to resolve compressed names inside record data).
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer<'a> {
    wire: Option<&'a [u8]>,
}

impl<'a> Renderer<'a> {
    pub fn new() -> Self {
        Self { wire: None }
    }

    pub fn with_wire(wire: &'a [u8]) -> Self {
        Self { wire: Some(wire) }
    }

    pub fn rdata(&self, record: &ResourceRecord) -> RData {
        RData::interpret(record, self.wire)
    }

    /// Full multi-line report. Record sections are only shown for
    /// responses.
    pub fn report(&self, msg: &Message, role: Role) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = self.write_report(&mut out, msg, role);
        out
    }

    fn write_report(&self, out: &mut String, msg: &Message, role: Role) -> std::fmt::Result {
        writeln!(out, "===== DNS {} =====", role)?;
        write_header(out, &msg.header)?;
        write_questions(out, &msg.questions)?;

        if role == Role::Response {
            self.write_records(out, &msg.answers, "Answer")?;
            self.write_records(out, &msg.authorities, "Authority")?;
            self.write_records(out, &msg.additionals, "Additional")?;
        }
        Ok(())
    }

    fn write_records(&self, out: &mut String, records: &[ResourceRecord], section: &str) -> std::fmt::Result {
        if records.is_empty() {
            return Ok(());
        }

        writeln!(out)?;
        writeln!(out, "[{} records]", section)?;
        writeln!(out, "Count: {}", records.len())?;

        for (i, record) in records.iter().enumerate() {
            writeln!(out)?;
            writeln!(out, "Record #{}", i + 1)?;
            writeln!(out, "Name: {}", display_name(&record.name))?;
            writeln!(out, "Type: {}", describe_type(record.rtype))?;
            writeln!(out, "Class: {}", describe_class(record.class))?;
            writeln!(out, "TTL: {} s", record.ttl)?;
            writeln!(out, "Data length: {} bytes", record.rdlength())?;
            write_rdata(out, &self.rdata(record))?;
        }
        Ok(())
    } // write_records

    /// One line per message, for the live log.
    pub fn summary(&self, msg: &Message, role: Role) -> String {
        let question = match msg.questions.first() {
            Some(q) => format!("{} {} {}", display_name(&q.name), q.qtype, q.qclass),
            None => "<no question>".to_string(),
        };

        match role {
            Role::Query => format!("Q 0x{:04x} {}", msg.header.id, question),
            Role::Response => {
                let mut line = format!(
                    "R 0x{:04x} {} {}",
                    msg.header.id,
                    msg.header.flags.rcode(),
                    question
                );
                if !msg.answers.is_empty() {
                    let shown: Vec<String> = msg
                        .answers
                        .iter()
                        .take(SUMMARY_ANSWERS)
                        .map(|rr| format!("{} {}", rr.rtype, self.rdata(rr)))
                        .collect();
                    line.push_str(" -> ");
                    line.push_str(&shown.join(", "));
                    if msg.answers.len() > SUMMARY_ANSWERS {
                        let _ = write!(line, " (+{} more)", msg.answers.len() - SUMMARY_ANSWERS);
                    }
                }
                line
            }
        }
    }
}

fn write_header(out: &mut String, header: &Header) -> std::fmt::Result {
    let flags = header.flags;

    writeln!(out)?;
    writeln!(out, "[Header]")?;
    writeln!(out, "Transaction ID: 0x{:04x}", header.id)?;
    writeln!(out, "Flags: {}", flags)?;
    writeln!(out, "  - QR: {}", if flags.is_response() { "response" } else { "query" })?;
    writeln!(out, "  - Opcode: {} ({})", flags.opcode(), flags.opcode().to_u8())?;
    writeln!(out, "  - Authoritative: {}", yes_no(flags.authoritative()))?;
    writeln!(out, "  - Truncated: {}", yes_no(flags.truncated()))?;
    writeln!(out, "  - Recursion desired: {}", yes_no(flags.recursion_desired()))?;
    writeln!(out, "  - Recursion available: {}", yes_no(flags.recursion_available()))?;
    writeln!(out, "  - Response code: {} ({})", flags.rcode(), flags.rcode().to_u8())?;
    writeln!(out, "Questions: {}", header.question_count)?;
    writeln!(out, "Answer RRs: {}", header.answer_count)?;
    writeln!(out, "Authority RRs: {}", header.authority_count)?;
    writeln!(out, "Additional RRs: {}", header.additional_count)
}

fn write_questions(out: &mut String, questions: &[Question]) -> std::fmt::Result {
    if questions.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "[Questions]")?;
    for (i, question) in questions.iter().enumerate() {
        writeln!(out, "Question #{}", i + 1)?;
        writeln!(out, "Name: {}", display_name(&question.name))?;
        writeln!(out, "Type: {}", describe_type(question.qtype))?;
        writeln!(out, "Class: {}", describe_class(question.qclass))?;
    }
    Ok(())
}

fn write_rdata(out: &mut String, rdata: &RData) -> std::fmt::Result {
    match rdata {
        RData::A(addr) => writeln!(out, "IPv4 address: {}", addr),
        RData::Aaaa(addr) => writeln!(out, "IPv6 address: {}", addr),
        RData::Ns(name) => writeln!(out, "Name server: {}", display_name(name)),
        RData::Cname(name) => writeln!(out, "Canonical name: {}", display_name(name)),
        RData::Ptr(name) => writeln!(out, "Pointer: {}", display_name(name)),
        RData::Mx { preference, exchange } => {
            writeln!(out, "Preference: {}", preference)?;
            writeln!(out, "Mail exchange: {}", display_name(exchange))
        }
        RData::Txt(strings) => {
            for s in strings {
                writeln!(out, "Text: {}", quote_text(s))?;
            }
            Ok(())
        }
        RData::Soa { mname, rname, serial, refresh, retry, expire, minimum } => {
            writeln!(out, "Primary server: {}", display_name(mname))?;
            writeln!(out, "Responsible mailbox: {}", display_name(rname))?;
            writeln!(out, "Serial: {}", serial)?;
            writeln!(out, "Refresh: {} s", refresh)?;
            writeln!(out, "Retry: {} s", retry)?;
            writeln!(out, "Expire: {} s", expire)?;
            writeln!(out, "Minimum TTL: {} s", minimum)
        }
        RData::Srv { priority, weight, port, target } => {
            writeln!(out, "Priority: {}", priority)?;
            writeln!(out, "Weight: {}", weight)?;
            writeln!(out, "Port: {}", port)?;
            writeln!(out, "Target: {}", display_name(target))
        }
        RData::Opaque(bytes) => writeln!(out, "Data: {}", hex_bytes(bytes)),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// `A (1) - IPv4 address`, or `99 - unknown type`.
pub fn describe_type(rtype: RecordType) -> String {
    let description = match rtype {
        RecordType::A => "IPv4 address",
        RecordType::NS => "authoritative name server",
        RecordType::CNAME => "canonical name",
        RecordType::SOA => "start of authority",
        RecordType::PTR => "domain name pointer",
        RecordType::MX => "mail exchange",
        RecordType::TXT => "text strings",
        RecordType::AAAA => "IPv6 address",
        RecordType::SRV => "service locator",
        RecordType::NAPTR => "naming authority pointer",
        RecordType::OPT => "EDNS options",
        RecordType::ANY => "any type",
        RecordType::Unknown(code) => return format!("{} - unknown type", code),
    };
    format!("{} ({}) - {}", rtype, rtype.to_u16(), description)
}

/// `IN (1) - Internet`, or `7 - unknown class`.
pub fn describe_class(class: RecordClass) -> String {
    let description = match class {
        RecordClass::IN => "Internet",
        RecordClass::CS => "CSNET",
        RecordClass::CH => "Chaos",
        RecordClass::HS => "Hesiod",
        RecordClass::ANY => "any class",
        RecordClass::Unknown(code) => return format!("{} - unknown class", code),
    };
    format!("{} ({}) - {}", class, class.to_u16(), description)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_wire() -> Vec<u8> {
        let mut buf = b"\xaa\xaa\x81\x80\x00\x01\x00\x01\x00\x00\x00\x00".to_vec();
        buf.extend_from_slice(b"\x03www\x07example\x03com\x00\x00\x01\x00\x01");
        buf.extend_from_slice(b"\xc0\x0c\x00\x01\x00\x01\x00\x00\x00\x3c\x00\x04\x5d\xb8\xd8\x22");
        buf
    }

    #[test]
    fn response_report() {
        let wire = response_wire();
        let msg = Message::decode_response(&wire).unwrap();
        let report = Renderer::with_wire(&wire).report(&msg, Role::Response);

        assert!(report.starts_with("===== DNS Response ====="));
        assert!(report.contains("Transaction ID: 0xaaaa"));
        assert!(report.contains("Flags: 0x8180"));
        assert!(report.contains("  - Recursion available: yes"));
        assert!(report.contains("Type: A (1) - IPv4 address"));
        assert!(report.contains("Class: IN (1) - Internet"));
        assert!(report.contains("[Answer records]\nCount: 1"));
        assert!(report.contains("TTL: 60 s"));
        assert!(report.contains("Data length: 4 bytes"));
        assert!(report.contains("IPv4 address: 93.184.216.34"));
        assert!(!report.contains("[Authority records]"));
    }

    #[test]
    fn query_report_skips_records() {
        let wire = response_wire();
        let msg = Message::decode_response(&wire).unwrap();
        let report = Renderer::new().report(&msg, Role::Query);

        assert!(report.starts_with("===== DNS Query ====="));
        assert!(report.contains("Question #1\nName: www.example.com"));
        assert!(!report.contains("[Answer records]"));
    }

    #[test]
    fn summaries() {
        let wire = response_wire();
        let msg = Message::decode_response(&wire).unwrap();
        let renderer = Renderer::with_wire(&wire);

        assert_eq!(
            renderer.summary(&msg, Role::Response),
            "R 0xaaaa NOERROR www.example.com A IN -> A 93.184.216.34"
        );
        assert_eq!(
            renderer.summary(&msg, Role::Query),
            "Q 0xaaaa www.example.com A IN"
        );
    }

    #[test]
    fn descriptions() {
        assert_eq!(describe_type(RecordType::MX), "MX (15) - mail exchange");
        assert_eq!(describe_type(RecordType::Unknown(99)), "99 - unknown type");
        assert_eq!(describe_class(RecordClass::CH), "CH (3) - Chaos");
        assert_eq!(describe_class(RecordClass::Unknown(7)), "7 - unknown class");
    }
}
