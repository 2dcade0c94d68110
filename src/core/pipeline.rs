use tracing::debug;

use crate::config::DisplayMode;
use crate::dns::{DecodeError, Message, Role};
use crate::packet::{PacketKind, parse_frame};
use crate::render::Renderer;

/// Result of pushing one captured frame through dissection, decoding and
/// rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameOutcome {
    pub kind: PacketKind,
    /// Rendered text, present only for messages that decoded.
    pub text: Option<String>,
}

impl FrameOutcome {
    fn silent(kind: PacketKind) -> Self {
        Self { kind, text: None }
    }
}

/// Decodes a DNS payload with the given role and renders it.
///
/// `DisplayMode::Report` yields the full report, the other modes a
/// single summary line.
pub fn render_payload(payload: &[u8], role: Role, mode: DisplayMode) -> Result<String, DecodeError> {
    let message = Message::decode(payload, role)?;
    let renderer = Renderer::with_wire(payload);
    Ok(match mode {
        DisplayMode::Report => renderer.report(&message, role),
        DisplayMode::Tui | DisplayMode::Summary => renderer.summary(&message, role),
    })
}

/// Classifies one link-layer frame and renders any DNS message in it.
///
/// Failures are logged at debug level and only show up in the counts.
pub fn handle_frame(frame: &[u8], mode: DisplayMode) -> FrameOutcome {
    let dgram = match parse_frame(frame) {
        Ok(Some(dgram)) => dgram,
        Ok(None) => return FrameOutcome::silent(PacketKind::Other),
        Err(e) => {
            debug!(error = %e, len = frame.len(), "dropping undissectable frame");
            return FrameOutcome::silent(PacketKind::Broken);
        }
    };

    let Some(role) = dgram.dns_role() else {
        return FrameOutcome::silent(PacketKind::Udp);
    };

    match render_payload(dgram.payload, role, mode) {
        Ok(rendered) => {
            let kind = match role {
                Role::Query => PacketKind::DnsQuery,
                Role::Response => PacketKind::DnsResponse,
            };
            let text = match mode {
                DisplayMode::Report => format!("{} -> {}\n{}", dgram.src, dgram.dst, rendered),
                DisplayMode::Tui | DisplayMode::Summary => {
                    format!("{} -> {} | {}", dgram.src, dgram.dst, rendered)
                }
            };
            FrameOutcome { kind, text: Some(text) }
        }
        Err(e) => {
            debug!(
                src = %dgram.src,
                dst = %dgram.dst,
                role = %role,
                kind = e.kind(),
                error = %e,
                "DNS message failed to decode"
            );
            FrameOutcome::silent(PacketKind::Malformed)
        }
    }
} // handle_frame

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::testing::ipv4_udp_frame;

    const QUERY: &[u8] = b"\xaa\xaa\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00\
        \x07example\x03com\x00\x00\x01\x00\x01";

    const RESPONSE: &[u8] = b"\xaa\xaa\x81\x80\x00\x01\x00\x01\x00\x00\x00\x00\
        \x07example\x03com\x00\x00\x01\x00\x01\
        \xc0\x0c\x00\x01\x00\x01\x00\x00\x0e\x10\x00\x04\x5d\xb8\xd8\x22";

    #[test]
    fn query_frame_is_summarised() {
        let frame = ipv4_udp_frame(40000, 53, QUERY);
        let outcome = handle_frame(&frame, DisplayMode::Summary);

        assert_eq!(outcome.kind, PacketKind::DnsQuery);
        assert_eq!(
            outcome.text.as_deref(),
            Some("192.168.1.100:40000 -> 8.8.8.8:53 | Q 0xaaaa example.com A IN")
        );
    }

    #[test]
    fn response_frame_report_includes_address() {
        let frame = ipv4_udp_frame(53, 40000, RESPONSE);
        let outcome = handle_frame(&frame, DisplayMode::Report);

        assert_eq!(outcome.kind, PacketKind::DnsResponse);
        let text = outcome.text.unwrap();
        assert!(text.starts_with("192.168.1.100:53 -> 8.8.8.8:40000\n===== DNS Response ====="));
        assert!(text.contains("IPv4 address: 93.184.216.34"));
    }

    #[test]
    fn truncated_dns_payload_counts_as_malformed() {
        let frame = ipv4_udp_frame(40000, 53, &QUERY[..20]);
        assert_eq!(handle_frame(&frame, DisplayMode::Tui), FrameOutcome::silent(PacketKind::Malformed));
    }

    #[test]
    fn non_dns_traffic_is_only_counted() {
        let frame = ipv4_udp_frame(40000, 443, QUERY);
        assert_eq!(handle_frame(&frame, DisplayMode::Tui), FrameOutcome::silent(PacketKind::Udp));

        let mut arp = frame.clone();
        arp[12] = 0x08;
        arp[13] = 0x06;
        assert_eq!(handle_frame(&arp, DisplayMode::Tui), FrameOutcome::silent(PacketKind::Other));

        assert_eq!(handle_frame(&frame[..10], DisplayMode::Tui), FrameOutcome::silent(PacketKind::Broken));
    }

    #[test]
    fn payload_role_controls_record_sections() {
        let as_query = render_payload(RESPONSE, Role::Query, DisplayMode::Report).unwrap();
        assert!(!as_query.contains("[Answer records]"));

        let as_response = render_payload(RESPONSE, Role::Response, DisplayMode::Report).unwrap();
        assert!(as_response.contains("[Answer records]"));
    }
}
