use std::net::{IpAddr, Ipv6Addr};

use super::{Datagram, PacketError, udp};

const HEADER_LEN: usize = 40;
const NEXT_HEADER_UDP: u8 = 17;

/// Fixed IPv6 header only; extension headers are not followed.
pub fn parse_ipv6(payload: &[u8]) -> Result<Option<Datagram<'_>>, PacketError> {
    if payload.len() < HEADER_LEN {
        return Err(PacketError::too_short("IPv6", HEADER_LEN, payload.len()));
    }

    if payload[6] != NEXT_HEADER_UDP {
        return Ok(None);
    }

    let mut src = [0u8; 16];
    src.copy_from_slice(&payload[8..24]);
    let mut dst = [0u8; 16];
    dst.copy_from_slice(&payload[24..40]);

    let payload_len = usize::from(u16::from_be_bytes([payload[4], payload[5]]));
    let end = (HEADER_LEN + payload_len).min(payload.len());

    udp::parse_udp(
        &payload[HEADER_LEN..end],
        IpAddr::V6(Ipv6Addr::from(src)),
        IpAddr::V6(Ipv6Addr::from(dst)),
    )
    .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::testing::ipv6_udp_frame;

    #[test]
    fn extracts_addresses_and_payload() {
        let frame = ipv6_udp_frame(53, 5353, b"resp");
        let dgram = parse_ipv6(&frame[14..]).unwrap().unwrap();

        assert_eq!(dgram.src.to_string(), "[fe80::1]:53");
        assert_eq!(dgram.dst.to_string(), "[fe80::2]:5353");
        assert_eq!(dgram.payload, b"resp");
    }

    #[test]
    fn short_header_is_an_error() {
        assert!(matches!(
            parse_ipv6(&[0x60; 39]),
            Err(PacketError::TooShort { layer: "IPv6", .. })
        ));
    }

    #[test]
    fn non_udp_next_header_is_skipped() {
        let mut frame = ipv6_udp_frame(53, 5353, b"x");
        frame[14 + 6] = 58; // ICMPv6
        assert_eq!(parse_ipv6(&frame[14..]), Ok(None));
    }
}
