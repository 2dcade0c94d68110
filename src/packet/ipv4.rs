use std::net::{IpAddr, Ipv4Addr};

use super::{Datagram, PacketError, udp};

const MIN_HEADER_LEN: usize = 20;
const PROTO_UDP: u8 = 17;

pub fn parse_ipv4(payload: &[u8]) -> Result<Option<Datagram<'_>>, PacketError> {
    if payload.len() < MIN_HEADER_LEN {
        return Err(PacketError::too_short("IPv4", MIN_HEADER_LEN, payload.len()));
    }

    let ihl = payload[0] & 0x0F;
    let header_len = usize::from(ihl) * 4;
    if header_len < MIN_HEADER_LEN {
        return Err(PacketError::BadLength { layer: "IPv4 header", value: header_len });
    }
    if payload.len() < header_len {
        return Err(PacketError::too_short("IPv4", header_len, payload.len()));
    }

    // total length excludes Ethernet padding
    let total_len = usize::from(u16::from_be_bytes([payload[2], payload[3]]));
    if total_len < header_len {
        return Err(PacketError::BadLength { layer: "IPv4 total", value: total_len });
    }
    let end = total_len.min(payload.len());

    if payload[9] != PROTO_UDP {
        return Ok(None);
    }

    let src = Ipv4Addr::new(payload[12], payload[13], payload[14], payload[15]);
    let dst = Ipv4Addr::new(payload[16], payload[17], payload[18], payload[19]);

    udp::parse_udp(&payload[header_len..end], IpAddr::V4(src), IpAddr::V4(dst)).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::testing::ipv4_udp_frame;

    #[test]
    fn extracts_addresses_and_payload() {
        let frame = ipv4_udp_frame(40000, 53, b"dns!");
        let dgram = parse_ipv4(&frame[14..]).unwrap().unwrap();

        assert_eq!(dgram.src.to_string(), "192.168.1.100:40000");
        assert_eq!(dgram.dst.to_string(), "8.8.8.8:53");
        assert_eq!(dgram.payload, b"dns!");
    }

    #[test]
    fn ethernet_padding_is_dropped() {
        let mut frame = ipv4_udp_frame(53, 40000, b"ab");
        frame.extend_from_slice(&[0u8; 16]);
        let dgram = parse_ipv4(&frame[14..]).unwrap().unwrap();
        assert_eq!(dgram.payload, b"ab");
    }

    #[test]
    fn honours_options() {
        let mut frame = ipv4_udp_frame(40000, 53, b"x");
        // grow IHL to 6 words and insert 4 option bytes
        frame[14] = 0x46;
        let total = u16::from_be_bytes([frame[16], frame[17]]) + 4;
        frame[16..18].copy_from_slice(&total.to_be_bytes());
        frame.splice(34..34, [1u8, 1, 1, 1]);

        let dgram = parse_ipv4(&frame[14..]).unwrap().unwrap();
        assert_eq!(dgram.payload, b"x");
    }

    #[test]
    fn tcp_is_skipped() {
        let mut frame = ipv4_udp_frame(40000, 53, b"x");
        frame[14 + 9] = 6;
        assert_eq!(parse_ipv4(&frame[14..]), Ok(None));
    }

    #[test]
    fn bogus_ihl_is_rejected() {
        let mut frame = ipv4_udp_frame(40000, 53, b"x");
        frame[14] = 0x42;
        assert!(matches!(
            parse_ipv4(&frame[14..]),
            Err(PacketError::BadLength { value: 8, .. })
        ));
    }
}
