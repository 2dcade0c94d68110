use super::{Datagram, PacketError, ipv4, ipv6};

const ETHERNET_HEADER_LEN: usize = 14;
const ETHERTYPE_IPV4: u16 = 0x0800;
const ETHERTYPE_IPV6: u16 = 0x86DD;

/// Entry point for Ethernet II frames.
///
/// Returns `Ok(None)` for frames that are well formed but carry no UDP
/// datagram (ARP, TCP, ICMP, ...).
pub fn parse_frame(data: &[u8]) -> Result<Option<Datagram<'_>>, PacketError> {
    if data.len() < ETHERNET_HEADER_LEN {
        return Err(PacketError::too_short("Ethernet", ETHERNET_HEADER_LEN, data.len()));
    }

    let ethertype = u16::from_be_bytes([data[12], data[13]]);
    let payload = &data[ETHERNET_HEADER_LEN..];

    match ethertype {
        ETHERTYPE_IPV4 => ipv4::parse_ipv4(payload),
        ETHERTYPE_IPV6 => ipv6::parse_ipv6(payload),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_frame_is_an_error() {
        assert_eq!(
            parse_frame(&[0u8; 10]),
            Err(PacketError::TooShort { layer: "Ethernet", needed: 14, actual: 10 })
        );
    }

    #[test]
    fn arp_is_not_udp() {
        let mut frame = vec![0u8; 42];
        frame[12] = 0x08;
        frame[13] = 0x06;
        assert_eq!(parse_frame(&frame), Ok(None));
    }
}
