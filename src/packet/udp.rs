use std::net::IpAddr;

use super::{Datagram, PacketError, ip_pair_to_sockets};

const HEADER_LEN: usize = 8;

/// Parses a UDP header and returns the datagram it frames.
///
/// The payload is cut to the UDP length field when the captured bytes
/// run longer.
pub fn parse_udp(segment: &[u8], src_ip: IpAddr, dst_ip: IpAddr) -> Result<Datagram<'_>, PacketError> {
    if segment.len() < HEADER_LEN {
        return Err(PacketError::too_short("UDP", HEADER_LEN, segment.len()));
    }

    let src_port = u16::from_be_bytes([segment[0], segment[1]]);
    let dst_port = u16::from_be_bytes([segment[2], segment[3]]);
    let length = usize::from(u16::from_be_bytes([segment[4], segment[5]])); // header + data

    if length < HEADER_LEN {
        return Err(PacketError::BadLength { layer: "UDP", value: length });
    }
    let end = length.min(segment.len());

    let (src, dst) = ip_pair_to_sockets(src_ip, dst_ip, (src_port, dst_port));
    Ok(Datagram { src, dst, payload: &segment[HEADER_LEN..end] })
}
