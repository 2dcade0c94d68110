//! Just enough link/network/transport dissection to find DNS over UDP.

mod ethernet;
mod ipv4;
mod ipv6;
mod udp;

pub use ethernet::parse_frame;

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

use crate::dns::{Flags, Role};

pub const DNS_PORT: u16 = 53;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PacketError {
    #[error("{layer} header too short: need {needed} bytes, have {actual}")]
    TooShort {
        layer: &'static str,
        needed: usize,
        actual: usize,
    },

    #[error("invalid {layer} length field {value}")]
    BadLength { layer: &'static str, value: usize },
}

impl PacketError {
    fn too_short(layer: &'static str, needed: usize, actual: usize) -> Self {
        Self::TooShort { layer, needed, actual }
    }
}

/// A UDP datagram lifted out of a captured frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datagram<'a> {
    pub src: SocketAddr,
    pub dst: SocketAddr,
    pub payload: &'a [u8],
}

impl Datagram<'_> {
    /// Role of the DNS message carried in this datagram, if any.
    ///
    /// Traffic towards port 53 comes from a client, traffic from port 53
    /// from a server. When both ends use port 53 the QR bit decides.
    pub fn dns_role(&self) -> Option<Role> {
        match (self.src.port() == DNS_PORT, self.dst.port() == DNS_PORT) {
            (false, true) => Some(Role::Query),
            (true, false) => Some(Role::Response),
            (true, true) => Some(role_from_flags(self.payload)),
            (false, false) => None,
        }
    }
}

/// Role claimed by the QR bit of a raw message. Buffers too short to
/// carry flags count as queries.
pub fn role_from_flags(message: &[u8]) -> Role {
    match message.get(2..4) {
        Some(&[hi, lo]) if Flags(u16::from_be_bytes([hi, lo])).is_response() => Role::Response,
        _ => Role::Query,
    }
}

fn ip_pair_to_sockets(src: IpAddr, dst: IpAddr, ports: (u16, u16)) -> (SocketAddr, SocketAddr) {
    (SocketAddr::new(src, ports.0), SocketAddr::new(dst, ports.1))
}

/// Statistics bucket for one captured packet.
#[derive(Hash, Eq, PartialEq, Debug, Clone, Copy)]
pub enum PacketKind {
    DnsQuery,
    DnsResponse,
    /// DNS port, but the message did not decode.
    Malformed,
    /// UDP on other ports.
    Udp,
    /// Not UDP, or not IP at all.
    Other,
    /// The frame itself could not be dissected.
    Broken,
}

impl PacketKind {
    /// Display order for statistics.
    pub const ALL: [PacketKind; 6] = [
        PacketKind::DnsQuery,
        PacketKind::DnsResponse,
        PacketKind::Malformed,
        PacketKind::Udp,
        PacketKind::Other,
        PacketKind::Broken,
    ];
}

impl fmt::Display for PacketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PacketKind::DnsQuery => write!(f, "DNS query"),
            PacketKind::DnsResponse => write!(f, "DNS response"),
            PacketKind::Malformed => write!(f, "Malformed"),
            PacketKind::Udp => write!(f, "UDP"),
            PacketKind::Other => write!(f, "Other"),
            PacketKind::Broken => write!(f, "Broken"),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Frame builders shared by the dissector tests.

    /// Ethernet + IPv4 (no options) + UDP around `payload`.
    pub fn ipv4_udp_frame(src_port: u16, dst_port: u16, payload: &[u8]) -> Vec<u8> {
        let mut frame = vec![
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, // dst mac
            0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, // src mac
            0x08, 0x00,
        ];
        let total_len = (20 + 8 + payload.len()) as u16;
        frame.extend_from_slice(&[0x45, 0x00]);
        frame.extend_from_slice(&total_len.to_be_bytes());
        frame.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 64, 17, 0x00, 0x00]);
        frame.extend_from_slice(&[192, 168, 1, 100]);
        frame.extend_from_slice(&[8, 8, 8, 8]);
        frame.extend_from_slice(&udp_header(src_port, dst_port, payload.len()));
        frame.extend_from_slice(payload);
        frame
    }

    /// Ethernet + IPv6 + UDP around `payload`.
    pub fn ipv6_udp_frame(src_port: u16, dst_port: u16, payload: &[u8]) -> Vec<u8> {
        let mut frame = vec![0u8; 12];
        frame.extend_from_slice(&[0x86, 0xdd]);
        let payload_len = (8 + payload.len()) as u16;
        frame.extend_from_slice(&[0x60, 0x00, 0x00, 0x00]);
        frame.extend_from_slice(&payload_len.to_be_bytes());
        frame.extend_from_slice(&[17, 64]);
        let mut src = [0u8; 16];
        src[0] = 0xfe;
        src[1] = 0x80;
        src[15] = 1;
        let mut dst = src;
        dst[15] = 2;
        frame.extend_from_slice(&src);
        frame.extend_from_slice(&dst);
        frame.extend_from_slice(&udp_header(src_port, dst_port, payload.len()));
        frame.extend_from_slice(payload);
        frame
    }

    pub fn udp_header(src_port: u16, dst_port: u16, payload_len: usize) -> Vec<u8> {
        let mut header = Vec::with_capacity(8);
        header.extend_from_slice(&src_port.to_be_bytes());
        header.extend_from_slice(&dst_port.to_be_bytes());
        header.extend_from_slice(&((8 + payload_len) as u16).to_be_bytes());
        header.extend_from_slice(&[0x00, 0x00]);
        header
    }
}
