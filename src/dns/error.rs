use thiserror::Error;

/// Result alias used throughout the decoder.
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Why a DNS message could not be decoded.
///
/// Any of these aborts the whole decode call; no partially filled
/// message is ever handed back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The buffer ended before a field, label or record body could be read.
    #[error("message truncated: needed {needed} bytes at offset {offset}")]
    Truncated {
        /// Offset where the read started.
        offset: usize,
        /// Bytes the read required.
        needed: usize,
    },

    /// A compression pointer points outside the buffer or forms a loop.
    #[error("malformed compression pointer at offset {offset} (target {target})")]
    MalformedPointer {
        /// Offset of the pointer octets.
        offset: usize,
        /// Offset the pointer refers to.
        target: usize,
    },

    /// A length octet uses the reserved `01` / `10` label type bits.
    #[error("invalid label type 0x{octet:02x} at offset {offset}")]
    InvalidLabelType {
        /// Offset of the length octet.
        offset: usize,
        /// The length octet as read.
        octet: u8,
    },

    /// A name's wire encoding, counted across pointer hops, exceeds 255
    /// octets (RFC 1035 2.3.4).
    #[error("domain name longer than 255 octets at offset {offset} ({length} so far)")]
    NameTooLong {
        /// Offset of the label that crossed the limit.
        offset: usize,
        /// Octets counted once that label is included.
        length: usize,
    },
}

impl DecodeError {
    #[inline]
    pub fn truncated(offset: usize, needed: usize) -> Self {
        Self::Truncated { offset, needed }
    }

    #[inline]
    pub fn malformed_pointer(offset: usize, target: usize) -> Self {
        Self::MalformedPointer { offset, target }
    }

    /// Short stable name, used as a statistics bucket by the host.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Truncated { .. } => "truncated",
            Self::MalformedPointer { .. } => "malformed pointer",
            Self::InvalidLabelType { .. } => "invalid label",
            Self::NameTooLong { .. } => "name too long",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_offsets() {
        let err = DecodeError::truncated(12, 4);
        assert_eq!(err.to_string(), "message truncated: needed 4 bytes at offset 12");

        let err = DecodeError::malformed_pointer(30, 30);
        assert_eq!(
            err.to_string(),
            "malformed compression pointer at offset 30 (target 30)"
        );

        let err = DecodeError::InvalidLabelType { offset: 5, octet: 0x41 };
        assert_eq!(err.to_string(), "invalid label type 0x41 at offset 5");

        let err = DecodeError::NameTooLong { offset: 268, length: 320 };
        assert_eq!(
            err.to_string(),
            "domain name longer than 255 octets at offset 268 (320 so far)"
        );
    }

    #[test]
    fn kinds_are_distinct() {
        assert_eq!(DecodeError::truncated(0, 1).kind(), "truncated");
        assert_eq!(DecodeError::malformed_pointer(0, 0).kind(), "malformed pointer");
        assert_eq!(DecodeError::InvalidLabelType { offset: 0, octet: 0x40 }.kind(), "invalid label");
        assert_eq!(DecodeError::NameTooLong { offset: 0, length: 256 }.kind(), "name too long");
    }
}
