use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HexError {
    #[error("invalid hex digit {ch:?} at position {position}")]
    InvalidDigit { ch: char, position: usize },

    #[error("odd number of hex digits ({0})")]
    OddLength(usize),

    #[error("no hex digits given")]
    Empty,
}

/// Parses a hex dump such as `aa aa 01 00` or `aaaa0100` into bytes.
///
/// ASCII whitespace anywhere is ignored, as is a leading `0x`.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, HexError> {
    let trimmed = input.trim_start();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let offset = input.len() - body.len();

    let mut nibbles = Vec::with_capacity(body.len());
    for (i, ch) in body.char_indices() {
        if ch.is_ascii_whitespace() {
            continue;
        }
        let value = ch.to_digit(16).ok_or(HexError::InvalidDigit { ch, position: offset + i })?;
        nibbles.push(value as u8);
    }

    if nibbles.is_empty() {
        return Err(HexError::Empty);
    }
    if nibbles.len() % 2 != 0 {
        return Err(HexError::OddLength(nibbles.len()));
    }

    Ok(nibbles.chunks_exact(2).map(|pair| (pair[0] << 4) | pair[1]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("aaaa0100", vec![0xaa, 0xaa, 0x01, 0x00])]
    #[case("aa aa\n01 00", vec![0xaa, 0xaa, 0x01, 0x00])]
    #[case("0xC00C", vec![0xc0, 0x0c])]
    #[case("  0x c0 0c ", vec![0xc0, 0x0c])]
    fn accepts(#[case] input: &str, #[case] expected: Vec<u8>) {
        assert_eq!(parse_hex(input).unwrap(), expected);
    }

    #[test]
    fn rejects_bad_digit_with_position() {
        assert_eq!(
            parse_hex("aa zz"),
            Err(HexError::InvalidDigit { ch: 'z', position: 3 })
        );
    }

    #[test]
    fn rejects_odd_and_empty() {
        assert_eq!(parse_hex("abc"), Err(HexError::OddLength(3)));
        assert_eq!(parse_hex("   "), Err(HexError::Empty));
        assert_eq!(parse_hex("0x"), Err(HexError::Empty));
    }
}
