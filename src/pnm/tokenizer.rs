//! Whitespace/comment aware token reader shared by the header and the plain
//! (ASCII) rasters.

use crate::error::PnmError;

/// PNM whitespace: space, TAB, LF, CR and VT.
#[inline]
pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b)
}

/// Pull-based token stream over a byte slice.
///
/// A `#` outside a token starts a comment that runs through the next `\n`.
/// A `#` directly after a token ends that token and starts a comment.
pub(crate) struct Tokenizer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Offset of the first unconsumed byte.
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed.
    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn skip_comment(&mut self) {
        match self.data[self.pos..].iter().position(|&b| b == b'\n') {
            Some(nl) => self.pos += nl + 1,
            None => self.pos = self.data.len(),
        }
    }

    fn skip_separators(&mut self) {
        while let Some(&b) = self.data.get(self.pos) {
            if is_whitespace(b) {
                self.pos += 1;
            } else if b == b'#' {
                self.skip_comment();
            } else {
                break;
            }
        }
    }

    /// Next whitespace-delimited token.
    ///
    /// A single whitespace terminator (or a trailing comment) is consumed with
    /// the token, so after the last header field the cursor sits on the first
    /// raster byte. End of input also terminates a non-empty token.
    pub(crate) fn next_token(&mut self) -> Result<&'a [u8], PnmError> {
        self.skip_separators();
        let start = self.pos;
        while let Some(&b) = self.data.get(self.pos) {
            if is_whitespace(b) || b == b'#' {
                break;
            }
            self.pos += 1;
        }
        if start == self.pos {
            return Err(PnmError::UnexpectedEof);
        }
        let token = &self.data[start..self.pos];
        match self.data.get(self.pos) {
            Some(&b'#') => self.skip_comment(),
            Some(_) => self.pos += 1,
            None => {}
        }
        Ok(token)
    }

    /// Next single non-separator byte. Plain bitmaps need no whitespace
    /// between samples, so each byte is its own token there.
    pub(crate) fn next_byte(&mut self) -> Result<u8, PnmError> {
        self.skip_separators();
        let b = *self.data.get(self.pos).ok_or(PnmError::UnexpectedEof)?;
        self.pos += 1;
        Ok(b)
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().ok()
    }
}

/// Parse an unsigned base-10 integer. Signs, empty input and overflow fail.
pub(crate) fn parse_decimal(token: &[u8]) -> Option<u32> {
    if token.is_empty() {
        return None;
    }
    token.iter().try_fold(0u32, |acc, &b| {
        if !b.is_ascii_digit() {
            return None;
        }
        acc.checked_mul(10)?.checked_add(u32::from(b - b'0'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn splits_on_every_whitespace_kind() {
        let tokens: Vec<&[u8]> = Tokenizer::new(b"a\tb\nc\rd\x0be f").collect();
        assert_eq!(tokens, [&b"a"[..], b"b", b"c", b"d", b"e", b"f"]);
    }

    #[test]
    fn skips_comments_between_tokens() {
        let mut t = Tokenizer::new(b"P1 #comment 9 9\n3 # more\n  # whole line\n4");
        assert_eq!(t.next_token().unwrap(), b"P1");
        assert_eq!(t.next_token().unwrap(), b"3");
        assert_eq!(t.next_token().unwrap(), b"4");
        assert!(matches!(t.next_token(), Err(PnmError::UnexpectedEof)));
    }

    #[test]
    fn hash_terminates_token() {
        let mut t = Tokenizer::new(b"255#note\nX");
        assert_eq!(t.next_token().unwrap(), b"255");
        assert_eq!(t.position(), 9);
    }

    #[test]
    fn consumes_exactly_one_terminator() {
        let mut t = Tokenizer::new(b"255\n\n\xff");
        assert_eq!(t.next_token().unwrap(), b"255");
        assert_eq!(t.position(), 4);
    }

    #[test]
    fn exhausted_cursor_is_eof() {
        let mut t = Tokenizer::new(b"  \n# only a comment");
        assert!(matches!(t.next_token(), Err(PnmError::UnexpectedEof)));
        assert!(matches!(t.next_byte(), Err(PnmError::UnexpectedEof)));
    }

    #[test]
    fn single_bytes_without_separators() {
        let mut t = Tokenizer::new(b"10 1\n0");
        let bytes: Vec<u8> = (0..4).map(|_| t.next_byte().unwrap()).collect();
        assert_eq!(bytes, b"1010");
    }

    #[test]
    fn decimal_parsing() {
        assert_eq!(parse_decimal(b"0"), Some(0));
        assert_eq!(parse_decimal(b"65535"), Some(65535));
        assert_eq!(parse_decimal(b"4294967295"), Some(u32::MAX));
        assert_eq!(parse_decimal(b"4294967296"), None);
        assert_eq!(parse_decimal(b"+1"), None);
        assert_eq!(parse_decimal(b"-1"), None);
        assert_eq!(parse_decimal(b"12a"), None);
        assert_eq!(parse_decimal(b""), None);
    }
}
