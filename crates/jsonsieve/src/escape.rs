//! Backslash escape resolution for strings and object keys.
//!
//! The string scanner only lands here after spotting a `\`. The decoder
//! rewinds to the first content byte and walks the whole string again,
//! writing decoded bytes into the caller's scratch buffer (construct mode) or
//! merely checking them (validate mode, no buffer).
//!
//! `\uXXXX` escapes are written as UTF-8. A high surrogate must be followed
//! immediately by an escaped low surrogate; either half on its own is an
//! error.

use alloc::vec::Vec;

use crate::{
    cursor::Cursor,
    error::{ErrorKind, ParseError, ValueKind},
};

/// Accumulates four ASCII hex digits into a UTF-16 code unit.
#[derive(Debug, Default)]
struct HexAccumulator {
    acc: u32,
    len: u8,
}

impl HexAccumulator {
    #[inline]
    fn hex_val(b: u8) -> Option<u32> {
        match b {
            b'0'..=b'9' => Some(u32::from(b - b'0')),
            b'a'..=b'f' => Some(u32::from(b - b'a') + 10),
            b'A'..=b'F' => Some(u32::from(b - b'A') + 10),
            _ => None,
        }
    }

    /// Feeds one digit. Returns the code unit once the fourth digit arrives.
    fn feed(&mut self, b: u8) -> Result<Option<u32>, ErrorKind> {
        let d = Self::hex_val(b).ok_or(ErrorKind::BadUnicodeEscape)?;
        self.acc = (self.acc << 4) | d;
        self.len += 1;
        if self.len == 4 {
            let unit = self.acc;
            *self = Self::default();
            Ok(Some(unit))
        } else {
            Ok(None)
        }
    }
}

/// Which flavour of string is being decoded; only affects error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flavor {
    Value,
    Key,
}

/// Outcome of a successful decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Decoded {
    /// Bytes written to the output buffer (zero when none was supplied).
    pub(crate) len: usize,
    /// Some `\u` escape produced a non-ASCII code point.
    pub(crate) wide: bool,
}

struct Decoder<'c, 'src, 'buf> {
    cursor: &'c mut Cursor<'src>,
    out: Option<&'buf mut Vec<u8>>,
    quote: usize,
    flavor: Flavor,
}

impl Decoder<'_, '_, '_> {
    fn fail(&self, kind: ErrorKind, offset: usize) -> ParseError {
        let err = ParseError::new(kind, offset, self.cursor.len()).started_at(self.quote);
        match self.flavor {
            Flavor::Value => err.within(ValueKind::String),
            Flavor::Key => err.within(ValueKind::Object),
        }
    }

    fn next(&mut self) -> Result<u8, ParseError> {
        self.cursor
            .next()
            .ok_or_else(|| self.fail(ErrorKind::UnexpectedEndOfInput, self.cursor.len()))
    }

    #[inline]
    fn push(&mut self, bytes: &[u8]) {
        if let Some(out) = self.out.as_deref_mut() {
            out.extend_from_slice(bytes);
        }
    }

    fn hex4(&mut self) -> Result<u32, ParseError> {
        let mut hex = HexAccumulator::default();
        loop {
            let b = self.next()?;
            match hex.feed(b) {
                Ok(Some(unit)) => return Ok(unit),
                Ok(None) => {}
                Err(kind) => return Err(self.fail(kind, self.cursor.last())),
            }
        }
    }

    /// Decodes the escape after `\u`; `escape_at` is the offset of the `\`.
    fn unicode(&mut self, escape_at: usize) -> Result<char, ParseError> {
        let unit = self.hex4()?;
        let code = match unit {
            0xD800..=0xDBFF => {
                if self.next()? != b'\\' {
                    return Err(self.fail(ErrorKind::BadUnicodeEscape, self.cursor.last()));
                }
                if self.next()? != b'u' {
                    return Err(self.fail(ErrorKind::BadUnicodeEscape, self.cursor.last()));
                }
                let low_at = self.cursor.pos() - 2;
                let low = self.hex4()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(self.fail(ErrorKind::BadUnicodeEscape, low_at));
                }
                0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(self.fail(ErrorKind::BadUnicodeEscape, escape_at)),
            _ => unit,
        };
        char::from_u32(code).ok_or_else(|| self.fail(ErrorKind::BadUnicodeEscape, escape_at))
    }

    fn run(mut self) -> Result<Decoded, ParseError> {
        let mut decoded = Decoded::default();
        loop {
            let b = self.next()?;
            match b {
                b'"' => break,
                b'\\' => {
                    let escape_at = self.cursor.last();
                    let byte = match self.next()? {
                        b'"' => b'"',
                        b'\\' => b'\\',
                        b'/' => b'/',
                        b'b' => 0x08,
                        b'f' => 0x0C,
                        b'n' => b'\n',
                        b'r' => b'\r',
                        b't' => b'\t',
                        b'u' => {
                            let ch = self.unicode(escape_at)?;
                            decoded.wide |= !ch.is_ascii();
                            let mut utf8 = [0u8; 4];
                            let encoded = ch.encode_utf8(&mut utf8);
                            decoded.len += encoded.len();
                            self.push(encoded.as_bytes());
                            continue;
                        }
                        other => {
                            return Err(self.fail(ErrorKind::BadEscape(other), self.cursor.last()));
                        }
                    };
                    decoded.len += 1;
                    self.push(&[byte]);
                }
                0x00..=0x1F => {
                    return Err(self.fail(ErrorKind::IllegalByte(b), self.cursor.last()));
                }
                _ => {
                    decoded.len += 1;
                    self.push(&[b]);
                }
            }
        }
        if self.out.is_none() {
            decoded.len = 0;
        }
        Ok(decoded)
    }
}

/// Decodes a string whose opening quote sits at `quote`, starting from the
/// first content byte, and leaves the cursor just past the closing quote.
///
/// With `out == None` the escapes are checked but nothing is written.
pub(crate) fn decode(
    cursor: &mut Cursor<'_>,
    quote: usize,
    flavor: Flavor,
    out: Option<&mut Vec<u8>>,
) -> Result<Decoded, ParseError> {
    cursor.seek(quote + 1);
    Decoder {
        cursor,
        out,
        quote,
        flavor,
    }
    .run()
}
