//! Numeric literals.
//!
//! A single forward scan classifies the number with a handful of flags and
//! rejects the common RFC violations as they are seen. Whatever the flags let
//! through is then checked against the full number grammar before
//! conversion.

use super::Parser;
use crate::{
    error::{ErrorKind, NumberError, ParseError, ValueKind},
    factory::JsonFactory,
};

/// Integers shorter than this many digits are taken from the running value
/// accumulated during the scan; longer ones are reparsed.
pub(super) const INT_MAX_DIGITS: usize = 8;

#[derive(Debug, Default, Clone, Copy)]
#[allow(clippy::struct_excessive_bools)]
struct NumberFlags {
    dot: bool,
    exp: bool,
    plus: bool,
    minus: bool,
    expminus: bool,
    zero: bool,
}

/// How an integer span was converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum IntegerPath {
    /// Short enough to trust the running value.
    Fast(i64),
    /// Reparsed in full.
    Parsed(i64),
    /// Does not fit in `i64`.
    Verbatim,
}

pub(super) fn classify_integer(text: &str, guess: i64, minus: bool) -> IntegerPath {
    if text.len() < INT_MAX_DIGITS + usize::from(minus) {
        return IntegerPath::Fast(if minus { -guess } else { guess });
    }
    text.parse::<i64>()
        .map_or(IntegerPath::Verbatim, IntegerPath::Parsed)
}

/// Returns the index of the first byte where `span` stops being a JSON
/// number, or `span.len()` if it ends too early. `None` means well formed.
pub(super) fn malformed_at(span: &[u8]) -> Option<usize> {
    let at = |i: usize| span.get(i).copied();
    let is_digit = |i: usize| at(i).is_some_and(|b| b.is_ascii_digit());

    let mut i = 0;
    if at(i) == Some(b'-') {
        i += 1;
    }
    match at(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            while is_digit(i) {
                i += 1;
            }
        }
        _ => return Some(i),
    }
    if at(i) == Some(b'.') {
        i += 1;
        if !is_digit(i) {
            return Some(i);
        }
        while is_digit(i) {
            i += 1;
        }
    }
    if matches!(at(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(at(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if !is_digit(i) {
            return Some(i);
        }
        while is_digit(i) {
            i += 1;
        }
    }
    (i != span.len()).then_some(i)
}

impl<F: JsonFactory> Parser<'_, F> {
    fn number_error(&self, kind: NumberError, offset: usize, start: usize) -> ParseError {
        self.error(kind, offset)
            .started_at(start)
            .within(ValueKind::Number)
    }

    /// Parses a number; the cursor sits on its first byte.
    pub(super) fn parse_number(&mut self) -> Result<F::Any, ParseError> {
        let start = self.cursor.pos();
        let mut flags = NumberFlags::default();
        let mut guess: i64 = 0;

        while let Some(b) = self.cursor.next() {
            let at = self.cursor.last();
            match b {
                b'.' => {
                    if flags.dot {
                        return Err(self.number_error(NumberError::TooManyDecimalPoints, at, start));
                    }
                    flags.dot = true;
                }
                b'+' => {
                    if !flags.exp {
                        return Err(self.number_error(NumberError::PlusOutsideExponent, at, start));
                    }
                    if flags.plus {
                        return Err(self.number_error(NumberError::DoublePlus, at, start));
                    }
                    flags.plus = true;
                }
                b'-' => {
                    if flags.exp {
                        if flags.expminus {
                            return Err(self.number_error(
                                NumberError::DoubleMinusInExponent,
                                at,
                                start,
                            ));
                        }
                        flags.expminus = true;
                    } else {
                        if flags.minus {
                            return Err(self.number_error(NumberError::DoubleMinus, at, start));
                        }
                        flags.minus = true;
                    }
                }
                b'e' | b'E' => {
                    if flags.exp {
                        return Err(self.number_error(NumberError::DoubledExponential, at, start));
                    }
                    flags.exp = true;
                }
                b'0'..=b'9' => {
                    if !flags.dot && !flags.exp {
                        if flags.zero {
                            return Err(self.number_error(NumberError::LeadingZero, at, start));
                        }
                        if b == b'0' && guess == 0 {
                            flags.zero = true;
                        } else {
                            guess = guess.wrapping_mul(10).wrapping_add(i64::from(b - b'0'));
                        }
                    }
                }
                0 => {
                    return Err(self
                        .error(ErrorKind::IllegalByte(0), at)
                        .started_at(start)
                        .within(ValueKind::Number));
                }
                _ => {
                    self.cursor.back();
                    break;
                }
            }
        }

        let span = self.cursor.slice(start, self.cursor.pos());
        if let Some(bad) = malformed_at(span) {
            return Err(self.number_error(NumberError::Malformed, start + bad, start));
        }
        // The span only holds ASCII digits, signs, dots and exponents.
        let text = core::str::from_utf8(span).unwrap_or_default();

        if flags.dot || flags.exp {
            match text.parse::<f64>() {
                Ok(d) if d.is_finite() => return Ok(self.factory.new_double(d)),
                _ => {}
            }
        } else {
            match classify_integer(text, guess, flags.minus) {
                IntegerPath::Fast(i) | IntegerPath::Parsed(i) => return Ok(self.factory.new_int(i)),
                IntegerPath::Verbatim => {}
            }
        }

        Ok(self.factory.new_big_number(text))
    }
}
