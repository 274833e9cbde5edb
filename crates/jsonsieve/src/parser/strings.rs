//! Strings and object keys.
//!
//! The fast path scans to the closing quote and hands out a slice of the
//! input. The first backslash abandons the scan; the escape decoder then
//! restarts from the opening quote.

use super::{Key, Parser};
use crate::{
    error::{ErrorKind, ParseError, ValueKind},
    escape::{self, Flavor},
    factory::JsonFactory,
};

/// Result of the fast scan.
enum Scan {
    /// No escapes; content ends before this offset (the closing quote).
    Plain(usize),
    /// A backslash was found.
    Escaped,
}

impl<F: JsonFactory> Parser<'_, F> {
    fn scan(&mut self, quote: usize, context: ValueKind) -> Result<Scan, ParseError> {
        loop {
            match self.cursor.next() {
                Some(b'"') => return Ok(Scan::Plain(self.cursor.last())),
                Some(b'\\') => return Ok(Scan::Escaped),
                Some(b @ 0x00..=0x1F) => {
                    return Err(self
                        .error(ErrorKind::IllegalByte(b), self.cursor.last())
                        .started_at(quote)
                        .within(context));
                }
                Some(_) => {}
                None => return Err(self.eof().started_at(quote).within(context)),
            }
        }
    }

    /// Parses a string value; the cursor is just past the opening quote.
    pub(super) fn parse_string(&mut self) -> Result<F::Any, ParseError> {
        let quote = self.cursor.last();
        match self.scan(quote, ValueKind::String)? {
            Scan::Plain(end) => {
                let bytes = self.cursor.slice(quote + 1, end);
                let unicode = self.cursor.take_string_unicode();
                Ok(self.factory.new_string(bytes, unicode))
            }
            Scan::Escaped => {
                self.scratch.clear();
                let out = F::MATERIALIZES.then_some(&mut self.scratch);
                let decoded = escape::decode(&mut self.cursor, quote, Flavor::Value, out)?;
                if decoded.wide {
                    self.cursor.force_unicode = true;
                }
                let unicode = self.cursor.take_string_unicode();
                Ok(self.factory.new_string(&self.scratch[..decoded.len], unicode))
            }
        }
    }

    /// Parses an object key; the cursor is just past the opening quote.
    pub(super) fn parse_key(&mut self) -> Result<Key, ParseError> {
        let quote = self.cursor.last();
        match self.scan(quote, ValueKind::Object)? {
            Scan::Plain(end) => Ok(Key::Span(quote + 1, end)),
            Scan::Escaped => {
                self.scratch.clear();
                let out = F::MATERIALIZES.then_some(&mut self.scratch);
                let decoded = escape::decode(&mut self.cursor, quote, Flavor::Key, out)?;
                // The member value may need the scratch buffer itself.
                let mut key = core::mem::take(&mut self.scratch);
                key.truncate(decoded.len);
                Ok(Key::Decoded(key))
            }
        }
    }
}
