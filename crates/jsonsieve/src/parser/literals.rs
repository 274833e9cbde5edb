use super::Parser;
use crate::{
    error::{ErrorKind, ParseError, ValueKind},
    factory::JsonFactory,
};

impl<F: JsonFactory> Parser<'_, F> {
    /// Parses `true`, `false` or `null`; `first` has already been consumed.
    ///
    /// # Panics
    ///
    /// If `first` is not `t`, `f` or `n`. The dispatcher guarantees it, so
    /// anything else is a bug in the caller rather than bad input.
    pub(super) fn parse_literal(&mut self, first: u8) -> Result<F::Any, ParseError> {
        let start = self.cursor.last();
        let rest: &[u8] = match first {
            b't' => b"rue",
            b'f' => b"alse",
            b'n' => b"ull",
            _ => unreachable!("literal dispatched on byte {first:#04X}"),
        };

        for &want in rest {
            match self.cursor.next() {
                Some(b) if b == want => {}
                Some(b) => {
                    return Err(self
                        .error(ErrorKind::BadLiteral(b), self.cursor.last())
                        .started_at(start)
                        .within(ValueKind::Literal));
                }
                None => {
                    return Err(self.eof().started_at(start).within(ValueKind::Literal));
                }
            }
        }

        Ok(match first {
            b't' => self.factory.new_bool(true),
            b'f' => self.factory.new_bool(false),
            _ => self.factory.new_null(),
        })
    }
}
