//! Single-pass recursive-descent JSON parser.
//!
//! Overview
//! - One grammar, parameterized over a [`JsonFactory`]. With [`StdFactory`]
//!   it builds a [`Value`](crate::Value) tree; with [`Validator`] every
//!   factory call is a no-op and the parse only answers "is this JSON".
//! - The value dispatcher looks at the first significant byte and hands off
//!   to the number, string, literal, array or object routine. Arrays and
//!   objects call back into the dispatcher for their elements.
//! - Arrays and objects each run a small explicit state machine. Commas are
//!   tracked by offset so trailing and stray commas can be reported at the
//!   comma itself.
//! - The first error aborts the whole parse. There is no recovery and no
//!   partial result.
//!
//! Strings without escapes are handed to the factory as slices of the input.
//! Strings with escapes are decoded into a scratch buffer that is reused
//! for the whole parse (validate mode never writes to it).
//!
//! [`StdFactory`]: crate::StdFactory
//! [`Validator`]: crate::Validator

mod literals;
mod numbers;
mod strings;

use alloc::vec::Vec;

use crate::{
    ParserOptions,
    cursor::Cursor,
    error::{ErrorKind, Expected, ParseError, ValueKind},
    factory::JsonFactory,
};

/// JSON insignificant whitespace.
#[inline]
pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrayState {
    /// After `[` or `,`: a value or (when legal) `]`.
    Start,
    /// After a value: `,` or `]`.
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjectState {
    /// After `{`, `,` or a member value: a key, `,` or `}`.
    KeyStart,
    /// After a key: `:`.
    KeySep,
    /// After `:`: the member value.
    Value,
}

/// An object key, either borrowed from the input or decoded.
#[derive(Debug)]
enum Key {
    Span(usize, usize),
    Decoded(Vec<u8>),
}

/// Parser over one in-memory document.
///
/// A parser is consumed by [`Parser::parse`]; each document gets a fresh
/// cursor and error context.
///
/// # Examples
///
/// ```rust
/// use jsonsieve::{Parser, ParserOptions, StdFactory, Value};
///
/// let parser = Parser::new(b"[true, null]", ParserOptions::default(), StdFactory);
/// assert_eq!(
///     parser.parse().unwrap(),
///     Value::Array(vec![Value::Bool(true), Value::Null])
/// );
/// ```
#[derive(Debug)]
pub struct Parser<'src, F: JsonFactory> {
    cursor: Cursor<'src>,
    factory: F,
    max_depth: usize,
    depth: usize,
    scratch: Vec<u8>,
}

impl<'src, F: JsonFactory> Parser<'src, F> {
    /// Prepares to parse `input`, handing values to `factory`.
    #[must_use]
    pub fn new(input: &'src [u8], options: ParserOptions, factory: F) -> Self {
        Self {
            cursor: Cursor::new(input, &options),
            factory,
            max_depth: options.max_depth,
            depth: 0,
            scratch: Vec::new(),
        }
    }

    /// Parses the whole input as exactly one JSON value, optionally
    /// surrounded by whitespace.
    ///
    /// # Errors
    ///
    /// Returns the first grammar violation found.
    pub fn parse(mut self) -> Result<F::Any, ParseError> {
        tracing::trace!(
            len = self.cursor.len(),
            materialize = F::MATERIALIZES,
            "parsing JSON document"
        );
        let result = self.document();
        if let Err(err) = &result {
            tracing::debug!(kind = %err.kind(), offset = err.offset(), "JSON parse failed");
        }
        result
    }

    fn document(&mut self) -> Result<F::Any, ParseError> {
        let value = self.parse_value()?;
        loop {
            match self.cursor.next() {
                None => return Ok(value),
                Some(b) if is_whitespace(b) => {}
                Some(b) => {
                    return Err(self
                        .error(ErrorKind::UnexpectedCharacter(b), self.cursor.last())
                        .expecting(Expected::WHITESPACE));
                }
            }
        }
    }

    #[inline]
    fn error(&self, kind: impl Into<ErrorKind>, offset: usize) -> ParseError {
        ParseError::new(kind, offset, self.cursor.len())
    }

    #[inline]
    fn eof(&self) -> ParseError {
        self.error(ErrorKind::UnexpectedEndOfInput, self.cursor.len())
    }

    /// Fails with an unexpected character, or end of input when `byte` is
    /// `None`, inside the container starting at `start`.
    fn unexpected(
        &self,
        byte: Option<u8>,
        start: usize,
        context: ValueKind,
        expected: Expected,
    ) -> ParseError {
        let err = match byte {
            Some(b) => self.error(ErrorKind::UnexpectedCharacter(b), self.cursor.last()),
            None => self.eof(),
        };
        err.started_at(start).within(context).expecting(expected)
    }

    /// Skips whitespace and parses the next value.
    fn parse_value(&mut self) -> Result<F::Any, ParseError> {
        loop {
            match self.cursor.next() {
                Some(b) if is_whitespace(b) => {}
                Some(b) => {
                    return match self.dispatch(b) {
                        Some(result) => result,
                        None => Err(self
                            .error(ErrorKind::UnexpectedCharacter(b), self.cursor.last())
                            .expecting(Expected::WHITESPACE | Expected::VALUE_START)),
                    };
                }
                None => {
                    return Err(self
                        .eof()
                        .expecting(Expected::WHITESPACE | Expected::VALUE_START));
                }
            }
        }
    }

    /// Routes on the already consumed first byte of a value. Returns `None`
    /// when `b` cannot start a value.
    fn dispatch(&mut self, b: u8) -> Option<Result<F::Any, ParseError>> {
        Some(match b {
            b'"' => self.parse_string(),
            b'-' | b'0'..=b'9' => {
                self.cursor.back();
                self.parse_number()
            }
            b'{' => self.parse_object(),
            b'[' => self.parse_array(),
            b't' | b'f' | b'n' => self.parse_literal(b),
            _ => return None,
        })
    }

    fn enter(&mut self, start: usize, context: ValueKind) -> Result<(), ParseError> {
        if self.depth >= self.max_depth {
            return Err(self
                .error(ErrorKind::MaxDepthExceeded(self.max_depth), start)
                .started_at(start)
                .within(context));
        }
        self.depth += 1;
        Ok(())
    }

    /// Parses array contents; the cursor is just past `[`.
    fn parse_array(&mut self) -> Result<F::Any, ParseError> {
        let start = self.cursor.last();
        self.enter(start, ValueKind::Array)?;

        let mut array = self.factory.new_array();
        let mut state = ArrayState::Start;
        let mut comma: Option<usize> = None;

        loop {
            let byte = self.cursor.next();
            match (state, byte) {
                (_, Some(b)) if is_whitespace(b) => {}
                (ArrayState::Start, Some(b']')) => {
                    if let Some(at) = comma {
                        return Err(self
                            .error(ErrorKind::TrailingComma, at)
                            .started_at(start)
                            .within(ValueKind::Array)
                            .expecting(Expected::VALUE_START));
                    }
                    break;
                }
                (ArrayState::Start, Some(b',')) => {
                    return Err(self
                        .error(ErrorKind::StrayComma, self.cursor.last())
                        .started_at(start)
                        .within(ValueKind::Array)
                        .expecting(Expected::WHITESPACE | Expected::VALUE_START | Expected::ARRAY_END));
                }
                (ArrayState::Start, Some(b)) => {
                    let Some(value) = self.dispatch(b) else {
                        return Err(self.unexpected(
                            byte,
                            start,
                            ValueKind::Array,
                            Expected::VALUE_START | Expected::ARRAY_END,
                        ));
                    };
                    let value = value?;
                    self.factory.push_array(&mut array, value);
                    state = ArrayState::Middle;
                }
                (ArrayState::Start, None) => {
                    return Err(self.unexpected(
                        None,
                        start,
                        ValueKind::Array,
                        Expected::VALUE_START | Expected::ARRAY_END,
                    ));
                }
                (ArrayState::Middle, Some(b',')) => {
                    comma = Some(self.cursor.last());
                    state = ArrayState::Start;
                }
                (ArrayState::Middle, Some(b']')) => break,
                (ArrayState::Middle, _) => {
                    return Err(self.unexpected(
                        byte,
                        start,
                        ValueKind::Array,
                        Expected::WHITESPACE | Expected::COMMA | Expected::ARRAY_END,
                    ));
                }
            }
        }

        self.depth -= 1;
        Ok(self.factory.into_any_array(array))
    }

    /// Parses object members; the cursor is just past `{`.
    fn parse_object(&mut self) -> Result<F::Any, ParseError> {
        let start = self.cursor.last();
        self.enter(start, ValueKind::Object)?;

        let mut object = self.factory.new_object();
        let mut state = ObjectState::KeyStart;
        // A member value has been seen and no comma yet.
        let mut middle = false;
        let mut comma: Option<usize> = None;
        let mut key = Key::Span(0, 0);

        loop {
            let byte = self.cursor.next();
            match (state, byte) {
                (_, Some(b)) if is_whitespace(b) => {}
                (ObjectState::KeyStart, Some(b'}')) => {
                    if let Some(at) = comma {
                        return Err(self
                            .error(ErrorKind::TrailingComma, at)
                            .started_at(start)
                            .within(ValueKind::Object)
                            .expecting(Expected::STRING_START));
                    }
                    break;
                }
                (ObjectState::KeyStart, Some(b'"')) => {
                    if middle {
                        return Err(self
                            .error(ErrorKind::MissingComma, self.cursor.last())
                            .started_at(start)
                            .within(ValueKind::Object)
                            .expecting(Expected::WHITESPACE | Expected::COMMA | Expected::OBJECT_END));
                    }
                    comma = None;
                    key = self.parse_key()?;
                    state = ObjectState::KeySep;
                }
                (ObjectState::KeyStart, Some(b',')) => {
                    if !middle {
                        return Err(self
                            .error(ErrorKind::StrayComma, self.cursor.last())
                            .started_at(start)
                            .within(ValueKind::Object)
                            .expecting(Expected::WHITESPACE | Expected::STRING_START));
                    }
                    middle = false;
                    comma = Some(self.cursor.last());
                }
                (ObjectState::KeyStart, _) => {
                    let expected = if middle {
                        Expected::WHITESPACE | Expected::COMMA | Expected::OBJECT_END
                    } else if comma.is_some() {
                        Expected::WHITESPACE | Expected::STRING_START
                    } else {
                        Expected::WHITESPACE | Expected::STRING_START | Expected::OBJECT_END
                    };
                    return Err(self.unexpected(byte, start, ValueKind::Object, expected));
                }
                (ObjectState::KeySep, Some(b':')) => state = ObjectState::Value,
                (ObjectState::KeySep, _) => {
                    return Err(self.unexpected(
                        byte,
                        start,
                        ValueKind::Object,
                        Expected::WHITESPACE | Expected::COLON,
                    ));
                }
                (ObjectState::Value, Some(b)) => {
                    let Some(value) = self.dispatch(b) else {
                        return Err(self.unexpected(
                            byte,
                            start,
                            ValueKind::Object,
                            Expected::WHITESPACE | Expected::VALUE_START,
                        ));
                    };
                    let value = value?;
                    let unicode = self.cursor.unicode;
                    let bytes: &[u8] = match &key {
                        Key::Span(from, to) => self.cursor.slice(*from, *to),
                        Key::Decoded(buf) => buf,
                    };
                    self.factory.insert_object(&mut object, bytes, unicode, value);
                    middle = true;
                    state = ObjectState::KeyStart;
                }
                (ObjectState::Value, None) => {
                    return Err(self.unexpected(
                        None,
                        start,
                        ValueKind::Object,
                        Expected::WHITESPACE | Expected::VALUE_START,
                    ));
                }
            }
        }

        self.depth -= 1;
        Ok(self.factory.into_any_object(object))
    }
}
