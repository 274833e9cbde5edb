//! The error context filled in by every parsing routine.
//!
//! A failed parse yields exactly one [`ParseError`]: the first problem found,
//! since scanning stops at the first bad byte. Rendering a friendlier message
//! (line numbers, snippets) is left to the caller; everything needed for that
//! is exposed through accessors.

use core::fmt;

use thiserror::Error;

/// Renders a single input byte for error messages.
struct ByteRepr(u8);

impl fmt::Display for ByteRepr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_ascii_graphic() || self.0 == b' ' {
            write!(f, "'{}'", char::from(self.0))
        } else {
            write!(f, "0x{:02X}", self.0)
        }
    }
}

/// Grammar violations inside a numeric literal.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NumberError {
    /// A second `.`.
    #[error("too many decimal points")]
    TooManyDecimalPoints,
    /// `+` before any exponent marker.
    #[error("plus outside exponential")]
    PlusOutsideExponent,
    /// A second `+` in the exponent.
    #[error("double plus")]
    DoublePlus,
    /// A second `-` on the integer part.
    #[error("double minus")]
    DoubleMinus,
    /// A second `-` in the exponent.
    #[error("double minus in exponent")]
    DoubleMinusInExponent,
    /// A second `e` or `E`.
    #[error("doubled exponential")]
    DoubledExponential,
    /// A digit after a leading `0` in the integer part.
    #[error("leading 0 in number")]
    LeadingZero,
    /// Any other departure from the number grammar, such as `1.` or `-`.
    #[error("malformed number")]
    Malformed,
}

/// What went wrong.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A byte that does not continue `true`, `false` or `null`.
    #[error("unparseable character {} in literal", ByteRepr(*.0))]
    BadLiteral(u8),
    /// A `,` directly before `]` or `}`.
    #[error("illegal trailing comma")]
    TrailingComma,
    /// A `,` where no value precedes it.
    #[error("stray comma")]
    StrayComma,
    /// An object key directly after a member value.
    #[error("missing comma after object value")]
    MissingComma,
    /// A byte the grammar does not accept here.
    #[error("unexpected character {}", ByteRepr(*.0))]
    UnexpectedCharacter(u8),
    /// The input ended inside a value, or before any value.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A raw control byte inside a string, or NUL inside a number.
    #[error("illegal byte {}", ByteRepr(*.0))]
    IllegalByte(u8),
    /// A malformed number.
    #[error("{0}")]
    Number(#[from] NumberError),
    /// A backslash followed by an unknown escape letter.
    #[error("unknown escape {}", ByteRepr(*.0))]
    BadEscape(u8),
    /// A `\u` escape with a non-hex digit or an unpaired surrogate.
    #[error("bad unicode escape")]
    BadUnicodeEscape,
    /// An array or object opened deeper than the configured limit.
    #[error("nesting deeper than {0} levels")]
    MaxDepthExceeded(usize),
}

/// The grammar production that was active when parsing failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A numeric literal.
    Number,
    /// A string value.
    String,
    /// `true`, `false` or `null`.
    Literal,
    /// An array.
    Array,
    /// An object, including its keys.
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Literal => "literal",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        })
    }
}

/// Set of token categories that would have been accepted at the failure
/// point.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Expected(u8);

impl Expected {
    /// The empty set.
    pub const NOTHING: Self = Self(0);
    /// Insignificant whitespace.
    pub const WHITESPACE: Self = Self(1);
    /// `"` opening a key.
    pub const STRING_START: Self = Self(1 << 1);
    /// Any byte that can start a value.
    pub const VALUE_START: Self = Self(1 << 2);
    /// `,`
    pub const COMMA: Self = Self(1 << 3);
    /// `:`
    pub const COLON: Self = Self(1 << 4);
    /// `]`
    pub const ARRAY_END: Self = Self(1 << 5);
    /// `}`
    pub const OBJECT_END: Self = Self(1 << 6);

    const NAMES: [(Self, &'static str); 7] = [
        (Self::WHITESPACE, "whitespace"),
        (Self::STRING_START, "string"),
        (Self::VALUE_START, "value"),
        (Self::COMMA, "','"),
        (Self::COLON, "':'"),
        (Self::ARRAY_END, "']'"),
        (Self::OBJECT_END, "'}'"),
    ];

    /// Both sets together.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether every category of `other` is in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no category is accepted.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl core::ops::BitOr for Expected {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (flag, name) in Self::NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                first = false;
                f.write_str(name)?;
            }
        }
        if first {
            f.write_str("nothing")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expected({self})")
    }
}

/// A failed parse.
///
/// Offsets are zero-based byte positions into the input. When the input ran
/// out, `offset` equals the input length.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind} at byte {offset}/{input_len}")]
pub struct ParseError {
    pub(crate) kind: ErrorKind,
    pub(crate) offset: usize,
    pub(crate) start: Option<usize>,
    pub(crate) expected: Expected,
    pub(crate) context: Option<ValueKind>,
    pub(crate) input_len: usize,
}

impl ParseError {
    pub(crate) fn new(kind: impl Into<ErrorKind>, offset: usize, input_len: usize) -> Self {
        Self {
            kind: kind.into(),
            offset,
            start: None,
            expected: Expected::NOTHING,
            context: None,
            input_len,
        }
    }

    /// Records the offset where the enclosing construct began.
    #[must_use]
    pub(crate) fn started_at(mut self, start: usize) -> Self {
        self.start = Some(start);
        self
    }

    #[must_use]
    pub(crate) fn expecting(mut self, expected: Expected) -> Self {
        self.expected = expected;
        self
    }

    #[must_use]
    pub(crate) fn within(mut self, context: ValueKind) -> Self {
        self.context = Some(context);
        self
    }

    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Offset of the offending byte.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Offset where the enclosing array, object, string, number or literal
    /// began, when known.
    #[must_use]
    pub fn start(&self) -> Option<usize> {
        self.start
    }

    /// Token categories that would have been accepted at [`offset`](Self::offset).
    #[must_use]
    pub fn expected(&self) -> Expected {
        self.expected
    }

    /// The production that was being parsed, if any.
    #[must_use]
    pub fn context(&self) -> Option<ValueKind> {
        self.context
    }

    /// Length of the whole input.
    #[must_use]
    pub fn input_len(&self) -> usize {
        self.input_len
    }
}
