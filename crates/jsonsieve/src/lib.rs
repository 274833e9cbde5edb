//! A single-pass JSON parser with two instantiations of one grammar.
//!
//! - **Construct mode** ([`parse`]) builds a [`Value`] tree, or any host
//!   object model through a custom [`JsonFactory`] ([`parse_with`]).
//! - **Validate mode** ([`validate`]) runs the identical byte-level checks
//!   and allocates nothing.
//!
//! Errors carry the offending byte offset, the start of the enclosing
//! construct, and the set of tokens that would have been accepted, so callers
//! can render precise diagnostics.
//!
//! The crate also ships a [`compact`]or that rebuilds minimal JSON text from
//! a pre-built [`TokenForest`] without reparsing.
//!
//! ```rust
//! use jsonsieve::{ErrorKind, Value};
//!
//! let v = jsonsieve::parse(br#"{"a": [1, 2.5, "x"], "a": null}"#).unwrap();
//! assert_eq!(v.get("a"), Some(&Value::Null));
//!
//! let err = jsonsieve::validate(b"[1,]").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::TrailingComma);
//! assert_eq!(err.offset(), 2);
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod compact;
mod cursor;
mod error;
mod escape;
mod factory;
mod options;
mod parser;
mod value;

#[cfg(test)]
mod tests;

pub use compact::{Siblings, Token, TokenForest, TokenId, TokenKind, compact};
pub use error::{ErrorKind, Expected, NumberError, ParseError, ValueKind};
pub use factory::{JsonFactory, StdFactory, Validator};
pub use options::{DEFAULT_MAX_DEPTH, ParserOptions};
pub use parser::Parser;
pub use value::{Array, Map, Str, Value};

/// Parses `input` into a [`Value`] with default options.
///
/// # Errors
///
/// Returns the first grammar violation in `input`.
pub fn parse(input: &[u8]) -> Result<Value, ParseError> {
    parse_with_options(input, ParserOptions::default())
}

/// Parses `input` into a [`Value`].
///
/// # Errors
///
/// Returns the first grammar violation in `input`.
pub fn parse_with_options(input: &[u8], options: ParserOptions) -> Result<Value, ParseError> {
    Parser::new(input, options, StdFactory).parse()
}

/// Parses `input`, building values with `factory`.
///
/// # Errors
///
/// Returns the first grammar violation in `input`.
pub fn parse_with<F: JsonFactory>(
    input: &[u8],
    options: ParserOptions,
    factory: F,
) -> Result<F::Any, ParseError> {
    Parser::new(input, options, factory).parse()
}

/// Checks that `input` is one well-formed JSON document, without building
/// anything.
///
/// # Errors
///
/// Returns the same error [`parse`] would.
pub fn validate(input: &[u8]) -> Result<(), ParseError> {
    validate_with_options(input, ParserOptions::default())
}

/// Like [`validate`], with explicit options.
///
/// # Errors
///
/// Returns the same error [`parse_with_options`] would.
pub fn validate_with_options(input: &[u8], options: ParserOptions) -> Result<(), ParseError> {
    Parser::new(input, options, Validator).parse()
}
