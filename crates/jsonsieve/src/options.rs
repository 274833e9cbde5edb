/// Nesting depth allowed by [`ParserOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Configuration options for the JSON parser.
///
/// The same options drive both construct mode ([`parse_with_options`]) and
/// validate mode ([`validate_with_options`]); the grammar checks are identical
/// in both.
///
/// # Examples
///
/// ```rust
/// use jsonsieve::{ParserOptions, parse_with_options};
///
/// let options = ParserOptions {
///     unicode: true,
///     ..Default::default()
/// };
/// let value = parse_with_options(br#"{"k":"v"}"#, options).unwrap();
/// assert!(value.get(b"k").unwrap().as_str().unwrap().unicode);
/// ```
///
/// [`parse_with_options`]: crate::parse_with_options
/// [`validate_with_options`]: crate::validate_with_options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Whether produced strings and object keys are flagged as UTF-8 text.
    ///
    /// When `false`, strings are handed to the factory as opaque bytes unless
    /// a `\u` escape in that string decoded to a non-ASCII code point.
    ///
    /// # Default
    ///
    /// `false`
    pub unicode: bool,

    /// Force the unicode flag on the next produced string only.
    ///
    /// The flag is cleared as soon as one string value has been produced.
    /// Object keys neither consume nor observe it.
    ///
    /// # Default
    ///
    /// `false`
    pub force_unicode: bool,

    /// Maximum nesting depth of arrays and objects.
    ///
    /// Opening a container deeper than this fails with
    /// [`ErrorKind::MaxDepthExceeded`](crate::ErrorKind::MaxDepthExceeded)
    /// instead of growing the stack without bound.
    ///
    /// # Default
    ///
    /// [`DEFAULT_MAX_DEPTH`]
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            unicode: false,
            force_unicode: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
