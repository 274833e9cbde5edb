//! JSON value types and compact serialization.
//!
//! This module defines the [`Value`] enum produced in construct mode, and
//! writes values back out as minimal JSON text.

use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::fmt::Write as _;

use bstr::{BStr, BString, ByteSlice};

/// Object members keyed by their unescaped key bytes.
pub type Map = BTreeMap<BString, Value>;
/// Array elements in document order.
pub type Array = Vec<Value>;

/// A JSON string: raw bytes plus whether they were flagged as UTF-8 text.
///
/// The bytes are not guaranteed to be valid UTF-8; JSON input may carry
/// arbitrary bytes inside strings.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Str {
    /// Content with escapes resolved.
    pub bytes: BString,
    /// Whether the bytes are meant as UTF-8 text.
    pub unicode: bool,
}

impl Str {
    /// The content as a byte string.
    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        self.bytes.as_bstr()
    }
}

impl From<&str> for Str {
    fn from(s: &str) -> Self {
        Self {
            bytes: BString::from(s),
            unicode: false,
        }
    }
}

/// A JSON value as produced by [`parse`](crate::parse).
///
/// Numbers keep their lexical class: integers that fit in `i64` become
/// [`Int`](Value::Int), anything with a `.` or exponent becomes
/// [`Double`](Value::Double), and numbers neither type can hold are kept
/// verbatim as [`BigNumber`](Value::BigNumber).
///
/// # Examples
///
/// ```
/// use jsonsieve::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key".into(), Value::from("value"));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// `null`.
    #[default]
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// An integer that fits in `i64`.
    Int(i64),
    /// A finite number with a fraction or exponent.
    Double(f64),
    /// A number kept as its original text.
    BigNumber(String),
    /// A string.
    String(Str),
    /// An array.
    Array(Array),
    /// An object; a repeated key keeps its last value.
    Object(Map),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(Str::from(v))
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for integers, doubles and big numbers.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Int(..) | Self::Double(..) | Self::BigNumber(..))
    }

    /// The boolean, if this is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer, if this is an [`Int`](Value::Int).
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a double. Integers are widened; big numbers are
    /// not converted.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// The string, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&Str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The raw bytes of a string value.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.as_str().map(|s| s.bytes.as_slice())
    }

    /// The elements, if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// The members, if this is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(m) => Some(m),
            _ => None,
        }
    }

    /// Looks up `key` if this is an object.
    #[must_use]
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&Value> {
        self.as_object()?.get(key.as_ref().as_bstr())
    }

    /// Serializes the value as compact JSON.
    ///
    /// ```
    /// let v = jsonsieve::parse(b" [1 , 2.5 , \"x\" ] ").unwrap();
    /// assert_eq!(v.to_json(), br#"[1,2.5,"x"]"#);
    /// ```
    #[must_use]
    pub fn to_json(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_json(&mut out);
        out
    }

    /// Appends the compact JSON form of the value to `out`.
    pub fn write_json(&self, out: &mut Vec<u8>) {
        match self {
            Value::Null => out.extend_from_slice(b"null"),
            Value::Bool(b) => out.extend_from_slice(if *b { b"true" } else { b"false" }),
            Value::Int(i) => push_fmt(out, format_args!("{i}")),
            // Debug formatting keeps a `.0` or exponent, so doubles read
            // back as doubles rather than integers.
            Value::Double(d) => push_fmt(out, format_args!("{d:?}")),
            Value::BigNumber(digits) => out.extend_from_slice(digits.as_bytes()),
            Value::String(s) => write_escaped_bytes(&s.bytes, out),
            Value::Array(arr) => {
                out.push(b'[');
                for (i, v) in arr.iter().enumerate() {
                    if i > 0 {
                        out.push(b',');
                    }
                    v.write_json(out);
                }
                out.push(b']');
            }
            Value::Object(map) => {
                out.push(b'{');
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        out.push(b',');
                    }
                    write_escaped_bytes(k, out);
                    out.push(b':');
                    v.write_json(out);
                }
                out.push(b'}');
            }
        }
    }
}

/// `fmt::Write` adapter over a byte vector.
struct ByteWriter<'a>(&'a mut Vec<u8>);

impl core::fmt::Write for ByteWriter<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.0.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

fn push_fmt(out: &mut Vec<u8>, args: core::fmt::Arguments<'_>) {
    // Writing into a Vec cannot fail.
    let _ = ByteWriter(out).write_fmt(args);
}

/// Writes `src` as a quoted JSON string, escaping quotes, backslashes and
/// control bytes. Other bytes, including non-ASCII ones, are copied as is.
pub(crate) fn write_escaped_bytes(src: &[u8], out: &mut Vec<u8>) {
    out.reserve(src.len() + 2);
    out.push(b'"');
    for &b in src {
        match b {
            b'"' => out.extend_from_slice(b"\\\""),
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            0x00..=0x1F => push_fmt(out, format_args!("\\u{b:04X}")),
            _ => out.push(b),
        }
    }
    out.push(b'"');
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // Non-UTF-8 string bytes are shown with replacement characters.
        core::fmt::Display::fmt(self.to_json().as_bstr(), f)
    }
}
