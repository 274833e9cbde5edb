use alloc::{string::String, vec::Vec};

use bstr::BString;

use crate::value::{Map, Str, Value};

/// Abstraction over JSON value construction.
///
/// The parser runs one grammar and hands every recognized value to a
/// factory. [`StdFactory`] materializes a [`Value`] tree; [`Validator`] turns
/// every call into a no-op so the same grammar doubles as a validity check
/// that never allocates.
///
/// Host embeddings implement this trait to build their own object model.
/// Object keys arrive already unescaped; inserting a key twice must
/// overwrite (last write wins).
#[allow(clippy::wrong_self_convention)]
pub trait JsonFactory {
    /// Any JSON value.
    type Any;
    /// An array under construction.
    type Array;
    /// An object under construction.
    type Object;

    /// Whether values are actually built. When `false` the parser skips
    /// copying decoded string bytes into its scratch buffer.
    const MATERIALIZES: bool = true;

    /// `null`.
    fn new_null(&mut self) -> Self::Any;
    /// `true` or `false`.
    fn new_bool(&mut self, b: bool) -> Self::Any;
    /// An integer that fits in `i64`.
    fn new_int(&mut self, i: i64) -> Self::Any;
    /// A number with a fraction or exponent.
    fn new_double(&mut self, d: f64) -> Self::Any;
    /// A number too long or too large for `i64`/`f64`, kept verbatim.
    fn new_big_number(&mut self, digits: &str) -> Self::Any;
    /// A string with escapes already resolved. `unicode` says whether the
    /// bytes are to be treated as UTF-8 text.
    fn new_string(&mut self, bytes: &[u8], unicode: bool) -> Self::Any;

    /// An empty array.
    fn new_array(&mut self) -> Self::Array;
    /// Appends `val` to `array`.
    fn push_array(&mut self, array: &mut Self::Array, val: Self::Any);
    /// Finishes `array`.
    fn into_any_array(&mut self, array: Self::Array) -> Self::Any;

    /// An empty object.
    fn new_object(&mut self) -> Self::Object;
    /// Sets `key` to `val`, replacing any earlier value under that key.
    fn insert_object(&mut self, obj: &mut Self::Object, key: &[u8], unicode: bool, val: Self::Any);
    /// Finishes `obj`.
    fn into_any_object(&mut self, obj: Self::Object) -> Self::Any;
}

/// Factory producing [`Value`] trees.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdFactory;

impl JsonFactory for StdFactory {
    type Any = Value;
    type Array = Vec<Value>;
    type Object = Map;

    #[inline]
    fn new_null(&mut self) -> Value {
        Value::Null
    }

    #[inline]
    fn new_bool(&mut self, b: bool) -> Value {
        Value::Bool(b)
    }

    #[inline]
    fn new_int(&mut self, i: i64) -> Value {
        Value::Int(i)
    }

    #[inline]
    fn new_double(&mut self, d: f64) -> Value {
        Value::Double(d)
    }

    #[inline]
    fn new_big_number(&mut self, digits: &str) -> Value {
        Value::BigNumber(String::from(digits))
    }

    #[inline]
    fn new_string(&mut self, bytes: &[u8], unicode: bool) -> Value {
        Value::String(Str {
            bytes: BString::from(bytes),
            unicode,
        })
    }

    #[inline]
    fn new_array(&mut self) -> Self::Array {
        Vec::new()
    }

    #[inline]
    fn push_array(&mut self, array: &mut Self::Array, val: Value) {
        array.push(val);
    }

    #[inline]
    fn into_any_array(&mut self, array: Self::Array) -> Value {
        Value::Array(array)
    }

    #[inline]
    fn new_object(&mut self) -> Self::Object {
        Map::new()
    }

    #[inline]
    fn insert_object(&mut self, obj: &mut Self::Object, key: &[u8], _unicode: bool, val: Value) {
        obj.insert(BString::from(key), val);
    }

    #[inline]
    fn into_any_object(&mut self, obj: Self::Object) -> Value {
        Value::Object(obj)
    }
}

/// Factory for validate mode: every call is a no-op.
#[derive(Clone, Copy, Debug, Default)]
pub struct Validator;

impl JsonFactory for Validator {
    type Any = ();
    type Array = ();
    type Object = ();

    const MATERIALIZES: bool = false;

    #[inline]
    fn new_null(&mut self) {}

    #[inline]
    fn new_bool(&mut self, _b: bool) {}

    #[inline]
    fn new_int(&mut self, _i: i64) {}

    #[inline]
    fn new_double(&mut self, _d: f64) {}

    #[inline]
    fn new_big_number(&mut self, _digits: &str) {}

    #[inline]
    fn new_string(&mut self, _bytes: &[u8], _unicode: bool) {}

    #[inline]
    fn new_array(&mut self) {}

    #[inline]
    fn push_array(&mut self, _array: &mut (), _val: ()) {}

    #[inline]
    fn into_any_array(&mut self, _array: ()) {}

    #[inline]
    fn new_object(&mut self) {}

    #[inline]
    fn insert_object(&mut self, _obj: &mut (), _key: &[u8], _unicode: bool, _val: ()) {}

    #[inline]
    fn into_any_object(&mut self, _obj: ()) {}
}

/// Lets a caller keep ownership of a stateful factory across parses.
impl<F: JsonFactory + ?Sized> JsonFactory for &mut F {
    type Any = F::Any;
    type Array = F::Array;
    type Object = F::Object;

    const MATERIALIZES: bool = F::MATERIALIZES;

    fn new_null(&mut self) -> Self::Any {
        (**self).new_null()
    }

    fn new_bool(&mut self, b: bool) -> Self::Any {
        (**self).new_bool(b)
    }

    fn new_int(&mut self, i: i64) -> Self::Any {
        (**self).new_int(i)
    }

    fn new_double(&mut self, d: f64) -> Self::Any {
        (**self).new_double(d)
    }

    fn new_big_number(&mut self, digits: &str) -> Self::Any {
        (**self).new_big_number(digits)
    }

    fn new_string(&mut self, bytes: &[u8], unicode: bool) -> Self::Any {
        (**self).new_string(bytes, unicode)
    }

    fn new_array(&mut self) -> Self::Array {
        (**self).new_array()
    }

    fn push_array(&mut self, array: &mut Self::Array, val: Self::Any) {
        (**self).push_array(array, val);
    }

    fn into_any_array(&mut self, array: Self::Array) -> Self::Any {
        (**self).into_any_array(array)
    }

    fn new_object(&mut self) -> Self::Object {
        (**self).new_object()
    }

    fn insert_object(&mut self, obj: &mut Self::Object, key: &[u8], unicode: bool, val: Self::Any) {
        (**self).insert_object(obj, key, unicode, val);
    }

    fn into_any_object(&mut self, obj: Self::Object) -> Self::Any {
        (**self).into_any_object(obj)
    }
}
