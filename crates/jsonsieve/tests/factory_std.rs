#![allow(missing_docs)]

use std::collections::BTreeMap;

use jsonsieve::{JsonFactory, ParserOptions, StdFactory, Str, Value, parse_with};

/// A factory that builds a plain string rendering and counts calls.
#[derive(Default)]
struct Sketch {
    calls: usize,
}

impl JsonFactory for Sketch {
    type Any = String;
    type Array = Vec<String>;
    type Object = BTreeMap<String, String>;

    fn new_null(&mut self) -> String {
        self.calls += 1;
        "null".into()
    }

    fn new_bool(&mut self, b: bool) -> String {
        self.calls += 1;
        b.to_string()
    }

    fn new_int(&mut self, i: i64) -> String {
        self.calls += 1;
        format!("i{i}")
    }

    fn new_double(&mut self, d: f64) -> String {
        self.calls += 1;
        format!("d{d}")
    }

    fn new_big_number(&mut self, digits: &str) -> String {
        self.calls += 1;
        format!("n{digits}")
    }

    fn new_string(&mut self, bytes: &[u8], unicode: bool) -> String {
        self.calls += 1;
        let marker = if unicode { "u" } else { "s" };
        format!("{marker}{}", String::from_utf8_lossy(bytes))
    }

    fn new_array(&mut self) -> Vec<String> {
        Vec::new()
    }

    fn push_array(&mut self, array: &mut Vec<String>, val: String) {
        array.push(val);
    }

    fn into_any_array(&mut self, array: Vec<String>) -> String {
        self.calls += 1;
        format!("[{}]", array.join(" "))
    }

    fn new_object(&mut self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    fn insert_object(
        &mut self,
        obj: &mut BTreeMap<String, String>,
        key: &[u8],
        _unicode: bool,
        val: String,
    ) {
        obj.insert(String::from_utf8_lossy(key).into_owned(), val);
    }

    fn into_any_object(&mut self, obj: BTreeMap<String, String>) -> String {
        self.calls += 1;
        let members: Vec<String> = obj.into_iter().map(|(k, v)| format!("{k}={v}")).collect();
        format!("{{{}}}", members.join(" "))
    }
}

#[test]
fn custom_factory_sees_every_value() {
    let input = br#"{"b": [1, 2.5, "x\u00e9"], "a": null, "c": 99999999999999999999, "b": true}"#;
    let mut factory = Sketch::default();
    let rendered = jsonsieve::Parser::new(input, ParserOptions::default(), &mut factory)
        .parse()
        .unwrap();
    assert_eq!(rendered, "{a=null b=true c=n99999999999999999999}");
    // 1, 2.5, string, array, null, big number, true, object
    assert_eq!(factory.calls, 8);
}

#[test]
fn custom_factory_receives_unicode_flags() {
    let out = parse_with(br#"["x", "\u00e9"]"#, ParserOptions::default(), Sketch::default()).unwrap();
    assert_eq!(out, "[sx u\u{e9}]");

    let options = ParserOptions {
        unicode: true,
        ..Default::default()
    };
    let out = parse_with(br#"["x"]"#, options, Sketch::default()).unwrap();
    assert_eq!(out, "[ux]");
}

#[test]
fn std_factory_builds_values_directly() {
    let mut f = StdFactory;
    let mut arr = f.new_array();
    let t = f.new_bool(true);
    f.push_array(&mut arr, t);
    let mut obj = f.new_object();
    let one = f.new_int(1);
    f.insert_object(&mut obj, b"n", false, one);
    let two = f.new_int(2);
    f.insert_object(&mut obj, b"n", false, two);
    let s = f.new_string(b"hi", true);
    f.insert_object(&mut obj, b"s", true, s);

    assert_eq!(f.into_any_array(arr), Value::Array(vec![Value::Bool(true)]));
    let v = f.into_any_object(obj);
    assert_eq!(v.get("n"), Some(&Value::Int(2)));
    assert_eq!(
        v.get("s"),
        Some(&Value::String(Str {
            bytes: "hi".into(),
            unicode: true
        }))
    );
}
