#![allow(missing_docs)]

mod common;

use common::{SAMPLE, tokenize};
use jsonsieve::{TokenKind, compact, parse};
use rstest::rstest;

#[rstest]
#[case(r#"{ "a" : [ 1 , 2 ] }"#, r#"{"a":[1,2]}"#)]
#[case(r#"[ "x y" , "a\" b" ]"#, r#"["x y","a\" b"]"#)]
#[case("\n\t[ [ ] , { } ]\r\n", "[[],{}]")]
#[case(" 42 ", "42")]
#[case("null", "null")]
#[case(r#"{"k":{"j":[true,false]}}"#, r#"{"k":{"j":[true,false]}}"#)]
fn compacts_documents(#[case] input: &str, #[case] expected: &str) {
    let forest = tokenize(input.as_bytes());
    let out = compact(input.as_bytes(), &forest);
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[test]
fn compacted_sample_parses_to_the_same_value() {
    let forest = tokenize(SAMPLE.as_bytes());
    let out = compact(SAMPLE.as_bytes(), &forest);
    assert!(out.len() <= SAMPLE.len());
    assert!(!out.iter().any(|b| *b == b'\n'));
    assert_eq!(parse(&out).unwrap(), parse(SAMPLE.as_bytes()).unwrap());
}

#[test]
fn compacting_twice_changes_nothing() {
    let once = compact(SAMPLE.as_bytes(), &tokenize(SAMPLE.as_bytes()));
    let twice = compact(&once, &tokenize(&once));
    assert_eq!(once, twice);
}

#[test]
fn forest_mirrors_document_structure() {
    let input = br#"{"a": [1, "b"]}"#;
    let forest = tokenize(input);
    let roots: Vec<_> = forest.roots().collect();
    assert_eq!(roots.len(), 1);
    let kinds: Vec<_> = forest
        .children(roots[0])
        .map(|id| forest.get(id).kind)
        .collect();
    assert_eq!(kinds, [TokenKind::Key, TokenKind::Colon, TokenKind::Array]);

    let array = forest.children(roots[0]).last().unwrap();
    let spans: Vec<_> = forest
        .children(array)
        .map(|id| {
            let t = forest.get(id);
            &input[t.start..=t.end]
        })
        .collect();
    assert_eq!(spans, [&b"1"[..], &b","[..], &br#""b""#[..]]);
}

#[test]
fn sibling_roots_are_all_written() {
    let input = b"1 2";
    let forest = tokenize(input);
    assert_eq!(forest.len(), 2);
    assert_eq!(compact(input, &forest), b"12");
}
