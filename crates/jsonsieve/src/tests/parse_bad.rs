use alloc::{string::ToString, vec::Vec};

use rstest::rstest;

use crate::{ErrorKind, Expected, ParseError, ParserOptions, ValueKind, parse, validate, validate_with_options};

/// Both modes must reject `input` with the same error.
fn reject(input: &[u8]) -> ParseError {
    let built = parse(input).unwrap_err();
    let checked = validate(input).unwrap_err();
    assert_eq!(built, checked);
    built
}

#[test]
fn empty_document() {
    let err = reject(b"");
    assert_eq!(err.kind(), ErrorKind::UnexpectedEndOfInput);
    assert_eq!(err.offset(), 0);
    assert_eq!(err.expected(), Expected::WHITESPACE | Expected::VALUE_START);
    assert_eq!(err.start(), None);
    assert_eq!(err.context(), None);

    let err = reject(b"   \n");
    assert_eq!(err.offset(), 4);
}

#[test]
fn trailing_content_after_document() {
    let err = reject(b"[1] 2");
    assert_eq!(err.kind(), ErrorKind::UnexpectedCharacter(b'2'));
    assert_eq!(err.offset(), 4);
    assert_eq!(err.expected(), Expected::WHITESPACE);

    assert_eq!(reject(b"{}}").offset(), 2);
}

#[rstest]
#[case(b"/", b'/')]
#[case(b"a", b'a')]
#[case(b"+1", b'+')]
#[case(b".5", b'.')]
#[case(b"'x'", b'\'')]
fn bad_first_byte(#[case] input: &[u8], #[case] byte: u8) {
    let err = reject(input);
    assert_eq!(err.kind(), ErrorKind::UnexpectedCharacter(byte));
    assert_eq!(err.offset(), 0);
}

#[test]
fn unterminated_string() {
    let err = reject(br#""abc"#);
    assert_eq!(err.kind(), ErrorKind::UnexpectedEndOfInput);
    assert_eq!(err.offset(), 4);
    assert_eq!(err.start(), Some(0));
    assert_eq!(err.context(), Some(ValueKind::String));

    let err = reject(br#"["a\n"#);
    assert_eq!(err.kind(), ErrorKind::UnexpectedEndOfInput);
    assert_eq!(err.start(), Some(1));
}

#[rstest]
#[case(b"\"a\nb\"", 0x0A, 2)]
#[case(b"\"\x00\"", 0x00, 1)]
#[case(b"\"\\n\x1f\"", 0x1F, 3)]
fn raw_control_bytes_in_strings(#[case] input: &[u8], #[case] byte: u8, #[case] offset: usize) {
    let err = reject(input);
    assert_eq!(err.kind(), ErrorKind::IllegalByte(byte));
    assert_eq!(err.offset(), offset);
    assert_eq!(err.context(), Some(ValueKind::String));
}

#[rstest]
#[case(br#""\x""#, ErrorKind::BadEscape(b'x'), 2)]
#[case(br#""\u12G4""#, ErrorKind::BadUnicodeEscape, 5)]
#[case(br#""\udc00""#, ErrorKind::BadUnicodeEscape, 1)]
#[case(br#""\ud800x""#, ErrorKind::BadUnicodeEscape, 7)]
#[case(br#""\ud800\n""#, ErrorKind::BadUnicodeEscape, 8)]
#[case(br#""\ud800\u0041""#, ErrorKind::BadUnicodeEscape, 7)]
fn bad_escapes(#[case] input: &[u8], #[case] kind: ErrorKind, #[case] offset: usize) {
    let err = reject(input);
    assert_eq!(err.kind(), kind);
    assert_eq!(err.offset(), offset);
    assert_eq!(err.start(), Some(0));
}

#[test]
fn bad_escape_in_key_reports_object() {
    let err = reject(br#"{"a\q": 1}"#);
    assert_eq!(err.kind(), ErrorKind::BadEscape(b'q'));
    assert_eq!(err.offset(), 4);
    assert_eq!(err.start(), Some(1));
    assert_eq!(err.context(), Some(ValueKind::Object));
}

#[test]
fn truth_is_not_a_literal() {
    let err = reject(b"truth");
    assert_eq!(err.kind(), ErrorKind::BadLiteral(b't'));
    assert_eq!(err.to_string(), "unparseable character 't' in literal at byte 3/5");
}

#[test]
fn depth_limit_applies_to_validation() {
    let mut input = Vec::new();
    input.resize(9, b'[');
    input.resize(18, b']');
    let options = ParserOptions {
        max_depth: 8,
        ..Default::default()
    };
    let err = validate_with_options(&input, options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MaxDepthExceeded(8));
    assert_eq!(err.offset(), 8);

    let options = ParserOptions {
        max_depth: 9,
        ..Default::default()
    };
    assert_eq!(validate_with_options(&input, options), Ok(()));
}

#[test]
fn default_depth_limit_stops_runaway_nesting() {
    let mut input = Vec::new();
    input.resize(crate::DEFAULT_MAX_DEPTH + 1, b'[');
    let err = reject(&input);
    assert_eq!(err.kind(), ErrorKind::MaxDepthExceeded(crate::DEFAULT_MAX_DEPTH));
    assert_eq!(err.offset(), crate::DEFAULT_MAX_DEPTH);
}
