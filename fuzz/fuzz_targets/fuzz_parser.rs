#![no_main]

use arbitrary::Arbitrary;
use jsonsieve::{ParserOptions, StdFactory, Validator, parse_with};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    unicode: bool,
    force_unicode: bool,
    max_depth: u8,
    text: &'a [u8],
}

fn parser(input: Input<'_>) {
    let options = ParserOptions {
        unicode: input.unicode,
        force_unicode: input.force_unicode,
        max_depth: usize::from(input.max_depth),
    };

    let built = parse_with(input.text, options, StdFactory);
    let checked = parse_with(input.text, options, Validator);
    match (&built, &checked) {
        (Ok(_), Ok(())) => {}
        (Err(a), Err(b)) => assert_eq!(a, b, "modes disagree on the error"),
        _ => panic!("modes disagree: {built:?} vs {checked:?}"),
    }

    // Anything serde_json accepts, so do we, depth permitting.
    if serde_json::from_slice::<serde_json::Value>(input.text).is_ok() {
        let deep = ParserOptions {
            max_depth: 512,
            ..options
        };
        assert!(jsonsieve::validate_with_options(input.text, deep).is_ok());
    }

    let Ok(value) = built else { return };

    // Whatever parses must serialize to text that parses back unchanged.
    let text = value.to_json();
    let again = parse_with(&text, options, StdFactory).expect("serialized value reparses");
    assert_eq!(again.to_json(), text);
}

fuzz_target!(|input: Input<'_>| parser(input));
