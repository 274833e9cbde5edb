#![allow(missing_docs, dead_code)]
#![allow(clippy::needless_raw_string_hashes)]

use jsonsieve::{TokenForest, TokenId, TokenKind};

pub const SAMPLE: &str = r#"
{
    "moderation": {
        "decision": "allow",
        "reason": null
    },
    "request": {
        "filename": "example.rs",
        "language": "rust",
        "options": {
            "opt_level": 2,
            "features": [
                "serde",
                "tokio"
            ]
        }
    },
    "snippets": [
        "fn main() {}",
        "println!(\"hi\")"
    ],
    "scores": [ 0.5 , -12 , 3e2 , 123456789012345678901234567890 ],
    "matrix": [
        [
            "a"
        ],
        [ ]
    ],
    "flags": [ true , false , null ]
}
"#;

fn is_delimiter(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b',' | b':' | b']' | b'}')
}

/// Offset of the closing quote of the string opening at `quote`.
fn string_end(input: &[u8], quote: usize) -> usize {
    let mut i = quote + 1;
    while input[i] != b'"' {
        i += if input[i] == b'\\' { 2 } else { 1 };
    }
    i
}

/// Builds the token forest of a well-formed document.
///
/// This is a test tokenizer: it trusts its input and panics on anything
/// that is not valid JSON.
pub fn tokenize(input: &[u8]) -> TokenForest {
    let mut forest = TokenForest::new();
    // Open containers, each with "the next string is a key".
    let mut stack: Vec<(TokenId, bool)> = Vec::new();
    let mut i = 0;
    while i < input.len() {
        let parent = stack.last().map(|&(id, _)| id);
        match input[i] {
            b' ' | b'\t' | b'\n' | b'\r' => i += 1,
            b @ (b'{' | b'[') => {
                let kind = if b == b'{' {
                    TokenKind::Object
                } else {
                    TokenKind::Array
                };
                let id = forest.append(parent, kind, i, i);
                stack.push((id, b == b'{'));
                i += 1;
            }
            b'}' | b']' => {
                stack.pop();
                i += 1;
            }
            b',' => {
                forest.append(parent, TokenKind::Comma, i, i);
                let (id, key_next) = stack.last_mut().expect("comma outside container");
                *key_next = forest.get(*id).kind == TokenKind::Object;
                i += 1;
            }
            b':' => {
                forest.append(parent, TokenKind::Colon, i, i);
                stack.last_mut().expect("colon outside object").1 = false;
                i += 1;
            }
            b'"' => {
                let end = string_end(input, i);
                let kind = if stack.last().is_some_and(|&(_, key_next)| key_next) {
                    TokenKind::Key
                } else {
                    TokenKind::String
                };
                forest.append(parent, kind, i, end);
                i = end + 1;
            }
            b => {
                let start = i;
                while i < input.len() && !is_delimiter(input[i]) {
                    i += 1;
                }
                let kind = if matches!(b, b't' | b'f' | b'n') {
                    TokenKind::Literal
                } else {
                    TokenKind::Number
                };
                forest.append(parent, kind, start, i - 1);
            }
        }
    }
    forest
}
