//! Whitespace stripping over an already tokenized document.
//!
//! Some other component (a tokenizer, an editor, a tree builder) produces a
//! [`TokenForest`]: spans over the original buffer, linked into a tree whose
//! sibling order is document order. [`compact`] walks that tree and writes
//! minimal JSON without reparsing: leaf spans are copied verbatim, brackets
//! and punctuation are synthesized.
//!
//! The forest is an arena addressed by [`TokenId`]. Links can only be made by
//! [`TokenForest::append`], which always points at an earlier token, so a
//! forest cannot contain cycles.

use alloc::vec::Vec;

/// What a token stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `{ ... }`; its members are children.
    Object,
    /// `[ ... ]`; its elements are children.
    Array,
    /// A string value, quotes included.
    String,
    /// An object key, quotes included.
    Key,
    /// `true`, `false` or `null`.
    Literal,
    /// A numeric literal.
    Number,
    /// `,`
    Comma,
    /// `:`
    Colon,
}

impl TokenKind {
    /// Whether tokens of this kind may have children.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, TokenKind::Object | TokenKind::Array)
    }
}

/// Index of a token inside its [`TokenForest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(usize);

/// One span of the original document.
///
/// For leaf kinds `start..=end` is the inclusive byte span of the token
/// (quotes included for strings and keys). Containers and punctuation keep
/// their spans for reference only; the compactor never copies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// What the token stands for.
    pub kind: TokenKind,
    /// Offset of the first byte.
    pub start: usize,
    /// Offset of the last byte (inclusive).
    pub end: usize,
    child: Option<TokenId>,
    next: Option<TokenId>,
}

impl Token {
    /// First token of this container's child chain.
    #[must_use]
    pub fn first_child(&self) -> Option<TokenId> {
        self.child
    }

    /// Next token in the chain this token belongs to.
    #[must_use]
    pub fn next_sibling(&self) -> Option<TokenId> {
        self.next
    }
}

/// Arena of tokens forming sibling chains with optional child chains.
#[derive(Debug, Clone, Default)]
pub struct TokenForest {
    tokens: Vec<Token>,
    /// Last child of each token, to append in O(1).
    tails: Vec<Option<TokenId>>,
    root: Option<TokenId>,
    root_tail: Option<TokenId>,
}

impl TokenForest {
    /// An empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tokens, at any depth.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the forest holds no token at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Appends a token at the end of `parent`'s child chain, or of the top
    /// level chain when `parent` is `None`.
    ///
    /// # Panics
    ///
    /// If `parent` is not a container token of this forest.
    pub fn append(
        &mut self,
        parent: Option<TokenId>,
        kind: TokenKind,
        start: usize,
        end: usize,
    ) -> TokenId {
        let id = TokenId(self.tokens.len());
        let prev = match parent {
            Some(p) => {
                let parent_kind = self.get(p).kind;
                assert!(
                    parent_kind.is_container(),
                    "cannot append a child to a {parent_kind:?} token"
                );
                let prev = self.tails[p.0].replace(id);
                if prev.is_none() {
                    self.tokens[p.0].child = Some(id);
                }
                prev
            }
            None => {
                let prev = self.root_tail.replace(id);
                if prev.is_none() {
                    self.root = Some(id);
                }
                prev
            }
        };
        if let Some(prev) = prev {
            self.tokens[prev.0].next = Some(id);
        }
        self.tokens.push(Token {
            kind,
            start,
            end,
            child: None,
            next: None,
        });
        self.tails.push(None);
        id
    }

    /// The token behind `id`.
    ///
    /// # Panics
    ///
    /// If `id` does not belong to this forest.
    #[must_use]
    pub fn get(&self, id: TokenId) -> &Token {
        &self.tokens[id.0]
    }

    /// Iterates over the top level chain.
    #[must_use]
    pub fn roots(&self) -> Siblings<'_> {
        Siblings {
            forest: self,
            next: self.root,
        }
    }

    /// Iterates over the children of `id`.
    #[must_use]
    pub fn children(&self, id: TokenId) -> Siblings<'_> {
        Siblings {
            forest: self,
            next: self.get(id).child,
        }
    }
}

/// Iterator along a sibling chain.
#[derive(Debug, Clone)]
pub struct Siblings<'a> {
    forest: &'a TokenForest,
    next: Option<TokenId>,
}

impl Iterator for Siblings<'_> {
    type Item = TokenId;

    fn next(&mut self) -> Option<TokenId> {
        let id = self.next?;
        self.next = self.forest.get(id).next;
        Some(id)
    }
}

/// Writes the minimal JSON text for `forest` over `input`.
///
/// The output never grows beyond `input.len()` for a forest that describes
/// `input`: only the whitespace between tokens is dropped.
///
/// # Panics
///
/// If a leaf token's span lies outside `input` or is inverted. The forest is
/// trusted to describe `input`; a bad span is a bug in whatever built it.
///
/// # Examples
///
/// ```
/// use jsonsieve::{TokenForest, TokenKind, compact};
///
/// let input = b"[ 1 , true ]";
/// let mut forest = TokenForest::new();
/// let array = forest.append(None, TokenKind::Array, 0, 11);
/// forest.append(Some(array), TokenKind::Number, 2, 2);
/// forest.append(Some(array), TokenKind::Comma, 4, 4);
/// forest.append(Some(array), TokenKind::Literal, 6, 9);
/// assert_eq!(compact(input, &forest), b"[1,true]");
/// ```
#[must_use]
pub fn compact(input: &[u8], forest: &TokenForest) -> Vec<u8> {
    tracing::trace!(len = input.len(), tokens = forest.len(), "compacting token forest");
    let mut out = Vec::with_capacity(input.len());
    copy_chain(input, forest, forest.root, &mut out);
    debug_assert!(out.len() <= input.len(), "forest describes more bytes than the input holds");
    out
}

fn copy_chain(input: &[u8], forest: &TokenForest, first: Option<TokenId>, out: &mut Vec<u8>) {
    let mut next = first;
    while let Some(id) = next {
        let token = forest.get(id);
        match token.kind {
            TokenKind::Object => {
                out.push(b'{');
                copy_chain(input, forest, token.child, out);
                out.push(b'}');
            }
            TokenKind::Array => {
                out.push(b'[');
                copy_chain(input, forest, token.child, out);
                out.push(b']');
            }
            TokenKind::String | TokenKind::Key | TokenKind::Literal | TokenKind::Number => {
                assert!(
                    token.start <= token.end,
                    "{:?} token span {}..={} is inverted",
                    token.kind,
                    token.start,
                    token.end
                );
                let Some(span) = input.get(token.start..=token.end) else {
                    panic!(
                        "{:?} token span {}..={} outside input of {} bytes",
                        token.kind,
                        token.start,
                        token.end,
                        input.len()
                    );
                };
                out.extend_from_slice(span);
            }
            TokenKind::Comma => out.push(b','),
            TokenKind::Colon => out.push(b':'),
        }
        next = token.next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_links_children_in_order() {
        let mut forest = TokenForest::new();
        let obj = forest.append(None, TokenKind::Object, 0, 9);
        let k = forest.append(Some(obj), TokenKind::Key, 1, 3);
        let c = forest.append(Some(obj), TokenKind::Colon, 4, 4);
        let v = forest.append(Some(obj), TokenKind::Number, 5, 5);
        assert_eq!(forest.children(obj).collect::<Vec<_>>(), [k, c, v]);
        assert_eq!(forest.roots().collect::<Vec<_>>(), [obj]);
        assert_eq!(forest.get(obj).first_child(), Some(k));
        assert_eq!(forest.get(v).next_sibling(), None);
    }

    #[test]
    fn compacts_nested_object() {
        let input = br#"{ "a" : [ 1 , "x y" ] }"#;
        let mut forest = TokenForest::new();
        let obj = forest.append(None, TokenKind::Object, 0, 22);
        forest.append(Some(obj), TokenKind::Key, 2, 4);
        forest.append(Some(obj), TokenKind::Colon, 6, 6);
        let arr = forest.append(Some(obj), TokenKind::Array, 8, 20);
        forest.append(Some(arr), TokenKind::Number, 10, 10);
        forest.append(Some(arr), TokenKind::Comma, 12, 12);
        forest.append(Some(arr), TokenKind::String, 14, 18);
        let out = compact(input, &forest);
        assert_eq!(out, br#"{"a":[1,"x y"]}"#);
        assert!(out.len() <= input.len());
    }

    #[test]
    fn empty_forest_writes_nothing() {
        let forest = TokenForest::new();
        assert!(forest.is_empty());
        assert_eq!(forest.roots().next(), None);
        assert!(compact(b"  ", &forest).is_empty());
    }

    #[test]
    #[should_panic(expected = "cannot append a child")]
    fn leaf_tokens_cannot_have_children() {
        let mut forest = TokenForest::new();
        let n = forest.append(None, TokenKind::Number, 0, 0);
        forest.append(Some(n), TokenKind::Number, 1, 1);
    }

    #[test]
    #[should_panic(expected = "outside input")]
    fn span_outside_input_is_fatal() {
        let mut forest = TokenForest::new();
        forest.append(None, TokenKind::Number, 0, 10);
        let _ = compact(b"1", &forest);
    }

    #[test]
    #[should_panic(expected = "is inverted")]
    fn inverted_span_is_fatal() {
        let mut forest = TokenForest::new();
        let array = forest.append(None, TokenKind::Array, 0, 2);
        forest.append(Some(array), TokenKind::Number, 2, 1);
        let _ = compact(b"[1]", &forest);
    }
}
