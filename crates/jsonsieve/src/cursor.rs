//! Byte cursor over the caller's input buffer.
//!
//! The slice carries its own length, so "end of input" is simply `next()`
//! returning `None`. A NUL byte before the end is an ordinary byte here; the
//! grammar routines decide whether it is legal (it never is outside strings,
//! and inside strings it is a raw control byte).

use crate::ParserOptions;

#[derive(Debug)]
pub(crate) struct Cursor<'src> {
    input: &'src [u8],
    pos: usize,
    pub(crate) unicode: bool,
    pub(crate) force_unicode: bool,
}

impl<'src> Cursor<'src> {
    pub(crate) fn new(input: &'src [u8], options: &ParserOptions) -> Self {
        Self {
            input,
            pos: 0,
            unicode: options.unicode,
            force_unicode: options.force_unicode,
        }
    }

    /// Consumes and returns the next byte, or `None` at the true end.
    #[inline]
    pub(crate) fn next(&mut self) -> Option<u8> {
        let b = *self.input.get(self.pos)?;
        self.pos += 1;
        Some(b)
    }

    /// Pushes the last consumed byte back.
    #[inline]
    pub(crate) fn back(&mut self) {
        debug_assert!(self.pos > 0, "nothing to push back");
        self.pos -= 1;
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// Offset of the byte most recently returned by [`Cursor::next`].
    #[inline]
    pub(crate) fn last(&self) -> usize {
        self.pos.saturating_sub(1)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.input.len()
    }

    pub(crate) fn seek(&mut self, pos: usize) {
        debug_assert!(pos <= self.input.len());
        self.pos = pos;
    }

    #[inline]
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'src [u8] {
        &self.input[start..end]
    }

    /// Resolves the unicode flag for a freshly produced string value,
    /// consuming the one-shot `force_unicode` flag.
    pub(crate) fn take_string_unicode(&mut self) -> bool {
        let forced = core::mem::take(&mut self.force_unicode);
        self.unicode || forced
    }
}
