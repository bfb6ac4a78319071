use std::borrow::Cow;

use swc_core::common::{BytePos, Span};

/// A piece of generated output.
///
/// Code generation never embeds source text directly. Instead, it emits
/// [`Fragment::SourceSlice`] markers which the composer resolves against the
/// edited source once all the edits are done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Text produced by the compiler, without a source position
    Synthesized(Cow<'static, str>),
    /// `start..end` byte range of the source, read with all the edits applied
    SourceSlice { start: u32, end: u32 },
}

impl Fragment {
    #[inline]
    pub fn text(text: impl Into<Cow<'static, str>>) -> Fragment {
        Fragment::Synthesized(text.into())
    }

    #[inline]
    pub fn slice(span: Span) -> Fragment {
        Fragment::SourceSlice {
            start: to_offset(span.lo),
            end: to_offset(span.hi),
        }
    }
}

/// Converts a parser position to a byte offset in the source.
/// All `Span`s produced by the parser start from 1, `BytePos(0)` is reserved for dummies.
#[inline]
pub fn to_offset(pos: BytePos) -> u32 {
    pos.0.saturating_sub(1)
}

/// Inverse of [`to_offset`]
#[inline]
pub fn to_byte_pos(offset: usize) -> BytePos {
    BytePos(offset as u32 + 1)
}

/// Span of the `start..end` byte range of the source
#[inline]
pub fn span_of(start: usize, end: usize) -> Span {
    Span::new(to_byte_pos(start), to_byte_pos(end))
}
