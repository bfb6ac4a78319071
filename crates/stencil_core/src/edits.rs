//! Edit log over the original source text.
//!
//! Transformations never rewrite the source in place. They record edits
//! (insertions and overwrites) against byte offsets of the original text,
//! and the text of any range is materialized with [`EditBuffer::slice`].
//!
//! Insertions have an affinity:
//! - [`EditBuffer::prepend_right`] attaches the text to the chunk *starting* at the offset,
//!   so it is included in `slice(offset, _)`;
//! - [`EditBuffer::append_left`] attaches the text to the chunk *ending* at the offset,
//!   so it is included in `slice(_, offset)`.

use std::collections::BTreeMap;

/// Original source with the recorded edits.
///
/// Deliberately not `Clone`: a buffer belongs to exactly one compilation
/// and is consumed when the output is composed.
#[derive(Debug)]
pub struct EditBuffer {
    original: String,
    /// Inserted text belonging to the chunk which ends at the key
    left: BTreeMap<u32, String>,
    /// Inserted text belonging to the chunk which starts at the key
    right: BTreeMap<u32, String>,
    /// `start -> (end, replacement)`, ranges never overlap
    overwrites: BTreeMap<u32, (u32, String)>,
}

impl EditBuffer {
    pub fn new(original: impl Into<String>) -> EditBuffer {
        EditBuffer {
            original: original.into(),
            left: BTreeMap::new(),
            right: BTreeMap::new(),
            overwrites: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.original.len() as u32
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    /// Inserts `text` at `offset`, attached to the chunk starting at `offset`.
    /// Subsequent calls with the same offset append after the previous text.
    pub fn prepend_right(&mut self, offset: u32, text: &str) {
        debug_assert!(offset <= self.len());
        self.right.entry(offset).or_default().push_str(text);
    }

    /// Inserts `text` at `offset`, attached to the chunk ending at `offset`.
    /// Subsequent calls with the same offset append after the previous text.
    pub fn append_left(&mut self, offset: u32, text: &str) {
        debug_assert!(offset <= self.len());
        self.left.entry(offset).or_default().push_str(text);
    }

    /// Replaces `start..end` with `text`.
    /// Insertions strictly inside the range are discarded when slicing.
    pub fn overwrite(&mut self, start: u32, end: u32, text: &str) {
        debug_assert!(start <= end && end <= self.len());
        if start == end {
            self.prepend_right(start, text);
            return;
        }
        debug_assert!(
            !self.overlaps_overwrite(start, end),
            "overwrites must not overlap"
        );
        self.overwrites.insert(start, (end, text.to_owned()));
    }

    /// Removes `start..end`
    #[inline]
    pub fn remove(&mut self, start: u32, end: u32) {
        self.overwrite(start, end, "");
    }

    /// Returns the text of `start..end` with all the edits applied
    pub fn slice(&self, start: u32, end: u32) -> String {
        debug_assert!(start <= end && end <= self.len());

        let mut out = String::with_capacity((end - start) as usize);
        let mut pos = start;

        loop {
            if pos > start {
                if let Some(text) = self.left.get(&pos) {
                    out.push_str(text);
                }
            }

            if pos >= end {
                break;
            }

            if let Some(text) = self.right.get(&pos) {
                out.push_str(text);
            }

            if let Some((overwrite_end, text)) = self.overwrites.get(&pos) {
                out.push_str(text);
                pos = (*overwrite_end).min(end);
                continue;
            }

            let next = self.next_edit_after(pos).min(end);
            out.push_str(&self.original[pos as usize..next as usize]);
            pos = next;
        }

        out
    }

    /// The whole text with all the edits applied
    #[inline]
    pub fn to_edited_string(&self) -> String {
        self.slice(0, self.len())
    }

    /// The nearest offset after `pos` where an edit is anchored
    fn next_edit_after(&self, pos: u32) -> u32 {
        let after = pos + 1..;
        let candidates = [
            self.left.range(after.clone()).next().map(|(k, _)| *k),
            self.right.range(after.clone()).next().map(|(k, _)| *k),
            self.overwrites.range(after).next().map(|(k, _)| *k),
        ];

        candidates
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(self.len())
    }

    fn overlaps_overwrite(&self, start: u32, end: u32) -> bool {
        // The closest overwrite starting before `end`
        self.overwrites
            .range(..end)
            .next_back()
            .map_or(false, |(_, (other_end, _))| *other_end > start)
    }
}
