//! Final assembly of the generated code.

use std::ops::Range;

use stencil_core::{EditBuffer, Fragment};

/// Resolves [`Fragment`]s into the final code.
///
/// Owns the edit buffer, so the edits of one compilation are read exactly once.
pub struct SnippetComposer {
    edits: EditBuffer,
    /// Byte offsets of the line starts of the original source
    line_starts: Vec<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct ComposedOutput {
    pub code: String,
    /// One segment per source slice, in the order of the generated code
    pub segments: Vec<SourceSegment>,
}

/// Correspondence between a range of the generated code and a range of the source.
/// Lines are 0-based, columns are byte columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSegment {
    pub generated: Range<usize>,
    pub original: Range<u32>,
    pub generated_line: u32,
    pub generated_column: u32,
    pub original_line: u32,
    pub original_column: u32,
}

impl SnippetComposer {
    pub fn new(edits: EditBuffer) -> SnippetComposer {
        let line_starts = std::iter::once(0)
            .chain(
                edits
                    .original()
                    .match_indices('\n')
                    .map(|(idx, _)| idx as u32 + 1),
            )
            .collect();

        SnippetComposer { edits, line_starts }
    }

    /// Concatenates the fragments, source slices are read with all the edits applied
    pub fn compose(self, fragments: Vec<Fragment>) -> ComposedOutput {
        let mut out = ComposedOutput::default();
        let mut generated_line = 0;
        let mut generated_line_start = 0;

        for fragment in fragments {
            let text = match fragment {
                Fragment::Synthesized(text) => text,

                Fragment::SourceSlice { start, end } => {
                    let text = self.edits.slice(start, end);
                    let (original_line, original_column) = self.line_column(start);

                    out.segments.push(SourceSegment {
                        generated: out.code.len()..out.code.len() + text.len(),
                        original: start..end,
                        generated_line,
                        generated_column: (out.code.len() - generated_line_start) as u32,
                        original_line,
                        original_column,
                    });

                    text.into()
                }
            };

            for (idx, _) in text.match_indices('\n') {
                generated_line += 1;
                generated_line_start = out.code.len() + idx + 1;
            }
            out.code.push_str(&text);
        }

        tracing::trace!(
            len = out.code.len(),
            segments = out.segments.len(),
            "composed output"
        );

        out
    }

    /// 0-based line and byte column of an original offset
    fn line_column(&self, offset: u32) -> (u32, u32) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next_line) => next_line - 1,
        };

        (line as u32, offset - self.line_starts[line])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_composes_fragments() {
        let mut edits = EditBuffer::new("<p>\n  {{name}}\n</p>");
        edits.prepend_right(8, "data.");

        let output = SnippetComposer::new(edits).compose(vec![
            Fragment::text("rendered += `<p>\n  ${"),
            Fragment::SourceSlice { start: 8, end: 12 },
            Fragment::text("}\n</p>`;"),
        ]);

        assert_eq!(output.code, "rendered += `<p>\n  ${data.name}\n</p>`;");
        assert_eq!(
            output.segments,
            vec![SourceSegment {
                generated: 21..30,
                original: 8..12,
                generated_line: 1,
                generated_column: 4,
                original_line: 1,
                original_column: 4,
            }]
        );
    }

    #[test]
    fn it_handles_first_line_and_empty_slices() {
        let edits = EditBuffer::new("abc");
        let output = SnippetComposer::new(edits).compose(vec![
            Fragment::SourceSlice { start: 0, end: 3 },
            Fragment::SourceSlice { start: 3, end: 3 },
        ]);

        assert_eq!(output.code, "abc");
        assert_eq!(output.segments.len(), 2);
        assert_eq!(output.segments[1].original_column, 3);
        assert_eq!(output.segments[1].generated, 3..3);
    }
}
