use stencil_core::{Fragment, TextNode};

use crate::{
    context::{CodeFragment, CodegenContext},
    utils::escape_literal,
};

impl CodegenContext<'_> {
    /// Text is emitted verbatim, so `${` in it is escaped and never interpolated
    pub fn generate_text(&mut self, text_node: &TextNode) -> CodeFragment {
        let mut escaped = String::with_capacity(text_node.data.len());
        escape_literal(&text_node.data, &mut escaped);

        CodeFragment::Literal(vec![Fragment::text(escaped)])
    }
}
