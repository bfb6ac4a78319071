use stencil_core::{EachBlock, Fragment, IfBlock, ScopeStack};

use crate::{
    context::{CodeFragment, CodegenContext},
    error::CodegenError,
    utils::is_member_safe,
};

impl CodegenContext<'_> {
    /// Generates ``(cond) ? `consequent` : `alternate` ``.
    /// A missing alternate is an empty literal.
    pub fn generate_if_block(
        &mut self,
        if_block: &IfBlock,
        scope: &ScopeStack,
    ) -> Result<CodeFragment, CodegenError> {
        let mut out = Vec::with_capacity(5 + if_block.children.len());

        out.push(Fragment::text("("));
        out.push(self.resolve(&if_block.expression, scope));
        out.push(Fragment::text(") ? `"));
        out.extend(self.generate_children(&if_block.children, scope)?);
        out.push(Fragment::text("` : `"));
        if let Some(ref else_children) = if_block.else_children {
            out.extend(self.generate_children(else_children, scope)?);
        }
        out.push(Fragment::text("`"));

        Ok(CodeFragment::Interpolation(out))
    }

    /// Generates ``items.map( ( item, index ) => `body` ).join( '' )``.
    /// The body is generated with `item` and `index` bound.
    pub fn generate_each_block(
        &mut self,
        each_block: &EachBlock,
        scope: &ScopeStack,
    ) -> Result<CodeFragment, CodegenError> {
        let mut out = Vec::with_capacity(4 + each_block.children.len());

        let iterable = self.resolve(&each_block.expression, scope);
        if is_member_safe(&each_block.expression) {
            out.push(iterable);
        } else {
            out.push(Fragment::text("("));
            out.push(iterable);
            out.push(Fragment::text(")"));
        }

        let item = &each_block.item.name;
        let params = match each_block.index {
            Some(ref index) => format!("( {item}, {} )", index.name),
            None => item.to_string(),
        };
        out.push(Fragment::text(format!(".map( {params} => `")));

        let names = std::iter::once(item.to_owned())
            .chain(each_block.index.as_ref().map(|it| it.name.to_owned()));
        let block_scope = scope.push(names);
        out.extend(self.generate_children(&each_block.children, &block_scope)?);

        out.push(Fragment::text("` ).join( '' )"));

        Ok(CodeFragment::Interpolation(out))
    }
}
