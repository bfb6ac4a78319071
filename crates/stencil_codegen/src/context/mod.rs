use stencil_core::{EditBuffer, Fragment, ScopeStack, TemplateConfig, TemplateNode};
use stencil_transform::{atoms::RENDERED, resolve_expr};
use swc_core::ecma::ast::Expr;

use crate::{error::CodegenError, utils::needs_parens};

/// State of the render function generation.
///
/// The configuration is fully known before the context is created
/// and only the edit buffer is written during the generation.
pub struct CodegenContext<'c> {
    pub config: &'c TemplateConfig,
    pub edits: &'c mut EditBuffer,
}

/// Code generated for a template node
#[derive(Debug, Clone, PartialEq)]
pub enum CodeFragment {
    /// A JavaScript expression, e.g. `data.name`
    Interpolation(Vec<Fragment>),
    /// The body of a template literal, e.g. `<p>${data.name}</p>`
    Literal(Vec<Fragment>),
}

impl CodeFragment {
    /// Appends the fragment to the body of a template literal
    pub fn push_into_literal(self, out: &mut Vec<Fragment>) {
        match self {
            CodeFragment::Interpolation(fragments) => {
                out.push(Fragment::text("${"));
                out.extend(fragments);
                out.push(Fragment::text("}"));
            }
            CodeFragment::Literal(fragments) => out.extend(fragments),
        }
    }

    /// Converts to a standalone JavaScript expression.
    /// An interpolation is used as is, a literal is wrapped in backticks.
    pub fn into_expression(self) -> Vec<Fragment> {
        match self {
            CodeFragment::Interpolation(fragments) => fragments,
            CodeFragment::Literal(fragments) => {
                let mut out = Vec::with_capacity(fragments.len() + 2);
                out.push(Fragment::text("`"));
                out.extend(fragments);
                out.push(Fragment::text("`"));
                out
            }
        }
    }
}

impl<'c> CodegenContext<'c> {
    pub fn new(config: &'c TemplateConfig, edits: &'c mut EditBuffer) -> Self {
        CodegenContext { config, edits }
    }

    /// Generates one `rendered += ...;` statement per top-level node
    pub fn generate_render_blocks(
        &mut self,
        nodes: &[TemplateNode],
    ) -> Result<Vec<Vec<Fragment>>, CodegenError> {
        let scope = ScopeStack::new();
        let mut blocks = Vec::with_capacity(nodes.len());

        for node in nodes {
            tracing::trace!(kind = node.kind(), "generating render block");
            let mut block = vec![Fragment::text(format!("{} += ", *RENDERED))];
            block.extend(self.generate_node(node, &scope)?.into_expression());
            block.push(Fragment::text(";"));
            blocks.push(block);
        }

        Ok(blocks)
    }

    pub fn generate_node(
        &mut self,
        node: &TemplateNode,
        scope: &ScopeStack,
    ) -> Result<CodeFragment, CodegenError> {
        match node {
            TemplateNode::Element(element_node) => self.generate_element(element_node, scope),
            TemplateNode::Text(text_node) => Ok(self.generate_text(text_node)),
            TemplateNode::MustacheTag(mustache_tag) => Ok(CodeFragment::Interpolation(
                self.generate_expr(&mustache_tag.expression, scope),
            )),
            TemplateNode::IfBlock(if_block) => self.generate_if_block(if_block, scope),
            TemplateNode::EachBlock(each_block) => self.generate_each_block(each_block, scope),
        }
    }

    /// Generates the nodes as the body of a template literal
    pub fn generate_children(
        &mut self,
        children: &[TemplateNode],
        scope: &ScopeStack,
    ) -> Result<Vec<Fragment>, CodegenError> {
        let mut out = Vec::with_capacity(children.len());
        for child in children {
            self.generate_node(child, scope)?.push_into_literal(&mut out);
        }
        Ok(out)
    }

    /// Resolves the references of an expression
    #[inline]
    pub fn resolve(&mut self, expr: &Expr, scope: &ScopeStack) -> Fragment {
        resolve_expr(expr, scope, &self.config.helpers, self.edits)
    }

    /// Resolves an expression, parenthesized if it cannot be safely embedded
    pub fn generate_expr(&mut self, expr: &Expr, scope: &ScopeStack) -> Vec<Fragment> {
        let resolved = self.resolve(expr, scope);

        if needs_parens(expr) {
            vec![Fragment::text("("), resolved, Fragment::text(")")]
        } else {
            vec![resolved]
        }
    }
}
