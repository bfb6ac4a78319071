use fxhash::FxHashSet;
use stencil_core::{ElementNode, StencilAtom, Template, TemplateNode};
use swc_core::{
    common::Spanned,
    ecma::ast::{ModuleDecl, ModuleItem},
};

use crate::{ParseError, ParseErrorKind, ParseOptions};

/// Names used by the generated `render` function itself
const RESERVED_NAMES: [&str; 3] = ["data", "template", "rendered"];

/// Checks a parsed template for the errors which the parser does not catch:
/// - an attribute is specified twice on one element;
/// - an each-block binds the same name twice;
/// - an each-block binds a name used by the generated code;
/// - `<script>` has more than one default export.
pub fn validate(
    template: &Template,
    _source: &str,
    _options: &ParseOptions,
) -> Result<(), ParseError> {
    validate_nodes(&template.html)?;

    if let Some(ref script) = template.script {
        let mut has_default_export = false;

        for item in script.content.body.iter() {
            let ModuleItem::ModuleDecl(decl) = item else {
                continue;
            };

            if !matches!(
                decl,
                ModuleDecl::ExportDefaultExpr(_) | ModuleDecl::ExportDefaultDecl(_)
            ) {
                continue;
            }

            if has_default_export {
                return Err(ParseError {
                    kind: ParseErrorKind::DuplicateDefaultExport,
                    span: decl.span(),
                });
            }
            has_default_export = true;
        }
    }

    Ok(())
}

fn validate_nodes(nodes: &[TemplateNode]) -> Result<(), ParseError> {
    for node in nodes {
        match node {
            TemplateNode::Element(element) => {
                validate_attributes(element)?;
                validate_nodes(&element.children)?;
            }

            TemplateNode::IfBlock(if_block) => {
                validate_nodes(&if_block.children)?;
                if let Some(ref else_children) = if_block.else_children {
                    validate_nodes(else_children)?;
                }
            }

            TemplateNode::EachBlock(each_block) => {
                let bindings = std::iter::once(&each_block.item).chain(each_block.index.as_ref());
                for binding in bindings {
                    if RESERVED_NAMES.contains(&&*binding.name) {
                        return Err(ParseError {
                            kind: ParseErrorKind::ReservedName(binding.name.to_owned()),
                            span: binding.span,
                        });
                    }
                }

                if let Some(ref index) = each_block.index {
                    if index.name == each_block.item.name {
                        return Err(ParseError {
                            kind: ParseErrorKind::DuplicateBinding(index.name.to_owned()),
                            span: index.span,
                        });
                    }
                }

                validate_nodes(&each_block.children)?;
            }

            TemplateNode::Text(_) | TemplateNode::MustacheTag(_) => {}
        }
    }

    Ok(())
}

fn validate_attributes(element: &ElementNode) -> Result<(), ParseError> {
    let mut seen: FxHashSet<&StencilAtom> = FxHashSet::default();

    for attr in element.attributes.iter() {
        if !seen.insert(&attr.name) {
            return Err(ParseError {
                kind: ParseErrorKind::DuplicateAttribute(attr.name.to_owned()),
                span: attr.span,
            });
        }
    }

    Ok(())
}
