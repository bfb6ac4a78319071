use swc_core::{
    common::Span,
    ecma::ast::{Expr, Module},
};

use crate::StencilAtom;

/// A parsed template document.
///
/// `html` holds the top-level nodes in source order.
/// A top-level `<script>` and `<style>` are extracted into their own blocks
/// and never appear in `html`.
#[derive(Debug, Default)]
pub struct Template {
    pub html: Vec<TemplateNode>,
    pub script: Option<ScriptBlock>,
    pub css: Option<StyleBlock>,
}

/// The contents of a top-level `<script>`.
///
/// `span` covers the text between `<script>` and `</script>`,
/// which is the region the script transformation edits and later re-emits.
#[derive(Debug)]
pub struct ScriptBlock {
    pub content: Box<Module>,
    pub span: Span,
}

/// A top-level `<style>`. It is only recorded so the compiler can reject it.
#[derive(Debug)]
pub struct StyleBlock {
    pub span: Span,
}

/// A TemplateNode represents a part of the template Abstract Syntax Tree.
///
/// ### `Element`
/// A plain HTML tag with attributes and children, e.g. `<p class="x">...</p>`.
/// Element names matching a declared component are rendered through that component.
///
/// ### `Text`
/// Static text, rendered verbatim.
///
/// ### `MustacheTag`
/// An interpolation: `{{ some + js - expression }}`.
///
/// ### `IfBlock`
/// `{{#if cond}}...{{else}}...{{/if}}`, where `{{elseif cond}}` is parsed
/// as a nested `IfBlock` inside `else_children`.
///
/// ### `EachBlock`
/// `{{#each items as item, index}}...{{/each}}`
#[derive(Debug, strum_macros::IntoStaticStr)]
pub enum TemplateNode {
    Element(ElementNode),
    Text(TextNode),
    MustacheTag(MustacheTag),
    IfBlock(IfBlock),
    EachBlock(EachBlock),
}

impl TemplateNode {
    /// Name of the construct, used in diagnostics
    #[inline]
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

#[derive(Debug)]
pub struct ElementNode {
    pub name: StencilAtom,
    pub attributes: Vec<Attribute>,
    pub children: Vec<TemplateNode>,
    pub span: Span,
}

#[derive(Debug)]
pub struct TextNode {
    pub data: StencilAtom,
    pub span: Span,
}

#[derive(Debug)]
pub struct MustacheTag {
    pub expression: Box<Expr>,
    pub span: Span,
}

#[derive(Debug)]
pub struct IfBlock {
    pub expression: Box<Expr>,
    pub children: Vec<TemplateNode>,
    pub else_children: Option<Vec<TemplateNode>>,
    pub span: Span,
}

#[derive(Debug)]
pub struct EachBlock {
    pub expression: Box<Expr>,
    /// `item` in `{{#each items as item, index}}`
    pub item: BlockBinding,
    /// `index` in `{{#each items as item, index}}`
    pub index: Option<BlockBinding>,
    pub children: Vec<TemplateNode>,
    pub span: Span,
}

/// A name introduced by an iteration block
#[derive(Debug, Clone, PartialEq)]
pub struct BlockBinding {
    pub name: StencilAtom,
    pub span: Span,
}

#[derive(Debug)]
pub struct Attribute {
    pub name: StencilAtom,
    pub value: AttributeValue,
    pub span: Span,
}

#[derive(Debug)]
pub enum AttributeValue {
    /// `<input disabled>`
    Boolean,
    /// `<div class="static {{dynamic}}">`, parts are in source order
    Parts(Vec<AttributeValuePart>),
}

#[derive(Debug)]
pub enum AttributeValuePart {
    Text(StencilAtom),
    Expression(Box<Expr>),
}

impl AttributeValue {
    /// Returns the expression if the value is exactly one interpolation, e.g. `foo="{{bar}}"`
    pub fn as_single_expression(&self) -> Option<&Expr> {
        match self {
            AttributeValue::Parts(parts) => match parts.as_slice() {
                [AttributeValuePart::Expression(expr)] => Some(expr),
                _ => None,
            },
            AttributeValue::Boolean => None,
        }
    }
}
