use stencil_core::StencilAtom;
use swc_core::common::{Span, Spanned};

#[derive(Debug, thiserror::Error)]
#[error("{kind} at {}..{}", .span.lo.0, .span.hi.0)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

#[derive(Debug, thiserror::Error)]
pub enum ParseErrorKind {
    /// Error while parsing EcmaScript
    #[error("{}", .0.msg())]
    BadExpr(swc_ecma_parser::error::SyntaxError),
    /// `{{ a b }}`: the expression ended before the mustache did
    #[error("unexpected content after the expression")]
    ExpressionTrailingContent,
    /// `{{ foo` without `}}`
    #[error("unclosed mustache tag")]
    UnclosedMustache,
    /// `<!-- ...` without `-->`
    #[error("unclosed comment")]
    UnclosedComment,
    /// `<div>` without `</div>`
    #[error("<{0}> was left open")]
    UnclosedElement(StencilAtom),
    /// `{{#if}}` without `{{/if}}`
    #[error("{{{{#{0}}}}} block was left open")]
    UnclosedBlock(StencilAtom),
    /// `</div>` which does not close anything
    #[error("</{0}> attempted to close an element that was not open")]
    UnexpectedClosingTag(StencilAtom),
    /// `{{/if}}` which does not close anything
    #[error("{{{{/{0}}}}} attempted to close a block that was not open")]
    UnexpectedBlockClose(StencilAtom),
    /// `{{else}}` outside of `{{#if}}`
    #[error("{{{{else}}}} outside of an {{{{#if}}}} block")]
    UnexpectedElse,
    /// `{{#unless}}` or any other unknown block
    #[error("unknown block type {{{{#{0}}}}}")]
    UnknownBlock(StencilAtom),
    /// `{{#each items}}`, i.e. without `as item`
    #[error("expected {{{{#each expression as item}}}} or {{{{#each expression as item, index}}}}")]
    InvalidEachBlock,
    /// `{{#each items as 1}}`
    #[error("'{0}' is not a valid binding name")]
    InvalidBindingName(StencilAtom),
    /// Malformed tag or attribute name
    #[error("invalid tag or attribute syntax")]
    InvalidTagSyntax,
    /// `title="foo` without the closing quote
    #[error("unclosed attribute value")]
    UnclosedAttributeValue,
    /// `<script>` or `<style>` inside an element or block
    #[error("<{0}> tags are only supported at the top level")]
    NestedScriptOrStyle(StencilAtom),
    /// More than one top-level `<script>`
    #[error("a template can only have one <script> tag")]
    DuplicateScript,
    /// More than one top-level `<style>`
    #[error("a template can only have one <style> tag")]
    DuplicateStyle,

    // Validation
    /// `<div class="a" class="b">`
    #[error("attribute '{0}' is specified more than once")]
    DuplicateAttribute(StencilAtom),
    /// `{{#each items as item, item}}`
    #[error("'{0}' is bound more than once by the same block")]
    DuplicateBinding(StencilAtom),
    /// `{{#each items as data}}` would shadow a name the generated code relies on
    #[error("'{0}' is reserved and cannot be used as a block binding")]
    ReservedName(StencilAtom),
    /// More than one `export default` in `<script>`
    #[error("a component can only have one default export")]
    DuplicateDefaultExport,
}

impl From<swc_ecma_parser::error::Error> for ParseError {
    fn from(value: swc_ecma_parser::error::Error) -> ParseError {
        let span = value.span();

        ParseError {
            kind: ParseErrorKind::BadExpr(value.into_kind()),
            span,
        }
    }
}

impl Spanned for ParseError {
    fn span(&self) -> Span {
        self.span
    }
}
