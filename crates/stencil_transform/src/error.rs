use stencil_core::StencilAtom;
use swc_core::common::{Span, Spanned};

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct ScriptError {
    pub span: Span,
    pub kind: ScriptErrorKind,
}

#[derive(Debug, thiserror::Error)]
pub enum ScriptErrorKind {
    /// `<style>` is present in the template
    #[error("CSS is not supported")]
    UnsupportedCss,
    /// The default export is not a plain object literal,
    /// e.g. `export default function () {}` or `export default { ...base }`
    #[error("default export must be an object literal without spread elements or computed keys")]
    InvalidDefaultExport,
    /// A reserved property of the default export has an unexpected shape,
    /// e.g. `helpers: someObject` or `data: {}`
    #[error("`{0}` property of the default export has an unsupported shape")]
    InvalidConfigProperty(StencilAtom),
    /// `export * from 'mod'`
    #[error("`export *` is not supported")]
    UnsupportedExport,
}

impl Spanned for ScriptError {
    fn span(&self) -> Span {
        self.span
    }
}
