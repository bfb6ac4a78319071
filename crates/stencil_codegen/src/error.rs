use swc_core::common::{Span, Spanned};

#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    /// A construct which parses but cannot be rendered yet
    #[error("not implemented: {what}")]
    NotImplemented { what: &'static str, span: Span },
}

impl Spanned for CodegenError {
    fn span(&self) -> Span {
        match self {
            CodegenError::NotImplemented { span, .. } => *span,
        }
    }
}
