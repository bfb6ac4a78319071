//! Error definitions for the glue code of `stencil`

use std::path::PathBuf;

use stencil_codegen::CodegenError;
use stencil_parser::ParseError;
use stencil_transform::ScriptError;
use swc_core::common::{Span, Spanned};

/// Any error aborts the compilation, there is never a partial output
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The template could not be parsed or is invalid.
    ///
    /// This can be due to:
    /// - unclosed elements, blocks or mustaches;
    /// - bad ES in expressions or `<script>`;
    /// - duplicate attributes or block bindings;
    /// - reserved names used as block bindings.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The `<script>` (or `<style>`) cannot be compiled
    #[error("script error: {0}")]
    Script(#[from] ScriptError),

    /// A construct has no generation rule
    #[error("codegen error: {0}")]
    Codegen(#[from] CodegenError),
}

impl Spanned for CompileError {
    fn span(&self) -> Span {
        match self {
            CompileError::Parse(e) => e.span,
            CompileError::Script(e) => e.span,
            CompileError::Codegen(e) => e.span(),
        }
    }
}

/// Errors of [`crate::loader::ModuleLoader`]
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The loader is registered for another extension
    #[error("{path} does not have the {extension} extension")]
    UnsupportedExtension { path: PathBuf, extension: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to compile {path}: {source}")]
    Compile {
        path: PathBuf,
        source: CompileError,
    },

    /// The host could not evaluate the generated module
    #[error("failed to load the module {path}: {source}")]
    Host {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
