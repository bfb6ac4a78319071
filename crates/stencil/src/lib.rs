//! The main public crate of the `stencil` project.
//!
//! Here's how you can use `stencil` to compile a template:
//!
//! ```
//! let input = r#"
//!   <p>Hello, {{name}}!</p>
//!
//!   <script>
//!     export default {
//!       data: () => ({ name: 'world' })
//!     };
//!   </script>
//! "#;
//!
//! let result = stencil::compile(input, &stencil::CompileOptions::default()).unwrap();
//! assert!(result.code.contains("exports.render = function ( data ) {"));
//! ```

#[macro_use]
extern crate lazy_static;

pub mod errors;
pub mod loader;

use std::borrow::Cow;

use stencil_codegen::{generate_module, CodegenContext, SnippetComposer, SourceSegment};
use stencil_core::{EditBuffer, TemplateConfig};
use stencil_parser::{parse, validate, ParseOptions};
use stencil_transform::{reject_css, transform_script};
use swc_core::ecma::ast::EsVersion;

pub use errors::CompileError;
pub use stencil_core::*;

#[derive(Debug, Clone)]
pub struct CompileOptions<'o> {
    /// Name of the template, only used to tag the output
    pub filename: Cow<'o, str>,
    /// EcmaScript version of the expressions and `<script>`
    pub es_version: EsVersion,
}

impl Default for CompileOptions<'_> {
    fn default() -> Self {
        CompileOptions {
            filename: Cow::Borrowed("anonymous.html"),
            es_version: EsVersion::EsNext,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompileResult {
    /// CommonJS module exporting `render(data)`
    pub code: String,
    pub filename: String,
    /// Positions of the source pieces in `code`
    pub segments: Vec<SourceSegment>,
}

/// Compiles the template source into a CommonJS module exporting `render(data)`.
///
/// The steps are:
/// 1. parsing and validation;
/// 2. `<script>` transformation and configuration extraction;
/// 3. generation of the render function;
/// 4. composition of the generated pieces with the edited source.
#[tracing::instrument(skip_all, fields(filename = %options.filename))]
pub fn compile(source: &str, options: &CompileOptions) -> Result<CompileResult, CompileError> {
    let parse_options = ParseOptions {
        es_version: options.es_version,
    };

    let template = parse(source, &parse_options)?;
    validate(&template, source, &parse_options)?;
    reject_css(&template)?;

    // One buffer per compilation, it is consumed by the composer
    let mut edits = EditBuffer::new(source);

    let script = match template.script {
        Some(ref script) => Some(transform_script(script, &mut edits)?),
        None => None,
    };

    let default_config = TemplateConfig::default();
    let config = script.as_ref().map_or(&default_config, |it| &it.config);

    let blocks = CodegenContext::new(config, &mut edits).generate_render_blocks(&template.html)?;
    let fragments = generate_module(script, blocks);

    let output = SnippetComposer::new(edits).compose(fragments);

    tracing::debug!(
        len = output.code.len(),
        segments = output.segments.len(),
        "compiled template"
    );

    Ok(CompileResult {
        code: output.code,
        filename: options.filename.to_string(),
        segments: output.segments,
    })
}
